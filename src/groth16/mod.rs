//! Groth16: trusted setup, proving, and verification over a QAP.
//!
//! The four pieces compose in a fixed pipeline:
//! [`trapdoor::SimulationTrapdoor`] samples the toxic waste,
//! [`crs::Crs::generate`] folds it into the public CRS and the trapdoor is
//! then meant to be dropped, [`prover::Proof::prove`] builds a proof against
//! the CRS, and [`verifier::verify`] checks it with a single pairing
//! equation. [`forger`] exists only to demonstrate what a retained trapdoor
//! lets you do, and compiles in only under the `forger` feature — off by
//! default, the same way the teacher gates its insecure `generate_dev_srs`
//! behind its `dev-srs` feature.

pub mod crs;
#[cfg(feature = "forger")]
pub mod forger;
pub mod prover;
pub mod trapdoor;
pub mod verifier;

pub use crs::{Crs, CrsError};
#[cfg(feature = "forger")]
pub use forger::{forge, ForgeError};
pub use prover::{Proof, ProveError};
pub use trapdoor::{SimulationTrapdoor, TrapdoorError};
pub use verifier::{verify, VerifyError};
