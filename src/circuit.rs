//! Algebraic circuits: an arena of arithmetic gates wired into a DAG, with a
//! labeling pass that assigns every non-constant wire an R1CS signal index
//! and a constraint-emission pass that lowers the DAG into an
//! [`R1csSystem`](crate::r1cs::R1csSystem).
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeIdx`] — an
//! arena of integer indices rather than an owning-pointer graph, so the
//! whole circuit can be built, cloned, and walked without any reference
//! counting. An in-edge may only point at a node with a strictly smaller
//! index, so construction order is automatically a topological order.

use std::cell::Cell;
use std::collections::HashMap;

use ark_ff::{Field, PrimeField};

use crate::r1cs::{R1csConstraint, R1csSystem};

/// An index into a [`Circuit`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(pub usize);

/// What a node computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A circuit input: either a free signal (witness/instance value supplied
    /// at execution time) or a fixed constant.
    Source,
    /// A circuit output marker; transparently forwards its single input.
    Sink,
    /// `left + right`.
    Add,
    /// `left * right`.
    Mul,
}

/// One node in the arena, as supplied to [`Circuit::build`].
#[derive(Debug, Clone)]
pub struct NodeSpec<F: PrimeField> {
    /// The node's operation.
    pub kind: NodeKind,
    /// Fixed value, meaningful only when `kind` is [`NodeKind::Source`]. A
    /// `Source` with `constant == None` is a free input wire.
    pub constant: Option<F>,
    /// In-edges: `[]` for `Source`, `[input]` for `Sink`, `[left, right]`
    /// for `Add`/`Mul`. Every entry must index a node earlier in the arena.
    pub inputs: Vec<NodeIdx>,
}

impl<F: PrimeField> NodeSpec<F> {
    /// A free (non-constant) input wire.
    pub fn source() -> Self {
        Self { kind: NodeKind::Source, constant: None, inputs: Vec::new() }
    }

    /// A fixed-value input wire.
    pub fn constant(value: F) -> Self {
        Self { kind: NodeKind::Source, constant: Some(value), inputs: Vec::new() }
    }

    /// An output marker over `input`.
    pub fn sink(input: NodeIdx) -> Self {
        Self { kind: NodeKind::Sink, constant: None, inputs: vec![input] }
    }

    /// An addition gate.
    pub fn add(left: NodeIdx, right: NodeIdx) -> Self {
        Self { kind: NodeKind::Add, constant: None, inputs: vec![left, right] }
    }

    /// A multiplication gate.
    pub fn mul(left: NodeIdx, right: NodeIdx) -> Self {
        Self { kind: NodeKind::Mul, constant: None, inputs: vec![left, right] }
    }

    fn required_arity(&self) -> usize {
        match self.kind {
            NodeKind::Source => 0,
            NodeKind::Sink => 1,
            NodeKind::Add | NodeKind::Mul => 2,
        }
    }
}

/// Failure modes of circuit construction, labeling, and execution.
#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    /// A node's in-edge count didn't match what its kind requires.
    #[error("node {node}: expected {expected} input(s), got {got}")]
    ArityError { node: usize, expected: usize, got: usize },
    /// A non-constant `Source` was read during execution without a value
    /// having been supplied for it.
    #[error("node {node}: no value supplied for free input")]
    MissingInput { node: usize },
    /// An `Add`/`Mul` gate's two inputs were both constants, so the gate
    /// carries no signal and cannot be expressed as an R1CS constraint.
    #[error("node {node}: both gate inputs are constants")]
    ConstantOnBothSides { node: usize },
    /// An in-edge referenced a node at or after its own index, which would
    /// break the arena's topological-order invariant.
    #[error("node {node}: edge to {target} is not in strict topological order")]
    BadEdge { node: usize, target: usize },
}

#[derive(Debug)]
struct Node<F: PrimeField> {
    spec: NodeSpec<F>,
    out_label: Cell<Option<usize>>,
    value: Cell<Option<F>>,
}

/// An algebraic circuit: an arena of [`NodeSpec`]s plus the signal labeling
/// computed by [`Circuit::finalize`].
#[derive(Debug)]
pub struct Circuit<F: PrimeField> {
    nodes: Vec<Node<F>>,
    finalized: Cell<bool>,
    label_count: Cell<usize>,
    external: std::cell::RefCell<HashMap<usize, F>>,
}

impl<F: PrimeField> Circuit<F> {
    /// Build a circuit from an explicit node list. Validates arity and that
    /// every edge points strictly backwards (so the arena order is already
    /// topological); does not assign signal labels — call [`Self::finalize`]
    /// or [`Self::build_r1cs`] for that.
    pub fn build(specs: Vec<NodeSpec<F>>) -> Result<Self, CircuitError> {
        for (i, spec) in specs.iter().enumerate() {
            let expected = spec.required_arity();
            if spec.inputs.len() != expected {
                return Err(CircuitError::ArityError { node: i, expected, got: spec.inputs.len() });
            }
            for input in &spec.inputs {
                if input.0 >= i {
                    return Err(CircuitError::BadEdge { node: i, target: input.0 });
                }
            }
        }
        let nodes = specs
            .into_iter()
            .map(|spec| Node { spec, out_label: Cell::new(None), value: Cell::new(None) })
            .collect();
        Ok(Self {
            nodes,
            finalized: Cell::new(false),
            label_count: Cell::new(0),
            external: std::cell::RefCell::new(HashMap::new()),
        })
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` iff the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct R1CS signals allocated by [`Self::finalize`] (`0`
    /// before it has run).
    pub fn signal_count(&self) -> usize {
        self.label_count.get()
    }

    /// Assign every non-constant wire a signal label, in arena order (which
    /// is already topological). Idempotent: calling this more than once is a
    /// no-op. A gate whose two inputs are both constants has no signal to
    /// carry and is rejected with [`CircuitError::ConstantOnBothSides`].
    pub fn finalize(&self) -> Result<(), CircuitError> {
        if self.finalized.get() {
            return Ok(());
        }
        let mut next_label = 0usize;
        for (i, node) in self.nodes.iter().enumerate() {
            let label = match node.spec.kind {
                NodeKind::Source if node.spec.constant.is_none() => {
                    let l = next_label;
                    next_label += 1;
                    tracing::trace!(node = i, label = l, "circuit: allocated signal label");
                    Some(l)
                }
                NodeKind::Source | NodeKind::Sink => None,
                NodeKind::Add | NodeKind::Mul => {
                    let l_idx = node.spec.inputs[0].0;
                    let r_idx = node.spec.inputs[1].0;
                    let l_has = self.nodes[l_idx].out_label.get().is_some();
                    let r_has = self.nodes[r_idx].out_label.get().is_some();
                    if !l_has && !r_has {
                        return Err(CircuitError::ConstantOnBothSides { node: i });
                    }
                    let l = next_label;
                    next_label += 1;
                    tracing::trace!(node = i, label = l, "circuit: allocated signal label");
                    Some(l)
                }
            };
            node.out_label.set(label);
        }
        self.label_count.set(next_label);
        self.finalized.set(true);
        Ok(())
    }

    fn eval(&self, idx: NodeIdx) -> Result<F, CircuitError> {
        if let Some(v) = self.nodes[idx.0].value.get() {
            return Ok(v);
        }
        let node = &self.nodes[idx.0];
        let v = match node.spec.kind {
            NodeKind::Source => match node.spec.constant {
                Some(c) => c,
                None => *self
                    .external
                    .borrow()
                    .get(&idx.0)
                    .ok_or(CircuitError::MissingInput { node: idx.0 })?,
            },
            NodeKind::Sink => self.eval(node.spec.inputs[0])?,
            NodeKind::Add => self.eval(node.spec.inputs[0])? + self.eval(node.spec.inputs[1])?,
            NodeKind::Mul => self.eval(node.spec.inputs[0])? * self.eval(node.spec.inputs[1])?,
        };
        self.nodes[idx.0].value.set(Some(v));
        Ok(v)
    }

    /// Evaluate the circuit given values for every free `Source` wire
    /// (referenced by [`NodeIdx`]), and return the full signal vector
    /// `[w_1, ..., w_L]` indexed by signal label.
    pub fn execute(&self, inputs: &[(NodeIdx, F)]) -> Result<Vec<F>, CircuitError> {
        self.finalize()?;
        for node in &self.nodes {
            node.value.set(None);
        }
        *self.external.borrow_mut() = inputs.iter().map(|(i, v)| (i.0, *v)).collect();

        for (i, node) in self.nodes.iter().enumerate() {
            if matches!(node.spec.kind, NodeKind::Sink) {
                self.eval(NodeIdx(i))?;
            }
        }

        let mut witness = vec![F::zero(); self.label_count.get()];
        for i in 0..self.nodes.len() {
            if let Some(label) = self.nodes[i].out_label.get() {
                witness[label] = self.eval(NodeIdx(i))?;
            }
        }
        Ok(witness)
    }

    fn node_expression(&self, idx: NodeIdx, width: usize) -> Vec<F> {
        let node = &self.nodes[idx.0];
        match node.out_label.get() {
            Some(label) => {
                let mut v = vec![F::zero(); width];
                v[label + 1] = F::one();
                v
            }
            None => {
                let mut v = vec![F::zero(); width];
                v[0] = node.spec.constant.expect("unlabeled node must be a constant source");
                v
            }
        }
    }

    /// Lower the circuit into an R1CS system: one constraint per `Add`/`Mul`
    /// gate, over a shared `1 + L`-wide coefficient space.
    pub fn build_r1cs(&self) -> Result<R1csSystem<F>, CircuitError> {
        self.finalize()?;
        let width = 1 + self.label_count.get();
        let mut constraints = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            match node.spec.kind {
                NodeKind::Add => {
                    let l = self.node_expression(node.spec.inputs[0], width);
                    let r = self.node_expression(node.spec.inputs[1], width);
                    let sum: Vec<F> = l.iter().zip(r.iter()).map(|(a, b)| *a + b).collect();
                    let mut ones = vec![F::zero(); width];
                    ones[0] = F::one();
                    let c = self.node_expression(NodeIdx(i), width);
                    constraints.push(R1csConstraint::new(sum, ones, c));
                }
                NodeKind::Mul => {
                    let l = self.node_expression(node.spec.inputs[0], width);
                    let r = self.node_expression(node.spec.inputs[1], width);
                    let c = self.node_expression(NodeIdx(i), width);
                    constraints.push(R1csConstraint::new(l, r, c));
                }
                NodeKind::Source | NodeKind::Sink => {}
            }
        }
        Ok(R1csSystem::new(constraints))
    }
}
