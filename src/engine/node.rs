//! Arena node types for the ROBDD engine: [`NodeId`], [`VarIndex`], [`Node`].

/// Identity of a node in a [`Bdd`](super::manager::Bdd) arena.
///
/// `NodeId(0)` and `NodeId(1)` are reserved for the false/true terminals;
/// internal identifiers are assigned in creation order starting at 2.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const FALSE: NodeId = NodeId(0);
    pub const TRUE: NodeId = NodeId(1);

    pub fn is_terminal(self) -> bool {
        self.0 < 2
    }
}

/// Position of a variable in a decision's evaluation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarIndex(pub u32);

/// An internal BDD node: a triple `(variable, low, high)`.
///
/// Content-addressing (I2) lives in `Bdd::unique_table`, keyed directly on
/// `(VarIndex, NodeId, NodeId)` — `Node` itself is never hashed or compared,
/// so it carries no `Eq`/`Hash` impl of its own.
#[derive(Debug, Copy, Clone)]
pub struct Node {
    pub id: NodeId,
    pub var: VarIndex,
    pub low: NodeId,
    pub high: NodeId,
}
