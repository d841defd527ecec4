//! Physical-node handles and the rendering collaborator contract.

/// Opaque handle over one physical rendered node.
///
/// Anchor bookkeeping never inspects the node behind a handle; handles are
/// only compared and forwarded to the [`Renderer`] as insertion references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderNode(pub u64);

impl RenderNode {
    #[inline]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Mutates the physical render tree on behalf of an anchor node.
///
/// Each attach or move issues at most one `insert_after` call. When no
/// reference node is computable the anchor skips the call entirely, so
/// implementations never see an absent reference.
pub trait Renderer {
    /// Inserts `nodes` immediately after `reference`, preserving their
    /// relative order. Nodes already present elsewhere in the tree are
    /// relocated, not duplicated.
    fn insert_after(&mut self, reference: RenderNode, nodes: &[RenderNode]);
}
