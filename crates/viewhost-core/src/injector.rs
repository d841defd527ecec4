//! Per-position injector scoping.
//!
//! An anchor node stores no injector state of its own. Both scope accessors
//! are derived lookups against the containing view's per-position table,
//! which lets the containing view rebuild or relocate scopes without the
//! anchor's identity changing.

/// Opaque handle over a position-indexed dependency-resolution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InjectorScope(pub u64);

impl InjectorScope {
    #[inline]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// The view that created an anchor node and exclusively owns it.
pub trait ContainingView {
    /// Resolves the injector scope registered for `position` in this view's
    /// slot table. What a never-registered position resolves to is this
    /// collaborator's own contract; the anchor forwards whatever it returns.
    fn resolve_injector_at(&self, position: usize) -> InjectorScope;
}
