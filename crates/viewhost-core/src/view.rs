//! The capability contract an anchor node requires from its nested views.
//!
//! Views are created by an external view factory and handed to an anchor
//! only for ordering and lifecycle bookkeeping. The anchor never constructs
//! or tears down view content itself; it arranges views and cascades
//! lifecycle calls into them through this trait.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::render::{RenderNode, Renderer};

/// Identity of the template a structural view was instantiated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(pub u64);

impl TemplateId {
    #[inline]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

static NEXT_ANCHOR_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an anchor node.
///
/// Views receive this as their content-parent key. It is a lookup key, never
/// an owning edge, so the view graph stays free of ownership cycles between
/// containing view, anchor, and nested views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(u64);

impl AnchorId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ANCHOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Discriminates the two nested-view flavours at the structural boundary.
///
/// Component-root views are pinned to the component instance that created
/// them; every structural operation rejects them. Only structural views can
/// be attached, moved, or detached through an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// A view stamped out of the template identified by the payload.
    Structural(TemplateId),
    /// The root view of a component instance.
    ComponentRoot,
}

impl ViewKind {
    pub fn template(self) -> Option<TemplateId> {
        match self {
            ViewKind::Structural(template) => Some(template),
            ViewKind::ComponentRoot => None,
        }
    }
}

/// Capabilities a view must expose to be hosted under an anchor node.
pub trait NestedView {
    fn kind(&self) -> ViewKind;

    /// Last node of this view's flattened output-node run, if it has any.
    /// Used as the insertion reference for the next sibling.
    fn last_output_node(&self) -> Option<RenderNode>;

    /// The view's full output-node run in physical order.
    fn flattened_output_nodes(&self) -> Vec<RenderNode>;

    /// Renderer responsible for this view's output nodes.
    fn renderer(&self) -> Rc<RefCell<dyn Renderer>>;

    /// Removes the view's output nodes from the physical tree.
    fn detach(&mut self);

    /// Tears the view down. Terminal; the view is never reused afterwards.
    fn destroy(&mut self);

    /// Runs the view's own change-detection pass. In strict mode the view
    /// must treat a detected-but-unexpected change as a hard failure instead
    /// of silently applying it; the anchor only forwards the flag.
    fn run_change_detection(&mut self, strict: bool);

    /// Visits the flattened output-node run in physical order.
    fn visit_output_nodes(&self, visitor: &mut dyn FnMut(RenderNode));

    /// Registers `anchor` as this view's content parent, enabling the view's
    /// own change-detection traversal to find it.
    fn mark_content_parent(&mut self, anchor: AnchorId);

    /// Clears the content-parent registration made by `mark_content_parent`.
    fn mark_removed_from_content_parent(&mut self, anchor: AnchorId);

    /// Flags the content-parent linkage as moved so the view can drop cached
    /// anchoring state.
    fn mark_moved(&mut self, anchor: AnchorId);
}

/// Shared handle under which nested views circulate between the view
/// factory, anchor nodes, and callers. Identity is `Rc` pointer identity.
pub type ViewHandle = Rc<RefCell<dyn NestedView>>;
