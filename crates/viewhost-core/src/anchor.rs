//! The anchor node: ordered bookkeeping for dynamically hosted views.
//!
//! An [`AnchorNode`] sits inside the view that created it and tracks the
//! ordered list of nested views attached beneath it. Logical sibling order
//! and the physical order of the views' output-node runs are kept equal
//! after every operation: attaching and moving compute the physical
//! insertion reference from the preceding sibling (or from the anchor's own
//! host node at index 0) and issue a single `insert_after` against the
//! view's renderer. All operations validate before mutating, so a returned
//! error leaves every structure untouched.

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::AnchorError;
use crate::injector::{ContainingView, InjectorScope};
use crate::render::RenderNode;
use crate::view::{AnchorId, TemplateId, ViewHandle, ViewKind};

struct HostedComponent {
    instance: Rc<dyn Any>,
    view: ViewHandle,
}

/// A tree node tied to a physical rendered element that can host nested
/// views.
///
/// Created once, alongside its containing view, and alive exactly as long
/// as that view. The containing view exclusively owns the anchor; the
/// anchor holds a non-owning back-reference only.
pub struct AnchorNode {
    id: AnchorId,
    position: usize,
    parent_position: usize,
    containing_view: Weak<dyn ContainingView>,
    host_node: Option<RenderNode>,
    // Allocated on first attach; render order == insertion order throughout.
    nested_views: Option<Vec<ViewHandle>>,
    hosted_component: Option<HostedComponent>,
}

impl AnchorNode {
    /// Creates the anchor for slot `position` of `containing_view`.
    /// `parent_position` is the slot used to resolve the enclosing injector
    /// scope. `host_node` may be absent for anchors without a physical host
    /// element; such anchors reorder views logically only.
    pub fn new(
        position: usize,
        parent_position: usize,
        containing_view: Weak<dyn ContainingView>,
        host_node: Option<RenderNode>,
    ) -> Self {
        Self {
            id: AnchorId::next(),
            position,
            parent_position,
            containing_view,
            host_node,
            nested_views: None,
            hosted_component: None,
        }
    }

    pub fn id(&self) -> AnchorId {
        self.id
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn parent_position(&self) -> usize {
        self.parent_position
    }

    /// Handle of the physical node this anchor is attached to, if any.
    pub fn host_node(&self) -> Option<RenderNode> {
        self.host_node
    }

    /// Number of currently attached nested views.
    pub fn len(&self) -> usize {
        self.nested_views.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the current sequence; empty when nothing was ever
    /// attached.
    pub fn nested_views(&self) -> &[ViewHandle] {
        self.nested_views.as_deref().unwrap_or(&[])
    }

    /// Records the component instance hosted at this anchor together with
    /// its root view. The pairing is a singleton; hosting a second component
    /// replaces the first. Hosted components live outside the nested-view
    /// sequence and are not affected by structural operations.
    pub fn init_component(&mut self, instance: Rc<dyn Any>, view: ViewHandle) {
        self.hosted_component = Some(HostedComponent { instance, view });
    }

    pub fn component(&self) -> Option<&Rc<dyn Any>> {
        self.hosted_component.as_ref().map(|hosted| &hosted.instance)
    }

    pub fn component_view(&self) -> Option<&ViewHandle> {
        self.hosted_component.as_ref().map(|hosted| &hosted.view)
    }

    fn containing_view(&self) -> Rc<dyn ContainingView> {
        self.containing_view
            .upgrade()
            .expect("containing view dropped before its anchor node")
    }

    /// Injector scope of this anchor's own position.
    pub fn injector_scope(&self) -> InjectorScope {
        self.containing_view().resolve_injector_at(self.position)
    }

    /// Injector scope one level up, at the anchor's parent position.
    pub fn parent_injector_scope(&self) -> InjectorScope {
        self.containing_view().resolve_injector_at(self.parent_position)
    }

    /// Inserts `view` at `index` in the sequence and splices its output-node
    /// run into the physical tree right after the preceding sibling's last
    /// output node, or after this anchor's host node at index 0.
    ///
    /// Accepts indices in `[0, len]`. Fails with
    /// [`AnchorError::ComponentViewNotMovable`] for component-root views and
    /// [`AnchorError::IndexOutOfRange`] for indices past the end.
    pub fn attach_view(&mut self, view: ViewHandle, index: usize) -> Result<(), AnchorError> {
        let len = self.len();
        if index > len {
            return Err(AnchorError::IndexOutOfRange { index, len });
        }
        if matches!(view.borrow().kind(), ViewKind::ComponentRoot) {
            return Err(AnchorError::ComponentViewNotMovable);
        }
        let views = self.nested_views.get_or_insert_with(Vec::new);
        views.insert(index, view.clone());
        self.splice_into_render_tree(&view, index);
        view.borrow_mut().mark_content_parent(self.id);
        log::trace!(
            "anchor {}: attached view at index {index} ({} nested)",
            self.id.raw(),
            self.len()
        );
        Ok(())
    }

    /// Removes the view at `index` from the sequence, detaches its output
    /// nodes from the physical tree, and returns the view to the caller.
    /// The anchor no longer tracks the returned view.
    pub fn detach_view(&mut self, index: usize) -> Result<ViewHandle, AnchorError> {
        let len = self.len();
        if index >= len {
            return Err(AnchorError::IndexOutOfRange { index, len });
        }
        if matches!(self.nested_views()[index].borrow().kind(), ViewKind::ComponentRoot) {
            return Err(AnchorError::ComponentViewNotMovable);
        }
        let views = self.nested_views.as_mut().expect("index validated against len");
        let view = views.remove(index);
        view.borrow_mut().detach();
        view.borrow_mut().mark_removed_from_content_parent(self.id);
        log::trace!(
            "anchor {}: detached view at index {index} ({} nested)",
            self.id.raw(),
            self.len()
        );
        Ok(view)
    }

    /// Relocates an attached view to `new_index`, expressed as remove plus
    /// re-insert so the physical reference is recomputed exactly the way
    /// [`attach_view`](Self::attach_view) computes it. When no reference
    /// node is computable the reorder is logical only.
    ///
    /// Fails with [`AnchorError::ViewNotAttached`] when this anchor does not
    /// track `view`, and otherwise with the same precondition errors as
    /// attach. `new_index` must be a position present in the sequence.
    pub fn move_view(&mut self, view: &ViewHandle, new_index: usize) -> Result<(), AnchorError> {
        let len = self.len();
        let current = self
            .nested_views()
            .iter()
            .position(|candidate| Rc::ptr_eq(candidate, view))
            .ok_or(AnchorError::ViewNotAttached)?;
        if matches!(view.borrow().kind(), ViewKind::ComponentRoot) {
            return Err(AnchorError::ComponentViewNotMovable);
        }
        if new_index >= len {
            return Err(AnchorError::IndexOutOfRange { index: new_index, len });
        }
        let views = self.nested_views.as_mut().expect("view located in sequence");
        let moved = views.remove(current);
        views.insert(new_index, moved);
        self.splice_into_render_tree(view, new_index);
        view.borrow_mut().mark_moved(self.id);
        log::trace!(
            "anchor {}: moved view from index {current} to {new_index}",
            self.id.raw()
        );
        Ok(())
    }

    // Physical reference for the view now sitting at `index`: the preceding
    // sibling's last output node, or the host node at index 0. The renderer
    // call is skipped when neither exists.
    fn splice_into_render_tree(&self, view: &ViewHandle, index: usize) {
        let reference = if index > 0 {
            self.nested_views()[index - 1].borrow().last_output_node()
        } else {
            self.host_node
        };
        if let Some(reference) = reference {
            let nodes = view.borrow().flattened_output_nodes();
            let renderer = view.borrow().renderer();
            renderer.borrow_mut().insert_after(reference, &nodes);
        }
    }

    /// Runs each nested view's change-detection pass in sequence order,
    /// forwarding the strict flag unchanged.
    pub fn run_change_detection_in_nested_views(&self, strict: bool) {
        if let Some(views) = &self.nested_views {
            for view in views {
                view.borrow_mut().run_change_detection(strict);
            }
        }
    }

    /// Tears down every nested view in sequence order. The sequence itself
    /// is left in place: destruction is terminal for the anchor together
    /// with its containing view.
    pub fn destroy_nested_views(&self) {
        if let Some(views) = &self.nested_views {
            for view in views {
                view.borrow_mut().destroy();
            }
        }
    }

    /// Visits the flattened output-node run of every nested view, preserving
    /// sequence order, without exposing internal storage.
    pub fn visit_nested_view_root_nodes(&self, visitor: &mut dyn FnMut(RenderNode)) {
        if let Some(views) = &self.nested_views {
            for view in views {
                view.borrow().visit_output_nodes(visitor);
            }
        }
    }

    /// Ordered transform results for the nested views instantiated from
    /// `template`.
    pub fn map_nested_views<R>(
        &self,
        template: TemplateId,
        mut f: impl FnMut(&ViewHandle) -> R,
    ) -> Vec<R> {
        let mut result = Vec::new();
        if let Some(views) = &self.nested_views {
            for view in views {
                if view.borrow().kind().template() == Some(template) {
                    result.push(f(view));
                }
            }
        }
        result
    }
}

impl fmt::Debug for AnchorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorNode")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("parent_position", &self.parent_position)
            .field("host_node", &self.host_node)
            .field("nested_views", &self.len())
            .field("has_component", &self.hosted_component.is_some())
            .finish()
    }
}

