#![doc = r"Anchor-node bookkeeping for dynamically hosted views.

An anchor node is the point in a rendered component tree where views can be
attached, moved, and detached at runtime-determined indices. The crate keeps
three structures consistent across every operation: the logical sibling order
of the nested views, the physical order of their rendered output nodes, and
the per-position injector scoping resolved through the containing view."]

pub mod anchor;
pub mod error;
pub mod injector;
pub mod render;
pub mod view;

pub use anchor::AnchorNode;
pub use error::AnchorError;
pub use injector::{ContainingView, InjectorScope};
pub use render::{RenderNode, Renderer};
pub use view::{AnchorId, NestedView, TemplateId, ViewHandle, ViewKind};
