//! Scripted collaborators for anchor-node tests.
//!
//! [`RecordingRenderer`] keeps a flat model of the physical tree so tests
//! can assert that logical sibling order and physical node order stay equal
//! after every structural operation. [`ScriptedView`] is a nested view with
//! a fixed output-node run that logs every lifecycle call it receives,
//! stamped with a process-wide sequence number so tests can compare call
//! order across views.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use viewhost_core::{
    AnchorId, ContainingView, InjectorScope, NestedView, RenderNode, Renderer, TemplateId,
    ViewKind,
};

/// One recorded `insert_after` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertAfter {
    pub reference: RenderNode,
    pub nodes: Vec<RenderNode>,
}

/// Renderer double that logs every call and maintains a flat model of the
/// physical tree.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<InsertAfter>,
    physical: Vec<RenderNode>,
}

impl RecordingRenderer {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Seeds the physical model with pre-existing nodes (host elements).
    pub fn with_nodes(nodes: &[RenderNode]) -> Rc<RefCell<Self>> {
        let renderer = Self::new();
        renderer.borrow_mut().physical.extend_from_slice(nodes);
        renderer
    }

    /// Every `insert_after` call received, in order.
    pub fn calls(&self) -> &[InsertAfter] {
        &self.calls
    }

    /// Current physical order of all known nodes.
    pub fn physical_order(&self) -> &[RenderNode] {
        &self.physical
    }

    /// Tears nodes out of the physical model; the view-detach path.
    pub fn remove_nodes(&mut self, nodes: &[RenderNode]) {
        self.physical.retain(|node| !nodes.contains(node));
    }
}

impl Renderer for RecordingRenderer {
    fn insert_after(&mut self, reference: RenderNode, nodes: &[RenderNode]) {
        self.calls.push(InsertAfter {
            reference,
            nodes: nodes.to_vec(),
        });
        // Relocation semantics: a move re-inserts nodes already present.
        self.physical.retain(|node| !nodes.contains(node));
        let at = self
            .physical
            .iter()
            .position(|node| *node == reference)
            .map_or(self.physical.len(), |index| index + 1);
        for (offset, node) in nodes.iter().enumerate() {
            self.physical.insert(at + offset, *node);
        }
    }
}

/// Lifecycle call observed by a [`ScriptedView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Detached,
    Destroyed,
    ChangeDetection { strict: bool },
    ContentParentSet(AnchorId),
    ContentParentCleared(AnchorId),
    Moved(AnchorId),
}

/// A [`ViewEvent`] stamped with a process-wide sequence number, so tests can
/// compare call order across views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub seq: u64,
    pub event: ViewEvent,
}

static NEXT_EVENT_SEQ: AtomicU64 = AtomicU64::new(1);

fn next_seq() -> u64 {
    NEXT_EVENT_SEQ.fetch_add(1, Ordering::Relaxed)
}

/// Nested-view double with a fixed output-node run and a recorded event log.
pub struct ScriptedView {
    kind: ViewKind,
    nodes: Vec<RenderNode>,
    renderer: Rc<RefCell<RecordingRenderer>>,
    events: Vec<Recorded>,
}

impl ScriptedView {
    /// A structural view instantiated from `template`, producing `nodes` as
    /// its output-node run.
    pub fn structural(
        template: TemplateId,
        nodes: Vec<RenderNode>,
        renderer: Rc<RefCell<RecordingRenderer>>,
    ) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            kind: ViewKind::Structural(template),
            nodes,
            renderer,
            events: Vec::new(),
        }))
    }

    /// The root view of a component instance.
    pub fn component_root(
        nodes: Vec<RenderNode>,
        renderer: Rc<RefCell<RecordingRenderer>>,
    ) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            kind: ViewKind::ComponentRoot,
            nodes,
            renderer,
            events: Vec::new(),
        }))
    }

    /// Every lifecycle call received, in order.
    pub fn events(&self) -> &[Recorded] {
        &self.events
    }

    fn record(&mut self, event: ViewEvent) {
        self.events.push(Recorded {
            seq: next_seq(),
            event,
        });
    }
}

impl NestedView for ScriptedView {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn last_output_node(&self) -> Option<RenderNode> {
        self.nodes.last().copied()
    }

    fn flattened_output_nodes(&self) -> Vec<RenderNode> {
        self.nodes.clone()
    }

    fn renderer(&self) -> Rc<RefCell<dyn Renderer>> {
        self.renderer.clone()
    }

    fn detach(&mut self) {
        self.renderer.borrow_mut().remove_nodes(&self.nodes);
        self.record(ViewEvent::Detached);
    }

    fn destroy(&mut self) {
        self.record(ViewEvent::Destroyed);
    }

    fn run_change_detection(&mut self, strict: bool) {
        self.record(ViewEvent::ChangeDetection { strict });
    }

    fn visit_output_nodes(&self, visitor: &mut dyn FnMut(RenderNode)) {
        for node in &self.nodes {
            visitor(*node);
        }
    }

    fn mark_content_parent(&mut self, anchor: AnchorId) {
        self.record(ViewEvent::ContentParentSet(anchor));
    }

    fn mark_removed_from_content_parent(&mut self, anchor: AnchorId) {
        self.record(ViewEvent::ContentParentCleared(anchor));
    }

    fn mark_moved(&mut self, anchor: AnchorId) {
        self.record(ViewEvent::Moved(anchor));
    }
}

/// Containing-view double backed by a fixed position -> scope table.
#[derive(Debug, Default)]
pub struct StaticContainingView {
    scopes: HashMap<usize, InjectorScope>,
}

impl StaticContainingView {
    pub fn with_scopes(scopes: &[(usize, InjectorScope)]) -> Rc<Self> {
        Rc::new(Self {
            scopes: scopes.iter().copied().collect(),
        })
    }
}

impl ContainingView for StaticContainingView {
    fn resolve_injector_at(&self, position: usize) -> InjectorScope {
        // Unregistered positions resolve to the zero scope here; real
        // containing views define their own contract for that case.
        self.scopes
            .get(&position)
            .copied()
            .unwrap_or(InjectorScope::new(0))
    }
}
