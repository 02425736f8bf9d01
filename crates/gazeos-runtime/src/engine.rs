//! [`NavigationEngine`] – the depth-path state machine.
//!
//! The engine's state *is* its depth path: the child indices chosen from the
//! root of the layout down to the currently open node.  Every interpreted
//! gaze event is a `(section, optional action)` pair:
//!
//! | Action | Effect on the path | Outward effect |
//! |---|---|---|
//! | none | – | focus redraw |
//! | `Select` on a branch | push `section` | section count refresh |
//! | `Select` on a tagged leaf | clear | command executed |
//! | `Select` on an untagged leaf | – | – |
//! | `Deselect` | pop (no-op at root) | section count refresh |
//! | `Pop` | – | go-back request to the host |
//!
//! Select, deselect and pop always end with a focus redraw that reflects
//! the path *after* the transition.
//!
//! The live section count is written into a shared
//! [`SectionCounter`] so the gaze interpreter uses the right band height on
//! the very next reading.

use gazeos_kernel::CommandBus;
use gazeos_layout::FocusView;
use gazeos_middleware::EventBus;
use gazeos_types::{EyeAction, NavEvent, NavPayload, SectionCounter};
use tracing::{debug, info, trace};

use crate::host::NavigationHost;

const SOURCE: &str = "gazeos-runtime::engine";

// ─────────────────────────────────────────────────────────────────────────────
// NavigationContext
// ─────────────────────────────────────────────────────────────────────────────

/// Follow-up navigation a command handler asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextRequest {
    GoBack,
    Open(Vec<usize>),
}

/// Handle passed to command handlers.
///
/// Carries a snapshot of the navigation state and collects follow-up
/// requests, which the engine applies once the handler returns.
#[derive(Debug, Clone)]
pub struct NavigationContext {
    depth_path: Vec<usize>,
    section_count: usize,
    event_id: String,
    requests: Vec<ContextRequest>,
}

impl NavigationContext {
    fn new(depth_path: Vec<usize>, section_count: usize, event_id: &str) -> Self {
        Self {
            depth_path,
            section_count,
            event_id: event_id.to_string(),
            requests: Vec::new(),
        }
    }

    /// Depth path at the time the command fired (already cleared to the
    /// root for leaf commands).
    pub fn depth_path(&self) -> &[usize] {
        &self.depth_path
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Identifier of the command being executed.
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Ask the host to go back to the previous screen.
    pub fn request_go_back(&mut self) {
        self.requests.push(ContextRequest::GoBack);
    }

    /// Open `path` once the handler returns.  The engine stops at the
    /// first index that is out of range or names a leaf.
    pub fn open(&mut self, path: Vec<usize>) {
        self.requests.push(ContextRequest::Open(path));
    }

    pub fn requests(&self) -> &[ContextRequest] {
        &self.requests
    }
}

/// Registry type used by the engine.
pub type Commands = CommandBus<NavigationContext>;

// ─────────────────────────────────────────────────────────────────────────────
// NavigationEngine
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the depth path and turns interpreted gaze events into navigation.
pub struct NavigationEngine<V> {
    view: V,
    host: Box<dyn NavigationHost>,
    commands: Commands,
    path: Vec<usize>,
    sections: SectionCounter,
    events: Option<EventBus>,
}

impl<V: FocusView> NavigationEngine<V> {
    /// Create an engine at the root of `view`'s layout.
    pub fn new(view: V, host: impl NavigationHost + 'static) -> Self {
        let sections = SectionCounter::new(view.section_count(&[]));
        Self {
            view,
            host: Box::new(host),
            commands: Commands::new(),
            path: Vec::new(),
            sections,
            events: None,
        }
    }

    /// Also publish focus moves and fired commands on `bus`.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn depth_path(&self) -> &[usize] {
        &self.path
    }

    pub fn section_count(&self) -> usize {
        self.sections.get()
    }

    /// Shared handle to the live section count, for the gaze interpreter.
    pub fn section_counter(&self) -> SectionCounter {
        self.sections.clone()
    }

    pub fn commands(&self) -> &Commands {
        &self.commands
    }

    /// Registry stays mutable for the engine's whole life.
    pub fn commands_mut(&mut self) -> &mut Commands {
        &mut self.commands
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Return to the root: clear the path and recompute the section count.
    pub fn reset(&mut self) {
        self.path.clear();
        self.refresh_section_count();
    }

    /// Plain gaze movement: move focus, leave the path alone.
    pub fn on_movement(&mut self, section: usize) {
        self.redraw(section);
    }

    /// Apply a discrete action at `section`, then redraw focus.
    pub fn on_action(&mut self, action: EyeAction, section: usize) {
        match action {
            EyeAction::Select => self.select(section),
            EyeAction::Deselect => self.deselect(),
            EyeAction::Pop => {
                debug!(section, "go-back requested");
                self.host.request_go_back();
            }
        }
        self.redraw(section);
    }

    /// Dispatch one interpreted event.
    pub fn handle(&mut self, section: usize, action: Option<EyeAction>) {
        match action {
            Some(action) => self.on_action(action, section),
            None => self.on_movement(section),
        }
    }

    fn select(&mut self, section: usize) {
        // Terminal check uses the path before any mutation.
        if !self.view.is_terminal(&self.path, section) {
            self.path.push(section);
            self.refresh_section_count();
            debug!(section, depth = self.path.len(), "descended");
            return;
        }

        let Some(event_id) = self.view.event_id(&self.path, section) else {
            trace!(section, path = ?self.path, "terminal section has no event");
            return;
        };

        self.path.clear();
        self.refresh_section_count();
        self.fire(&event_id);
    }

    fn deselect(&mut self) {
        if self.path.pop().is_some() {
            self.refresh_section_count();
            debug!(depth = self.path.len(), "ascended");
        }
    }

    fn fire(&mut self, event_id: &str) {
        let mut ctx = NavigationContext::new(self.path.clone(), self.sections.get(), event_id);
        if !self.commands.execute(event_id, &mut ctx) {
            debug!(event_id, "no command registered for event");
            return;
        }
        info!(event_id, "command executed");
        self.publish(NavPayload::CommandFired {
            event_id: event_id.to_string(),
        });

        for request in ctx.requests {
            match request {
                ContextRequest::GoBack => self.host.request_go_back(),
                ContextRequest::Open(path) => self.open(path),
            }
        }
    }

    /// Move to the longest prefix of `requested` that names only branches,
    /// so every step of the path stays a valid child index.
    fn open(&mut self, requested: Vec<usize>) {
        let mut path = Vec::with_capacity(requested.len());
        for &section in &requested {
            if self.view.is_terminal(&path, section) {
                break;
            }
            path.push(section);
        }
        if path.len() < requested.len() {
            debug!(?requested, opened = ?path, "open request truncated");
        }
        self.path = path;
        self.refresh_section_count();
    }

    fn refresh_section_count(&mut self) {
        self.sections.set(self.view.section_count(&self.path));
    }

    fn redraw(&mut self, section: usize) {
        self.view.clear_borders();
        let depth = self.view.draw_border(section, &self.path);
        trace!(section, depth, path = ?self.path, "focus redrawn");
        self.publish(NavPayload::FocusMoved {
            section,
            path: self.path.clone(),
            depth,
        });
    }

    fn publish(&self, payload: NavPayload) {
        if let Some(bus) = &self.events
            && let Err(e) = bus.publish(NavEvent::new(SOURCE, payload))
        {
            trace!(error = %e, "navigation event not delivered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gazeos_layout::{BorderSet, RegionTree, RegionTreeBuilder, RegionTreeView};

    // ------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------

    #[derive(Clone, Default)]
    struct GoBackCounter(Arc<AtomicUsize>);

    impl GoBackCounter {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl NavigationHost for GoBackCounter {
        fn request_go_back(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    type Engine = NavigationEngine<RegionTreeView<BorderSet>>;

    fn engine_for(tree: RegionTree) -> (Engine, GoBackCounter) {
        let host = GoBackCounter::default();
        let view = RegionTreeView::new(Arc::new(tree), BorderSet::new());
        (NavigationEngine::new(view, host.clone()), host)
    }

    /// Two top-level sections with three children each.
    fn two_by_three() -> RegionTree {
        RegionTreeBuilder::new()
            .add_section(|s| s.add_leaf().add_leaf_with_event("a2").add_leaf())
            .add_section(|s| s.add_leaf().add_leaf().add_leaf())
            .build()
    }

    /// Section 0 is a branch, section 1 a leaf tagged "checkout".
    fn checkout_tree() -> RegionTree {
        RegionTreeBuilder::new()
            .add_section(|s| s.add_leaf().add_leaf())
            .add_leaf_with_event("checkout")
            .build()
    }

    fn focused_path(engine: &Engine) -> Vec<Vec<usize>> {
        let view = engine.view();
        view.renderer()
            .bordered()
            .filter_map(|id| view.tree().path_to(id))
            .collect()
    }

    fn counting_handler(hits: &Arc<AtomicUsize>) -> impl Fn(&mut NavigationContext) + Send + Sync + 'static {
        let hits = hits.clone();
        move |_ctx: &mut NavigationContext| {
            hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    // ------------------------------------------------------------------
    // Initial state
    // ------------------------------------------------------------------

    #[test]
    fn starts_at_root_with_root_count() {
        let (engine, _) = engine_for(two_by_three());
        assert!(engine.depth_path().is_empty());
        assert_eq!(engine.section_count(), 2);
    }

    #[test]
    fn empty_tree_starts_with_one_section() {
        let (engine, _) = engine_for(RegionTree::empty());
        assert_eq!(engine.section_count(), 1);
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    #[test]
    fn movement_redraws_without_touching_path() {
        let (mut engine, _) = engine_for(two_by_three());
        engine.on_movement(1);
        assert!(engine.depth_path().is_empty());
        assert_eq!(focused_path(&engine), vec![vec![1]]);

        engine.on_movement(0);
        assert_eq!(focused_path(&engine), vec![vec![0]], "previous border cleared");
    }

    // ------------------------------------------------------------------
    // Select
    // ------------------------------------------------------------------

    #[test]
    fn select_branch_descends_and_updates_count() {
        let (mut engine, _) = engine_for(two_by_three());
        let counter = engine.section_counter();
        engine.on_action(EyeAction::Select, 0);
        assert_eq!(engine.depth_path(), &[0]);
        assert_eq!(engine.section_count(), 3);
        assert_eq!(counter.get(), 3);
        // Redraw uses the post-transition path.
        assert_eq!(focused_path(&engine), vec![vec![0, 0]]);
    }

    #[test]
    fn select_tagged_leaf_fires_once_and_clears_path() {
        let (mut engine, _) = engine_for(checkout_tree());
        let hits = Arc::new(AtomicUsize::new(0));
        engine.commands_mut().register("checkout", counting_handler(&hits));

        engine.on_action(EyeAction::Select, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(engine.depth_path().is_empty());
        assert_eq!(engine.section_count(), 2);
    }

    #[test]
    fn select_nested_tagged_leaf_returns_to_root() {
        let (mut engine, _) = engine_for(two_by_three());
        let hits = Arc::new(AtomicUsize::new(0));
        engine.commands_mut().register("a2", counting_handler(&hits));

        engine.on_action(EyeAction::Select, 0);
        engine.on_action(EyeAction::Select, 1);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(engine.depth_path().is_empty());
        assert_eq!(engine.section_count(), 2);
        assert_eq!(focused_path(&engine), vec![vec![1]]);
    }

    #[test]
    fn select_untagged_leaf_changes_nothing() {
        let (mut engine, _) = engine_for(two_by_three());
        let hits = Arc::new(AtomicUsize::new(0));
        engine.commands_mut().register("a2", counting_handler(&hits));

        engine.on_action(EyeAction::Select, 1);
        engine.on_action(EyeAction::Select, 0);
        assert_eq!(engine.depth_path(), &[1]);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(focused_path(&engine), vec![vec![1, 0]]);
    }

    #[test]
    fn select_unregistered_event_still_clears_path() {
        let (mut engine, _) = engine_for(two_by_three());
        engine.on_action(EyeAction::Select, 0);
        engine.on_action(EyeAction::Select, 1);
        assert!(engine.depth_path().is_empty());
    }

    #[test]
    fn select_out_of_range_section_is_harmless() {
        let (mut engine, _) = engine_for(two_by_three());
        engine.on_action(EyeAction::Select, 7);
        assert!(engine.depth_path().is_empty());
        assert_eq!(engine.section_count(), 2);
    }

    // ------------------------------------------------------------------
    // Deselect
    // ------------------------------------------------------------------

    #[test]
    fn deselect_pops_back_to_top_level_count() {
        let (mut engine, _) = engine_for(checkout_tree());
        engine.on_action(EyeAction::Select, 0);
        assert_eq!(engine.depth_path(), &[0]);

        engine.on_action(EyeAction::Deselect, 0);
        assert!(engine.depth_path().is_empty());
        assert_eq!(engine.section_count(), 2);
    }

    #[test]
    fn descend_then_deselect_round_trips() {
        let tree = RegionTreeBuilder::new()
            .add_section(|s| s.add_section(|t| t.add_leaf().add_leaf().add_leaf().add_leaf()).add_leaf())
            .add_leaf()
            .build();
        let (mut engine, _) = engine_for(tree);
        engine.on_action(EyeAction::Select, 0);
        let before_path = engine.depth_path().to_vec();
        let before_count = engine.section_count();

        engine.on_action(EyeAction::Select, 0);
        assert_eq!(engine.section_count(), 4);
        engine.on_action(EyeAction::Deselect, 0);

        assert_eq!(engine.depth_path(), before_path.as_slice());
        assert_eq!(engine.section_count(), before_count);
    }

    #[test]
    fn deselect_at_root_only_redraws() {
        let (mut engine, _) = engine_for(two_by_three());
        engine.on_action(EyeAction::Deselect, 1);
        assert!(engine.depth_path().is_empty());
        assert_eq!(focused_path(&engine), vec![vec![1]]);
    }

    // ------------------------------------------------------------------
    // Pop
    // ------------------------------------------------------------------

    #[test]
    fn pop_requests_go_back_and_keeps_path() {
        let (mut engine, host) = engine_for(two_by_three());
        engine.on_action(EyeAction::Select, 1);
        engine.on_action(EyeAction::Pop, 2);
        assert_eq!(host.count(), 1);
        assert_eq!(engine.depth_path(), &[1]);
        assert_eq!(focused_path(&engine), vec![vec![1, 2]]);
    }

    // ------------------------------------------------------------------
    // Command context
    // ------------------------------------------------------------------

    #[test]
    fn handler_sees_cleared_path_and_can_request_navigation() {
        let (mut engine, host) = engine_for(checkout_tree());
        engine
            .commands_mut()
            .register("checkout", |ctx: &mut NavigationContext| {
                assert!(ctx.depth_path().is_empty());
                assert_eq!(ctx.event_id(), "checkout");
                ctx.request_go_back();
                ctx.open(vec![0]);
            });

        engine.on_action(EyeAction::Select, 1);
        assert_eq!(host.count(), 1);
        assert_eq!(engine.depth_path(), &[0]);
        assert_eq!(engine.section_count(), 2);
    }

    #[test]
    fn open_with_unknown_indices_stays_at_root() {
        let (mut engine, _) = engine_for(checkout_tree());
        engine
            .commands_mut()
            .register("checkout", |ctx: &mut NavigationContext| ctx.open(vec![9, 4]));

        engine.on_action(EyeAction::Select, 1);
        assert!(engine.depth_path().is_empty());
        assert_eq!(engine.section_count(), 2);
    }

    #[test]
    fn open_stops_before_a_leaf() {
        let (mut engine, _) = engine_for(two_by_three());
        engine
            .commands_mut()
            .register("a2", |ctx: &mut NavigationContext| ctx.open(vec![1, 2, 0]));

        engine.on_action(EyeAction::Select, 0);
        engine.on_action(EyeAction::Select, 1);
        assert_eq!(engine.depth_path(), &[1]);
        assert_eq!(engine.section_count(), 3);

        // One deselect is enough to get back to the root.
        engine.on_action(EyeAction::Deselect, 0);
        assert!(engine.depth_path().is_empty());
    }

    #[test]
    fn open_onto_a_leaf_keeps_user_on_its_parent() {
        let (mut engine, _) = engine_for(checkout_tree());
        engine
            .commands_mut()
            .register("checkout", |ctx: &mut NavigationContext| ctx.open(vec![1]));

        engine.on_action(EyeAction::Select, 1);
        assert!(engine.depth_path().is_empty());
    }

    #[test]
    fn unregister_then_select_is_noop() {
        let (mut engine, _) = engine_for(checkout_tree());
        let hits = Arc::new(AtomicUsize::new(0));
        engine.commands_mut().register("checkout", counting_handler(&hits));
        engine.commands_mut().unregister("checkout");

        engine.on_action(EyeAction::Select, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn publishes_focus_and_command_events() {
        let bus = EventBus::default();
        let mut nav = bus.subscribe_to(gazeos_middleware::Topic::Navigation);
        let mut focus = bus.subscribe_to(gazeos_middleware::Topic::Focus);

        let (engine, _) = engine_for(checkout_tree());
        let mut engine = engine.with_event_bus(bus);
        engine.commands_mut().register("checkout", |_: &mut NavigationContext| {});

        engine.on_action(EyeAction::Select, 1);

        let fired = nav.recv().await.unwrap();
        assert_eq!(
            fired.payload,
            NavPayload::CommandFired {
                event_id: "checkout".to_string()
            }
        );
        let moved = focus.recv().await.unwrap();
        assert_eq!(
            moved.payload,
            NavPayload::FocusMoved {
                section: 1,
                path: vec![],
                depth: 0
            }
        );
    }

    #[test]
    fn reset_returns_to_root() {
        let (mut engine, _) = engine_for(two_by_three());
        engine.on_action(EyeAction::Select, 0);
        engine.reset();
        assert!(engine.depth_path().is_empty());
        assert_eq!(engine.section_count(), 2);
    }
}
