//! Wiring of the interactive host: one tracking session driven from the
//! keyboard instead of a camera.
//!
//! The shell owns the producer side of the hand-off queue.  A
//! [`SessionDriver`] task consumes it on the Tokio runtime, and a printer
//! task renders whatever the runtime publishes on the event bus.

use std::sync::Arc;

use colored::Colorize;
use gazeos_hal::{GazeReading, SensorInfo};
use gazeos_layout::{BorderSet, NodeId, RegionTree, RegionTreeView};
use gazeos_middleware::{EventBus, HandoffSender, Topic, TopicReceiver, handoff};
use gazeos_runtime::{
    BusNavigationHost, Commands, GazeAdapter, NavigationContext, NavigationEngine,
    NavigationSnapshot, SessionDriver, SessionMessage, ThrottledHost, TrackingSession,
};
use gazeos_types::{NavError, NavEvent, NavPayload, Point};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::Config;

type ShellView = RegionTreeView<BorderSet>;

/// Layout event that asks the host to go back instead of doing shop work.
const BACK_EVENT: &str = "back";

pub struct Shell {
    runtime: Handle,
    tx: HandoffSender<SessionMessage>,
    driver: JoinHandle<TrackingSession<ShellView>>,
    printer: JoinHandle<()>,
    tree: Arc<RegionTree>,
    blink_frames: usize,
}

impl Shell {
    /// Build the session from `cfg` and spawn its tasks on `runtime`.
    ///
    /// # Errors
    ///
    /// [`NavError::Layout`] when the configured layout is invalid.
    pub fn launch(cfg: &Config, runtime: Handle) -> Result<Self, NavError> {
        let tree = Arc::new(cfg.layout.build()?);
        let bus = EventBus::default();

        let host = ThrottledHost::new(BusNavigationHost::new(bus.clone()), cfg.go_back_window());
        let view = RegionTreeView::new(tree.clone(), BorderSet::new());
        let mut engine = NavigationEngine::new(view, host).with_event_bus(bus.clone());
        register_layout_commands(engine.commands_mut(), &tree);

        let tracker = cfg.tracker();
        let adapter = GazeAdapter::new(tracker.screen, engine);
        let session = TrackingSession::new(tracker, adapter).with_event_bus(bus.clone());

        let printer = runtime.spawn(print_events(
            bus.subscribe_to(Topic::Navigation),
            bus.subscribe_to(Topic::Focus),
            bus.subscribe_to(Topic::Session),
        ));
        let (tx, rx) = handoff();
        let driver = runtime.spawn(SessionDriver::new(session, rx).run());

        Ok(Self {
            runtime,
            tx,
            driver,
            printer,
            tree,
            blink_frames: cfg.blink_frames,
        })
    }

    /// Producer handle, e.g. for the Ctrl-C handler.
    pub fn sender(&self) -> HandoffSender<SessionMessage> {
        self.tx.clone()
    }

    pub fn tree(&self) -> &RegionTree {
        &self.tree
    }

    pub fn start(&self) -> Result<(), NavError> {
        self.tx.send(SessionMessage::Start(keyboard_sensor()))
    }

    pub fn end(&self) -> Result<(), NavError> {
        self.tx.send(SessionMessage::End)
    }

    /// One open-eye reading at `point`.
    pub fn look(&self, point: Point) -> Result<(), NavError> {
        self.tx.send(SessionMessage::Reading(GazeReading::look(point.x, point.y)))
    }

    /// Enough closed-eye readings at `point` to complete one blink gesture.
    pub fn blink(&self, point: Point) -> Result<(), NavError> {
        for _ in 0..=self.blink_frames {
            self.tx
                .send(SessionMessage::Reading(GazeReading::blink(point.x, point.y)))?;
        }
        Ok(())
    }

    /// Ask the driver for its state.  Also serves as a barrier: every
    /// message sent before it has been processed when it returns.
    pub fn snapshot(&self) -> Result<NavigationSnapshot, NavError> {
        let (reply, answer) = oneshot::channel();
        self.tx.send(SessionMessage::Inspect(reply))?;
        self.runtime
            .block_on(answer)
            .map_err(|_| NavError::Channel("session driver stopped".to_string()))
    }

    /// Close the queue, wait for the driver to end the session and stop
    /// printing.
    pub fn shutdown(self) {
        let Self {
            runtime,
            tx,
            driver,
            printer,
            ..
        } = self;
        drop(tx);
        if let Err(e) = runtime.block_on(driver) {
            debug!(error = %e, "session driver did not finish cleanly");
        }
        printer.abort();
    }
}

fn keyboard_sensor() -> SensorInfo {
    SensorInfo {
        id: "keyboard".to_string(),
        model: "gazeos-cli".to_string(),
        supported: true,
    }
}

/// Register a handler for every event id found in `tree`.
pub(crate) fn register_layout_commands(commands: &mut Commands, tree: &RegionTree) {
    let events: Vec<String> = tree
        .node_ids()
        .filter_map(|id| tree.node(id)?.event().map(str::to_string))
        .collect();
    for event in events {
        if event == BACK_EVENT {
            commands.register(event, |ctx: &mut NavigationContext| ctx.request_go_back());
        } else {
            commands.register(event, |ctx: &mut NavigationContext| {
                debug!(event_id = ctx.event_id(), "layout command handled");
            });
        }
    }
}

/// Indented outline of `tree`, one line per section.
pub(crate) fn render_tree(tree: &RegionTree) -> String {
    let mut out = String::new();
    render_level(tree, tree.root(), &mut Vec::new(), &mut out);
    out
}

fn render_level(tree: &RegionTree, node: NodeId, path: &mut Vec<usize>, out: &mut String) {
    for (index, child) in tree.children(node).iter().enumerate() {
        path.push(index);
        let indent = "  ".repeat(path.len());
        let label = match tree.node(*child).and_then(|n| n.event()) {
            Some(event) => format!("{path:?} {event}"),
            None if tree.children(*child).is_empty() => format!("{path:?} (no command)"),
            None => format!("{path:?}"),
        };
        out.push_str(&indent);
        out.push_str(&label);
        out.push('\n');
        render_level(tree, *child, path, out);
        path.pop();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Event printer
// ─────────────────────────────────────────────────────────────────────────────

async fn print_events(
    mut navigation: TopicReceiver,
    mut focus: TopicReceiver,
    mut session: TopicReceiver,
) {
    loop {
        let received = tokio::select! {
            r = navigation.recv() => r,
            r = focus.recv() => r,
            r = session.recv() => r,
        };
        match received {
            Ok(event) => println!("{}", describe(&event)),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                println!("{}", format!("  … {n} event(s) skipped").dimmed());
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn describe(event: &NavEvent) -> String {
    match &event.payload {
        NavPayload::GoBackRequested => format!("  {}", "⟵ go back".yellow().bold()),
        NavPayload::CommandFired { event_id } => {
            format!("  {} {}", "✓ command".green().bold(), event_id.bold())
        }
        NavPayload::FocusMoved {
            section,
            path,
            depth,
        } => format!("  focus {path:?} → section {section} (depth {depth})")
            .dimmed()
            .to_string(),
        NavPayload::SessionStarted(info) => format!(
            "  {} {} on {}",
            "session started".cyan().bold(),
            info.id.to_string().dimmed(),
            info.device.model
        ),
        NavPayload::SessionEnded(info) => {
            let secs = info
                .end_time
                .map(|end| (end - info.begin_time).num_milliseconds() as f64 / 1000.0)
                .unwrap_or_default();
            format!("  {} after {secs:.1}s", "session ended".cyan().bold())
        }
    }
}
