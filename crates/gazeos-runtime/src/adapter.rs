//! [`GazeAdapter`] – glue between filtered gaze points and the engine.
//!
//! Every point is interpreted against the *live* section count, which the
//! engine keeps current after each transition.

use gazeos_layout::FocusView;
use gazeos_perception::GazeInterpreter;
use gazeos_types::{EyeAction, Point, ScreenGeometry};
use tracing::trace;

use crate::engine::NavigationEngine;

pub struct GazeAdapter<V> {
    interpreter: GazeInterpreter,
    engine: NavigationEngine<V>,
}

impl<V: FocusView> GazeAdapter<V> {
    pub fn new(screen: ScreenGeometry, engine: NavigationEngine<V>) -> Self {
        let interpreter = GazeInterpreter::new(screen, engine.section_counter());
        Self {
            interpreter,
            engine,
        }
    }

    /// A filtered gaze point: derive section and optional action, then
    /// forward them to the engine.
    pub fn on_sample(&mut self, point: Point) {
        let section = self.interpreter.interpret_movement(point);
        let action = self.interpreter.interpret_action(point);
        trace!(x = point.x, y = point.y, section, ?action, "gaze sample");
        self.engine.handle(section, action);
    }

    /// A completed blink at `point`: select whatever section it falls in.
    pub fn on_blink(&mut self, point: Point) {
        let section = self.interpreter.interpret_movement(point);
        self.engine.on_action(EyeAction::Select, section);
    }

    pub fn engine(&self) -> &NavigationEngine<V> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut NavigationEngine<V> {
        &mut self.engine
    }

    pub fn interpreter(&self) -> &GazeInterpreter {
        &self.interpreter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use gazeos_layout::{BorderSet, RegionTreeBuilder, RegionTreeView};

    fn adapter() -> GazeAdapter<RegionTreeView<BorderSet>> {
        let tree = RegionTreeBuilder::new()
            .add_section(|s| s.add_leaf().add_leaf().add_leaf())
            .add_leaf()
            .build();
        let view = RegionTreeView::new(Arc::new(tree), BorderSet::new());
        let engine = NavigationEngine::new(view, || {});
        GazeAdapter::new(ScreenGeometry::new(400.0, 900.0), engine)
    }

    #[test]
    fn sample_moves_focus_to_band() {
        let mut adapter = adapter();
        adapter.on_sample(Point::new(200.0, 600.0));
        let view = adapter.engine().view();
        let bordered: Vec<_> = view.renderer().bordered().collect();
        assert_eq!(bordered.len(), 1);
        assert_eq!(view.tree().path_to(bordered[0]), Some(vec![1]));
    }

    #[test]
    fn interpreter_follows_engine_count() {
        let mut adapter = adapter();
        assert_eq!(adapter.interpreter().section_count(), 2);
        adapter.on_blink(Point::new(200.0, 100.0));
        assert_eq!(adapter.engine().depth_path(), &[0]);
        assert_eq!(adapter.interpreter().section_count(), 3);

        // 900 / 3 = 300 per band; y = 650 is the third band.
        adapter.on_sample(Point::new(200.0, 650.0));
        let view = adapter.engine().view();
        let bordered: Vec<_> = view.renderer().bordered().collect();
        assert_eq!(view.tree().path_to(bordered[0]), Some(vec![0, 2]));
    }

    #[test]
    fn sample_above_screen_deselects() {
        let mut adapter = adapter();
        adapter.on_blink(Point::new(200.0, 100.0));
        adapter.on_sample(Point::new(200.0, -5.0));
        assert!(adapter.engine().depth_path().is_empty());
        assert_eq!(adapter.interpreter().section_count(), 2);
    }
}
