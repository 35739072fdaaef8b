//! Render loop
//!
//! The `Runtime` owns the persisted container states and drives render passes. A pass
//! renders the whole view tree against the states committed so far, then the queued
//! effects are committed. When a commit changed a container's state, the tree is
//! rendered again so the container can pick its corrected sizing; the loop ends once
//! a commit changes nothing.

use crate::commit::Effect;
use crate::context::{RenderContext, RenderPass};
use crate::debug::DebugOptions;
use crate::environment::EnvironmentValues;
use crate::measure::{ContentMeasurer, MonospaceMeasurer};
use crate::node::{Node, NodeId};
use crate::primitives::Rect;
use crate::render::render;
use crate::state::{ContainerState, ContainerStates};
use crate::view::View;

/// Configuration of the render loop and of default stack spacing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// Upper bound of render passes for one `render` call
    pub max_passes: usize,
    /// Spacing between items of a stack without explicit spacing
    pub default_spacing: f32,
    /// Spacing before an item that follows text
    pub text_spacing: f32,
    /// Log a summary (and the node tree) of every pass at debug level
    pub log_passes: bool,
}

impl RenderOptions {
    pub const fn new() -> Self {
        Self {
            max_passes: 16,
            default_spacing: 8.0,
            text_spacing: 4.0,
            log_passes: false,
        }
    }

    pub const fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub const fn with_default_spacing(mut self, spacing: f32) -> Self {
        self.default_spacing = spacing;
        self
    }

    pub const fn with_text_spacing(mut self, spacing: f32) -> Self {
        self.text_spacing = spacing;
        self
    }

    pub const fn with_log_passes(mut self, enabled: bool) -> Self {
        self.log_passes = enabled;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a single render pass and its commit
#[derive(Debug)]
pub struct PassOutcome {
    pub nodes: Vec<Node>,
    /// Effects the pass queued, in call order
    pub effects: Vec<Effect>,
    /// Whether committing the effects changed any container state
    pub changed: bool,
}

/// The node tree of the last pass of a `render` call
#[derive(Debug)]
pub struct Frame {
    pub nodes: Vec<Node>,
    /// Number of passes rendered
    pub passes: usize,
    /// Whether the last commit changed nothing
    pub settled: bool,
}

impl Frame {
    /// First top-level node
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Find a node by id among all top-level trees
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find_map(|node| node.find(id))
    }

    /// Lay out every top-level node inside `available`
    pub fn compute_layout(&mut self, available: Rect) {
        self.compute_layout_with_measurer(available, &mut MonospaceMeasurer::default());
    }

    pub fn compute_layout_with_measurer(
        &mut self,
        available: Rect,
        measurer: &mut dyn ContentMeasurer,
    ) {
        for node in &mut self.nodes {
            node.compute_layout_with_measurer(available, measurer);
        }
    }

    /// Text dump of the node trees
    pub fn dump(&self, options: DebugOptions) -> String {
        self.nodes.iter().map(|node| node.dump(options)).collect()
    }
}

/// Drives render passes and owns the persisted container states
pub struct Runtime {
    states: ContainerStates,
    options: RenderOptions,
    environment: EnvironmentValues,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            states: ContainerStates::new(),
            options,
            environment: EnvironmentValues::new(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Environment the root of every pass starts from
    pub fn set_environment(&mut self, environment: EnvironmentValues) {
        self.environment = environment;
    }

    pub fn environment(&self) -> &EnvironmentValues {
        &self.environment
    }

    pub fn states(&self) -> &ContainerStates {
        &self.states
    }

    /// Committed state of a container
    pub fn container_state(&self, id: &str) -> Option<ContainerState> {
        self.states.get(&NodeId::new(id))
    }

    /// Forget all container states, as if every container was unmounted
    pub fn reset(&mut self) {
        self.states.clear();
    }

    /// Render one pass and commit its effects
    pub fn render_pass(&mut self, view: &View) -> PassOutcome {
        let pass = RenderPass::new(&self.states, &self.options);
        let mut nodes = Vec::new();
        {
            let cx = RenderContext::with_environment(&pass, self.environment.clone());
            render(view, &cx, &mut nodes);
        }
        let record = pass.finish();
        let rendered = record.rendered.len();
        let effects = record.effects.clone();

        let changed = self.states.commit(record);
        if cfg!(debug_assertions) {
            if let Err(violation) = self.states.check_invariants() {
                panic!("container state invariant violated: {}", violation);
            }
        }

        log::debug!(
            "pass rendered {} container(s), queued {} effect(s), changed: {}",
            rendered,
            effects.len(),
            changed
        );
        if self.options.log_passes {
            for node in &nodes {
                log::debug!("\n{}", node.dump(DebugOptions::all()));
            }
        }

        PassOutcome {
            nodes,
            effects,
            changed,
        }
    }

    /// Render passes until the container states settle
    ///
    /// Stops after `max_passes` passes even if the states keep changing; the frame then
    /// holds the last pass and `settled` is false.
    pub fn render(&mut self, view: &View) -> Frame {
        let max_passes = self.options.max_passes.max(1);
        let mut passes = 0;
        loop {
            let outcome = self.render_pass(view);
            passes += 1;
            if !outcome.changed {
                log::debug!("settled after {} pass(es)", passes);
                return Frame {
                    nodes: outcome.nodes,
                    passes,
                    settled: true,
                };
            }
            if passes >= max_passes {
                log::warn!(
                    "container states still changing after {} passes, giving up",
                    passes
                );
                return Frame {
                    nodes: outcome.nodes,
                    passes,
                    settled: false,
                };
            }
        }
    }

    /// Render until settled and lay the result out inside `available`
    pub fn layout(&mut self, view: &View, available: Rect) -> Frame {
        let mut frame = self.render(view);
        frame.compute_layout(available);
        frame
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("states", &self.states)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::adaptive_container;
    use crate::layout::{Axis, Layout, Size};
    use crate::modifier::NodeModifier;
    use crate::state::AxisPhase;
    use crate::view::{Leaf, Render};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Overlay container around one child
    struct Boxed(View);

    impl Render for Boxed {
        fn render(&self, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
            let node = adaptive_container(
                cx,
                "box",
                NodeModifier::new(),
                false,
                false,
                NodeModifier::new(),
                |modifier, cx| {
                    let mut children = Vec::new();
                    crate::render::render(&self.0, cx, &mut children);
                    modifier.apply_to_node(
                        Node::new()
                            .with_id(cx.scope())
                            .with_layout_direction(Layout::Stack)
                            .with_children(children),
                    )
                },
            );
            out.push(node);
        }
    }

    fn expanding() -> View {
        View::leaf(Leaf::new("fill").expanding())
    }

    #[test]
    fn test_root_request_settles_in_one_pass() {
        let mut runtime = Runtime::new();
        let frame = runtime.render(&expanding());

        assert!(frame.settled);
        assert_eq!(frame.passes, 1);
        assert_eq!(frame.root().unwrap().width(), Size::Fill);
        assert!(runtime.states().is_empty());
    }

    #[test]
    fn test_container_expands_on_second_pass() {
        let mut runtime = Runtime::new();
        let view = View::primitive(Boxed(expanding()));

        let first = runtime.render_pass(&view);
        assert!(first.changed);
        assert_eq!(first.effects.len(), 2);
        assert_eq!(first.nodes[0].width(), Size::FitContent);

        let second = runtime.render_pass(&view);
        assert!(!second.changed);
        assert_eq!(second.nodes[0].width(), Size::Fill);
        assert_eq!(second.nodes[0].height(), Size::Fill);

        let state = runtime.container_state("root/box").unwrap();
        assert_eq!(state.phase(Axis::Horizontal), AxisPhase::Expanding);
    }

    #[test]
    fn test_unmounted_container_state_is_dropped() {
        let mut runtime = Runtime::new();
        runtime.render(&View::primitive(Boxed(expanding())));
        assert!(runtime.container_state("root/box").is_some());

        // Same view under a new identity is a new mount
        let frame = runtime.render(&View::primitive(Boxed(expanding())).id("other"));
        assert!(frame.settled);
        assert!(runtime.container_state("root/box").is_none());
        assert!(runtime.container_state("root/#other/box").is_some());
    }

    #[test]
    fn test_pass_bound_stops_oscillation() {
        let renders = Rc::new(Cell::new(0u32));
        let counter = renders.clone();
        let view = View::composite(move |_: &RenderContext<'_>| {
            counter.set(counter.get() + 1);
            let boxed = View::primitive(Boxed(expanding()));
            if counter.get() % 2 == 1 {
                boxed
            } else {
                boxed.frame_height(10.0)
            }
        });

        let mut runtime = Runtime::with_options(RenderOptions::new().with_max_passes(4));
        let frame = runtime.render(&view);

        assert!(!frame.settled);
        assert_eq!(frame.passes, 4);
        assert_eq!(renders.get(), 4);
    }

    #[test]
    fn test_layout_resolves_rects() {
        let mut runtime = Runtime::new();
        let view = View::primitive(Boxed(
            View::leaf(Leaf::new("block").with_intrinsic_size(30.0, 20.0)).padding(5.0),
        ));
        let frame = runtime.layout(&view, Rect::from_min_size([0.0, 0.0], [100.0, 100.0]));

        let boxed = frame.find("root/box").unwrap().rect().unwrap();
        assert_eq!(boxed.width(), 40.0);
        assert_eq!(boxed.height(), 30.0);
        let block = frame.find("root/box/block").unwrap().rect().unwrap();
        assert_eq!(block.min, [0.0, 0.0]);
    }

    #[test]
    fn test_fixed_width_box_negotiates_height_only() {
        let mut runtime = Runtime::new();
        let mut environment = EnvironmentValues::new();
        environment.set_enabled(false);
        runtime.set_environment(environment);

        let view = View::primitive(Boxed(expanding())).frame_width(30.0);
        let first = runtime.render_pass(&view);
        assert_eq!(first.effects.len(), 1);
        assert_eq!(first.effects[0].axis(), Axis::Vertical);

        let frame = runtime.render(&view);
        assert!(frame.settled);
        let state = runtime.container_state("root/box").unwrap();
        assert_eq!(state.phase(Axis::Horizontal), AxisPhase::Unknown);
        assert_eq!(state.phase(Axis::Vertical), AxisPhase::Expanding);

        let boxed = frame.root().unwrap();
        assert_eq!(boxed.width(), Size::Fixed(30.0));
        assert!(frame.find("root/box/fill").unwrap().is_disabled());
        assert!(!runtime.environment().is_enabled());
    }

    #[test]
    fn test_options_builders() {
        const OPTIONS: RenderOptions = RenderOptions::new()
            .with_max_passes(3)
            .with_default_spacing(10.0)
            .with_text_spacing(2.0)
            .with_log_passes(true);
        assert_eq!(OPTIONS.max_passes, 3);
        assert_eq!(OPTIONS.default_spacing, 10.0);
        assert_eq!(OPTIONS.text_spacing, 2.0);
        assert!(OPTIONS.log_passes);
    }
}
