//! Property tests over generated view trees.
//!
//! 1. **Monotonicity** - a container's phase never moves back down between passes.
//! 2. **Mutual exclusion** - no axis is ever flagged both expanding and non-expanding.
//! 3. **Settling** - the runtime settles, one container level per pass.
//! 4. **Stable output** - once settled, another pass queues nothing and renders the
//!    same tree.

use proptest::prelude::*;
use std::collections::HashMap;
use weave::{Axis, ContainerState, Leaf, NodeId, Rect, RenderOptions, Runtime, View};
use weave_views::{Divider, HStack, Rectangle, Spacer, Text, VStack, ZStack};

#[derive(Debug, Clone)]
enum Tree {
    Text(String),
    Rectangle,
    Spacer,
    Divider,
    Block { align_width: bool },
    VStack(Option<f32>, Vec<Tree>),
    HStack(Option<f32>, Vec<Tree>),
    ZStack(Vec<Tree>),
    Framed(Box<Tree>, Option<f32>, Option<f32>),
}

impl Tree {
    fn view(&self) -> View {
        let children = |trees: &[Tree]| trees.iter().map(Tree::view).collect::<Vec<_>>();
        match self {
            Tree::Text(text) => Text::new(text.clone()).into(),
            Tree::Rectangle => Rectangle::new().into(),
            Tree::Spacer => Spacer::new().into(),
            Tree::Divider => Divider::new().into(),
            Tree::Block { align_width } => {
                let axis = if *align_width {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                };
                View::leaf(
                    Leaf::new("block")
                        .with_intrinsic_size(12.0, 8.0)
                        .with_fill(axis, false),
                )
            }
            Tree::VStack(spacing, trees) => {
                let stack = VStack::new(children(trees));
                match spacing {
                    Some(spacing) => stack.spacing(*spacing).into(),
                    None => stack.into(),
                }
            }
            Tree::HStack(spacing, trees) => {
                let stack = HStack::new(children(trees));
                match spacing {
                    Some(spacing) => stack.spacing(*spacing).into(),
                    None => stack.into(),
                }
            }
            Tree::ZStack(trees) => ZStack::new(children(trees)).into(),
            Tree::Framed(tree, width, height) => tree.view().frame(*width, *height),
        }
    }

    /// Number of nested containers on the deepest path
    fn container_depth(&self) -> usize {
        let deepest = |trees: &[Tree]| trees.iter().map(Tree::container_depth).max().unwrap_or(0);
        match self {
            Tree::VStack(_, trees) | Tree::HStack(_, trees) | Tree::ZStack(trees) => {
                1 + deepest(trees)
            }
            Tree::Framed(tree, _, _) => tree.container_depth(),
            _ => 0,
        }
    }
}

fn tree() -> impl Strategy<Value = Tree> {
    let leaf = prop_oneof![
        "[a-z]{1,8}".prop_map(Tree::Text),
        Just(Tree::Rectangle),
        Just(Tree::Spacer),
        Just(Tree::Divider),
        any::<bool>().prop_map(|align_width| Tree::Block { align_width }),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (
                proptest::option::of(0.0f32..16.0),
                prop::collection::vec(inner.clone(), 0..4)
            )
                .prop_map(|(spacing, trees)| Tree::VStack(spacing, trees)),
            (
                proptest::option::of(0.0f32..16.0),
                prop::collection::vec(inner.clone(), 0..4)
            )
                .prop_map(|(spacing, trees)| Tree::HStack(spacing, trees)),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Tree::ZStack),
            (
                inner,
                proptest::option::of(1.0f32..100.0),
                proptest::option::of(1.0f32..100.0)
            )
                .prop_map(|(tree, width, height)| Tree::Framed(Box::new(tree), width, height)),
        ]
    })
}

fn snapshot(runtime: &Runtime) -> HashMap<NodeId, ContainerState> {
    runtime
        .states()
        .iter()
        .map(|(id, state)| (id.clone(), *state))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_phases_are_monotonic_and_exclusive(tree in tree()) {
        let view = tree.view();
        let mut runtime = Runtime::new();
        let mut previous = snapshot(&runtime);

        for _ in 0..=tree.container_depth() + 1 {
            runtime.render_pass(&view);
            let current = snapshot(&runtime);
            for (id, state) in &current {
                for axis in Axis::ALL {
                    prop_assert!(!state.axis(axis).is_conflicting(), "{} conflicts on {:?}", id, axis);
                    if let Some(before) = previous.get(id) {
                        prop_assert!(
                            state.phase(axis) >= before.phase(axis),
                            "{} went from {:?} to {:?} on {:?}",
                            id,
                            before.phase(axis),
                            state.phase(axis),
                            axis
                        );
                    }
                }
            }
            prop_assert!(runtime.states().check_invariants().is_ok());
            previous = current;
        }
    }

    #[test]
    fn test_runtime_settles_one_level_per_pass(tree in tree()) {
        let view = tree.view();
        let mut runtime = Runtime::with_options(RenderOptions::new().with_max_passes(64));
        let frame = runtime.render(&view);

        prop_assert!(frame.settled);
        prop_assert!(
            frame.passes <= tree.container_depth() + 1,
            "{} passes for depth {}",
            frame.passes,
            tree.container_depth()
        );
    }

    #[test]
    fn test_settled_output_is_stable(tree in tree()) {
        let view = tree.view();
        let mut runtime = Runtime::new();
        let mut frame = runtime.render(&view);
        prop_assert!(frame.settled);

        let again = runtime.render_pass(&view);
        prop_assert!(!again.changed);
        prop_assert!(again.effects.is_empty());
        prop_assert_eq!(&again.nodes, &frame.nodes);

        // Layout never panics and keeps every root inside the screen
        let screen = Rect::from_min_size([0.0, 0.0], [320.0, 240.0]);
        frame.compute_layout(screen);
        for node in &frame.nodes {
            let rect = node.rect().unwrap();
            prop_assert!(rect.width() <= 320.0 + 1e-3 || node.width().fixed().is_some());
            prop_assert!(rect.height() <= 240.0 + 1e-3 || node.height().fixed().is_some());
        }
    }
}
