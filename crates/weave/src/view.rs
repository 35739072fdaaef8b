//! Declarative view tree
//!
//! A [`View`] is a closed set of render node kinds. Leaves and groups are plain data,
//! modifiers wrap another view, and the two open cases cover everything else:
//! [`Component`] for views defined by a body, [`Render`] for views that emit nodes
//! themselves (containers, spacers, dividers).
//!
//! # Example
//!
//! ```
//! use weave::{Leaf, View};
//!
//! let view = View::group([
//!     View::text("title"),
//!     View::leaf(Leaf::new("fill").expanding()).padding(4.0),
//! ])
//! .id("header");
//!
//! assert!(matches!(view, View::Modified { .. }));
//! ```

use crate::channel::request_fill;
use crate::color::Color;
use crate::content::{Content, TextContent};
use crate::context::RenderContext;
use crate::environment::EnvironmentValues;
use crate::layout::{Axis, Size, Spacing};
use crate::measure::IntrinsicSize;
use crate::node::Node;
use std::fmt;
use std::rc::Rc;

/// A view defined by the view it evaluates to
pub trait Component {
    /// Build this view's body for the current context
    fn body(&self, cx: &RenderContext<'_>) -> View;
}

impl<F> Component for F
where
    F: Fn(&RenderContext<'_>) -> View,
{
    fn body(&self, cx: &RenderContext<'_>) -> View {
        self(cx)
    }
}

/// A view that emits nodes directly
pub trait Render {
    fn render(&self, cx: &RenderContext<'_>, out: &mut Vec<Node>);

    /// Whether modifier-stripped checks should treat this view as text
    fn is_text(&self) -> bool {
        false
    }
}

/// A leaf view: text or a block with an intrinsic size
///
/// A leaf can take part in fill negotiation per axis: `Some(true)` asks the nearest
/// container to expand, `Some(false)` asks to align with siblings without expanding.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    label: String,
    content: Option<Content>,
    intrinsic_size: IntrinsicSize,
    fill_width: Option<bool>,
    fill_height: Option<bool>,
}

impl Leaf {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: None,
            intrinsic_size: IntrinsicSize::zero(),
            fill_width: None,
            fill_height: None,
        }
    }

    pub fn text(text: TextContent) -> Self {
        Self {
            content: Some(Content::Text(text)),
            ..Self::new("text")
        }
    }

    pub fn with_intrinsic_size(mut self, width: f32, height: f32) -> Self {
        self.intrinsic_size = IntrinsicSize::new(width, height);
        self
    }

    /// Negotiate along `axis`; `wants_expand` picks expanding over aligning
    pub fn with_fill(mut self, axis: Axis, wants_expand: bool) -> Self {
        match axis {
            Axis::Horizontal => self.fill_width = Some(wants_expand),
            Axis::Vertical => self.fill_height = Some(wants_expand),
        }
        self
    }

    /// Ask to expand along both axes
    pub fn expanding(self) -> Self {
        self.with_fill(Axis::Horizontal, true)
            .with_fill(Axis::Vertical, true)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fill(&self, axis: Axis) -> Option<bool> {
        match axis {
            Axis::Horizontal => self.fill_width,
            Axis::Vertical => self.fill_height,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, Some(Content::Text(_)))
    }

    /// Build the node for this leaf, negotiating fills and applying the context modifier
    pub fn to_node(&self, cx: &RenderContext<'_>) -> Node {
        let env = cx.environment();
        let mut node = Node::new()
            .with_id(cx.id_for(&self.label))
            .with_intrinsic_size(self.intrinsic_size)
            .with_disabled(!env.is_enabled());

        if let Some(content) = &self.content {
            let content = match content {
                Content::Text(text) => {
                    let mut text = text.clone();
                    if text.color.is_none() {
                        text.color = env.foreground_color();
                    }
                    Content::Text(text)
                }
            };
            node = node.with_content(content);
        }

        for axis in Axis::ALL {
            if let Some(wants_expand) = self.fill(axis) {
                let directive = request_fill(cx, axis, wants_expand);
                node = node.with_size_along(axis, directive.to_size());
            }
        }
        cx.modifier().apply_to_node(node)
    }
}

/// A modification applied to the context a wrapped view renders with
#[derive(Clone)]
pub enum Modifier {
    /// Fixed extents; clears fill negotiation for the fixed axes
    Frame {
        width: Option<f32>,
        height: Option<f32>,
    },
    Padding(Spacing),
    Opacity(f32),
    /// Explicit sizing along one axis; a fixed size clears fill negotiation like `Frame`
    Size { axis: Axis, size: Size },
    /// Override environment values for the wrapped subtree
    Environment(Rc<dyn Fn(&mut EnvironmentValues)>),
    /// Give the wrapped subtree its own identity
    Id(String),
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Frame { width, height } => f
                .debug_struct("Frame")
                .field("width", width)
                .field("height", height)
                .finish(),
            Modifier::Padding(padding) => f.debug_tuple("Padding").field(padding).finish(),
            Modifier::Opacity(opacity) => f.debug_tuple("Opacity").field(opacity).finish(),
            Modifier::Size { axis, size } => f
                .debug_struct("Size")
                .field("axis", axis)
                .field("size", size)
                .finish(),
            Modifier::Environment(_) => f.write_str("Environment(..)"),
            Modifier::Id(key) => f.debug_tuple("Id").field(key).finish(),
        }
    }
}

/// A node of the declarative view tree
#[derive(Clone, Default)]
pub enum View {
    /// Renders nothing
    #[default]
    Empty,
    Leaf(Leaf),
    /// Children rendered in sequence, as if listed in the parent directly
    Group(Vec<View>),
    Modified {
        content: Box<View>,
        modifier: Modifier,
    },
    Composite(Rc<dyn Component>),
    Primitive(Rc<dyn Render>),
}

impl View {
    pub fn leaf(leaf: Leaf) -> Self {
        View::Leaf(leaf)
    }

    pub fn text(text: impl Into<String>) -> Self {
        View::Leaf(Leaf::text(TextContent::new(text)))
    }

    pub fn group(children: impl IntoIterator<Item = View>) -> Self {
        View::Group(children.into_iter().collect())
    }

    pub fn composite(component: impl Component + 'static) -> Self {
        View::Composite(Rc::new(component))
    }

    pub fn primitive(render: impl Render + 'static) -> Self {
        View::Primitive(Rc::new(render))
    }

    /// Wrap this view in a modifier
    pub fn modifier(self, modifier: Modifier) -> Self {
        View::Modified {
            content: Box::new(self),
            modifier,
        }
    }

    /// Fix the width and/or height
    pub fn frame(self, width: Option<f32>, height: Option<f32>) -> Self {
        self.modifier(Modifier::Frame { width, height })
    }

    pub fn frame_width(self, width: f32) -> Self {
        self.frame(Some(width), None)
    }

    pub fn frame_height(self, height: f32) -> Self {
        self.frame(None, Some(height))
    }

    /// Pad all edges; negative values are clamped to zero
    pub fn padding(self, value: f32) -> Self {
        self.padding_edges(Spacing::all(value))
    }

    pub fn padding_edges(self, padding: Spacing) -> Self {
        self.modifier(Modifier::Padding(padding.clamped()))
    }

    /// Set opacity, clamped to `0.0..=1.0`
    pub fn opacity(self, opacity: f32) -> Self {
        self.modifier(Modifier::Opacity(opacity.clamp(0.0, 1.0)))
    }

    pub fn sized(self, axis: Axis, size: Size) -> Self {
        self.modifier(Modifier::Size { axis, size })
    }

    pub fn environment(self, mutations: impl Fn(&mut EnvironmentValues) + 'static) -> Self {
        self.modifier(Modifier::Environment(Rc::new(mutations)))
    }

    pub fn foreground_color(self, color: Color) -> Self {
        self.environment(move |env| env.set_foreground_color(Some(color)))
    }

    pub fn disabled(self, disabled: bool) -> Self {
        self.environment(move |env| {
            if disabled {
                env.set_enabled(false);
            }
        })
    }

    /// Give this view an explicit identity; changing the key remounts the subtree
    pub fn id(self, key: impl Into<String>) -> Self {
        self.modifier(Modifier::Id(key.into()))
    }

    /// The view beneath any modifiers
    pub fn stripping_modifiers(&self) -> &View {
        let mut view = self;
        while let View::Modified { content, .. } = view {
            view = content;
        }
        view
    }

    /// Whether this view renders text, looking through modifiers
    pub fn is_text(&self) -> bool {
        match self.stripping_modifiers() {
            View::Leaf(leaf) => leaf.is_text(),
            View::Primitive(render) => render.is_text(),
            _ => false,
        }
    }
}

impl From<Leaf> for View {
    fn from(leaf: Leaf) -> Self {
        View::Leaf(leaf)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Empty => f.write_str("Empty"),
            View::Leaf(leaf) => f.debug_tuple("Leaf").field(leaf).finish(),
            View::Group(children) => f.debug_tuple("Group").field(children).finish(),
            View::Modified { content, modifier } => f
                .debug_struct("Modified")
                .field("modifier", modifier)
                .field("content", content)
                .finish(),
            View::Composite(_) => f.write_str("Composite(..)"),
            View::Primitive(_) => f.write_str("Primitive(..)"),
        }
    }
}
