//! Stacks: rows, columns and overlays
//!
//! All stacks are adaptive containers, so a stack sizes to its content until a child
//! asks to expand. Rows and columns additionally hand out weighted fills along their
//! main axis, so expanding children share the space left after their siblings.

use std::cell::Cell;
use std::rc::Rc;
use weave::{
    adaptive_container, install_directional_channel, render, Alignment, Arrangement, Axis,
    Composer, Layout, Node, NodeModifier, RenderContext, RenderOptions, Render, Spacing, View,
};

/// Adds the default leading spacing to every item of a stack after the first
///
/// Items that follow text get the tighter `text_spacing`.
struct DefaultSpacing {
    axis: Axis,
    default_spacing: f32,
    text_spacing: f32,
    /// Whether the previous item was text; `None` before the first item
    last_was_text: Cell<Option<bool>>,
}

impl DefaultSpacing {
    fn new(axis: Axis, options: &RenderOptions) -> Self {
        Self {
            axis,
            default_spacing: options.default_spacing,
            text_spacing: options.text_spacing,
            last_was_text: Cell::new(None),
        }
    }
}

impl Composer for DefaultSpacing {
    fn compose(&self, view: &View, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
        match self.last_was_text.get() {
            Some(last_was_text) => {
                let spacing = if last_was_text {
                    self.text_spacing
                } else {
                    self.default_spacing
                };
                let padding = Spacing::leading(self.axis, spacing);
                let cx = cx.with_modifier(|m| *m = std::mem::take(m).with_padding(padding));
                render(view, &cx, out);
            }
            None => render(view, cx, out),
        }
        self.last_was_text.set(Some(view.is_text()));
    }
}

/// Render a row or column
fn render_directional(
    cx: &RenderContext<'_>,
    label: &str,
    axis: Axis,
    alignment: Alignment,
    spacing: Option<f32>,
    content: &View,
    out: &mut Vec<Node>,
) {
    let arrangement = match spacing {
        Some(spacing) => Arrangement::SpacedBy(spacing),
        None => Arrangement::Center,
    };

    let node = adaptive_container(
        cx,
        label,
        NodeModifier::new(),
        false,
        false,
        NodeModifier::new(),
        |modifier, cx| {
            let items = match spacing {
                Some(_) => cx.clone(),
                None => cx.content_with_composer(Rc::new(DefaultSpacing::new(axis, cx.options()))),
            };
            let mut children = Vec::new();
            log::trace!("{} {:?} with {:?}", cx.scope(), axis, arrangement);
            items.with_overrides(
                |env| install_directional_channel(env, axis, arrangement),
                |items| render(content, items, &mut children),
            );

            modifier.apply_to_node(
                Node::new()
                    .with_id(cx.scope())
                    .with_layout_direction(Layout::from(axis))
                    .with_arrangement(arrangement)
                    .with_alignment(alignment)
                    .with_disabled(!cx.environment().is_enabled())
                    .with_children(children),
            )
        },
    );
    out.push(node);
}

/// A column of views
///
/// # Example
///
/// ```
/// use weave::{Runtime, View};
/// use weave_views::{Rectangle, Text, VStack};
///
/// let view = VStack::new([Text::new("title").into(), Rectangle::new().into()]).into();
/// let frame = Runtime::new().render(&view);
/// assert!(frame.settled);
/// assert_eq!(frame.passes, 2);
/// ```
#[derive(Clone, Debug)]
pub struct VStack {
    alignment: Alignment,
    spacing: Option<f32>,
    content: View,
}

impl VStack {
    pub fn new(children: impl IntoIterator<Item = View>) -> Self {
        Self::with_content(View::group(children))
    }

    /// Column around arbitrary content (groups are flattened into items)
    pub fn with_content(content: View) -> Self {
        Self {
            alignment: Alignment::Center,
            spacing: None,
            content,
        }
    }

    /// Horizontal alignment of the items
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Fixed spacing between items instead of the default spacing
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }
}

impl Render for VStack {
    fn render(&self, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
        render_directional(
            cx,
            "vstack",
            Axis::Vertical,
            self.alignment,
            self.spacing,
            &self.content,
            out,
        );
    }
}

impl From<VStack> for View {
    fn from(stack: VStack) -> Self {
        View::primitive(stack)
    }
}

/// A row of views
#[derive(Clone, Debug)]
pub struct HStack {
    alignment: Alignment,
    spacing: Option<f32>,
    content: View,
}

impl HStack {
    pub fn new(children: impl IntoIterator<Item = View>) -> Self {
        Self::with_content(View::group(children))
    }

    pub fn with_content(content: View) -> Self {
        Self {
            alignment: Alignment::Center,
            spacing: None,
            content,
        }
    }

    /// Vertical alignment of the items
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }
}

impl Render for HStack {
    fn render(&self, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
        render_directional(
            cx,
            "hstack",
            Axis::Horizontal,
            self.alignment,
            self.spacing,
            &self.content,
            out,
        );
    }
}

impl From<HStack> for View {
    fn from(stack: HStack) -> Self {
        View::primitive(stack)
    }
}

/// Views layered on top of each other
///
/// Expanding children fill the overlay to its maximum extent on both axes; there is
/// no weighted sharing.
#[derive(Clone, Debug)]
pub struct ZStack {
    alignment: Alignment,
    content: View,
}

impl ZStack {
    pub fn new(children: impl IntoIterator<Item = View>) -> Self {
        Self {
            alignment: Alignment::Center,
            content: View::group(children),
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Render for ZStack {
    fn render(&self, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
        let node = adaptive_container(
            cx,
            "zstack",
            NodeModifier::new(),
            false,
            false,
            NodeModifier::new(),
            |modifier, cx| {
                let mut children = Vec::new();
                render(&self.content, cx, &mut children);
                modifier.apply_to_node(
                    Node::new()
                        .with_id(cx.scope())
                        .with_layout_direction(Layout::Stack)
                        .with_alignment(self.alignment)
                        .with_disabled(!cx.environment().is_enabled())
                        .with_children(children),
                )
            },
        );
        out.push(node);
    }
}

impl From<ZStack> for View {
    fn from(stack: ZStack) -> Self {
        View::primitive(stack)
    }
}
