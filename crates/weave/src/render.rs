//! Render tree walker
//!
//! [`render`] is the entry point used for every child: it routes the view through
//! the composer the parent installed, if any. [`render_content`] does the actual
//! dispatch on the view kind. Modifier views adjust the context and delegate to the
//! view they wrap.

use crate::context::RenderContext;
use crate::layout::{Axis, Size};
use crate::node::Node;
use crate::view::{Modifier, View};

/// Render a view as a child of the current element
pub fn render(view: &View, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
    match (view, cx.composer()) {
        // Groups are flattened so the composer sees each item
        (View::Group(_) | View::Empty, _) | (_, None) => render_content(view, cx, out),
        (_, Some(composer)) => {
            let composer = composer.clone();
            composer.compose(view, &cx.without_composer(), out);
        }
    }
}

/// Render a view without consulting the composer
pub fn render_content(view: &View, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
    match view {
        View::Empty => {}
        View::Leaf(leaf) => out.push(leaf.to_node(cx)),
        View::Group(children) => {
            for (index, child) in children.iter().enumerate() {
                render(child, &cx.scoped(index), out);
            }
        }
        View::Modified { content, modifier } => render_modified(content, modifier, cx, out),
        View::Composite(component) => {
            let body = component.body(cx);
            render(&body, cx, out);
        }
        View::Primitive(primitive) => primitive.render(cx, out),
    }
}

fn render_modified(content: &View, modifier: &Modifier, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
    match modifier {
        Modifier::Frame { width, height } => {
            let fixed: Vec<(Axis, f32)> = Axis::ALL
                .into_iter()
                .zip([*width, *height])
                .filter_map(|(axis, extent)| extent.map(|extent| (axis, extent)))
                .collect();
            render_fixed(content, &fixed, cx, out);
        }
        Modifier::Padding(padding) => {
            let cx = cx.with_modifier(|m| *m = std::mem::take(m).with_padding(*padding));
            render(content, &cx, out);
        }
        Modifier::Opacity(opacity) => {
            let cx = cx.with_modifier(|m| *m = std::mem::take(m).with_opacity(*opacity));
            render(content, &cx, out);
        }
        Modifier::Size {
            axis,
            size: Size::Fixed(extent),
        } => render_fixed(content, &[(*axis, *extent)], cx, out),
        Modifier::Size { axis, size } => {
            let cx = cx.with_modifier(|m| m.constrain(*axis, *size));
            render(content, &cx, out);
        }
        Modifier::Environment(mutations) => {
            cx.with_overrides(|env| mutations(env), |cx| render(content, cx, out));
        }
        Modifier::Id(key) => render(content, &cx.scoped(format_args!("#{}", key)), out),
    }
}

fn render_fixed(content: &View, fixed: &[(Axis, f32)], cx: &RenderContext<'_>, out: &mut Vec<Node>) {
    let cx = cx.with_modifier(|m| {
        for &(axis, extent) in fixed {
            m.constrain(axis, Size::Fixed(extent.max(0.0)));
        }
    });
    // A fixed axis has nothing left to negotiate
    cx.with_overrides(
        |env| {
            for &(axis, _) in fixed {
                env.set_fill_channel(axis, None);
                env.set_fill_modifier(axis, None);
            }
        },
        |cx| render(content, cx, out),
    );
}
