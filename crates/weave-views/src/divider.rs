use weave::{Axis, Leaf, Node, Render, RenderContext, View};

/// A thin line separating the items of a stack
///
/// The line runs across the stack's main axis and stretches to the extent its siblings
/// share, without making the stack expand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Divider {
    thickness: f32,
}

impl Divider {
    pub fn new() -> Self {
        Self { thickness: 1.0 }
    }

    pub fn thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness.max(0.0);
        self
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for Divider {
    fn render(&self, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
        // A horizontal line unless inside a row
        let along = match cx.environment().stack() {
            Some(stack) => stack.axis.cross(),
            None => Axis::Horizontal,
        };
        let leaf = match along {
            Axis::Horizontal => Leaf::new("divider").with_intrinsic_size(0.0, self.thickness),
            Axis::Vertical => Leaf::new("divider").with_intrinsic_size(self.thickness, 0.0),
        };
        out.push(leaf.with_fill(along, false).to_node(cx));
    }
}

impl From<Divider> for View {
    fn from(divider: Divider) -> Self {
        View::primitive(divider)
    }
}
