use weave::{Axis, Leaf, Node, Render, RenderContext, View};

/// Flexible space that expands along the main axis of the enclosing stack
///
/// Outside a row or column a spacer expands along both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacer {
    min_length: f32,
}

impl Spacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum extent along the expanding axis
    pub fn min_length(mut self, min_length: f32) -> Self {
        self.min_length = min_length.max(0.0);
        self
    }
}

impl Render for Spacer {
    fn render(&self, cx: &RenderContext<'_>, out: &mut Vec<Node>) {
        let leaf = match cx.environment().stack() {
            Some(stack) => {
                let leaf = Leaf::new("spacer").with_fill(stack.axis, true);
                match stack.axis {
                    Axis::Horizontal => leaf.with_intrinsic_size(self.min_length, 0.0),
                    Axis::Vertical => leaf.with_intrinsic_size(0.0, self.min_length),
                }
            }
            None => Leaf::new("spacer")
                .expanding()
                .with_intrinsic_size(self.min_length, self.min_length),
        };
        out.push(leaf.to_node(cx));
    }
}

impl From<Spacer> for View {
    fn from(spacer: Spacer) -> Self {
        View::primitive(spacer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HStack;
    use weave::{Runtime, Size};

    #[test]
    fn test_spacer_expands_along_stack_axis_only() {
        let view: View = HStack::new([Spacer::new().min_length(5.0).into()]).into();
        let frame = Runtime::new().render(&view);

        let spacer = frame.find("root/hstack/0/spacer").unwrap();
        assert_eq!(spacer.width(), Size::Weight(1.0));
        assert_eq!(spacer.height(), Size::FitContent);
    }

    #[test]
    fn test_spacer_outside_stack_fills() {
        let frame = Runtime::new().render(&Spacer::new().into());
        let spacer = frame.root().unwrap();
        assert_eq!(spacer.width(), Size::Fill);
        assert_eq!(spacer.height(), Size::Fill);
    }
}
