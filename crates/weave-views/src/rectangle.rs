use weave::{Leaf, View};

/// A shape that expands in both axes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle;

impl Rectangle {
    pub fn new() -> Self {
        Self
    }
}

impl From<Rectangle> for View {
    fn from(_: Rectangle) -> Self {
        View::Leaf(Leaf::new("rectangle").expanding())
    }
}
