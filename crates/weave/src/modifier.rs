use crate::layout::{Axis, Size, Spacing};
use crate::node::Node;

/// Sizing and decoration a parent asks the next emitted node to carry
///
/// Modifiers accumulate on the render context as it is passed down through
/// modifier views, and are applied to the first node a view emits. Sizes follow
/// first-wins ordering: an outer fixed frame beats a fill directive a container
/// computes for itself later.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeModifier {
    pub width: Option<Size>,
    pub height: Option<Size>,
    pub padding: Spacing,
    pub opacity: f32,
}

impl NodeModifier {
    pub const fn new() -> Self {
        Self {
            width: None,
            height: None,
            padding: Spacing::ZERO,
            opacity: 1.0,
        }
    }

    pub fn size(&self, axis: Axis) -> Option<Size> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Explicit fixed extent along an axis
    pub fn fixed(&self, axis: Axis) -> Option<f32> {
        self.size(axis).and_then(|size| size.fixed())
    }

    /// Set the size for an axis unless an outer modifier already did
    pub fn constrain(&mut self, axis: Axis, size: Size) {
        let slot = match axis {
            Axis::Horizontal => &mut self.width,
            Axis::Vertical => &mut self.height,
        };
        if slot.is_none() {
            *slot = Some(size);
        }
    }

    pub fn with_size(mut self, axis: Axis, size: Size) -> Self {
        self.constrain(axis, size);
        self
    }

    /// Add padding; negative insets are clamped to zero
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = self.padding + padding.clamped();
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity *= opacity.clamp(0.0, 1.0);
        self
    }

    /// Chain another modifier after this one
    pub fn then(mut self, other: &NodeModifier) -> Self {
        if let Some(width) = other.width {
            self.constrain(Axis::Horizontal, width);
        }
        if let Some(height) = other.height {
            self.constrain(Axis::Vertical, height);
        }
        self.padding = self.padding + other.padding;
        self.opacity *= other.opacity;
        self
    }

    /// Check if applying this modifier would change nothing
    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }

    /// Apply the accumulated modifiers to a freshly built node
    pub fn apply_to_node(&self, node: Node) -> Node {
        let mut node = node;
        if let Some(width) = self.width {
            node = node.with_width(width);
        }
        if let Some(height) = self.height {
            node = node.with_height(height);
        }
        let padding = node.padding() + self.padding;
        let opacity = node.opacity() * self.opacity;
        node.with_padding(padding).with_opacity(opacity)
    }
}

impl Default for NodeModifier {
    fn default() -> Self {
        Self::new()
    }
}
