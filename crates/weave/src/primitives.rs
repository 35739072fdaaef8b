use crate::layout::Axis;

/// Axis-aligned rectangle defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rect {
    pub const fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: [f32; 2], size: [f32; 2]) -> Self {
        Self {
            min,
            max: [min[0] + size[0], min[1] + size[1]],
        }
    }

    /// Build a rect from per-axis offsets and extents
    pub fn from_axes(main: Axis, main_min: f32, main_extent: f32, cross_min: f32, cross_extent: f32) -> Self {
        match main {
            Axis::Horizontal => Self::from_min_size([main_min, cross_min], [main_extent, cross_extent]),
            Axis::Vertical => Self::from_min_size([cross_min, main_min], [cross_extent, main_extent]),
        }
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    /// Extent of the rect along an axis
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width(),
            Axis::Vertical => self.height(),
        }
    }

    /// Minimum coordinate along an axis
    pub fn start(&self, axis: Axis) -> f32 {
        self.min[axis.index()]
    }

    /// Shrink the rect by the given insets, never producing a negative size
    pub fn inset(&self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        let min_x = self.min[0] + left;
        let min_y = self.min[1] + top;
        let max_x = (self.max[0] - right).max(min_x);
        let max_y = (self.max[1] - bottom).max(min_y);
        Self::new([min_x, min_y], [max_x, max_y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_axes_vertical() {
        let rect = Rect::from_axes(Axis::Vertical, 10.0, 20.0, 5.0, 30.0);
        assert_eq!(rect.min, [5.0, 10.0]);
        assert_eq!(rect.max, [35.0, 30.0]);
        assert_eq!(rect.extent(Axis::Vertical), 20.0);
        assert_eq!(rect.start(Axis::Horizontal), 5.0);
    }

    #[test]
    fn test_inset_never_negative() {
        let rect = Rect::from_min_size([0.0, 0.0], [10.0, 10.0]);
        let inset = rect.inset(8.0, 8.0, 8.0, 8.0);
        assert_eq!(inset.width(), 0.0);
        assert_eq!(inset.height(), 0.0);
    }
}
