use crate::primitives::Rect;

/// One of the two layout axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Width
    Horizontal,
    /// Height
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The perpendicular axis
    pub const fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }
}

/// Resolved sizing of a node along one axis.
///
/// `Fill` is the greedy behavior: inside a row or column the node takes all space
/// that is left at the moment it is measured, starving the siblings after it.
/// `Weight` is the proportional share that only rows and columns understand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Size {
    /// Fixed size in logical pixels
    Fixed(f32),
    /// Size to the content (text metrics or children), plus padding
    FitContent,
    /// Fill all space the parent offers
    Fill,
    /// Share remaining main-axis space with other weighted siblings
    Weight(f32),
    /// Size to the content along a parent's main axis, match the extent the parent
    /// shares with siblings along its cross axis
    MatchExtent,
}

impl Size {
    /// Create a fixed size in logical pixels
    pub const fn px(pixels: f32) -> Self {
        Self::Fixed(pixels)
    }

    /// Try to resolve the size against the parent's extent.
    ///
    /// Returns `None` for sizes that need intrinsic measurement or sibling context.
    pub fn try_resolve(&self, parent_extent: f32) -> Option<f32> {
        match self {
            Size::Fixed(px) => Some(*px),
            Size::Fill => Some(parent_extent),
            Size::FitContent | Size::Weight(_) | Size::MatchExtent => None,
        }
    }

    /// Check if this size is Fill
    pub const fn is_fill(&self) -> bool {
        matches!(self, Size::Fill)
    }

    /// Weight of a weighted size
    pub const fn weight(&self) -> Option<f32> {
        match self {
            Size::Weight(weight) => Some(*weight),
            _ => None,
        }
    }

    /// Fixed extent, if any
    pub const fn fixed(&self) -> Option<f32> {
        match self {
            Size::Fixed(px) => Some(*px),
            _ => None,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::FitContent
    }
}

/// Layout mode for arranging children
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Children are arranged left to right
    Horizontal,
    /// Children are arranged top to bottom
    Vertical,
    /// Children overlap
    Stack,
}

impl Layout {
    /// Main axis of a linear layout
    pub const fn main_axis(self) -> Option<Axis> {
        match self {
            Layout::Horizontal => Some(Axis::Horizontal),
            Layout::Vertical => Some(Axis::Vertical),
            Layout::Stack => None,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::Vertical
    }
}

impl From<Axis> for Layout {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Layout::Horizontal,
            Axis::Vertical => Layout::Vertical,
        }
    }
}

/// Main-axis arrangement of a row or column
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arrangement {
    /// Pack children and center the packed block; per-item spacing comes from the items
    Center,
    /// Start-aligned with a fixed gap between children
    SpacedBy(f32),
}

impl Arrangement {
    /// Gap inserted between adjacent children
    pub fn gap(&self) -> f32 {
        match self {
            Arrangement::Center => 0.0,
            Arrangement::SpacedBy(spacing) => spacing.max(0.0),
        }
    }

    /// Offset of the packed block given the unused main-axis space
    pub fn leading_offset(&self, free: f32) -> f32 {
        match self {
            Arrangement::Center => free.max(0.0) / 2.0,
            Arrangement::SpacedBy(_) => 0.0,
        }
    }
}

impl Default for Arrangement {
    fn default() -> Self {
        Self::Center
    }
}

/// Cross-axis alignment of children (both axes for overlapping stacks)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

impl Alignment {
    /// Offset for a child given the unused space
    pub fn offset(&self, free: f32) -> f32 {
        let free = free.max(0.0);
        match self {
            Alignment::Start => 0.0,
            Alignment::Center => free / 2.0,
            Alignment::End => free,
        }
    }
}

/// Computed layout information after tree traversal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedLayout {
    /// Absolute position
    pub rect: Rect,
}

impl ComputedLayout {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// Spacing/padding around content
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    pub const ZERO: Self = Self::all(0.0);

    /// Create spacing with all sides equal
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create spacing with symmetric horizontal and vertical values (CSS-style)
    ///
    /// ```
    /// # use weave::Spacing;
    /// let spacing = Spacing::symmetric(10.0, 20.0);
    /// assert_eq!(spacing.left, 10.0);
    /// assert_eq!(spacing.top, 20.0);
    /// ```
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create spacing from individual top, right, bottom, left values (CSS-style)
    pub const fn trbl(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn top(top: f32) -> Self {
        Self::trbl(top, 0.0, 0.0, 0.0)
    }

    pub const fn left(left: f32) -> Self {
        Self::trbl(0.0, 0.0, 0.0, left)
    }

    /// Spacing before the content along an axis (top for vertical, left for horizontal)
    pub const fn leading(axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::left(value),
            Axis::Vertical => Self::top(value),
        }
    }

    pub const fn get_vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub const fn get_horizontal(&self) -> f32 {
        self.right + self.left
    }

    /// Total spacing along an axis
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.get_horizontal(),
            Axis::Vertical => self.get_vertical(),
        }
    }

    /// Negative insets are not representable by the layout; clamp them to zero
    pub fn clamped(self) -> Self {
        Self {
            top: self.top.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
            left: self.left.max(0.0),
        }
    }
}

impl std::ops::Add for Spacing {
    type Output = Spacing;

    fn add(self, other: Spacing) -> Spacing {
        Spacing {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}
