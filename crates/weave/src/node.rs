use crate::content::Content;
use crate::layout::{Alignment, Arrangement, Axis, ComputedLayout, Layout, Size, Spacing};
use crate::measure::{ContentMeasurer, IntrinsicSize, MeasureTextRequest, MonospaceMeasurer};
use crate::primitives::Rect;

/// Identity of a rendered node or adaptive container
///
/// Ids are paths built from the position of a view in the tree (`root/vstack/1/text`),
/// so they stay stable across render passes as long as the structure does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new NodeId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node of the retained layout tree produced by a render pass
///
/// Nodes can be either:
/// - Container nodes: have children arranged by `layout_direction`
/// - Content nodes: have content (text) and cannot have children
/// - Plain leaves: neither, sized by `intrinsic_size` (spacers, dividers, colors)
///
/// All fields are private - use the builder pattern methods (`with_*`) to configure nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identity path of the view that emitted this node
    id: Option<NodeId>,
    /// Width of the node
    width: Size,
    /// Height of the node
    height: Size,
    /// Minimum content size for nodes without content or children
    intrinsic_size: IntrinsicSize,
    /// Padding inside the node
    padding: Spacing,
    /// Layout mode for children
    layout_direction: Layout,
    /// Main-axis arrangement for linear layouts
    arrangement: Arrangement,
    /// Cross-axis alignment (both axes for `Layout::Stack`)
    alignment: Alignment,
    /// Opacity of this node and all its children
    opacity: f32,
    /// Whether the subtree was rendered with the environment disabled
    disabled: bool,
    /// Optional content - content nodes cannot have children
    content: Option<Content>,
    /// Child nodes (not allowed if content is Some)
    children: Vec<Node>,
    /// Computed layout (filled during layout pass)
    computed: Option<ComputedLayout>,
}

impl Node {
    /// Create a new node with default settings
    pub fn new() -> Self {
        Self {
            id: None,
            width: Size::default(),
            height: Size::default(),
            intrinsic_size: IntrinsicSize::zero(),
            padding: Spacing::ZERO,
            layout_direction: Layout::default(),
            arrangement: Arrangement::default(),
            alignment: Alignment::default(),
            opacity: 1.0,
            disabled: false,
            content: None,
            children: Vec::new(),
            computed: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    /// Set the size along one axis
    pub fn with_size_along(self, axis: Axis, size: Size) -> Self {
        match axis {
            Axis::Horizontal => self.with_width(size),
            Axis::Vertical => self.with_height(size),
        }
    }

    pub fn with_intrinsic_size(mut self, size: IntrinsicSize) -> Self {
        self.intrinsic_size = size;
        self
    }

    /// Set the padding; negative insets are clamped to zero
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding.clamped();
        self
    }

    pub fn with_layout_direction(mut self, direction: Layout) -> Self {
        self.layout_direction = direction;
        self
    }

    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the opacity of this node and all its children (0.0 = transparent, 1.0 = opaque).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the content (makes this a content node that cannot have children)
    pub fn with_content(mut self, content: Content) -> Self {
        assert!(
            self.children.is_empty(),
            "Cannot set content on a node that already has children"
        );
        self.content = Some(content);
        self
    }

    /// Add a child node
    pub fn with_child(mut self, child: Node) -> Self {
        assert!(
            self.content.is_none(),
            "Cannot add children to a content node"
        );
        self.children.push(child);
        self
    }

    /// Add multiple children
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        assert!(
            self.content.is_none(),
            "Cannot add children to a content node"
        );
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> Option<&NodeId> {
        self.id.as_ref()
    }

    pub fn width(&self) -> Size {
        self.width
    }

    pub fn height(&self) -> Size {
        self.height
    }

    /// Size along one axis
    pub fn size(&self, axis: Axis) -> Size {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn padding(&self) -> Spacing {
        self.padding
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn layout_direction(&self) -> Layout {
        self.layout_direction
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Computed rect, available after `compute_layout`
    pub fn rect(&self) -> Option<Rect> {
        self.computed.map(|computed| computed.rect)
    }

    /// Find a node in this subtree by id
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id.as_ref().is_some_and(|own| own.as_str() == id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Measure the intrinsic size of this node (content + padding).
    ///
    /// Fixed axes report their fixed extent. Every other size measures content:
    /// a node that fills still has an intrinsic size when its parent sizes itself
    /// to its children.
    pub fn measure(&self, measurer: &mut dyn ContentMeasurer) -> IntrinsicSize {
        // Short-circuit: if both dimensions are Fixed, we can return immediately
        if let (Size::Fixed(w), Size::Fixed(h)) = (self.width, self.height) {
            return IntrinsicSize::new(w, h);
        }

        let content = self.measure_content(measurer).max(self.intrinsic_size);
        let width = match self.width {
            Size::Fixed(w) => w,
            _ => content.width + self.padding.get_horizontal(),
        };
        let height = match self.height {
            Size::Fixed(h) => h,
            _ => content.height + self.padding.get_vertical(),
        };
        IntrinsicSize::new(width, height)
    }

    /// Intrinsic size of the content box: text metrics or aggregated children
    fn measure_content(&self, measurer: &mut dyn ContentMeasurer) -> IntrinsicSize {
        if let Some(Content::Text(text)) = &self.content {
            return measurer.measure_text(MeasureTextRequest::from_text_content(text));
        }
        if self.children.is_empty() {
            return IntrinsicSize::zero();
        }

        match self.layout_direction.main_axis() {
            Some(main) => {
                // Main axis: sum of children + gaps. Cross axis: widest child.
                let gap = self.arrangement.gap() * (self.children.len() - 1) as f32;
                let mut total = gap;
                let mut cross = 0.0f32;
                for child in &self.children {
                    let size = child.measure(measurer);
                    total += size.along(main);
                    cross = cross.max(size.along(main.cross()));
                }
                match main {
                    Axis::Horizontal => IntrinsicSize::new(total, cross),
                    Axis::Vertical => IntrinsicSize::new(cross, total),
                }
            }
            None => self
                .children
                .iter()
                .fold(IntrinsicSize::zero(), |acc, child| acc.max(child.measure(measurer))),
        }
    }

    /// Compute layout for this node and all children, measuring text with a
    /// [`MonospaceMeasurer`]
    ///
    /// `available_rect` is the space the root may occupy
    pub fn compute_layout(&mut self, available_rect: Rect) {
        self.compute_layout_with_measurer(available_rect, &mut MonospaceMeasurer::default());
    }

    /// Compute layout with a measurer for resolving intrinsic sizes.
    pub fn compute_layout_with_measurer(
        &mut self,
        available_rect: Rect,
        measurer: &mut dyn ContentMeasurer,
    ) {
        let intrinsic = self.measure(measurer);
        let width = resolve_root_extent(self.width, available_rect.width(), intrinsic.width);
        let height = resolve_root_extent(self.height, available_rect.height(), intrinsic.height);
        self.layout_in(
            Rect::from_min_size(available_rect.min, [width, height]),
            measurer,
        );
    }

    /// Place this node at `rect` (its border box, already resolved by the parent)
    fn layout_in(&mut self, rect: Rect, measurer: &mut dyn ContentMeasurer) {
        self.computed = Some(ComputedLayout::new(rect));
        if self.children.is_empty() {
            return;
        }

        let content = rect.inset(
            self.padding.top,
            self.padding.right,
            self.padding.bottom,
            self.padding.left,
        );
        match self.layout_direction.main_axis() {
            Some(main) => self.layout_linear(main, content, measurer),
            None => self.layout_overlay(content, measurer),
        }
    }

    /// Extent this node takes along an axis where the parent offers `available`
    /// to every child (cross axis of a row/column, both axes of an overlay)
    fn offered_extent(&self, axis: Axis, available: f32, measurer: &mut dyn ContentMeasurer) -> f32 {
        match self.size(axis) {
            Size::Fixed(px) => px.min(available),
            Size::FitContent => self.measure(measurer).along(axis).min(available),
            Size::Fill | Size::Weight(_) | Size::MatchExtent => available,
        }
    }

    fn layout_overlay(&mut self, content: Rect, measurer: &mut dyn ContentMeasurer) {
        let alignment = self.alignment;
        for child in &mut self.children {
            let width = child.offered_extent(Axis::Horizontal, content.width(), measurer);
            let height = child.offered_extent(Axis::Vertical, content.height(), measurer);
            let x = content.min[0] + alignment.offset(content.width() - width);
            let y = content.min[1] + alignment.offset(content.height() - height);
            child.layout_in(Rect::from_min_size([x, y], [width, height]), measurer);
        }
    }

    /// Row/column layout.
    ///
    /// Non-weighted children are measured first, in order, each limited to what is
    /// left; a `Fill` child takes everything that remains. Weighted children then
    /// share the rest in proportion to their weights.
    fn layout_linear(&mut self, main: Axis, content: Rect, measurer: &mut dyn ContentMeasurer) {
        let cross = main.cross();
        let gap = self.arrangement.gap();
        let total_gap = gap * self.children.len().saturating_sub(1) as f32;
        let mut remaining = (content.extent(main) - total_gap).max(0.0);

        let mut extents = vec![0.0f32; self.children.len()];
        let mut total_weight = 0.0f32;
        for (i, child) in self.children.iter().enumerate() {
            let extent = match child.size(main) {
                Size::Weight(weight) => {
                    total_weight += weight.max(0.0);
                    continue;
                }
                Size::Fixed(px) => px,
                Size::Fill => remaining,
                Size::FitContent | Size::MatchExtent => child.measure(measurer).along(main),
            };
            extents[i] = extent.min(remaining);
            remaining -= extents[i];
        }

        if total_weight > 0.0 {
            for (i, child) in self.children.iter().enumerate() {
                if let Some(weight) = child.size(main).weight() {
                    extents[i] = remaining * weight.max(0.0) / total_weight;
                }
            }
        }

        let used = extents.iter().sum::<f32>() + total_gap;
        let mut cursor =
            content.start(main) + self.arrangement.leading_offset(content.extent(main) - used);
        let alignment = self.alignment;
        for (child, extent) in self.children.iter_mut().zip(extents) {
            let cross_extent = child.offered_extent(cross, content.extent(cross), measurer);
            let cross_start =
                content.start(cross) + alignment.offset(content.extent(cross) - cross_extent);
            child.layout_in(
                Rect::from_axes(main, cursor, extent, cross_start, cross_extent),
                measurer,
            );
            cursor += extent + gap;
        }
    }
}

/// Extent of the root node: there are no siblings, so aligning means sizing to content
fn resolve_root_extent(size: Size, available: f32, intrinsic: f32) -> f32 {
    match size {
        Size::Fixed(px) => px,
        Size::FitContent | Size::MatchExtent => intrinsic.min(available),
        Size::Fill | Size::Weight(_) => available,
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TextContent;

    fn screen() -> Rect {
        Rect::from_min_size([0.0, 0.0], [200.0, 100.0])
    }

    fn block(id: &str, width: f32, height: f32) -> Node {
        Node::new()
            .with_id(id)
            .with_intrinsic_size(IntrinsicSize::new(width, height))
    }

    #[test]
    fn test_weighted_children_share_remaining_space() {
        let mut root = Node::new()
            .with_width(Size::Fill)
            .with_layout_direction(Layout::Horizontal)
            .with_children([
                block("fixed", 40.0, 10.0),
                block("a", 0.0, 10.0).with_width(Size::Weight(1.0)),
                block("b", 0.0, 10.0).with_width(Size::Weight(3.0)),
            ]);
        root.compute_layout(screen());

        assert_eq!(root.rect().unwrap().width(), 200.0);
        assert_eq!(root.find("fixed").unwrap().rect().unwrap().width(), 40.0);
        assert_eq!(root.find("a").unwrap().rect().unwrap().width(), 40.0);
        assert_eq!(root.find("b").unwrap().rect().unwrap().width(), 120.0);
    }

    #[test]
    fn test_greedy_fill_starves_later_siblings() {
        let mut root = Node::new()
            .with_width(Size::Fill)
            .with_layout_direction(Layout::Horizontal)
            .with_children([
                block("greedy", 0.0, 10.0).with_width(Size::Fill),
                block("after", 30.0, 10.0),
                block("weighted", 0.0, 10.0).with_width(Size::Weight(1.0)),
            ]);
        root.compute_layout(screen());

        assert_eq!(root.find("greedy").unwrap().rect().unwrap().width(), 200.0);
        assert_eq!(root.find("after").unwrap().rect().unwrap().width(), 0.0);
        assert_eq!(root.find("weighted").unwrap().rect().unwrap().width(), 0.0);
    }

    #[test]
    fn test_match_extent_aligns_cross_axis() {
        let mut root = Node::new()
            .with_layout_direction(Layout::Vertical)
            .with_children([
                block("wide", 80.0, 10.0),
                block("narrow", 20.0, 10.0).with_width(Size::MatchExtent),
                block("natural", 20.0, 10.0),
            ]);
        root.compute_layout(screen());

        assert_eq!(root.rect().unwrap().width(), 80.0);
        assert_eq!(root.rect().unwrap().height(), 30.0);
        assert_eq!(root.find("narrow").unwrap().rect().unwrap().width(), 80.0);
        let natural = root.find("natural").unwrap().rect().unwrap();
        assert_eq!(natural.width(), 20.0);
        // Centered on the cross axis
        assert_eq!(natural.min[0], 30.0);
    }

    #[test]
    fn test_spaced_arrangement_starts_at_leading_edge() {
        let mut root = Node::new()
            .with_height(Size::Fill)
            .with_layout_direction(Layout::Vertical)
            .with_arrangement(Arrangement::SpacedBy(5.0))
            .with_children([block("a", 10.0, 10.0), block("b", 10.0, 10.0)]);
        root.compute_layout(screen());

        assert_eq!(root.find("a").unwrap().rect().unwrap().min[1], 0.0);
        assert_eq!(root.find("b").unwrap().rect().unwrap().min[1], 15.0);
    }

    #[test]
    fn test_centered_arrangement_centers_block() {
        let mut root = Node::new()
            .with_height(Size::Fill)
            .with_layout_direction(Layout::Vertical)
            .with_children([block("a", 10.0, 10.0), block("b", 10.0, 10.0)]);
        root.compute_layout(screen());

        assert_eq!(root.find("a").unwrap().rect().unwrap().min[1], 40.0);
        assert_eq!(root.find("b").unwrap().rect().unwrap().min[1], 50.0);
    }

    #[test]
    fn test_overlay_fill_and_fit() {
        let mut root = Node::new()
            .with_layout_direction(Layout::Stack)
            .with_children([
                block("big", 60.0, 40.0),
                block("fill", 0.0, 0.0)
                    .with_width(Size::Fill)
                    .with_height(Size::Fill),
                block("small", 10.0, 10.0),
            ]);
        root.compute_layout(screen());

        assert_eq!(root.rect().unwrap().width(), 60.0);
        assert_eq!(root.find("fill").unwrap().rect().unwrap().width(), 60.0);
        assert_eq!(root.find("fill").unwrap().rect().unwrap().height(), 40.0);
        let small = root.find("small").unwrap().rect().unwrap();
        assert_eq!(small.min, [25.0, 15.0]);
    }

    #[test]
    fn test_text_measurement_and_padding() {
        let node = Node::new()
            .with_content(Content::Text(TextContent::new("abcd").with_font_size(10.0)))
            .with_padding(Spacing::all(2.0));
        let size = node.measure(&mut MonospaceMeasurer::default());
        assert_eq!(size.width, 24.0);
        assert_eq!(size.height, 16.0);
    }

    #[test]
    fn test_fixed_size_short_circuits_measurement() {
        let node = Node::new()
            .with_width(Size::px(7.0))
            .with_height(Size::px(9.0))
            .with_child(block("child", 100.0, 100.0));
        let size = node.measure(&mut MonospaceMeasurer::default());
        assert_eq!(size, IntrinsicSize::new(7.0, 9.0));
    }

    #[test]
    #[should_panic(expected = "Cannot add children to a content node")]
    fn test_content_node_rejects_children() {
        let _ = Node::new()
            .with_content(Content::Text(TextContent::new("x")))
            .with_child(Node::new());
    }
}
