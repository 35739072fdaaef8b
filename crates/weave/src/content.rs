use crate::color::Color;

/// Content that can be displayed in a node
///
/// Content nodes are leaf nodes that cannot have children.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Text content with styling
    Text(TextContent),
}

/// Text content with styling
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    pub text: String,
    pub font_size: f32,
    /// Text color; `None` inherits the environment's foreground color
    pub color: Option<Color>,
    /// Line height as a multiplier of font size
    pub line_height_multiplier: f32,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 16.0,
            color: None,
            line_height_multiplier: 1.2,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_line_height_multiplier(mut self, multiplier: f32) -> Self {
        self.line_height_multiplier = multiplier;
        self
    }
}
