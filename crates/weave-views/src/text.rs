use weave::{Color, Leaf, TextContent, View};

/// A run of text, sized to its content
///
/// Text never negotiates fills. It inherits the environment's foreground color unless
/// given one.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    content: TextContent,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: TextContent::new(text),
        }
    }

    pub fn font_size(mut self, font_size: f32) -> Self {
        self.content = self.content.with_font_size(font_size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.content = self.content.with_color(color);
        self
    }

    pub fn line_height(mut self, multiplier: f32) -> Self {
        self.content = self.content.with_line_height_multiplier(multiplier);
        self
    }
}

impl From<Text> for View {
    fn from(text: Text) -> Self {
        View::Leaf(Leaf::text(text.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave::{Content, Runtime};

    #[test]
    fn test_text_inherits_foreground_color() {
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let red = Color::rgb(1.0, 0.0, 0.0);
        let view = View::group([Text::new("a").into(), Text::new("b").color(red).into()])
            .foreground_color(blue);
        let frame = Runtime::new().render(&view);

        let colors: Vec<Option<Color>> = frame
            .nodes
            .iter()
            .map(|node| match node.content() {
                Some(Content::Text(text)) => text.color,
                None => None,
            })
            .collect();
        assert_eq!(colors, [Some(blue), Some(red)]);
    }

    #[test]
    fn test_text_is_text() {
        let view: View = Text::new("a").font_size(20.0).line_height(1.0).into();
        assert!(view.is_text());
    }
}
