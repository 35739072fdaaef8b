use crate::content::Content;
use crate::node::Node;
use std::fmt::Write;

/// What to include when dumping a node tree as text
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugOptions {
    /// Show the requested width/height of each node
    pub show_sizes: bool,
    /// Show computed rects (nodes without layout print nothing)
    pub show_rects: bool,
    /// Show padding when non-zero
    pub show_padding: bool,
    /// Show text content
    pub show_content: bool,
}

impl DebugOptions {
    /// Create debug options with nothing enabled
    pub const fn none() -> Self {
        Self {
            show_sizes: false,
            show_rects: false,
            show_padding: false,
            show_content: false,
        }
    }

    /// Create debug options with everything enabled
    pub const fn all() -> Self {
        Self {
            show_sizes: true,
            show_rects: true,
            show_padding: true,
            show_content: true,
        }
    }

    pub const fn with_sizes(mut self, enabled: bool) -> Self {
        self.show_sizes = enabled;
        self
    }

    pub const fn with_rects(mut self, enabled: bool) -> Self {
        self.show_rects = enabled;
        self
    }

    pub const fn with_padding(mut self, enabled: bool) -> Self {
        self.show_padding = enabled;
        self
    }

    pub const fn with_content(mut self, enabled: bool) -> Self {
        self.show_content = enabled;
        self
    }

    /// Check if anything beyond the ids is printed
    pub const fn is_enabled(&self) -> bool {
        self.show_sizes || self.show_rects || self.show_padding || self.show_content
    }
}

impl Node {
    /// Indented text dump of this subtree, one node per line
    pub fn dump(&self, options: DebugOptions) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0, options);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize, options: DebugOptions) {
        let id = self.id().map(|id| id.as_str()).unwrap_or("<anonymous>");
        // Writing to a String cannot fail
        let _ = write!(out, "{:indent$}{}", "", id, indent = depth * 2);
        if options.show_sizes {
            let _ = write!(out, " [{:?} x {:?}]", self.width(), self.height());
        }
        if options.show_padding && self.padding() != Default::default() {
            let padding = self.padding();
            let _ = write!(
                out,
                " pad({} {} {} {})",
                padding.top, padding.right, padding.bottom, padding.left
            );
        }
        if options.show_rects {
            if let Some(rect) = self.rect() {
                let _ = write!(
                    out,
                    " @({}, {}) {}x{}",
                    rect.min[0],
                    rect.min[1],
                    rect.width(),
                    rect.height()
                );
            }
        }
        if options.show_content {
            if let Some(Content::Text(text)) = self.content() {
                let _ = write!(out, " {:?}", text.text);
            }
        }
        out.push('\n');

        for child in self.children() {
            child.dump_into(out, depth + 1, options);
        }
    }
}
