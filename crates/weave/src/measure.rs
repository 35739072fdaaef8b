//! Intrinsic content measurement for layout resolution.
//!
//! This module provides a backend-agnostic trait for measuring intrinsic content size
//! (e.g., text metrics) during layout. It lets `Size::FitContent` and `Size::MatchExtent`
//! resolve to actual dimensions.

use crate::content::TextContent;
use crate::layout::Axis;

/// Request to measure the intrinsic size of text (single or multi-line, unwrapped).
#[derive(Debug, Clone)]
pub struct MeasureTextRequest<'a> {
    pub text: &'a str,
    pub font_size: f32,
    /// Line height as a multiplier of font size
    pub line_height_multiplier: f32,
}

impl<'a> MeasureTextRequest<'a> {
    pub fn from_text_content(content: &'a TextContent) -> Self {
        Self {
            text: &content.text,
            font_size: content.font_size,
            line_height_multiplier: content.line_height_multiplier,
        }
    }
}

/// Intrinsic size measurement result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntrinsicSize {
    pub width: f32,
    pub height: f32,
}

impl IntrinsicSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Extent along an axis
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Component-wise maximum
    pub fn max(self, other: IntrinsicSize) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// Backend-agnostic content measurement.
///
/// Implementors provide intrinsic size information for content types (primarily text).
/// Core layout does not depend on any text engine; a headless fixed-advance
/// implementation is provided as [`MonospaceMeasurer`].
pub trait ContentMeasurer {
    /// Measure the intrinsic size of a run of text, excluding padding.
    fn measure_text(&mut self, request: MeasureTextRequest<'_>) -> IntrinsicSize;
}

/// Measures text as if every glyph had the same advance.
///
/// Good enough for headless layout and deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    /// Glyph advance as a fraction of the font size
    pub advance: f32,
}

impl MonospaceMeasurer {
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ContentMeasurer for MonospaceMeasurer {
    fn measure_text(&mut self, request: MeasureTextRequest<'_>) -> IntrinsicSize {
        let glyph_width = request.font_size * self.advance;
        let line_height = request.font_size * request.line_height_multiplier;

        let mut width = 0.0f32;
        let mut lines = 0usize;
        for line in request.text.split('\n') {
            width = width.max(line.chars().count() as f32 * glyph_width);
            lines += 1;
        }

        IntrinsicSize::new(width, lines as f32 * line_height)
    }
}
