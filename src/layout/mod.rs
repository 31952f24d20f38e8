//! Text layout utilities for positioning content on pages.
//!
//! Layout works purely in terms of [`TextMeasure`](crate::TextMeasure), so the
//! same wrapping rules apply to embedded TrueType fonts and to the standard
//! Helvetica faces.
//!
//! # Example
//!
//! ```
//! use pdf_labels::{Font, StandardFont, Pt};
//! use pdf_labels::layout::wrap_text;
//!
//! let font = Font::standard(StandardFont::Helvetica);
//! let lines = wrap_text("Material Didatico Completo", &font, Pt(8.0), Pt(60.0));
//! assert!(lines.len() > 1);
//! assert_eq!(lines.join(" "), "Material Didatico Completo");
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;

#[cfg(test)]
pub(crate) mod testing {
    use crate::font::TextMeasure;
    use crate::units::Pt;

    /// Every character advances by the same amount regardless of size
    pub(crate) struct FixedAdvance(pub f32);

    impl TextMeasure for FixedAdvance {
        fn text_width(&self, text: &str, _size: Pt) -> Pt {
            Pt(text.chars().count() as f32 * self.0)
        }

        fn ascent(&self, size: Pt) -> Pt {
            size * 0.8
        }

        fn descent(&self, size: Pt) -> Pt {
            size * -0.2
        }

        fn line_height(&self, size: Pt) -> Pt {
            size * 1.2
        }
    }
}
