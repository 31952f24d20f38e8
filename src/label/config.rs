use crate::font::{Font, StandardFont};
use crate::label::tile::GridMetrics;
use crate::pagesize::{self, PageSize};
use crate::units::{Mm, Pt};
use crate::LabelError;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Where one of the label fonts comes from
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    /// A standard PDF face; nothing is embedded
    Standard(StandardFont),
    /// A TrueType file, embedded in the document
    TrueType(PathBuf),
}

impl FontSource {
    pub(crate) fn load(&self) -> Result<Font, LabelError> {
        match self {
            FontSource::Standard(font) => Ok(Font::standard(*font)),
            FontSource::TrueType(path) => Font::load_from_disk(path),
        }
    }
}

/// The regular and bold faces every label is set in
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFonts {
    pub regular: FontSource,
    pub bold: FontSource,
}

impl Default for LabelFonts {
    fn default() -> Self {
        LabelFonts {
            regular: FontSource::Standard(StandardFont::Helvetica),
            bold: FontSource::Standard(StandardFont::HelveticaBold),
        }
    }
}

/// Font sizes for the different tiers of text on a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeScale {
    /// The order id
    pub title: Pt,
    /// The unit name
    pub secondary: Pt,
    /// Person and file name
    pub body: Pt,
    /// Quantity and timestamp in the footer
    pub small: Pt,
}

impl Default for TypeScale {
    fn default() -> Self {
        TypeScale {
            title: Pt(11.0),
            secondary: Pt(9.0),
            body: Pt(8.0),
            small: Pt(6.0),
        }
    }
}

/// The captions printed before each field, and the marker appended to text
/// that had to be cut short
#[derive(Debug, Clone, PartialEq)]
pub struct Captions {
    pub order_id: String,
    pub unit_name: String,
    pub person_name: String,
    pub file_name: String,
    pub quantity: String,
    pub truncation_marker: String,
}

impl Default for Captions {
    fn default() -> Self {
        Captions {
            order_id: "OP: ".into(),
            unit_name: "Unit: ".into(),
            person_name: "Name: ".into(),
            file_name: "File: ".into(),
            quantity: "Qty: ".into(),
            truncation_marker: "...".into(),
        }
    }
}

/// Everything that decides how labels are laid out. Passed by reference into
/// every render and tiling call; builder methods return modified copies.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayoutConfig {
    pub label_width: Pt,
    pub label_height: Pt,
    pub page_width: Pt,
    pub page_height: Pt,
    /// One label filling the whole page, for label printers
    pub single_per_page: bool,
    /// Space between the page edge and the label grid
    pub margin: Pt,
    /// Space between the label border and its contents
    pub padding: Pt,
    /// (width, height) of the logo region in the top-right corner
    pub logo_size: (Pt, Pt),
    /// Horizontal space kept free between text and the logo
    pub logo_gap: Pt,
    pub fonts: LabelFonts,
    pub type_scale: TypeScale,
    pub captions: Captions,
    /// Most lines the file name may take up
    pub max_free_text_lines: usize,
    /// chrono format string for the generation timestamp
    pub timestamp_format: String,
}

impl Default for LabelLayoutConfig {
    /// 80×50 mm labels tiled on A4 sheets
    fn default() -> Self {
        LabelLayoutConfig {
            label_width: Mm(80.0).into(),
            label_height: Mm(50.0).into(),
            page_width: pagesize::A4.0,
            page_height: pagesize::A4.1,
            single_per_page: false,
            margin: Mm(10.0).into(),
            padding: Mm(3.0).into(),
            logo_size: (Mm(15.0).into(), Mm(8.0).into()),
            logo_gap: Mm(2.0).into(),
            fonts: LabelFonts::default(),
            type_scale: TypeScale::default(),
            captions: Captions::default(),
            max_free_text_lines: 3,
            timestamp_format: "%d/%m/%Y %H:%M".into(),
        }
    }
}

/// Label and page sizes in millimetres along with the grid they produce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutDimensions {
    pub label_width_mm: f32,
    pub label_height_mm: f32,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub labels_per_row: usize,
    pub labels_per_col: usize,
    pub labels_per_page: usize,
}

impl LabelLayoutConfig {
    /// One label per page, the label being exactly the page
    pub fn single_per_page(size: PageSize) -> LabelLayoutConfig {
        LabelLayoutConfig {
            label_width: size.0,
            label_height: size.1,
            page_width: size.0,
            page_height: size.1,
            single_per_page: true,
            margin: Pt(0.0),
            ..LabelLayoutConfig::default()
        }
    }

    /// 100×50 mm media for Zebra-style label printers
    pub fn zebra() -> LabelLayoutConfig {
        Self::single_per_page(pagesize::ZEBRA_100X50)
    }

    pub fn with_label_size<W: Into<Pt>, H: Into<Pt>>(mut self, width: W, height: H) -> Self {
        self.label_width = width.into();
        self.label_height = height.into();
        if self.single_per_page {
            self.page_width = self.label_width;
            self.page_height = self.label_height;
        }
        self
    }

    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_width = size.0;
        self.page_height = size.1;
        if self.single_per_page {
            self.label_width = size.0;
            self.label_height = size.1;
        }
        self
    }

    pub fn with_margin<D: Into<Pt>>(mut self, margin: D) -> Self {
        self.margin = margin.into();
        self
    }

    pub fn with_padding<D: Into<Pt>>(mut self, padding: D) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn with_logo_size<W: Into<Pt>, H: Into<Pt>>(mut self, width: W, height: H) -> Self {
        self.logo_size = (width.into(), height.into());
        self
    }

    pub fn with_logo_gap<D: Into<Pt>>(mut self, gap: D) -> Self {
        self.logo_gap = gap.into();
        self
    }

    pub fn with_fonts(mut self, fonts: LabelFonts) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_type_scale(mut self, type_scale: TypeScale) -> Self {
        self.type_scale = type_scale;
        self
    }

    pub fn with_captions(mut self, captions: Captions) -> Self {
        self.captions = captions;
        self
    }

    pub fn with_max_free_text_lines(mut self, lines: usize) -> Self {
        self.max_free_text_lines = lines;
        self
    }

    pub fn with_timestamp_format<S: Into<String>>(mut self, format: S) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Width left for text once padding and the logo region are taken out:
    /// `label_width − 2×padding − logo_width − logo_gap`
    pub fn available_width(&self) -> Pt {
        self.label_width - self.padding * 2.0 - self.logo_size.0 - self.logo_gap
    }

    /// Check that the configuration can produce at least one label with room
    /// for text
    pub fn validate(&self) -> Result<(), LabelError> {
        let positive = [
            ("label width", self.label_width),
            ("label height", self.label_height),
            ("page width", self.page_width),
            ("page height", self.page_height),
        ];
        for (what, value) in positive {
            if !(value.0 > 0.0) {
                return Err(LabelError::Configuration(format!(
                    "{what} must be positive, got {value}pt"
                )));
            }
        }
        if self.margin.0 < 0.0 || self.padding.0 < 0.0 || self.logo_gap.0 < 0.0 {
            return Err(LabelError::Configuration(
                "margin, padding and logo gap cannot be negative".into(),
            ));
        }
        if self.single_per_page
            && (self.label_width != self.page_width || self.label_height != self.page_height)
        {
            return Err(LabelError::Configuration(
                "a single label per page must be the size of the page".into(),
            ));
        }
        if self.available_width().0 <= 0.0 {
            return Err(LabelError::Configuration(format!(
                "padding and logo leave no room for text on a {}pt wide label",
                self.label_width
            )));
        }
        if self.padding * 2.0 >= self.label_height {
            return Err(LabelError::Configuration(
                "padding leaves no room for text".into(),
            ));
        }
        self.format_timestamp(&chrono::Local::now())?;
        GridMetrics::for_config(self)?;
        Ok(())
    }

    /// Label grid summary, in millimetres
    pub fn dimensions(&self) -> Result<LayoutDimensions, LabelError> {
        let grid = GridMetrics::for_config(self)?;
        Ok(LayoutDimensions {
            label_width_mm: self.label_width.to_mm(),
            label_height_mm: self.label_height.to_mm(),
            page_width_mm: self.page_width.to_mm(),
            page_height_mm: self.page_height.to_mm(),
            labels_per_row: grid.labels_per_row,
            labels_per_col: grid.labels_per_col,
            labels_per_page: grid.labels_per_page,
        })
    }

    pub(crate) fn format_timestamp<Tz>(
        &self,
        when: &chrono::DateTime<Tz>,
    ) -> Result<String, LabelError>
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format_timestamp(&self.timestamp_format, when)
    }
}

/// Render `when` with a chrono format string. Invalid format strings are
/// reported instead of panicking.
pub(crate) fn format_timestamp<Tz>(
    format: &str,
    when: &chrono::DateTime<Tz>,
) -> Result<String, LabelError>
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", when.format(format))
        .map_err(|_| LabelError::Configuration(format!("invalid timestamp format {format:?}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_80x50_on_a4() {
        let config = LabelLayoutConfig::default();
        assert!((config.label_width.to_mm() - 80.0).abs() < 0.001);
        assert!((config.label_height.to_mm() - 50.0).abs() < 0.001);
        assert!(!config.single_per_page);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dimensions_report_the_grid() {
        let dims = LabelLayoutConfig::default().dimensions().unwrap();
        assert_eq!(dims.labels_per_row, 2);
        assert_eq!(dims.labels_per_col, 5);
        assert_eq!(dims.labels_per_page, 10);
        assert!((dims.page_width_mm - 210.0).abs() < 0.01);
        assert!((dims.page_height_mm - 297.0).abs() < 0.01);
    }

    #[test]
    fn zebra_label_is_the_page() {
        let config = LabelLayoutConfig::zebra();
        assert!(config.single_per_page);
        assert_eq!(config.label_width, config.page_width);
        assert_eq!(config.label_height, config.page_height);
        assert!((config.label_width.to_mm() - 100.0).abs() < 0.001);
        assert!(config.validate().is_ok());

        let resized = config.with_label_size(Mm(100.0), Mm(150.0));
        assert_eq!(resized.page_height, resized.label_height);
    }

    #[test]
    fn available_width_excludes_padding_and_logo() {
        let config = LabelLayoutConfig::default();
        let expected = Mm(80.0 - 6.0 - 15.0 - 2.0);
        assert!((config.available_width().to_mm() - expected.0).abs() < 0.001);
    }

    #[test]
    fn rejects_a_logo_wider_than_the_label() {
        let config = LabelLayoutConfig::default().with_logo_size(Mm(90.0), Mm(8.0));
        assert!(matches!(
            config.validate(),
            Err(LabelError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_labels_larger_than_the_page() {
        let config = LabelLayoutConfig::default().with_label_size(Mm(300.0), Mm(50.0));
        assert!(matches!(
            config.validate(),
            Err(LabelError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_an_invalid_timestamp_format() {
        let config = LabelLayoutConfig::default().with_timestamp_format("%Q");
        assert!(matches!(
            config.validate(),
            Err(LabelError::Configuration(_))
        ));
    }

    #[test]
    fn builders_return_modified_copies() {
        let base = LabelLayoutConfig::default();
        let tweaked = base.clone().with_padding(Mm(5.0)).with_max_free_text_lines(2);
        assert_ne!(base, tweaked);
        assert_eq!(base.max_free_text_lines, 3);
    }

    #[test]
    fn single_page_media_follows_the_page_size() {
        let config = LabelLayoutConfig::zebra().with_page_size((Mm(60.0).into(), Mm(40.0).into()));
        assert_eq!(config.label_width, config.page_width);
        assert_eq!(config.label_height, config.page_height);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn logo_gap_narrows_the_text_column() {
        let base = LabelLayoutConfig::default();
        let wider_gap = base.clone().with_logo_gap(Mm(4.0));
        let narrowed = base.available_width() - wider_gap.available_width();
        assert!((narrowed.0 - Pt::from(Mm(2.0)).0).abs() < 1e-3);
    }
}
