//! A plain tabular listing of records, one row per line, paginated over as many
//! pages as needed.

use crate::colour::colours;
use crate::document::Document;
use crate::font::Font;
use crate::info::Info;
use crate::label::{format_timestamp, LabelFonts};
use crate::layout::Margins;
use crate::page::*;
use crate::pagesize::{self, PageSize};
use crate::units::{Mm, Pt};
use crate::LabelError;
use chrono::Local;
use id_arena::Id;
use std::path::Path;

/// One line of the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    pub id: i64,
    pub order_id: String,
    pub unit_name: String,
    pub file_name: String,
    pub quantity: u32,
}

/// Text and geometry of the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub page_size: PageSize,
    pub margin: Pt,
    pub fonts: LabelFonts,
    pub title: String,
    pub generated_caption: String,
    pub total_caption: String,
    /// Headers of the ID, order, unit, file and quantity columns
    pub headers: [String; 5],
    pub column_widths: [Pt; 5],
    /// Longest unit name printed before it is cut and marked
    pub unit_max_chars: usize,
    /// Longest file name printed before it is cut and marked
    pub file_max_chars: usize,
    pub truncation_marker: String,
    pub timestamp_format: String,
    pub title_size: Pt,
    pub caption_size: Pt,
    pub header_size: Pt,
    pub row_size: Pt,
    /// Distance between consecutive rows
    pub line_height: Pt,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            page_size: pagesize::A4,
            margin: Mm(20.0).into(),
            fonts: LabelFonts::default(),
            title: "Records report".into(),
            generated_caption: "Generated at ".into(),
            total_caption: "Total records: ".into(),
            headers: [
                "ID".into(),
                "OP".into(),
                "Unit".into(),
                "File".into(),
                "Qty".into(),
            ],
            column_widths: [Pt(30.0), Pt(80.0), Pt(120.0), Pt(200.0), Pt(50.0)],
            unit_max_chars: 15,
            file_max_chars: 25,
            truncation_marker: "...".into(),
            timestamp_format: "%d/%m/%Y %H:%M".into(),
            title_size: Pt(14.0),
            caption_size: Pt(8.0),
            header_size: Pt(10.0),
            row_size: Pt(9.0),
            line_height: Pt(15.0),
        }
    }
}

/// Space below the cursor a row needs before a new page is started
const BOTTOM_RESERVE: Pt = Pt(30.0);
const TITLE_TO_CAPTION: Pt = Pt(20.0);
const TITLE_TO_HEADERS: Pt = Pt(50.0);
const HEADERS_TO_RULE: Pt = Pt(20.0);
const RULE_TO_ROWS: Pt = Pt(10.0);
const ROWS_TO_TOTAL: Pt = Pt(20.0);

/// Keep at most `max` characters of `text`, marking the cut
fn clip_chars(text: &str, max: usize, marker: &str) -> String {
    if text.chars().count() > max {
        let mut clipped: String = text.chars().take(max).collect();
        clipped.push_str(marker);
        clipped
    } else {
        text.to_string()
    }
}

struct ReportWriter<'c> {
    config: &'c ReportConfig,
    regular: Id<Font>,
    bold: Id<Font>,
    columns: [Pt; 5],
    pages: Vec<Page>,
    y: Pt,
}

impl<'c> ReportWriter<'c> {
    fn top(&self) -> Pt {
        self.config.page_size.1 - self.config.margin
    }

    fn blank_page(&self) -> Page {
        Page::new(self.config.page_size, Some(Margins::all(self.config.margin)))
    }

    fn page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            let page = self.blank_page();
            self.pages.push(page);
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text(&mut self, text: String, x: Pt, font: Id<Font>, size: Pt) {
        let y = self.y;
        self.page().add_span(SpanLayout {
            text,
            font: SpanFont { id: font, size },
            colour: colours::BLACK,
            coords: (x, y),
        });
    }

    fn new_page(&mut self) {
        let page = self.blank_page();
        self.pages.push(page);
        self.y = self.top();
        log::debug!("report continues on page {}", self.pages.len());
    }

    fn heading(&mut self, generated_at: &str) {
        let config = self.config;
        self.y = self.top();
        self.text(config.title.clone(), config.margin, self.bold, config.title_size);
        self.y -= TITLE_TO_CAPTION;
        self.text(
            format!("{}{}", config.generated_caption, generated_at),
            config.margin,
            self.regular,
            config.caption_size,
        );
        self.y = self.top() - TITLE_TO_HEADERS;
    }

    fn column_headers(&mut self) {
        let config = self.config;
        for (i, header) in config.headers.iter().enumerate() {
            self.text(header.clone(), self.columns[i], self.bold, config.header_size);
        }
        self.y -= HEADERS_TO_RULE;

        let table_width: Pt = config.column_widths.iter().copied().sum();
        let y = self.y;
        self.page().add_line(LineLayout {
            from: (config.margin, y),
            to: (config.margin + table_width, y),
            colour: colours::BLACK,
            width: Pt(0.5),
        });
        self.y -= RULE_TO_ROWS;
    }

    fn row(&mut self, row: &ReportRow) {
        let config = self.config;
        if self.y < config.margin + BOTTOM_RESERVE {
            self.new_page();
            self.column_headers();
        }

        let marker = config.truncation_marker.as_str();
        let cells = [
            row.id.to_string(),
            row.order_id.clone(),
            clip_chars(&row.unit_name, config.unit_max_chars, marker),
            clip_chars(&row.file_name, config.file_max_chars, marker),
            row.quantity.to_string(),
        ];
        for (i, cell) in cells.into_iter().enumerate() {
            self.text(cell, self.columns[i], self.regular, config.row_size);
        }
        self.y -= config.line_height;
    }

    fn total(&mut self, count: usize) {
        let config = self.config;
        self.y -= ROWS_TO_TOTAL;
        if self.y < config.margin {
            self.new_page();
        }
        self.text(
            format!("{}{}", config.total_caption, count),
            config.margin,
            self.bold,
            config.header_size,
        );
    }
}

/// Lay `rows` out as a table, starting a new page (with repeated column
/// headers) whenever the current one fills up
pub fn generate_report(rows: &[ReportRow], config: &ReportConfig) -> Result<Document, LabelError> {
    if rows.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    let now = Local::now();
    let generated_at = format_timestamp(&config.timestamp_format, &now)?;

    let mut doc = Document::default();
    let regular = doc.add_font(config.fonts.regular.load()?);
    let bold = doc.add_font(config.fonts.bold.load()?);

    let mut columns = [config.margin; 5];
    for i in 1..columns.len() {
        columns[i] = columns[i - 1] + config.column_widths[i - 1];
    }

    let mut writer = ReportWriter {
        config,
        regular,
        bold,
        columns,
        pages: Vec::new(),
        y: Pt(0.0),
    };
    writer.heading(&generated_at);
    writer.column_headers();
    for row in rows {
        writer.row(row);
    }
    writer.total(rows.len());

    let page_count = writer.pages.len();
    for page in writer.pages {
        doc.add_page(page);
    }

    let mut info = Info::new();
    info.title(config.title.clone()).created(now);
    doc.set_info(info);

    log::info!("report of {} rows on {} pages", rows.len(), page_count);
    Ok(doc)
}

/// Build the report and save it at `output`. Nothing is written if the report
/// could not be built.
pub fn generate_report_to_path<P: AsRef<Path>>(
    rows: &[ReportRow],
    config: &ReportConfig,
    output: P,
) -> Result<(), LabelError> {
    generate_report(rows, config)?.write_to_path(output)
}
