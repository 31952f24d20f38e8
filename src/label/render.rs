use crate::colour::colours;
use crate::font::{Font, TextMeasure};
use crate::label::config::LabelLayoutConfig;
use crate::label::logo::ResolvedLogo;
use crate::label::record::LabelRecord;
use crate::layout::{baseline_offset, WrappedTextBlock};
use crate::page::*;
use crate::rect::Rect;
use crate::units::Pt;
use crate::LabelError;
use id_arena::{Arena, Id};

const BORDER_WIDTH: Pt = Pt(1.0);

/// Share of the logo block's height used for synthesized logo text
const SYNTHESIZED_TEXT_RATIO: f32 = 0.5;

/// Document ids of the two faces labels are set in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFontIds {
    pub regular: Id<Font>,
    pub bold: Id<Font>,
}

/// Draws single labels onto pages.
///
/// The renderer only borrows what it needs from the document (fonts and the
/// already-installed logo) plus the batch timestamp, so rendering one label
/// never affects the next.
pub struct LabelRenderer<'a> {
    fonts: &'a Arena<Font>,
    font_ids: LabelFontIds,
    logo: &'a ResolvedLogo,
    timestamp: &'a str,
}

impl<'a> LabelRenderer<'a> {
    pub fn new(
        fonts: &'a Arena<Font>,
        font_ids: LabelFontIds,
        logo: &'a ResolvedLogo,
        timestamp: &'a str,
    ) -> LabelRenderer<'a> {
        LabelRenderer {
            fonts,
            font_ids,
            logo,
            timestamp,
        }
    }

    fn font(&self, id: Id<Font>) -> Result<&'a Font, LabelError> {
        self.fonts
            .get(id)
            .ok_or_else(|| LabelError::Render(format!("font {} is not in the document", id.index())))
    }

    /// Draw `record` as one label whose lower-left corner sits at `origin` (PDF
    /// user space, y growing upward)
    pub fn render(
        &self,
        page: &mut Page,
        record: &LabelRecord,
        config: &LabelLayoutConfig,
        origin: (Pt, Pt),
    ) -> Result<(), LabelError> {
        let regular = self.font(self.font_ids.regular)?;
        let bold = self.font(self.font_ids.bold)?;
        let scale = &config.type_scale;
        let captions = &config.captions;
        let marker = captions.truncation_marker.as_str();

        let bounds = Rect::from_origin(origin.0, origin.1, config.label_width, config.label_height);
        page.add_shape(ShapeLayout {
            rect: bounds,
            stroke: Some((colours::BLACK, BORDER_WIDTH)),
            fill: None,
        });

        let inner = bounds.inset(config.padding);
        let logo_area = Rect {
            x1: inner.x2 - config.logo_size.0,
            y1: inner.y2 - config.logo_size.1,
            ..inner
        };
        self.draw_logo(page, &logo_area, bold);

        let width = config.available_width();
        let text_x = bounds.x1 + config.padding;
        let footer_baseline = bounds.y1 + config.padding;
        // nothing but the footer may dip below this line
        let text_floor = footer_baseline + regular.line_height(scale.small);

        let mut fields: Vec<(WrappedTextBlock, &Font)> = vec![
            (
                WrappedTextBlock::new(
                    &format!("{}{}", captions.order_id, record.order_id()),
                    self.font_ids.bold,
                    bold,
                    scale.title,
                    width,
                )
                .clipped(marker, bold, width),
                bold,
            ),
            (
                WrappedTextBlock::new(
                    &format!("{}{}", captions.unit_name, record.unit_name()),
                    self.font_ids.bold,
                    bold,
                    scale.secondary,
                    width,
                )
                .clipped(marker, bold, width),
                bold,
            ),
        ];
        if let Some(person_name) = record.person_name() {
            fields.push((
                WrappedTextBlock::new(
                    &format!("{}{}", captions.person_name, person_name),
                    self.font_ids.bold,
                    bold,
                    scale.body,
                    width,
                )
                .clipped(marker, bold, width),
                bold,
            ));
        }
        fields.push((
            WrappedTextBlock::new(
                &format!("{}{}", captions.file_name, record.file_name()),
                self.font_ids.regular,
                regular,
                scale.body,
                width,
            )
            .truncated(config.max_free_text_lines, marker, regular, width)
            .clipped(marker, regular, width),
            regular,
        ));

        // when the footer cuts text off, the last line printed carries the marker
        let mut top = bounds.y2 - config.padding;
        let mut placed: Vec<(WrappedTextBlock, &Font, Pt)> = Vec::with_capacity(fields.len());
        for (mut block, font) in fields {
            let line_height = font.line_height(block.size);
            let first_baseline = top + baseline_offset(font, block.size);
            let floor = text_floor - font.descent(block.size);
            let fits = block.lines_above(first_baseline, line_height, floor);
            if fits < block.lines.len() {
                log::debug!(
                    "label {}: fields reached the footer, remaining text dropped",
                    record.order_id()
                );
                if fits > 0 {
                    block = block.truncated(fits, marker, font, width);
                    placed.push((block, font, first_baseline));
                } else if let Some((previous, previous_font, _)) = placed.last_mut() {
                    previous.mark_continued(marker, *previous_font, width);
                }
                break;
            }
            top -= line_height * fits as f32;
            placed.push((block, font, first_baseline));
        }
        for (block, font, first_baseline) in placed.iter() {
            block.layout(
                page,
                (text_x, *first_baseline),
                font.line_height(block.size),
                text_floor - font.descent(block.size),
                colours::BLACK,
            );
        }

        let quantity = format!("{}{}", captions.quantity, record.quantity());
        let quantity_width = bold.text_width(&quantity, scale.small);
        page.add_span(SpanLayout {
            text: quantity,
            font: SpanFont {
                id: self.font_ids.bold,
                size: scale.small,
            },
            colour: colours::BLACK,
            coords: (bounds.x2 - config.padding - quantity_width, footer_baseline),
        });
        page.add_span(SpanLayout {
            text: self.timestamp.to_string(),
            font: SpanFont {
                id: self.font_ids.regular,
                size: scale.small,
            },
            colour: colours::BLACK,
            coords: (text_x, footer_baseline),
        });

        Ok(())
    }

    fn draw_logo(&self, page: &mut Page, area: &Rect, bold: &Font) {
        match self.logo {
            ResolvedLogo::Image { id, aspect_ratio } => {
                // fit inside the area keeping proportions, anchored top-right
                let (w, h) = if *aspect_ratio > area.width() / area.height() {
                    (area.width(), area.width() / *aspect_ratio)
                } else {
                    (area.height() * *aspect_ratio, area.height())
                };
                page.add_image(ImageLayout {
                    image_id: *id,
                    position: Rect {
                        x1: area.x2 - w,
                        y1: area.y2 - h,
                        x2: area.x2,
                        y2: area.y2,
                    },
                });
            }
            ResolvedLogo::Synthesized {
                text,
                fill,
                text_colour,
            } => {
                page.add_shape(ShapeLayout {
                    rect: *area,
                    stroke: None,
                    fill: Some(*fill),
                });

                let mut size = area.height() * SYNTHESIZED_TEXT_RATIO;
                let room = area.width() * 0.9;
                let natural = bold.text_width(text, size);
                if natural > room {
                    size = size * (room / natural);
                }
                let text_width = bold.text_width(text, size);
                let centre_y = area.y1 + area.height() * 0.5;
                page.add_span(SpanLayout {
                    text: text.clone(),
                    font: SpanFont {
                        id: self.font_ids.bold,
                        size,
                    },
                    colour: *text_colour,
                    coords: (
                        area.x1 + (area.width() - text_width) * 0.5,
                        centre_y - (bold.ascent(size) + bold.descent(size)) * 0.5,
                    ),
                });
            }
        }
    }
}
