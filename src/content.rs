//! Turns page contents into a PDF content stream.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{LineLayout, PageContents, ShapeLayout, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Renders page contents to the operators of a PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width(),
                    image.position.height(),
                    image.position.x1,
                    image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Shape(shape) => render_shape(&mut content, shape)?,
            PageContents::Line(line) => render_line(&mut content, line)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    current_colour.write_fill(content)?;

    let mut hex = String::new();
    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            current_colour.write_fill(content)?;
        }

        hex.clear();
        if let Some(font) = fonts.get(current_font.id) {
            font.encode_hex(&span.text, &mut hex);
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<{hex}> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_shape(content: &mut Vec<u8>, shape: &ShapeLayout) -> Result<(), std::io::Error> {
    let painting = match (shape.fill.is_some(), shape.stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        (false, true) => "S",
        (false, false) => return Ok(()),
    };

    write!(content, "q\n")?;
    if let Some(fill) = shape.fill {
        fill.write_fill(content)?;
    }
    if let Some((colour, width)) = shape.stroke {
        colour.write_stroke(content)?;
        write!(content, "{width} w\n")?;
    }
    write!(
        content,
        "{} {} {} {} re\n",
        shape.rect.x1,
        shape.rect.y1,
        shape.rect.width(),
        shape.rect.height()
    )?;
    write!(content, "{painting}\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_line(content: &mut Vec<u8>, line: &LineLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    line.colour.write_stroke(content)?;
    write!(content, "{} w\n", line.width)?;
    write!(content, "{} {} m\n", line.from.0, line.from.1)?;
    write!(content, "{} {} l\n", line.to.0, line.to.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::font::StandardFont;
    use crate::rect::Rect;
    use crate::units::Pt;

    #[test]
    fn stroked_rectangle_uses_re_and_s() {
        let fonts: Arena<Font> = Arena::new();
        let contents = vec![PageContents::Shape(ShapeLayout {
            rect: Rect::from_origin(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0)),
            stroke: Some((colours::BLACK, Pt(1.0))),
            fill: None,
        })];
        let rendered = String::from_utf8(render_contents(&contents, &fonts).unwrap()).unwrap();
        assert!(rendered.contains("10 20 30 40 re\nS\n"));
        assert!(rendered.contains("0 G\n1 w\n"));
    }

    #[test]
    fn text_is_hex_encoded_with_its_font() {
        let mut fonts: Arena<Font> = Arena::new();
        let id = fonts.alloc(Font::standard(StandardFont::Helvetica));
        let contents = vec![PageContents::Text(vec![SpanLayout {
            text: "OP".into(),
            font: SpanFont { id, size: Pt(8.0) },
            colour: colours::BLACK,
            coords: (Pt(5.0), Pt(6.0)),
        }])];
        let rendered = String::from_utf8(render_contents(&contents, &fonts).unwrap()).unwrap();
        assert!(rendered.contains("/F0 8 Tf\n"));
        assert!(rendered.contains("5 6 Td\n<4f50> Tj\n"));
    }
}
