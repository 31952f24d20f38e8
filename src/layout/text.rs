use crate::colour::Colour;
use crate::font::{Font, TextMeasure};
use crate::page::*;
use crate::units::Pt;
use id_arena::Id;

/// Calculates the vertical offset from a text coordinate to the font's baseline.
///
/// In PDF, text coordinates specify the baseline position. This function returns
/// the negative ascent value, which can be added to a y-coordinate to account
/// for the font's ascender height when positioning text from a top reference point.
pub fn baseline_offset<M: TextMeasure + ?Sized>(font: &M, size: Pt) -> Pt {
    Pt(0.) - font.ascent(size)
}

/// Greedy word wrap.
///
/// Splits `text` on whitespace and packs words into lines, adding the next word
/// to the current line as long as the measured width of `line + " " + word`
/// stays within `max_width`. A word that is wider than `max_width` on its own
/// is still emitted, unmodified, as its own line; there is no hyphenation.
///
/// Always returns at least one line: empty (or all-whitespace) input yields a
/// single empty string.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    text: &str,
    font: &M,
    size: Pt,
    max_width: Pt,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Shorten `line` until `line + marker` fits within `max_width`. Trailing
/// whitespace left over after cutting is dropped so the marker hugs the text.
/// If not even the marker fits, the marker alone is returned.
pub fn fit_with_marker<M: TextMeasure + ?Sized>(
    line: &str,
    marker: &str,
    font: &M,
    size: Pt,
    max_width: Pt,
) -> String {
    let mut kept: String = line.trim_end().to_string();
    loop {
        let candidate = format!("{kept}{marker}");
        if kept.is_empty() || font.text_width(&candidate, size) <= max_width {
            return candidate;
        }
        kept.pop();
        let trimmed = kept.trim_end().len();
        kept.truncate(trimmed);
    }
}

/// The wrapped lines of one logical field, along with the font and size they
/// were measured in. Recomputed on every render; never stored.
#[derive(Clone, PartialEq, Debug)]
pub struct WrappedTextBlock {
    pub lines: Vec<String>,
    pub font: Id<Font>,
    pub size: Pt,
}

impl WrappedTextBlock {
    /// Wrap `text` at `max_width` using the metrics of `measure`, which must be
    /// the font identified by `font`
    pub fn new<M: TextMeasure + ?Sized>(
        text: &str,
        font: Id<Font>,
        measure: &M,
        size: Pt,
        max_width: Pt,
    ) -> WrappedTextBlock {
        WrappedTextBlock {
            lines: wrap_text(text, measure, size, max_width),
            font,
            size,
        }
    }

    /// Keep at most `max_lines` lines. When lines had to be dropped, the last kept
    /// line ends in `marker` (shortened as needed so that it still fits `max_width`).
    pub fn truncated<M: TextMeasure + ?Sized>(
        mut self,
        max_lines: usize,
        marker: &str,
        measure: &M,
        max_width: Pt,
    ) -> WrappedTextBlock {
        let max_lines = max_lines.max(1);
        if self.lines.len() > max_lines {
            self.lines.truncate(max_lines);
            self.mark_continued(marker, measure, max_width);
        }
        self
    }

    /// End the last line in `marker`, shortened to fit `max_width`, to show
    /// that text follows which was not printed. A line already ending in the
    /// marker is left alone.
    pub fn mark_continued<M: TextMeasure + ?Sized>(
        &mut self,
        marker: &str,
        measure: &M,
        max_width: Pt,
    ) {
        if let Some(last) = self.lines.last_mut() {
            if !last.ends_with(marker) {
                *last = fit_with_marker(last, marker, measure, self.size, max_width);
            }
        }
    }

    /// How many lines [layout](Self::layout) would place with the same
    /// arguments before reaching `floor`
    pub fn lines_above(&self, first_baseline: Pt, line_height: Pt, floor: Pt) -> usize {
        let mut y = first_baseline;
        let mut count = 0;
        for _ in self.lines.iter() {
            if y < floor {
                break;
            }
            y -= line_height;
            count += 1;
        }
        count
    }

    /// Shorten any line that is still wider than `max_width` (a single word too
    /// long to wrap) so that it ends in `marker` and fits.
    pub fn clipped<M: TextMeasure + ?Sized>(
        mut self,
        marker: &str,
        measure: &M,
        max_width: Pt,
    ) -> WrappedTextBlock {
        for line in self.lines.iter_mut() {
            if measure.text_width(line, self.size) > max_width {
                *line = fit_with_marker(line, marker, measure, self.size, max_width);
            }
        }
        self
    }

    /// Place the lines on `page`, the first baseline at `start`, each following
    /// baseline `line_height` lower. Placement stops at the first line whose
    /// baseline would fall below `floor`. Returns how many lines were placed.
    pub fn layout(
        &self,
        page: &mut Page,
        start: (Pt, Pt),
        line_height: Pt,
        floor: Pt,
        colour: Colour,
    ) -> usize {
        let (x, mut y) = start;
        let mut placed = 0;
        for line in self.lines.iter() {
            if y < floor {
                break;
            }
            if !line.is_empty() {
                page.add_span(SpanLayout {
                    text: line.clone(),
                    font: SpanFont {
                        id: self.font,
                        size: self.size,
                    },
                    colour,
                    coords: (x, y),
                });
            }
            y -= line_height;
            placed += 1;
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::testing::FixedAdvance;

    const SIZE: Pt = Pt(10.0);

    #[test]
    fn empty_input_is_one_empty_line() {
        assert_eq!(wrap_text("", &FixedAdvance(1.0), SIZE, Pt(100.0)), vec![String::new()]);
        assert_eq!(wrap_text("   \t ", &FixedAdvance(1.0), SIZE, Pt(100.0)), vec![String::new()]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("OP 1234", &FixedAdvance(1.0), SIZE, Pt(20.0));
        assert_eq!(lines, vec!["OP 1234".to_string()]);
    }

    #[test]
    fn greedy_packing_breaks_before_the_overflowing_word() {
        // every character is 1pt wide, so lines hold at most 10 characters
        let lines = wrap_text("aaa bbb ccc ddd", &FixedAdvance(1.0), SIZE, Pt(10.0));
        assert_eq!(lines, vec!["aaa bbb".to_string(), "ccc ddd".to_string()]);
    }

    #[test]
    fn line_exactly_at_the_limit_is_kept() {
        let lines = wrap_text("aaaa bbbbb", &FixedAdvance(1.0), SIZE, Pt(10.0));
        assert_eq!(lines, vec!["aaaa bbbbb".to_string()]);
    }

    #[test]
    fn oversized_word_is_emitted_unmodified() {
        let lines = wrap_text("ab abcdefghijklmnop cd", &FixedAdvance(1.0), SIZE, Pt(5.0));
        assert_eq!(
            lines,
            vec![
                "ab".to_string(),
                "abcdefghijklmnop".to_string(),
                "cd".to_string()
            ]
        );
    }

    #[test]
    fn wrapping_preserves_words_and_respects_width() {
        let measure = FixedAdvance(1.25);
        let max_width = Pt(40.0);
        for n in [1usize, 7, 30, 120] {
            let text = lipsum::lipsum_words(n);
            let lines = wrap_text(&text, &measure, SIZE, max_width);

            assert!(!lines.is_empty());
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(rejoined, original);

            for line in lines.iter() {
                let fits = measure.text_width(line, SIZE) <= max_width;
                let single_word = !line.contains(' ');
                assert!(fits || single_word, "line overflowed: {line:?}");
            }
        }
    }

    #[test]
    fn wrapping_is_deterministic() {
        let text = lipsum::lipsum_words(50);
        let a = wrap_text(&text, &FixedAdvance(0.9), SIZE, Pt(33.0));
        let b = wrap_text(&text, &FixedAdvance(0.9), SIZE, Pt(33.0));
        assert_eq!(a, b);
    }

    #[test]
    fn marker_replaces_the_tail_when_needed() {
        let m = FixedAdvance(1.0);
        assert_eq!(fit_with_marker("abcdef", "...", &m, SIZE, Pt(20.0)), "abcdef...");
        assert_eq!(fit_with_marker("abcdef", "...", &m, SIZE, Pt(7.0)), "abcd...");
        assert_eq!(fit_with_marker("ab cdef", "...", &m, SIZE, Pt(6.0)), "ab...");
        assert_eq!(fit_with_marker("abcdef", "...", &m, SIZE, Pt(2.0)), "...");
    }

    #[test]
    fn long_file_name_is_capped_at_three_lines_with_marker() {
        // 120 characters, four words per 20pt line
        let text = "abcd ".repeat(24);
        assert_eq!(text.chars().count(), 120);

        let measure = FixedAdvance(1.0);
        let mut fonts: id_arena::Arena<Font> = id_arena::Arena::new();
        let font = fonts.alloc(Font::standard(crate::font::StandardFont::Helvetica));

        let full = WrappedTextBlock::new(&text, font, &measure, SIZE, Pt(20.0));
        assert!(full.lines.len() > 3);

        let capped = full.truncated(3, "...", &measure, Pt(20.0));
        assert_eq!(capped.lines.len(), 3);
        assert_eq!(capped.lines[2], "abcd abcd abcd ab...");
        assert!(measure.text_width(&capped.lines[2], SIZE) <= Pt(20.0));
    }

    #[test]
    fn lines_above_the_floor_match_what_layout_places() {
        let measure = FixedAdvance(1.0);
        let mut fonts: id_arena::Arena<Font> = id_arena::Arena::new();
        let font = fonts.alloc(Font::standard(crate::font::StandardFont::Helvetica));
        let block = WrappedTextBlock::new("aaa bbb ccc ddd eee", font, &measure, SIZE, Pt(3.0));
        assert_eq!(block.lines.len(), 5);

        let mut page = Page::new((Pt(100.0), Pt(100.0)), None);
        let fits = block.lines_above(Pt(50.0), Pt(12.0), Pt(20.0));
        assert_eq!(fits, 3);
        assert_eq!(
            block.layout(&mut page, (Pt(0.0), Pt(50.0)), Pt(12.0), Pt(20.0), crate::colours::BLACK),
            fits
        );
    }

    #[test]
    fn continued_block_is_marked_once() {
        let measure = FixedAdvance(1.0);
        let mut fonts: id_arena::Arena<Font> = id_arena::Arena::new();
        let font = fonts.alloc(Font::standard(crate::font::StandardFont::Helvetica));
        let mut block = WrappedTextBlock::new("abcd efgh", font, &measure, SIZE, Pt(5.0));
        block.mark_continued("...", &measure, Pt(5.0));
        assert_eq!(block.lines, vec!["abcd".to_string(), "ef...".to_string()]);
        block.mark_continued("...", &measure, Pt(5.0));
        assert_eq!(block.lines[1], "ef...");
    }

    #[test]
    fn short_block_is_not_marked() {
        let measure = FixedAdvance(1.0);
        let mut fonts: id_arena::Arena<Font> = id_arena::Arena::new();
        let font = fonts.alloc(Font::standard(crate::font::StandardFont::Helvetica));
        let block = WrappedTextBlock::new("ab cd", font, &measure, SIZE, Pt(20.0))
            .truncated(3, "...", &measure, Pt(20.0));
        assert_eq!(block.lines, vec!["ab cd".to_string()]);
    }

    #[test]
    fn clipping_shortens_only_oversized_lines() {
        let measure = FixedAdvance(1.0);
        let mut fonts: id_arena::Arena<Font> = id_arena::Arena::new();
        let font = fonts.alloc(Font::standard(crate::font::StandardFont::Helvetica));
        let block = WrappedTextBlock::new("ok abcdefghijklmnopqrstuvwxyz", font, &measure, SIZE, Pt(10.0))
            .clipped("...", &measure, Pt(10.0));
        assert_eq!(block.lines, vec!["ok".to_string(), "abcdefg...".to_string()]);
    }
}
