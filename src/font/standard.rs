//! Metrics for the PDF standard faces. These fonts are never embedded; every
//! conforming viewer ships them, so all we need is their AFM widths for
//! measurement and the WinAnsi encoding for content streams.

/// One of the PDF standard fonts usable without embedding
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The PostScript name used as `BaseFont`
    pub fn base_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Ascender in 1000 units per em
    pub(crate) fn ascender(&self) -> i16 {
        718
    }

    /// Descender in 1000 units per em (negative)
    pub(crate) fn descender(&self) -> i16 {
        -207
    }

    /// Extra spacing between lines, picked so a line is 1.2 em tall
    pub(crate) fn line_gap(&self) -> i16 {
        1200 - (self.ascender() - self.descender())
    }

    /// Advance width of a character in 1000 units per em
    pub(crate) fn char_width(&self, ch: char) -> u16 {
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };

        match ch {
            '\u{B0}' => 400,
            '\u{A0}' => table[b' ' as usize],
            c if c.is_ascii() => match table[c as usize] {
                0 => 278,
                w => w,
            },
            c => match fold_latin1(c) {
                Some(base) => table[base as usize],
                None => 556,
            },
        }
    }
}

/// Map a character to its byte in WinAnsiEncoding. Characters the encoding
/// can't express become `?`.
pub(crate) fn win_ansi_byte(ch: char) -> u8 {
    match ch as u32 {
        code @ 0x20..=0x7e => code as u8,
        code @ 0xa0..=0xff => code as u8,
        _ => b'?',
    }
}

/// Accented Latin-1 letters share the advance of their base letter in Helvetica
fn fold_latin1(ch: char) -> Option<u8> {
    let base = match ch {
        'À'..='Å' => b'A',
        'Ç' => b'C',
        'È'..='Ë' => b'E',
        'Ì'..='Ï' => b'I',
        'Ñ' => b'N',
        'Ò'..='Ö' | 'Ø' => b'O',
        'Ù'..='Ü' => b'U',
        'Ý' => b'Y',
        'à'..='å' | 'ª' => b'a',
        'ç' => b'c',
        'è'..='ë' => b'e',
        'ì'..='ï' => b'i',
        'ñ' => b'n',
        'ò'..='ö' | 'ø' | 'º' => b'o',
        'ù'..='ü' => b'u',
        'ý' | 'ÿ' => b'y',
        _ => return None,
    };
    Some(base)
}

/// Helvetica character widths
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
];

/// Helvetica-Bold character widths
#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_is_wider_than_regular() {
        let regular: u32 = "Unidade".chars().map(|c| StandardFont::Helvetica.char_width(c) as u32).sum();
        let bold: u32 = "Unidade"
            .chars()
            .map(|c| StandardFont::HelveticaBold.char_width(c) as u32)
            .sum();
        assert!(bold > regular);
    }

    #[test]
    fn accented_letters_measure_like_their_base() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width('á'), font.char_width('a'));
        assert_eq!(font.char_width('Ç'), font.char_width('C'));
        assert_eq!(font.char_width('°'), 400);
    }

    #[test]
    fn both_faces_share_helvetica_vertical_metrics() {
        for face in [StandardFont::Helvetica, StandardFont::HelveticaBold] {
            assert_eq!((face.ascender(), face.descender()), (718, -207));
            assert_eq!(face.ascender() - face.descender() + face.line_gap(), 1200);
        }
        assert_eq!(StandardFont::HelveticaBold.base_name(), "Helvetica-Bold");
    }

    #[test]
    fn win_ansi_keeps_latin1_and_replaces_the_rest() {
        assert_eq!(win_ansi_byte('A'), b'A');
        assert_eq!(win_ansi_byte('ã'), 0xe3);
        assert_eq!(win_ansi_byte('€'), b'?');
        assert_eq!(win_ansi_byte('\n'), b'?');
    }
}
