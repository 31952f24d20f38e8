use crate::{
    refs::{ObjectReferences, RefType},
    LabelError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

mod standard;
pub use standard::StandardFont;

/// Anything that can tell how wide a run of text is. Layout code (line
/// wrapping, alignment) only ever talks to fonts through this trait, so it
/// can be driven by simple fixed-width measurers in tests.
pub trait TextMeasure {
    /// Horizontal advance of `text` set at `size`
    fn text_width(&self, text: &str, size: Pt) -> Pt;

    /// Distance from the baseline to the top of the font at `size`
    fn ascent(&self, size: Pt) -> Pt;

    /// Distance from the baseline to the bottom of the font at `size`.
    /// Note: this is usually negative
    fn descent(&self, size: Pt) -> Pt;

    /// How far to move down between two consecutive baselines at `size`
    fn line_height(&self, size: Pt) -> Pt;
}

/// Where a font's outlines and metrics come from
pub enum FontFace {
    /// A TrueType / OpenType face, embedded in its entirety in the generated PDF
    TrueType(OwnedFace),
    /// One of the standard PDF faces, referenced by name only
    Standard(StandardFont),
}

/// A font usable on pages of a [Document](crate::Document).
///
/// Typically, fonts are referred to throughout the crate by their [Id] within
/// the document itself, and not by any typed references
pub struct Font {
    pub face: FontFace,
}

impl Font {
    /// Load a TrueType font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LabelError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            face: FontFace::TrueType(face),
        })
    }

    /// Read and parse a TrueType font file
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, LabelError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::load(bytes)
    }

    /// Use one of the standard PDF faces
    pub fn standard(font: StandardFont) -> Font {
        Font {
            face: FontFace::Standard(font),
        }
    }

    fn truetype(&self) -> Option<&Face<'_>> {
        match &self.face {
            FontFace::TrueType(face) => Some(face.as_face_ref()),
            FontFace::Standard(_) => None,
        }
    }

    /// The full name of the font, if it carries one
    pub fn name(&self) -> Option<String> {
        match &self.face {
            FontFace::Standard(font) => Some(font.base_name().to_string()),
            FontFace::TrueType(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| {
                    name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode()
                })
                .and_then(|name| name.to_string()),
        }
    }

    /// Font design units → points scaling for `size`, and the
    /// (ascender, descender, line gap) triple in design units
    fn vertical_metrics(&self, size: Pt) -> (Pt, i16, i16, i16) {
        match &self.face {
            FontFace::Standard(font) => (
                size / 1000.0,
                font.ascender(),
                font.descender(),
                font.line_gap(),
            ),
            FontFace::TrueType(face) => {
                let face = face.as_face_ref();
                (
                    size / face.units_per_em() as f32,
                    face.ascender(),
                    face.descender(),
                    face.line_gap(),
                )
            }
        }
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.truetype()
            .and_then(|face| face.glyph_index(ch))
            .map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    /// The glyph actually drawn for `ch`: its own if the font has one, else the
    /// replacement glyph, else `.notdef`
    fn drawn_glyph_id(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .unwrap_or(0)
    }

    /// Append `text` as the hex digits of a PDF string in this font's encoding
    pub(crate) fn encode_hex(&self, text: &str, out: &mut String) {
        match &self.face {
            FontFace::Standard(_) => {
                for ch in text.chars() {
                    let _ = write!(out, "{:02x}", standard::win_ansi_byte(ch));
                }
            }
            FontFace::TrueType(_) => {
                for ch in text.chars() {
                    let _ = write!(out, "{:04x}", self.drawn_glyph_id(ch));
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));

        match &self.face {
            FontFace::Standard(font) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(font.base_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontFace::TrueType(owned) => {
                let face = owned.as_face_ref();
                let cid_font_id = write_cid(face, owned.as_slice(), refs, font_index, writer);
                let to_unicode_id = write_to_unicode(face, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }
}

impl TextMeasure for Font {
    /// ignores newlines; characters missing from an embedded font are measured
    /// as the replacement glyph they are drawn with
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        match &self.face {
            FontFace::Standard(font) => {
                let units: u32 = text
                    .chars()
                    .filter(|ch| *ch != '\n')
                    .map(|ch| font.char_width(ch) as u32)
                    .sum();
                size * (units as f32 / 1000.0)
            }
            FontFace::TrueType(face) => {
                let face = face.as_face_ref();
                let scaling = size / face.units_per_em() as f32;
                text.chars()
                    .filter(|ch| *ch != '\n')
                    .map(|ch| GlyphId(self.drawn_glyph_id(ch)))
                    .map(|gid| scaling * face.glyph_hor_advance(gid).unwrap_or_default() as f32)
                    .sum()
            }
        }
    }

    fn ascent(&self, size: Pt) -> Pt {
        let (scaling, ascender, _, _) = self.vertical_metrics(size);
        scaling * ascender as f32
    }

    fn descent(&self, size: Pt) -> Pt {
        let (scaling, _, descender, _) = self.vertical_metrics(size);
        scaling * descender as f32
    }

    fn line_height(&self, size: Pt) -> Pt {
        let (scaling, ascender, descender, line_gap) = self.vertical_metrics(size);
        scaling * (line_gap as f32 + ascender as f32 - descender as f32)
    }
}

/// glyph id → first unicode character mapping to it
fn glyph_ids(face: &Face<'_>) -> HashMap<u16, char> {
    let mut map: HashMap<u16, char> = HashMap::new();

    let Some(cmap) = face.tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                    map.entry(index.0).or_insert(ch);
                }
            }
        });
    }

    map
}

fn write_cid(
    face: &Face<'_>,
    data: &[u8],
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let font_descriptor_id = write_descriptor(face, data, refs, font_index, writer);

    let id = refs.gen(RefType::CidFont(font_index));
    let scaling = 1000.0 / face.units_per_em() as f32;

    let mut id_widths: Vec<(u16, f32)> = glyph_ids(face)
        .keys()
        .map(|&gid| {
            let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default();
            (gid, advance as f32 * scaling)
        })
        .collect();
    id_widths.sort_by_key(|(gid, _)| *gid);

    let mut cid_font = writer.cid_font(id);
    cid_font.subtype(CidFontType::Type2);
    cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
    cid_font.system_info(SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    });
    cid_font.font_descriptor(font_descriptor_id);

    // runs of consecutive glyph ids share one widths entry
    let mut widths = cid_font.widths();
    let mut run: Option<(u16, Vec<f32>)> = None;
    for (gid, width) in id_widths {
        match run.as_mut() {
            Some((start, ws)) if *start as usize + ws.len() == gid as usize => ws.push(width),
            _ => {
                if let Some((start, ws)) = run.take() {
                    widths.consecutive(start, ws);
                }
                run = Some((gid, vec![width]));
            }
        }
    }
    if let Some((start, ws)) = run {
        widths.consecutive(start, ws);
    }
    widths.finish();

    cid_font.default_width(1000.0);
    cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

    id
}

fn write_descriptor(
    face: &Face<'_>,
    data: &[u8],
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let font_data_id = refs.gen(RefType::FontData(font_index));
    writer
        .stream(font_data_id, data)
        .pair(Name(b"Length1"), data.len() as i32);

    let scaling = 1000.0 / face.units_per_em() as f32;
    let bbox = face.global_bounding_box();

    let id = refs.gen(RefType::FontDescriptor(font_index));
    let mut descriptor = writer.font_descriptor(id);
    descriptor.name(Name(format!("F{font_index}").as_bytes()));
    descriptor.weight(face.weight().to_number());

    let mut flags: FontFlags = FontFlags::SYMBOLIC;
    if face.is_monospaced() {
        flags.set(FontFlags::FIXED_PITCH, true);
    }
    if face.is_italic() {
        flags.set(FontFlags::ITALIC, true);
    }
    descriptor.flags(flags);

    descriptor.bbox(pdf_writer::Rect {
        x1: bbox.x_min as f32 * scaling,
        y1: bbox.y_min as f32 * scaling,
        x2: bbox.x_max as f32 * scaling,
        y2: bbox.y_max as f32 * scaling,
    });
    descriptor.italic_angle(0.0);
    descriptor.ascent(face.ascender() as f32 * scaling);
    descriptor.descent(face.descender() as f32 * scaling);
    descriptor.leading(face.line_gap() as f32 * scaling);
    descriptor.cap_height(
        face.capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(face.ascender() as f32 * scaling),
    );
    // TODO: derive the stem width from the OS/2 weight class instead of a fixed value
    descriptor.stem_v(80.0);
    descriptor.font_file2(font_data_id);
    descriptor.finish();

    id
}

fn write_to_unicode(
    face: &Face<'_>,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.gen(RefType::ToUnicode(font_index));

    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo\n\
         << /Registry (Adobe)\n\
         /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let mut ids: Vec<(u16, char)> = glyph_ids(face).into_iter().collect();
    ids.sort_by_key(|&(id, _)| id);

    // bfchar blocks hold at most 100 entries each
    for block in ids.chunks(100) {
        let _ = writeln!(map, "{} beginbfchar", block.len());
        for &(gid, ch) in block {
            let mut units = [0u16; 2];
            let encoded: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{u:04x}"))
                .collect();
            let _ = writeln!(map, "<{gid:04x}> <{encoded}>");
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
        map.as_bytes(),
        miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
    );
    writer
        .stream(id, compressed.as_slice())
        .filter(Filter::FlateDecode);

    id
}
