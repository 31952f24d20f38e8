use crate::{
    font::Font,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    LabelError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;
use std::path::Path;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Get the page at the given 0-based position in the document
    pub fn page_at(&self, page_index: usize) -> Option<&Page> {
        self.page_order
            .get(page_index)
            .and_then(|id| self.pages.get(*id))
    }

    /// Add a font to the document structure. Fonts are stored "globally" within
    /// the document, such that any page can use it by referring to it by its id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, such that any page can re-use the same image by referring to its id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first, and nothing is written
    /// to `w` unless rendering succeeded.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), LabelError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document, not by arena index
        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or_else(|| {
                LabelError::Render(format!("page {page_index} is missing from the document"))
            })?;
            page.write(&mut refs, page_index, &fonts, &images, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice())?;
        w.flush()?;
        Ok(())
    }

    /// Render the document and save it at `path`. The file is only created once
    /// the whole document has been rendered.
    pub fn write_to_path<P: AsRef<Path>>(self, path: P) -> Result<(), LabelError> {
        let path = path.as_ref();
        let mut bytes: Vec<u8> = Vec::new();
        self.write(&mut bytes)?;
        std::fs::write(path, &bytes)?;
        log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
