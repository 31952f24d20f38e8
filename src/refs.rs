use pdf_writer::Ref;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
    Image(usize),
    ImageMask(usize),
}

/// Hands out PDF object ids and remembers which object each id was generated for
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: Ref,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: Ref::new(1),
        }
    }

    /// Allocate an id that is not tied to a [RefType], e.g. for objects
    /// imported from an SVG conversion chunk
    pub fn next(&mut self) -> Ref {
        self.next_id.bump()
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = self.next();
        self.refs.insert(ref_type, id);
        id
    }

    /// Record an id that was allocated elsewhere
    pub fn set(&mut self, ref_type: RefType, id: Ref) {
        self.refs.insert(ref_type, id);
    }
}
