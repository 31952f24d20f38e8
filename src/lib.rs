//! Lays out production-order labels and record reports as printable PDF
//! documents.
//!
//! The [label] module holds the label engine (records, layout configuration,
//! logo lookup, rendering, tiling and batch generation); [report] produces a
//! paginated table of records. Both build on a small document model
//! ([Document], [Page], [Font], [Image]) that is written out with [pdf_writer].

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

pub mod label;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

pub mod report;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
