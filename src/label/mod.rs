//! Production-order labels.
//!
//! A batch goes through four steps: the [LabelLayoutConfig] is validated, the
//! records are assigned slots by [tile], each record is drawn by the
//! [LabelRenderer], and the pages are collected into a [Document](crate::Document).
//!
//! # Example
//!
//! ```
//! use pdf_labels::label::{generate, LabelLayoutConfig, LabelRecord};
//!
//! let records = vec![
//!     LabelRecord::new("4512", "Campinas", "apostila-matematica.pdf", 15).unwrap(),
//!     LabelRecord::new("4513", "Sorocaba", "apostila-fisica.pdf", 8)
//!         .unwrap()
//!         .with_person_name("Ana"),
//! ];
//!
//! let doc = generate(&records, &LabelLayoutConfig::zebra(), None).expect("labels render");
//! assert_eq!(doc.page_count(), 2);
//!
//! let mut pdf: Vec<u8> = Vec::new();
//! doc.write(&mut pdf).expect("document writes");
//! ```

mod batch;
mod config;
mod logo;
mod record;
mod render;
mod tile;

pub use batch::*;
pub use config::*;
pub use logo::*;
pub use record::*;
pub use render::*;
pub use tile::*;
