use thiserror::Error;

/// All errors that the crate can surface to a caller
#[derive(Error, Debug)]
pub enum LabelError {
    /// The layout cannot produce a single usable label slot (or leaves no room for text).
    /// Raised before anything is rendered.
    #[error("invalid layout configuration: {0}")]
    Configuration(String),

    /// A batch was requested with zero records; nothing was written
    #[error("no records to render")]
    EmptyInput,

    /// A record was rejected when it was constructed
    #[error("invalid record: {field} {reason}")]
    InvalidRecord {
        field: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    /// An I/O error occurred while loading a font or writing the document
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse a TrueType font
    FontParsing(#[from] owned_ttf_parser::FaceParsingError),

    /// Any other failure part-way through producing the document
    #[error("failed to render document: {0}")]
    Render(String),
}
