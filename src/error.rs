use std::path::PathBuf;

/// Errors that abort a conversion run.
///
/// Missing images and unknown class names are not errors: they are logged and
/// skipped where they occur.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The annotation file is not well-formed XML.
    #[error("Malformed annotation XML ({}): {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// The annotation file is not UTF-8 encoded.
    #[error("Malformed annotation ({}): not valid UTF-8 ({source})", .path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A required element is absent or has no text.
    #[error("Malformed annotation ({}): missing <{element}> element", .path.display())]
    MissingElement { path: PathBuf, element: String },

    /// A bounding box coordinate is not a number.
    #[error(
        "Malformed annotation ({}): <{element}> value {value:?} is not a number",
        .path.display()
    )]
    InvalidCoordinate {
        path: PathBuf,
        element: String,
        value: String,
    },

    /// The class mapping could not be built.
    #[error("Invalid class mapping: {0}")]
    ClassMap(String),

    #[error("IO error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
