use std::{io, path::PathBuf};

use pressbed_filters::FilterError;
use thiserror::Error;

use crate::pdf::Reference;

#[derive(Debug, Error)]
pub enum PbError {
    /// An external stream source could not be opened or read while rendering
    /// the object `reference`.
    #[error("object {reference}: cannot read `{}`", .path.display())]
    ResourceUnavailable {
        reference: Reference,
        path: PathBuf,
        source: io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("page index {index} is out of range for {len} pages")]
    PageIndexOutOfRange { index: usize, len: usize },

    /// The page collection and the page tree of the store disagree.
    #[error("page tree count is {count} but the document has {pages} pages")]
    ConsistencyViolation { pages: usize, count: i64 },

    #[error("malformed page tree: {0}")]
    MalformedPageTree(&'static str),
}
