//! Writes PDF documents.
//!
//! A [`DocumentState`] owns an object store, the page list and the render
//! configuration. Rendering walks the store in order, records the byte
//! offset of every object and finishes with the cross reference table.

pub use pressbed_filters as filters;

pub use self::{
    crypt::EncryptionKey,
    error::PbError,
    pdf::document::{DocumentInfo, DocumentOptions, DocumentState, Page, PageCollection},
    store::{MemoryStore, ObjectStore, Part, Payload, StoredObject},
};

pub mod crypt;
mod error;
pub mod pdf;
pub mod render;
pub mod simple_encode;
pub mod store;
pub mod writer;

/// Render `document` into a new buffer.
pub fn render_to_vec<S: ObjectStore>(document: &mut DocumentState<S>) -> Result<Vec<u8>, PbError> {
    let mut out = Vec::new();
    document.render(&mut out)?;
    Ok(out)
}
