//! The object store the document renders from.
//!
//! A store owns the indirect objects of a document, hands out references
//! for new objects and keeps the page tree. The renderer only needs the
//! [`StoredObject`] view of each entry.

use std::path::PathBuf;

use pressbed_filters::FilterRegistry;

use crate::{
    crypt::EncryptionKey,
    error::PbError,
    pdf::{Dictionary, Object, Reference},
};

pub use self::memory::{MemoryStore, ObjectRef};

mod memory;

/// One piece of a composite payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Inline(Vec<u8>),
    /// Streamed from disk while rendering. `length` is the size the object
    /// declared for it.
    External { path: PathBuf, length: u64 },
}

/// The serialized form of an indirect object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    Parts(Vec<Part>),
}

impl Payload {
    /// Number of bytes this payload will write.
    pub fn len(&self) -> u64 {
        match self {
            Payload::Bytes(b) => b.len() as u64,
            Payload::Parts(parts) => parts
                .iter()
                .map(|p| match p {
                    Part::Inline(b) => b.len() as u64,
                    Part::External { length, .. } => *length,
                })
                .sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An indirect object as seen by the renderer.
pub trait StoredObject {
    fn reference(&self) -> Reference;

    /// Byte position of the object in the last rendered output.
    fn offset(&self) -> Option<usize>;

    fn set_offset(&mut self, offset: Option<usize>);

    /// Plain serialized form, `N G obj ... endobj` included.
    fn object(&self) -> Result<Payload, PbError>;

    /// Serialized form with strings and stream data encrypted under `key`.
    fn encrypted_object(&self, key: &EncryptionKey) -> Result<Vec<u8>, PbError>;

    /// Flate encode stream data. Returns whether anything changed.
    fn compress(&mut self, _filters: &FilterRegistry) -> Result<bool, PbError> {
        Ok(false)
    }
}

pub trait ObjectStore {
    type Entry: StoredObject;

    /// Number of stored objects.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Page count as recorded in the page tree (`/Count`). A missing or
    /// negative count is zero.
    fn page_count(&self) -> usize;

    /// Reference of the page dictionary at 1-based `index`.
    fn object_id_for_page(&self, index: usize) -> Option<Reference>;

    /// All entries in render order.
    fn objects(&self) -> Box<dyn Iterator<Item = &Self::Entry> + '_>;

    fn objects_mut(&mut self) -> Box<dyn Iterator<Item = &mut Self::Entry> + '_>;

    fn get(&self, reference: Reference) -> Option<&Object>;

    fn get_mut(&mut self, reference: Reference) -> Option<&mut Object>;

    /// Store `object` under the next free reference.
    fn push_object(&mut self, object: Object) -> Reference;

    /// The catalog.
    fn root(&self) -> Reference;

    /// The document information dictionary, if any.
    fn info(&self) -> Option<Reference>;

    /// Root of the page tree.
    fn pages_reference(&self) -> Reference;

    fn pages(&self) -> Option<&Dictionary> {
        self.get(self.pages_reference()).and_then(Object::dictionary)
    }

    fn pages_mut(&mut self) -> Option<&mut Dictionary> {
        let pages = self.pages_reference();
        self.get_mut(pages).and_then(Object::dictionary_mut)
    }
}
