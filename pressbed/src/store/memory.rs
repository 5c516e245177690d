use std::io;

use pressbed_filters::FilterRegistry;

use crate::{
    crypt::EncryptionKey,
    error::PbError,
    pdf::{
        dictionary,
        document::{
            dict_types, K_COUNT, K_KIDS, K_PAGES, K_PRINT_SCALING, K_TYPE, K_VIEWER_PREFERENCES,
        },
        Array, Dictionary, Name, Object, Reference, StreamData,
    },
    simple_encode::{
        object::{
            indirect::{self, Indirect, END_OBJECT},
            stream::{self, END_STREAM},
        },
        SimpleEncoder,
    },
    store::{ObjectStore, Part, Payload, StoredObject},
    writer::Encoder,
};

/// An object of a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRef {
    reference: Reference,
    object: Object,
    offset: Option<usize>,
}

impl ObjectRef {
    pub fn new(reference: Reference, object: Object) -> Self {
        Self {
            reference,
            object,
            offset: None,
        }
    }

    pub fn data(&self) -> &Object {
        &self.object
    }

    pub fn data_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    fn unavailable(&self, source: io::Error) -> PbError {
        match &self.object {
            Object::Stream(s) => match &s.data {
                StreamData::External { path, .. } => PbError::ResourceUnavailable {
                    reference: self.reference,
                    path: path.clone(),
                    source,
                },
                StreamData::Inline(_) => PbError::Io(source),
            },
            _ => PbError::Io(source),
        }
    }
}

impl StoredObject for ObjectRef {
    fn reference(&self) -> Reference {
        self.reference
    }

    fn offset(&self) -> Option<usize> {
        self.offset
    }

    fn set_offset(&mut self, offset: Option<usize>) {
        self.offset = offset;
    }

    fn object(&self) -> Result<Payload, PbError> {
        if let Object::Stream(s) = &self.object {
            if let StreamData::External { path, length } = &s.data {
                let mut head = Vec::new();
                indirect::write_head(self.reference, &mut head)?;
                stream::write_head(s, &mut head)?;
                let mut tail = END_STREAM.to_vec();
                tail.extend_from_slice(END_OBJECT);

                return Ok(Payload::Parts(vec![
                    Part::Inline(head),
                    Part::External {
                        path: path.clone(),
                        length: *length,
                    },
                    Part::Inline(tail),
                ]));
            }
        }

        let mut out = Vec::new();
        SimpleEncoder::write_to(
            &Indirect {
                reference: self.reference,
                object: &self.object,
            },
            &mut out,
        )?;
        Ok(Payload::Bytes(out))
    }

    fn encrypted_object(&self, key: &EncryptionKey) -> Result<Vec<u8>, PbError> {
        let encrypted = key
            .encrypt_object(self.reference, &self.object)
            .map_err(|e| self.unavailable(e))?;

        let mut out = Vec::new();
        SimpleEncoder::write_to(
            &Indirect {
                reference: self.reference,
                object: &encrypted,
            },
            &mut out,
        )?;
        Ok(out)
    }

    fn compress(&mut self, filters: &FilterRegistry) -> Result<bool, PbError> {
        match &mut self.object {
            Object::Stream(s) => s.compress(filters),
            _ => Ok(false),
        }
    }
}

/// Keeps every object in memory, numbered from 1 in creation order.
///
/// A new store holds the info dictionary (1), the page tree root (2) and
/// the catalog (3).
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore {
    objects: Vec<ObjectRef>,
    info: Option<Reference>,
    pages: Reference,
    root: Reference,
}

impl MemoryStore {
    pub fn new(info: Dictionary, print_scaling: bool) -> Self {
        let mut store = Self {
            objects: Vec::new(),
            info: None,
            pages: Reference::new(0, 0),
            root: Reference::new(0, 0),
        };

        store.info = Some(store.push_object(Object::Dictionary(info)));
        store.pages = store.push_object(Object::Dictionary(dictionary([
            (K_TYPE, Object::Name(Name::from(dict_types::PAGES))),
            (K_KIDS, Object::Array(Array::new())),
            (K_COUNT, Object::Integer(0)),
        ])));

        let mut catalog = dictionary([
            (K_TYPE, Object::Name(Name::from(dict_types::CATALOG))),
            (K_PAGES, Object::Reference(store.pages)),
        ]);
        if print_scaling {
            catalog.insert(
                Name::from(K_VIEWER_PREFERENCES),
                Object::Dictionary(dictionary([(
                    K_PRINT_SCALING,
                    Object::Name(Name::from("None")),
                )])),
            );
        }
        store.root = store.push_object(Object::Dictionary(catalog));

        store
    }

    fn position(&self, reference: Reference) -> Option<usize> {
        let index = usize::try_from(reference.index).ok()?.checked_sub(1)?;
        let entry = self.objects.get(index)?;
        (entry.reference == reference).then_some(index)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Dictionary::default(), false)
    }
}

impl ObjectStore for MemoryStore {
    type Entry = ObjectRef;

    fn len(&self) -> usize {
        self.objects.len()
    }

    fn page_count(&self) -> usize {
        self.pages()
            .and_then(|p| p.get(K_COUNT))
            .and_then(Object::integer)
            .and_then(|c| usize::try_from(c).ok())
            .unwrap_or(0)
    }

    fn object_id_for_page(&self, index: usize) -> Option<Reference> {
        let kids = self.pages()?.get(K_KIDS)?.array()?;
        kids.get(index.checked_sub(1)?)?.reference()
    }

    fn objects(&self) -> Box<dyn Iterator<Item = &ObjectRef> + '_> {
        Box::new(self.objects.iter())
    }

    fn objects_mut(&mut self) -> Box<dyn Iterator<Item = &mut ObjectRef> + '_> {
        Box::new(self.objects.iter_mut())
    }

    fn get(&self, reference: Reference) -> Option<&Object> {
        self.position(reference).map(|i| &self.objects[i].object)
    }

    fn get_mut(&mut self, reference: Reference) -> Option<&mut Object> {
        self.position(reference).map(move |i| &mut self.objects[i].object)
    }

    fn push_object(&mut self, object: Object) -> Reference {
        let index = u32::try_from(self.objects.len() + 1).unwrap_or(u32::MAX);
        let reference = Reference::new(index, 0);
        log::trace!("store object {}", reference);
        self.objects.push(ObjectRef::new(reference, object));
        reference
    }

    fn root(&self) -> Reference {
        self.root
    }

    fn info(&self) -> Option<Reference> {
        self.info
    }

    fn pages_reference(&self) -> Reference {
        self.pages
    }
}
