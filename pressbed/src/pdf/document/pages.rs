use crate::{
    error::PbError,
    pdf::{
        document::{K_COUNT, K_KIDS},
        Object, Reference,
    },
    store::ObjectStore,
};

/// A page of the document, known by its page dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    dictionary: Reference,
}

impl Page {
    pub fn new(dictionary: Reference) -> Self {
        Self { dictionary }
    }

    /// Reference of the page dictionary, as listed in `/Kids`.
    pub fn dictionary(&self) -> Reference {
        self.dictionary
    }
}

/// The pages of a document in order. Mirrors `/Kids` and `/Count` of the
/// page tree root in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCollection {
    pages: Vec<Page>,
}

impl PageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn last(&self) -> Option<&Page> {
        self.pages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// Insert `page` at `index`, into this collection and into the page tree
    /// of `store`. Either both change or neither does.
    pub fn insert<S: ObjectStore>(
        &mut self,
        store: &mut S,
        page: Page,
        index: usize,
    ) -> Result<(), PbError> {
        let len = self.pages.len();
        if index > len {
            return Err(PbError::PageIndexOutOfRange { index, len });
        }

        let tree = store
            .pages_mut()
            .ok_or(PbError::MalformedPageTree("page tree root is not a dictionary"))?;
        let count = tree
            .get(K_COUNT)
            .and_then(Object::integer)
            .ok_or(PbError::MalformedPageTree("/Count is not an integer"))?;
        let kids_len = tree
            .get(K_KIDS)
            .and_then(Object::array)
            .ok_or(PbError::MalformedPageTree("/Kids is not an array"))?
            .len();
        if count != len as i64 || kids_len != len {
            log::error!(
                "page tree out of sync: {} pages, /Count {}, {} kids",
                len,
                count,
                kids_len
            );
            return Err(PbError::ConsistencyViolation { pages: len, count });
        }

        if let Some(kids) = tree.get_mut(K_KIDS).and_then(Object::array_mut) {
            kids.insert(index, Object::Reference(page.dictionary));
        }
        tree.insert(K_COUNT.into(), Object::Integer(count + 1));
        self.pages.insert(index, page);
        log::debug!("inserted page {} at {}", page.dictionary, index);

        let count = store.page_count();
        if count != self.pages.len() {
            log::error!("{} pages but page tree counts {}", self.pages.len(), count);
            return Err(PbError::ConsistencyViolation {
                pages: self.pages.len(),
                count: count as i64,
            });
        }
        Ok(())
    }

    /// Build the collection from the page tree of `store`.
    ///
    /// Does nothing if the collection already has pages or the store has
    /// none. Returns the number of pages added.
    pub fn populate_from_store<S: ObjectStore>(&mut self, store: &S) -> Result<usize, PbError> {
        let count = store.page_count();
        if !self.pages.is_empty() || count == 0 {
            return Ok(0);
        }

        let pages = (1..=count)
            .map(|index| {
                store
                    .object_id_for_page(index)
                    .map(Page::new)
                    .ok_or(PbError::MalformedPageTree("/Count exceeds the listed pages"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.pages = pages;
        Ok(count)
    }
}
