use std::{
    fs::File,
    io::BufWriter,
    mem,
    path::Path,
};

use pressbed_filters::FilterRegistry;

use crate::{
    crypt::EncryptionKey,
    error::PbError,
    pdf::{
        document::{
            dict_types, DocumentInfo, DocumentOptions, Page, PageCollection, K_PARENT, K_TYPE,
        },
        trailer::Trailer,
        xref::{UsedObject, Xref},
        Dictionary, Name, Object,
    },
    render,
    simple_encode::section,
    store::{MemoryStore, ObjectStore, StoredObject},
    writer::{CountingWriter, Writer},
};

/// Called with the document right after a page was created.
pub type PageCreateCallback<S = MemoryStore> = Box<dyn FnMut(&mut DocumentState<S>)>;

/// Called with the document before it is rendered.
pub type BeforeRenderCallback<S = MemoryStore> = Box<dyn FnMut(&mut DocumentState<S>)>;

/// A document under construction: its objects, its pages and how it is
/// written.
pub struct DocumentState<S: ObjectStore = MemoryStore> {
    store: S,
    version: (u8, u8),
    pages: PageCollection,
    page: Option<Page>,
    info: DocumentInfo,
    trailer: Dictionary,
    compress: bool,
    encryption_key: Option<EncryptionKey>,
    filters: FilterRegistry,
    before_render_callbacks: Vec<BeforeRenderCallback<S>>,
    on_page_create_callback: Option<PageCreateCallback<S>>,
}

impl DocumentState<MemoryStore> {
    /// A new document backed by a [`MemoryStore`]. Missing creator and
    /// producer are filled in here, once.
    pub fn new(options: DocumentOptions) -> Self {
        let info = options.info.clone().normalized();
        let store = MemoryStore::new(Dictionary::from(&info), options.print_scaling);
        Self::with_store(DocumentOptions { info, ..options }, store)
    }
}

impl<S: ObjectStore> DocumentState<S> {
    /// A document on top of an existing store. The store's info dictionary
    /// and catalog are used as they are.
    pub fn with_store(options: DocumentOptions, store: S) -> Self {
        Self {
            store,
            version: options.version,
            pages: PageCollection::new(),
            page: None,
            info: options.info,
            trailer: options.trailer,
            compress: options.compress,
            encryption_key: options.encryption_key,
            filters: FilterRegistry::with_defaults(),
            before_render_callbacks: Vec::new(),
            on_page_create_callback: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn version(&self) -> (u8, u8) {
        self.version
    }

    /// Raise the version to at least `major.minor`.
    pub fn min_version(&mut self, major: u8, minor: u8) {
        self.version = self.version.max((major, minor));
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    pub fn trailer(&self) -> &Dictionary {
        &self.trailer
    }

    pub fn trailer_mut(&mut self) -> &mut Dictionary {
        &mut self.trailer
    }

    pub fn compress(&self) -> bool {
        self.compress
    }

    pub fn encrypt(&self) -> bool {
        self.encryption_key.is_some()
    }

    pub fn encryption_key(&self) -> Option<&EncryptionKey> {
        self.encryption_key.as_ref()
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    pub fn pages(&self) -> &PageCollection {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.count()
    }

    /// The page currently drawn on.
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn set_page(&mut self, page: Option<Page>) {
        self.page = page;
    }

    /// Replace the page creation callback.
    pub fn set_on_page_create(&mut self, callback: impl FnMut(&mut Self) + 'static) {
        self.on_page_create_callback = Some(Box::new(callback));
    }

    pub fn clear_on_page_create(&mut self) {
        self.on_page_create_callback = None;
    }

    /// Run the page creation callback, if there is one.
    pub fn on_page_create(&mut self) {
        if let Some(mut callback) = self.on_page_create_callback.take() {
            callback(self);
            // the callback may have installed a replacement
            if self.on_page_create_callback.is_none() {
                self.on_page_create_callback = Some(callback);
            }
        }
    }

    pub fn add_before_render(&mut self, callback: impl FnMut(&mut Self) + 'static) {
        self.before_render_callbacks.push(Box::new(callback));
    }

    /// Run all pre-render callbacks in the order they were added. Callbacks
    /// added while running are kept for the next call.
    pub fn before_render(&mut self) {
        let mut callbacks = mem::take(&mut self.before_render_callbacks);
        for callback in callbacks.iter_mut() {
            callback(self);
        }
        let added = mem::replace(&mut self.before_render_callbacks, callbacks);
        self.before_render_callbacks.extend(added);
    }

    /// Write every stored object to `writer`. See [`render::render_body`].
    pub fn render_body(&mut self, writer: &mut dyn Writer) -> Result<usize, PbError> {
        render::render_body(self.store.objects_mut(), writer, self.encryption_key.as_ref())
    }

    /// Pick up the pages already in the store. The last one becomes the
    /// current page.
    pub fn populate_pages_from_store(&mut self) -> Result<usize, PbError> {
        let added = self.pages.populate_from_store(&self.store)?;
        if added > 0 && self.page.is_none() {
            self.page = self.pages.last().copied();
        }
        Ok(added)
    }

    pub fn insert_page(&mut self, page: Page, index: usize) -> Result<(), PbError> {
        self.pages.insert(&mut self.store, page, index)
    }

    /// Store `dictionary` as a new last page, make it current and run the
    /// page creation callback.
    pub fn start_new_page(&mut self, mut dictionary: Dictionary) -> Result<Page, PbError> {
        dictionary.insert(Name::from(K_TYPE), Object::Name(Name::from(dict_types::PAGE)));
        dictionary.insert(Name::from(K_PARENT), Object::Reference(self.store.pages_reference()));
        let page = Page::new(self.store.push_object(Object::Dictionary(dictionary)));

        let index = self.pages.count();
        self.insert_page(page, index)?;
        self.page = Some(page);
        log::debug!("started page {} ({})", index + 1, page.dictionary());

        self.on_page_create();
        Ok(page)
    }

    /// Flate encode every stream that is not compressed yet. Returns the
    /// number of streams changed.
    pub fn compress_streams(&mut self) -> Result<usize, PbError> {
        let mut compressed = 0;
        for object in self.store.objects_mut() {
            if object.compress(&self.filters)? {
                compressed += 1;
            }
        }
        Ok(compressed)
    }

    /// Write the complete document: header, body, xref table and trailer.
    pub fn render(&mut self, writer: &mut dyn Writer) -> Result<(), PbError> {
        self.before_render();
        if self.compress {
            let n = self.compress_streams()?;
            log::debug!("compressed {} streams", n);
        }

        section::write_header(self.version, writer)?;
        self.render_body(writer)?;

        let used = self
            .store
            .objects()
            .filter_map(|o| {
                o.offset().map(|byte_offset| UsedObject {
                    number: o.reference().index as usize,
                    byte_offset,
                    generation: o.reference().generation as usize,
                })
            })
            .collect();
        let xref = Xref::from_used(used);
        let trailer = Trailer {
            size: xref.len(),
            root: self.store.root(),
            info: self.store.info(),
            extra: self.trailer.clone(),
        };
        let start_xref = section::write_tail(&xref, &trailer, writer)?;
        log::debug!("xref at {}, {} bytes total", start_xref, writer.position());
        Ok(())
    }

    pub fn render_file(&mut self, path: impl AsRef<Path>) -> Result<(), PbError> {
        let mut writer = CountingWriter::new(BufWriter::new(File::create(path)?));
        self.render(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl<S: ObjectStore + std::fmt::Debug> std::fmt::Debug for DocumentState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentState")
            .field("store", &self.store)
            .field("version", &self.version)
            .field("pages", &self.pages)
            .field("page", &self.page)
            .field("compress", &self.compress)
            .field("encrypt", &self.encrypt())
            .field("before_render_callbacks", &self.before_render_callbacks.len())
            .field("on_page_create_callback", &self.on_page_create_callback.is_some())
            .finish()
    }
}
