use crate::{
    crypt::EncryptionKey,
    pdf::{Dictionary, Name, Object, PdfString},
};

pub const DEFAULT_CREATOR: &str = "pressbed";
pub const DEFAULT_PRODUCER: &str = "pressbed";

const K_TITLE: &[u8] = b"Title";
const K_AUTHOR: &[u8] = b"Author";
const K_SUBJECT: &[u8] = b"Subject";
const K_KEYWORDS: &[u8] = b"Keywords";
const K_CREATOR: &[u8] = b"Creator";
const K_PRODUCER: &[u8] = b"Producer";

/// The document information dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    /// Entries without a field above, e.g. `/CreationDate`.
    pub extra: Dictionary,
}

impl DocumentInfo {
    /// Fill in `Creator` and `Producer` when they are not set.
    pub fn normalized(mut self) -> Self {
        self.creator.get_or_insert_with(|| DEFAULT_CREATOR.to_owned());
        self.producer.get_or_insert_with(|| DEFAULT_PRODUCER.to_owned());
        self
    }
}

impl From<&DocumentInfo> for Dictionary {
    fn from(info: &DocumentInfo) -> Self {
        let mut dict = Dictionary::default();
        let fields = [
            (K_TITLE, &info.title),
            (K_AUTHOR, &info.author),
            (K_SUBJECT, &info.subject),
            (K_KEYWORDS, &info.keywords),
            (K_CREATOR, &info.creator),
            (K_PRODUCER, &info.producer),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                dict.insert(Name::from(key), Object::String(PdfString::from(value.as_str())));
            }
        }
        for (k, v) in &info.extra {
            if !dict.contains_key(k) {
                dict.insert(k.clone(), v.clone());
            }
        }
        dict
    }
}

/// Everything fixed when a document is created.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub info: DocumentInfo,
    /// Extra trailer entries.
    pub trailer: Dictionary,
    /// Flate encode uncompressed streams before rendering.
    pub compress: bool,
    /// Encrypt every object with this key.
    pub encryption_key: Option<EncryptionKey>,
    /// Ask viewers not to scale the document when printing.
    pub print_scaling: bool,
    pub version: (u8, u8),
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            info: DocumentInfo::default(),
            trailer: Dictionary::default(),
            compress: false,
            encryption_key: None,
            print_scaling: false,
            version: (1, 3),
        }
    }
}

impl DocumentOptions {
    pub fn info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    pub fn trailer(mut self, trailer: Dictionary) -> Self {
        self.trailer = trailer;
        self
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn encryption_key(mut self, key: EncryptionKey) -> Self {
        self.encryption_key = Some(key);
        self
    }

    pub fn print_scaling(mut self, print_scaling: bool) -> Self {
        self.print_scaling = print_scaling;
        self
    }

    pub fn version(mut self, major: u8, minor: u8) -> Self {
        self.version = (major, minor);
        self
    }
}
