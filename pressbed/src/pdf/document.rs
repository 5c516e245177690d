pub use self::{
    info::{DocumentInfo, DocumentOptions, DEFAULT_CREATOR, DEFAULT_PRODUCER},
    pages::{Page, PageCollection},
    state::{BeforeRenderCallback, DocumentState, PageCreateCallback},
};

pub mod info;
pub mod pages;
pub mod state;

/// Dictionary type names
pub(crate) mod dict_types {
    pub const PAGES: &[u8] = b"Pages";
    pub const PAGE: &[u8] = b"Page";
    pub const CATALOG: &[u8] = b"Catalog";
}

pub(crate) const K_TYPE: &[u8] = b"Type";
pub(crate) const K_PARENT: &[u8] = b"Parent";
pub(crate) const K_KIDS: &[u8] = b"Kids";
pub(crate) const K_COUNT: &[u8] = b"Count";
pub(crate) const K_PAGES: &[u8] = b"Pages";
pub(crate) const K_LENGTH: &[u8] = b"Length";
pub(crate) const K_FILTER: &[u8] = b"Filter";
pub(crate) const K_DECODE_PARMS: &[u8] = b"DecodeParms";
pub(crate) const K_VIEWER_PREFERENCES: &[u8] = b"ViewerPreferences";
pub(crate) const K_PRINT_SCALING: &[u8] = b"PrintScaling";
