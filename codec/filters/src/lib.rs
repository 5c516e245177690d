//! Stream filters for PDF object payloads.
//!
//! A filter is a named, bidirectional transform. `encode` prepares payload
//! bytes for storage inside a stream object, `decode` restores them. For every
//! filter `decode(encode(x)) == x` holds.
//!
//! Filters are looked up by name through a [`FilterRegistry`]. A payload can
//! bring its own implementation for a filter by wrapping itself in
//! [`StreamPayload::Custom`].

use fnv::FnvHashMap;

pub use self::{
    dct::{DctDecode, DCT_DECODE},
    error::FilterError,
    flate::{FlateDecode, FLATE_DECODE},
    registry::FilterRegistry,
};

mod dct;
mod error;
mod flate;
mod registry;

/// Decode parameters of a filter (`/DecodeParms`).
pub type FilterParams = FnvHashMap<String, i64>;

/// A named stream transform.
pub trait Filter {
    /// Name of the filter as it appears in the `/Filter` entry.
    fn name(&self) -> &'static str;

    fn encode(&self, data: &[u8], params: Option<&FilterParams>) -> Result<Vec<u8>, FilterError>;

    fn decode(&self, data: &[u8], params: Option<&FilterParams>) -> Result<Vec<u8>, FilterError>;
}

/// A payload that knows how to encode or decode itself for some filters.
///
/// Returning `None` from `encode` or `decode` hands the bytes returned by
/// `as_bytes` to the registered filter instead.
pub trait CustomCodec {
    fn as_bytes(&self) -> &[u8];

    fn encode(
        &self,
        _filter: &str,
        _params: Option<&FilterParams>,
    ) -> Option<Result<Vec<u8>, FilterError>> {
        None
    }

    fn decode(
        &self,
        _filter: &str,
        _params: Option<&FilterParams>,
    ) -> Option<Result<Vec<u8>, FilterError>> {
        None
    }
}

/// Input of a filter operation.
#[derive(Clone, Copy)]
pub enum StreamPayload<'a> {
    Bytes(&'a [u8]),
    Custom(&'a dyn CustomCodec),
}

impl<'a> StreamPayload<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            StreamPayload::Bytes(b) => b,
            StreamPayload::Custom(c) => c.as_bytes(),
        }
    }
}

impl<'a> From<&'a [u8]> for StreamPayload<'a> {
    fn from(b: &'a [u8]) -> Self {
        StreamPayload::Bytes(b)
    }
}

impl<'a> From<&'a Vec<u8>> for StreamPayload<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        StreamPayload::Bytes(&b[..])
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for StreamPayload<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        StreamPayload::Bytes(&b[..])
    }
}

impl<'a> std::fmt::Debug for StreamPayload<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamPayload::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            StreamPayload::Custom(c) => f.debug_tuple("Custom").field(&c.as_bytes().len()).finish(),
        }
    }
}

/// One entry of a stream's filter chain: a filter name plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: String,
    pub params: Option<FilterParams>,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: FilterParams) -> Self {
        self.params = Some(params);
        self
    }
}
