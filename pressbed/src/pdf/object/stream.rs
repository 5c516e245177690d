use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use pressbed_filters::{FilterParams, FilterRegistry, FilterSpec, FLATE_DECODE};

use crate::{
    error::PbError,
    pdf::{
        document::{K_DECODE_PARMS, K_FILTER, K_LENGTH},
        Array, Bytes, Dictionary, Name, Object,
    },
};

/// Where the bytes of a stream live.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamData {
    Inline(Bytes),
    /// Copied from disk while rendering. `length` is the file size when the
    /// stream was created.
    External { path: PathBuf, length: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stream {
    pub dictionary: Dictionary,
    pub data: StreamData,
}

impl Stream {
    pub fn new(dictionary: Dictionary, data: Vec<u8>) -> Self {
        Self {
            dictionary,
            data: StreamData::Inline(data.into()),
        }
    }

    /// A stream whose content is the file at `path`. The file must exist, it
    /// is not read until the stream is rendered.
    pub fn from_file(dictionary: Dictionary, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let length = fs::metadata(&path)?.len();
        Ok(Self {
            dictionary,
            data: StreamData::External { path, length },
        })
    }

    /// Length of the (encoded) stream data in bytes.
    pub fn len(&self) -> u64 {
        match &self.data {
            StreamData::Inline(b) => b.len() as u64,
            StreamData::External { length, .. } => *length,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_external(&self) -> bool {
        matches!(self.data, StreamData::External { .. })
    }

    /// The dictionary as written: `/Length` reflects the data.
    pub(crate) fn dictionary_with_length(&self) -> Dictionary {
        let mut updated_dict = self.dictionary.clone();
        updated_dict.insert(
            Name::from(K_LENGTH),
            Object::Integer(i64::try_from(self.len()).unwrap_or(i64::MAX)),
        );
        updated_dict
    }

    /// The stored (encoded) bytes, read from disk for external streams.
    pub fn raw_data(&self) -> std::io::Result<Vec<u8>> {
        match &self.data {
            StreamData::Inline(data) => Ok(data.to_vec()),
            StreamData::External { path, .. } => {
                let mut data = Vec::new();
                File::open(path)?.read_to_end(&mut data)?;
                Ok(data)
            }
        }
    }

    /// Copy of this stream with external data read into memory.
    pub fn load(&self) -> std::io::Result<Stream> {
        Ok(Stream::new(self.dictionary.clone(), self.raw_data()?))
    }

    /// The filter chain from `/Filter` and `/DecodeParms`, in decode order.
    pub fn filters(&self) -> Vec<FilterSpec> {
        let names: Vec<&Name> = match self.dictionary.get(K_FILTER) {
            Some(Object::Name(n)) => vec![n],
            Some(Object::Array(a)) => a.iter().filter_map(Object::name).collect(),
            _ => Vec::new(),
        };
        let params: Vec<Option<FilterParams>> = match self.dictionary.get(K_DECODE_PARMS) {
            Some(Object::Dictionary(d)) => vec![Some(filter_params(d))],
            Some(Object::Array(a)) => a.iter().map(|o| o.dictionary().map(filter_params)).collect(),
            _ => Vec::new(),
        };

        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| FilterSpec {
                name: String::from_utf8_lossy(name).into_owned(),
                params: params.get(i).cloned().flatten(),
            })
            .collect()
    }

    /// The stream content with all filters removed.
    pub fn decoded_data(&self, filters: &FilterRegistry) -> Result<Vec<u8>, PbError> {
        Ok(filters.decode_chain(&self.filters(), &self.raw_data()?)?)
    }

    /// Apply `FlateDecode` on top of the current encoding.
    ///
    /// Returns `false` if nothing changed: the stream already is flate
    /// encoded or its data lives on disk.
    pub fn compress(&mut self, filters: &FilterRegistry) -> Result<bool, PbError> {
        if self.filters().iter().any(|f| f.name == FLATE_DECODE) {
            return Ok(false);
        }
        let data = match &self.data {
            StreamData::Inline(data) => data,
            StreamData::External { path, .. } => {
                log::debug!("not compressing external stream {}", path.display());
                return Ok(false);
            }
        };

        let encoded = filters.encode(FLATE_DECODE, &data[..], None)?;
        self.data = StreamData::Inline(encoded.into());

        let flate = Object::Name(Name::from(FLATE_DECODE));
        let filter = match self.dictionary.shift_remove(K_FILTER) {
            None => flate,
            Some(Object::Array(mut a)) => {
                a.insert(0, flate);
                Object::Array(a)
            }
            Some(existing) => Object::Array(Array::from(vec![flate, existing])),
        };
        self.dictionary.insert(Name::from(K_FILTER), filter);

        // keep /DecodeParms aligned with /Filter
        if let Some(parms) = self.dictionary.get_mut(K_DECODE_PARMS) {
            match parms {
                Object::Array(a) => a.insert(0, Object::Null),
                other => {
                    let existing = std::mem::replace(other, Object::Null);
                    *other = Object::Array(Array::from(vec![Object::Null, existing]));
                }
            }
        }

        Ok(true)
    }
}

fn filter_params(d: &Dictionary) -> FilterParams {
    d.iter()
        .filter_map(|(k, v)| {
            let value = match v {
                Object::Integer(i) => *i,
                Object::Bool(b) => i64::from(*b),
                _ => return None,
            };
            Some((String::from_utf8_lossy(k).into_owned(), value))
        })
        .collect()
}
