use fnv::FnvHashMap;

use crate::{DctDecode, Filter, FilterError, FilterParams, FilterSpec, FlateDecode, StreamPayload};

/// Filters by name.
pub struct FilterRegistry {
    filters: FnvHashMap<&'static str, Box<dyn Filter>>,
}

impl FilterRegistry {
    /// A registry without any filters.
    pub fn new() -> Self {
        Self {
            filters: FnvHashMap::default(),
        }
    }

    /// A registry with `FlateDecode` and `DCTDecode`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FlateDecode::new()));
        registry.register(Box::new(DctDecode));
        registry
    }

    /// Add a filter. A filter registered under the same name is replaced and
    /// returned.
    pub fn register(&mut self, filter: Box<dyn Filter>) -> Option<Box<dyn Filter>> {
        self.filters.insert(filter.name(), filter)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.filters.get(name).map(|f| &**f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Registered filter names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.filters.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn lookup(&self, name: &str) -> Result<&dyn Filter, FilterError> {
        self.get(name).ok_or_else(|| FilterError::UnknownFilter(name.to_owned()))
    }

    pub fn encode<'a>(
        &self,
        name: &str,
        payload: impl Into<StreamPayload<'a>>,
        params: Option<&FilterParams>,
    ) -> Result<Vec<u8>, FilterError> {
        let payload = payload.into();
        if let StreamPayload::Custom(custom) = payload {
            if let Some(encoded) = custom.encode(name, params) {
                log::trace!("custom {} encoding", name);
                return encoded;
            }
        }
        self.lookup(name)?.encode(payload.as_bytes(), params)
    }

    pub fn decode<'a>(
        &self,
        name: &str,
        payload: impl Into<StreamPayload<'a>>,
        params: Option<&FilterParams>,
    ) -> Result<Vec<u8>, FilterError> {
        let payload = payload.into();
        if let StreamPayload::Custom(custom) = payload {
            if let Some(decoded) = custom.decode(name, params) {
                log::trace!("custom {} decoding", name);
                return decoded;
            }
        }
        self.lookup(name)?.decode(payload.as_bytes(), params)
    }

    /// Encode `data` so that decoding with `chain` in listed order restores it.
    pub fn encode_chain(&self, chain: &[FilterSpec], data: &[u8]) -> Result<Vec<u8>, FilterError> {
        let mut out = data.to_vec();
        for spec in chain.iter().rev() {
            out = self.encode(&spec.name, &out, spec.params.as_ref())?;
        }
        Ok(out)
    }

    /// Decode `data` through `chain`, first filter first.
    pub fn decode_chain(&self, chain: &[FilterSpec], data: &[u8]) -> Result<Vec<u8>, FilterError> {
        let mut out = data.to_vec();
        for spec in chain {
            out = self.decode(&spec.name, &out, spec.params.as_ref())?;
        }
        Ok(out)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry").field("filters", &self.names()).finish()
    }
}
