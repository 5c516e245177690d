use std::io::{Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::{Filter, FilterError, FilterParams};

pub const FLATE_DECODE: &str = "FlateDecode";

/// zlib/deflate compression.
#[derive(Debug, Clone, Copy)]
pub struct FlateDecode {
    level: Compression,
}

impl FlateDecode {
    pub fn new() -> Self {
        Self {
            level: Compression::default(),
        }
    }

    /// Levels above 9 are clamped.
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for FlateDecode {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for FlateDecode {
    fn name(&self) -> &'static str {
        FLATE_DECODE
    }

    fn encode(&self, data: &[u8], _params: Option<&FilterParams>) -> Result<Vec<u8>, FilterError> {
        let failed = |e: std::io::Error| FilterError::EncodeFailed {
            filter: FLATE_DECODE.into(),
            msg: e.to_string(),
        };

        let mut enc = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), self.level);
        enc.write_all(data).map_err(failed)?;
        enc.finish().map_err(failed)
    }

    fn decode(&self, data: &[u8], _params: Option<&FilterParams>) -> Result<Vec<u8>, FilterError> {
        let mut dec = ZlibDecoder::new(data);
        let mut out = Vec::with_capacity(data.len() * 2);
        dec.read_to_end(&mut out).map_err(|e| FilterError::CorruptStream {
            filter: FLATE_DECODE.into(),
            msg: e.to_string(),
        })?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compresses_repetitive_input() {
        let input = b"BT /F1 12 Tf 72 712 Td (Hello) Tj ET\n".repeat(64);
        let encoded = FlateDecode::new().encode(&input, None).unwrap();
        assert!(encoded.len() < input.len());
        assert_eq!(FlateDecode::new().decode(&encoded, None).unwrap(), input);
    }

    #[test]
    fn output_is_zlib_framed() {
        let encoded = FlateDecode::new().encode(b"abc", None).unwrap();
        // zlib header: deflate method, 32K window
        assert_eq!(encoded[0], 0x78);
    }

    #[test]
    fn level_does_not_change_content() {
        let input = b"0123456789".repeat(100);
        let fast = FlateDecode::with_level(1).encode(&input, None).unwrap();
        let best = FlateDecode::with_level(42).encode(&input, None).unwrap();
        assert_eq!(FlateDecode::new().decode(&fast, None).unwrap(), input);
        assert_eq!(FlateDecode::new().decode(&best, None).unwrap(), input);
    }

    #[test]
    fn garbage_is_corrupt() {
        let err = FlateDecode::new().decode(b"this is not deflate data", None).unwrap_err();
        assert!(matches!(
            err,
            FilterError::CorruptStream { ref filter, .. } if filter == FLATE_DECODE
        ));
    }
}
