use crate::{Filter, FilterError, FilterParams};

pub const DCT_DECODE: &str = "DCTDecode";

/// JPEG data is stored as is. The filter only names the encoding so readers
/// know how to interpret the bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DctDecode;

impl Filter for DctDecode {
    fn name(&self) -> &'static str {
        DCT_DECODE
    }

    fn encode(&self, data: &[u8], _params: Option<&FilterParams>) -> Result<Vec<u8>, FilterError> {
        Ok(data.to_vec())
    }

    fn decode(&self, data: &[u8], _params: Option<&FilterParams>) -> Result<Vec<u8>, FilterError> {
        Ok(data.to_vec())
    }
}
