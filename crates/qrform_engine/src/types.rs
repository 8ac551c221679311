use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    EncodeCompleted {
        request_id: RequestId,
        result: Result<EncodedPng, EncodeError>,
    },
}

/// A rendered symbol as PNG bytes. The image is `width` x `width` pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPng {
    pub bytes: Vec<u8>,
    pub width: u32,
}

impl std::fmt::Debug for EncodedPng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedPng")
            .field("bytes", &self.bytes.len())
            .field("width", &self.width)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("data too long for a QR symbol at the default error correction level")]
    DataTooLong,
    #[error("text cannot be encoded: {0}")]
    Unencodable(String),
    #[error("png encoding failed: {0}")]
    Raster(String),
    #[error("encode worker failed: {0}")]
    Worker(String),
}

impl From<qrcode::types::QrError> for EncodeError {
    fn from(err: qrcode::types::QrError) -> Self {
        match err {
            qrcode::types::QrError::DataTooLong => EncodeError::DataTooLong,
            other => EncodeError::Unencodable(other.to_string()),
        }
    }
}
