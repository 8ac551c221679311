use crate::{EncodedImage, RequestId};

/// File name used when the current image is saved.
pub const DOWNLOAD_FILE_NAME: &str = "qrcode.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render `text` as a QR image; completion comes back as `Msg::EncodeFinished`.
    Encode { request_id: RequestId, text: String },
    CopyToClipboard { text: String },
    SaveImage {
        file_name: String,
        image: EncodedImage,
    },
}
