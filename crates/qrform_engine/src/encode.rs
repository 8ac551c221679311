use std::io::Cursor;

use image::ImageFormat;
use qrcode::{Color, QrCode};

use crate::raster::rasterize;
use crate::{EncodeError, EncodedPng};

/// Fixed rendering configuration handed to the encoder with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSettings {
    /// Target image side in pixels.
    pub width: u32,
    /// Quiet border in modules.
    pub margin: u32,
    /// RGBA of dark modules.
    pub dark: [u8; 4],
    /// RGBA of light modules and the margin.
    pub light: [u8; 4],
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            width: 400,
            margin: 2,
            dark: [0x00, 0x00, 0x00, 0xff],
            light: [0xff, 0xff, 0xff, 0xff],
        }
    }
}

#[async_trait::async_trait]
pub trait Encoder: Send + Sync {
    async fn encode(&self, text: &str, settings: &EncodeSettings)
        -> Result<EncodedPng, EncodeError>;
}

/// Encodes text as a QR symbol (error correction level M) rendered to PNG.
#[derive(Debug, Clone, Default)]
pub struct QrPngEncoder;

impl QrPngEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous encode used by the async wrapper on a blocking thread.
    pub fn encode_blocking(text: &str, settings: &EncodeSettings) -> Result<EncodedPng, EncodeError> {
        let code = QrCode::new(text.as_bytes())?;
        let size = code.width();
        let modules: Vec<bool> = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();

        let img = rasterize(&modules, size, settings);
        let width = img.width();
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| EncodeError::Raster(err.to_string()))?;

        Ok(EncodedPng { bytes, width })
    }
}

#[async_trait::async_trait]
impl Encoder for QrPngEncoder {
    async fn encode(
        &self,
        text: &str,
        settings: &EncodeSettings,
    ) -> Result<EncodedPng, EncodeError> {
        let text = text.to_owned();
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || Self::encode_blocking(&text, &settings))
            .await
            .map_err(|err| EncodeError::Worker(err.to_string()))?
    }
}
