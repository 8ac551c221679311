//! QR form engine: encoding pipeline and effect execution.
mod clipboard;
mod data_url;
mod encode;
mod engine;
mod persist;
mod raster;
mod types;

pub use clipboard::{ClipboardError, ClipboardProvider, MemoryClipboard, SystemClipboard};
pub use data_url::{to_data_url, PNG_DATA_URL_PREFIX};
pub use encode::{EncodeSettings, Encoder, QrPngEncoder};
pub use engine::{EngineConfig, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use raster::{rasterize, symbol_side};
pub use types::{EncodeError, EncodedPng, EngineEvent, RequestId};
