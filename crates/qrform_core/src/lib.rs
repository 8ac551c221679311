//! QR form core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, DOWNLOAD_FILE_NAME};
pub use msg::Msg;
pub use state::{
    AppState, CompletionPolicy, ContentKind, EncodeFailure, EncodedImage, EncodePhase, RequestId,
};
pub use update::update;
pub use view_model::{AppViewModel, KindButtonView, PreviewView, EMPTY_PREVIEW_HINT};
