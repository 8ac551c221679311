use engine_logging::{engine_debug, engine_warn};

use crate::{AppState, Effect, Msg, DOWNLOAD_FILE_NAME};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::KindSelected(kind) => {
            state.set_kind(kind);
            Vec::new()
        }
        Msg::InputChanged(text) => {
            if !state.set_input(text) {
                return (state, Vec::new());
            }
            // An emptied input keeps the last image on screen.
            if state.input().is_empty() {
                return (state, Vec::new());
            }
            let request_id = state.issue_request();
            vec![Effect::Encode {
                request_id,
                text: state.input().to_owned(),
            }]
        }
        Msg::EncodeFinished { request_id, result } => {
            if !state.settle_request(request_id) {
                engine_debug!("Ignoring completion for unknown request {}", request_id);
                return (state, Vec::new());
            }
            match result {
                Ok(image) if state.accepts_result_of(request_id) => {
                    state.set_image(image);
                }
                Ok(_) => {
                    engine_debug!(
                        "Discarding stale image for request {} (latest is {})",
                        request_id,
                        state.last_request_id()
                    );
                }
                Err(failure) => {
                    engine_warn!("Encode request {} failed: {}", request_id, failure);
                }
            }
            Vec::new()
        }
        Msg::CopyClicked => vec![Effect::CopyToClipboard {
            text: state.input().to_owned(),
        }],
        Msg::DownloadClicked => match state.image() {
            Some(image) => vec![Effect::SaveImage {
                file_name: DOWNLOAD_FILE_NAME.to_string(),
                image: image.clone(),
            }],
            None => Vec::new(),
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
