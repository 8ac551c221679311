use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_trace};

use crate::encode::{EncodeSettings, Encoder, QrPngEncoder};
use crate::{EncodeError, EngineEvent, RequestId};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory receiving saved images.
    pub output_dir: PathBuf,
    pub encode: EncodeSettings,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            encode: EncodeSettings::default(),
        }
    }
}

enum EngineCommand {
    Encode { request_id: RequestId, text: String },
}

/// Runs encode requests concurrently on a background tokio runtime.
///
/// Completions are delivered in the order they finish, not the order they
/// were requested.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: EncodeSettings) -> Self {
        Self::with_encoder(Arc::new(QrPngEncoder::new()), settings)
    }

    pub fn with_encoder(encoder: Arc<dyn Encoder>, settings: EncodeSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let settings = Arc::new(settings);

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start encode runtime: {}", err);
                    reject_all(&cmd_rx, &event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let encoder = encoder.clone();
                let settings = settings.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(encoder.as_ref(), &settings, command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn encode(&self, request_id: RequestId, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Encode {
            request_id,
            text: text.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?
            .recv_timeout(timeout)
    }
}

async fn handle_command(
    encoder: &dyn Encoder,
    settings: &EncodeSettings,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Encode { request_id, text } => {
            engine_trace!("Encoding request {} ({} bytes)", request_id, text.len());
            let result = encoder.encode(&text, settings).await;
            let _ = event_tx.send(EngineEvent::EncodeCompleted { request_id, result });
        }
    }
}

fn reject_all(
    cmd_rx: &mpsc::Receiver<EngineCommand>,
    event_tx: &mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Encode { request_id, .. }) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::EncodeCompleted {
            request_id,
            result: Err(EncodeError::Worker(reason.to_string())),
        });
    }
}
