use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use qrform_core::{Effect, EncodeFailure, EncodedImage, Msg};
use qrform_engine::{
    AtomicFileWriter, ClipboardProvider, EngineConfig, EngineEvent, EngineHandle,
};

use super::ui::commands::HostEvent;

/// Host-visible result of running one effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutcome {
    Copied,
    Saved(PathBuf),
}

pub struct EffectRunner {
    engine: EngineHandle,
    writer: AtomicFileWriter,
    clipboard: Box<dyn ClipboardProvider>,
    stop: Arc<AtomicBool>,
}

impl EffectRunner {
    pub fn new(
        config: EngineConfig,
        event_tx: mpsc::Sender<HostEvent>,
        clipboard: Box<dyn ClipboardProvider>,
    ) -> Self {
        let engine = EngineHandle::new(config.encode);
        let runner = Self {
            engine,
            writer: AtomicFileWriter::new(config.output_dir),
            clipboard,
            stop: Arc::new(AtomicBool::new(false)),
        };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) -> Vec<EffectOutcome> {
        let mut outcomes = Vec::new();
        for effect in effects {
            match effect {
                Effect::Encode { request_id, text } => {
                    engine_info!("Encode request_id={} text_len={}", request_id, text.len());
                    self.engine.encode(request_id, text);
                }
                Effect::CopyToClipboard { text } => match self.clipboard.set_text(&text) {
                    Ok(()) => {
                        engine_debug!("Copied {} bytes to clipboard", text.len());
                        outcomes.push(EffectOutcome::Copied);
                    }
                    Err(err) => engine_warn!("Clipboard write failed: {}", err),
                },
                Effect::SaveImage { file_name, image } => {
                    match self.writer.write(&file_name, image.png()) {
                        Ok(path) => {
                            engine_info!("Saved {} ({} bytes)", path.display(), image.png().len());
                            outcomes.push(EffectOutcome::Saved(path));
                        }
                        Err(err) => engine_error!("Failed to save {}: {}", file_name, err),
                    }
                }
            }
        }
        outcomes
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<HostEvent>) {
        let engine = self.engine.clone();
        let stop = self.stop.clone();
        // The loop's engine clone keeps the command channel open, so it must
        // exit on the stop flag for the engine thread to wind down.
        thread::spawn(move || loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            match engine.recv_timeout(Duration::from_millis(200)) {
                Ok(event) => {
                    if event_tx.send(HostEvent::Dispatch(map_event(event))).is_err() {
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    engine_warn!("Encode engine stopped; no further completions");
                    break;
                }
            }
        });
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::EncodeCompleted { request_id, result } => Msg::EncodeFinished {
            request_id,
            result: result
                .map(|png| EncodedImage::new(png.bytes, png.width))
                .map_err(|err| EncodeFailure::new(err.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use qrform_engine::{EncodeError, EncodedPng, MemoryClipboard};
    use tempfile::TempDir;

    use super::*;

    fn runner(dir: &TempDir, clipboard: MemoryClipboard) -> (EffectRunner, mpsc::Receiver<HostEvent>) {
        let (tx, rx) = mpsc::channel();
        let config = EngineConfig::default_with_output(dir.path().to_path_buf());
        (EffectRunner::new(config, tx, Box::new(clipboard)), rx)
    }

    #[test]
    fn copy_writes_input_to_clipboard() {
        let dir = TempDir::new().unwrap();
        let clipboard = MemoryClipboard::new();
        let (mut runner, _rx) = runner(&dir, clipboard.clone());

        let outcomes = runner.enqueue(vec![Effect::CopyToClipboard {
            text: "hello".into(),
        }]);

        assert_eq!(outcomes, vec![EffectOutcome::Copied]);
        assert_eq!(clipboard.contents().as_deref(), Some("hello"));
    }

    #[test]
    fn clipboard_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let (mut runner, _rx) = runner(&dir, MemoryClipboard::failing());

        let outcomes = runner.enqueue(vec![Effect::CopyToClipboard {
            text: "hello".into(),
        }]);

        assert!(outcomes.is_empty());
    }

    #[test]
    fn save_writes_png_bytes() {
        let dir = TempDir::new().unwrap();
        let (mut runner, _rx) = runner(&dir, MemoryClipboard::new());

        let outcomes = runner.enqueue(vec![Effect::SaveImage {
            file_name: "qrcode.png".into(),
            image: EncodedImage::new(b"png-bytes".to_vec(), 400),
        }]);

        let expected = dir.path().join("qrcode.png");
        assert_eq!(outcomes, vec![EffectOutcome::Saved(expected.clone())]);
        assert_eq!(fs::read(expected).unwrap(), b"png-bytes");
    }

    #[test]
    fn encode_completion_is_forwarded_as_message() {
        let dir = TempDir::new().unwrap();
        let (mut runner, rx) = runner(&dir, MemoryClipboard::new());

        let outcomes = runner.enqueue(vec![Effect::Encode {
            request_id: 3,
            text: "https://example.com".into(),
        }]);
        assert!(outcomes.is_empty());

        let event = rx.recv_timeout(Duration::from_secs(10)).expect("completion");
        match event {
            HostEvent::Dispatch(Msg::EncodeFinished { request_id, result }) => {
                assert_eq!(request_id, 3);
                let image = result.expect("encode ok");
                assert_eq!(image.width(), 400);
                assert!(!image.png().is_empty());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn dropping_runner_stops_event_loop() {
        let dir = TempDir::new().unwrap();
        let (runner, rx) = runner(&dir, MemoryClipboard::new());

        drop(runner);

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap_err(),
            mpsc::RecvTimeoutError::Disconnected
        );
    }

    #[test]
    fn engine_errors_map_to_failures() {
        let msg = map_event(EngineEvent::EncodeCompleted {
            request_id: 9,
            result: Err(EncodeError::DataTooLong),
        });
        assert_eq!(
            msg,
            Msg::EncodeFinished {
                request_id: 9,
                result: Err(EncodeFailure::new(EncodeError::DataTooLong.to_string())),
            }
        );

        let msg = map_event(EngineEvent::EncodeCompleted {
            request_id: 10,
            result: Ok(EncodedPng {
                bytes: vec![1, 2, 3],
                width: 400,
            }),
        });
        assert_eq!(
            msg,
            Msg::EncodeFinished {
                request_id: 10,
                result: Ok(EncodedImage::new(vec![1, 2, 3], 400)),
            }
        );
    }
}
