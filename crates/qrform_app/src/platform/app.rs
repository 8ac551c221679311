use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use qrform_core::{update, AppState, Msg};
use qrform_engine::{to_data_url, SystemClipboard};

use super::config::AppConfig;
use super::effects::{EffectOutcome, EffectRunner};
use super::ui;
use super::ui::commands::HostEvent;

pub fn run_app(config: AppConfig) -> io::Result<()> {
    engine_info!(
        "Starting qrform (output_dir={:?}, completion={:?}, log_level={})",
        config.output_dir,
        config.completion,
        config.log.level
    );

    let (event_tx, event_rx) = mpsc::channel::<HostEvent>();
    let runner = EffectRunner::new(
        config.engine_config(),
        event_tx.clone(),
        Box::new(SystemClipboard::new()),
    );
    let mut host = Host::new(AppState::with_policy(config.completion), runner, io::stdout());

    spawn_input_reader(event_tx.clone());

    // Background tick to coalesce rendering.
    thread::spawn(move || {
        let interval = Duration::from_millis(75);
        while event_tx.send(HostEvent::Dispatch(Msg::Tick)).is_ok() {
            thread::sleep(interval);
        }
    });

    host.print_line(ui::commands::HELP_TEXT)?;
    host.render()?;

    while let Ok(event) = event_rx.recv() {
        if !host.handle_event(event)? {
            break;
        }
    }

    engine_info!("qrform stopped");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        read_events(stdin.lock(), &event_tx);
    });
}

/// Forwards one event per input line until EOF, `/quit` or a read error.
///
/// Bytes that are not UTF-8 are replaced rather than rejected.
fn read_events<R: BufRead>(mut reader: R, event_tx: &mpsc::Sender<HostEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let event = ui::commands::parse_line(&String::from_utf8_lossy(&buf));
                let quit = event == HostEvent::Quit;
                if event_tx.send(event).is_err() || quit {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => {
                engine_warn!("Failed to read input: {}", err);
                break;
            }
        }
    }
    let _ = event_tx.send(HostEvent::Quit);
}

/// Owns the state and applies events to it on the dispatch thread.
struct Host<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> Host<W> {
    fn new(state: AppState, runner: EffectRunner, out: W) -> Self {
        Self { state, runner, out }
    }

    /// Returns `false` once the session should end.
    fn handle_event(&mut self, event: HostEvent) -> io::Result<bool> {
        match event {
            HostEvent::Dispatch(msg) => self.dispatch_msg(msg)?,
            HostEvent::ShowImage => match self.state.image() {
                Some(image) => {
                    let url = to_data_url(image.png());
                    self.print_line(&url)?;
                }
                None => self.print_line("No QR code yet.")?,
            },
            HostEvent::Help => self.print_line(ui::commands::HELP_TEXT)?,
            HostEvent::Unknown(line) => {
                self.print_line(&format!("Unknown command {line:?}. Try /help."))?
            }
            HostEvent::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        for outcome in self.runner.enqueue(effects) {
            match outcome {
                EffectOutcome::Copied => self.print_line("Copied input to clipboard.")?,
                EffectOutcome::Saved(path) => {
                    self.print_line(&format!("Saved {}", path.display()))?
                }
            }
        }

        if was_dirty {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        for line in ui::render::render(&self.state.view()) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}
