use qrform_core::{ContentKind, Msg};

pub const HELP_TEXT: &str = "Type text and press Enter to encode it. Commands: \
/kind <url|text|email|phone|sms>, /copy, /download, /show, /help, /quit. \
Start a line with // to enter text beginning with /";

/// Everything the host event loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Dispatch(Msg),
    ShowImage,
    Help,
    Unknown(String),
    Quit,
}

/// Maps one line of terminal input to a host event.
///
/// Lines starting with `/` are commands; anything else replaces the input text.
/// A leading `//` enters the rest of the line, starting with one `/`, as text.
pub fn parse_line(line: &str) -> HostEvent {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if let Some(text) = line.strip_prefix("//") {
        return HostEvent::Dispatch(Msg::InputChanged(format!("/{text}")));
    }
    let Some(command) = line.strip_prefix('/') else {
        return HostEvent::Dispatch(Msg::InputChanged(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("kind", Some(key)) => match ContentKind::from_key(key) {
            Some(kind) => HostEvent::Dispatch(Msg::KindSelected(kind)),
            None => HostEvent::Unknown(line.to_string()),
        },
        ("copy", None) => HostEvent::Dispatch(Msg::CopyClicked),
        ("download", None) => HostEvent::Dispatch(Msg::DownloadClicked),
        ("show", None) => HostEvent::ShowImage,
        ("help", None) => HostEvent::Help,
        ("quit" | "exit", None) => HostEvent::Quit,
        _ => HostEvent::Unknown(line.to_string()),
    }
}
