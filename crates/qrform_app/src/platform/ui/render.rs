use qrform_core::{AppViewModel, KindButtonView, PreviewView, DOWNLOAD_FILE_NAME};

/// Renders the form as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);

    lines.push(render_kind_bar(&view.kinds));

    let input_line = if view.input.is_empty() {
        format!("{}: ({})", view.heading, view.placeholder)
    } else {
        format!("{}: {}", view.heading, view.input)
    };
    lines.push(input_line);

    let preview_line = match &view.preview {
        PreviewView::Loading => "QR: generating...".to_string(),
        PreviewView::Image(image) => format!(
            "QR: {}x{} PNG, {} bytes",
            image.width(),
            image.width(),
            format_with_commas(image.png().len() as u64)
        ),
        PreviewView::Empty { hint } => format!("QR: {hint}"),
    };
    lines.push(preview_line);

    if view.can_download && !view.loading {
        lines.push(format!("     /download saves {DOWNLOAD_FILE_NAME}, /show prints it"));
    }

    lines
}

fn render_kind_bar(kinds: &[KindButtonView]) -> String {
    kinds
        .iter()
        .map(|button| {
            if button.selected {
                format!("[{}]", button.label)
            } else {
                format!(" {} ", button.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
