use crate::{ContentKind, EncodedImage};

/// Shown in the preview panel before the first image exists.
pub const EMPTY_PREVIEW_HINT: &str = "Enter content to generate QR code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub kinds: Vec<KindButtonView>,
    pub kind: ContentKind,
    pub heading: String,
    pub placeholder: &'static str,
    pub input: String,
    pub loading: bool,
    pub can_download: bool,
    pub preview: PreviewView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindButtonView {
    pub kind: ContentKind,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    /// An encode request is in flight; takes precedence over a stored image.
    Loading,
    Image(EncodedImage),
    Empty { hint: &'static str },
}
