use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::view_model::{AppViewModel, KindButtonView, PreviewView, EMPTY_PREVIEW_HINT};

pub type RequestId = u64;

/// Content type picked by the user. Only affects the texts shown around the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    #[default]
    Url,
    Text,
    Email,
    Phone,
    Sms,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Url,
        ContentKind::Text,
        ContentKind::Email,
        ContentKind::Phone,
        ContentKind::Sms,
    ];

    pub fn placeholder(self) -> &'static str {
        match self {
            ContentKind::Url => "Enter URL (e.g., https://example.com)",
            ContentKind::Text => "Enter text message",
            ContentKind::Email => "Enter email address",
            ContentKind::Phone => "Enter phone number",
            ContentKind::Sms => "Enter phone number for SMS",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Url => "URL",
            ContentKind::Text => "Text",
            ContentKind::Email => "Email",
            ContentKind::Phone => "Phone",
            ContentKind::Sms => "SMS",
        }
    }

    /// Lowercase identifier, also accepted by [`ContentKind::from_key`].
    pub fn key(self) -> &'static str {
        match self {
            ContentKind::Url => "url",
            ContentKind::Text => "text",
            ContentKind::Email => "email",
            ContentKind::Phone => "phone",
            ContentKind::Sms => "sms",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Heading shown above the input, e.g. `Url Content`.
    pub fn heading(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => format!("{}{} Content", first.to_ascii_uppercase(), chars.as_str()),
            None => "Content".to_string(),
        }
    }
}

/// Decides which completion may overwrite the displayed image when encode
/// requests overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Only the most recently issued request may replace the image.
    #[default]
    LatestRequestWins,
    /// Every successful completion replaces the image in arrival order.
    LastArrivalWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodePhase {
    Idle,
    Encoding,
    Ready,
}

/// PNG bytes of a rendered QR symbol.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    png: Arc<[u8]>,
    width: u32,
}

impl EncodedImage {
    pub fn new(png: impl Into<Arc<[u8]>>, width: u32) -> Self {
        Self {
            png: png.into(),
            width,
        }
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Side length in pixels; the image is square.
    pub fn width(&self) -> u32 {
        self.width
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("png_len", &self.png.len())
            .field("width", &self.width)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeFailure {
    pub message: String,
}

impl EncodeFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EncodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    kind: ContentKind,
    input: String,
    image: Option<EncodedImage>,
    in_flight: BTreeSet<RequestId>,
    last_issued: RequestId,
    policy: CompletionPolicy,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CompletionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn phase(&self) -> EncodePhase {
        if self.is_loading() {
            EncodePhase::Encoding
        } else if self.image.is_some() {
            EncodePhase::Ready
        } else {
            EncodePhase::Idle
        }
    }

    /// Id of the most recently issued encode request, 0 before the first one.
    pub fn last_request_id(&self) -> RequestId {
        self.last_issued
    }

    pub fn view(&self) -> AppViewModel {
        let preview = if self.is_loading() {
            PreviewView::Loading
        } else if let Some(image) = &self.image {
            PreviewView::Image(image.clone())
        } else {
            PreviewView::Empty {
                hint: EMPTY_PREVIEW_HINT,
            }
        };

        AppViewModel {
            kinds: ContentKind::ALL
                .into_iter()
                .map(|kind| KindButtonView {
                    kind,
                    label: kind.label(),
                    selected: kind == self.kind,
                })
                .collect(),
            kind: self.kind,
            heading: self.kind.heading(),
            placeholder: self.kind.placeholder(),
            input: self.input.clone(),
            loading: self.is_loading(),
            can_download: self.image.is_some(),
            preview,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_kind(&mut self, kind: ContentKind) {
        if self.kind != kind {
            self.kind = kind;
            self.mark_dirty();
        }
    }

    /// Stores the text; returns false when it equals the current input.
    pub(crate) fn set_input(&mut self, text: String) -> bool {
        if self.input == text {
            return false;
        }
        self.input = text;
        self.mark_dirty();
        true
    }

    pub(crate) fn issue_request(&mut self) -> RequestId {
        self.last_issued += 1;
        self.in_flight.insert(self.last_issued);
        self.mark_dirty();
        self.last_issued
    }

    /// Removes the request from the in-flight set; false if it was unknown.
    pub(crate) fn settle_request(&mut self, request_id: RequestId) -> bool {
        let known = self.in_flight.remove(&request_id);
        if known {
            self.mark_dirty();
        }
        known
    }

    pub(crate) fn accepts_result_of(&self, request_id: RequestId) -> bool {
        match self.policy {
            CompletionPolicy::LatestRequestWins => request_id == self.last_issued,
            CompletionPolicy::LastArrivalWins => true,
        }
    }

    pub(crate) fn set_image(&mut self, image: EncodedImage) {
        self.image = Some(image);
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
