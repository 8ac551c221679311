#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked one of the content-type buttons.
    KindSelected(crate::ContentKind),
    /// User edited the input box.
    InputChanged(String),
    /// Engine completion for an encode request.
    EncodeFinished {
        request_id: crate::RequestId,
        result: Result<crate::EncodedImage, crate::EncodeFailure>,
    },
    /// User clicked the copy button next to the input.
    CopyClicked,
    /// User clicked Download.
    DownloadClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
