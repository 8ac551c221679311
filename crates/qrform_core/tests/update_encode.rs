use std::sync::Once;

use qrform_core::{
    update, AppState, CompletionPolicy, EncodeFailure, EncodePhase, EncodedImage, Msg,
    PreviewView, RequestId,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn image(tag: &str) -> EncodedImage {
    EncodedImage::new(tag.as_bytes().to_vec(), 400)
}

fn finish(state: AppState, request_id: RequestId, tag: &str) -> AppState {
    update(
        state,
        Msg::EncodeFinished {
            request_id,
            result: Ok(image(tag)),
        },
    )
    .0
}

fn type_a_then_ab(policy: CompletionPolicy) -> AppState {
    let (state, _) = update(AppState::with_policy(policy), Msg::InputChanged("a".into()));
    let (state, _) = update(state, Msg::InputChanged("ab".into()));
    assert_eq!(state.last_request_id(), 2);
    state
}

#[test]
fn phases_follow_an_encode_cycle() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.phase(), EncodePhase::Idle);

    let (state, _) = update(state, Msg::InputChanged("hello".into()));
    assert_eq!(state.phase(), EncodePhase::Encoding);

    let state = finish(state, 1, "hello");
    assert_eq!(state.phase(), EncodePhase::Ready);
    assert!(!state.view().loading);
}

#[test]
fn failure_keeps_previous_image_and_clears_loading() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("ok".into()));
    let state = finish(state, 1, "ok");

    let oversized = "x".repeat(8000);
    let (state, effects) = update(state, Msg::InputChanged(oversized));
    assert_eq!(effects.len(), 1);
    assert!(state.is_loading());

    let (mut state, effects) = update(
        state,
        Msg::EncodeFinished {
            request_id: 2,
            result: Err(EncodeFailure::new("data too long")),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.image(), Some(&image("ok")));
    assert_eq!(state.view().preview, PreviewView::Image(image("ok")));
    assert!(state.consume_dirty());
}

#[test]
fn failure_without_prior_image_returns_to_idle() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("y".repeat(8000)));
    let (state, _) = update(
        state,
        Msg::EncodeFinished {
            request_id: 1,
            result: Err(EncodeFailure::new("data too long")),
        },
    );

    assert_eq!(state.phase(), EncodePhase::Idle);
    assert!(state.image().is_none());
}

#[test]
fn latest_request_wins_discards_stale_completion() {
    init_logging();
    let state = type_a_then_ab(CompletionPolicy::LatestRequestWins);

    let state = finish(state, 2, "ab");
    assert!(state.is_loading());
    let state = finish(state, 1, "a");

    assert!(!state.is_loading());
    assert_eq!(state.image(), Some(&image("ab")));
}

#[test]
fn latest_request_wins_ignores_older_result_even_if_newest_is_pending() {
    init_logging();
    let state = type_a_then_ab(CompletionPolicy::LatestRequestWins);

    let state = finish(state, 1, "a");
    assert!(state.image().is_none());
    assert_eq!(state.view().preview, PreviewView::Loading);

    let state = finish(state, 2, "ab");
    assert_eq!(state.image(), Some(&image("ab")));
}

#[test]
fn last_arrival_wins_reproduces_stale_overwrite() {
    init_logging();
    let state = type_a_then_ab(CompletionPolicy::LastArrivalWins);

    let state = finish(state, 2, "ab");
    let state = finish(state, 1, "a");

    assert!(!state.is_loading());
    assert_eq!(state.image(), Some(&image("a")));
}

#[test]
fn in_order_completions_agree_under_both_policies() {
    init_logging();
    for policy in [
        CompletionPolicy::LatestRequestWins,
        CompletionPolicy::LastArrivalWins,
    ] {
        let state = type_a_then_ab(policy);
        let state = finish(state, 1, "a");
        let state = finish(state, 2, "ab");
        assert_eq!(state.image(), Some(&image("ab")), "{policy:?}");
        assert!(!state.is_loading());
    }
}

#[test]
fn unknown_completion_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (mut next, effects) = update(
        state.clone(),
        Msg::EncodeFinished {
            request_id: 42,
            result: Ok(image("ghost")),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next, state);
    assert!(!next.consume_dirty());
}

#[test]
fn encode_after_clearing_input_reuses_counter() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("one".into()));
    let state = finish(state, 1, "one");
    let (state, _) = update(state, Msg::InputChanged(String::new()));
    let (state, effects) = update(state, Msg::InputChanged("one".into()));

    assert_eq!(
        effects,
        vec![qrform_core::Effect::Encode {
            request_id: 2,
            text: "one".to_string(),
        }]
    );
    assert_eq!(state.image(), Some(&image("one")));
    assert_eq!(state.view().preview, PreviewView::Loading);
}
