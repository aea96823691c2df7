mod common;

use common::{Call, Outcome, RecordingEnv};
use control::keymap::KEY_TO_ACTION;
use control::{
    InputEvent, KeyOutcome, ManualControl, ScriptedEvents, SessionExit, SessionState,
};
use gridworld::Action;

/// Session that has already done its initial reset, as `start` would.
fn started(env: RecordingEnv, seed: Option<u64>) -> ManualControl<RecordingEnv> {
    let mut session = ManualControl::new(env, seed);
    session.reset(seed).unwrap();
    session
}

#[test]
fn start_resets_and_renders_before_reading_input() {
    let mut session = ManualControl::new(RecordingEnv::new(), Some(5));
    let mut events = ScriptedEvents::new([InputEvent::CloseRequested]);
    let report = session.start(2, &mut events).unwrap();

    assert_eq!(
        session.env().calls,
        vec![Call::Reset(Some(5)), Call::Render, Call::Close]
    );
    assert_eq!(report.slot, 2);
    assert_eq!(report.run_count, 1);
    assert_eq!(report.exit, Some(SessionExit::WindowClosed));
}

#[test]
fn unmapped_keys_change_nothing() {
    let mut session = started(RecordingEnv::new(), None);
    let before = session.env().calls.clone();
    for key in ["space", "a", "UP", "down", "left ctrl", ""] {
        assert_eq!(session.handle_key(key).unwrap(), KeyOutcome::Ignored);
    }
    assert_eq!(session.env().calls, before);
    assert_eq!(session.run_count(), 1);
    assert_eq!(session.state(), SessionState::AwaitingInput);
}

#[test]
fn every_mapped_key_steps_exactly_once() {
    for (key, action) in KEY_TO_ACTION {
        let mut session = started(RecordingEnv::new(), None);
        let outcome = session.handle_key(key).unwrap();
        assert_eq!(outcome, KeyOutcome::Stepped(action), "key {key}");
        assert_eq!(session.env().steps(), vec![action], "key {key}");
        // A non-terminal step is followed by a render.
        assert_eq!(session.env().calls.last(), Some(&Call::Render));
    }
}

#[test]
fn second_reset_closes_session() {
    let mut session = ManualControl::new(RecordingEnv::new(), Some(1));
    session.reset(Some(1)).unwrap();
    assert!(!session.is_closed());
    session.reset(None).unwrap();
    assert!(session.is_closed());
    assert_eq!(session.run_count(), 2);
    // The closing reset still reaches the environment.
    assert_eq!(session.env().resets(), vec![Some(1), None]);
    assert_eq!(session.env().calls.last(), Some(&Call::Render));
    assert_eq!(session.report().exit, Some(SessionExit::ResetLimit));
}

#[test]
fn shutdown_key_closes_without_reset() {
    let mut session = started(RecordingEnv::new(), None);
    assert_eq!(session.handle_key("escape").unwrap(), KeyOutcome::Shutdown);
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.run_count(), 1);
    assert_eq!(session.env().calls.last(), Some(&Call::Close));
    assert_eq!(session.env().resets().len(), 1);
}

#[test]
fn backspace_resets_without_seed() {
    let mut session = started(RecordingEnv::new(), Some(9));
    assert_eq!(session.handle_key("backspace").unwrap(), KeyOutcome::Reset);
    assert_eq!(session.env().resets(), vec![Some(9), None]);
}

/// `["up", "left", "backspace", "up"]`: the reset closes the session and the
/// trailing key is never read.
#[test]
fn loop_exits_before_processing_keys_after_limit() {
    let mut session = ManualControl::new(RecordingEnv::new(), None);
    let mut events = ScriptedEvents::keys(["up", "left", "backspace", "up"]);
    let report = session.start(1, &mut events).unwrap();

    assert_eq!(session.env().steps(), vec![Action::Forward, Action::Left]);
    assert_eq!(report.run_count, 2);
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(events.remaining(), 1);
    assert_eq!(report.exit, Some(SessionExit::ResetLimit));
}

#[test]
fn termination_resets_with_configured_seed() {
    let env = RecordingEnv::with_outcomes([Outcome::terminated(0.5)]);
    let mut session = started(env, Some(3));
    session.handle_key("up").unwrap();

    assert_eq!(session.run_count(), 2);
    assert_eq!(session.env().resets(), vec![Some(3), Some(3)]);
    let report = session.report();
    assert_eq!(report.episodes_finished, 1);
    assert!((report.total_reward - 0.5).abs() < f32::EPSILON);
}

#[test]
fn truncation_also_resets() {
    let env = RecordingEnv::with_outcomes([Outcome::default(), Outcome::truncated()]);
    let mut session = started(env, None);
    session.handle_key("right").unwrap();
    assert_eq!(session.run_count(), 1);
    session.handle_key("right").unwrap();
    assert_eq!(session.run_count(), 2);
    assert!(session.is_closed());
}

#[test]
fn closed_session_ignores_further_keys() {
    let mut session = started(RecordingEnv::new(), None);
    session.handle_key("escape").unwrap();
    let before = session.env().calls.clone();
    assert_eq!(session.handle_key("up").unwrap(), KeyOutcome::Ignored);
    assert_eq!(session.env().calls, before);
}

#[test]
fn exhausted_input_closes_environment() {
    let mut session = ManualControl::new(RecordingEnv::new(), None);
    let mut events = ScriptedEvents::keys(["up"]);
    let report = session.start(4, &mut events).unwrap();
    assert!(report.input_exhausted());
    assert_eq!(report.steps, 1);
    assert_eq!(session.env().calls.last(), Some(&Call::Close));
}
