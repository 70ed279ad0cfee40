// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the playback session driven by a tokio runtime:
//! interval polling, deferred play requests and end-of-stream handling.

use approx::assert_abs_diff_eq;
use pimo_player::error::MediaError;
use pimo_player::video_player::{
    MediaSession, Notification, Phase, PlayMode, PollDriver, SimulatedHandle, SimulatedResource,
};
use std::time::Duration;

const POLL: Duration = Duration::from_millis(16);

fn ready_session(driver: PollDriver) -> (MediaSession<SimulatedResource>, SimulatedHandle) {
    let resource = SimulatedResource::new();
    let handle = resource.handle();
    handle.set_next_duration(60.0);
    let mut session = MediaSession::new(resource, driver);
    session.load("movie.mp4");
    session.pump();
    (session, handle)
}

#[tokio::test(start_paused = true)]
async fn test_interval_driver_republishes_time() {
    let (mut session, handle) = ready_session(PollDriver::Interval(POLL));

    let outcome = session.play().await;
    session.resolve_play(outcome).unwrap();
    assert!(session.is_polling());

    handle.advance(3.0);
    tokio::time::sleep(POLL * 3).await;
    assert!(session.pump() > 0, "poll ticks should reach the inbox");

    assert_abs_diff_eq!(session.state().current_time, 3.0);
    assert!(session
        .drain_notifications()
        .contains(&Notification::TimeUpdate(3.0)));
}

#[tokio::test(start_paused = true)]
async fn test_pause_stops_interval_ticks() {
    let (mut session, _handle) = ready_session(PollDriver::Interval(POLL));

    let outcome = session.play().await;
    session.resolve_play(outcome).unwrap();
    tokio::time::sleep(POLL * 2).await;

    session.pause();
    session.pump();
    session.drain_notifications();

    tokio::time::sleep(POLL * 10).await;
    assert_eq!(session.pump(), 0, "no ticks after pause");
    assert!(session.drain_notifications().is_empty());
    assert_eq!(session.phase(), Phase::Paused);
}

#[tokio::test]
async fn test_deferred_play_resolves_later() {
    let (mut session, handle) = ready_session(PollDriver::External);
    handle.set_play_mode(PlayMode::Defer);

    let pending = session.play();
    assert_eq!(handle.pending_plays(), 1);
    assert!(!session.state().playing);

    handle.resolve_deferred_plays();
    let outcome = pending.await;
    session.resolve_play(outcome).unwrap();

    assert!(session.state().playing);
    assert_eq!(session.phase(), Phase::Playing);
}

#[tokio::test]
async fn test_pause_supersedes_deferred_play() {
    let (mut session, handle) = ready_session(PollDriver::External);
    handle.set_play_mode(PlayMode::Defer);

    let pending = session.play();
    session.pause();

    let outcome = pending.await;
    assert!(outcome.result.is_err(), "the resource interrupts the request");
    assert_eq!(session.resolve_play(outcome), Ok(()));
    assert!(!session.state().playing);
}

#[tokio::test]
async fn test_rejected_deferred_play_is_returned() {
    let (mut session, handle) = ready_session(PollDriver::External);
    handle.set_play_mode(PlayMode::Defer);

    let pending = session.play();
    handle.reject_deferred_plays("user gesture required");

    let outcome = pending.await;
    let result = session.resolve_play(outcome);
    assert!(matches!(result, Err(MediaError::PlayRejected(_))));
    assert!(!session.state().playing);
    assert!(session.state().error.is_none(), "rejections are not durable");
}

#[tokio::test(start_paused = true)]
async fn test_playing_to_the_end() {
    let (mut session, handle) = ready_session(PollDriver::Interval(POLL));

    let outcome = session.play().await;
    session.resolve_play(outcome).unwrap();

    handle.advance(61.0);
    tokio::time::sleep(POLL).await;
    session.pump();

    let state = session.state();
    assert!(state.ended);
    assert!(!state.playing);
    assert_abs_diff_eq!(state.current_time, 60.0);
    assert!(!session.is_polling());
    assert_eq!(session.phase(), Phase::Ended);
    assert!(session.drain_notifications().contains(&Notification::Ended));
}

#[tokio::test]
async fn test_loading_a_new_source_supersedes_pending_play() {
    let (mut session, handle) = ready_session(PollDriver::External);
    handle.set_play_mode(PlayMode::Defer);
    let pending = session.play();

    session.load("other.mp4");
    handle.resolve_deferred_plays();
    let outcome = pending.await;
    session.resolve_play(outcome).unwrap();

    assert!(!session.state().playing, "stale outcome must not start playback");
    assert_eq!(session.source(), Some("other.mp4"));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_a_playing_session_ends_its_poll_task() {
    let metrics = tokio::runtime::Handle::current().metrics();
    let baseline = metrics.num_alive_tasks();
    let (mut session, _handle) = ready_session(PollDriver::Interval(POLL));

    let outcome = session.play().await;
    session.resolve_play(outcome).unwrap();
    tokio::time::sleep(POLL * 2).await;
    assert_eq!(metrics.num_alive_tasks(), baseline + 1);

    drop(session);
    tokio::time::sleep(POLL * 2).await;
    assert_eq!(metrics.num_alive_tasks(), baseline);
}
