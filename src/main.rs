// SPDX-License-Identifier: MPL-2.0
//! Headless demo: plays the configured queue against the simulated resource
//! and logs every transition.

use pimo_player::app::{Effect, HostCallbacks, Message, Player};
use pimo_player::config::{self, PlayerConfig};
use pimo_player::domain::playlist::PlaylistItem;
use pimo_player::domain::time::format_time;
use pimo_player::video_player::{Phase, PollDriver, SimulatedResource};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
pimo-player - headless playback demo

USAGE:
  pimo-player [--config PATH] [--seconds N]

OPTIONS:
  --config PATH   Player settings (TOML). Defaults to the user settings file.
  --seconds N     Wall-clock run time [default: 10]
  -h, --help      Print help
";

const DEFAULT_RUN_SECS: u64 = 10;
const DEMO_ITEM_SECS: f64 = 20.0;
/// Simulated media seconds per wall-clock second.
const TIME_SCALE: f64 = 10.0;
const STEP: Duration = Duration::from_millis(100);

struct Args {
    config: Option<PathBuf>,
    seconds: u64,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let parsed = Args {
        config: args.opt_value_from_str("--config")?,
        seconds: args
            .opt_value_from_str("--seconds")?
            .unwrap_or(DEFAULT_RUN_SECS),
    };
    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unused arguments");
    }
    Ok(Some(parsed))
}

fn demo_queue() -> Vec<PlaylistItem> {
    ["Opening", "Interlude", "Finale"]
        .iter()
        .enumerate()
        .map(|(i, title)| {
            PlaylistItem::new(format!("demo-{i}"), format!("demo://{i}.mp4"), *title)
                .with_duration(DEMO_ITEM_SECS)
        })
        .collect()
}

fn load_config(path: Option<&PathBuf>) -> pimo_player::error::Result<PlayerConfig> {
    let mut config = match path {
        Some(path) => config::load_from_path(path)?,
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                tracing::warn!(%warning, "using default settings");
            }
            config
        }
    };

    if config.playlist.items.is_empty() && config.media.initial_source().is_none() {
        tracing::info!("no media configured, playing the demo queue");
        config.playlist.items = demo_queue();
        config.playback.autoplay = true;
    }
    Ok(config)
}

fn logging_callbacks() -> HostCallbacks {
    HostCallbacks::new()
        .on_play(|| tracing::info!("playing"))
        .on_pause(|| tracing::info!("paused"))
        .on_ended(|| tracing::info!("ended"))
        .on_time_update(|time| tracing::debug!(position = %format_time(time), "time update"))
        .on_volume_change(|volume, muted| tracing::info!(volume, muted, "volume changed"))
        .on_quality_change(|quality| tracing::info!(quality, "quality changed"))
        .on_fullscreen_change(|fullscreen| tracing::info!(fullscreen, "fullscreen changed"))
        .on_picture_in_picture(|active| tracing::info!(active, "mini player changed"))
        .on_playlist_item_change(|index, item| {
            tracing::info!(index, title = %item.title, "playlist item changed");
        })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pimo_player=info")),
        )
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };
    let config = load_config(args.config.as_ref())?;

    let resource = SimulatedResource::new();
    let media = resource.handle();
    media.set_next_duration(DEMO_ITEM_SECS);

    let driver = PollDriver::Interval(config.controls.poll_interval());
    let mut player =
        Player::with_driver(resource, &config, driver).with_callbacks(logging_callbacks());

    let mut effects: VecDeque<Effect> = player.start().into();
    if effects.is_empty() && player.session().source().is_some() {
        effects.extend(player.handle(Message::Play));
    }

    // Stands in for a real window: applies mode changes and reports its mode.
    let mut window_fullscreen = false;
    let deadline = Instant::now() + Duration::from_secs(args.seconds);
    let mut clock = tokio::time::interval(STEP);
    while Instant::now() < deadline {
        while let Some(effect) = effects.pop_front() {
            let follow_up = match effect {
                Effect::AwaitPlay(pending) => {
                    let outcome = pending.await;
                    player.handle(Message::PlayResolved(outcome))
                }
                Effect::SetWindowMode(enter) => {
                    window_fullscreen = enter;
                    player.handle(Message::FullscreenChanged(window_fullscreen))
                }
                Effect::QueryWindowMode => {
                    player.handle(Message::FullscreenChanged(window_fullscreen))
                }
            };
            effects.extend(follow_up);
        }

        clock.tick().await;
        media.advance(STEP.as_secs_f64() * TIME_SCALE);
        effects.extend(player.handle(Message::Tick(Instant::now())));

        match player.phase() {
            Phase::Error => break,
            Phase::Ended if player.playlist().is_last() && effects.is_empty() => break,
            _ => {}
        }
    }

    tracing::info!(
        position = %format_time(player.state().current_time),
        phase = ?player.phase(),
        "demo finished"
    );
    Ok(())
}
