use airwave_playback::{PlayerConfig, StateKind};
use airwave_sim::{Runner, Script, SimConfig, SimError, SimulationSettings};

fn config() -> SimConfig {
    SimConfig {
        player: PlayerConfig {
            tick_interval_ms: 50,
            ..PlayerConfig::default()
        },
        simulation: SimulationSettings {
            script: None,
            log_snapshots: false,
        },
    }
}

const LIBRARY: &str = r#"
[[podcasts]]
id = "news"
title = "Morning News"
feed_url = "https://feeds.example.com/news.xml"

[[podcasts.episodes]]
id = "mon"
title = "Monday"
audio_url = "https://cdn.example.com/mon.mp3"
published_at = "2024-03-04T06:00:00Z"
media_duration = 900.0

[[podcasts.episodes]]
id = "tue"
title = "Tuesday"
audio_url = "https://cdn.example.com/tue.mp3"
published_at = "2024-03-05T06:00:00Z"
media_duration = 840.0

[[stations]]
id = "jazz"
title = "Jazz FM"
stream_url = "https://radio.example.com/jazz"
"#;

fn script(steps: &str) -> Script {
    Script::from_toml_str(&format!("{LIBRARY}\n{steps}")).unwrap()
}

#[tokio::test]
async fn station_survives_a_tunnel() {
    let script = script(
        r#"
[[steps]]
action = "play_station"
station = "jazz"

[[steps]]
action = "offline"

[[steps]]
action = "expect_state"
state = "playing_station"

[[steps]]
action = "stall"

[[steps]]
action = "expect_state"
state = "buffering_station"

[[steps]]
action = "online"

[[steps]]
action = "expect_state"
state = "playing_station"
"#,
    );

    let summary = Runner::new(config()).run(&script).await.unwrap();

    assert_eq!(summary.final_state, StateKind::PlayingStation);
    assert_eq!(summary.title.as_deref(), Some("Jazz FM"));
    assert!(summary.connected);
    assert!(summary.notice.is_none());
}

#[tokio::test]
async fn offline_start_waits_for_the_network() {
    let script = Script::from_toml_str(&format!(
        "start_online = false\n{LIBRARY}\n{}",
        r#"
[[steps]]
action = "play_episode"
episode = "tue"

[[steps]]
action = "expect_state"
state = "awaiting_connectivity"

[[steps]]
action = "online"

[[steps]]
action = "expect_state"
state = "playing_episode"
"#
    ))
    .unwrap();

    let summary = Runner::new(config()).run(&script).await.unwrap();

    assert_eq!(summary.final_state, StateKind::PlayingEpisode);
    assert_eq!(summary.title.as_deref(), Some("Tuesday"));
}

#[tokio::test]
async fn finishing_an_episode_advances_the_playlist() {
    let script = script(
        r#"
[[steps]]
action = "play_episode"
episode = "tue"

[[steps]]
action = "finish_item"

[[steps]]
action = "expect_state"
state = "playing_episode"
"#,
    );

    let summary = Runner::new(config()).run(&script).await.unwrap();

    assert_eq!(summary.title.as_deref(), Some("Monday"));
    // Duration learned from the platform player is written back
    assert_eq!(summary.progress["tue"].duration, Some(840.0));
}

#[tokio::test]
async fn progress_is_saved_on_shutdown() {
    let script = script(
        r#"
[[steps]]
action = "play_episode"
episode = "mon"

[[steps]]
action = "seek"
seconds = 300.0

[[steps]]
action = "toggle"

[[steps]]
action = "expect_state"
state = "paused_episode"
"#,
    );

    let summary = Runner::new(config()).run(&script).await.unwrap();

    assert_eq!(summary.final_state, StateKind::PausedEpisode);
    let saved = summary.progress["mon"].progress;
    assert!((300.0..301.0).contains(&saved), "saved {saved}");
}

#[tokio::test]
async fn unreachable_host_surfaces_a_notice() {
    let script = script(
        r#"
[[steps]]
action = "unreachable"
host = "radio.example.com"

[[steps]]
action = "play_station"
station = "jazz"

[[steps]]
action = "expect_state"
state = "idle"
"#,
    );

    let summary = Runner::new(config()).run(&script).await.unwrap();

    assert_eq!(summary.notice.as_deref(), Some("Unable to play Jazz FM"));
}

#[tokio::test]
async fn failed_expectation_stops_the_run() {
    let script = script(
        r#"
[[steps]]
action = "play_station"
station = "jazz"

[[steps]]
action = "expect_state"
state = "paused_station"

[[steps]]
action = "toggle"
"#,
    );

    let result = Runner::new(config()).run(&script).await;

    assert!(matches!(
        result,
        Err(SimError::Expectation {
            step: 2,
            expected: StateKind::PausedStation,
            actual: StateKind::PlayingStation,
        })
    ));
}

#[tokio::test]
async fn demo_script_runs_to_completion() {
    let summary = Runner::new(config()).run(&Script::demo().unwrap()).await.unwrap();

    assert_eq!(summary.final_state, StateKind::PausedStation);
    assert!(summary.progress["news-0304"].progress >= 300.0);
}
