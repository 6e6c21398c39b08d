use super::playlist::Playlist;
use airwave_core::{Episode, Station};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Play intent parked until the network returns
#[derive(Debug, Clone, PartialEq)]
pub enum PendingPlay {
    /// Episode, with the explicit playlist it was started from (if any)
    Episode {
        episode: Episode,
        playlist: Option<Playlist>,
    },

    /// Live station
    Station(Station),
}

impl PendingPlay {
    /// Title of the parked source
    pub fn title(&self) -> &str {
        match self {
            Self::Episode { episode, .. } => &episode.title,
            Self::Station(station) => &station.title,
        }
    }
}

/// Controller state
///
/// Exactly one variant is active; there are no parallel flags that can
/// disagree with it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlaybackState {
    /// Nothing loaded
    #[default]
    Idle,

    /// Episode playing from `playlist[position]`
    PlayingEpisode {
        episode: Episode,
        playlist: Playlist,
        position: usize,
    },

    /// Episode paused by the user or at the end of the playlist
    PausedEpisode {
        episode: Episode,
        playlist: Playlist,
        position: usize,
    },

    /// Live station playing
    PlayingStation { station: Station },

    /// Live station paused by the user
    PausedStation { station: Station },

    /// Live station paused because the stream stalled while offline
    BufferingStation { station: Station },

    /// A play intent is waiting for the network
    AwaitingConnectivity {
        pending: PendingPlay,
        /// Station that was current when the intent was parked
        also_paused_from_station: Option<Station>,
    },
}

/// Discriminant of [`PlaybackState`], for events and snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Idle,
    PlayingEpisode,
    PausedEpisode,
    PlayingStation,
    PausedStation,
    BufferingStation,
    AwaitingConnectivity,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::PlayingEpisode => "playing episode",
            Self::PausedEpisode => "paused episode",
            Self::PlayingStation => "playing station",
            Self::PausedStation => "paused station",
            Self::BufferingStation => "buffering station",
            Self::AwaitingConnectivity => "awaiting connectivity",
        };
        f.write_str(name)
    }
}

impl PlaybackState {
    /// State discriminant
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::PlayingEpisode { .. } => StateKind::PlayingEpisode,
            Self::PausedEpisode { .. } => StateKind::PausedEpisode,
            Self::PlayingStation { .. } => StateKind::PlayingStation,
            Self::PausedStation { .. } => StateKind::PausedStation,
            Self::BufferingStation { .. } => StateKind::BufferingStation,
            Self::AwaitingConnectivity { .. } => StateKind::AwaitingConnectivity,
        }
    }

    /// Whether the user intends audio to be playing
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::PlayingEpisode { .. } | Self::PlayingStation { .. })
    }

    /// Current episode, if an episode is loaded
    pub fn current_episode(&self) -> Option<&Episode> {
        match self {
            Self::PlayingEpisode { episode, .. } | Self::PausedEpisode { episode, .. } => {
                Some(episode)
            }
            _ => None,
        }
    }

    /// Station shown as current, including one parked behind a pending intent
    pub fn current_station(&self) -> Option<&Station> {
        match self {
            Self::PlayingStation { station }
            | Self::PausedStation { station }
            | Self::BufferingStation { station } => Some(station),
            Self::AwaitingConnectivity {
                also_paused_from_station,
                ..
            } => also_paused_from_station.as_ref(),
            _ => None,
        }
    }

    /// Playlist of the current episode
    pub fn playlist(&self) -> Option<&Playlist> {
        match self {
            Self::PlayingEpisode { playlist, .. } | Self::PausedEpisode { playlist, .. } => {
                Some(playlist)
            }
            _ => None,
        }
    }

    /// Intent waiting for the network
    pub fn pending(&self) -> Option<&PendingPlay> {
        match self {
            Self::AwaitingConnectivity { pending, .. } => Some(pending),
            _ => None,
        }
    }

    /// Title of whatever is displayed as current
    pub fn display_title(&self) -> Option<&str> {
        if let Some(episode) = self.current_episode() {
            return Some(&episode.title);
        }
        if let Some(station) = self.current_station() {
            return Some(&station.title);
        }
        self.pending().map(PendingPlay::title)
    }
}
