//! What the player can be asked to play

use super::episode::Episode;
use super::station::Station;
use crate::error::{AirwaveError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Resolved location of playable media
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaLocator {
    /// Network resource (http/https)
    Remote(Url),

    /// File on the device
    Local(PathBuf),
}

impl MediaLocator {
    /// Parse a locator from a URL string
    ///
    /// `file://` URLs become [`MediaLocator::Local`]; `http`/`https` stay remote.
    /// Other schemes are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input)
            .map_err(|e| AirwaveError::invalid_locator(format!("{input}: {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(Self::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Self::Local)
                .map_err(|()| AirwaveError::invalid_locator(input.to_string())),
            other => Err(AirwaveError::invalid_locator(format!(
                "unsupported scheme '{other}' in {input}"
            ))),
        }
    }

    /// Whether playback depends on the network
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for MediaLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A play target: either an on-demand episode or a live station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaSource {
    Episode(Episode),
    Station(Station),
}

impl MediaSource {
    /// Display title
    pub fn title(&self) -> &str {
        match self {
            Self::Episode(episode) => &episode.title,
            Self::Station(station) => &station.title,
        }
    }

    /// Engine locator
    pub fn locator(&self) -> MediaLocator {
        match self {
            Self::Episode(episode) => episode.locator(),
            Self::Station(station) => station.locator(),
        }
    }

    /// Artwork URL, if any
    pub fn artwork_url(&self) -> Option<&Url> {
        match self {
            Self::Episode(episode) => episode.artwork_url.as_ref(),
            Self::Station(station) => station.artwork_url.as_ref(),
        }
    }

    /// Live streams have no seekable position
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Station(_))
    }
}

impl From<Episode> for MediaSource {
    fn from(episode: Episode) -> Self {
        Self::Episode(episode)
    }
}

impl From<Station> for MediaSource {
    fn from(station: Station) -> Self {
        Self::Station(station)
    }
}
