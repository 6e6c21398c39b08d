//! Controller state types

mod playlist;
mod state;

pub use playlist::Playlist;
pub use state::{PendingPlay, PlaybackState, StateKind};
