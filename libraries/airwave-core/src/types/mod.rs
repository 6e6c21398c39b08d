mod episode;
mod ids;
mod media;
mod podcast;
mod station;

pub use episode::Episode;
pub use ids::{EpisodeId, PodcastId, StationId};
pub use media::{MediaLocator, MediaSource};
pub use podcast::Podcast;
pub use station::Station;
