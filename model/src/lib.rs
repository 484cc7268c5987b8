#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod clock;
mod color;
mod data_log;
mod format;
mod load;
mod playback;
mod registry;
pub mod render;
mod sample;
mod selection;
mod session;
mod trajectory;

pub use store;
use store::{CheapID, EntityName};

pub use self::clock::{PlaybackClock, TickOutcome, DATA_SECONDS_PER_REAL_SECOND};
pub use self::color::{color_for, PALETTE};
pub use self::data_log::{DataLog, LogRow};
pub use self::format::{format_timestamp, format_timestamp_in};
pub use self::load::{load_tracks, now_seconds, time_bounds, LoadError, LoadedTracks};
pub use self::playback::Playback;
pub use self::registry::{PathRegistry, RenderedPath};
pub use self::sample::{LatLng, PositionSample};
pub use self::selection::Selection;
pub use self::session::Session;
pub use self::trajectory::{interpolate, project, Trajectory};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityID(pub usize);

impl CheapID for EntityID {
    fn new(x: usize) -> Self {
        Self(x)
    }
}

/// Everything loaded about one entity.
pub struct EntityTrack {
    pub id: EntityID,
    pub name: EntityName,
    pub trajectory: Trajectory,
}
