use abstutil::Timer;
use store::SampleStore;

use crate::load::{load_tracks, now_seconds, time_bounds};
use crate::render::Frame;
use crate::{DataLog, EntityTrack, LoadError, Playback, PlaybackClock, RenderedPath, Selection};

/// Everything about one loaded dataset: the tracks, playback over them, and what's selected.
///
/// Loading never fails outright. Problems become a single `notice` for the user, and the session
/// degrades to something still usable.
pub struct Session {
    pub tracks: Vec<EntityTrack>,
    pub selection: Selection,
    /// None only after a fatal error; there's nothing to play
    pub playback: Option<Playback>,
    pub notice: Option<LoadError>,
    /// Describes where the data came from
    pub source: Option<String>,
}

impl Session {
    /// Nothing loaded yet. The clock sits at the current wall time.
    pub fn empty() -> Self {
        Self {
            tracks: Vec::new(),
            selection: Selection::default(),
            playback: Some(Playback::new(&[], PlaybackClock::at_instant(now_seconds()))),
            notice: None,
            source: None,
        }
    }

    pub fn load(store: Option<&mut dyn SampleStore>, timer: &mut Timer) -> Self {
        let store = match store {
            Some(store) => store,
            None => {
                return Self::failed(
                    LoadError::Configuration("no data source was given".to_string()),
                    None,
                );
            }
        };
        let source = store.describe();

        let loaded = match load_tracks(store, timer) {
            Ok(loaded) => loaded,
            Err(err) => {
                return Self::failed(err, Some(source));
            }
        };

        let (clock, notice) = match time_bounds(&loaded.tracks) {
            Some((start, end)) => {
                let notice = if loaded.dropped > 0 {
                    Some(LoadError::MalformedSamples {
                        origin: source.clone(),
                        dropped: loaded.dropped,
                    })
                } else {
                    None
                };
                (PlaybackClock::new(start, end), notice)
            }
            None => {
                let notice = if loaded.tracks.is_empty() {
                    LoadError::NoEntities(source.clone())
                } else {
                    LoadError::NoSamples {
                        origin: source.clone(),
                        entities: loaded.tracks.len(),
                    }
                };
                (PlaybackClock::at_instant(now_seconds()), Some(notice))
            }
        };
        if let Some(ref notice) = notice {
            warn!("{notice}");
        }

        let playback = Playback::new(&loaded.tracks, clock);
        let selection = Selection::new(loaded.tracks.iter().map(|t| t.name.clone()).collect());
        Self {
            tracks: loaded.tracks,
            selection,
            playback: Some(playback),
            notice,
            source: Some(source),
        }
    }

    /// Nothing can be played. `err` should be fatal.
    pub fn failed(err: LoadError, source: Option<String>) -> Self {
        error!("Couldn't load data: {err}");
        Self {
            tracks: Vec::new(),
            selection: Selection::default(),
            playback: None,
            notice: Some(err),
            source,
        }
    }

    /// Replaces everything with a new dataset. An existing playback is reloaded in place, so
    /// anything watching for frames sees the subscription end.
    pub fn reload(&mut self, store: Option<&mut dyn SampleStore>, timer: &mut Timer) {
        let mut fresh = Self::load(store, timer);
        if let (Some(mut playback), Some(new_playback)) =
            (self.playback.take(), fresh.playback.as_ref())
        {
            playback.reload(&fresh.tracks, *new_playback.clock());
            fresh.playback = Some(playback);
        }
        *self = fresh;
    }

    pub fn is_playable(&self) -> bool {
        self.playback.is_some()
    }

    /// One line about what's loaded, or a hint to go load something
    pub fn summary(&self) -> String {
        match self.source {
            Some(ref source) => format!("{} entities from {source}", self.tracks.len()),
            None => "No data loaded; use Open data".to_string(),
        }
    }

    /// The selected paths, in load order
    pub fn visible_paths(&self) -> Vec<&RenderedPath> {
        match self.playback {
            Some(ref playback) => self.selection.filter(playback.registry()),
            None => Vec::new(),
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            paths: self.visible_paths(),
            playback_active: self
                .playback
                .as_ref()
                .map(|p| p.clock().is_playing())
                .unwrap_or(false),
        }
    }

    pub fn data_log(&self) -> DataLog {
        DataLog::new(&self.visible_paths())
    }
}
