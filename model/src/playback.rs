use crate::{EntityTrack, PathRegistry, PlaybackClock, TickOutcome};

/// The clock and the paths it positions, kept consistent: every transition updates the clock and
/// then every current position, before returning.
///
/// Frames should only be scheduled while playing. Pausing, seeking, reaching the end, reloading,
/// and stopping all cancel that.
pub struct Playback {
    clock: PlaybackClock,
    registry: PathRegistry,
}

impl Playback {
    pub fn new(tracks: &[EntityTrack], clock: PlaybackClock) -> Self {
        let registry = PathRegistry::new(tracks, clock.current_time());
        Self { clock, registry }
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn registry(&self) -> &PathRegistry {
        &self.registry
    }

    pub fn toggle_play(&mut self) {
        if self.clock.toggle_play() {
            self.registry.project_all(self.clock.current_time());
        }
    }

    /// Pauses at the new time (clamped to the range), with positions already updated.
    pub fn seek(&mut self, time: f64) {
        let time = self.clock.seek(time);
        self.registry.project_all(time);
    }

    /// Back to the start, paused.
    pub fn reset(&mut self) {
        self.seek(self.clock.start_time());
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.clock.set_speed(speed);
    }

    /// Advances by some real time in seconds. Does nothing while paused.
    pub fn tick(&mut self, real_dt: f64) -> TickOutcome {
        let outcome = self.clock.tick(real_dt);
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Advanced(time) => {
                self.registry.project_all(time);
            }
            TickOutcome::ReachedEnd => {
                // Everybody finishes at their own final position, even if it was recorded
                // before the global end.
                self.registry.snap_to_end();
            }
        }
        outcome
    }

    /// Should the caller keep scheduling frames?
    pub fn wants_frames(&self) -> bool {
        self.clock.is_playing()
    }

    /// Swaps in a new dataset. Playback stops and every path is rebuilt.
    pub fn reload(&mut self, tracks: &[EntityTrack], clock: PlaybackClock) {
        self.clock = clock;
        self.registry = PathRegistry::new(tracks, clock.current_time());
    }

    /// Pauses, so nothing keeps scheduling frames. Use when the playback view is going away.
    pub fn stop(&mut self) {
        if self.clock.is_playing() {
            self.clock.toggle_play();
        }
    }
}
