
/// One real second of playback at speed 1 covers this many seconds of data, so speed is in
/// "data minutes per real second".
pub const DATA_SECONDS_PER_REAL_SECOND: f64 = 60.0;

/// The virtual clock driving playback. It's either playing or paused; "at the end" is just paused
/// with `current_time == end_time`.
///
/// `start_time <= current_time <= end_time` and `speed > 0` always hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackClock {
    is_playing: bool,
    speed: f64,
    current_time: f64,
    start_time: f64,
    end_time: f64,
}

/// What a tick did, so the caller knows how to update positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Paused, so nothing happened
    Idle,
    /// Still playing, now at this time
    Advanced(f64),
    /// Hit the end of the range and paused there
    ReachedEnd,
}

impl PlaybackClock {
    /// Paused at the start, at normal speed. If the bounds are backwards, they're swapped.
    pub fn new(start_time: f64, end_time: f64) -> Self {
        let (start_time, end_time) = if start_time <= end_time {
            (start_time, end_time)
        } else {
            warn!("Clock bounds backwards: {start_time} then {end_time}");
            (end_time, start_time)
        };
        Self {
            is_playing: false,
            speed: 1.0,
            current_time: start_time,
            start_time,
            end_time,
        }
    }

    /// A degenerate clock pinned to one instant, for when there's no usable data.
    pub fn at_instant(time: f64) -> Self {
        Self::new(time, time)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn is_at_end(&self) -> bool {
        self.current_time >= self.end_time
    }

    /// How far through the range, from 0 to 100. An empty range is always at 0.
    pub fn progress_percent(&self) -> f64 {
        let duration = self.end_time - self.start_time;
        if duration > 0.0 {
            (self.current_time - self.start_time) / duration * 100.0
        } else {
            0.0
        }
    }

    /// Pauses if playing. Otherwise resumes; if already at the end, playback restarts from the
    /// beginning. Returns true in that last case, since the current time jumped.
    pub fn toggle_play(&mut self) -> bool {
        if self.is_playing {
            self.is_playing = false;
            return false;
        }
        self.is_playing = true;
        if self.is_at_end() {
            self.current_time = self.start_time;
            return true;
        }
        false
    }

    /// Jumps to a time, clamped to the range, and pauses. A non-finite time only pauses. Returns
    /// the time actually used.
    pub fn seek(&mut self, time: f64) -> f64 {
        self.is_playing = false;
        if time.is_finite() {
            self.current_time = time.clamp(self.start_time, self.end_time);
        } else {
            warn!("Ignoring seek to {time}");
        }
        self.current_time
    }

    /// Doesn't touch the current time or whether we're playing. Speeds that aren't positive and
    /// finite are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        } else {
            warn!("Ignoring playback speed {speed}");
        }
    }

    /// Advances by some amount of real time, in seconds.
    pub fn tick(&mut self, real_dt: f64) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Idle;
        }
        // Frame timers can jitter backwards; never rewind
        let real_dt = if real_dt.is_finite() {
            real_dt.max(0.0)
        } else {
            0.0
        };

        let time = self.current_time + real_dt * self.speed * DATA_SECONDS_PER_REAL_SECOND;
        if time >= self.end_time {
            self.current_time = self.end_time;
            self.is_playing = false;
            return TickOutcome::ReachedEnd;
        }
        self.current_time = time;
        TickOutcome::Advanced(time)
    }
}
