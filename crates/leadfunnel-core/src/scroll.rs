use crate::math::clamp_progress;

/// Maps window scroll to progress for a section pinned over
/// `pin_factor` viewport heights.
///
/// Progress is measured against the scroll track, the tall element that
/// contains the pinned section. Its document offset is recorded with
/// [`PinnedScroll::anchor`] and reused on every scroll event, since the
/// pinned section itself reports a client top of 0 for the whole pin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinnedScroll {
    pub pin_factor: f32,
    /// Time constant of the scrub lag in milliseconds; 0 disables it.
    pub scrub_ms: f32,
    track_top: Option<f32>,
}

impl Default for PinnedScroll {
    fn default() -> Self {
        Self {
            pin_factor: 3.0,
            scrub_ms: 2000.0,
            track_top: None,
        }
    }
}

impl PinnedScroll {
    pub fn new(pin_factor: f32, scrub_ms: f32) -> Self {
        Self {
            pin_factor,
            scrub_ms,
            track_top: None,
        }
    }

    /// Record the track's document offset from its client rect top and the
    /// window scroll at the time of measurement. Non-finite input is ignored.
    pub fn anchor(&mut self, client_top: f32, scroll_y: f32) {
        let top = client_top + scroll_y;
        if top.is_finite() {
            self.track_top = Some(top);
        }
    }

    pub fn track_top(&self) -> Option<f32> {
        self.track_top
    }

    /// Progress for `scroll_y` against the anchored track; 0 until anchored.
    pub fn progress_at(&self, scroll_y: f32, viewport_height: f32) -> f32 {
        match self.track_top {
            Some(top) => self.progress(scroll_y, top, viewport_height),
            None => 0.0,
        }
    }

    pub fn progress(&self, scroll_y: f32, section_top: f32, viewport_height: f32) -> f32 {
        let distance = self.pin_factor * viewport_height;
        if !(distance.is_finite() && distance > 0.0) {
            return 0.0;
        }
        clamp_progress((scroll_y - section_top) / distance)
    }

    /// Move `current` toward `target` over `dt_ms` with exponential lag.
    ///
    /// Never overshoots; snaps once within 1e-4.
    pub fn scrub(&self, current: f32, target: f32, dt_ms: f32) -> f32 {
        let current = clamp_progress(current);
        let target = clamp_progress(target);
        if self.scrub_ms <= 0.0 || !dt_ms.is_finite() {
            return target;
        }
        let dt = dt_ms.max(0.0);
        let alpha = 1.0 - (-dt / self.scrub_ms).exp();
        let next = current + (target - current) * alpha;
        if (target - next).abs() < 1e-4 {
            target
        } else {
            next
        }
    }
}
