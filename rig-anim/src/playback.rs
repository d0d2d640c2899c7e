//! Playback cursors and the two-clip blend state.

use crate::clip::ClipId;
use crate::track::wrap_time;

/// A clip reference plus elapsed playback time.
///
/// Cursors are created fresh whenever a transition starts and dropped when
/// superseded; elapsed time wraps modulo the clip duration on every advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackCursor {
    clip: ClipId,
    time: f32,
}

impl PlaybackCursor {
    /// Start a cursor at the beginning of a clip
    pub fn new(clip: ClipId) -> Self {
        Self { clip, time: 0.0 }
    }

    /// Start a cursor at a given elapsed time
    pub fn at(clip: ClipId, time: f32) -> Self {
        Self { clip, time }
    }

    /// The clip this cursor plays
    pub fn clip(&self) -> ClipId {
        self.clip
    }

    /// Elapsed playback time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance by `dt`, wrapping into `[0, duration)`
    pub(crate) fn advance(&mut self, dt: f32, duration: f32) {
        self.time = wrap_time(self.time + dt, duration);
    }
}

/// The at-most-two clips currently weighted into the output pose.
///
/// With no secondary cursor the factor is ignored and the output is the
/// primary pose alone. The factor field is the controller's raw blend
/// accumulator; [`BlendState::weight`] clamps it into `[0, 1]` for
/// interpolation, so an overshooting accumulator is normalized rather than
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendState {
    primary: PlaybackCursor,
    secondary: Option<PlaybackCursor>,
    factor: f32,
}

impl BlendState {
    /// Play a single clip with no blend
    pub fn single(primary: PlaybackCursor) -> Self {
        Self {
            primary,
            secondary: None,
            factor: 0.0,
        }
    }

    /// Start a blend from `primary` toward `secondary` at factor 0
    pub fn blending(primary: PlaybackCursor, secondary: PlaybackCursor) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            factor: 0.0,
        }
    }

    /// The clip being blended away from
    pub fn primary(&self) -> PlaybackCursor {
        self.primary
    }

    /// The clip being blended toward, if a blend is running
    pub fn secondary(&self) -> Option<PlaybackCursor> {
        self.secondary
    }

    /// The raw blend accumulator (monotonic within one blend phase)
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// The interpolation weight: the accumulator clamped to `[0, 1]`, or 0
    /// when no secondary cursor exists
    pub fn weight(&self) -> f32 {
        if self.secondary.is_some() {
            self.factor.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub(crate) fn set_factor(&mut self, factor: f32) {
        self.factor = factor;
    }

    /// Finish the blend: the secondary cursor, with the time it has
    /// reached, becomes the sole primary.
    pub(crate) fn commit(&mut self) {
        if let Some(secondary) = self.secondary.take() {
            self.primary = secondary;
        }
        self.factor = 0.0;
    }

    pub(crate) fn primary_mut(&mut self) -> &mut PlaybackCursor {
        &mut self.primary
    }

    pub(crate) fn secondary_mut(&mut self) -> Option<&mut PlaybackCursor> {
        self.secondary.as_mut()
    }
}
