//! Logical input snapshots.
//!
//! The controller never polls a window: each frame the caller hands it a
//! snapshot of already-debounced logical edges. Directions report *held*
//! state, actions report *newly pressed* edges; any key-repeat suppression
//! belongs to the input backend producing the snapshot.

use bitflags::bitflags;
use glam::Vec3;

use crate::clip::ClipId;

bitflags! {
    /// Directional movement keys held this frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Directions: u8 {
        /// Move away from the camera (+Z)
        const FORWARD = 1;
        /// Move toward the camera (-Z)
        const BACK = 1 << 1;
        /// Strafe left (+X)
        const LEFT = 1 << 2;
        /// Strafe right (-X)
        const RIGHT = 1 << 3;
    }
}

bitflags! {
    /// Action keys newly pressed this frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Actions: u8 {
        const PUNCH = 1;
        const KICK = 1 << 1;
        const TALK = 1 << 2;
    }
}

impl Directions {
    /// Summed movement direction of all held keys, normalized.
    ///
    /// Opposing keys cancel; the zero vector comes back when nothing is
    /// held or everything cancels.
    pub fn move_vector(self) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if self.contains(Self::FORWARD) {
            direction.z += 1.0;
        }
        if self.contains(Self::BACK) {
            direction.z -= 1.0;
        }
        if self.contains(Self::LEFT) {
            direction.x += 1.0;
        }
        if self.contains(Self::RIGHT) {
            direction.x -= 1.0;
        }
        direction.normalize_or_zero()
    }

    /// Facing yaw in degrees for the held keys.
    ///
    /// Keys are checked forward, back, left, right; the last held one
    /// wins.
    pub fn facing_yaw(self) -> Option<f32> {
        let mut yaw = None;
        if self.contains(Self::FORWARD) {
            yaw = Some(180.0);
        }
        if self.contains(Self::BACK) {
            yaw = Some(0.0);
        }
        if self.contains(Self::LEFT) {
            yaw = Some(-90.0);
        }
        if self.contains(Self::RIGHT) {
            yaw = Some(90.0);
        }
        yaw
    }
}

/// Everything the controller reads from input in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Directional keys currently held
    pub held_directions: Directions,
    /// Action keys that went down this frame
    pub pressed_actions: Actions,
    /// Hard cut to a clip, bypassing the blend machinery (the numeric
    /// hotkeys)
    pub forced_clip: Option<ClipId>,
}

impl InputSnapshot {
    /// A frame with no input
    pub fn idle() -> Self {
        Self::default()
    }

    /// Snapshot with the given directions held
    pub fn holding(directions: Directions) -> Self {
        Self {
            held_directions: directions,
            ..Self::default()
        }
    }

    /// Snapshot with the given actions newly pressed
    pub fn pressing(actions: Actions) -> Self {
        Self {
            pressed_actions: actions,
            ..Self::default()
        }
    }

    /// Snapshot forcing a hard cut to `clip`
    pub fn forcing(clip: ClipId) -> Self {
        Self {
            forced_clip: Some(clip),
            ..Self::default()
        }
    }

    /// Add held directions to this snapshot
    #[must_use]
    pub fn with_directions(mut self, directions: Directions) -> Self {
        self.held_directions |= directions;
        self
    }

    /// Add pressed actions to this snapshot
    #[must_use]
    pub fn with_actions(mut self, actions: Actions) -> Self {
        self.pressed_actions |= actions;
        self
    }
}
