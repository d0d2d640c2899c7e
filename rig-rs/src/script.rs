//! Input script files: a timeline of held, pressed, and hard-cut events
//! turned into per-frame [`InputSnapshot`] values for the controller.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rig_anim::{Actions, ClipRegistry, Directions, InputSnapshot};

/// A directional key in a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionKey {
    Forward,
    Back,
    Left,
    Right,
}

impl DirectionKey {
    fn flag(self) -> Directions {
        match self {
            Self::Forward => Directions::FORWARD,
            Self::Back => Directions::BACK,
            Self::Left => Directions::LEFT,
            Self::Right => Directions::RIGHT,
        }
    }
}

/// An action key in a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKey {
    Punch,
    Kick,
    Talk,
}

impl ActionKey {
    fn flag(self) -> Actions {
        match self {
            Self::Punch => Actions::PUNCH,
            Self::Kick => Actions::KICK,
            Self::Talk => Actions::TALK,
        }
    }
}

/// One scripted input event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Hold a direction from `from` until (exclusive) `until`
    Hold {
        direction: DirectionKey,
        from: f32,
        until: f32,
    },
    /// Press an action key at an instant
    Press { action: ActionKey, at: f32 },
    /// Hard cut to a named clip at an instant
    Cut { clip: String, at: f32 },
}

/// An input timeline, replayable at any frame cadence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Load a script from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading script file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parsing script file {}", path.display()))
    }

    /// The built-in demo timeline: a walk, then one of each action
    pub fn demo() -> Self {
        Self {
            events: vec![
                ScriptEvent::Hold {
                    direction: DirectionKey::Forward,
                    from: 0.5,
                    until: 3.0,
                },
                ScriptEvent::Press {
                    action: ActionKey::Punch,
                    at: 5.0,
                },
                ScriptEvent::Press {
                    action: ActionKey::Kick,
                    at: 8.0,
                },
                ScriptEvent::Press {
                    action: ActionKey::Talk,
                    at: 11.0,
                },
            ],
        }
    }

    /// Snapshot for the frame covering `(prev, now]`.
    ///
    /// Holds report their state at `now`; instant events fire once, in the
    /// frame whose window contains them. Cut clip names resolve against
    /// the registry and fail for unknown names.
    pub fn snapshot(&self, prev: f32, now: f32, registry: &ClipRegistry) -> Result<InputSnapshot> {
        let mut snapshot = InputSnapshot::idle();

        for event in &self.events {
            match event {
                ScriptEvent::Hold {
                    direction,
                    from,
                    until,
                } => {
                    if now >= *from && now < *until {
                        snapshot.held_directions |= direction.flag();
                    }
                }
                ScriptEvent::Press { action, at } => {
                    if in_window(*at, prev, now) {
                        snapshot.pressed_actions |= action.flag();
                    }
                }
                ScriptEvent::Cut { clip, at } => {
                    if in_window(*at, prev, now) {
                        snapshot.forced_clip = Some(
                            registry
                                .require(clip)
                                .with_context(|| format!("script cut at {at}s"))?,
                        );
                    }
                }
            }
        }

        Ok(snapshot)
    }
}

fn in_window(at: f32, prev: f32, now: f32) -> bool {
    at > prev && at <= now
}
