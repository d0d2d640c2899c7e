use thiserror::Error;

/// Error types for rig construction and clip lookup
#[derive(Error, Debug)]
pub enum AnimError {
    /// Requested clip id is not registered. Clip ids are only issued by a
    /// registry, so hitting this means an id from a different (or stale)
    /// registry was used.
    #[error("unknown clip id {id} (registry holds {count} clips)")]
    ClipNotFound { id: u32, count: usize },

    /// No registered clip carries the requested name
    #[error("no clip named '{0}' is registered")]
    MissingClip(String),

    /// Clip rejected at registration
    #[error("invalid clip '{name}': {reason}")]
    InvalidClip { name: String, reason: String },

    /// Keyframe channel rejected at validation
    #[error("invalid track for bone {bone}: {reason}")]
    InvalidTrack { bone: u16, reason: String },

    /// Skeleton rejected at construction
    #[error("invalid skeleton: {0}")]
    InvalidSkeleton(String),
}

/// Result type using AnimError
pub type Result<T> = std::result::Result<T, AnimError>;
