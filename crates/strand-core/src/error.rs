/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or querying a story.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested situation id is not registered in the story.
    #[error("situation not found: {0}")]
    SituationNotFound(String),

    /// A situation with the same id is already registered.
    #[error("situation already registered: \"{0}\"")]
    DuplicateSituation(String),

    /// A situation was registered with a non-positive frequency.
    #[error("invalid frequency {frequency} for situation \"{id}\": must be positive")]
    InvalidFrequency {
        /// The offending situation id.
        id: String,
        /// The rejected frequency value.
        frequency: f64,
    },

    /// A situation was asked to perform an action it does not define.
    #[error("situation \"{id}\" has no action \"{action}\"")]
    UnknownAction {
        /// The situation that received the action.
        id: String,
        /// The unrecognized action name.
        action: String,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
