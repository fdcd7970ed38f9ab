/// Convenience result type used across badgeforge.
pub type BadgeResult<T> = Result<T, BadgeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every failure is terminal to the single action that triggered it; none of them leave the
/// scene state half-updated.
#[derive(thiserror::Error, Debug)]
pub enum BadgeError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image or font could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Text could not be measured or laid out.
    #[error("layout error: {0}")]
    Layout(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// The remote background-removal service did not produce a cutout.
    #[error("background removal error: {0}")]
    Removal(String),

    /// The finished badge could not be encoded or delivered.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BadgeError {
    /// Build a [`BadgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BadgeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BadgeError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`BadgeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BadgeError::Removal`] value.
    pub fn removal(msg: impl Into<String>) -> Self {
        Self::Removal(msg.into())
    }

    /// Build a [`BadgeError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
