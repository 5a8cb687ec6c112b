use alloc::string::String;

/// Errors surfaced while constructing or reconfiguring a [`crate::VirtualList`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("virtual list needs a container to mount render targets into")]
    MissingContainer,
    #[error("estimated item height must be finite and positive (got {0})")]
    InvalidEstimatedHeight(f64),
}

/// An error reported by a host callback (render factory or lifecycle hook).
///
/// The list never propagates these: they are logged and the affected item is skipped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for HostError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HostError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
