//! # Outcome Envelope
//!
//! Every pipeline operation reports its progress as a sequence of [`Resource`] values.
//! Consumers match on the three variants and never need operation-specific branching.

use std::fmt;
use std::ops::Deref;

/// Fallback used when a failure carries no usable message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Human-readable failure cause. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    /// Wraps `message`, substituting [`DEFAULT_ERROR_MESSAGE`] for blank input.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self(DEFAULT_ERROR_MESSAGE.to_string())
        } else {
            Self(message)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrorMessage {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ErrorMessage {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ErrorMessage {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Lifecycle state of one asynchronous operation.
///
/// # Variants
/// - `Loading`: the operation is in flight. No payload.
/// - `Success`: the operation completed with `data`.
/// - `Error`: the operation failed. `data` may carry the last known good value
///   (e.g. a cached profile) so the UI can keep showing it.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success { data: T },
    Error { message: ErrorMessage, data: Option<T> },
}

impl<T> Resource<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    pub fn error(message: impl Into<ErrorMessage>, data: Option<T>) -> Self {
        Self::Error {
            message: message.into(),
            data,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The payload, if this state carries one (fresh or stale).
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Success { data } => Some(data),
            Self::Error { data, .. } => data.as_ref(),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Loading => None,
            Self::Success { data } => Some(data),
            Self::Error { data, .. } => data,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Self::Loading => Resource::Loading,
            Self::Success { data } => Resource::Success { data: f(data) },
            Self::Error { message, data } => Resource::Error {
                message,
                data: data.map(f),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_error_message_falls_back_to_default() {
        let resource: Resource<u32> = Resource::error("   ", None);
        assert_eq!(resource.message(), Some(DEFAULT_ERROR_MESSAGE));

        let resource: Resource<u32> = Resource::error(String::new(), Some(3));
        assert_eq!(resource.message(), Some(DEFAULT_ERROR_MESSAGE));
        assert_eq!(resource.data(), Some(&3));
    }

    #[test]
    fn data_is_exposed_for_success_and_stale_errors() {
        assert_eq!(Resource::<u32>::Loading.data(), None);
        assert_eq!(Resource::success(7).into_data(), Some(7));
        assert_eq!(Resource::error("offline", Some(1)).into_data(), Some(1));
        assert_eq!(Resource::<u32>::error("offline", None).into_data(), None);
    }

    #[test]
    fn map_preserves_variant_and_message() {
        let mapped = Resource::error("timeout", Some(2)).map(|n: u32| n * 10);
        assert_eq!(mapped, Resource::error("timeout", Some(20)));
        assert!(Resource::<u32>::Loading.map(|n| n + 1).is_loading());
        assert!(Resource::success(1).map(|n| n + 1).is_success());
    }
}
