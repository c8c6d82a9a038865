//! Reachability state reported by the status probe.

use std::borrow::Cow;

/// Text shown before a probe settles, and when the server reports an empty message.
pub const STATUS_PLACEHOLDER: &str = "System operational";

/// Outcome of a single status probe.
///
/// A probe starts `Pending` and settles exactly once into one of the other
/// variants. Settled states never revert.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PingState {
    #[default]
    Pending,
    Ok(String),
    TimedOut,
    NetworkError,
    HttpError(u16),
    Unknown,
}

impl PingState {
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// The single status line rendered for this state.
    #[must_use]
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Self::Pending => Cow::Borrowed(STATUS_PLACEHOLDER),
            Self::Ok(message) if message.is_empty() => Cow::Borrowed(STATUS_PLACEHOLDER),
            Self::Ok(message) => Cow::Borrowed(message.as_str()),
            Self::TimedOut => Cow::Borrowed("Request timeout - server unavailable"),
            Self::NetworkError => Cow::Borrowed("Network error - cannot reach server"),
            Self::HttpError(_) => Cow::Borrowed("API connection unavailable"),
            Self::Unknown => Cow::Borrowed("Unknown error occurred"),
        }
    }
}
