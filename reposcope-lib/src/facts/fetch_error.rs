use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure of a fetch from the hosting service.
///
/// Terminal for identity lookups. Optional signals and searches are absorbed by
/// the pipeline and counted in a [`Coverage`](super::Coverage).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("rate limited{}", reset_hint(.reset_at))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    #[error("upstream failure: {0:#}")]
    Upstream(ohno::AppError),
}

impl FetchError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

fn reset_hint(reset_at: &Option<DateTime<Utc>>) -> String {
    reset_at.map_or_else(String::new, |t| format!(", retry after {}", t.format("%Y-%m-%d %H:%M:%S UTC")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let e = FetchError::not_found("repository 'octo/cat'");
        assert_eq!(e.to_string(), "repository 'octo/cat' not found");
        assert!(e.is_not_found());
        assert!(!e.is_rate_limited());
    }

    #[test]
    fn test_rate_limited_with_hint() {
        let reset_at = DateTime::from_timestamp(1_704_067_200, 0);
        let e = FetchError::RateLimited { reset_at };
        assert_eq!(e.to_string(), "rate limited, retry after 2024-01-01 00:00:00 UTC");
        assert!(e.is_rate_limited());
    }

    #[test]
    fn test_rate_limited_without_hint() {
        let e = FetchError::RateLimited { reset_at: None };
        assert_eq!(e.to_string(), "rate limited");
    }

    #[test]
    fn test_upstream_display() {
        let e = FetchError::Upstream(ohno::app_err!("boom"));
        assert!(e.to_string().starts_with("upstream failure: "));
        assert!(e.to_string().contains("boom"));
    }
}
