use super::FetchError;
use serde::Serialize;

const LOG_TARGET: &str = "  coverage";

/// Attempted versus succeeded counts for a group of optional fetches.
///
/// A failed fetch is absorbed into its empty value and recorded here, so a
/// caller can tell "nothing exists" apart from "could not be fetched".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub attempted: usize,
    pub succeeded: usize,

    /// One `what: reason` entry per failed fetch
    pub failures: Vec<String>,
}

impl Coverage {
    /// Record the outcome of one fetch, degrading a failure to `T::default()`.
    pub fn absorb<T: Default>(&mut self, what: &str, outcome: Result<T, FetchError>) -> T {
        self.attempted += 1;
        match outcome {
            Ok(value) => {
                self.succeeded += 1;
                value
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not fetch {what}, using empty value: {e}");
                self.failures.push(format!("{what}: {e}"));
                T::default()
            }
        }
    }

    #[must_use]
    pub const fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    /// Whether any fetch in the group failed.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.succeeded < self.attempted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_counts_success() {
        let mut coverage = Coverage::default();
        let v = coverage.absorb("commits", Ok(vec![1, 2]));

        assert_eq!(v, vec![1, 2]);
        assert_eq!(coverage.attempted, 1);
        assert_eq!(coverage.succeeded, 1);
        assert!(!coverage.is_partial());
        assert!(coverage.failures.is_empty());
    }

    #[test]
    fn test_absorb_degrades_failure() {
        let mut coverage = Coverage::default();
        let _ = coverage.absorb("languages", Ok(vec![1]));
        let v: Vec<u32> = coverage.absorb("commits", Err(FetchError::RateLimited { reset_at: None }));

        assert!(v.is_empty());
        assert_eq!(coverage.attempted, 2);
        assert_eq!(coverage.succeeded, 1);
        assert_eq!(coverage.failed(), 1);
        assert!(coverage.is_partial());
        assert_eq!(coverage.failures, vec!["commits: rate limited"]);
    }

    #[test]
    fn test_empty_is_not_partial() {
        let coverage = Coverage::default();
        assert_eq!(coverage.failed(), 0);
        assert!(!coverage.is_partial());
    }
}
