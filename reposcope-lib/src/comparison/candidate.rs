use crate::HashMap;
use crate::facts::RepositoryRecord;
use serde::Serialize;

/// Which sub-search surfaced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provenance {
    Language,
    Topic,
    Keyword,
}

/// A search hit that may be comparable to the target repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRepository {
    #[serde(flatten)]
    pub record: RepositoryRecord,
    pub provenance: Provenance,
}

impl CandidateRepository {
    #[must_use]
    pub const fn new(record: RepositoryRecord, provenance: Provenance) -> Self {
        Self { record, provenance }
    }

    /// Case-insensitive identity used for deduplication.
    #[must_use]
    pub fn canonical_name(&self) -> String {
        self.record.full_name.to_lowercase()
    }
}

/// Collapse duplicates and rank by popularity.
///
/// When two candidates share a canonical name the one with more stars survives;
/// on a tie the earlier one is kept. The result is ordered by stars descending,
/// then by name, and cut to `limit` entries. Applying this to its own output
/// returns the same list.
#[must_use]
pub fn dedupe_and_rank(candidates: impl IntoIterator<Item = CandidateRepository>, limit: usize) -> Vec<CandidateRepository> {
    let mut unique: Vec<CandidateRepository> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::default();

    for candidate in candidates {
        let key = candidate.canonical_name();
        match index.get(&key) {
            Some(&i) => {
                if candidate.record.stars > unique[i].record.stars {
                    unique[i] = candidate;
                }
            }
            None => {
                let _ = index.insert(key, unique.len());
                unique.push(candidate);
            }
        }
    }

    unique.sort_by(|a, b| {
        b.record
            .stars
            .cmp(&a.record.stars)
            .then_with(|| a.record.full_name.cmp(&b.record.full_name))
    });
    unique.truncate(limit);
    unique
}
