use crate::models::University;
use ahash::RandomState;
use indexmap::IndexMap;
use serde::Serialize;

/// Label used for universities whose `state` is blank.
pub const UNKNOWN_STATE: &str = "Unknown";

/// State name → number of universities, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    counts: IndexMap<String, usize, RandomState>,
}

impl StateCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one university in `state`.
    pub fn tally(&mut self, state: &str) {
        let key = if state.trim().is_empty() {
            UNKNOWN_STATE
        } else {
            state
        };
        match self.counts.get_mut(key) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    pub fn get(&self, state: &str) -> Option<usize> {
        self.counts.get(state).copied()
    }

    /// Number of distinct states.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts; equals the number of universities tallied.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Share of `state` as a percentage of the total (0.0 when empty).
    pub fn share(&self, state: &str) -> f64 {
        let total = self.total();
        match self.get(state) {
            Some(n) if total > 0 => n as f64 * 100.0 / total as f64,
            _ => 0.0,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'a> FromIterator<&'a University> for StateCounts {
    fn from_iter<I: IntoIterator<Item = &'a University>>(iter: I) -> Self {
        let mut out = StateCounts::new();
        for u in iter {
            out.tally(&u.state);
        }
        out
    }
}

/// Group universities by state and count the members of each group.
pub fn count_by_state(universities: &[University]) -> StateCounts {
    universities.iter().collect()
}
