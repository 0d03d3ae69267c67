// Validation issues collected per sense and per lemma

use serde::{Deserialize, Serialize};

/// Human-readable validation failures.
///
/// Behaves as an insertion-ordered set: the same message is recorded once.
/// A collection is "failed" iff it holds at least one issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Issues {
    issues: Vec<String>,
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: impl Into<String>) {
        let issue = issue.into();
        if !self.issues.contains(&issue) {
            self.issues.push(issue);
        }
    }

    pub fn merge_issues(&mut self, other: Issues) {
        for issue in other.issues {
            self.add_issue(issue);
        }
    }

    pub fn is_failed(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(String::as_str)
    }

    /// True if any issue contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.iter().any(|issue| issue.contains(needle))
    }
}

impl std::fmt::Display for Issues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.issues.join("; "))
    }
}

impl IntoIterator for Issues {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}
