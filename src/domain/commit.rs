/// A commit as the predictor sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full hex commit id
    pub id: String,
    pub message: String,
    /// Committer time, seconds since the Unix epoch
    pub time: i64,
}

impl CommitInfo {
    pub fn new(id: impl Into<String>, message: impl Into<String>, time: i64) -> Self {
        CommitInfo {
            id: id.into(),
            message: message.into(),
            time,
        }
    }

    /// Whether the message carries the merge marker, ignoring case.
    pub fn is_merge(&self, marker: &str) -> bool {
        let marker = marker.trim().to_lowercase();
        !marker.is_empty() && self.message.to_lowercase().contains(&marker)
    }

    /// First line of the message, for display.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
