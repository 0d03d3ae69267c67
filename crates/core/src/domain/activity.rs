// Activity log entries

use serde::{Deserialize, Serialize};

/// One user-visible action, as `(action, subject, object)` plus a timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Milliseconds since epoch
    pub time: i64,
    pub action: String,
    /// Usually the backend id of the sense acted on
    #[serde(rename = "arg_1")]
    pub subject: String,
    #[serde(rename = "arg_2")]
    pub object: String,
}

impl ActivityEntry {
    pub fn new(
        time: i64,
        action: impl Into<String>,
        subject: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            time,
            action: action.into(),
            subject: subject.into(),
            object: object.into(),
        }
    }
}
