use serde::{Deserialize, Serialize};

/// Review status reported by the homework API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

/// Verdict text shown to the student for each review status.
pub const HOMEWORK_VERDICTS: [(HomeworkStatus, &str); 3] = [
    (
        HomeworkStatus::Approved,
        "Работа проверена: ревьюеру всё понравилось. Ура!",
    ),
    (
        HomeworkStatus::Reviewing,
        "Работа взята на проверку ревьюером.",
    ),
    (
        HomeworkStatus::Rejected,
        "Работа проверена: у ревьюера есть замечания.",
    ),
];

impl HomeworkStatus {
    /// Look up a status by its wire name. Returns `None` for anything
    /// outside the closed set.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict from [`HOMEWORK_VERDICTS`].
    pub fn verdict(&self) -> &'static str {
        HOMEWORK_VERDICTS
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, verdict)| *verdict)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One submission's review state, as returned by the homework API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    /// Notification text announcing this record's status change.
    pub fn status_message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

/// Lower bound (Unix seconds) for the next poll.
///
/// Only moves forward: a server date older than the current position is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn new(timestamp: i64) -> Self {
        Self(timestamp)
    }

    pub fn timestamp(&self) -> i64 {
        self.0
    }

    /// Move the cursor to `timestamp`. Returns `false` and leaves the cursor
    /// in place when `timestamp` lies behind it.
    pub fn advance_to(&mut self, timestamp: i64) -> bool {
        if timestamp < self.0 {
            tracing::warn!(
                cursor = self.0,
                server_date = timestamp,
                "Server date is behind the poll cursor, keeping cursor"
            );
            return false;
        }
        self.0 = timestamp;
        true
    }
}

impl std::fmt::Display for PollCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_a_verdict() {
        for status in [
            HomeworkStatus::Approved,
            HomeworkStatus::Reviewing,
            HomeworkStatus::Rejected,
        ] {
            assert!(!status.verdict().is_empty(), "{status} has no verdict");
            assert_eq!(HomeworkStatus::from_wire(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_unknown_wire_status() {
        assert_eq!(HomeworkStatus::from_wire("unknown"), None);
        assert_eq!(HomeworkStatus::from_wire("Approved"), None);
        assert_eq!(HomeworkStatus::from_wire(""), None);
    }

    #[test]
    fn test_status_serde_uses_wire_names() {
        let status: HomeworkStatus = serde_json::from_str("\"reviewing\"").unwrap();
        assert_eq!(status, HomeworkStatus::Reviewing);
        assert_eq!(
            serde_json::to_string(&HomeworkStatus::Rejected).unwrap(),
            "\"rejected\""
        );
    }

    #[test]
    fn test_status_message_format() {
        let record = HomeworkRecord {
            homework_name: "X".to_string(),
            status: HomeworkStatus::Approved,
        };
        assert_eq!(
            record.status_message(),
            "Изменился статус проверки работы \"X\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_cursor_advances_forward() {
        let mut cursor = PollCursor::new(100);
        assert!(cursor.advance_to(100));
        assert!(cursor.advance_to(250));
        assert_eq!(cursor.timestamp(), 250);
    }

    #[test]
    fn test_cursor_never_moves_back() {
        let mut cursor = PollCursor::new(1_700_000_000);
        assert!(!cursor.advance_to(1_600_000_000));
        assert_eq!(cursor.timestamp(), 1_700_000_000);
    }
}
