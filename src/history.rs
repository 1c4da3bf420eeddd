//! Append-only log of assistant exchanges, stored in SQLite

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "history.db";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS conversations (
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    asked_at TEXT NOT NULL   -- RFC 3339, UTC
);
"#;

/// One question and the answer it received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub question: String,
    pub answer: String,
}

impl ConversationRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A record as read back from the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredExchange {
    pub asked_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: ConversationRecord,
}

/// Ordered, append-only store. Records are never updated or deleted.
pub struct ConversationLog {
    conn: Connection,
}

impl ConversationLog {
    /// Open (or create) the log at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let conn = Connection::open(path.as_ref())?;
        Self::with_connection(conn)
    }

    /// Throwaway log, mostly for tests
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, HistoryError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Append a record stamped with the current time
    pub fn append(&self, record: &ConversationRecord) -> Result<(), HistoryError> {
        self.append_at(record, Utc::now())
    }

    /// Append a record with an explicit timestamp
    pub fn append_at(&self, record: &ConversationRecord, asked_at: DateTime<Utc>) -> Result<(), HistoryError> {
        self.conn.execute(
            "INSERT INTO conversations (question, answer, asked_at) VALUES (?1, ?2, ?3)",
            params![
                &record.question,
                &record.answer,
                asked_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ],
        )?;
        info!("stored exchange ({} chars answered)", record.answer.chars().count());
        Ok(())
    }

    /// Up to `n` most recent records, newest first
    pub fn recent(&self, n: usize) -> Result<Vec<StoredExchange>, HistoryError> {
        let mut stmt = self.conn.prepare(
            "SELECT question, answer, asked_at FROM conversations ORDER BY rowid DESC LIMIT ?1",
        )?;
        let limit = i64::try_from(n).unwrap_or(i64::MAX);

        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut exchanges = Vec::new();
        for row in rows {
            let (question, answer, asked_at) = row?;
            let asked_at = DateTime::parse_from_rfc3339(&asked_at)
                .map_err(|_| HistoryError::BadTimestamp(asked_at.clone()))?
                .with_timezone(&Utc);
            exchanges.push(StoredExchange {
                asked_at,
                record: ConversationRecord { question, answer },
            });
        }

        Ok(exchanges)
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize, HistoryError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_recent_is_newest_first() {
        let log = ConversationLog::open_in_memory().unwrap();
        for i in 1..=5 {
            log.append(&ConversationRecord::new(format!("q{i}"), format!("a{i}"))).unwrap();
        }

        let recent = log.recent(3).unwrap();
        let questions: Vec<_> = recent.iter().map(|e| e.record.question.as_str()).collect();
        assert_eq!(questions, vec!["q5", "q4", "q3"]);
        assert_eq!(log.len().unwrap(), 5);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let log = ConversationLog::open_in_memory().unwrap();
        let record = ConversationRecord::new("What is CDI?", "A benchmark rate.");
        log.append(&record).unwrap();
        log.append(&record).unwrap();

        assert_eq!(log.len().unwrap(), 2);
        assert!(log.recent(10).unwrap().iter().all(|e| e.record == record));
    }

    #[test]
    fn test_recent_zero_and_empty() {
        let log = ConversationLog::open_in_memory().unwrap();
        assert!(log.is_empty().unwrap());
        assert!(log.recent(10).unwrap().is_empty());

        log.append(&ConversationRecord::new("q", "a")).unwrap();
        assert!(log.recent(0).unwrap().is_empty());
    }

    #[test]
    fn test_timestamp_round_trips() {
        let log = ConversationLog::open_in_memory().unwrap();
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        log.append_at(&ConversationRecord::new("q", "a"), at).unwrap();

        assert_eq!(log.recent(1).unwrap()[0].asked_at, at);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");

        {
            let log = ConversationLog::open(&path).unwrap();
            log.append(&ConversationRecord::new("first", "one")).unwrap();
        }

        let log = ConversationLog::open(&path).unwrap();
        log.append(&ConversationRecord::new("second", "two")).unwrap();

        let recent = log.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].record.question, "second");
        assert_eq!(recent[1].record.question, "first");
    }
}
