use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

/// Persistence seam for `chart id -> best score`.
///
/// `submit` keeps the stored value unless the new score is strictly greater,
/// and reports whether a new record was set.
pub trait HighScoreStore {
    fn get(&self, song_id: &str) -> Result<u32>;
    fn submit(&mut self, song_id: &str, score: u32) -> Result<bool>;
}

/// SQLite-backed store.
pub struct ScoreDatabase {
    conn: Connection,
}

impl ScoreDatabase {
    /// Open or create a score database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch("PRAGMA synchronous = OFF; PRAGMA journal_mode = WAL;")?;
        let db = Self { conn };
        db.create_tables()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS high_score (
                song_id TEXT NOT NULL,
                score INTEGER NOT NULL DEFAULT 0,
                date INTEGER NOT NULL DEFAULT 0,
                UNIQUE(song_id)
            );",
        )?;
        Ok(())
    }
}

impl HighScoreStore for ScoreDatabase {
    fn get(&self, song_id: &str) -> Result<u32> {
        let score: Option<u32> = self
            .conn
            .query_row(
                "SELECT score FROM high_score WHERE song_id = ?1",
                params![song_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(score.unwrap_or(0))
    }

    fn submit(&mut self, song_id: &str, score: u32) -> Result<bool> {
        if score <= self.get(song_id)? {
            return Ok(false);
        }
        let date = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        self.conn.execute(
            "INSERT INTO high_score (song_id, score, date) VALUES (?1, ?2, ?3)
             ON CONFLICT(song_id) DO UPDATE SET score = excluded.score, date = excluded.date",
            params![song_id, score, date],
        )?;
        debug!(song_id, score, "new high score");
        Ok(true)
    }
}

/// HashMap-backed store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    scores: HashMap<String, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryScoreStore {
    fn get(&self, song_id: &str) -> Result<u32> {
        Ok(self.scores.get(song_id).copied().unwrap_or(0))
    }

    fn submit(&mut self, song_id: &str, score: u32) -> Result<bool> {
        if score <= self.get(song_id)? {
            return Ok(false);
        }
        self.scores.insert(song_id.to_string(), score);
        Ok(true)
    }
}
