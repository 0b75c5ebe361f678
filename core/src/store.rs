//! Save persistence.
//!
//! RULE: Only store.rs talks to the database.
//! The engine sees a `SaveStore` and never executes SQL directly; it
//! also owns the JSON codec, so stores move opaque strings.

use crate::error::GameResult;
use crate::types::Millis;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

/// Where serialized snapshots live, keyed by save slot.
///
/// `load` returns the raw JSON (the engine decides whether it parses);
/// `save` replaces the slot wholesale and records when it happened.
pub trait SaveStore: Send {
    fn load(&self, slot: &str) -> GameResult<Option<String>>;
    fn save(&mut self, slot: &str, state_json: &str, saved_at: Millis) -> GameResult<()>;
    /// When the slot was last written, if ever.
    fn last_saved_at(&self, slot: &str) -> GameResult<Option<Millis>>;
}

// ── SQLite ─────────────────────────────────────────────────────────

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_saves.sql"))?;
        Ok(())
    }
}

impl SaveStore for SqliteStore {
    fn load(&self, slot: &str) -> GameResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT state_json FROM game_save WHERE slot = ?1",
                params![slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(json)
    }

    fn save(&mut self, slot: &str, state_json: &str, saved_at: Millis) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO game_save (slot, state_json, saved_at_ms) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET
                state_json  = excluded.state_json,
                saved_at_ms = excluded.saved_at_ms",
            params![slot, state_json, saved_at],
        )?;
        Ok(())
    }

    fn last_saved_at(&self, slot: &str) -> GameResult<Option<Millis>> {
        let at = self
            .conn
            .query_row(
                "SELECT saved_at_ms FROM game_save WHERE slot = ?1",
                params![slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(at)
    }
}

// ── In-memory ──────────────────────────────────────────────────────

/// Slot map with no durability. The default store for tests and for
/// embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemStore {
    slots: HashMap<String, (String, Millis)>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemStore {
    fn load(&self, slot: &str) -> GameResult<Option<String>> {
        Ok(self.slots.get(slot).map(|(json, _)| json.clone()))
    }

    fn save(&mut self, slot: &str, state_json: &str, saved_at: Millis) -> GameResult<()> {
        self.slots
            .insert(slot.to_string(), (state_json.to_string(), saved_at));
        Ok(())
    }

    fn last_saved_at(&self, slot: &str) -> GameResult<Option<Millis>> {
        Ok(self.slots.get(slot).map(|(_, at)| *at))
    }
}
