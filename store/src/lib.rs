//! SQLite-backed fact store.
//!
//! Four fact tables (math, trivia, years, dates) each paired with a
//! like-counter table keyed one-to-one on the fact id. Lookups that pick
//! among several matching facts do the random choice inside SQL, and like
//! increments are a single upsert, so every operation is one statement under
//! the connection lock and concurrent likes cannot lose updates.

mod error;
mod models;

pub use error::{Result, StoreError};
pub use models::{Category, DateFact, MathFact, TriviaFact, YearFact};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct FactStore {
    conn: Arc<Mutex<Connection>>,
}

impl FactStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Creates an in-memory store, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS math_facts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                number REAL NOT NULL,
                fact_fragment TEXT NOT NULL,
                fact_statement TEXT NOT NULL,
                was_submitted INTEGER NOT NULL DEFAULT 0,
                added_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_math_facts_number ON math_facts(number);

            CREATE TABLE IF NOT EXISTS trivia_facts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                number INTEGER NOT NULL,
                fact_fragment TEXT NOT NULL,
                fact_statement TEXT NOT NULL,
                was_submitted INTEGER NOT NULL DEFAULT 0,
                added_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_trivia_facts_number ON trivia_facts(number);

            CREATE TABLE IF NOT EXISTS year_facts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                year INTEGER NOT NULL,
                fact_fragment TEXT NOT NULL,
                fact_statement TEXT NOT NULL,
                was_submitted INTEGER NOT NULL DEFAULT 0,
                added_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_year_facts_year ON year_facts(year);

            CREATE TABLE IF NOT EXISTS date_facts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                day_of_year INTEGER NOT NULL,
                year INTEGER NOT NULL,
                fact_fragment TEXT NOT NULL,
                fact_statement TEXT NOT NULL,
                was_submitted INTEGER NOT NULL DEFAULT 0,
                added_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_date_facts_day ON date_facts(day_of_year);

            CREATE TABLE IF NOT EXISTS math_like_counters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                math_id INTEGER NOT NULL UNIQUE REFERENCES math_facts(id),
                num_likes INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS trivia_like_counters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                trivia_id INTEGER NOT NULL UNIQUE REFERENCES trivia_facts(id),
                num_likes INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS year_like_counters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                year_id INTEGER NOT NULL UNIQUE REFERENCES year_facts(id),
                num_likes INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS date_like_counters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date_id INTEGER NOT NULL UNIQUE REFERENCES date_facts(id),
                num_likes INTEGER NOT NULL DEFAULT 0
            );",
        )?;

        Ok(())
    }

    /// Drops all tables and recreates the schema.
    pub fn reset(&self) -> Result<()> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute_batch(
                "DROP TABLE IF EXISTS math_like_counters;
                 DROP TABLE IF EXISTS trivia_like_counters;
                 DROP TABLE IF EXISTS year_like_counters;
                 DROP TABLE IF EXISTS date_like_counters;
                 DROP TABLE IF EXISTS math_facts;
                 DROP TABLE IF EXISTS trivia_facts;
                 DROP TABLE IF EXISTS year_facts;
                 DROP TABLE IF EXISTS date_facts;",
            )?;
        }
        self.init_schema()
    }

    // Math facts

    pub fn add_math_fact(
        &self,
        number: f64,
        fragment: &str,
        statement: &str,
        was_submitted: bool,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO math_facts (number, fact_fragment, fact_statement, was_submitted, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![number, fragment, statement, was_submitted, Utc::now().timestamp()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// A random fact about `number`, if any exist.
    pub fn math_fact(&self, number: f64) -> Result<Option<MathFact>> {
        let conn = self.conn.lock().unwrap();
        let fact = conn
            .query_row(
                "SELECT id, number, fact_fragment, fact_statement, was_submitted, added_at
                 FROM math_facts WHERE number = ?1 ORDER BY RANDOM() LIMIT 1",
                params![number],
                map_math_fact,
            )
            .optional()?;
        Ok(fact)
    }

    pub fn random_math_fact(&self) -> Result<Option<MathFact>> {
        let conn = self.conn.lock().unwrap();
        let fact = conn
            .query_row(
                "SELECT id, number, fact_fragment, fact_statement, was_submitted, added_at
                 FROM math_facts ORDER BY RANDOM() LIMIT 1",
                [],
                map_math_fact,
            )
            .optional()?;
        Ok(fact)
    }

    /// Increments the like counter for a math fact, creating the counter row
    /// on first like. Returns false when no fact has that id.
    pub fn like_math_fact(&self, id: i64) -> Result<bool> {
        self.like_fact("math_facts", "math_like_counters", "math_id", id)
    }

    pub fn math_likes(&self, id: i64) -> Result<Option<i64>> {
        self.likes("math_like_counters", "math_id", id)
    }

    // Trivia facts

    pub fn add_trivia_fact(
        &self,
        number: i64,
        fragment: &str,
        statement: &str,
        was_submitted: bool,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO trivia_facts (number, fact_fragment, fact_statement, was_submitted, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![number, fragment, statement, was_submitted, Utc::now().timestamp()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn trivia_fact(&self, number: i64) -> Result<Option<TriviaFact>> {
        let conn = self.conn.lock().unwrap();
        let fact = conn
            .query_row(
                "SELECT id, number, fact_fragment, fact_statement, was_submitted, added_at
                 FROM trivia_facts WHERE number = ?1 ORDER BY RANDOM() LIMIT 1",
                params![number],
                map_trivia_fact,
            )
            .optional()?;
        Ok(fact)
    }

    pub fn random_trivia_fact(&self) -> Result<Option<TriviaFact>> {
        let conn = self.conn.lock().unwrap();
        let fact = conn
            .query_row(
                "SELECT id, number, fact_fragment, fact_statement, was_submitted, added_at
                 FROM trivia_facts ORDER BY RANDOM() LIMIT 1",
                [],
                map_trivia_fact,
            )
            .optional()?;
        Ok(fact)
    }

    pub fn like_trivia_fact(&self, id: i64) -> Result<bool> {
        self.like_fact("trivia_facts", "trivia_like_counters", "trivia_id", id)
    }

    pub fn trivia_likes(&self, id: i64) -> Result<Option<i64>> {
        self.likes("trivia_like_counters", "trivia_id", id)
    }

    // Year facts

    pub fn add_year_fact(
        &self,
        year: i64,
        fragment: &str,
        statement: &str,
        was_submitted: bool,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO year_facts (year, fact_fragment, fact_statement, was_submitted, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![year, fragment, statement, was_submitted, Utc::now().timestamp()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn year_fact(&self, year: i64) -> Result<Option<YearFact>> {
        let conn = self.conn.lock().unwrap();
        let fact = conn
            .query_row(
                "SELECT id, year, fact_fragment, fact_statement, was_submitted, added_at
                 FROM year_facts WHERE year = ?1 ORDER BY RANDOM() LIMIT 1",
                params![year],
                map_year_fact,
            )
            .optional()?;
        Ok(fact)
    }

    pub fn random_year_fact(&self) -> Result<Option<YearFact>> {
        let conn = self.conn.lock().unwrap();
        let fact = conn
            .query_row(
                "SELECT id, year, fact_fragment, fact_statement, was_submitted, added_at
                 FROM year_facts ORDER BY RANDOM() LIMIT 1",
                [],
                map_year_fact,
            )
            .optional()?;
        Ok(fact)
    }

    pub fn like_year_fact(&self, id: i64) -> Result<bool> {
        self.like_fact("year_facts", "year_like_counters", "year_id", id)
    }

    pub fn year_likes(&self, id: i64) -> Result<Option<i64>> {
        self.likes("year_like_counters", "year_id", id)
    }

    // Date facts

    pub fn add_date_fact(
        &self,
        day_of_year: u16,
        year: i64,
        fragment: &str,
        statement: &str,
        was_submitted: bool,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO date_facts (day_of_year, year, fact_fragment, fact_statement, was_submitted, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![day_of_year, year, fragment, statement, was_submitted, Utc::now().timestamp()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// A random fact for the given day-ordinal, if any exist.
    pub fn date_fact(&self, day_of_year: u16) -> Result<Option<DateFact>> {
        let conn = self.conn.lock().unwrap();
        let fact = conn
            .query_row(
                "SELECT id, day_of_year, year, fact_fragment, fact_statement, was_submitted, added_at
                 FROM date_facts WHERE day_of_year = ?1 ORDER BY RANDOM() LIMIT 1",
                params![day_of_year],
                map_date_fact,
            )
            .optional()?;
        Ok(fact)
    }

    pub fn random_date_fact(&self) -> Result<Option<DateFact>> {
        let conn = self.conn.lock().unwrap();
        let fact = conn
            .query_row(
                "SELECT id, day_of_year, year, fact_fragment, fact_statement, was_submitted, added_at
                 FROM date_facts ORDER BY RANDOM() LIMIT 1",
                [],
                map_date_fact,
            )
            .optional()?;
        Ok(fact)
    }

    pub fn like_date_fact(&self, id: i64) -> Result<bool> {
        self.like_fact("date_facts", "date_like_counters", "date_id", id)
    }

    pub fn date_likes(&self, id: i64) -> Result<Option<i64>> {
        self.likes("date_like_counters", "date_id", id)
    }

    // Shared like-counter plumbing. Table and column names come from the
    // constants above, never from callers.

    fn like_fact(
        &self,
        fact_table: &str,
        counter_table: &str,
        fk_column: &str,
        id: i64,
    ) -> Result<bool> {
        let conn = self.conn.lock().unwrap();

        let exists: bool = conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {fact_table} WHERE id = ?1)"),
            params![id],
            |row| row.get(0),
        )?;
        if !exists {
            return Ok(false);
        }

        conn.execute(
            &format!(
                "INSERT INTO {counter_table} ({fk_column}, num_likes) VALUES (?1, 1)
                 ON CONFLICT({fk_column}) DO UPDATE SET num_likes = num_likes + 1"
            ),
            params![id],
        )?;
        Ok(true)
    }

    fn likes(&self, counter_table: &str, fk_column: &str, id: i64) -> Result<Option<i64>> {
        let conn = self.conn.lock().unwrap();
        let likes = conn
            .query_row(
                &format!("SELECT num_likes FROM {counter_table} WHERE {fk_column} = ?1"),
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(likes)
    }
}

fn added_at(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

fn map_math_fact(row: &Row<'_>) -> rusqlite::Result<MathFact> {
    Ok(MathFact {
        id: row.get(0)?,
        number: row.get(1)?,
        fact_fragment: row.get(2)?,
        fact_statement: row.get(3)?,
        was_submitted: row.get(4)?,
        added_at: added_at(row.get(5)?),
    })
}

fn map_trivia_fact(row: &Row<'_>) -> rusqlite::Result<TriviaFact> {
    Ok(TriviaFact {
        id: row.get(0)?,
        number: row.get(1)?,
        fact_fragment: row.get(2)?,
        fact_statement: row.get(3)?,
        was_submitted: row.get(4)?,
        added_at: added_at(row.get(5)?),
    })
}

fn map_year_fact(row: &Row<'_>) -> rusqlite::Result<YearFact> {
    Ok(YearFact {
        id: row.get(0)?,
        year: row.get(1)?,
        fact_fragment: row.get(2)?,
        fact_statement: row.get(3)?,
        was_submitted: row.get(4)?,
        added_at: added_at(row.get(5)?),
    })
}

fn map_date_fact(row: &Row<'_>) -> rusqlite::Result<DateFact> {
    Ok(DateFact {
        id: row.get(0)?,
        day_of_year: row.get(1)?,
        year: row.get(2)?,
        fact_fragment: row.get(3)?,
        fact_statement: row.get(4)?,
        was_submitted: row.get(5)?,
        added_at: added_at(row.get(6)?),
    })
}
