// Database schema: table creation and migrations.
//
// Version-based migrations: a `schema_version` table tracks which
// migrations have run, and each migration is a function that executes
// SQL statements.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent: safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Latest profile score per account (no history kept)
        CREATE TABLE IF NOT EXISTS profile_scores (
            handle TEXT PRIMARY KEY,
            authenticity_score REAL NOT NULL,      -- 0-100
            influence_score REAL NOT NULL,         -- 0-100
            signal_density_score REAL NOT NULL,    -- 0-100
            farm_risk_score REAL NOT NULL,         -- 0-100
            akari_profile_score INTEGER NOT NULL,  -- 0-1000
            engagement_rate REAL NOT NULL,
            retweet_ratio REAL NOT NULL,
            follower_quality_ratio REAL NOT NULL,
            tweets_analyzed INTEGER NOT NULL DEFAULT 0,
            basis TEXT NOT NULL,                   -- 'full' or 'quick'
            scored_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Latest project score per project
        CREATE TABLE IF NOT EXISTS project_scores (
            project_id TEXT PRIMARY KEY,
            akari_project_score INTEGER NOT NULL,  -- 0-1000
            official_score INTEGER NOT NULL,       -- 0-100 components
            kol_average INTEGER NOT NULL,
            inner_circle_impact INTEGER NOT NULL,
            community_quality INTEGER NOT NULL,
            sentiment_score INTEGER NOT NULL,
            ct_heat_score INTEGER NOT NULL,
            followers INTEGER NOT NULL DEFAULT 0,  -- count at scoring time
            scored_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- The global inner circle (qualified high-credibility profiles)
        CREATE TABLE IF NOT EXISTS circle_members (
            profile_id TEXT PRIMARY KEY,
            akari_profile_score INTEGER NOT NULL,
            influence_score REAL NOT NULL,
            segment TEXT NOT NULL
        );

        -- Per-project circle memberships with derived weights
        CREATE TABLE IF NOT EXISTS circle_memberships (
            profile_id TEXT NOT NULL,
            project_id TEXT NOT NULL,
            is_follower INTEGER NOT NULL DEFAULT 0,
            is_author INTEGER NOT NULL DEFAULT 0,
            weight REAL NOT NULL,
            last_interaction_at TEXT NOT NULL,
            PRIMARY KEY (profile_id, project_id)
        );

        -- Topic scores per (project, topic, window): replaced wholesale
        -- on each recomputation
        CREATE TABLE IF NOT EXISTS topic_scores (
            project_id TEXT NOT NULL,
            topic TEXT NOT NULL,
            window TEXT NOT NULL,
            score INTEGER NOT NULL,               -- 0-100
            tweet_count INTEGER NOT NULL,
            weighted_score REAL NOT NULL,
            PRIMARY KEY (project_id, topic, window)
        );

        -- Index for ranking profiles by composite score
        CREATE INDEX IF NOT EXISTS idx_profile_scores_akari
            ON profile_scores(akari_profile_score);

        -- Index for collecting one project's circle
        CREATE INDEX IF NOT EXISTS idx_memberships_project
            ON circle_memberships(project_id);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
/// The migration function receives the connection and should execute its SQL.
#[allow(dead_code)]
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
