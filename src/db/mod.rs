// Database layer: SQLite persistence for computed scores.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Methods lock the mutex, do synchronous rusqlite work, and return;
// the lock is never held across .await points. The free functions in
// queries.rs stay usable directly in tests.

pub mod models;
pub mod queries;
pub mod schema;

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tokio::sync::Mutex;

use models::{
    InnerCircleMember, ProfileScoreResult, ProjectCircleMembership, ProjectScoreResult, TopicScore,
};

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database at the given path and apply the schema.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {path}"))?;
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        schema::table_count(&conn)
    }

    pub async fn upsert_profile_score(&self, score: &ProfileScoreResult) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::upsert_profile_score(&conn, score)
    }

    pub async fn get_profile_score(&self, handle: &str) -> Result<Option<ProfileScoreResult>> {
        let conn = self.conn.lock().await;
        queries::get_profile_score(&conn, handle)
    }

    pub async fn get_ranked_profiles(&self, min_score: u32) -> Result<Vec<ProfileScoreResult>> {
        let conn = self.conn.lock().await;
        queries::get_ranked_profiles(&conn, min_score)
    }

    pub async fn replace_circle_members(&self, members: &[InnerCircleMember]) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::replace_circle_members(&conn, members)
    }

    pub async fn get_circle_members(&self) -> Result<Vec<InnerCircleMember>> {
        let conn = self.conn.lock().await;
        queries::get_circle_members(&conn)
    }

    pub async fn get_influence_map(&self) -> Result<HashMap<String, f64>> {
        let conn = self.conn.lock().await;
        queries::get_influence_map(&conn)
    }

    pub async fn upsert_membership(&self, membership: &ProjectCircleMembership) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::upsert_membership(&conn, membership)
    }

    pub async fn get_project_circle(&self, project_id: &str) -> Result<HashSet<String>> {
        let conn = self.conn.lock().await;
        queries::get_project_circle(&conn, project_id)
    }

    pub async fn get_other_project_circles(
        &self,
        exclude_project: &str,
    ) -> Result<Vec<(String, HashSet<String>)>> {
        let conn = self.conn.lock().await;
        queries::get_other_project_circles(&conn, exclude_project)
    }

    pub async fn get_project_kol_scores(&self, project_id: &str) -> Result<Vec<(u32, f64)>> {
        let conn = self.conn.lock().await;
        queries::get_project_kol_scores(&conn, project_id)
    }

    pub async fn upsert_project_score(&self, score: &ProjectScoreResult) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::upsert_project_score(&conn, score)
    }

    pub async fn get_project_score(&self, project_id: &str) -> Result<Option<ProjectScoreResult>> {
        let conn = self.conn.lock().await;
        queries::get_project_score(&conn, project_id)
    }

    pub async fn replace_topic_scores(
        &self,
        project_id: &str,
        window: &str,
        scores: &[TopicScore],
    ) -> Result<()> {
        let conn = self.conn.lock().await;
        queries::replace_topic_scores(&conn, project_id, window, scores)
    }

    pub async fn get_topic_scores(&self, project_id: &str, window: &str) -> Result<Vec<TopicScore>> {
        let conn = self.conn.lock().await;
        queries::get_topic_scores(&conn, project_id, window)
    }

    pub async fn get_counts(&self) -> Result<(i64, i64, i64, i64)> {
        let conn = self.conn.lock().await;
        queries::get_counts(&conn)
    }
}
