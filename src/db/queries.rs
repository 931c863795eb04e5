// Database queries: free functions over a rusqlite Connection.
//
// Kept as plain functions (rather than methods on the async wrapper) so
// tests can exercise them against an in-memory connection directly.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{
    InnerCircleMember, ProfileScoreResult, ProjectCircleMembership, ProjectScoreResult,
    ScoreBasis, TopicScore,
};
use crate::topics::classifier::Topic;

fn profile_from_row(row: &Row) -> rusqlite::Result<ProfileScoreResult> {
    Ok(ProfileScoreResult {
        handle: row.get("handle")?,
        authenticity_score: row.get("authenticity_score")?,
        influence_score: row.get("influence_score")?,
        signal_density_score: row.get("signal_density_score")?,
        farm_risk_score: row.get("farm_risk_score")?,
        akari_profile_score: row.get("akari_profile_score")?,
        engagement_rate: row.get("engagement_rate")?,
        retweet_ratio: row.get("retweet_ratio")?,
        follower_quality_ratio: row.get("follower_quality_ratio")?,
        tweets_analyzed: row.get("tweets_analyzed")?,
        basis: ScoreBasis::parse(&row.get::<_, String>("basis")?),
        scored_at: row.get("scored_at")?,
    })
}

/// Insert or replace the latest score for an account.
pub fn upsert_profile_score(conn: &Connection, score: &ProfileScoreResult) -> Result<()> {
    conn.execute(
        "INSERT INTO profile_scores
            (handle, authenticity_score, influence_score, signal_density_score,
             farm_risk_score, akari_profile_score, engagement_rate, retweet_ratio,
             follower_quality_ratio, tweets_analyzed, basis, scored_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, datetime('now'))
         ON CONFLICT(handle) DO UPDATE SET
            authenticity_score = excluded.authenticity_score,
            influence_score = excluded.influence_score,
            signal_density_score = excluded.signal_density_score,
            farm_risk_score = excluded.farm_risk_score,
            akari_profile_score = excluded.akari_profile_score,
            engagement_rate = excluded.engagement_rate,
            retweet_ratio = excluded.retweet_ratio,
            follower_quality_ratio = excluded.follower_quality_ratio,
            tweets_analyzed = excluded.tweets_analyzed,
            basis = excluded.basis,
            scored_at = datetime('now')",
        params![
            score.handle,
            score.authenticity_score,
            score.influence_score,
            score.signal_density_score,
            score.farm_risk_score,
            score.akari_profile_score,
            score.engagement_rate,
            score.retweet_ratio,
            score.follower_quality_ratio,
            score.tweets_analyzed,
            score.basis.as_str(),
        ],
    )
    .context("Failed to upsert profile score")?;
    Ok(())
}

pub fn get_profile_score(conn: &Connection, handle: &str) -> Result<Option<ProfileScoreResult>> {
    conn.query_row(
        "SELECT * FROM profile_scores WHERE handle = ?1 COLLATE NOCASE",
        params![handle],
        profile_from_row,
    )
    .optional()
    .context("Failed to load profile score")
}

/// All profiles at or above a minimum Akari score, best first.
pub fn get_ranked_profiles(conn: &Connection, min_score: u32) -> Result<Vec<ProfileScoreResult>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM profile_scores
         WHERE akari_profile_score >= ?1
         ORDER BY akari_profile_score DESC",
    )?;
    let rows = stmt
        .query_map(params![min_score], profile_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Replace the global circle with a freshly selected member list.
pub fn replace_circle_members(conn: &Connection, members: &[InnerCircleMember]) -> Result<()> {
    conn.execute("DELETE FROM circle_members", [])?;
    let mut stmt = conn.prepare(
        "INSERT INTO circle_members (profile_id, akari_profile_score, influence_score, segment)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for member in members {
        stmt.execute(params![
            member.profile_id,
            member.akari_profile_score,
            member.influence_score,
            member.segment,
        ])?;
    }
    Ok(())
}

pub fn get_circle_members(conn: &Connection) -> Result<Vec<InnerCircleMember>> {
    let mut stmt = conn.prepare(
        "SELECT profile_id, akari_profile_score, influence_score, segment
         FROM circle_members ORDER BY influence_score DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(InnerCircleMember {
                profile_id: row.get(0)?,
                akari_profile_score: row.get(1)?,
                influence_score: row.get(2)?,
                segment: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Influence score per profile, for common-power sums.
pub fn get_influence_map(conn: &Connection) -> Result<HashMap<String, f64>> {
    let mut stmt = conn.prepare("SELECT profile_id, influence_score FROM circle_members")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows.into_iter().collect())
}

pub fn upsert_membership(conn: &Connection, membership: &ProjectCircleMembership) -> Result<()> {
    conn.execute(
        "INSERT INTO circle_memberships
            (profile_id, project_id, is_follower, is_author, weight, last_interaction_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(profile_id, project_id) DO UPDATE SET
            is_follower = excluded.is_follower,
            is_author = excluded.is_author,
            weight = excluded.weight,
            last_interaction_at = excluded.last_interaction_at",
        params![
            membership.profile_id,
            membership.project_id,
            membership.is_follower,
            membership.is_author,
            membership.weight,
            membership.last_interaction_at,
        ],
    )
    .context("Failed to upsert circle membership")?;
    Ok(())
}

/// The set of profile IDs in one project's circle.
pub fn get_project_circle(conn: &Connection, project_id: &str) -> Result<HashSet<String>> {
    let mut stmt =
        conn.prepare("SELECT profile_id FROM circle_memberships WHERE project_id = ?1")?;
    let rows = stmt
        .query_map(params![project_id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows.into_iter().collect())
}

/// Every other project's circle, for competitor ranking.
pub fn get_other_project_circles(
    conn: &Connection,
    exclude_project: &str,
) -> Result<Vec<(String, HashSet<String>)>> {
    let mut stmt = conn.prepare(
        "SELECT project_id, profile_id FROM circle_memberships
         WHERE project_id != ?1 ORDER BY project_id",
    )?;
    let rows = stmt
        .query_map(params![exclude_project], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut circles: Vec<(String, HashSet<String>)> = Vec::new();
    for (project_id, profile_id) in rows {
        match circles.last_mut() {
            Some((last_id, set)) if *last_id == project_id => {
                set.insert(profile_id);
            }
            _ => {
                circles.push((project_id, HashSet::from([profile_id])));
            }
        }
    }
    Ok(circles)
}

/// KOL (score, weight) pairs for a project: circle member scores joined
/// with their membership weights.
pub fn get_project_kol_scores(conn: &Connection, project_id: &str) -> Result<Vec<(u32, f64)>> {
    let mut stmt = conn.prepare(
        "SELECT m.akari_profile_score, cm.weight
         FROM circle_memberships cm
         JOIN circle_members m ON m.profile_id = cm.profile_id
         WHERE cm.project_id = ?1",
    )?;
    let rows = stmt
        .query_map(params![project_id], |row| {
            Ok((row.get::<_, u32>(0)?, row.get::<_, f64>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn upsert_project_score(conn: &Connection, score: &ProjectScoreResult) -> Result<()> {
    conn.execute(
        "INSERT INTO project_scores
            (project_id, akari_project_score, official_score, kol_average,
             inner_circle_impact, community_quality, sentiment_score, ct_heat_score,
             followers, scored_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, datetime('now'))
         ON CONFLICT(project_id) DO UPDATE SET
            akari_project_score = excluded.akari_project_score,
            official_score = excluded.official_score,
            kol_average = excluded.kol_average,
            inner_circle_impact = excluded.inner_circle_impact,
            community_quality = excluded.community_quality,
            sentiment_score = excluded.sentiment_score,
            ct_heat_score = excluded.ct_heat_score,
            followers = excluded.followers,
            scored_at = datetime('now')",
        params![
            score.project_id,
            score.akari_project_score,
            score.official_score,
            score.kol_average,
            score.inner_circle_impact,
            score.community_quality,
            score.sentiment_score,
            score.ct_heat_score,
            score.followers as i64,
        ],
    )
    .context("Failed to upsert project score")?;
    Ok(())
}

pub fn get_project_score(conn: &Connection, project_id: &str) -> Result<Option<ProjectScoreResult>> {
    conn.query_row(
        "SELECT * FROM project_scores WHERE project_id = ?1",
        params![project_id],
        |row| {
            Ok(ProjectScoreResult {
                project_id: row.get("project_id")?,
                akari_project_score: row.get("akari_project_score")?,
                official_score: row.get("official_score")?,
                kol_average: row.get("kol_average")?,
                inner_circle_impact: row.get("inner_circle_impact")?,
                community_quality: row.get("community_quality")?,
                sentiment_score: row.get("sentiment_score")?,
                ct_heat_score: row.get("ct_heat_score")?,
                followers: row.get::<_, i64>("followers")? as u64,
                scored_at: row.get("scored_at")?,
            })
        },
    )
    .optional()
    .context("Failed to load project score")
}

/// Replace a (project, window)'s topic scores wholesale: topic scores
/// are recomputed, never incrementally updated.
pub fn replace_topic_scores(
    conn: &Connection,
    project_id: &str,
    window: &str,
    scores: &[TopicScore],
) -> Result<()> {
    conn.execute(
        "DELETE FROM topic_scores WHERE project_id = ?1 AND window = ?2",
        params![project_id, window],
    )?;
    let mut stmt = conn.prepare(
        "INSERT INTO topic_scores (project_id, topic, window, score, tweet_count, weighted_score)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for score in scores {
        stmt.execute(params![
            project_id,
            score.topic.as_str(),
            window,
            score.score,
            score.tweet_count,
            score.weighted_score,
        ])?;
    }
    Ok(())
}

pub fn get_topic_scores(conn: &Connection, project_id: &str, window: &str) -> Result<Vec<TopicScore>> {
    let mut stmt = conn.prepare(
        "SELECT topic, score, tweet_count, weighted_score
         FROM topic_scores WHERE project_id = ?1 AND window = ?2
         ORDER BY score DESC",
    )?;
    let rows = stmt
        .query_map(params![project_id, window], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    // Skip rows whose topic label no longer parses (stale data from an
    // older topic set) rather than failing the whole read
    Ok(rows
        .into_iter()
        .filter_map(|(topic, score, tweet_count, weighted_score)| {
            Some(TopicScore {
                topic: Topic::from_str(&topic).ok()?,
                score,
                tweet_count,
                weighted_score,
            })
        })
        .collect())
}

/// Row counts for the status command: (profiles, projects, circle members,
/// memberships).
pub fn get_counts(conn: &Connection) -> Result<(i64, i64, i64, i64)> {
    let count = |sql: &str| -> Result<i64> {
        conn.query_row(sql, [], |row| row.get(0))
            .context("Failed to count rows")
    };
    Ok((
        count("SELECT COUNT(*) FROM profile_scores")?,
        count("SELECT COUNT(*) FROM project_scores")?,
        count("SELECT COUNT(*) FROM circle_members")?,
        count("SELECT COUNT(*) FROM circle_memberships")?,
    ))
}
