// Colored terminal output for profile cards, project cards, tiers and
// topic charts. The main.rs command handlers delegate all formatting here.

use colored::Colorize;

use super::truncate_chars;
use crate::db::models::{CommonCircleResult, ProfileScoreResult, ProjectScoreResult, TopicScore};
use crate::pipeline::project::ProjectRefreshReport;
use crate::scoring::tier::{assign_tier, Tier};

/// Display a single profile's score card.
pub fn display_profile_score(score: &ProfileScoreResult) {
    let assignment = assign_tier(Some(score.akari_profile_score));

    println!(
        "\n{}",
        format!("=== Akari Score for @{} ===", score.handle).bold()
    );
    println!(
        "  {} / 1000  {}",
        score.akari_profile_score.to_string().bold(),
        colorize_tier(assignment.tier)
    );
    println!("  {}", assignment.description.dimmed());
    println!();
    println!("  Authenticity:   {}", score_bar(score.authenticity_score));
    println!("  Influence:      {}", score_bar(score.influence_score));
    println!(
        "  Signal density: {}",
        score_bar(score.signal_density_score)
    );
    println!("  Farm risk:      {}", risk_bar(score.farm_risk_score));
    println!();
    println!(
        "  Engagement rate: {:.3}%  Retweet ratio: {:.0}%  Follower quality: {:.0}%",
        score.engagement_rate * 100.0,
        score.retweet_ratio * 100.0,
        score.follower_quality_ratio * 100.0
    );
    println!(
        "  Tweets analyzed: {}  Basis: {}",
        score.tweets_analyzed,
        score.basis.as_str()
    );
}

/// Display a ranked list of profiles.
pub fn display_profile_ranking(scores: &[ProfileScoreResult]) {
    if scores.is_empty() {
        println!("No profiles scored yet. Run `akari score <handle>` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Ranked Profiles ({} scored) ===", scores.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<28} {:>6}  {:<10}  {:>6}  {:>6}",
        "Rank".dimmed(),
        "Handle".dimmed(),
        "Akari".dimmed(),
        "Tier".dimmed(),
        "Infl".dimmed(),
        "Auth".dimmed(),
    );
    println!("  {}", "-".repeat(70).dimmed());

    for (i, score) in scores.iter().enumerate() {
        let tier = Tier::from_score(score.akari_profile_score);
        println!(
            "  {:>4}. @{:<26} {:>6}  {:<10}  {:>6.1}  {:>6.1}",
            i + 1,
            score.handle,
            score.akari_profile_score,
            colorize_tier(tier),
            score.influence_score,
            score.authenticity_score,
        );
    }
    println!();
}

/// Display a project's full refresh report.
pub fn display_project_report(report: &ProjectRefreshReport) {
    display_project_score(&report.score);

    println!(
        "  Circle size: {}  Mentions analyzed: {}",
        report.circle_size, report.mentions_analyzed
    );

    if !report.topics.is_empty() {
        display_topic_chart(&report.topics);
    }

    if !report.competitors.is_empty() {
        println!("\n  {}", "Closest competitors by audience:".bold());
        for (project_id, result) in &report.competitors {
            println!(
                "    {:<24} similarity {:.4}  shared {}  power {:.0}",
                project_id, result.similarity_score, result.common_count, result.common_power
            );
        }
    }
    println!();
}

/// Display a project's score card.
pub fn display_project_score(score: &ProjectScoreResult) {
    let tier = Tier::from_score(score.akari_project_score);

    println!(
        "\n{}",
        format!("=== Akari Project Score: {} ===", score.project_id).bold()
    );
    println!(
        "  {} / 1000  {}",
        score.akari_project_score.to_string().bold(),
        colorize_tier(tier)
    );
    println!();
    println!(
        "  Official: {:>3}  KOLs: {:>3}  Sentiment: {:>3}  CT Heat: {:>3}",
        score.official_score, score.kol_average, score.sentiment_score, score.ct_heat_score
    );
    println!(
        "  Circle impact: {:>3}  Community: {:>3}",
        score.inner_circle_impact, score.community_quality
    );
}

/// Display the overlap between two project circles.
pub fn display_common_circle(project_a: &str, project_b: &str, result: &CommonCircleResult) {
    println!(
        "\n{}",
        format!("=== Audience Overlap: {project_a} vs {project_b} ===").bold()
    );
    println!(
        "  Similarity: {}  Shared members: {}  Shared power: {:.0}",
        format!("{:.4}", result.similarity_score).bold(),
        result.common_count,
        result.common_power
    );
    if !result.common_members.is_empty() {
        let preview: Vec<&str> = result
            .common_members
            .iter()
            .take(10)
            .map(String::as_str)
            .collect();
        // Handles can be long; keep the preview to one terminal line
        println!(
            "  Shared: {}",
            truncate_chars(&preview.join(", "), 96).dimmed()
        );
        if result.common_members.len() > 10 {
            println!(
                "  ... and {} more",
                result.common_members.len() - 10
            );
        }
    }
    println!();
}

/// Display a bar chart of a project's topic scores.
pub fn display_topic_chart(topics: &[TopicScore]) {
    println!("\n  {}", "Topics:".bold());
    for topic in topics {
        let filled = (topic.score as usize * 20 / 100).min(20);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled));
        println!(
            "    {:<16} {} {:>3}  ({} tweets)",
            topic.topic.as_str(),
            bar.cyan(),
            topic.score,
            topic.tweet_count
        );
    }
}

/// Display the five tiers and their score bands.
pub fn display_tier_table() {
    println!("\n{}", "=== Akari Tiers ===".bold());
    println!();
    for tier in Tier::all().iter().rev() {
        let (lo, hi) = tier.range();
        println!("  {:<12} {:>4} - {:<4}", colorize_tier(*tier), lo, hi);
    }
    println!();
}

/// A 0-100 score as a colored 20-char bar with the value.
fn score_bar(score: f64) -> String {
    let clamped = score.clamp(0.0, 100.0);
    let filled = (clamped as usize * 20 / 100).min(20);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled));
    let colored_bar = if clamped >= 70.0 {
        bar.green()
    } else if clamped >= 40.0 {
        bar.yellow()
    } else {
        bar.red()
    };
    format!("{colored_bar} {clamped:>5.1}")
}

/// Farm risk uses inverted colors: low is good.
fn risk_bar(score: f64) -> String {
    let clamped = score.clamp(0.0, 100.0);
    let filled = (clamped as usize * 20 / 100).min(20);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled));
    let colored_bar = if clamped >= 50.0 {
        bar.red()
    } else if clamped >= 20.0 {
        bar.yellow()
    } else {
        bar.green()
    };
    format!("{colored_bar} {clamped:>5.1}")
}

/// Colorize a tier name.
fn colorize_tier(tier: Tier) -> colored::ColoredString {
    match tier {
        Tier::Celestial => tier.as_str().bright_magenta().bold(),
        Tier::Vanguard => tier.as_str().green().bold(),
        Tier::Ranger => tier.as_str().cyan(),
        Tier::Nomad => tier.as_str().yellow(),
        Tier::Shadow => tier.as_str().dimmed(),
    }
}
