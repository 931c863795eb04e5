// Bulk quick-scoring: score an entire follower list without fetching
// every account's timeline.
//
// Fetching is the only slow part (one profile request per handle), so
// it runs concurrently with buffer_unordered; the quick scorer itself
// is pure and synchronous. Accounts that fail to fetch are skipped, not
// fatal: a bulk run over thousands of handles will always hit a few
// suspended or renamed accounts.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::db::models::ProfileScoreResult;
use crate::scoring::profile::{self, AccountMetrics};
use crate::sources::client::TwitterClient;
use crate::sources::profiles;

/// Quick-score a list of handles, fetching `concurrency` profiles at a time.
pub async fn quick_score_handles(
    client: &TwitterClient,
    handles: &[String],
    concurrency: usize,
) -> Result<Vec<ProfileScoreResult>> {
    let pb = ProgressBar::new(handles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Scoring [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let fetched: Vec<Result<Option<_>>> = stream::iter(handles.iter().map(|handle| {
        let pb = &pb;
        async move {
            let record = profiles::fetch_account(client, handle).await;
            pb.inc(1);
            record
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    let mut results = Vec::new();
    for outcome in fetched {
        match outcome {
            Ok(Some(account)) => {
                let metrics = AccountMetrics::from_record(&account, &[]);
                results.push(profile::score_profile_quick(&account.handle, &metrics));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Failed to fetch account, skipping");
            }
        }
    }

    Ok(results)
}
