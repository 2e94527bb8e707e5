//! Snapshot synchronization
//!
//! `run_sync` does one fetch-and-save. The sync service wraps it in a daily
//! schedule (configured hour/minute, local time) and, after each successful
//! scheduled sync, tries to send the weekly Telegram summary when a roughly
//! week-old snapshot exists to compare against.

pub mod llama;

pub use llama::LlamaClient;

use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::analysis::{build_report, FilterCriteria, TvlReport};
use crate::config::with_config;
use crate::logger::{self, LogTag};
use crate::snapshots::{pick_near_days_ago, SnapshotStore};

/// Days back the weekly comparison targets
const WEEKLY_DAYS_AGO: i64 = 7;

/// Fetch the current protocol list and persist it as a new snapshot
pub async fn run_sync(store: &SnapshotStore, client: &LlamaClient) -> Result<PathBuf, String> {
    logger::info(LogTag::Sync, "Starting data synchronization with DeFiLlama...");

    let records = client
        .fetch_protocols()
        .await
        .map_err(|e| format!("Fetch failed: {}", e))?;

    let path = store
        .save(&records)
        .map_err(|e| format!("Save failed: {}", e))?;

    logger::info(LogTag::Sync, "Synchronization completed successfully");
    Ok(path)
}

/// Start the scheduled sync loop
///
/// Runs until `shutdown` is notified. Each cycle sleeps to the next
/// configured sync time, syncs, then attempts the weekly notification.
/// Failures are logged and the loop continues; a broken fetch today must
/// not kill tomorrow's.
pub fn start_sync_service(shutdown: Arc<Notify>, store: Arc<SnapshotStore>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let wait = duration_until_next_sync(Local::now().naive_local());
            logger::debug(
                LogTag::Sync,
                &format!("Next sync in {}s", wait.as_secs()),
            );

            tokio::select! {
                _ = shutdown.notified() => {
                    logger::info(LogTag::Sync, "Sync service shutting down");
                    break;
                }
                _ = tokio::time::sleep(wait) => {
                    match LlamaClient::from_config() {
                        Ok(client) => {
                            if let Err(e) = run_sync(&store, &client).await {
                                logger::error(LogTag::Sync, &format!("Scheduled sync failed: {}", e));
                                continue;
                            }
                        }
                        Err(e) => {
                            logger::error(LogTag::Sync, &format!("Cannot build API client: {}", e));
                            continue;
                        }
                    }

                    if let Err(e) = send_weekly_notification(&store).await {
                        logger::warning(
                            LogTag::Sync,
                            &format!("Weekly notification skipped: {}", e),
                        );
                    }
                }
            }
        }
    })
}

/// Time from `now` until the next configured daily sync
fn duration_until_next_sync(now: NaiveDateTime) -> std::time::Duration {
    let (hour, minute) = with_config(|c| (c.sync.sync_hour, c.sync.sync_minute));

    let today_target = now
        .date()
        .and_hms_opt(hour.min(23), minute.min(59), 0)
        .unwrap_or(now);

    let target = if today_target > now {
        today_target
    } else {
        today_target + ChronoDuration::days(1)
    };

    (target - now).to_std().unwrap_or(std::time::Duration::ZERO)
}

/// Build the weekly report against the snapshot from about a week ago
///
/// Returns None when there is no snapshot within the tolerance window;
/// the caller treats that as a routine skip, not an error.
pub fn build_weekly_report(store: &SnapshotStore) -> Result<Option<TvlReport>, String> {
    let all = store.list_meta();
    let latest = match all.first() {
        Some(latest) => latest.clone(),
        None => return Ok(None),
    };

    let week_old = match pick_near_days_ago(WEEKLY_DAYS_AGO, latest.date, &all[1..]) {
        Some(meta) => meta,
        None => {
            logger::info(
                LogTag::Sync,
                "No snapshot from about a week ago, skipping weekly report",
            );
            return Ok(None);
        }
    };

    let start = store
        .load(&week_old.filename)
        .map_err(|e| format!("Cannot load {}: {}", week_old.filename, e))?;
    let end = store
        .load(&latest.filename)
        .map_err(|e| format!("Cannot load {}: {}", latest.filename, e))?;

    let (min_tvl, top_n) =
        with_config(|c| (c.filters.default_min_tvl, c.filters.weekly_top_n));
    let filter = FilterCriteria::from_config(min_tvl, None);

    Ok(Some(build_report(
        &start,
        &end,
        week_old.date,
        latest.date,
        &filter,
        Some(top_n),
    )))
}

/// Send the condensed weekly summary over Telegram, when enabled
#[cfg(feature = "telegram")]
async fn send_weekly_notification(store: &SnapshotStore) -> Result<(), String> {
    let enabled = with_config(|c| c.telegram.enabled);
    if !enabled {
        logger::debug(LogTag::Sync, "Telegram disabled, not sending weekly summary");
        return Ok(());
    }

    let report = match build_weekly_report(store)? {
        Some(report) => report,
        None => return Ok(()),
    };

    let message = crate::telegram::formatters::msg_weekly_summary(&report);
    let notifier = crate::telegram::TelegramNotifier::from_config()?;
    notifier.send_message(&message).await?;

    logger::info(LogTag::Sync, "Weekly summary sent to Telegram");
    Ok(())
}

#[cfg(not(feature = "telegram"))]
async fn send_weekly_notification(_store: &SnapshotStore) -> Result<(), String> {
    Ok(())
}
