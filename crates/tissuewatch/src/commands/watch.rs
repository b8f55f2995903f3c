//! Live alert list: reload snapshots on an interval, re-render on change.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use tissuewatch_core::{AlertCategory, DeviceFeed};

use crate::cli::{OutputFormat, WatchArgs};
use crate::config::{Settings, SourcePaths};
use crate::error::CliError;
use crate::output;

use super::{alerts, util};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub async fn handle(
    args: WatchArgs,
    sources: &SourcePaths,
    settings: &Settings,
) -> Result<(), CliError> {
    let category = AlertCategory::from(args.view);
    let search = args.search.unwrap_or_default();
    let secs = args.interval.unwrap_or(settings.watch_interval);
    if secs == 0 {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: "must be at least 1 second".into(),
        });
    }
    let period = Duration::from_secs(secs);

    let feed = Arc::new(DeviceFeed::with_snapshot(util::load_snapshot(sources).await?));
    let mut generations = feed.subscribe();
    render_frame(&feed, category, &search, settings);

    tracing::info!(%category, interval_secs = period.as_secs(), "watching snapshots");
    let poller = tokio::spawn(poll(Arc::clone(&feed), sources.clone(), period));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            res = &mut ctrl_c => {
                res?;
                break;
            }
            changed = generations.changed() => {
                if changed.is_err() {
                    break;
                }
                render_frame(&feed, category, &search, settings);
            }
        }
    }

    poller.abort();
    Ok(())
}

/// Reload the snapshot files every `period` and publish changes to `feed`.
///
/// Failed reloads keep the previous data on screen.
async fn poll(feed: Arc<DeviceFeed>, sources: SourcePaths, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick fires immediately; the initial load already happened.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match util::load_snapshot(&sources).await {
            Ok(snapshot) => {
                if !feed.apply(snapshot) {
                    tracing::trace!("snapshots unchanged");
                }
            }
            Err(err) => tracing::warn!(error = %err, "snapshot reload failed"),
        }
    }
}

fn render_frame(feed: &DeviceFeed, category: AlertCategory, search: &str, settings: &Settings) {
    let views = feed.views(category, search);
    let body = alerts::render(settings, &alerts::rank(category, &views));

    if !matches!(settings.output, OutputFormat::Table) {
        output::print_output(&body, settings.quiet);
        return;
    }

    let header = output::heading(
        &format!(
            "{} | {} devices | generation {} | {}",
            category.title(),
            views.len(),
            feed.generation(),
            chrono::Local::now().format("%H:%M:%S"),
        ),
        settings.color,
    );
    let clear = if std::io::stdout().is_terminal() {
        CLEAR_SCREEN
    } else {
        ""
    };
    output::print_output(&format!("{clear}{header}\n{body}"), settings.quiet);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn reload_publishes_a_new_generation() {
        let dir = tempfile::tempdir().unwrap();
        let sources = SourcePaths {
            devices: write(dir.path(), "devices.json", r#"[{"id": 1, "name": "Lobby"}]"#),
            analytics: None,
            status: Some(write(
                dir.path(),
                "status.json",
                r#"[{"device_id": 1, "battery_percentage": 80, "power_status": "on"}]"#,
            )),
        };

        let feed = Arc::new(DeviceFeed::with_snapshot(
            util::load_snapshot(&sources).await.unwrap(),
        ));
        let mut generations = feed.subscribe();
        assert!(feed.views(AlertCategory::BatteryOff, "").is_empty());

        let poller = tokio::spawn(poll(
            Arc::clone(&feed),
            sources.clone(),
            Duration::from_millis(20),
        ));
        write(
            dir.path(),
            "status.json",
            r#"[{"device_id": 1, "battery_percentage": 0, "power_status": "on"}]"#,
        );

        tokio::time::timeout(Duration::from_secs(5), generations.changed())
            .await
            .unwrap()
            .unwrap();
        poller.abort();

        assert!(*generations.borrow() >= 1);
        let views = feed.views(AlertCategory::BatteryOff, "");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].device_name, "Lobby");
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_data() {
        let dir = tempfile::tempdir().unwrap();
        let sources = SourcePaths {
            devices: write(dir.path(), "devices.json", r#"[{"id": 1}]"#),
            analytics: None,
            status: None,
        };
        let feed = Arc::new(DeviceFeed::with_snapshot(
            util::load_snapshot(&sources).await.unwrap(),
        ));
        let generations = feed.subscribe();

        write(dir.path(), "devices.json", "{broken");
        let poller = tokio::spawn(poll(
            Arc::clone(&feed),
            sources.clone(),
            Duration::from_millis(10),
        ));
        tokio::time::sleep(Duration::from_millis(100)).await;
        poller.abort();

        assert!(!generations.has_changed().unwrap());
        assert_eq!(feed.generation(), 0);
        assert_eq!(feed.snapshot().devices.len(), 1);
    }
}
