//! Shared helpers for command handlers.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;

use tissuewatch_core::{Snapshot, records_from_str};

use crate::config::SourcePaths;
use crate::error::CliError;

/// Read and decode all three snapshot files.
///
/// The devices file must exist. Analytics and status may be unset or
/// missing on disk; either way they load as empty collections.
pub async fn load_snapshot(sources: &SourcePaths) -> Result<Snapshot, CliError> {
    let devices = read_required(&sources.devices, "devices").await?;
    let analytics = read_optional(sources.analytics.as_deref(), "analytics").await?;
    let status = read_optional(sources.status.as_deref(), "status").await?;

    tracing::debug!(
        devices = devices.len(),
        analytics = analytics.len(),
        status = status.len(),
        "loaded snapshots"
    );
    Ok(Snapshot::new(devices, analytics, status))
}

async fn read_required<T>(path: &Path, name: &str) -> Result<Vec<T>, CliError>
where
    T: DeserializeOwned + Default,
{
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(records_from_str(name, &raw)?)
}

async fn read_optional<T>(path: Option<&Path>, name: &str) -> Result<Vec<T>, CliError>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Ok(records_from_str(name, &raw)?),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "{name} snapshot missing; using empty collection");
            Ok(Vec::new())
        }
        Err(source) => Err(CliError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn missing_optional_sources_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sources = SourcePaths {
            devices: write(dir.path(), "devices.json", r#"[{"id": 1, "name": "Lobby"}]"#),
            analytics: Some(dir.path().join("absent.json")),
            status: None,
        };
        let snap = load_snapshot(&sources).await.unwrap();
        assert_eq!(snap.devices.len(), 1);
        assert!(snap.analytics.is_empty());
        assert!(snap.status.is_empty());
    }

    #[tokio::test]
    async fn missing_devices_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sources = SourcePaths {
            devices: dir.path().join("devices.json"),
            analytics: None,
            status: None,
        };
        let err = load_snapshot(&sources).await.unwrap_err();
        assert!(matches!(err, CliError::SourceUnreadable { .. }));
    }

    #[tokio::test]
    async fn malformed_json_names_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let sources = SourcePaths {
            devices: write(dir.path(), "devices.json", "[]"),
            analytics: None,
            status: Some(write(dir.path(), "status.json", "{oops")),
        };
        let err = load_snapshot(&sources).await.unwrap_err();
        assert!(matches!(err, CliError::Decode { ref source_name, .. } if source_name == "status"));
    }
}
