//! Artifact Store (spec §4.7): writes every iteration's intermediate
//! products to disk as the run progresses, plus the run-level summary and
//! `final.html`, which is always written even on a failed run (spec §4.7:
//! a caller should be able to inspect the last attempt regardless of
//! outcome). Per-iteration writes fan out in parallel since they're
//! independent files with no ordering requirement between them.

pub mod layout;

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{DsStarError, Result};
use crate::failure_memory::{IterationRecord, RunSummary};

/// Owns the root directory artifacts are written under and the current
/// run's id.
pub struct ArtifactStore {
    run_dir: PathBuf,
}

impl ArtifactStore {
    /// Create the run directory under `root`. Fails if the directory
    /// cannot be created (e.g. permissions, disk full).
    pub async fn create(root: &Path, run_id: &str) -> Result<Self> {
        let run_dir = layout::run_dir(root, run_id);
        fs::create_dir_all(&run_dir).await.map_err(|source| DsStarError::ArtifactWrite {
            path: run_dir.display().to_string(),
            source,
        })?;
        Ok(Self { run_dir })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Write every artifact captured in `record` for one iteration,
    /// fanning the individual file writes out in parallel.
    pub async fn write_iteration(&self, record: &IterationRecord) -> Result<()> {
        let dir = layout::iteration_dir(&self.run_dir, record.iteration_index);
        fs::create_dir_all(&dir).await.map_err(|source| DsStarError::ArtifactWrite {
            path: dir.display().to_string(),
            source,
        })?;

        let plan_write = write_optional_json(layout::plan_path(&dir), record.plan.as_ref());
        let html_write = write_optional_text(layout::html_path(&dir), record.html.as_deref());
        let scan_write = write_optional_json(layout::scan_path(&dir), record.security_scan.as_ref());
        let critique_write =
            write_optional_json(layout::critique_path(&dir), record.code_critique.as_ref());
        let smoke_write = write_optional_json(layout::smoke_path(&dir), record.smoke_result.as_ref());

        let (plan_res, html_res, scan_res, critique_res, smoke_res) =
            tokio::join!(plan_write, html_write, scan_write, critique_write, smoke_write);
        plan_res?;
        html_res?;
        scan_res?;
        critique_res?;
        smoke_res?;
        Ok(())
    }

    /// Always write `final.html`, even for a failed run, so the caller
    /// can inspect the last attempt regardless of outcome.
    pub async fn write_final_html(&self, html: &str) -> Result<()> {
        let path = layout::final_html_path(&self.run_dir);
        fs::write(&path, html)
            .await
            .map_err(|source| DsStarError::ArtifactWrite { path: path.display().to_string(), source })
    }

    pub async fn write_summary(&self, summary: &RunSummary) -> Result<()> {
        let path = layout::summary_path(&self.run_dir);
        let json = serde_json::to_vec_pretty(summary)?;
        fs::write(&path, json)
            .await
            .map_err(|source| DsStarError::ArtifactWrite { path: path.display().to_string(), source })
    }
}

async fn write_optional_json<T: serde::Serialize>(path: PathBuf, value: Option<&T>) -> Result<()> {
    let Some(value) = value else { return Ok(()) };
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(&path, json)
        .await
        .map_err(|source| DsStarError::ArtifactWrite { path: path.display().to_string(), source })
}

async fn write_optional_text(path: PathBuf, value: Option<&str>) -> Result<()> {
    let Some(value) = value else { return Ok(()) };
    fs::write(&path, value)
        .await
        .map_err(|source| DsStarError::ArtifactWrite { path: path.display().to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use chrono::Utc;

    #[tokio::test]
    async fn write_iteration_creates_only_files_for_present_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::create(tmp.path(), "test-run").await.unwrap();

        let mut record = IterationRecord::started(0, Utc::now());
        record.html = Some("<html></html>".to_string());
        record.record_phase(Phase::CodeGen, true, None);

        store.write_iteration(&record).await.unwrap();

        let dir = layout::iteration_dir(store.run_dir(), 0);
        assert!(layout::html_path(&dir).exists());
        assert!(!layout::plan_path(&dir).exists());
    }

    #[tokio::test]
    async fn final_html_is_always_written() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::create(tmp.path(), "test-run").await.unwrap();
        store.write_final_html("<html>last attempt</html>").await.unwrap();
        let path = layout::final_html_path(store.run_dir());
        assert!(path.exists());
    }
}
