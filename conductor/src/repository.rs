use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AutomationError;
use crate::template::ScriptTemplate;
use std::path::{Path, PathBuf};

const SCRIPT_PREFIX: &str = "script_";
const SCRIPT_EXTENSION: &str = "json";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One persisted script document, identified by its storage path.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptRecord {
    pub display_name: String,
    pub storage_path: PathBuf,
    /// Derived from the timestamp encoded in the filename; immutable once
    /// written and only as precise as the generation clock. `None` for files
    /// that do not follow the generated-name scheme.
    pub created_at: Option<NaiveDateTime>,
}

/// Read-only summary of a script, derived without executing anything.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptPreview {
    pub display_name: String,
    pub storage_path: PathBuf,
    /// App of the first (or only) step. A multi-step script is never assumed
    /// to target a single app beyond this display hint.
    pub target_app: String,
    pub step_count: usize,
    pub is_multi_step: bool,
}

/// Lifecycle operations for script documents, against a single flat
/// directory of JSON text files.
///
/// The store has no locking: two saves within the same wall-clock second may
/// collide on the generated name, and concurrent update/delete on one path
/// is last-write-wins. Both are documented limitations of the flat-file
/// design, not defended against here.
#[derive(Debug, Clone)]
pub struct ScriptRepository {
    dir: PathBuf,
}

impl ScriptRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All stored scripts, newest first by the timestamp encoded in the
    /// filename (string-descending is sufficient given the fixed-width,
    /// zero-padded encoding).
    pub async fn list(&self) -> Result<Vec<ScriptRecord>, AutomationError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_script = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == SCRIPT_EXTENSION);
            if !is_script {
                continue;
            }
            let display_name = entry.file_name().to_string_lossy().to_string();
            records.push(ScriptRecord {
                created_at: parse_created_at(&display_name),
                display_name,
                storage_path: path,
            });
        }

        records.sort_by(|a, b| b.display_name.cmp(&a.display_name));
        debug!(count = records.len(), "listed scripts");
        Ok(records)
    }

    /// Raw file content, no parsing or validation.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<String, AutomationError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AutomationError::ScriptNotFound(path.display().to_string()));
        }
        Ok(tokio::fs::read_to_string(path).await?)
    }

    /// Write `content` under a freshly generated, timestamp-encoded name and
    /// return the new path. Never overwrites an existing script.
    pub async fn save(&self, content: &str) -> Result<PathBuf, AutomationError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let path = self
            .dir
            .join(format!("{SCRIPT_PREFIX}{timestamp}.{SCRIPT_EXTENSION}"));
        tokio::fs::write(&path, content).await?;

        info!(path = %path.display(), "saved script");
        Ok(path)
    }

    /// Overwrite an existing script with new content. The target must exist
    /// and the new content must be syntactically valid JSON; otherwise the
    /// stored file is left untouched.
    pub async fn update(
        &self,
        path: impl AsRef<Path>,
        new_content: &str,
    ) -> Result<(), AutomationError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AutomationError::ScriptNotFound(path.display().to_string()));
        }

        serde_json::from_str::<serde_json::Value>(new_content)
            .map_err(|e| AutomationError::InvalidScript(format!("not valid JSON: {e}")))?;

        tokio::fs::write(path, new_content).await?;
        info!(path = %path.display(), "updated script");
        Ok(())
    }

    pub async fn delete(&self, path: impl AsRef<Path>) -> Result<(), AutomationError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AutomationError::ScriptNotFound(path.display().to_string()));
        }
        tokio::fs::remove_file(path).await?;
        info!(path = %path.display(), "deleted script");
        Ok(())
    }

    /// Lightweight summary of a stored script without executing it.
    ///
    /// Parses loosely on purpose: a document that would fail step validation
    /// still previews, so the host can show it for editing.
    pub async fn preview(&self, path: impl AsRef<Path>) -> Result<ScriptPreview, AutomationError> {
        let path = path.as_ref();
        let content = self.load(path).await?;
        let doc: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| AutomationError::InvalidScript(format!("not valid JSON: {e}")))?;

        let steps = doc.get("steps").and_then(|s| s.as_array());
        let is_multi_step = steps.is_some();
        let step_count = steps.map_or(1, |s| s.len());
        let target_app = match steps {
            Some(steps) => steps
                .first()
                .and_then(|step| step.get("app"))
                .and_then(|app| app.as_str()),
            None => doc.get("app").and_then(|app| app.as_str()),
        }
        .unwrap_or("unknown")
        .to_string();

        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ScriptPreview {
            display_name,
            storage_path: path.to_path_buf(),
            target_app,
            step_count,
            is_multi_step,
        })
    }

    /// Save a fresh script from a template; returns the new path and the
    /// template body for immediate editing.
    pub async fn create_from_template(
        &self,
        template: ScriptTemplate,
    ) -> Result<(PathBuf, String), AutomationError> {
        let content = template.content();
        let path = self.save(content).await?;
        Ok((path, content.to_string()))
    }
}

fn parse_created_at(file_name: &str) -> Option<NaiveDateTime> {
    let stem = file_name
        .strip_prefix(SCRIPT_PREFIX)?
        .strip_suffix(&format!(".{SCRIPT_EXTENSION}"))?;
    NaiveDateTime::parse_from_str(stem, TIMESTAMP_FORMAT).ok()
}
