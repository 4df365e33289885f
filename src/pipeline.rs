use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::alert::AlertRecord;
use crate::config::PipelineConfig;
use crate::extract::is_basket_alert;

/// Outcome of one pipeline run: every surviving record plus the advisory
/// numbers the CLI reports.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub records: Vec<AlertRecord>,
}

impl PipelineReport {
    /// Min/max SGT date over the sorted records.
    pub fn date_range(&self) -> Option<(&str, &str)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((&first.date, &last.date))
    }

    /// Per-basket occurrence counts, most frequent first. Ties keep the
    /// order in which the baskets were first encountered.
    pub fn basket_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(basket, _)| *basket == record.basket) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.basket.as_str(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

pub struct AlertPipeline {
    config: PipelineConfig,
}

impl AlertPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the full batch: discover files, extract alerts from each,
    /// sort chronologically. A malformed file never aborts the batch;
    /// a missing alerts directory does.
    pub fn run(&self) -> Result<PipelineReport> {
        let files = discover_files(&self.config.alerts_dir)?;
        info!("Processing {} files...", files.len());

        let mut records = Vec::new();
        let mut files_skipped = 0;

        for path in &files {
            match read_messages(path) {
                Ok(messages) => {
                    records.extend(extract_alerts(&messages));
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    files_skipped += 1;
                }
            }
        }

        // Fixed-width UTC timestamps make the lexical sort chronological.
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        Ok(PipelineReport {
            files_processed: files.len(),
            files_skipped,
            records,
        })
    }

    /// Serialize the sorted records to the configured output path,
    /// creating the parent directory if needed and replacing any prior
    /// artifact.
    pub fn write_output(&self, report: &PipelineReport) -> Result<()> {
        let output = &self.config.output_file;
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    anyhow!("Failed to create output directory {}: {}", parent.display(), e)
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&report.records)?;
        fs::write(output, json)
            .map_err(|e| anyhow!("Failed to write {}: {}", output.display(), e))?;

        Ok(())
    }

    pub fn output_file(&self) -> &Path {
        &self.config.output_file
    }
}

/// List the export files worth reading: `.json` extension and a base name
/// that is all digits once internal `-` separators are removed. Anything
/// else (hidden files, notes, unrelated exports) is silently ignored.
/// Returned sorted by filename so processing order is deterministic.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| anyhow!("Failed to read alerts directory {}: {}", dir.display(), e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_numeric_export_name(path))
        .collect();

    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    Ok(files)
}

fn has_numeric_export_name(path: &Path) -> bool {
    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
        return false;
    }
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return false;
    };
    let digits: String = stem.chars().filter(|c| *c != '-').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn read_messages(path: &Path) -> Result<Vec<Value>> {
    let contents = fs::read_to_string(path)?;
    let messages: Vec<Value> = serde_json::from_str(&contents)?;
    Ok(messages)
}

/// Extract alert records from one decoded message array. Pure over its
/// input so tests can feed synthetic collections directly.
pub fn extract_alerts(messages: &[Value]) -> Vec<AlertRecord> {
    let mut records = Vec::new();

    for message in messages {
        let Some(entry) = message.as_object() else {
            continue;
        };

        let Some(text) = entry.get("text").and_then(Value::as_str).filter(|t| !t.is_empty())
        else {
            continue;
        };
        let Some(ts) = message_ts(entry.get("ts")) else {
            continue;
        };

        if !is_basket_alert(text) {
            continue;
        }

        let Some(record) = AlertRecord::from_message(text, &ts) else {
            debug!("Dropping unmatchable alert text: {}", text);
            continue;
        };

        // Resolved means the condition cleared, not a new occurrence.
        if record.is_resolved() {
            continue;
        }

        records.push(record);
    }

    records
}

// Slack exports carry `ts` as a decimal string; tolerate a bare number too.
fn message_ts(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
