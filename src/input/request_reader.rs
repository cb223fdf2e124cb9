use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::models::RiskRequest;

/// How requests are laid out in the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A single JSON object, or an array of objects
    Json,
    /// One JSON object per line
    Jsonl,
}

impl InputFormat {
    /// Pick the format from the file extension; `.jsonl` and `.ndjson` are line-delimited
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("jsonl") | Some("ndjson") => InputFormat::Jsonl,
            _ => InputFormat::Json,
        }
    }
}

/// Requests read from one source, with the number of lines that were dropped
#[derive(Debug, Clone, Default)]
pub struct RequestBatch {
    pub requests: Vec<RiskRequest>,
    pub skipped: usize,
}

/// Reads risk requests from a file
pub struct RequestReader {
    file_path: PathBuf,
    format: InputFormat,
}

impl RequestReader {
    pub fn new(file_path: PathBuf) -> Self {
        let format = InputFormat::from_path(&file_path);
        RequestReader { file_path, format }
    }

    /// Read every request in the file
    pub fn read_requests(&self) -> Result<RequestBatch, InputError> {
        if !self.file_path.exists() {
            return Err(InputError::FileNotFound(self.file_path.display().to_string()));
        }

        let file = File::open(&self.file_path)?;
        let batch = match self.format {
            InputFormat::Json => Self::parse_json(file)?,
            InputFormat::Jsonl => Self::parse_lines(BufReader::new(file))?,
        };

        log::info!(
            "Read {} request(s) from {:?} ({} skipped)",
            batch.requests.len(),
            self.file_path,
            batch.skipped
        );
        Ok(batch)
    }

    /// Parse a JSON document holding one request or an array of them
    pub fn parse_json<R: Read>(reader: R) -> Result<RequestBatch, InputError> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        let requests = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<RiskRequest>, _>>()?,
            other => vec![serde_json::from_value(other)?],
        };

        if requests.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(RequestBatch {
            requests,
            skipped: 0,
        })
    }

    /// Parse line-delimited requests, skipping blank and malformed lines
    pub fn parse_lines<R: BufRead>(reader: R) -> Result<RequestBatch, InputError> {
        let mut batch = RequestBatch::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<RiskRequest>(trimmed) {
                Ok(request) => batch.requests.push(request),
                Err(e) => {
                    log::warn!("Skipping line {}: {}", index + 1, e);
                    batch.skipped += 1;
                }
            }
        }

        if batch.requests.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(batch)
    }
}
