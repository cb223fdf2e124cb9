use crate::alerting::{HighRiskNotice, HIGH_RISK_EVENT};
use crate::report::RiskReport;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Output handler for risk reports and high-risk notices
pub struct OutputHandler {
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Console,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "jsonl" => OutputFormat::Jsonl,
            "console" => OutputFormat::Console,
            _ => OutputFormat::Jsonl, // Default
        }
    }
}

#[derive(Serialize)]
struct NoticeEnvelope<'a> {
    event: &'static str,
    #[serde(flatten)]
    notice: &'a HighRiskNotice,
}

impl OutputHandler {
    /// Create a handler that appends to `file_path`, or writes to stdout when no path is given
    pub fn new(format: OutputFormat, file_path: Option<PathBuf>) -> Result<Self, OutputError> {
        let writer: Box<dyn Write + Send> = match file_path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(OutputHandler { format, writer })
    }

    /// Create a handler over an arbitrary writer
    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write + Send>) -> Self {
        OutputHandler { format, writer }
    }

    /// Write a risk report
    pub fn write_report(&mut self, report: &RiskReport) -> Result<(), OutputError> {
        let output = match self.format {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
            OutputFormat::Jsonl => format!("{}\n", serde_json::to_string(report)?),
            OutputFormat::Console => {
                let mut line = format!("{}\n", report.summary());
                for rec in &report.prediction.recommendations {
                    line.push_str(&format!(
                        "    {:?} {:?}: {}\n",
                        rec.priority, rec.action, rec.description
                    ));
                }
                line
            }
        };
        self.write_output(&output)
    }

    /// Write a high-risk notice
    pub fn write_notice(&mut self, notice: &HighRiskNotice) -> Result<(), OutputError> {
        let envelope = NoticeEnvelope {
            event: HIGH_RISK_EVENT,
            notice,
        };
        let output = match self.format {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&envelope)?),
            OutputFormat::Jsonl => format!("{}\n", serde_json::to_string(&envelope)?),
            OutputFormat::Console => {
                let location = notice
                    .location
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown location".to_string());
                format!(
                    "!! {} {} at {} - p={:.3} ({})\n",
                    HIGH_RISK_EVENT, notice.hazard_type, location, notice.probability, notice.risk_level
                )
            }
        };
        self.write_output(&output)
    }

    fn write_output(&mut self, data: &str) -> Result<(), OutputError> {
        self.writer.write_all(data.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}
