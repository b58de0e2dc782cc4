//! Subscriber setup plus one-JSON-line-per-evaluation audit records.

use crate::error::PriorityError;
use crate::scoring::{PriorityRequest, ScoreBreakdown};
use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
pub struct LogEvent<'a> {
    pub ts: String,
    pub level: &'a str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> LogEvent<'a> {
    pub fn scored(breakdown: &'a ScoreBreakdown) -> Self {
        Self {
            ts: Utc::now().to_rfc3339(),
            level: "info",
            message: "request scored",
            title: breakdown.title.as_deref(),
            label: Some(breakdown.label.as_str()),
            total: Some(breakdown.total),
            error: None,
        }
    }

    pub fn rejected(request: &'a PriorityRequest, err: &PriorityError) -> Self {
        Self {
            ts: Utc::now().to_rfc3339(),
            level: "warn",
            message: "request rejected",
            title: request.title.as_deref(),
            label: None,
            total: None,
            error: Some(err.to_string()),
        }
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber on stderr; `RUST_LOG` overrides `default_level`.
    /// Returns false if a subscriber was already installed.
    pub fn init(json: bool, default_level: &str) -> bool {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt)
                .try_init()
                .is_ok()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .is_ok()
        }
    }

    /// Emit a single ndjson line without going through tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(w, "{}", line);
        }
    }
}
