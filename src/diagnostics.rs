//! Per-fetch diagnostic log.
//!
//! Pure data accumulated while the fetch ladder runs and handed back next
//! to the routes. Rendering it is up to the caller; nothing in the fetcher
//! reads it back.

use std::fmt;

use crate::error::FetchError;
use crate::osrm::GeometryEncoding;
use crate::route::Profile;
use crate::traits::RawResponse;

/// Top-level JSON keys kept in a snippet.
const SNIPPET_MAX_KEYS: usize = 8;

/// Characters of a non-JSON body kept in a snippet.
const SNIPPET_MAX_CHARS: usize = 800;

/// Short excerpt of what came back from one request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSnippet {
    Json { status: u16, keys: Vec<String> },
    Text { status: u16, head: String },
    Error(String),
}

impl ResponseSnippet {
    /// Summarizes `response`, given its body if that parsed as JSON.
    pub fn capture(response: &RawResponse, json: Option<&serde_json::Value>) -> Self {
        match json {
            Some(serde_json::Value::Object(map)) => ResponseSnippet::Json {
                status: response.status,
                keys: map.keys().take(SNIPPET_MAX_KEYS).cloned().collect(),
            },
            _ => ResponseSnippet::Text {
                status: response.status,
                head: response.body.chars().take(SNIPPET_MAX_CHARS).collect(),
            },
        }
    }
}

impl fmt::Display for ResponseSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSnippet::Json { status, keys } => {
                write!(f, "status {status}, json keys [{}]", keys.join(", "))
            }
            ResponseSnippet::Text { status, head } => write!(f, "status {status}, body: {head}"),
            ResponseSnippet::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// One request issued by the fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub pass: &'static str,
    pub profile: Profile,
    pub encoding: GeometryEncoding,
    pub url: String,
    pub snippet: ResponseSnippet,
    /// Number of usable routes, or why there were none.
    pub outcome: Result<usize, FetchError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEntry {
    Note(String),
    Request(RequestRecord),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticLog {
    entries: Vec<DiagnosticEntry>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.entries.push(DiagnosticEntry::Note(message.into()));
    }

    pub fn record(&mut self, record: RequestRecord) {
        self.entries.push(DiagnosticEntry::Request(record));
    }

    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    pub fn requests(&self) -> impl Iterator<Item = &RequestRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            DiagnosticEntry::Request(record) => Some(record),
            DiagnosticEntry::Note(_) => None,
        })
    }

    /// Every URL requested, in order.
    pub fn urls(&self) -> Vec<&str> {
        self.requests().map(|record| record.url.as_str()).collect()
    }

    /// Names of the passes that issued at least one request, in order.
    pub fn passes_attempted(&self) -> Vec<&'static str> {
        let mut passes: Vec<&'static str> = Vec::new();
        for record in self.requests() {
            if passes.last() != Some(&record.pass) {
                passes.push(record.pass);
            }
        }
        passes
    }

    /// Plain-text rendering, one line per entry.
    pub fn render(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match entry {
                DiagnosticEntry::Note(message) => message.clone(),
                DiagnosticEntry::Request(record) => {
                    let outcome = match &record.outcome {
                        Ok(count) => format!("{count} route(s)"),
                        Err(err) => err.to_string(),
                    };
                    format!(
                        "[{}] PROFILE: {} ({}) URL: {} | {} | {}",
                        record.pass,
                        record.profile,
                        record.encoding.as_str(),
                        record.url,
                        record.snippet,
                        outcome
                    )
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
