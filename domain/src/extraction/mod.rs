//! Structured-response extraction.
//!
//! Generation services are asked for JSON but routinely wrap it in prose or
//! markdown, or ignore the instruction entirely. [`extract`] runs an ordered
//! chain of strict parsers over the raw text; the first one to produce a
//! [`StructuredPayload`] wins:
//!
//! | Step | Parser | Candidate |
//! |------|--------|-----------|
//! | 1 | [`parse_direct`] | the whole text |
//! | 2 | [`parse_fenced`] | each ```` ``` ```` / ```` ```json ```` block |
//!
//! No parser repairs or coerces malformed JSON. When every step misses, the
//! outcome is an [`ExtractionFailure`] that still yields a valid
//! [`ConceptAnalysis`] via [`analysis_from_response`].

mod fence;

pub use fence::{FencedBlock, fenced_blocks};

use crate::analysis::entities::{ConceptAnalysis, StructuredPayload};
use thiserror::Error;
use tracing::debug;

/// Outcome of a single parser in the chain
#[derive(Debug, Clone, PartialEq)]
pub enum ParseAttempt {
    Parsed(StructuredPayload),
    /// A candidate region was found but did not parse
    Malformed,
    /// Nothing this parser recognizes as a candidate
    NotFound,
}

/// Why no payload could be extracted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailure {
    #[error("JSON parsing failed")]
    JsonParsingFailed,

    #[error("No JSON found in response")]
    NoJsonFound,
}

/// Final outcome of the parser chain
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Structured(StructuredPayload),
    Failed(ExtractionFailure),
}

impl Extraction {
    pub fn payload(&self) -> Option<&StructuredPayload> {
        match self {
            Extraction::Structured(payload) => Some(payload),
            Extraction::Failed(_) => None,
        }
    }
}

type Parser = fn(&str) -> ParseAttempt;

const PARSER_CHAIN: [(&str, Parser); 2] = [("direct", parse_direct), ("fenced", parse_fenced)];

/// Extract a structured payload from raw model output.
pub fn extract(raw: &str) -> Extraction {
    let mut saw_malformed = false;

    for (name, parser) in PARSER_CHAIN {
        match parser(raw) {
            ParseAttempt::Parsed(payload) => {
                debug!("Extracted structured payload via {} parser", name);
                return Extraction::Structured(payload);
            }
            ParseAttempt::Malformed => {
                debug!("{} parser found a candidate that failed to parse", name);
                saw_malformed = true;
            }
            ParseAttempt::NotFound => {}
        }
    }

    Extraction::Failed(if saw_malformed {
        ExtractionFailure::JsonParsingFailed
    } else {
        ExtractionFailure::NoJsonFound
    })
}

/// Step 1: the whole text is the document.
///
/// Unwrapped text has no delimited candidate region, so a failed parse here
/// is a miss rather than a malformed candidate.
pub fn parse_direct(raw: &str) -> ParseAttempt {
    match parse_payload(raw) {
        Some(payload) => ParseAttempt::Parsed(payload),
        None => ParseAttempt::NotFound,
    }
}

/// Step 2: the first fenced block labeled `json` (or unlabeled) that parses.
pub fn parse_fenced(raw: &str) -> ParseAttempt {
    let mut found_candidate = false;

    for block in fenced_blocks(raw)
        .into_iter()
        .filter(|block| block.is_json_candidate())
    {
        found_candidate = true;
        if let Some(payload) = parse_payload(block.body) {
            return ParseAttempt::Parsed(payload);
        }
    }

    if found_candidate {
        ParseAttempt::Malformed
    } else {
        ParseAttempt::NotFound
    }
}

/// Strictly parse one candidate as a payload document.
///
/// The document must be a JSON object whose known fields have the expected
/// types, and every relationship strength must lie in `[0, 1]`.
pub fn parse_payload(text: &str) -> Option<StructuredPayload> {
    let value: serde_json::Value = serde_json::from_str(text.trim()).ok()?;
    if !value.is_object() {
        return None;
    }
    let payload: StructuredPayload = serde_json::from_value(value).ok()?;
    if payload.first_invalid_strength().is_some() {
        return None;
    }
    Some(payload)
}

/// Turn a backend's raw text into its [`ConceptAnalysis`].
///
/// Never fails: extraction problems are recorded in `error` with the raw
/// text preserved in `raw_response`.
pub fn analysis_from_response(model_name: &str, raw: &str) -> ConceptAnalysis {
    match extract(raw) {
        Extraction::Structured(payload) => ConceptAnalysis::from_payload(model_name, payload, None),
        Extraction::Failed(failure) => {
            ConceptAnalysis::failure(model_name, failure.to_string(), Some(raw.to_string()))
        }
    }
}
