//! Reads the JSON analysis request from a file or stdin.

use concept_domain::{AnalysisRequest, QaItem};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Malformed request payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse a request body: an item array or `{"questions": [...]}`.
pub fn parse_request(text: &str) -> Result<Vec<QaItem>, InputError> {
    let request: AnalysisRequest = serde_json::from_str(text)?;
    Ok(request.into_items())
}

/// Read and parse the request from `path`, or from stdin when `None`.
pub fn read_request(path: Option<&Path>) -> Result<Vec<QaItem>, InputError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| InputError::File {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(InputError::Stdin)?;
            buffer
        }
    };
    parse_request(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let items = parse_request(
            r#"[
                {"id": "q1", "question": "Favourite tool?", "answer": "vim", "category": "tools"},
                {"id": "q2", "question": "Why?", "answer": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, "tools");
        assert_eq!(items[1].answer, None);
        assert_eq!(items[1].category, "");
    }

    #[test]
    fn test_parse_envelope() {
        let items =
            parse_request(r#"{"questions": [{"id": "q1", "question": "Q", "answer": "A"}]}"#)
                .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "q1");
    }

    #[test]
    fn test_malformed_payload() {
        let error = parse_request(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(error, InputError::Malformed(_)));
        assert!(error.to_string().starts_with("Malformed request payload"));
    }

    #[test]
    fn test_missing_file() {
        let error = read_request(Some(Path::new("/nonexistent/answers.json"))).unwrap_err();
        assert!(matches!(error, InputError::File { .. }));
        assert!(error.to_string().contains("/nonexistent/answers.json"));
    }
}
