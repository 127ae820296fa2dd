//! Fenced code block scanning.

/// A fenced block found in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Info string after the opening fence, trimmed (e.g. `json`)
    pub info: &'a str,
    pub body: &'a str,
}

impl FencedBlock<'_> {
    /// Unlabeled blocks and blocks labeled `json` may hold the payload.
    pub fn is_json_candidate(&self) -> bool {
        self.info.is_empty() || self.info.eq_ignore_ascii_case("json")
    }
}

const FENCE: &str = "```";

/// Collect every complete fenced block in `text`, in order of appearance.
///
/// Fences are line-level: an opening fence is a line starting with ```` ``` ````
/// (its remainder is the info string) and a closing fence is a line holding
/// only ```` ``` ````. Backticks inside a line never open or close a block.
/// An opening fence with no closing fence is ignored.
pub fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut open: Option<(&str, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let trimmed = line.trim();

        match open {
            None => {
                if let Some(info) = trimmed.strip_prefix(FENCE) {
                    open = Some((info.trim(), offset));
                }
            }
            Some((info, body_start)) => {
                if trimmed == FENCE {
                    blocks.push(FencedBlock {
                        info,
                        body: &text[body_start..line_start],
                    });
                    open = None;
                }
            }
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_json_block() {
        let blocks = fenced_blocks("Here:\n```json\n{\"a\": 1}\n```\nDone");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].info, "json");
        assert_eq!(blocks[0].body, "{\"a\": 1}\n");
        assert!(blocks[0].is_json_candidate());
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let text = "```python\nprint(1)\n```\ntext\n```\n{}\n```";
        let blocks = fenced_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].info, "python");
        assert!(!blocks[0].is_json_candidate());
        assert_eq!(blocks[1].info, "");
        assert!(blocks[1].is_json_candidate());
    }

    #[test]
    fn test_unclosed_fence_is_ignored() {
        assert!(fenced_blocks("```json\n{\"a\": 1}\n").is_empty());
    }

    #[test]
    fn test_inline_backticks_do_not_close_block() {
        let text = "```json\n{\"note\": \"use ``` here\"}\n```\n";
        let blocks = fenced_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "{\"note\": \"use ``` here\"}\n");
    }

    #[test]
    fn test_inline_backticks_do_not_open_block() {
        let blocks = fenced_blocks("Wrap code in ``` marks.\n```\n{}\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].info, "");
        assert_eq!(blocks[0].body, "{}\n");
    }

    #[test]
    fn test_indented_closing_fence() {
        let blocks = fenced_blocks("  ```json\n  {}\n  ```  \n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "  {}\n");
    }

    #[test]
    fn test_crlf_info_string() {
        let blocks = fenced_blocks("```JSON\r\n{}\r\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].info, "JSON");
        assert!(blocks[0].is_json_candidate());
    }
}
