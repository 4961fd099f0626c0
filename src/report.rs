//! Narrative report post-processing
//!
//! The daily analysis Markdown contains the prompt and raw input JSON ahead
//! of the model's reply. Only the reply is shown on the page: the text is
//! cut to start at the first numbered `###` section, title brackets are
//! stripped from headings, and the date stamp is pulled for the panel title.

use chrono::NaiveDate;

/// Heading that introduces the model reply block
const REPLY_HEADING: &str = "## Gemini 回复";
/// Date stamp prefix inside the reply body
const DATE_STAMP: &str = "今天是";

/// Byte offset of the first numbered section heading (`### 1.`), if any
fn numbered_section_start(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("###") {
            if rest.trim_start().starts_with("1.") {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len();
    }
    None
}

/// Cut the analysis text down to the model's reply
///
/// Prefers the first numbered section; failing that, skips the preamble
/// under the reply heading. Text without either marker passes through
/// unchanged.
pub fn extract_model_reply(text: &str) -> String {
    if let Some(idx) = numbered_section_start(text) {
        return text[idx..].trim().to_string();
    }

    if let Some(idx) = text.find(REPLY_HEADING) {
        let after = &text[idx + REPLY_HEADING.len()..];
        if let Some(section) = numbered_section_start(after) {
            return after[section..].trim().to_string();
        }
        return after.trim().to_string();
    }

    text.to_string()
}

/// Remove `《》` title brackets inside heading lines only
pub fn strip_heading_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with("##") {
            out.push_str(&line.replace(['《', '》'], ""));
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Pull the `YYYY-MM-DD` date stamp from the reply body, validated as a
/// real calendar date
pub fn report_date(text: &str) -> Option<String> {
    let idx = text.find(DATE_STAMP)?;
    let candidate: String = text[idx + DATE_STAMP.len()..].chars().take(10).collect();
    NaiveDate::parse_from_str(&candidate, "%Y-%m-%d").ok()?;
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# prompt\n\
input payload here\n\
## Gemini 回复\n\
some preamble\n\
### 1. 《市场概述》\n\
今天是2024-03-05，market text\n\
### 2. 风险\n\
more text\n";

    #[test]
    fn test_extract_starts_at_numbered_section() {
        let reply = extract_model_reply(SAMPLE);
        assert!(reply.starts_with("### 1."));
        assert!(!reply.contains("preamble"));
        assert!(reply.contains("### 2."));
    }

    #[test]
    fn test_extract_falls_back_to_reply_heading() {
        let text = "prompt\n## Gemini 回复\nplain reply without sections\n";
        let reply = extract_model_reply(text);
        assert_eq!(reply, "plain reply without sections");
    }

    #[test]
    fn test_extract_without_markers_passes_through() {
        let text = "just a plain report";
        assert_eq!(extract_model_reply(text), text);
    }

    #[test]
    fn test_strip_heading_brackets_heading_lines_only() {
        let text = "### 《市场概述》\n正文提到《以太坊》不变\n";
        let out = strip_heading_brackets(text);
        assert!(out.starts_with("### 市场概述"));
        assert!(out.contains("《以太坊》"));
    }

    #[test]
    fn test_report_date_extraction() {
        assert_eq!(report_date(SAMPLE).as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn test_report_date_rejects_invalid() {
        assert!(report_date("今天是2024-13-99，nonsense").is_none());
        assert!(report_date("no stamp here").is_none());
    }
}
