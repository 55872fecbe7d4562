//! Line sniffing for embedded metric payloads.
//!
//! The runtime logs snapshots through tracing, which renders the payload
//! field as `json={...}` somewhere in the line; some capture setups strip
//! the log framing and leave bare JSON objects instead. Both shapes are
//! recognized here, behind a single function, so a new line format only
//! ever touches this module.

use serde_json::Value;

/// Marker preceding an embedded metric payload in tracing output.
const JSON_MARKER: &str = "json=";

/// Extract a JSON object payload from one line of log output.
///
/// Two formats are recognized: everything after the first `json=` marker,
/// and a line that (after trimming) is itself a bare JSON object. Anything
/// else (prose log lines, broken or non-object JSON) yields `None`. The
/// check is purely syntactic; whether the object is a usable record is the
/// loader's concern.
pub fn parse_line(line: &str) -> Option<Value> {
    match line.find(JSON_MARKER) {
        Some(idx) => {
            let payload = line[idx + JSON_MARKER.len()..].trim();
            if payload.is_empty() {
                return None;
            }
            parse_object(payload)
        }
        None => {
            let trimmed = line.trim();
            if trimmed.starts_with('{') && trimmed.ends_with('}') {
                parse_object(trimmed)
            } else {
                None
            }
        }
    }
}

/// Parse a candidate payload, keeping only JSON objects.
fn parse_object(payload: &str) -> Option<Value> {
    serde_json::from_str::<Value>(payload)
        .ok()
        .filter(Value::is_object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_payload_is_extracted() {
        let line = r#"json={"label":"a","base_events":100}"#;
        let value = parse_line(line).unwrap();
        assert_eq!(value["label"], "a");
        assert_eq!(value["base_events"], 100);
    }

    #[test]
    fn tracing_formatted_line_is_extracted() {
        let line = concat!(
            "2025-07-03T10:15:42.183Z  INFO mfg_demo: epoch complete epoch=41 ",
            r#"json={"label":"mfg_epoch","base_events":1200,"elapsed_ms":184.2}"#,
        );
        let value = parse_line(line).unwrap();
        assert_eq!(value["label"], "mfg_epoch");
        assert_eq!(value["elapsed_ms"], 184.2);
    }

    #[test]
    fn marker_takes_first_occurrence() {
        // A stray marker earlier in the line wins, and its payload is junk.
        let line = r#"msg=json= json={"label":"a"}"#;
        assert!(parse_line(line).is_none());
    }

    #[test]
    fn empty_payload_after_marker() {
        assert!(parse_line("json=").is_none());
        assert!(parse_line("json=   ").is_none());
    }

    #[test]
    fn broken_json_after_marker() {
        assert!(parse_line(r#"json={"label":"a""#).is_none());
    }

    #[test]
    fn trailing_garbage_is_not_a_record() {
        assert!(parse_line(r#"json={"label":"a"} and then some"#).is_none());
    }

    #[test]
    fn non_object_payload_is_not_a_record() {
        assert!(parse_line("json=123").is_none());
        assert!(parse_line("json=[1,2,3]").is_none());
        assert!(parse_line(r#"json="quoted""#).is_none());
    }

    #[test]
    fn bare_object_line() {
        let value = parse_line(r#"{"label":"b","scenario_created":5}"#).unwrap();
        assert_eq!(value["label"], "b");
    }

    #[test]
    fn bare_object_with_surrounding_whitespace() {
        let value = parse_line("  {\"label\":\"b\"}  \n").unwrap();
        assert_eq!(value["label"], "b");
    }

    #[test]
    fn bare_broken_object_is_skipped() {
        assert!(parse_line(r#"{"label": }"#).is_none());
    }

    #[test]
    fn plain_log_line_is_skipped() {
        assert!(parse_line("not json at all").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("2025-07-03T10:15:42Z  INFO starting timely runtime").is_none());
    }
}
