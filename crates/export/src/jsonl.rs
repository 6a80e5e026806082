//! JSONL serialization for annotation records.

use labar_core::annotation::AnnotationRecord;

use crate::ExportError;

/// File name the annotation set is uploaded under.
pub const DATASET_FILE_NAME: &str = "annotations.jsonl";

/// Serialize records as JSON Lines: one record per line, newline-terminated.
pub fn to_jsonl(records: &[AnnotationRecord]) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.push(b'\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labar_core::annotation::AnnotationContent;

    fn record(description: &str) -> AnnotationRecord {
        AnnotationRecord {
            frame: 10,
            time_seconds: 0.5,
            video_url: "https://example.com/run.mp4".to_string(),
            content: AnnotationContent::NaturalLanguage {
                description: description.to_string(),
            },
        }
    }

    #[test]
    fn empty_set_serializes_to_nothing() {
        assert!(to_jsonl(&[]).unwrap().is_empty());
    }

    #[test]
    fn one_line_per_record() {
        let bytes = to_jsonl(&[record("first"), record("second")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.trim_end().split('\n').collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["description"], "first");
        assert_eq!(first["mode"], "natural_language");
    }

    #[test]
    fn output_is_newline_terminated() {
        let bytes = to_jsonl(&[record("only")]).unwrap();
        assert_eq!(bytes.last(), Some(&b'\n'));
    }
}
