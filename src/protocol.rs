//! Landmark stream input and feedback output formats.
//!
//! Input is JSON Lines: one line per video frame, either `null` (pose
//! estimation produced nothing for that frame) or an array of 33
//! `{"x", "y", "visibility"}` objects in MediaPipe order.
//! Output is a JSON array of feedback records.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::feedback::FeedbackRecord;
use crate::pose::Frame;

/// Parse one JSON line. Blank lines yield `Ok(None)` from the outer option.
pub fn parse_line(line: &str) -> Result<Option<Option<Frame>>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let frame: Option<Frame> = serde_json::from_str(line)?;
    Ok(Some(frame))
}

/// Iterate frames from a JSON Lines reader.
pub fn read_frames<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Option<Frame>>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line_no = i + 1;
            let parsed = line
                .with_context(|| format!("Failed to read line {}", line_no))
                .and_then(|l| {
                    parse_line(&l).with_context(|| format!("Invalid frame on line {}", line_no))
                });
            match parsed {
                Ok(Some(frame)) => Some(Ok(frame)),
                Ok(None) => None,
                Err(e) => Some(Err(e)),
            }
        })
}

/// Write feedback as a pretty-printed JSON array.
pub fn write_feedback<W: Write>(mut writer: W, records: &[FeedbackRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::BodyPart;
    use std::io::Cursor;

    fn frame_line(x: f64) -> String {
        let lm = format!(r#"{{"x":{},"y":0.5,"visibility":0.9}}"#, x);
        format!("[{}]", vec![lm; BodyPart::COUNT].join(","))
    }

    #[test]
    fn test_read_frames() {
        let input = format!("{}\nnull\n\n{}\n", frame_line(0.1), frame_line(0.2));
        let frames: Vec<_> = read_frames(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].as_ref().unwrap().get(BodyPart::Nose).x, 0.1);
        assert!(frames[1].is_none());
        assert_eq!(frames[2].as_ref().unwrap().get(BodyPart::RightFootIndex).visibility, 0.9);
    }

    #[test]
    fn test_wrong_landmark_count_reports_line() {
        let input = format!("{}\n[{{\"x\":0.1,\"y\":0.2,\"visibility\":0.5}}]\n", frame_line(0.1));
        let result: Result<Vec<_>> = read_frames(Cursor::new(input)).collect();
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
        assert!(format!("{:#}", err).contains("expected 33"));
    }

    #[test]
    fn test_missing_visibility_rejected() {
        let lm = r#"{"x":0.1,"y":0.2}"#;
        let input = format!("[{}]\n", vec![lm; BodyPart::COUNT].join(","));
        let err = read_frames(Cursor::new(input))
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("line 1"));
        assert!(format!("{:#}", err).contains("visibility"));
    }

    #[test]
    fn test_write_feedback() {
        let records = vec![FeedbackRecord {
            ex_number: 1,
            class: "Half Squat".to_string(),
            correction: "Insufficient squatting depth".to_string(),
            confidence: Some(55.0),
        }];
        let mut out = Vec::new();
        write_feedback(&mut out, &records).unwrap();
        let parsed: Vec<FeedbackRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, records);
    }
}
