//! Single-table CSV export of all participant records.
//!
//! One row per UGC entry (`record_type = ugc`) followed by one row per time
//! record (`record_type = time_record`) for each participant. For time
//! records the `timestamp` column holds the exit time.

use std::path::{Path, PathBuf};

use ugclab_shared::ParticipantData;

use crate::infrastructure::json_store::read_records;
use crate::infrastructure::ports::StoreError;

pub const CSV_HEADER: [&str; 7] = [
    "participant_id",
    "record_type",
    "timestamp",
    "duration_ms",
    "mode",
    "artifact_id",
    "content",
];

/// Renders every record as CSV, rows separated by `\n`.
pub fn render_csv(participants: &[ParticipantData]) -> String {
    let mut rows = vec![CSV_HEADER.join(",")];

    for participant in participants {
        let participant_id = escape_field(participant.participant_id.as_str());

        for ugc in &participant.ugc_contents {
            rows.push(
                [
                    participant_id.clone(),
                    "ugc".to_string(),
                    ugc.timestamp.to_string(),
                    String::new(),
                    escape_field(&ugc.mode),
                    escape_field(ugc.artifact_id.as_str()),
                    escape_field(&ugc.content),
                ]
                .join(","),
            );
        }

        for record in &participant.time_records {
            rows.push(
                [
                    participant_id.clone(),
                    "time_record".to_string(),
                    record.exit_time.to_string(),
                    record.duration_ms.to_string(),
                    record.mode.as_deref().map(escape_field).unwrap_or_default(),
                    record
                        .artifact_id
                        .as_ref()
                        .map(|a| escape_field(a.as_str()))
                        .unwrap_or_default(),
                    String::new(),
                ]
                .join(","),
            );
        }
    }

    rows.join("\n")
}

/// Quotes a field containing a delimiter, quote or line break, doubling
/// embedded quotes.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Converts a participants JSON file to `<name>.csv` in `output_dir`, or
/// next to the input when `output_dir` is `None`.
pub async fn export_file(json_path: &Path, output_dir: Option<&Path>) -> Result<PathBuf, StoreError> {
    let participants = read_records(json_path).await?;

    let stem = json_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "participants".to_string());
    let out_dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| json_path.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let output_path = out_dir.join(format!("{stem}.csv"));

    tokio::fs::write(&output_path, render_csv(&participants))
        .await
        .map_err(|e| StoreError::io("write csv", e))?;

    tracing::info!(
        input = %json_path.display(),
        output = %output_path.display(),
        participants = participants.len(),
        "Exported CSV"
    );
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugclab_domain::ParticipantId;
    use ugclab_shared::{TimeRecord, UgcContent};

    fn participant_with_comment(content: &str) -> ParticipantData {
        let mut data = ParticipantData::new(ParticipantId::new("P1"));
        data.ugc_contents.push(UgcContent {
            content: content.to_string(),
            artifact_id: "ding".into(),
            mode: "crowd_chat".to_string(),
            timestamp: 1_700_000_000_000,
        });
        data
    }

    #[test]
    fn header_comes_first() {
        let csv = render_csv(&[]);
        assert_eq!(
            csv,
            "participant_id,record_type,timestamp,duration_ms,mode,artifact_id,content"
        );
    }

    #[test]
    fn comma_in_content_is_quoted() {
        let csv = render_csv(&[participant_with_comment("big, \"shiny\" pot")]);
        let row = csv.lines().nth(1).expect("ugc row");

        assert_eq!(
            row,
            "P1,ugc,1700000000000,,crowd_chat,ding,\"big, \"\"shiny\"\" pot\""
        );
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn time_records_use_exit_time_and_blank_optionals() {
        let mut data = ParticipantData::new(ParticipantId::new("P2"));
        data.time_records.push(TimeRecord {
            mode: None,
            artifact_id: None,
            exit_time: 42_000,
            duration_ms: 1_234,
        });

        let csv = render_csv(&[data]);
        assert_eq!(csv.lines().nth(1), Some("P2,time_record,42000,1234,,,"));
    }

    #[test]
    fn ugc_rows_precede_time_rows_per_participant() {
        let mut data = participant_with_comment("nice");
        data.time_records.push(TimeRecord {
            mode: Some("follow_me".to_string()),
            artifact_id: Some("ding".into()),
            exit_time: 5,
            duration_ms: 5,
        });
        let csv = render_csv(&[data]);
        let kinds: Vec<_> = csv
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').nth(1))
            .collect();
        assert_eq!(kinds, vec!["ugc", "time_record"]);
    }

    #[tokio::test]
    async fn export_file_writes_next_to_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let json_path = dir.path().join("participants.json");
        let json = serde_json::to_string(&vec![participant_with_comment("hello")]).expect("json");
        std::fs::write(&json_path, json).expect("write");

        let output = export_file(&json_path, None).await.expect("export");

        assert_eq!(output, dir.path().join("participants.csv"));
        let csv = std::fs::read_to_string(output).expect("read");
        assert_eq!(csv.lines().count(), 2);
    }

    #[tokio::test]
    async fn export_file_reports_missing_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = export_file(&dir.path().join("missing.json"), None).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
