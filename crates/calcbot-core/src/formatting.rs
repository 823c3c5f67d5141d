use chrono::{DateTime, Local, Utc};

use crate::notes::NoteRow;

const NOTE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cut `s` to `max_len` characters, marking the cut with `...`.
pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out = s.chars().take(max_len.saturating_sub(3)).collect::<String>();
    out.push_str("...");
    out
}

/// Local wall-clock time a note was written.
pub fn note_time(created_at: DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format(NOTE_TIME_FORMAT)
        .to_string()
}

pub fn note_header(created_at: DateTime<Utc>) -> String {
    format!("🗒 {}", note_time(created_at))
}

pub fn format_note_list(rows: &[NoteRow]) -> String {
    let mut out = format!("Your notes (latest {}):\n", rows.len());
    for row in rows {
        out.push_str(&format!("\n#{}  {}", row.id.0, note_time(row.created_at)));
    }
    out.push_str("\n\nOpen one with /read <id>.");
    out
}
