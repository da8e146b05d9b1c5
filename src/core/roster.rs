use crate::core::{AttendeeRecord, Storage};
use crate::utils::error::{MatchmakerError, Result};
use std::fmt::Write;

pub const ROSTER_HEADER: &str = "WORKSHOP ATTENDEES:";

pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "email", "interests", "looking_to_connect_with"];

/// Reads the roster file through `storage` and parses every row.
pub async fn load_roster<S: Storage>(storage: &S, path: &str) -> Result<Vec<AttendeeRecord>> {
    tracing::debug!("Reading roster from: {}", path);
    let data = storage.read_file(path).await?;
    let roster = parse_roster(&data)?;
    tracing::info!("📋 Loaded {} attendees from {}", roster.len(), path);
    Ok(roster)
}

/// Parses CSV bytes into attendee records, in file order.
///
/// The header must name every column in [`REQUIRED_COLUMNS`]; column order is
/// free and extra columns are ignored. A row missing one of the required
/// columns fails the whole load. Field values are kept verbatim.
pub fn parse_roster(data: &[u8]) -> Result<Vec<AttendeeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(MatchmakerError::RosterError {
            line: 1,
            message: format!("header is missing column(s): {}", missing.join(", ")),
        });
    }

    let mut roster = Vec::new();
    for (index, row) in reader.deserialize::<AttendeeRecord>().enumerate() {
        let record = row.map_err(|e| row_error(e, index))?;
        roster.push(record);
    }

    Ok(roster)
}

fn row_error(e: csv::Error, index: usize) -> MatchmakerError {
    match e.kind() {
        csv::ErrorKind::Deserialize { pos, err } => MatchmakerError::RosterError {
            // header is line 1
            line: pos
                .as_ref()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2),
            message: err.to_string(),
        },
        _ => MatchmakerError::CsvError(e),
    }
}

/// Renders the roster as the text block embedded in the prompt.
pub fn render_roster(roster: &[AttendeeRecord]) -> String {
    let mut text = format!("{}\n\n", ROSTER_HEADER);
    for attendee in roster {
        // writing into a String cannot fail
        let _ = write!(
            text,
            "- {} ({})\n  Interests: {}\n  Looking to connect with: {}\n\n",
            attendee.name, attendee.email, attendee.interests, attendee.looking_to_connect_with
        );
    }
    text
}
