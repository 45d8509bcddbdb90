//! Writing results to the host
//!
//! Results are either written as plain text for a terminal, or as one JSON document per line for
//! a launcher that reads them programmatically.
use std::io::Write;

use serde::Serialize;

use crate::Error;
use crate::result::ResultEntry;

/// How results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable text.
    Text,
    /// One JSON object per query, on a single line.
    Json,
}

/// A line of JSON output.
#[derive(Serialize)]
struct Response<'a> {
    query: &'a str,
    results: &'a [ResultEntry],
}

/// Writes the results of `query` to `writer` in the given `format`.
///
/// # Errors
///
/// Returns [`Error::WriteResults`] if writing fails, and [`Error::EncodeResults`] if the results
/// can't be encoded.
pub fn write_results(
    mut writer: impl Write,
    format: Format,
    query: &str,
    results: &[ResultEntry],
) -> Result<(), Error> {
    match format {
        Format::Text => write_text(&mut writer, results).map_err(Error::WriteResults)?,
        Format::Json => {
            serde_json::to_writer(&mut writer, &Response { query, results })?;
            writeln!(writer).map_err(Error::WriteResults)?;
        }
    }

    writer.flush().map_err(Error::WriteResults)
}

fn write_text(writer: &mut impl Write, results: &[ResultEntry]) -> std::io::Result<()> {
    for entry in results {
        writeln!(writer, "{}", entry.title)?;

        for line in entry.subtitle.lines() {
            writeln!(writer, "    {line}")?;
        }

        writeln!(writer, "    → {}", entry.primary_action)?;

        if let Some(action) = &entry.secondary_action {
            writeln!(writer, "    ⇧ {action}")?;
        }

        writeln!(writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Action;

    fn entry() -> ResultEntry {
        ResultEntry {
            title: "casa [f.]".to_string(),
            subtitle: "Edificio\npara habitar.".to_string(),
            primary_action: Action::CopyText("Edificio para habitar.".to_string()),
            secondary_action: Some(Action::OpenLink("https://dle.rae.es/casa#a".to_string())),
        }
    }

    #[test]
    fn writes_text() {
        let mut output = Vec::new();
        write_results(&mut output, Format::Text, "casa", &[entry()]).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "casa [f.]\n    Edificio\n    para habitar.\n    → copy \"Edificio para habitar.\"\n    ⇧ open https://dle.rae.es/casa#a\n\n"
        );
    }

    #[test]
    fn writes_single_json_line() {
        let mut output = Vec::new();
        write_results(&mut output, Format::Json, "casa", &[entry()]).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["query"], "casa");
        assert_eq!(value["results"][0]["title"], "casa [f.]");
        assert_eq!(value["results"][0]["primary_action"]["type"], "copy_text");
        assert_eq!(
            value["results"][0]["secondary_action"]["payload"],
            "https://dle.rae.es/casa#a"
        );
    }

    #[test]
    fn hide_display_has_no_payload() {
        let results = [ResultEntry {
            title: "Palabra vacía".to_string(),
            subtitle: String::new(),
            primary_action: Action::HideDisplay,
            secondary_action: None,
        }];
        let mut output = Vec::new();
        write_results(&mut output, Format::Json, "", &results).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["results"][0]["primary_action"]["type"], "hide_display");
        assert!(value["results"][0]["secondary_action"].is_null());
    }
}
