use std::io::Write;
use serde::Serialize;
use crate::config::OutputFormat;
use crate::viacep::model::{Field, LookupOutcome, LookupResult};

pub const EMPTY_INPUT_MSG: &str = "Digite um CEP válido.";
pub const NOT_FOUND_MSG: &str = "CEP não encontrado.";
pub const FAILED_MSG: &str = "Erro ao consultar o CEP.";
pub const PROMPT: &str = "Digite o CEP:";

/// shape of the JSON output
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonOutcome<'a> {
    Found { address: &'a LookupResult },
    NotFound,
    Failed { message: &'static str },
}

impl<'a> From<&'a LookupOutcome> for JsonOutcome<'a> {
    fn from(outcome: &'a LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Found(result) => JsonOutcome::Found { address: result },
            LookupOutcome::NotFound => JsonOutcome::NotFound,
            LookupOutcome::Failed(_) => JsonOutcome::Failed { message: FAILED_MSG },
        }
    }
}

/// write the outcome of one lookup.
///
/// Messages that are not data (not found, failure) go to `err` in CSV mode so
/// the CSV stream stays parseable.
pub fn render_outcome(
    outcome: &LookupOutcome,
    format: OutputFormat,
    out: &mut impl Write,
    err: &mut impl Write,
) -> color_eyre::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", text(outcome))?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &JsonOutcome::from(outcome))?;
            writeln!(out)?;
        }
        OutputFormat::Csv => match outcome {
            LookupOutcome::Found(result) => write_csv(result, out)?,
            _ => writeln!(err, "{}", text(outcome))?,
        },
    }
    Ok(())
}

fn text(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Found(result) => field_list(result),
        LookupOutcome::NotFound => NOT_FOUND_MSG.to_string(),
        LookupOutcome::Failed(_) => FAILED_MSG.to_string(),
    }
}

/// one `Label: value` line per field
fn field_list(result: &LookupResult) -> String {
    result.iter()
        .map(|(field, value)| format!("{}: {}", field.label(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_csv(result: &LookupResult, out: &mut impl Write) -> color_eyre::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(Field::ALL.iter().map(Field::key))?;
    wtr.write_record(result.iter().map(|(_, value)| value))?;
    wtr.flush()?;
    Ok(())
}
