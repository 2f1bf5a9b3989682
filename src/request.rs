use std::io::{BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;
use url::Url;

use crate::error::{self, Error};
use crate::validate::{self, DATE_FORMAT};

pub const ORIGIN_PROMPT: &str = "Provide origin city (e.g. PAR, SFO, LAX)";
pub const DESTINATION_PROMPT: &str = "Provide destination city (e.g. PAR, SFO, LAX)";
pub const DATE_PROMPT: &str = "Provide date, use this format YYYY-MM-DD";

/// Input problems. Each one ends the run with exit status 1.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Wrong city name")]
    InvalidCity,

    #[error("Wrong date, use this format YYYY-MM-DD")]
    InvalidDate,

    #[error("Provide origin, destination and date, or none of them")]
    Incomplete,

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// A validated search. Built once per run and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    origin: String,
    destination: String,
    date: NaiveDate,
}

impl SearchRequest {
    /// Validate raw input against today's date.
    pub fn new(origin: &str, destination: &str, date: &str) -> Result<Self, InputError> {
        Self::new_on(origin, destination, date, validate::today())
    }

    /// Validate raw input against the given `today`.
    /// City codes are checked before the date.
    pub fn new_on(
        origin: &str,
        destination: &str,
        date: &str,
        today: NaiveDate,
    ) -> Result<Self, InputError> {
        if !(validate::validate_city_code(origin) && validate::validate_city_code(destination)) {
            return Err(InputError::InvalidCity);
        }
        let date = validate::parse_date(date)
            .filter(|d| validate::date_in_window(*d, today))
            .ok_or(InputError::InvalidDate)?;

        Ok(Self {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            date,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The results URL: `base_url` with `f`, `t` and `d` query parameters.
    pub fn search_url(&self, base_url: &str) -> error::Result<Url> {
        let date = self.date.format(DATE_FORMAT).to_string();
        Url::parse_with_params(
            base_url,
            [
                ("f", self.origin.as_str()),
                ("t", self.destination.as_str()),
                ("d", date.as_str()),
            ],
        )
        .map_err(|e| Error::NavigationError(format!("invalid search URL {base_url}: {e}")))
    }
}

/// Build a request from positional arguments, or prompt for all three values
/// when none were given. A partial argument list is rejected.
pub fn acquire(
    args: &[String],
    input: impl BufRead,
    output: impl Write,
) -> Result<SearchRequest, InputError> {
    match args {
        [origin, destination, date] => SearchRequest::new(origin, destination, date),
        [] => {
            let (origin, destination, date) = prompt_all(input, output)?;
            SearchRequest::new(&origin, &destination, &date)
        }
        _ => Err(InputError::Incomplete),
    }
}

fn prompt_all(
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<(String, String, String), InputError> {
    let origin = prompt(&mut input, &mut output, ORIGIN_PROMPT)?;
    let destination = prompt(&mut input, &mut output, DESTINATION_PROMPT)?;
    let date = prompt(&mut input, &mut output, DATE_PROMPT)?;
    Ok((origin, destination, date))
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
) -> Result<String, InputError> {
    writeln!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
