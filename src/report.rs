use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{RunSeparator, ScrapeConfig};
use crate::error::{Error, Result};
use crate::extract::FlightRecord;
use crate::request::SearchRequest;

/// Console side of reporting. Generic over the writer so output can be captured.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `Flight PAR - SFO: 7:00 AM - 3:25 PM, duration: 8H, 25M, price: $1,053`
    pub fn record(&mut self, request: &SearchRequest, record: &FlightRecord) -> Result<()> {
        writeln!(
            self.out,
            "Flight {} - {}: {} - {}, duration: {}, price: {}",
            request.origin(),
            request.destination(),
            record.departure_time,
            record.arrival_time,
            record.duration,
            record.price,
        )?;
        Ok(())
    }

    /// Dump the whole set in its Debug form.
    pub fn result_set(&mut self, flights: &[FlightRecord]) -> Result<()> {
        writeln!(self.out, "{flights:?}")?;
        Ok(())
    }

    pub fn failure(&mut self, err: &Error) -> Result<()> {
        writeln!(self.out, "Parsing finished with error: {err}")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Append-only file holding one JSON array per run.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
    separator: RunSeparator,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>, separator: RunSeparator) -> Self {
        Self {
            path: path.into(),
            separator,
        }
    }

    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self::new(config.results_path.clone(), config.separator)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `flights` as one JSON array and append it to the store,
    /// creating the file if needed.
    pub fn append(&self, flights: &[FlightRecord]) -> Result<()> {
        let mut payload = serde_json::to_string(flights)?;
        if self.separator == RunSeparator::Newline {
            payload.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(payload.as_bytes())?;

        info!(path = %self.path.display(), records = flights.len(), "results appended");
        Ok(())
    }

    /// Parse the store back into one result set per run.
    /// Works for back-to-back and newline-separated payloads alike.
    /// A store that does not exist yet holds no runs.
    pub fn read_runs(&self) -> Result<Vec<Vec<FlightRecord>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::Deserializer::from_str(&text)
            .into_iter::<Vec<FlightRecord>>()
            .map(|run| run.map_err(Error::from))
            .collect()
    }
}
