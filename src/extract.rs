use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::report::Reporter;
use crate::request::SearchRequest;
use crate::rules::{Field, RULES, ROW_SELECTOR};
use crate::session::{ResultRow, ResultsPage};

/// One scraped flight. A field that could not be found holds its sentinel
/// (e.g. `"No price found"`), never an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    #[serde(rename = "flight time")]
    pub duration: String,
    #[serde(rename = "flight cost")]
    pub price: String,
    #[serde(rename = "flight departure time")]
    pub departure_time: String,
    #[serde(rename = "flight arrival time")]
    pub arrival_time: String,
}

impl FlightRecord {
    /// A record with every field set to its sentinel.
    pub fn unresolved() -> Self {
        Self {
            duration: Field::Duration.sentinel().to_string(),
            price: Field::Price.sentinel().to_string(),
            departure_time: Field::DepartureTime.sentinel().to_string(),
            arrival_time: Field::ArrivalTime.sentinel().to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::DepartureTime => &self.departure_time,
            Field::ArrivalTime => &self.arrival_time,
            Field::Duration => &self.duration,
            Field::Price => &self.price,
        }
    }

    /// True if `field` fell back to its sentinel.
    pub fn is_missing(&self, field: Field) -> bool {
        self.get(field) == field.sentinel()
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::DepartureTime => &mut self.departure_time,
            Field::ArrivalTime => &mut self.arrival_time,
            Field::Duration => &mut self.duration,
            Field::Price => &mut self.price,
        }
    }
}

/// Read every rule out of one row. Missing fields keep their sentinel;
/// only a failing page aborts the row.
pub async fn extract_row<R: ResultRow>(row: &R) -> Result<FlightRecord> {
    let mut record = FlightRecord::unresolved();
    for rule in &RULES {
        match row.text_of(rule.selector).await? {
            Some(text) => *record.slot_mut(rule.field) = text,
            None => debug!(field = ?rule.field, "selector matched nothing"),
        }
    }
    Ok(record)
}

/// Extract up to `max_rows` flights from a ready page, in document order.
/// Each record is reported as soon as it is built.
pub async fn extract_flights<P, W>(
    page: &P,
    request: &SearchRequest,
    max_rows: usize,
    reporter: &mut Reporter<W>,
) -> Result<Vec<FlightRecord>>
where
    P: ResultsPage,
    W: Write,
{
    let rows = page.rows(ROW_SELECTOR).await?;
    debug!(found = rows.len(), max_rows, "flight rows located");

    let mut flights = Vec::with_capacity(rows.len().min(max_rows));
    for (index, row) in rows.iter().take(max_rows).enumerate() {
        let record = extract_row(row).await?;
        debug!(index, ?record, "row extracted");
        reporter.record(request, &record)?;
        flights.push(record);
    }
    Ok(flights)
}
