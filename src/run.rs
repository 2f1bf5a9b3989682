use std::io::Write;

use tracing::{info, warn};

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::extract::{self, FlightRecord};
use crate::report::{Reporter, ResultStore};
use crate::request::SearchRequest;
use crate::rules::ROW_SELECTOR;
use crate::session::{ResultsPage, SearchSession};

/// Run one search on `session` and close it afterwards, whatever happened.
///
/// Returns:
/// - `Ok(Some(flights))` when rows were extracted and appended to `store`;
/// - `Ok(None)` when the page never became ready or extraction failed. The
///   error is logged and reported, and `store` is left untouched;
/// - `Err` when the page could not be opened at all.
pub async fn execute<S, W>(
    session: S,
    request: &SearchRequest,
    config: &ScrapeConfig,
    store: &ResultStore,
    reporter: &mut Reporter<W>,
) -> Result<Option<Vec<FlightRecord>>>
where
    S: SearchSession,
    W: Write,
{
    let outcome = search(&session, request, config, store, reporter).await;

    if let Err(e) = session.close().await {
        warn!(error = %e, "browser teardown failed");
    }

    outcome
}

async fn search<S, W>(
    session: &S,
    request: &SearchRequest,
    config: &ScrapeConfig,
    store: &ResultStore,
    reporter: &mut Reporter<W>,
) -> Result<Option<Vec<FlightRecord>>>
where
    S: SearchSession,
    W: Write,
{
    let url = request.search_url(&config.base_url)?;
    let page = session.open(url.as_str(), config.navigation_timeout).await?;

    match scrape_page(&page, request, config, store, reporter).await {
        Ok(flights) => Ok(Some(flights)),
        Err(err) => {
            warn!(error = %err, "parsing failed");
            reporter.failure(&err)?;
            Ok(None)
        }
    }
}

async fn scrape_page<P, W>(
    page: &P,
    request: &SearchRequest,
    config: &ScrapeConfig,
    store: &ResultStore,
    reporter: &mut Reporter<W>,
) -> Result<Vec<FlightRecord>>
where
    P: ResultsPage,
    W: Write,
{
    page.wait_for(ROW_SELECTOR, config.ready_timeout).await?;
    info!("flight rows rendered");

    let flights = extract::extract_flights(page, request, config.max_rows, reporter).await?;
    reporter.result_set(&flights)?;
    store.append(&flights)?;
    Ok(flights)
}
