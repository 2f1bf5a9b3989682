#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flight_scout::session::{ResultRow, ResultsPage, SearchSession};
use flight_scout::{Error, Result};
use scraper::{Html, Selector};

pub const ROW_CLASS: &str = "app-components-Shopping-GridItem-styles__flightRow--QbVXL";

/// Fields for one fixture row; `None` leaves the element out entirely.
#[derive(Default, Clone)]
pub struct RowSpec<'a> {
    pub departure: Option<&'a str>,
    pub arrival: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub price: Option<&'a str>,
}

impl<'a> RowSpec<'a> {
    pub fn complete(
        departure: &'a str,
        arrival: &'a str,
        duration: &'a str,
        price: &'a str,
    ) -> Self {
        Self {
            departure: Some(departure),
            arrival: Some(arrival),
            duration: Some(duration),
            price: Some(price),
        }
    }
}

/// Markup shaped like the live results page.
pub fn flight_row(spec: &RowSpec) -> String {
    let mut html = format!(r#"<div class="{ROW_CLASS}">"#);
    if let Some(dep) = spec.departure {
        html.push_str(&format!(
            r#"<div class="app-components-Shopping-FlightInfoBlock-styles__departTime--cDBWt"><span class="app-components-Shopping-FlightInfoBlock-styles__time--CaNGp">{dep}</span></div>"#
        ));
    }
    if let Some(arr) = spec.arrival {
        html.push_str(&format!(
            r#"<div class="app-components-Shopping-FlightInfoBlock-styles__arrivalTime--AXo5U"><span class="app-components-Shopping-FlightInfoBlock-styles__time--CaNGp">{arr}</span></div>"#
        ));
    }
    if let Some(dur) = spec.duration {
        html.push_str(&format!(
            r#"<div class="app-components-Shopping-FlightInfoBlock-styles__duration--P3ZXi"><span class="sr-only">Duration</span><span aria-hidden="true">{dur}</span></div>"#
        ));
    }
    if let Some(price) = spec.price {
        html.push_str(&format!(
            r#"<div class="app-components-Shopping-PriceCard-styles__btnPriceValue--Ka9xB"><span><span>{price}</span></span></div>"#
        ));
    }
    html.push_str("</div>");
    html
}

pub fn results_page(rows: &[RowSpec]) -> String {
    let body: String = rows.iter().map(flight_row).collect();
    format!(r#"<html><body><div id="results">{body}</div></body></html>"#)
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::ElementNotFound(format!("{selector}: {e:?}")))
}

/// A results page backed by static HTML.
pub struct HtmlPage {
    html: String,
}

impl HtmlPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

pub struct HtmlRow {
    html: String,
}

impl HtmlRow {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl ResultRow for HtmlRow {
    async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        let sel = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.html);
        let text = fragment
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>());
        Ok(text)
    }
}

impl ResultsPage for HtmlPage {
    type Row = HtmlRow;

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()> {
        let sel = parse_selector(selector)?;
        let present = Html::parse_document(&self.html).select(&sel).next().is_some();
        if present {
            return Ok(());
        }
        tokio::time::sleep(timeout).await;
        Err(Error::Timeout(format!("Timed out waiting for selector: {selector}")))
    }

    async fn rows(&self, selector: &str) -> Result<Vec<HtmlRow>> {
        let sel = parse_selector(selector)?;
        let doc = Html::parse_document(&self.html);
        Ok(doc.select(&sel).map(|el| HtmlRow::new(el.html())).collect())
    }
}

/// Session that serves one static page and records what happened to it.
#[derive(Clone)]
pub struct FakeSession {
    html: String,
    fail_open: bool,
    pub closed: Arc<AtomicBool>,
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl FakeSession {
    pub fn serving(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            fail_open: false,
            closed: Arc::new(AtomicBool::new(false)),
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_open: true,
            ..Self::serving("")
        }
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl SearchSession for FakeSession {
    type Page = HtmlPage;

    async fn open(&self, url: &str, _timeout: Duration) -> Result<HtmlPage> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail_open {
            return Err(Error::NavigationError(format!("net::ERR_NAME_NOT_RESOLVED at {url}")));
        }
        Ok(HtmlPage::new(self.html.clone()))
    }

    async fn close(self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
