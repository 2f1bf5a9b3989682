//! Seams between the run and the browser.
//!
//! The extractor only needs three things from a browser: a way to open the
//! search page, a way to wait for and list result rows, and a way to read
//! text out of a row. Keeping those behind traits lets the same extraction
//! code run against chromiumoxide or a static HTML snapshot.

use std::time::Duration;

use crate::error::Result;

/// One result row on a loaded page.
#[allow(async_fn_in_trait)]
pub trait ResultRow {
    /// Inner text of the first descendant matching `selector`.
    ///
    /// `Ok(None)` means the selector matched nothing. A match with empty text
    /// yields `Some("")`. `Err` is reserved for the page itself misbehaving.
    async fn text_of(&self, selector: &str) -> Result<Option<String>>;
}

/// A loaded search results page.
#[allow(async_fn_in_trait)]
pub trait ResultsPage {
    type Row: ResultRow;

    /// Wait until at least one element matches `selector`, or fail with
    /// [`Error::Timeout`](crate::Error::Timeout).
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// All elements matching `selector`, in document order.
    async fn rows(&self, selector: &str) -> Result<Vec<Self::Row>>;
}

/// An exclusively owned browser session.
#[allow(async_fn_in_trait)]
pub trait SearchSession {
    type Page: ResultsPage;

    /// Open a page and navigate it to `url`, bounded by `timeout`.
    async fn open(&self, url: &str, timeout: Duration) -> Result<Self::Page>;

    /// Tear the session down. Consumes the session so it can only happen once.
    async fn close(self) -> Result<()>;
}
