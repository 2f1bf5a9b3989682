use std::time::Duration;

use chromiumoxide::page::Page as CrPage;
use tracing::debug;

use crate::element::{bounded, Element};
use crate::error::{Error, Result};
use crate::session::ResultsPage;

/// Wrapper around a chromiumoxide Page with time-bounded navigation and queries.
pub struct Page {
    inner: CrPage,
    query_timeout: Duration,
}

impl Page {
    pub(crate) fn new(inner: CrPage, query_timeout: Duration) -> Self {
        Self { inner, query_timeout }
    }

    /// Navigate to the given URL and wait for the page to load.
    pub async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.inner.goto(url))
            .await
            .map_err(|_| Error::Timeout(format!("navigation to {url}")))?
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(())
    }

    /// Wait for an element matching the given CSS selector to appear in the DOM.
    /// Polls every 100ms until `timeout` runs out.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<Element> {
        let interval = Duration::from_millis(100);

        let poll = async {
            loop {
                match self.find_elements(selector).await {
                    Ok(els) if !els.is_empty() => {
                        return els.into_iter().next().ok_or_else(|| {
                            Error::ElementNotFound(selector.to_string())
                        });
                    }
                    Ok(_) => {}
                    Err(e) => debug!(selector, error = %e, "selector poll failed"),
                }
                tokio::time::sleep(interval).await;
            }
        };

        tokio::time::timeout(timeout, poll).await.map_err(|_| {
            Error::Timeout(format!("Timed out waiting for selector: {selector}"))
        })?
    }

    /// Find all elements matching the given CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<Element>> {
        let els = bounded(selector, self.query_timeout, self.inner.find_elements(selector)).await?;
        Ok(els
            .into_iter()
            .map(|el| Element::new(el, self.query_timeout))
            .collect())
    }
}

impl ResultsPage for Page {
    type Row = Element;

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.wait_for_selector(selector, timeout).await.map(|_| ())
    }

    async fn rows(&self, selector: &str) -> Result<Vec<Element>> {
        self.find_elements(selector).await
    }
}
