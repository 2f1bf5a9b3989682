use std::future::Future;
use std::time::Duration;

use chromiumoxide::element::Element as CrElement;
use chromiumoxide::error::CdpError;

use crate::error::{Error, Result};
use crate::session::ResultRow;

/// Run a CDP call, failing with [`Error::Timeout`] if it does not settle in time.
pub(crate) async fn bounded<T>(
    what: &str,
    timeout: Duration,
    call: impl Future<Output = std::result::Result<T, CdpError>>,
) -> Result<T> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| Error::Timeout(format!("{what} (after {}s)", timeout.as_secs_f32())))?
        .map_err(Error::CdpError)
}

/// Wrapper around a chromiumoxide Element whose queries are all time-bounded.
pub struct Element {
    inner: CrElement,
    query_timeout: Duration,
}

impl Element {
    pub(crate) fn new(inner: CrElement, query_timeout: Duration) -> Self {
        Self { inner, query_timeout }
    }

    /// Get the inner text of this element, `None` if the element has none.
    pub async fn inner_text(&self) -> Result<Option<String>> {
        bounded("inner text", self.query_timeout, self.inner.inner_text()).await
    }

    /// Find all descendants matching the given CSS selector.
    /// An empty list means nothing matched; it is not an error.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<Element>> {
        let els = bounded(selector, self.query_timeout, self.inner.find_elements(selector)).await?;
        Ok(els
            .into_iter()
            .map(|el| Element::new(el, self.query_timeout))
            .collect())
    }
}

impl ResultRow for Element {
    async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        match self.find_elements(selector).await?.first() {
            Some(el) => el.inner_text().await,
            None => Ok(None),
        }
    }
}
