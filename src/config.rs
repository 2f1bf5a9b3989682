use std::path::PathBuf;
use std::time::Duration;

use crate::browser::FlightBrowser;
use crate::error::Result;
use crate::stealth;

/// Default search site. The query string is appended by [`SearchRequest::search_url`].
///
/// [`SearchRequest::search_url`]: crate::request::SearchRequest::search_url
pub const DEFAULT_BASE_URL: &str = "https://www.united.com/en/us/fsr/choose-flights";

/// Default results store, relative to the working directory.
pub const DEFAULT_RESULTS_PATH: &str = "results.json";

pub struct BrowserConfig {
    pub headless: bool,
    pub stealth: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub user_agent: String,
    pub chrome_path: Option<String>,
    /// Timeout for each DOM query and inner-text read (default: 30s).
    pub query_timeout: Duration,
    /// Limit for each browser shutdown step before the process is killed (default: 10s).
    pub shutdown_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            stealth: true,
            viewport_width: 1280,
            viewport_height: 800,
            user_agent: stealth::DEFAULT_USER_AGENT.to_string(),
            chrome_path: None,
            query_timeout: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

pub struct BrowserBuilder {
    config: BrowserConfig,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn stealth(mut self, stealth: bool) -> Self {
        self.config.stealth = stealth;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Set the timeout applied to every element query.
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.config.query_timeout = timeout;
        self
    }

    /// Set how long closing the browser may take before it is killed.
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    pub fn build_config(self) -> BrowserConfig {
        self.config
    }

    pub async fn build(self) -> Result<FlightBrowser> {
        FlightBrowser::launch(self.build_config()).await
    }
}

impl Default for BrowserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// How successive runs are separated inside the results store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunSeparator {
    /// Payloads are written back-to-back.
    #[default]
    None,
    /// A newline follows each payload (JSON Lines).
    Newline,
}

/// Settings for one scrape run, independent of the browser itself.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    /// Number of result rows to read, counted from the top of the page.
    pub max_rows: usize,
    pub navigation_timeout: Duration,
    /// How long to wait for the first flight row to render.
    pub ready_timeout: Duration,
    pub results_path: PathBuf,
    pub separator: RunSeparator,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_rows: 3,
            navigation_timeout: Duration::from_secs(100),
            ready_timeout: Duration::from_secs(50),
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            separator: RunSeparator::None,
        }
    }
}
