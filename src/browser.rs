use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use chromiumoxide::browser::{Browser as CrBrowser, BrowserConfig as CrBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::config::{BrowserBuilder, BrowserConfig};
use crate::error::{Error, Result};
use crate::page::Page;
use crate::session::SearchSession;
use crate::stealth;

/// Chrome flags that cut startup and page load time without changing what renders.
const PERF_ARGS: &[&str] = &[
    "disable-extensions",
    "metrics-recording-only",
    "mute-audio",
    "disable-client-side-phishing-detection",
    "disable-popup-blocking",
    "disable-sync",
    "disable-translate",
];

/// A single Chrome instance owned by one scrape run.
///
/// Release it with [`FlightBrowser::shutdown`] (or [`SearchSession::close`]).
/// Dropping it without shutting down still stops the CDP handler task, and
/// chromiumoxide kills the child process on drop.
pub struct FlightBrowser {
    browser: CrBrowser,
    stealth: bool,
    query_timeout: Duration,
    shutdown_timeout: Duration,
    handler_task: tokio::task::JoinHandle<()>,
}

impl FlightBrowser {
    /// Create a new BrowserBuilder for configuring and launching a browser.
    pub fn builder() -> BrowserBuilder {
        BrowserBuilder::new()
    }

    /// Launch a browser instance with the given configuration.
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        let mut builder = CrBrowserConfig::builder();

        if config.headless {
            builder = builder.new_headless_mode().no_sandbox();
        } else {
            builder = builder.with_head().no_sandbox();
        }

        for arg in PERF_ARGS {
            builder = builder.arg(*arg);
        }

        // chromiumoxide adds the `--` prefix itself; ("key", "value") becomes --key=value
        if config.stealth {
            for arg in stealth::stealth_key_args() {
                builder = builder.arg(arg);
            }
            for arg in stealth::stealth_kv_args(&config.user_agent) {
                builder = builder.arg(arg);
            }
        } else {
            builder = builder.arg(("user-agent", config.user_agent.as_str()));
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder = builder.viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        });

        let cr_config = builder
            .build()
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let (browser, mut handler) = CrBrowser::launch(cr_config)
            .await
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        info!(
            headless = config.headless,
            stealth = config.stealth,
            width = config.viewport_width,
            height = config.viewport_height,
            "browser launched"
        );

        Ok(Self {
            browser,
            stealth: config.stealth,
            query_timeout: config.query_timeout,
            shutdown_timeout: config.shutdown_timeout,
            handler_task,
        })
    }

    /// Open a new page (tab) and navigate it to the given URL.
    /// If stealth mode is enabled, the evasion script is registered before navigation.
    pub async fn new_page(&self, url: &str, timeout: Duration) -> Result<Page> {
        let cr_page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;

        if self.stealth {
            stealth::apply_stealth(&cr_page).await?;
        }

        let page = Page::new(cr_page, self.query_timeout);
        info!(url, timeout_secs = timeout.as_secs(), "navigating");
        page.goto(url, timeout).await?;
        debug!(url, "navigation finished");
        Ok(page)
    }

    /// Close the browser and wait for the process to exit. Each step gets
    /// `shutdown_timeout`; if either fails, the process is killed instead.
    pub async fn shutdown(mut self) -> Result<()> {
        let limit = self.shutdown_timeout;
        let graceful = settle("close", limit, self.browser.close()).await
            && settle("exit", limit, self.browser.wait()).await;

        let outcome = if graceful {
            info!("browser closed");
            Ok(())
        } else {
            let kill = async { self.browser.kill().await.unwrap_or(Ok(())) };
            if settle("kill", limit, kill).await {
                warn!("browser killed after failed shutdown");
                Ok(())
            } else {
                Err(Error::Timeout("browser shutdown".into()))
            }
        };

        self.handler_task.abort();
        outcome
    }
}

/// Await one shutdown step for at most `limit`. True only if it finished and succeeded.
pub(crate) async fn settle<T, E: Display>(
    step: &str,
    limit: Duration,
    call: impl Future<Output = std::result::Result<T, E>>,
) -> bool {
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            warn!(step, error = %e, "browser shutdown step failed");
            false
        }
        Err(_) => {
            warn!(step, timeout_secs = limit.as_secs_f32(), "browser shutdown step timed out");
            false
        }
    }
}

impl Drop for FlightBrowser {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

impl SearchSession for FlightBrowser {
    type Page = Page;

    async fn open(&self, url: &str, timeout: Duration) -> Result<Page> {
        self.new_page(url, timeout).await
    }

    async fn close(self) -> Result<()> {
        self.shutdown().await
    }
}
