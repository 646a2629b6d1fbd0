//! Browser automation for media search
//!
//! One automation session per process, created on first need and reused
//! across media commands (session startup is expensive; reuse amortizes it).
//! Any automation failure tears the session down so the next attempt starts
//! clean. Uses `chromiumoxide` for Chrome `DevTools` Protocol integration.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;

use crate::config::AutomationConfig;
use crate::{Error, Result};

/// Search field on the media site
pub const SEARCH_BOX: &str = "input[name=\"search_query\"]";

/// A single search result entry
pub const RESULT_TILE: &str = "ytd-video-renderer";

/// Poll interval while waiting for an element to appear
const WAIT_POLL: Duration = Duration::from_millis(100);

/// Driver primitives needed for a media search
///
/// The production implementation drives a real browser; tests substitute a
/// scripted fake to exercise the session state machine.
#[async_trait]
pub trait SearchDriver: Send + Sync + Sized {
    /// Start a browser session
    async fn launch(config: &AutomationConfig) -> Result<Self>;

    /// Navigate the session's page to a URL
    async fn goto(&self, url: &str) -> Result<()>;

    /// Focus an element and type text into it
    async fn type_into(&self, selector: &str, text: &str) -> Result<()>;

    /// Press Enter on an element
    async fn submit(&self, selector: &str) -> Result<()>;

    /// Wait until an element matching `selector` appears
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Click the first element matching `selector`
    async fn click_first(&self, selector: &str) -> Result<()>;

    /// Terminate the session
    async fn shutdown(self) -> Result<()>;
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No live driver
    Absent,
    /// Driver is live and reusable
    Active,
}

/// At-most-one automation session, lazily created and reset on error
pub struct MediaSession<D> {
    driver: Option<D>,
    config: AutomationConfig,
}

impl<D: SearchDriver> MediaSession<D> {
    /// Create a session holder; no browser is started yet
    #[must_use]
    pub fn new(config: AutomationConfig) -> Self {
        Self {
            driver: None,
            config,
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.driver.is_some() {
            SessionState::Active
        } else {
            SessionState::Absent
        }
    }

    /// Search the media site for `query` and click the first result
    ///
    /// The session stays Active on success. On any step failure the driver
    /// is torn down (termination failures are logged, not re-raised) and the
    /// in-memory reference cleared, so the next call starts clean.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error after the session has been reset
    pub async fn play(&mut self, query: &str) -> Result<()> {
        match self.search_and_click(query).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, query, "media search failed, resetting session");
                self.teardown().await;
                Err(e)
            }
        }
    }

    /// Gracefully terminate the session if one is live
    pub async fn shutdown(&mut self) {
        self.teardown().await;
    }

    async fn search_and_click(&mut self, query: &str) -> Result<()> {
        if self.driver.is_none() {
            let driver = D::launch(&self.config).await?;
            self.driver = Some(driver);
            tracing::info!("automation session started");
        }

        let Some(driver) = self.driver.as_ref() else {
            return Err(Error::Browser("session not started".to_string()));
        };

        driver.goto(&self.config.media_url).await?;
        driver.type_into(SEARCH_BOX, query).await?;
        driver.submit(SEARCH_BOX).await?;
        driver
            .wait_for(RESULT_TILE, self.config.result_timeout)
            .await?;
        // Results render progressively; give the list a moment to settle
        tokio::time::sleep(self.config.settle_delay).await;
        driver.click_first(RESULT_TILE).await?;

        Ok(())
    }

    async fn teardown(&mut self) {
        if let Some(driver) = self.driver.take() {
            if let Err(e) = driver.shutdown().await {
                tracing::error!(error = %e, "session termination failed");
            } else {
                tracing::info!("automation session closed");
            }
        }
    }
}

/// Chromium-backed driver
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
}

#[async_trait]
impl SearchDriver for ChromiumDriver {
    async fn launch(_config: &AutomationConfig) -> Result<Self> {
        let browser_config = BrowserConfig::builder()
            .with_head()
            .arg("--start-maximized")
            .arg("--disable-notifications")
            .build()
            .map_err(|e| Error::Browser(format!("config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::Browser(format!("launch failed: {e}")))?;

        // Drive the CDP event stream in the background
        tokio::spawn(async move {
            while handler.next().await.is_some() {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::Browser(format!("new page failed: {e}")))?;

        Ok(Self { browser, page })
    }

    async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| Error::Browser(format!("navigation failed: {e}")))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| Error::Browser(format!("navigation failed: {e}")))?;
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| Error::Browser(format!("element not found: {e}")))?;

        element
            .click()
            .await
            .map_err(|e| Error::Browser(format!("focus failed: {e}")))?;

        element
            .type_str(text)
            .await
            .map_err(|e| Error::Browser(format!("type failed: {e}")))?;

        Ok(())
    }

    async fn submit(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| Error::Browser(format!("element not found: {e}")))?;

        element
            .press_key("Enter")
            .await
            .map_err(|e| Error::Browser(format!("submit failed: {e}")))?;

        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()> {
        let found = tokio::time::timeout(timeout, async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(WAIT_POLL).await;
            }
        })
        .await;

        found.map_err(|_| {
            Error::Browser(format!("timed out after {timeout:?} waiting for {selector}"))
        })
    }

    async fn click_first(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| Error::Browser(format!("element not found: {e}")))?;

        element
            .click()
            .await
            .map_err(|e| Error::Browser(format!("click failed: {e}")))?;

        Ok(())
    }

    async fn shutdown(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| Error::Browser(format!("close failed: {e}")))?;
        let _ = self.browser.wait().await;
        Ok(())
    }
}
