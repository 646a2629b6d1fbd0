//! Stateless navigation actions
//!
//! Opens a URL in the default browser by known site name or best-guess
//! domain, and issues search-engine queries. The site directory lookup is a
//! case-sensitive exact match; anything else falls back to a guessed
//! `www.{name}.com` address.

use async_trait::async_trait;
use tokio::process::Command;

use crate::{Error, Result};

/// Compiled-in site directory: canonical name → URL
pub const SITE_DIRECTORY: &[(&str, &str)] = &[
    ("Google", "https://www.google.com"),
    ("YouTube", "https://www.youtube.com"),
    ("Facebook", "https://www.facebook.com"),
    ("Twitter", "https://www.twitter.com"),
    ("Instagram", "https://www.instagram.com"),
    ("Amazon", "https://www.amazon.com"),
    ("Netflix", "https://www.netflix.com"),
    ("Gmail", "https://www.gmail.com"),
    ("Google Maps", "https://www.google.com/maps"),
    ("Wikipedia", "https://www.wikipedia.org"),
    ("GitHub", "https://www.github.com"),
    ("Netlify", "https://app.netlify.com"),
];

/// Search engine URL prefix; the query is appended percent-encoded
const SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Resolve a site name to a URL
///
/// Directory lookup is case-sensitive exact match — `open youtube` (typed
/// lowercase) misses the `YouTube` entry and resolves through the fallback.
#[must_use]
pub fn resolve_site(name: &str) -> String {
    SITE_DIRECTORY
        .iter()
        .find(|(site, _)| *site == name)
        .map_or_else(
            || format!("https://www.{}.com", name.to_lowercase()),
            |(_, url)| (*url).to_string(),
        )
}

/// Build the search-engine URL for a query
#[must_use]
pub fn search_url(query: &str) -> String {
    format!("{SEARCH_URL}{}", urlencoding::encode(query))
}

/// Opens a URL in the user's default browser
#[async_trait]
pub trait UrlOpener: Send + Sync {
    /// Open `url`
    ///
    /// # Errors
    ///
    /// Returns error if the platform opener cannot be spawned or reports
    /// failure
    async fn open(&self, url: &str) -> Result<()>;
}

/// Platform URL opener (`xdg-open` / `open` / `cmd start`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

#[async_trait]
impl UrlOpener for SystemOpener {
    async fn open(&self, url: &str) -> Result<()> {
        let mut command = opener_command(url);

        let status = command
            .status()
            .await
            .map_err(|e| Error::Navigation(format!("failed to spawn opener: {e}")))?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(Error::Navigation(format!("opener exited with code {code}")));
        }

        tracing::debug!(url, "opened in default browser");
        Ok(())
    }
}

/// Build the platform-specific open command
fn opener_command(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut c = Command::new("open");
        c.arg(url);
        c
    }

    #[cfg(target_os = "windows")]
    {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    }
}
