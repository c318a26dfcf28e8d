//! Rendered-browser fetch via headless Chromium
//!
//! Only pays for a browser launch when both HTTP strategies have failed.
//! Missing executables and builds without the `headless` feature report
//! `FetchError::Unavailable` so the chain treats them as a skip.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::FetchError;

use super::FetchStrategy;

pub struct RenderedBrowser {
    user_agent: String,
    timeout: Duration,
    executable: Option<PathBuf>,
}

impl RenderedBrowser {
    pub fn new(user_agent: &str, timeout: Duration, executable: Option<PathBuf>) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            timeout,
            executable,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(
            &config.user_agent,
            config.browser_timeout(),
            config.browser_path.clone(),
        )
    }

    /// Configured executable if it exists, otherwise autodetect
    fn locate_executable(&self) -> Result<PathBuf, FetchError> {
        match &self.executable {
            Some(path) if path.exists() => Ok(path.clone()),
            Some(path) => Err(FetchError::Unavailable(format!(
                "browser executable {} not found",
                path.display()
            ))),
            None => autodetect_executable(),
        }
    }
}

#[cfg(feature = "headless")]
fn autodetect_executable() -> Result<PathBuf, FetchError> {
    headless_chrome::browser::default_executable().map_err(FetchError::Unavailable)
}

#[cfg(not(feature = "headless"))]
fn autodetect_executable() -> Result<PathBuf, FetchError> {
    Err(FetchError::Unavailable(
        "built without the `headless` feature".to_string(),
    ))
}

impl FetchStrategy for RenderedBrowser {
    fn name(&self) -> &str {
        "browser"
    }

    fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let executable = self.locate_executable()?;
        render(&executable, url, &self.user_agent, self.timeout)
    }
}

#[cfg(feature = "headless")]
fn render(
    executable: &std::path::Path,
    url: &str,
    user_agent: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let session = session::BrowserSession::launch(executable, timeout)?;
    session.render(url, user_agent, timeout)
    // session dropped here on every path, closing the tab and the browser
}

#[cfg(not(feature = "headless"))]
fn render(
    _executable: &std::path::Path,
    _url: &str,
    _user_agent: &str,
    _timeout: Duration,
) -> Result<String, FetchError> {
    Err(FetchError::Unavailable(
        "built without the `headless` feature".to_string(),
    ))
}

#[cfg(feature = "headless")]
mod session {
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;

    use headless_chrome::{Browser, LaunchOptions, Tab};
    use tracing::{debug, info};

    use crate::error::FetchError;

    /// Owns one browser process and its tab for the length of a single fetch.
    /// Dropping it closes the tab; the browser process is killed when
    /// `browser` drops right after.
    pub(super) struct BrowserSession {
        tab: Arc<Tab>,
        // Field order matters: tab handle goes before the browser
        _browser: Browser,
    }

    impl BrowserSession {
        pub(super) fn launch(executable: &Path, timeout: Duration) -> Result<Self, FetchError> {
            let options = LaunchOptions::default_builder()
                .headless(true)
                .sandbox(false)
                .path(Some(executable.to_path_buf()))
                .idle_browser_timeout(timeout * 2)
                .build()
                .map_err(|e| FetchError::Browser(format!("invalid launch options: {}", e)))?;

            info!("Launching headless browser {}", executable.display());
            let browser = Browser::new(options)
                .map_err(|e| FetchError::Browser(format!("failed to launch: {}", e)))?;
            let tab = browser
                .new_tab()
                .map_err(|e| FetchError::Browser(format!("failed to open tab: {}", e)))?;

            Ok(Self {
                tab,
                _browser: browser,
            })
        }

        pub(super) fn render(
            &self,
            url: &str,
            user_agent: &str,
            timeout: Duration,
        ) -> Result<String, FetchError> {
            self.tab.set_default_timeout(timeout);
            self.tab
                .set_user_agent(user_agent, None, None)
                .map_err(|e| FetchError::Browser(format!("failed to set user agent: {}", e)))?;

            self.tab
                .navigate_to(url)
                .and_then(|tab| tab.wait_until_navigated())
                .map_err(|e| FetchError::Browser(format!("navigation to {} failed: {}", url, e)))?;

            self.tab
                .get_content()
                .map_err(|e| FetchError::Browser(format!("failed to read document: {}", e)))
        }
    }

    impl Drop for BrowserSession {
        fn drop(&mut self) {
            debug!("Releasing headless browser");
            if let Err(e) = self.tab.close(true) {
                debug!("Tab close failed during teardown: {}", e);
            }
        }
    }
}
