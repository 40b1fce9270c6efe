//! Chrome DevTools driver

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::BrowserSettings;
use crate::driver::{ElementHandle, UiDriver};
use crate::error::{DriverError, DriverResult, RunError, RunResult};

/// Headless Chrome session with a single page
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,

    /// Cleared once the CDP event loop ends
    alive: Arc<AtomicBool>,
}

impl ChromeDriver {
    /// Launch Chrome and open a blank page
    pub async fn launch(settings: &BrowserSettings) -> RunResult<Self> {
        let config = Self::browser_config(settings)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RunError::BrowserStartup(e.to_string()))?;

        let alive = Arc::new(AtomicBool::new(true));
        let handler_alive = alive.clone();
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler error: {}", e);
                }
            }
            handler_alive.store(false, Ordering::SeqCst);
        });

        let page = abort_on_err(&handler, browser.new_page("about:blank").await)
            .map_err(|e| RunError::BrowserStartup(e.to_string()))?;

        info!(
            "Chrome started ({}x{}, headless: {})",
            settings.window_width, settings.window_height, settings.headless
        );

        Ok(Self {
            browser,
            page,
            handler,
            alive,
        })
    }

    fn browser_config(settings: &BrowserSettings) -> RunResult<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.window_width, settings.window_height);

        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if settings.disable_dev_shm {
            builder = builder.arg("--disable-dev-shm-usage");
        }
        if let Some(path) = &settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(RunError::BrowserStartup)
    }

    /// Map a CDP error, treating anything after the event loop died as fatal
    fn classify(&self, selector: &str, err: CdpError) -> DriverError {
        if !self.alive.load(Ordering::SeqCst) {
            return DriverError::Session(err.to_string());
        }
        match err {
            CdpError::NotFound => DriverError::ElementNotFound(selector.to_string()),
            CdpError::Ws(_) | CdpError::ChannelSendError(_) | CdpError::NoResponse => {
                DriverError::Session(err.to_string())
            }
            other => DriverError::Interaction {
                selector: selector.to_string(),
                reason: other.to_string(),
            },
        }
    }

    async fn resolve(&self, handle: &ElementHandle) -> DriverResult<Element> {
        let elements = self
            .page
            .find_elements(handle.selector())
            .await
            .map_err(|e| self.classify(handle.selector(), e))?;
        elements
            .into_iter()
            .nth(handle.index())
            .ok_or_else(|| DriverError::ElementNotFound(handle.to_string()))
    }
}

/// Stop the CDP event loop when a startup step fails
fn abort_on_err<T, E>(handler: &JoinHandle<()>, result: Result<T, E>) -> Result<T, E> {
    if result.is_err() {
        handler.abort();
    }
    result
}

fn exit_warning<T, E: std::fmt::Display>(waited: &Result<T, E>) -> Option<String> {
    waited
        .as_ref()
        .err()
        .map(|e| format!("Browser process did not exit cleanly: {}", e))
}

#[async_trait(?Send)]
impl UiDriver for ChromeDriver {
    async fn navigate(&self, url: &str) -> DriverResult<()> {
        debug!("navigate: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| self.classify(url, e))?;
        Ok(())
    }

    async fn title(&self) -> DriverResult<String> {
        let title = self
            .page
            .get_title()
            .await
            .map_err(|e| self.classify("title", e))?;
        Ok(title.unwrap_or_default())
    }

    async fn find_all(&self, selector: &str) -> DriverResult<Vec<ElementHandle>> {
        let count = match self.page.find_elements(selector).await {
            Ok(elements) => elements.len(),
            Err(CdpError::NotFound) if self.alive.load(Ordering::SeqCst) => 0,
            Err(e) => return Err(self.classify(selector, e)),
        };
        debug!("find_all: {} -> {}", selector, count);
        Ok((0..count).map(|i| ElementHandle::new(selector, i)).collect())
    }

    async fn click(&self, element: &ElementHandle) -> DriverResult<()> {
        debug!("click: {}", element);
        let target = self.resolve(element).await?;
        target
            .click()
            .await
            .map_err(|e| self.classify(element.selector(), e))?;
        Ok(())
    }

    async fn attribute(&self, element: &ElementHandle, name: &str) -> DriverResult<Option<String>> {
        let target = self.resolve(element).await?;
        target
            .attribute(name)
            .await
            .map_err(|e| self.classify(element.selector(), e))
    }

    async fn close(&mut self) -> DriverResult<()> {
        info!("Closing browser");
        let closed = self.browser.close().await;
        if let Some(message) = exit_warning(&self.browser.wait().await) {
            warn!("{}", message);
        }
        self.handler.abort();
        closed.map_err(|e| DriverError::Session(e.to_string()))?;
        Ok(())
    }
}
