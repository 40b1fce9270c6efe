//! Browser automation capability consumed by the runner

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::error::{DriverError, DriverResult};

/// Interval between lookups while waiting for an element
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Reference to the n-th element matching a selector
///
/// Handles are re-resolved on every interaction, so a handle stays usable
/// across page updates as long as the element keeps its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    selector: String,
    index: usize,
}

impl ElementHandle {
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        Self {
            selector: selector.into(),
            index,
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.selector, self.index)
    }
}

/// Predicate accepting any element
pub fn present(_: &ElementHandle) -> bool {
    true
}

/// A live browser session
///
/// Calls are awaited one at a time by a single owner; implementations do not
/// need to be `Send`.
#[async_trait(?Send)]
pub trait UiDriver {
    async fn navigate(&self, url: &str) -> DriverResult<()>;

    async fn title(&self) -> DriverResult<String>;

    async fn find_all(&self, selector: &str) -> DriverResult<Vec<ElementHandle>>;

    /// First element matching `selector`; fails if there is none
    async fn find(&self, selector: &str) -> DriverResult<ElementHandle> {
        self.find_all(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::ElementNotFound(selector.to_string()))
    }

    async fn click(&self, element: &ElementHandle) -> DriverResult<()>;

    async fn attribute(&self, element: &ElementHandle, name: &str) -> DriverResult<Option<String>>;

    /// Poll until an element matching `selector` satisfies `predicate`
    async fn wait_until(
        &self,
        selector: &str,
        predicate: &dyn for<'e> Fn(&'e ElementHandle) -> bool,
        timeout: Duration,
    ) -> DriverResult<ElementHandle> {
        let deadline = Instant::now() + timeout;
        loop {
            let found = self.find_all(selector).await?;
            if let Some(element) = found.into_iter().find(|e| predicate(e)) {
                return Ok(element);
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(DriverError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    async fn close(&mut self) -> DriverResult<()>;
}
