//! Scripted in-memory page for driving the runner without a browser

#![allow(dead_code)]

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;

use mindgames_e2e::{DriverError, DriverResult, ElementHandle, UiDriver};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub attributes: HashMap<String, String>,
    /// Error message returned when the element is clicked
    pub click_error: Option<String>,
    /// Clicking this element kills the session
    pub crashes_session: bool,
}

impl FakeElement {
    pub fn with_attr(name: &str, value: &str) -> Self {
        let mut element = Self::default();
        element.attributes.insert(name.to_string(), value.to_string());
        element
    }
}

/// Selector-keyed DOM with a recorded interaction log
#[derive(Debug, Default)]
pub struct FakePage {
    pub title: String,
    pub elements: HashMap<String, Vec<FakeElement>>,
    pub fail_navigation: bool,
    pub navigations: RefCell<Vec<String>>,
    pub clicks: RefCell<Vec<ElementHandle>>,
    pub session_lost: RefCell<bool>,
    pub closed: bool,
}

impl FakePage {
    /// The Mind Games page with every panel and control in place
    pub fn mind_games() -> Self {
        let mut page = Self {
            title: "Mind Games for Seniors — Demo".to_string(),
            ..Default::default()
        };
        page.set("#sudoku-game.active", 1);
        page.elements.insert(
            ".game-btn".to_string(),
            ["sudoku", "crossword", "memory", "mental-health-tips"]
                .iter()
                .map(|game| FakeElement::with_attr("data-game", game))
                .collect(),
        );
        page.set("#sudoku-game .control-btn", 3);
        page.set(".difficulty-btn", 3);
        page.set("[data-game='crossword']", 1);
        page.set("#crossword-game .control-btn", 3);
        page.set("[data-game='memory']", 1);
        page.set("#memory-game .control-btn", 2);
        page.set("[data-game='mental-health-tips']", 1);
        page.set(".mental-health-tips .tip-card", 6);
        page
    }

    /// Replace the elements matching `selector` with `count` plain elements
    pub fn set(&mut self, selector: &str, count: usize) {
        self.elements
            .insert(selector.to_string(), vec![FakeElement::default(); count]);
    }

    pub fn remove(&mut self, selector: &str) {
        self.elements.remove(selector);
    }

    pub fn element_mut(&mut self, selector: &str, index: usize) -> &mut FakeElement {
        &mut self
            .elements
            .get_mut(selector)
            .expect("selector present")[index]
    }

    fn check_session(&self) -> DriverResult<()> {
        if *self.session_lost.borrow() || self.closed {
            return Err(DriverError::Session("browser process exited".to_string()));
        }
        Ok(())
    }

    fn lookup(&self, handle: &ElementHandle) -> DriverResult<&FakeElement> {
        self.elements
            .get(handle.selector())
            .and_then(|list| list.get(handle.index()))
            .ok_or_else(|| DriverError::ElementNotFound(handle.to_string()))
    }
}

#[async_trait(?Send)]
impl UiDriver for FakePage {
    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.check_session()?;
        if self.fail_navigation {
            return Err(DriverError::Session(format!("net::ERR_FILE_NOT_FOUND at {}", url)));
        }
        self.navigations.borrow_mut().push(url.to_string());
        Ok(())
    }

    async fn title(&self) -> DriverResult<String> {
        self.check_session()?;
        Ok(self.title.clone())
    }

    async fn find_all(&self, selector: &str) -> DriverResult<Vec<ElementHandle>> {
        self.check_session()?;
        let count = self.elements.get(selector).map(Vec::len).unwrap_or(0);
        Ok((0..count).map(|i| ElementHandle::new(selector, i)).collect())
    }

    async fn click(&self, element: &ElementHandle) -> DriverResult<()> {
        self.check_session()?;
        let target = self.lookup(element)?;
        if target.crashes_session {
            *self.session_lost.borrow_mut() = true;
            return Err(DriverError::Session("target crashed".to_string()));
        }
        if let Some(reason) = &target.click_error {
            return Err(DriverError::Interaction {
                selector: element.selector().to_string(),
                reason: reason.clone(),
            });
        }
        self.clicks.borrow_mut().push(element.clone());
        Ok(())
    }

    async fn attribute(&self, element: &ElementHandle, name: &str) -> DriverResult<Option<String>> {
        self.check_session()?;
        Ok(self.lookup(element)?.attributes.get(name).cloned())
    }

    async fn close(&mut self) -> DriverResult<()> {
        self.closed = true;
        Ok(())
    }
}
