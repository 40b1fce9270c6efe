//! Declarative test case table

use std::time::Duration;
use tracing::{debug, info};

use crate::driver::{present, UiDriver};
use crate::error::CaseError;

/// Placeholder replaced by the element count in count-check details
const COUNT_PLACEHOLDER: &str = "{count}";

/// A single acceptance check and its expectation metadata
#[derive(Debug, Clone)]
pub struct TestCase {
    /// Stable identifier, e.g. `TC01`
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub expected: &'static str,
    pub action: CaseAction,
}

/// What a test case does against the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseAction {
    /// Page title must contain `needle`
    TitleContains { needle: &'static str },

    /// An element matching `selector` must appear within the wait timeout
    ElementPresent {
        selector: &'static str,
        detail: &'static str,
    },

    /// Click every element matching `selector`, reading `attribute` after each
    ClickEach {
        selector: &'static str,
        attribute: &'static str,
        detail: &'static str,
    },

    /// Optionally activate a panel, then require at least `min` matches
    CountAtLeast {
        activate: Option<&'static str>,
        selector: &'static str,
        min: usize,
        /// Success detail; `{count}` is replaced by the match count
        detail: &'static str,
    },
}

/// Timing knobs shared by every case of a run
#[derive(Debug, Clone, Copy)]
pub struct CaseTiming {
    pub wait_timeout: Duration,
    pub settle_delay: Duration,
}

impl CaseAction {
    /// Run the action; `Ok` carries the success detail for the report
    pub async fn execute<D>(&self, driver: &D, timing: CaseTiming) -> Result<String, CaseError>
    where
        D: UiDriver + ?Sized,
    {
        match self {
            CaseAction::TitleContains { needle } => {
                let title = driver.title().await?;
                if !title.contains(needle) {
                    return Err(CaseError::Assertion(format!(
                        "title '{}' does not contain '{}'",
                        title, needle
                    )));
                }
                Ok(format!("Title: {}", title))
            }
            CaseAction::ElementPresent { selector, detail } => {
                driver
                    .wait_until(selector, &present, timing.wait_timeout)
                    .await?;
                Ok(detail.to_string())
            }
            CaseAction::ClickEach {
                selector,
                attribute,
                detail,
            } => {
                // Passes once every click lands; the target panel is not checked.
                let buttons = driver.find_all(selector).await?;
                for button in &buttons {
                    driver.click(button).await?;
                    tokio::time::sleep(timing.settle_delay).await;
                    let target = driver.attribute(button, attribute).await?;
                    info!("    → Switched to {}", target.as_deref().unwrap_or("?"));
                }
                Ok(detail.to_string())
            }
            CaseAction::CountAtLeast {
                activate,
                selector,
                min,
                detail,
            } => {
                if let Some(nav) = activate {
                    let button = driver.find(nav).await?;
                    driver.click(&button).await?;
                }
                let count = driver.find_all(selector).await?.len();
                debug!("{} matched {} element(s)", selector, count);
                if count < *min {
                    return Err(CaseError::Assertion(format!(
                        "expected at least {} element(s) matching '{}', found {}",
                        min, selector, count
                    )));
                }
                Ok(detail.replace(COUNT_PLACEHOLDER, &count.to_string()))
            }
        }
    }
}

/// The Mind Games for Seniors suite, in execution order
///
/// Later cases rely on page state left behind by earlier ones, so the table
/// must not be reordered.
pub fn builtin_suite() -> Vec<TestCase> {
    vec![
        TestCase {
            id: "TC01",
            name: "Verify Homepage Loaded",
            description: "Check if homepage loads successfully",
            expected: "Page title should contain 'Mind Games for Seniors'",
            action: CaseAction::TitleContains {
                needle: "Mind Games for Seniors",
            },
        },
        TestCase {
            id: "TC02",
            name: "Sudoku Default Active",
            description: "Verify Sudoku section is visible by default",
            expected: "Sudoku section should be active",
            action: CaseAction::ElementPresent {
                selector: "#sudoku-game.active",
                detail: "Sudoku section found active",
            },
        },
        TestCase {
            id: "TC03",
            name: "Verify Navigation",
            description: "Ensure game navigation buttons switch between sections",
            expected: "Each click should switch to correct game section",
            action: CaseAction::ClickEach {
                selector: ".game-btn",
                attribute: "data-game",
                detail: "All sections switched successfully",
            },
        },
        TestCase {
            id: "TC04",
            name: "Verify Sudoku Controls",
            description: "Check existence of Sudoku control buttons",
            expected: "New Game, Check, Hint buttons should be present",
            action: CaseAction::CountAtLeast {
                activate: None,
                selector: "#sudoku-game .control-btn",
                min: 3,
                detail: "Found {count} controls",
            },
        },
        TestCase {
            id: "TC05",
            name: "Verify Difficulty Buttons",
            description: "Check Easy, Medium, Hard buttons",
            expected: "Three difficulty buttons should exist",
            action: CaseAction::CountAtLeast {
                activate: None,
                selector: ".difficulty-btn",
                min: 3,
                detail: "Found {count} buttons",
            },
        },
        TestCase {
            id: "TC06",
            name: "Verify Crossword Controls",
            description: "Check Crossword control buttons",
            expected: "New Puzzle, Check, Reveal should be visible",
            action: CaseAction::CountAtLeast {
                activate: Some("[data-game='crossword']"),
                selector: "#crossword-game .control-btn",
                min: 3,
                detail: "Found {count} controls",
            },
        },
        TestCase {
            id: "TC07",
            name: "Verify Memory Game Controls",
            description: "Check Memory game control buttons",
            expected: "New Game and Show All should be visible",
            action: CaseAction::CountAtLeast {
                activate: Some("[data-game='memory']"),
                selector: "#memory-game .control-btn",
                min: 2,
                detail: "Found {count} controls",
            },
        },
        TestCase {
            id: "TC08",
            name: "Verify Mental Health Tips",
            description: "Check Mental Health Tips visibility",
            expected: "Tip cards should appear",
            action: CaseAction::CountAtLeast {
                activate: Some("[data-game='mental-health-tips']"),
                selector: ".mental-health-tips .tip-card",
                min: 1,
                detail: "{count} tips found",
            },
        },
    ]
}
