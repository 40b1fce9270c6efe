//! Mind Games acceptance test framework
//!
//! This crate drives the Mind Games for Seniors page through a browser
//! session and records every check in a spreadsheet report:
//! - Launches headless Chrome over the DevTools protocol
//! - Runs a fixed, ordered table of checks with per-case failure containment
//! - Streams one styled row per result into the report sheet
//! - Appends a summary block and writes a timestamped `.xlsx` file
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Acceptance Runner (Rust)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── ChromeDriver::launch() -> impl UiDriver              │
//! │    ├── CaseRunner::run(cases)  ── ResultLogger ──┐          │
//! │    ├── append_summary(sink)                      ▼          │
//! │    └── finalize(sink) -> Test_Report_<ts>.xlsx  ReportSink  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestCase table                                             │
//! │    ├── id, name, description, expected                      │
//! │    └── action: CaseAction                                   │
//! │          ├── TitleContains { needle }                       │
//! │          ├── ElementPresent { selector }                    │
//! │          ├── ClickEach { selector, attribute }              │
//! │          └── CountAtLeast { activate?, selector, min }      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod chrome;
pub mod config;
pub mod driver;
pub mod error;
pub mod report;
pub mod runner;
pub mod spec;
pub mod xlsx;

pub use config::{BrowserSettings, RunnerConfig};
pub use driver::{ElementHandle, UiDriver};
pub use error::{CaseError, DriverError, DriverResult, RunError, RunResult};
pub use report::{ReportSheet, ReportSink, ResultLogger};
pub use runner::{CaseRunner, RunReport, TestRunner};
pub use spec::{builtin_suite, CaseAction, CaseTiming, TestCase};
