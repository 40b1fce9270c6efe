//! Main test runner that drives the case table and builds the report

use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use mindgames_common::{Status, Summary, TestResult};

use crate::chrome::ChromeDriver;
use crate::config::RunnerConfig;
use crate::driver::UiDriver;
use crate::error::{CaseError, RunError, RunResult};
use crate::report::{append_summary, finalize, ReportSink, ResultLogger};
use crate::spec::{builtin_suite, CaseTiming, TestCase};

/// Executes test cases in order against one driver session, logging each
/// result as soon as it is known
pub struct CaseRunner<'a, D: UiDriver + ?Sized, S: ReportSink + ?Sized> {
    driver: &'a D,
    logger: ResultLogger<'a, S>,
    timing: CaseTiming,
}

impl<'a, D: UiDriver + ?Sized, S: ReportSink + ?Sized> CaseRunner<'a, D, S> {
    pub fn new(driver: &'a D, sink: &'a mut S, timing: CaseTiming) -> Self {
        Self {
            driver,
            logger: ResultLogger::new(sink),
            timing,
        }
    }

    /// Run a single case and log its result
    ///
    /// Only a fatal session failure is returned as an error; every other
    /// failure becomes a FAIL result.
    pub async fn run_case(&mut self, case: &TestCase) -> RunResult<TestResult> {
        let start = Instant::now();
        debug!("Running test: {} {}", case.id, case.name);

        let (status, actual) = match case.action.execute(self.driver, self.timing).await {
            Ok(detail) => {
                info!(
                    "✓ {}: {} ({} ms)",
                    case.id,
                    case.name,
                    start.elapsed().as_millis()
                );
                (Status::Pass, detail)
            }
            Err(CaseError::Driver(e)) if e.is_fatal() => {
                error!("✗ {}: {} - {}", case.id, case.name, e);
                return Err(RunError::Session {
                    case: case.id.to_string(),
                    source: e,
                });
            }
            Err(e) => {
                warn!("✗ {}: {} - {}", case.id, case.name, e);
                (Status::Fail, e.to_string())
            }
        };

        let result = TestResult {
            id: case.id.to_string(),
            name: case.name.to_string(),
            description: case.description.to_string(),
            expected: case.expected.to_string(),
            actual,
            status,
        };
        self.logger.log(&result)?;
        Ok(result)
    }

    /// Run every case in declared order
    pub async fn run(&mut self, cases: &[TestCase]) -> RunResult<()> {
        info!("Running {} test(s)...", cases.len());
        for case in cases {
            self.run_case(case).await?;
        }
        Ok(())
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: Summary,
    pub report_path: PathBuf,
}

/// Owns a run from browser launch to report persistence
pub struct TestRunner {
    config: RunnerConfig,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Launch Chrome, run the built-in suite and write the report
    pub async fn run<S: ReportSink + ?Sized>(&self, sink: &mut S) -> RunResult<RunReport> {
        self.config.validate()?;
        let url = self.config.page_url()?;
        let mut driver = ChromeDriver::launch(&self.config.browser).await?;
        self.run_with(&mut driver, sink, &url, &builtin_suite()).await
    }

    /// Run `cases` on an already launched driver
    ///
    /// The driver is closed and the sink persisted on every path; after a
    /// fatal failure the report holds the rows logged so far and no summary.
    pub async fn run_with<D, S>(
        &self,
        driver: &mut D,
        sink: &mut S,
        url: &str,
        cases: &[TestCase],
    ) -> RunResult<RunReport>
    where
        D: UiDriver + ?Sized,
        S: ReportSink + ?Sized,
    {
        let outcome = self.execute(&*driver, sink, url, cases).await;

        if let Err(e) = driver.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        let persisted = finalize(sink, &self.config.output_dir);
        let summary = match outcome {
            Ok(summary) => summary,
            Err(e) => {
                if let Err(report_err) = persisted {
                    warn!("Partial report not written: {}", report_err);
                }
                return Err(e);
            }
        };

        Ok(RunReport {
            summary,
            report_path: persisted?,
        })
    }

    async fn execute<D, S>(
        &self,
        driver: &D,
        sink: &mut S,
        url: &str,
        cases: &[TestCase],
    ) -> RunResult<Summary>
    where
        D: UiDriver + ?Sized,
        S: ReportSink + ?Sized,
    {
        info!("Opening {}", url);
        driver
            .navigate(url)
            .await
            .map_err(|source| RunError::Navigation {
                url: url.to_string(),
                source,
            })?;

        let timing = CaseTiming {
            wait_timeout: self.config.wait_timeout(),
            settle_delay: self.config.settle_delay(),
        };
        CaseRunner::new(driver, sink, timing).run(cases).await?;

        Ok(append_summary(sink)?)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}
