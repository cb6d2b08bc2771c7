//! Warehouse smoke test.
//!
//! Loads credentials, logs in, runs two fixed read-only queries and logs
//! out. The first failure stops the remaining queries; the session is
//! closed whenever one was opened.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use lift_core::AppConfig;

use crate::client::SnowflakeConnector;
use crate::connection::{Connector, LazyConnection};
use crate::error::WarehouseError;

/// First query: proves the session can execute SQL
pub const VERSION_QUERY: &str = "SELECT CURRENT_VERSION()";

/// Second query: reads a few rows of the demo table
pub fn demo_table_query(table: &str, row_limit: u32) -> String {
    format!("SELECT * FROM {} LIMIT {}", table, row_limit)
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepStatus {
    Passed(String),
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmokeStep {
    pub name: &'static str,
    pub status: StepStatus,
}

impl fmt::Display for SmokeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            StepStatus::Passed(detail) => write!(f, "[OK]   {}: {}", self.name, detail),
            StepStatus::Failed(error) => write!(f, "[FAIL] {}: {}", self.name, error),
            StepStatus::Skipped => write!(f, "[SKIP] {}", self.name),
        }
    }
}

/// Step-by-step result of a smoke test run.
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<SmokeStep>,
}

impl SmokeReport {
    /// True when no step failed
    pub fn succeeded(&self) -> bool {
        !self.steps.iter().any(|s| matches!(s.status, StepStatus::Failed(_)))
    }

    /// First failure message, for a one-line banner
    pub fn first_error(&self) -> Option<&str> {
        self.steps.iter().find_map(|s| match &s.status {
            StepStatus::Failed(e) => Some(e.as_str()),
            _ => None,
        })
    }

    /// Wall-clock time from the first step to the last
    pub fn elapsed(&self) -> Duration {
        self.finished_at - self.started_at
    }

    pub fn summary(&self) -> String {
        match self.first_error() {
            None => "Warehouse connection OK".to_string(),
            Some(e) => format!("Warehouse check failed: {}", e),
        }
    }
}

const STEP_CREDENTIALS: &str = "Load credentials";
const STEP_CONNECT: &str = "Connect";
const STEP_VERSION: &str = "Query warehouse version";
const STEP_DEMO_TABLE: &str = "Read demo table";
const STEP_CLOSE: &str = "Close session";

struct StepLog {
    started_at: DateTime<Utc>,
    steps: Vec<SmokeStep>,
}

impl StepLog {
    fn new() -> Self {
        StepLog {
            started_at: Utc::now(),
            steps: Vec::new(),
        }
    }

    fn pass(&mut self, name: &'static str, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::info!(step = name, %detail, "smoke test step passed");
        self.steps.push(SmokeStep { name, status: StepStatus::Passed(detail) });
    }

    fn fail(&mut self, name: &'static str, error: &WarehouseError) {
        tracing::warn!(step = name, %error, "smoke test step failed");
        self.steps.push(SmokeStep { name, status: StepStatus::Failed(error.to_string()) });
    }

    fn skip(&mut self, names: &[&'static str]) {
        for &name in names {
            self.steps.push(SmokeStep { name, status: StepStatus::Skipped });
        }
    }

    fn finish(self) -> SmokeReport {
        SmokeReport {
            started_at: self.started_at,
            finished_at: Utc::now(),
            steps: self.steps,
        }
    }
}

/// Run the smoke test against the warehouse named in `config`.
pub async fn run_smoke_test(config: AppConfig) -> SmokeReport {
    let mut log = StepLog::new();

    let connector = config
        .warehouse()
        .map_err(WarehouseError::from)
        .and_then(|wh| SnowflakeConnector::new(wh.clone()).map(|c| (c, wh.demo_table.clone(), wh.row_limit)));

    match connector {
        Ok((connector, table, row_limit)) => {
            log.pass(STEP_CREDENTIALS, format!("account {}", connector_account(&config)));
            run_steps(connector, &table, row_limit, log).await
        }
        Err(e) => {
            log.fail(STEP_CREDENTIALS, &e);
            log.skip(&[STEP_CONNECT, STEP_VERSION, STEP_DEMO_TABLE, STEP_CLOSE]);
            log.finish()
        }
    }
}

fn connector_account(config: &AppConfig) -> String {
    config
        .warehouse
        .as_ref()
        .map(|wh| wh.account.clone())
        .unwrap_or_default()
}

/// Run the connect / query / close steps with any connector.
pub async fn run_with<C: Connector>(connector: C, demo_table: &str, row_limit: u32) -> SmokeReport {
    run_steps(connector, demo_table, row_limit, StepLog::new()).await
}

async fn run_steps<C: Connector>(connector: C, demo_table: &str, row_limit: u32, mut log: StepLog) -> SmokeReport {
    let mut connection = LazyConnection::new(connector);

    if let Err(e) = connection.session().await {
        log.fail(STEP_CONNECT, &e);
        log.skip(&[STEP_VERSION, STEP_DEMO_TABLE, STEP_CLOSE]);
        return log.finish();
    }
    log.pass(STEP_CONNECT, "session opened");

    let queries_ok = match connection.query(VERSION_QUERY).await {
        Ok(result) => {
            log.pass(STEP_VERSION, format!("version {}", result.first_value().unwrap_or("unknown")));
            true
        }
        Err(e) => {
            log.fail(STEP_VERSION, &e);
            false
        }
    };

    if queries_ok {
        match connection.query(&demo_table_query(demo_table, row_limit)).await {
            Ok(result) => log.pass(
                STEP_DEMO_TABLE,
                format!("{} row(s) from {} ({})", result.row_count(), demo_table, result.columns.join(", ")),
            ),
            Err(e) => log.fail(STEP_DEMO_TABLE, &e),
        }
    } else {
        log.skip(&[STEP_DEMO_TABLE]);
    }

    match connection.close().await {
        Ok(()) => log.pass(STEP_CLOSE, "session closed"),
        Err(e) => log.fail(STEP_CLOSE, &e),
    }
    log.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::WarehouseSession;
    use crate::wire::QueryResult;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeWarehouse {
        refuse_login: bool,
        failing_sql: Option<&'static str>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeWarehouse {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    struct FakeSession(FakeWarehouse);

    impl Connector for FakeWarehouse {
        type Session = FakeSession;

        async fn connect(&self) -> Result<FakeSession, WarehouseError> {
            self.record("connect");
            if self.refuse_login {
                return Err(WarehouseError::LoginRejected {
                    code: "390100".to_string(),
                    message: "Incorrect username or password was specified.".to_string(),
                });
            }
            Ok(FakeSession(self.clone()))
        }
    }

    impl WarehouseSession for FakeSession {
        async fn query(&mut self, sql: &str) -> Result<QueryResult, WarehouseError> {
            self.0.record(sql);
            if self.0.failing_sql.is_some_and(|bad| sql.starts_with(bad)) {
                return Err(WarehouseError::QueryFailed {
                    code: "2003".to_string(),
                    message: "Object does not exist".to_string(),
                });
            }
            Ok(QueryResult {
                query_id: Some("q-1".to_string()),
                columns: vec!["VALUE".to_string()],
                rows: vec![vec![Some("8.40.1".to_string())], vec![None]],
            })
        }

        async fn close(self) -> Result<(), WarehouseError> {
            self.0.record("close");
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_success_runs_both_queries_then_closes() {
        let warehouse = FakeWarehouse::default();
        let report = run_with(warehouse.clone(), "SLAB_JOBS", 5).await;

        assert!(report.succeeded());
        assert_eq!(
            warehouse.calls(),
            vec!["connect", VERSION_QUERY, "SELECT * FROM SLAB_JOBS LIMIT 5", "close"]
        );
        assert_eq!(report.steps[1].status, StepStatus::Passed("version 8.40.1".to_string()));
        assert_eq!(report.summary(), "Warehouse connection OK");
        assert!(report.finished_at >= report.started_at);
        assert!(report.elapsed() >= Duration::zero());
    }

    #[tokio::test]
    async fn test_query_failure_still_closes() {
        let warehouse = FakeWarehouse {
            failing_sql: Some("SELECT * FROM"),
            ..FakeWarehouse::default()
        };
        let report = run_with(warehouse.clone(), "MISSING", 10).await;

        assert!(!report.succeeded());
        assert_eq!(warehouse.calls().last().map(String::as_str), Some("close"));
        assert_eq!(report.steps.last().map(|s| s.status.clone()), Some(StepStatus::Passed("session closed".to_string())));
        assert!(report.first_error().unwrap().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_version_failure_skips_demo_table() {
        let warehouse = FakeWarehouse {
            failing_sql: Some(VERSION_QUERY),
            ..FakeWarehouse::default()
        };
        let report = run_with(warehouse.clone(), "SLAB_JOBS", 10).await;

        assert_eq!(warehouse.calls(), vec!["connect", VERSION_QUERY, "close"]);
        assert_eq!(report.steps[2].status, StepStatus::Skipped);
    }

    #[tokio::test]
    async fn test_login_failure_reports_and_skips() {
        let warehouse = FakeWarehouse {
            refuse_login: true,
            ..FakeWarehouse::default()
        };
        let report = run_with(warehouse.clone(), "SLAB_JOBS", 10).await;

        assert_eq!(warehouse.calls(), vec!["connect"]);
        assert!(report.summary().contains("Incorrect username"));
        assert!(report.steps[1..].iter().all(|s| s.status == StepStatus::Skipped));
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let report = run_smoke_test(AppConfig::default()).await;

        assert!(!report.succeeded());
        assert_eq!(report.steps[0].name, STEP_CREDENTIALS);
        assert!(report.first_error().unwrap().contains("snowflake"));
        assert_eq!(report.steps.len(), 5);
    }

    #[tokio::test]
    async fn test_lazy_connection_connects_once() {
        let warehouse = FakeWarehouse::default();
        let mut connection = LazyConnection::new(warehouse.clone());
        assert!(!connection.is_open());

        connection.query("SELECT 1").await.unwrap();
        connection.query("SELECT 2").await.unwrap();
        assert!(connection.is_open());
        connection.close().await.unwrap();

        assert_eq!(warehouse.calls(), vec!["connect", "SELECT 1", "SELECT 2", "close"]);
    }

    #[test]
    fn test_step_display() {
        let step = SmokeStep {
            name: STEP_CONNECT,
            status: StepStatus::Failed("network error: timed out".to_string()),
        };
        assert_eq!(step.to_string(), "[FAIL] Connect: network error: timed out");
    }
}
