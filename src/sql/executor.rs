// ABOUTME: Sequential execution of generated SQL statements
// ABOUTME: Stops at the first failing statement, logs it and propagates the error

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use tokio_postgres::Client;

/// Anything that can run a single SQL statement.
///
/// Implementations own their connection handling; the reconciler only hands
/// over statement text one at a time.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<()>;
}

#[async_trait]
impl StatementExecutor for Client {
    async fn execute(&self, sql: &str) -> Result<()> {
        // Statements carry their literals inline, so the simple query protocol is used
        self.batch_execute(sql)
            .await
            .with_context(|| format!("Failed to execute statement: {}", sql))
    }
}

/// Execute statements in order, stopping at the first failure.
///
/// Every statement up to and including the failing one has been sent when an
/// error is returned. Nothing is rolled back.
///
/// # Arguments
///
/// * `executor` - Connection or collaborator that runs each statement
/// * `statements` - Statements in the order they must be applied
///
/// # Examples
///
/// ```
/// # use inventory_reconciler::sql::{query_exec, RecordingExecutor};
/// # async fn example() -> anyhow::Result<()> {
/// let executor = RecordingExecutor::default();
/// query_exec(&executor, &["SELECT 1".to_string()]).await?;
/// assert_eq!(executor.statements(), vec!["SELECT 1".to_string()]);
/// # Ok(())
/// # }
/// ```
pub async fn query_exec<E>(executor: &E, statements: &[String]) -> Result<()>
where
    E: StatementExecutor + ?Sized,
{
    for (index, sql) in statements.iter().enumerate() {
        tracing::debug!("Executing statement {}/{}: {}", index + 1, statements.len(), sql);

        if let Err(e) = executor.execute(sql).await {
            tracing::error!("Failed to execute SQL statements: {:?}", e);
            return Err(e.context(format!(
                "Statement {} of {} failed",
                index + 1,
                statements.len()
            )));
        }
    }

    Ok(())
}

/// Executor that records statements instead of running them.
///
/// Used for dry runs and as a stand-in connection in tests.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    /// Statements received so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
    async fn execute(&self, sql: &str) -> Result<()> {
        self.statements
            .lock()
            .map_err(|_| anyhow::anyhow!("Statement recorder lock poisoned"))?
            .push(sql.to_string());
        Ok(())
    }
}
