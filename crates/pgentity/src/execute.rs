//! Execution adapter: run a [`Statement`] and normalize the response.

use crate::client::{DriverResponse, GenericClient};
use crate::config::TraceOptions;
use crate::error::{OrmError, OrmResult};
use crate::statement::Statement;
use crate::value::Record;
use serde::Serialize;
use std::time::Instant;

/// Normalized result of one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub rows: Vec<Record>,
    pub row_count: u64,
    /// Pagination total, when the statement carried a window count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl From<DriverResponse> for Response {
    fn from(res: DriverResponse) -> Self {
        let row_count = res.rows_affected.unwrap_or(res.rows.len() as u64);
        Self {
            rows: res.rows,
            row_count,
            total: None,
        }
    }
}

/// Run `stmt` on `conn`.
///
/// The statement and its arguments are traced at debug level on the
/// `pgentity.sql` target before execution; elapsed time and the response
/// after. Any failure comes back as [`OrmError::Backend`].
pub async fn execute<C: GenericClient>(
    conn: &C,
    stmt: &Statement,
    trace: &TraceOptions,
) -> OrmResult<Response> {
    let sql = collapse_whitespace(&stmt.query);
    tracing::debug!(
        target: "pgentity.sql",
        sql = %truncate(&sql, trace.max_sql_length),
        args = %serde_json::to_string(&stmt.args).unwrap_or_default(),
        param_count = stmt.args.len(),
        "execute"
    );

    let start = Instant::now();
    let res = conn
        .query(&stmt.query, &stmt.args)
        .await
        .map_err(OrmError::backend)?;
    let response = Response::from(res);

    tracing::debug!(
        target: "pgentity.sql",
        elapsed_ms = start.elapsed().as_millis() as u64,
        row_count = response.row_count,
        response = %serde_json::to_string(&response).unwrap_or_default(),
        "executed"
    );
    Ok(response)
}

/// Drop newlines and collapse runs of whitespace to one space.
pub(crate) fn collapse_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => {
            let mut end = max;
            while end > 0 && !sql.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &sql[..end])
        }
        _ => sql.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            collapse_whitespace("SELECT a,\n    b\tFROM  t\n"),
            "SELECT a, b FROM t"
        );
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate("SELECT 1", None), "SELECT 1");
        assert_eq!(truncate("SELECT 1", Some(6)), "SELECT...");
        assert_eq!(truncate("éé", Some(1)), "...");
    }

    #[test]
    fn row_count_prefers_command_tag() {
        let res = DriverResponse {
            rows: vec![],
            rows_affected: Some(3),
            columns: vec![],
        };
        assert_eq!(Response::from(res).row_count, 3);
    }
}
