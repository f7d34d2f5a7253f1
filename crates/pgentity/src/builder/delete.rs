use crate::ident::quote_ident;
use crate::statement::Statement;
use crate::value::Value;

/// `DELETE FROM <table> WHERE id = ANY($1)` with the ids as one array.
pub fn by_ids(table: &str, ids: &[Value]) -> Statement {
    Statement::new(
        format!("DELETE FROM {} WHERE id = ANY($1)", quote_ident(table)),
        vec![Value::Array(ids.to_vec())],
    )
}

/// `DELETE FROM <table> WHERE "archivedAt" < $1`.
pub fn archived_before(table: &str, date: impl Into<Value>) -> Statement {
    Statement::new(
        format!(
            "DELETE FROM {} WHERE {} < $1",
            quote_ident(table),
            quote_ident("archivedAt")
        ),
        vec![date.into()],
    )
}
