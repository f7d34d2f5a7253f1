use super::Consumer;
use super::traits::{Column, ColumnBuilder};
use crate::ident::quote_ident;
use crate::statement::{Statement, placeholders};
use crate::value::{Record, Value};

/// Multi-row INSERT builder.
///
/// Rows are read by property name; a column missing from a row binds `NULL`.
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    columns: Vec<Column>,
}

impl ColumnBuilder for InsertBuilder {
    fn column_list(&self) -> &[Column] {
        &self.columns
    }

    fn column_list_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}

impl InsertBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `RETURNING "<column>"`.
    pub fn returning(&self, column: &str) -> String {
        format!("RETURNING \"{}\"", column.replace('"', "\"\""))
    }

    /// Build one INSERT for `rows`; callers chunk large sets beforehand.
    ///
    /// With a consumer, `consumerId, consumerName` are appended to the column
    /// list and stamped on every row.
    pub fn build(
        &self,
        table: &str,
        rows: &[Record],
        consumer: Option<&Consumer>,
        returning: Option<&str>,
    ) -> Statement {
        let mut cols: Vec<&str> = self.columns.iter().map(|c| c.sql.as_str()).collect();
        if consumer.is_some() {
            cols.push(Consumer::ID);
            cols.push(Consumer::NAME);
        }
        let width = cols.len();

        let mut args = Vec::with_capacity(rows.len() * width);
        let mut tuples = Vec::with_capacity(rows.len());
        for row in rows {
            tuples.push(format!("({})", placeholders(args.len() + 1, width)));
            for col in &self.columns {
                args.push(row.get(&col.key).cloned().unwrap_or(Value::Null));
            }
            if let Some(consumer) = consumer {
                args.push(consumer.id.clone());
                args.push(Value::from(consumer.name.clone()));
            }
        }

        let mut query = format!(
            "INSERT INTO {} ({}) VALUES {}",
            quote_ident(table),
            cols.join(", "),
            tuples.join(", ")
        );
        if let Some(returning) = returning.filter(|r| !r.is_empty()) {
            query.push(' ');
            query.push_str(returning);
        }

        Statement::new(query, args)
    }
}
