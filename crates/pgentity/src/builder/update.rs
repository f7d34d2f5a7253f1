use super::Consumer;
use super::traits::{Column, ColumnBuilder};
use crate::ident::quote_ident;
use crate::statement::{Statement, placeholders};
use crate::value::{Record, Value};

/// Batch UPDATE builder: one `CASE` per column, keyed on row id.
///
/// For rows `r1..rN` the first N ordinals bind the ids. Each column present on
/// the first row then takes N fresh ordinals:
///
/// ```text
/// UPDATE persons SET name = CASE WHEN id = $1 THEN $3 WHEN id = $2 THEN $4 ELSE name END
///  WHERE id IN ($1, $2)
/// ```
///
/// The id ordinals are reused in every `CASE` and in the final `IN` list.
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    columns: Vec<Column>,
}

impl ColumnBuilder for UpdateBuilder {
    fn column_list(&self) -> &[Column] {
        &self.columns
    }

    fn column_list_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns a batch would set: registered columns present on `first`, then
    /// the consumer columns when a consumer is given.
    pub fn assigned_columns(&self, first: Option<&Record>, consumer: Option<&Consumer>) -> Vec<Column> {
        let mut cols: Vec<Column> = match first {
            Some(row) => self
                .columns
                .iter()
                .filter(|c| row.contains_key(&c.key))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        if consumer.is_some() {
            // Spelled as in INSERT so both statements name the same columns.
            cols.push(Column::raw(Consumer::ID));
            cols.push(Column::raw(Consumer::NAME));
        }
        cols
    }

    /// Build one UPDATE for `rows`; callers chunk large sets beforehand.
    ///
    /// A row without `id`, or missing a column the first row has, binds
    /// `NULL` for it.
    pub fn build(&self, table: &str, rows: &[Record], consumer: Option<&Consumer>) -> Statement {
        let n = rows.len();
        let cols = self.assigned_columns(rows.first(), consumer);

        let mut args: Vec<Value> = rows
            .iter()
            .map(|row| row.get("id").cloned().unwrap_or(Value::Null))
            .collect();

        let mut sets = Vec::with_capacity(cols.len());
        for col in &cols {
            let mut case = format!("{} = CASE", col.sql);
            for (j, row) in rows.iter().enumerate() {
                args.push(cell(row, &col.key, consumer));
                case.push_str(&format!(" WHEN id = ${} THEN ${}", j + 1, args.len()));
            }
            case.push_str(&format!(" ELSE {} END", col.sql));
            sets.push(case);
        }

        let query = format!(
            "UPDATE {} SET {} WHERE id IN ({})",
            quote_ident(table),
            sets.join(", "),
            placeholders(1, n)
        );
        Statement::new(query, args)
    }
}

fn cell(row: &Record, key: &str, consumer: Option<&Consumer>) -> Value {
    if let Some(consumer) = consumer {
        match key {
            Consumer::ID => return consumer.id.clone(),
            Consumer::NAME => return Value::from(consumer.name.clone()),
            _ => {}
        }
    }
    row.get(key).cloned().unwrap_or(Value::Null)
}
