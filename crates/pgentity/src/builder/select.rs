use super::traits::{Column, ColumnBuilder};
use crate::clause::{self, LogicalOperator, SortOrder};
use crate::filter::{self, Filters};
use crate::ident::quote_ident;
use crate::statement::Statement;

/// SELECT builder.
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    columns: Vec<Column>,
}

impl ColumnBuilder for SelectBuilder {
    fn column_list(&self) -> &[Column] {
        &self.columns
    }

    fn column_list_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `SELECT <cols> FROM <table>`, with a window count when paginating.
    pub fn head(&self, table: &str, paginate: bool) -> String {
        let cols = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.joined_columns()
        };
        let total = if paginate { ", COUNT(*) OVER () AS total" } else { "" };
        format!("SELECT {cols}{total} FROM {}", quote_ident(table))
    }

    /// Build the full statement. `filters` must already be validated.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        &self,
        table: &str,
        paginate: bool,
        first: u64,
        rows: Option<u64>,
        sort_field: Option<&str>,
        sort_order: SortOrder,
        filters: Option<&Filters>,
    ) -> Statement {
        let compiled = filters
            .map(|f| filter::compile(f, 1))
            .unwrap_or_default();

        let mut query = self.head(table, paginate);
        query.push_str(&clause::where_clause(&compiled.conditions, LogicalOperator::And));
        query.push_str(&clause::order_by(sort_field, sort_order));
        query.push_str(&clause::limit(rows, first));

        Statement::new(query, compiled.args)
    }
}
