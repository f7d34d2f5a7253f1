use crate::ident::quote_ident;

/// A registered column: the property key and its SQL spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Property name, used to read values from rows.
    pub key: String,
    /// Quoted form written into statements.
    pub sql: String,
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let sql = quote_ident(&key);
        Self { key, sql }
    }

    /// A column written exactly as its key, without quoting.
    pub fn raw(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            sql: key.clone(),
            key,
        }
    }
}

/// Shared column bookkeeping of the statement builders.
///
/// Columns are registered once while the entity is built and keep their
/// registration order.
pub trait ColumnBuilder {
    fn column_list(&self) -> &[Column];

    fn column_list_mut(&mut self) -> &mut Vec<Column>;

    /// Register a column. Registering the same key twice is a no-op.
    fn add_column(&mut self, key: &str) {
        if self.column_list().iter().any(|c| c.key == key) {
            return;
        }
        self.column_list_mut().push(Column::new(key));
    }

    /// Registered property names in order.
    fn column_keys(&self) -> Vec<&str> {
        self.column_list().iter().map(|c| c.key.as_str()).collect()
    }

    /// Comma-joined quoted column names.
    fn joined_columns(&self) -> String {
        self.column_list()
            .iter()
            .map(|c| c.sql.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
