//! [`SqlEntity`]: a table described by its properties.
//!
//! The entity owns its property list and a [`ColumnRegistry`] built from it.
//! `build_*` methods return statements without touching a connection; the
//! async operations build, chunk and execute them through any
//! [`GenericClient`].
//!
//! ```ignore
//! use pgentity::{Connection, Consumer, Property, PropertyType, SelectRequest, SqlEntity};
//!
//! let persons = SqlEntity::new("persons", vec![
//!     Property::new("name", PropertyType::String),
//!     Property::new("age", PropertyType::Integer),
//! ])?;
//!
//! // A transaction, when the caller has one, wins over the pool.
//! let conn = Connection::pick(tx.as_ref(), &pool);
//! let page = persons.get(&conn, &SelectRequest::new().page(0, 10)).await?;
//! let added = persons.add(&conn, &rows, Some(&Consumer::new(1, "admin"))).await?;
//! ```

use crate::builder::{ColumnBuilder, Consumer, delete};
use crate::clause::SortOrder;
use crate::client::GenericClient;
use crate::config::EntityOptions;
use crate::error::{OrmError, OrmResult};
use crate::execute::{Response, execute};
use crate::filter::{self, Filters};
use crate::property::{Operation, Property};
use crate::registry::ColumnRegistry;
use crate::request::SelectRequest;
use crate::statement::Statement;
use crate::summary::{self, EntityStats};
use crate::value::{Record, Value};

/// Column holding the window count of a paginated SELECT.
const TOTAL: &str = "total";

/// Flag set by [`SqlEntity::archive`].
const ARCHIVED: &str = "archived";

/// A table described by its properties.
#[derive(Debug, Clone)]
pub struct SqlEntity {
    name: String,
    table: String,
    properties: Vec<Property>,
    registry: ColumnRegistry,
    options: EntityOptions,
}

impl SqlEntity {
    /// Create an entity whose table has the entity's name.
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> OrmResult<Self> {
        Self::with_options(name, properties, EntityOptions::default())
    }

    pub fn with_options(
        name: impl Into<String>,
        properties: Vec<Property>,
        options: EntityOptions,
    ) -> OrmResult<Self> {
        let name = name.into();
        check_table(&name)?;
        options.validate()?;

        tracing::info!(target: "pgentity", entity = %name, "Creating SQLEntity");
        let registry = ColumnRegistry::from_properties(&properties);
        let entity = Self {
            table: name.clone(),
            name,
            properties,
            registry,
            options,
        };

        if entity.options.log_summary {
            tracing::info!(target: "pgentity", entity = %entity.name, "Entity created successfully");
            tracing::info!(target: "pgentity", "Entity Summary:\n{}", entity.summary());
        }
        Ok(entity)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Point the entity at another table. An empty name is rejected.
    pub fn set_table(&mut self, table: impl Into<String>) -> OrmResult<()> {
        let table = table.into();
        check_table(&table)?;
        self.table = table;
        Ok(())
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.key == key)
    }

    pub fn options(&self) -> &EntityOptions {
        &self.options
    }

    /// Column names used by `op`, see [`ColumnRegistry::columns`].
    pub fn columns(&self, op: Operation) -> Vec<String> {
        self.registry.columns(op)
    }

    pub fn stats(&self) -> EntityStats {
        EntityStats::new(&self.name, &self.table, &self.properties)
    }

    pub fn summary(&self) -> String {
        summary::render(&self.stats(), &self.properties)
    }

    /// Drop filters on unknown or unfilterable properties and filters whose
    /// match mode does not fit the property type.
    pub fn clean_filters(&self, filters: Filters) -> Filters {
        filter::clean_filters(filters, |key| self.property(key))
    }

    // ─── statements ─────────────────────────────────────────────────────────

    /// SELECT over the selectable columns. `filters` are compiled as given;
    /// pass them through [`clean_filters`](Self::clean_filters) first.
    pub fn build_select(
        &self,
        paginate: bool,
        first: u64,
        rows: Option<u64>,
        sort_field: Option<&str>,
        sort_order: SortOrder,
        filters: Option<&Filters>,
    ) -> Statement {
        self.registry.select.build(
            &self.table,
            paginate,
            first,
            rows,
            sort_field,
            sort_order,
            filters,
        )
    }

    pub fn build_insert(
        &self,
        rows: &[Record],
        consumer: Option<&Consumer>,
        returning: Option<&str>,
    ) -> Statement {
        self.registry
            .insert
            .build(&self.table, rows, consumer, returning)
    }

    pub fn build_update(&self, rows: &[Record], consumer: Option<&Consumer>) -> Statement {
        self.registry.update.build(&self.table, rows, consumer)
    }

    pub fn build_delete_by_ids(&self, ids: &[Value]) -> Statement {
        delete::by_ids(&self.table, ids)
    }

    pub fn build_delete_archived_before(&self, date: impl Into<Value>) -> Statement {
        delete::archived_before(&self.table, date)
    }

    /// `RETURNING "<column>"`.
    pub fn returning_clause(&self, column: &str) -> String {
        self.registry.insert.returning(column)
    }

    // ─── operations ─────────────────────────────────────────────────────────

    /// List rows.
    ///
    /// Returns [`OrmError::NotFound`] when nothing matches. With pagination
    /// the window count is moved from every row into [`Response::total`].
    pub async fn get<C: GenericClient>(&self, conn: &C, req: &SelectRequest) -> OrmResult<Response> {
        let filters = self.clean_filters(req.filters.clone());
        tracing::debug!(
            target: "pgentity",
            entity = %self.name,
            first = req.first,
            rows = ?req.rows,
            sort_field = ?req.sort_field,
            sort_order = %req.sort_order,
            pagination = req.pagination,
            filters = %serde_json::to_string(&filters).unwrap_or_default(),
            "get"
        );

        let stmt = self.build_select(
            req.pagination,
            req.first,
            req.rows,
            req.sort_field.as_deref(),
            req.sort_order,
            Some(&filters),
        );
        let mut res = execute(conn, &stmt, &self.options.trace).await?;
        if res.rows.is_empty() {
            return Err(OrmError::not_found("Resource not found"));
        }

        let total = res
            .rows
            .first()
            .and_then(|row| row.get(TOTAL))
            .filter(|v| !v.is_null())
            .and_then(Value::as_i64);
        if let Some(total) = total {
            res.total = u64::try_from(total).ok();
            for row in &mut res.rows {
                row.remove(TOTAL);
            }
        }
        Ok(res)
    }

    /// Insert rows chunk by chunk and return them with their new `id`.
    ///
    /// Returned rows are the input fields plus the consumer fields and `id`,
    /// in input order. A failing chunk stops the batch; earlier chunks stay
    /// applied.
    pub async fn add<C: GenericClient>(
        &self,
        conn: &C,
        rows: &[Record],
        consumer: Option<&Consumer>,
    ) -> OrmResult<Vec<Record>> {
        tracing::debug!(
            target: "pgentity",
            entity = %self.name,
            rows = rows.len(),
            consumer_id = ?consumer.map(|c| &c.id),
            "add"
        );

        let returning = self.returning_clause("id");
        let mut added = Vec::with_capacity(rows.len());
        for chunk in rows.chunks(self.options.chunk_size) {
            let stmt = self.build_insert(chunk, consumer, Some(&returning));
            let res = execute(conn, &stmt, &self.options.trace).await?;
            if res.rows.len() != chunk.len() {
                return Err(OrmError::Other(format!(
                    "INSERT into {} returned {} ids for {} rows",
                    self.table,
                    res.rows.len(),
                    chunk.len()
                )));
            }
            for (row, returned) in chunk.iter().zip(&res.rows) {
                let mut row = row.clone();
                if let Some(consumer) = consumer {
                    row.insert(Consumer::ID.to_string(), consumer.id.clone());
                    row.insert(Consumer::NAME.to_string(), Value::from(consumer.name.clone()));
                }
                row.insert("id".to_string(), returned.get("id").cloned().unwrap_or_default());
                added.push(row);
            }
        }
        Ok(added)
    }

    /// Update rows by id, chunk by chunk. Returns the affected row count.
    pub async fn update<C: GenericClient>(
        &self,
        conn: &C,
        rows: &[Record],
        consumer: Option<&Consumer>,
    ) -> OrmResult<u64> {
        tracing::debug!(
            target: "pgentity",
            entity = %self.name,
            rows = rows.len(),
            consumer_id = ?consumer.map(|c| &c.id),
            "update"
        );
        self.update_chunks(conn, rows, consumer).await
    }

    /// Flag rows as archived: an update with `archived = true` on each row.
    ///
    /// The entity needs an updatable `archived` property.
    pub async fn archive<C: GenericClient>(
        &self,
        conn: &C,
        rows: &[Record],
        consumer: Option<&Consumer>,
    ) -> OrmResult<u64> {
        tracing::debug!(
            target: "pgentity",
            entity = %self.name,
            rows = rows.len(),
            consumer_id = ?consumer.map(|c| &c.id),
            "archive"
        );
        if !self.registry.update.column_keys().contains(&ARCHIVED) {
            return Err(OrmError::validation(format!(
                "entity {} has no updatable `{ARCHIVED}` property",
                self.name
            )));
        }

        let rows: Vec<Record> = rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.insert(ARCHIVED.to_string(), Value::Bool(true));
                row
            })
            .collect();
        self.update_chunks(conn, &rows, consumer).await
    }

    /// Delete rows by id in one statement. Returns the deleted row count.
    pub async fn delete_by_ids<C: GenericClient>(&self, conn: &C, ids: &[Value]) -> OrmResult<u64> {
        tracing::debug!(target: "pgentity", entity = %self.name, ids = ids.len(), "delete");
        let stmt = self.build_delete_by_ids(ids);
        Ok(execute(conn, &stmt, &self.options.trace).await?.row_count)
    }

    /// Delete rows archived before `date`. Returns the deleted row count.
    pub async fn delete_archived<C: GenericClient>(
        &self,
        conn: &C,
        date: impl Into<Value>,
    ) -> OrmResult<u64> {
        tracing::debug!(target: "pgentity", entity = %self.name, "delete archived");
        let stmt = self.build_delete_archived_before(date);
        Ok(execute(conn, &stmt, &self.options.trace).await?.row_count)
    }

    async fn update_chunks<C: GenericClient>(
        &self,
        conn: &C,
        rows: &[Record],
        consumer: Option<&Consumer>,
    ) -> OrmResult<u64> {
        let mut affected = 0;
        for chunk in rows.chunks(self.options.chunk_size) {
            if self
                .registry
                .update
                .assigned_columns(chunk.first(), consumer)
                .is_empty()
            {
                return Err(OrmError::validation(format!(
                    "no updatable column of {} in rows",
                    self.name
                )));
            }
            let stmt = self.build_update(chunk, consumer);
            affected += execute(conn, &stmt, &self.options.trace).await?.row_count;
        }
        Ok(affected)
    }
}

fn check_table(table: &str) -> OrmResult<()> {
    if table.trim().is_empty() {
        return Err(OrmError::validation(
            "table must be a string of length > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Filter, MatchMode};
    use crate::property::PropertyType;

    fn persons() -> SqlEntity {
        SqlEntity::with_options(
            "persons",
            vec![
                Property::new("name", PropertyType::String),
                Property::new("age", PropertyType::Integer),
            ],
            EntityOptions::new().log_summary(false),
        )
        .unwrap()
    }

    #[test]
    fn select_without_clauses() {
        let stmt = persons().build_select(false, 0, None, None, SortOrder::Asc, None);
        assert_eq!(stmt.query, "SELECT name, age FROM persons");
        assert!(stmt.args.is_empty());
    }

    #[test]
    fn select_uses_reassigned_table() {
        let mut p = persons();
        p.set_table("people").unwrap();
        assert_eq!(p.table(), "people");
        assert_eq!(p.name(), "persons");
        let stmt = p.build_select(false, 0, None, None, SortOrder::Asc, None);
        assert_eq!(stmt.query, "SELECT name, age FROM people");
    }

    #[test]
    fn empty_table_is_rejected() {
        let mut p = persons();
        let err = p.set_table("").unwrap_err();
        assert!(matches!(err, OrmError::Validation(_)));
        assert_eq!(p.table(), "persons");
        assert!(SqlEntity::new("", vec![]).is_err());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let res = SqlEntity::with_options("persons", vec![], EntityOptions::new().chunk_size(0));
        assert!(matches!(res, Err(OrmError::Validation(_))));
    }

    #[test]
    fn clean_then_build() {
        let p = persons();
        let filters = Filters::new()
            .with("name", Filter::new("John", MatchMode::StartsWith))
            .with("nope", Filter::new(1, MatchMode::Equals))
            .with("age", Filter::new(30, MatchMode::Contains));
        let filters = p.clean_filters(filters);
        let stmt = p.build_select(false, 0, None, None, SortOrder::Asc, Some(&filters));
        assert_eq!(stmt.query, "SELECT name, age FROM persons WHERE name LIKE $1%");
        assert_eq!(stmt.args, vec![Value::from("John")]);
    }

    #[test]
    fn returning_clause() {
        assert_eq!(persons().returning_clause("id"), r#"RETURNING "id""#);
    }

    #[test]
    fn columns_by_operation() {
        let p = persons();
        assert_eq!(p.columns(Operation::Select), vec!["name", "age"]);
        assert_eq!(
            p.columns(Operation::Insert),
            vec!["name", "age", "consumerId", "consumerName"]
        );
    }
}
