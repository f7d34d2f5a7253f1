//! Connection seam.
//!
//! [`GenericClient`] is the one thing the execution adapter needs from a
//! connection: run `(sql, args)` and hand back decoded rows. It is
//! implemented for plain clients, transactions and (feature `pool`) the
//! deadpool pool and its connections, so callers may pass a transaction
//! anywhere a connection is expected.

use crate::error::{OrmError, OrmResult};
use crate::value::{Record, Value};
use futures_util::TryStreamExt;
use tokio_postgres::Row;

/// What the driver returned for one statement, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverResponse {
    pub rows: Vec<Record>,
    /// Rows affected, as reported by the command tag.
    pub rows_affected: Option<u64>,
    /// Result column names.
    pub columns: Vec<String>,
}

/// A trait that unifies database clients, transactions and pools.
pub trait GenericClient: Send + Sync {
    /// Execute a statement and return its rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = OrmResult<DriverResponse>> + Send;
}

fn decode_row(row: &Row) -> OrmResult<Record> {
    let mut record = Record::new();
    for (i, col) in row.columns().iter().enumerate() {
        let value: Value = row
            .try_get(i)
            .map_err(|e| OrmError::decode(col.name(), e.to_string()))?;
        record.insert(col.name().to_string(), value);
    }
    Ok(record)
}

async fn collect(stream: tokio_postgres::RowStream) -> OrmResult<DriverResponse> {
    let mut stream = std::pin::pin!(stream);
    let mut out = DriverResponse::default();
    while let Some(row) = stream.try_next().await.map_err(OrmError::from_db_error)? {
        if out.columns.is_empty() {
            out.columns = row.columns().iter().map(|c| c.name().to_string()).collect();
        }
        out.rows.push(decode_row(&row)?);
    }
    out.rows_affected = stream.rows_affected();
    Ok(out)
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, args: &[Value]) -> OrmResult<DriverResponse> {
        let stream = tokio_postgres::Client::query_raw(self, sql, args.iter())
            .await
            .map_err(OrmError::from_db_error)?;
        collect(stream).await
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, args: &[Value]) -> OrmResult<DriverResponse> {
        let stream = tokio_postgres::Transaction::query_raw(self, sql, args.iter())
            .await
            .map_err(OrmError::from_db_error)?;
        collect(stream).await
    }
}

/// A caller-supplied connection, or the shared one.
///
/// An external connection (typically a transaction) always wins; it is the
/// only way to make several statements atomic.
#[derive(Debug)]
pub enum Connection<'a, E, S> {
    External(&'a E),
    Shared(&'a S),
}

impl<'a, E, S> Connection<'a, E, S> {
    pub fn pick(external: Option<&'a E>, shared: &'a S) -> Self {
        match external {
            Some(conn) => Connection::External(conn),
            None => Connection::Shared(shared),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Connection::External(_))
    }
}

impl<E: GenericClient, S: GenericClient> GenericClient for Connection<'_, E, S> {
    async fn query(&self, sql: &str, args: &[Value]) -> OrmResult<DriverResponse> {
        match self {
            Connection::External(conn) => conn.query(sql, args).await,
            Connection::Shared(conn) => conn.query(sql, args).await,
        }
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Pool {
    async fn query(&self, sql: &str, args: &[Value]) -> OrmResult<DriverResponse> {
        let client = self.get().await?;
        GenericClient::query(&client, sql, args).await
    }
}

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Client {
    async fn query(&self, sql: &str, args: &[Value]) -> OrmResult<DriverResponse> {
        // Delegate to the deref target (ClientWrapper / tokio_postgres::Client).
        GenericClient::query(&**self, sql, args).await
    }
}

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::ClientWrapper {
    async fn query(&self, sql: &str, args: &[Value]) -> OrmResult<DriverResponse> {
        GenericClient::query(&**self, sql, args).await
    }
}

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, args: &[Value]) -> OrmResult<DriverResponse> {
        GenericClient::query(&**self, sql, args).await
    }
}
