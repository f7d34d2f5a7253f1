//! # pgentity
//!
//! Declarative Postgres entities: describe a table by its properties, get
//! parameterized SELECT/INSERT/UPDATE/DELETE statements and a client-agnostic
//! way to run them.
//!
//! ## Features
//!
//! - **Property metadata**: each property declares its type, whether it can be
//!   filtered on, and which operations use it
//! - **Filter engine**: untrusted `{ field: { value, matchMode } }` filters are
//!   validated against the properties, then compiled to placeholders
//! - **Batch writes**: multi-row INSERT and `CASE`-based multi-row UPDATE,
//!   chunked into bounded statements
//! - **Transaction-friendly**: pass a transaction anywhere a `GenericClient`
//!   is expected, or let [`Connection::pick`] prefer it over a pool
//! - **Tracing**: statements and timings on the `pgentity.sql` target
//!
//! ## Quick start
//!
//! ```ignore
//! use pgentity::{
//!     Consumer, DbConfig, Filter, Filters, MatchMode, Property, PropertyType,
//!     SelectRequest, SqlEntity, create_pool, record,
//! };
//!
//! let pool = create_pool(&DbConfig::from_env()?)?;
//! let persons = SqlEntity::new("persons", vec![
//!     Property::new("name", PropertyType::String),
//!     Property::new("age", PropertyType::Integer),
//! ])?;
//!
//! let added = persons
//!     .add(&pool, &[record! { "name" => "John", "age" => 30 }], Some(&Consumer::new(1, "admin")))
//!     .await?;
//!
//! let req = SelectRequest::new()
//!     .page(0, 10)
//!     .paginate(true)
//!     .filters(Filters::new().with("age", Filter::new(18, MatchMode::Gte)));
//! let page = persons.get(&pool, &req).await?;
//! ```

pub mod builder;
pub mod clause;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod execute;
pub mod filter;
pub mod ident;
pub mod property;
pub mod registry;
pub mod request;
pub mod statement;
pub mod summary;
pub mod value;

pub use builder::Consumer;
pub use clause::{LogicalOperator, SortOrder};
pub use client::{Connection, DriverResponse, GenericClient};
pub use config::{DEFAULT_CHUNK_SIZE, DbConfig, EntityOptions, TraceOptions};
pub use entity::SqlEntity;
pub use error::{OrmError, OrmResult};
pub use execute::{Response, execute};
pub use filter::{Filter, Filters, MatchMode};
pub use ident::quote_ident;
pub use property::{MappedType, Operation, Property, PropertyType};
pub use request::SelectRequest;
pub use statement::Statement;
pub use summary::EntityStats;
pub use value::{Record, Value};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_from_url};
