//! Connection pool utilities

use crate::config::DbConfig;
use crate::error::{OrmError, OrmResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create the shared pool from [`DbConfig`].
///
/// ```ignore
/// let pool = pgentity::create_pool(&pgentity::DbConfig::from_env()?)?;
/// let page = persons.get(&pool, &request).await?;
/// ```
pub fn create_pool(config: &DbConfig) -> OrmResult<Pool> {
    build(config.pg_config(), config.max_size)
}

/// Create a pool from a database URL.
pub fn create_pool_from_url(database_url: &str, max_size: usize) -> OrmResult<Pool> {
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| OrmError::Connection(e.to_string()))?;
    build(pg_config, max_size)
}

fn build(pg_config: tokio_postgres::Config, max_size: usize) -> OrmResult<Pool> {
    let mgr = Manager::from_config(pg_config, NoTls, default_manager_config());
    Pool::builder(mgr)
        .max_size(max_size)
        .build()
        .map_err(|e| OrmError::Pool(e.to_string()))
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}
