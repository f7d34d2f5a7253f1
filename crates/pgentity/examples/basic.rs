//! Basic usage example for pgentity
//!
//! Run with: cargo run --example basic -p pgentity
//!
//! Connection settings come from DB_HOST, DB_USER, DB_PWD, DB_NAME and
//! DB_PORT, in a .env file or the environment.

use pgentity::{
    Connection, Consumer, DbConfig, Filter, Filters, MatchMode, Operation, OrmError, Property,
    PropertyType, SelectRequest, SortOrder, SqlEntity, Value, create_pool, record,
};

#[tokio::main]
async fn main() -> Result<(), OrmError> {
    // Load .env file
    dotenvy::dotenv().ok();

    let pool = create_pool(&DbConfig::from_env()?)?;

    // Setup: consumer columns are written unquoted, so they fold to lower case.
    let client = pool.get().await?;
    client
        .batch_execute(
            "DROP TABLE IF EXISTS persons;
             CREATE TABLE persons (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                age INT,
                archived BOOLEAN NOT NULL DEFAULT FALSE,
                \"archivedAt\" TIMESTAMPTZ,
                consumerid BIGINT,
                consumername TEXT
             )",
        )
        .await
        .map_err(OrmError::from_db_error)?;
    drop(client);

    let persons = SqlEntity::new(
        "persons",
        vec![
            Property::new("id", PropertyType::Integer)
                .operations([Operation::Select, Operation::Delete]),
            Property::new("name", PropertyType::String),
            Property::new("age", PropertyType::Integer),
            Property::new("archived", PropertyType::Boolean)
                .filterable(false)
                .operations([Operation::Select, Operation::Update]),
        ],
    )?;

    // ============================================
    // Example 1: Batch insert
    // ============================================
    println!("=== Batch insert ===");

    let added = persons
        .add(
            &pool,
            &[
                record! { "name" => "John", "age" => 30 },
                record! { "name" => "Jane", "age" => 28 },
                record! { "name" => "Henry", "age" => 40 },
            ],
            Some(&Consumer::new(1, "example")),
        )
        .await?;
    for row in &added {
        println!("Inserted: {row:?}");
    }

    // ============================================
    // Example 2: Filtered, paginated select
    // ============================================
    println!("\n=== Filtered select ===");

    let req = SelectRequest::new()
        .page(0, 10)
        .paginate(true)
        .sort("age", SortOrder::Desc)
        .filters(Filters::new().with("age", Filter::new(29, MatchMode::Gte)));
    let page = persons.get(&pool, &req).await?;
    println!("Total: {:?}", page.total);
    for row in &page.rows {
        println!("Found: {row:?}");
    }

    // ============================================
    // Example 3: Batch update inside a transaction
    // ============================================
    println!("\n=== Update in a transaction ===");

    let mut client = pool.get().await?;
    let tx = client
        .transaction()
        .await
        .map_err(OrmError::from_db_error)?;
    let conn = Connection::pick(Some(&tx), &pool);

    let updates: Vec<_> = added
        .iter()
        .map(|row| {
            let age = row["age"].as_i64().unwrap_or(0) + 1;
            record! { "id" => row["id"].clone(), "age" => age }
        })
        .collect();
    let editor = Consumer::new(2, "editor");
    let n = persons.update(&conn, &updates, Some(&editor)).await?;
    println!("Updated {n} rows");

    let n = persons.archive(&conn, &updates[..1], Some(&editor)).await?;
    println!("Archived {n} rows");
    tx.commit().await.map_err(OrmError::from_db_error)?;
    drop(client);

    // ============================================
    // Example 4: Delete
    // ============================================
    println!("\n=== Delete ===");

    let ids: Vec<Value> = added.iter().map(|row| row["id"].clone()).collect();
    let n = persons.delete_by_ids(&pool, &ids[1..]).await?;
    println!("Deleted {n} rows");

    let n = persons
        .delete_archived(&pool, chrono::Utc::now())
        .await?;
    println!("Deleted {n} archived rows (none have archivedAt set)");

    println!("\n=== Entity summary ===");
    println!("{}", persons.summary());

    Ok(())
}
