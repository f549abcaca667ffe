//! Scenarios that need a reachable PostgreSQL server. Ignored by default;
//! run with `TEST_DATABASE_URL` (or `DATABASE_URL`) pointed at a disposable
//! server and `cargo test -- --ignored`.

use std::sync::Arc;

use diesel::prelude::*;
use pg_testdb::{Config, MigrationTool, TracingTestContext};

fn load_env() {
    let _ = dotenvy::dotenv();
}

#[tokio::test]
#[ignore = "needs a reachable PostgreSQL server via TEST_DATABASE_URL"]
async fn smoke_select_one() {
    load_env();
    let ctx = Arc::new(TracingTestContext);
    let config = Config::builder().build().unwrap();

    let pool = pg_testdb::setup(ctx, config).await;
    let mut conn = pool.get().unwrap();
    let result = diesel::sql_query("SELECT 1").execute(&mut conn);
    assert!(result.is_ok());
}

#[tokio::test]
#[ignore = "needs a reachable PostgreSQL server and a Tern migration directory via TEST_DATABASE_URL"]
async fn tern_migrations_create_the_users_table() {
    load_env();
    let ctx = Arc::new(TracingTestContext);
    let config = Config::builder()
        .migration_dir("tests/fixtures/tern_migrations")
        .migration_tool(MigrationTool::Tern)
        .build()
        .unwrap();

    let pool = pg_testdb::setup(ctx, config).await;
    let mut conn = pool.get().unwrap();

    #[derive(QueryableByName)]
    struct Exists {
        #[diesel(sql_type = diesel::sql_types::Bool)]
        exists: bool,
    }

    let row: Exists = diesel::sql_query(
        "SELECT EXISTS(SELECT FROM information_schema.tables WHERE table_name = 'users') AS exists",
    )
    .get_result(&mut conn)
    .unwrap();

    assert!(row.exists);
}

#[tokio::test]
#[ignore = "needs a reachable PostgreSQL server via TEST_DATABASE_URL"]
async fn two_databases_see_independent_rows() {
    load_env();

    let pool_a = pg_testdb::setup(Arc::new(TracingTestContext), Config::builder().build().unwrap()).await;
    let pool_b = pg_testdb::setup(Arc::new(TracingTestContext), Config::builder().build().unwrap()).await;

    for pool in [&pool_a, &pool_b] {
        let mut conn = pool.get().unwrap();
        diesel::sql_query("CREATE TABLE t (id int)").execute(&mut conn).unwrap();
        diesel::sql_query("INSERT INTO t VALUES (1)").execute(&mut conn).unwrap();
    }

    for pool in [&pool_a, &pool_b] {
        let mut conn = pool.get().unwrap();
        #[derive(QueryableByName)]
        struct Count {
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            count: i64,
        }
        let row: Count = diesel::sql_query("SELECT COUNT(*) AS count FROM t")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(row.count, 1);
    }
}

#[tokio::test]
#[ignore = "needs a reachable PostgreSQL server via TEST_DATABASE_URL"]
async fn oversized_prefix_is_rejected_before_touching_the_server() {
    load_env();
    let err = Config::builder().db_prefix("l".repeat(40)).build().unwrap_err();
    assert!(err.to_string().contains("34"));
}

#[tokio::test]
#[ignore = "needs a reachable PostgreSQL server and should be run with #[should_panic] semantics"]
async fn missing_migration_directory_fails_acquisition() {
    load_env();
    let ctx = Arc::new(TracingTestContext);
    let config = Config::builder()
        .migration_dir("/nonexistent/path")
        .migration_tool(MigrationTool::Tern)
        .build()
        .unwrap();

    // This panics through `ctx.fatal`; run under `#[should_panic(expected = "migrations failed")]`
    // in a dedicated harness since `#[tokio::test]` and `#[should_panic]` interact poorly together.
    let _ = pg_testdb::setup(ctx, config).await;
}
