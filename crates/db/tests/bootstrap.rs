use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    printq_db::health_check(&pool).await.unwrap();

    // Both tables exist and are queryable (empty on a fresh database).
    for table in ["print_jobs", "print_job_status_events"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The enum labels in the database match the Rust-side wire names.
#[sqlx::test(migrations = "../../migrations")]
async fn test_enum_labels_match(pool: PgPool) {
    let statuses: Vec<(String,)> =
        sqlx::query_as("SELECT unnest(enum_range(NULL::print_job_status))::text")
            .fetch_all(&pool)
            .await
            .unwrap();
    let labels: Vec<&str> = statuses.iter().map(|(s,)| s.as_str()).collect();
    assert_eq!(
        labels,
        ["pending", "generating", "ready", "printing", "done", "error"]
    );

    let types: Vec<(String,)> =
        sqlx::query_as("SELECT unnest(enum_range(NULL::print_job_type))::text")
            .fetch_all(&pool)
            .await
            .unwrap();
    let labels: Vec<&str> = types.iter().map(|(s,)| s.as_str()).collect();
    assert_eq!(labels, ["shipping_docs", "upload"]);
}
