use derive_more::Display;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

/// Unique key that makes the attendance upsert race-free.
pub const ATTENDANCE_KEY: &str = "uq_attendance_student_day_session";

#[derive(Debug, Display)]
pub enum SchemaError {
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
    #[display(
        fmt = "attendance table lacks unique key {}; run the migrations",
        ATTENDANCE_KEY
    )]
    MissingAttendanceKey,
}

impl std::error::Error for SchemaError {}

impl From<sqlx::Error> for SchemaError {
    fn from(e: sqlx::Error) -> Self {
        SchemaError::Database(e)
    }
}

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Applies the schema under `migrations/`.
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Refuses a schema where duplicate attendance rows are possible.
pub async fn verify_schema(pool: &MySqlPool) -> Result<(), SchemaError> {
    let found = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM information_schema.statistics
        WHERE table_schema = DATABASE()
          AND table_name = 'attendance'
          AND index_name = ?
          AND non_unique = 0
        "#,
    )
    .bind(ATTENDANCE_KEY)
    .fetch_one(pool)
    .await?;

    if found == 0 {
        return Err(SchemaError::MissingAttendanceKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a MySQL server at DATABASE_URL"]
    async fn migrated_schema_passes_the_check(pool: MySqlPool) {
        verify_schema(&pool).await.unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a MySQL server at DATABASE_URL"]
    async fn legacy_schema_without_the_key_is_refused(pool: MySqlPool) {
        sqlx::query("ALTER TABLE attendance DROP FOREIGN KEY fk_attendance_student")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("ALTER TABLE attendance DROP INDEX uq_attendance_student_day_session")
            .execute(&pool)
            .await
            .unwrap();

        assert!(matches!(
            verify_schema(&pool).await,
            Err(SchemaError::MissingAttendanceKey)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a MySQL server at DATABASE_URL"]
    async fn upgrade_migration_restores_the_key_on_a_legacy_table(pool: MySqlPool) {
        sqlx::query("ALTER TABLE attendance DROP FOREIGN KEY fk_attendance_student")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("ALTER TABLE attendance DROP INDEX uq_attendance_student_day_session")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("ALTER TABLE students MODIFY face_encoding TEXT NULL")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO students (roll_no, student_name) VALUES ('101', 'Asha')")
            .execute(&pool)
            .await
            .unwrap();
        for time in ["09:00:00", "09:05:00"] {
            sqlx::query(
                "INSERT INTO attendance (student_id, date, time, status, session) \
                 VALUES (1, '2026-03-02', ?, 'Present', 'MORNING')",
            )
            .bind(time)
            .execute(&pool)
            .await
            .unwrap();
        }

        let upgrade = include_str!("../migrations/20260102000000_legacy_upgrade.sql");
        sqlx::raw_sql(upgrade).execute(&pool).await.unwrap();

        verify_schema(&pool).await.unwrap();
        let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }
}
