use car_cost_core::RepositoryError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

/// Read a money or distance column, accepting both INTEGER and REAL storage.
///
/// Rows inserted by hand or by other tools may hold integers in REAL columns.
pub fn get_decimal(
    row: &SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    if value_ref.is_null() {
        return Err(RepositoryError::Database(format!(
            "Column '{}' is NULL",
            column
        )));
    }

    let type_name = value_ref.type_info().name().to_string();
    match type_name.as_str() {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        other => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            other, column
        ))),
    }
}

/// Convert a Decimal to f64 for SQLite storage.
pub fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

    use super::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        sqlx::query(
            "CREATE TABLE amounts (
                id INTEGER PRIMARY KEY,
                int_value INTEGER,
                real_value REAL,
                null_value REAL,
                text_value TEXT
            )",
        )
        .execute(&pool)
        .await
        .expect("Failed to create test table");
        pool
    }

    async fn fetch_column(
        insert: &str,
        column: &str,
    ) -> Result<Decimal, RepositoryError> {
        let pool = setup_test_db().await;
        sqlx::query(insert)
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT * FROM amounts WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        get_decimal(&row, column)
    }

    #[tokio::test]
    async fn test_get_decimal_from_integer() {
        let result = fetch_column(
            "INSERT INTO amounts (id, int_value) VALUES (1, 35000)",
            "int_value",
        )
        .await;

        assert_eq!(result, Ok(dec!(35000)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_real() {
        let result = fetch_column(
            "INSERT INTO amounts (id, real_value) VALUES (1, 16.4)",
            "real_value",
        )
        .await;

        assert_eq!(result, Ok(dec!(16.4)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_bound_f64() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO amounts (id, real_value) VALUES (1, ?)")
            .bind(decimal_to_f64(dec!(0.227)))
            .execute(&pool)
            .await
            .expect("Failed to insert test data");
        let row = sqlx::query("SELECT real_value FROM amounts WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        let result = get_decimal(&row, "real_value");

        assert_eq!(result, Ok(dec!(0.227)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_null_is_an_error() {
        let result = fetch_column(
            "INSERT INTO amounts (id, null_value) VALUES (1, NULL)",
            "null_value",
        )
        .await;

        assert_eq!(
            result,
            Err(RepositoryError::Database("Column 'null_value' is NULL".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_decimal_column_not_found() {
        let result = fetch_column("INSERT INTO amounts (id) VALUES (1)", "missing").await;

        assert!(matches!(result, Err(RepositoryError::Database(msg)) if msg.starts_with("Column 'missing' not found:")));
    }

    #[tokio::test]
    async fn test_get_decimal_unexpected_type() {
        let result = fetch_column(
            "INSERT INTO amounts (id, text_value) VALUES (1, 'Electrique')",
            "text_value",
        )
        .await;

        assert_eq!(
            result,
            Err(RepositoryError::Database(
                "Unexpected type 'TEXT' for column 'text_value'".to_string()
            ))
        );
    }

    #[test]
    fn test_decimal_to_f64() {
        assert_eq!(decimal_to_f64(dec!(-186.65)), -186.65);
        assert_eq!(decimal_to_f64(Decimal::ZERO), 0.0);
        assert_eq!(decimal_to_f64(dec!(0.0001)), 0.0001);
    }
}
