use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use car_cost_core::{
    CarSpecs, EngineType, Energy, Financing, Insurance, NewQueryRecord, ProjectionInput,
    QueryRecord, QueryRepository, RepositoryError, Resale, Settings, Taxes, Usage,
};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::debug;

use crate::decimal::{decimal_to_f64, get_decimal};

const SELECT_COLUMNS: &str = "SELECT id, name,
        price, eco_bonus, resell, loan, loan_rate_percent, loan_duration_years,
        engine_type, fiscal_power, fuel_consumption, maintenance_cost,
        insurance_cost, fuel_cost, distance_personal, distance_work,
        initial_value, value_at_5_years, taxable_revenue,
        n_years, share_data, created_at
     FROM car_query";

pub struct SqliteQueryRepository {
    pool: SqlitePool,
}

impl SqliteQueryRepository {
    /// Connect to `database_url`, creating the database file if needed.
    ///
    /// Accepts a bare path (`car_cost.db`), a sqlx URL (`sqlite://car_cost.db`)
    /// or `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database location: {}", database_url))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn column<'r, T>(
    row: &'r SqliteRow,
    name: &str,
) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Database(format!("Failed to get {}: {}", name, e)))
}

fn row_to_query_record(row: &SqliteRow) -> Result<QueryRecord, RepositoryError> {
    let engine_code: String = column(row, "engine_type")?;
    let engine_type = EngineType::parse(&engine_code).ok_or_else(|| {
        RepositoryError::Database(format!("Invalid engine type: {}", engine_code))
    })?;

    let input = ProjectionInput {
        name: column(row, "name")?,
        financing: Financing {
            price: get_decimal(row, "price")?,
            eco_bonus: get_decimal(row, "eco_bonus")?,
            resell: get_decimal(row, "resell")?,
            loan: get_decimal(row, "loan")?,
            loan_rate_percent: get_decimal(row, "loan_rate_percent")?,
            loan_duration_years: column(row, "loan_duration_years")?,
        },
        car_specs: CarSpecs {
            engine_type,
            fiscal_power: column(row, "fiscal_power")?,
            fuel_consumption: get_decimal(row, "fuel_consumption")?,
            maintenance_cost: get_decimal(row, "maintenance_cost")?,
        },
        insurance: Insurance {
            insurance_cost: get_decimal(row, "insurance_cost")?,
        },
        energy: Energy {
            fuel_cost: get_decimal(row, "fuel_cost")?,
        },
        usage: Usage {
            distance_personal: get_decimal(row, "distance_personal")?,
            distance_work: get_decimal(row, "distance_work")?,
        },
        resale: Resale {
            initial_value: get_decimal(row, "initial_value")?,
            value_at_5_years: get_decimal(row, "value_at_5_years")?,
        },
        taxes: Taxes {
            taxable_revenue: get_decimal(row, "taxable_revenue")?,
        },
        settings: Settings {
            n_years: column(row, "n_years")?,
            share_data: column(row, "share_data")?,
        },
    };

    Ok(QueryRecord {
        id: column(row, "id")?,
        input,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
    })
}

#[async_trait]
impl QueryRepository for SqliteQueryRepository {
    async fn add_query(
        &self,
        query: NewQueryRecord,
    ) -> Result<i64, RepositoryError> {
        let input = &query.input;
        let result = sqlx::query(
            "INSERT INTO car_query (
                name,
                price, eco_bonus, resell, loan, loan_rate_percent, loan_duration_years,
                engine_type, fiscal_power, fuel_consumption, maintenance_cost,
                insurance_cost, fuel_cost, distance_personal, distance_work,
                initial_value, value_at_5_years, taxable_revenue,
                n_years, share_data, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(decimal_to_f64(input.financing.price))
        .bind(decimal_to_f64(input.financing.eco_bonus))
        .bind(decimal_to_f64(input.financing.resell))
        .bind(decimal_to_f64(input.financing.loan))
        .bind(decimal_to_f64(input.financing.loan_rate_percent))
        .bind(input.financing.loan_duration_years)
        .bind(input.car_specs.engine_type.as_str())
        .bind(input.car_specs.fiscal_power)
        .bind(decimal_to_f64(input.car_specs.fuel_consumption))
        .bind(decimal_to_f64(input.car_specs.maintenance_cost))
        .bind(decimal_to_f64(input.insurance.insurance_cost))
        .bind(decimal_to_f64(input.energy.fuel_cost))
        .bind(decimal_to_f64(input.usage.distance_personal))
        .bind(decimal_to_f64(input.usage.distance_work))
        .bind(decimal_to_f64(input.resale.initial_value))
        .bind(decimal_to_f64(input.resale.value_at_5_years))
        .bind(decimal_to_f64(input.taxes.taxable_revenue))
        .bind(input.settings.n_years)
        .bind(input.settings.share_data)
        .bind(query.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        debug!(id, profile = %input.name, "query recorded");
        Ok(id)
    }

    async fn get_query(
        &self,
        id: i64,
    ) -> Result<QueryRecord, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_query_record(&row)
    }

    async fn list_queries(
        &self,
        limit: u32,
    ) -> Result<Vec<QueryRecord>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_query_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    async fn setup_test_db() -> SqliteQueryRepository {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteQueryRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn submitted_at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn diesel_profile() -> ProjectionInput {
        let mut input = ProjectionInput::default();
        input.name = "Golf TDI".to_string();
        input.financing.price = dec!(27990.50);
        input.financing.loan_rate_percent = dec!(3.9);
        input.car_specs.engine_type = EngineType::Diesel;
        input.car_specs.fiscal_power = 7;
        input.car_specs.fuel_consumption = dec!(4.8);
        input.energy.fuel_cost = dec!(1.72);
        input.settings.share_data = false;
        input
    }

    #[tokio::test]
    async fn test_add_and_get_query() {
        let repo = setup_test_db().await;
        let record = NewQueryRecord {
            input: ProjectionInput::default(),
            created_at: submitted_at(0),
        };

        let id = repo.add_query(record.clone()).await.unwrap();
        let result = repo.get_query(id).await.unwrap();

        assert_eq!(result.id, id);
        assert_eq!(result.input, record.input);
        assert_eq!(result.created_at, record.created_at);
    }

    #[tokio::test]
    async fn test_query_preserves_fractional_amounts_and_engine() {
        let repo = setup_test_db().await;
        let record = NewQueryRecord {
            input: diesel_profile(),
            created_at: submitted_at(0),
        };

        let id = repo.add_query(record.clone()).await.unwrap();
        let result = repo.get_query(id).await.unwrap();

        assert_eq!(result.input.financing.price, dec!(27990.50));
        assert_eq!(result.input.financing.loan_rate_percent, dec!(3.9));
        assert_eq!(result.input.car_specs.engine_type, EngineType::Diesel);
        assert_eq!(result.input.car_specs.fiscal_power, 7);
        assert_eq!(result.input.energy.fuel_cost, dec!(1.72));
        assert!(!result.input.settings.share_data);
    }

    #[tokio::test]
    async fn test_ids_are_distinct() {
        let repo = setup_test_db().await;

        let first = repo
            .add_query(NewQueryRecord::now(ProjectionInput::default()))
            .await
            .unwrap();
        let second = repo
            .add_query(NewQueryRecord::now(ProjectionInput::default()))
            .await
            .unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_get_query_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_query(42).await;

        assert_eq!(result.err(), Some(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_queries_newest_first() {
        let repo = setup_test_db().await;
        for (minutes, name) in [(0, "first"), (10, "second"), (5, "between")] {
            let mut input = ProjectionInput::default();
            input.name = name.to_string();
            repo.add_query(NewQueryRecord {
                input,
                created_at: submitted_at(minutes),
            })
            .await
            .unwrap();
        }

        let result = repo.list_queries(10).await.unwrap();

        let names: Vec<&str> = result.iter().map(|r| r.input.name.as_str()).collect();
        assert_eq!(names, vec!["second", "between", "first"]);
    }

    #[tokio::test]
    async fn test_list_queries_respects_limit() {
        let repo = setup_test_db().await;
        for minutes in 0..5 {
            repo.add_query(NewQueryRecord {
                input: ProjectionInput::default(),
                created_at: submitted_at(minutes),
            })
            .await
            .unwrap();
        }

        let result = repo.list_queries(2).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].created_at, submitted_at(4));
    }

    #[tokio::test]
    async fn test_list_queries_empty() {
        let repo = setup_test_db().await;

        let result = repo.list_queries(10).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_engine_type_in_row() {
        let repo = setup_test_db().await;
        let id = repo
            .add_query(NewQueryRecord::now(ProjectionInput::default()))
            .await
            .unwrap();
        sqlx::query("UPDATE car_query SET engine_type = 'steam' WHERE id = ?")
            .bind(id)
            .execute(repo.pool())
            .await
            .expect("Failed to corrupt row");

        let result = repo.get_query(id).await;

        assert_eq!(
            result.err(),
            Some(RepositoryError::Database("Invalid engine type: steam".to_string()))
        );
    }
}
