use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Car;

/// Storefront listing filters. Every field is optional; None means
/// "do not filter on this attribute".
#[derive(Debug, Clone, Default)]
pub struct CarListFilter {
    pub make: Option<String>,
    pub model: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub year: Option<i32>,
}

/// Storefront sort selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarSort {
    Newest,
    PriceAsc,
    PriceDesc,
    YearDesc,
}

impl CarSort {
    pub fn from_api_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "price_asc" => CarSort::PriceAsc,
            "price_desc" => CarSort::PriceDesc,
            "year_desc" => CarSort::YearDesc,
            _ => CarSort::Newest,
        }
    }

    fn order_by(self) -> &'static str {
        match self {
            CarSort::Newest => "created_at DESC",
            CarSort::PriceAsc => "price ASC",
            CarSort::PriceDesc => "price DESC",
            CarSort::YearDesc => "year DESC",
        }
    }
}

const FILTER_CLAUSE: &str = r#"
    ($1::text IS NULL OR make ILIKE $1)
    AND ($2::text IS NULL OR model ILIKE $2)
    AND ($3::text IS NULL OR status = $3)
    AND ($4::numeric IS NULL OR price >= $4)
    AND ($5::numeric IS NULL OR price <= $5)
    AND ($6::int IS NULL OR year = $6)
"#;

fn like_pattern(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|v| format!("%{v}%"))
}

/// One page of the filtered listing.
pub async fn list_cars(
    pool: &PgPool,
    filter: &CarListFilter,
    sort: CarSort,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Car>> {
    let sql = format!(
        "SELECT * FROM cars WHERE {FILTER_CLAUSE} ORDER BY {} LIMIT $7 OFFSET $8",
        sort.order_by()
    );

    let cars = sqlx::query_as::<_, Car>(&sql)
        .bind(like_pattern(&filter.make))
        .bind(like_pattern(&filter.model))
        .bind(filter.status.as_deref())
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(filter.year)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(cars)
}

/// Total row count for the same filter, for pagination.
pub async fn count_cars(pool: &PgPool, filter: &CarListFilter) -> anyhow::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM cars WHERE {FILTER_CLAUSE}");

    let row: (i64,) = sqlx::query_as(&sql)
        .bind(like_pattern(&filter.make))
        .bind(like_pattern(&filter.model))
        .bind(filter.status.as_deref())
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(filter.year)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// Full inventory, newest first (admin view).
pub async fn list_all_cars(pool: &PgPool) -> anyhow::Result<Vec<Car>> {
    let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(cars)
}

pub async fn get_car(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Car>> {
    let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(car)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_car(
    pool: &PgPool,
    make: &str,
    model: &str,
    year: i32,
    price: Decimal,
    mileage_km: i32,
    fuel: Option<&str>,
    transmission: Option<&str>,
    description: Option<&str>,
    images: &[String],
    features: &[String],
) -> anyhow::Result<Car> {
    let car = sqlx::query_as::<_, Car>(
        r#"
        INSERT INTO cars (make, model, year, price, mileage_km, fuel, transmission, description, images, features)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(make)
    .bind(model)
    .bind(year)
    .bind(price)
    .bind(mileage_km)
    .bind(fuel)
    .bind(transmission)
    .bind(description)
    .bind(images)
    .bind(features)
    .fetch_one(pool)
    .await?;

    Ok(car)
}

#[allow(clippy::too_many_arguments)]
pub async fn update_car(
    pool: &PgPool,
    id: Uuid,
    make: &str,
    model: &str,
    year: i32,
    price: Decimal,
    mileage_km: i32,
    fuel: Option<&str>,
    transmission: Option<&str>,
    description: Option<&str>,
    images: &[String],
    features: &[String],
) -> anyhow::Result<Option<Car>> {
    let car = sqlx::query_as::<_, Car>(
        r#"
        UPDATE cars
        SET make = $2, model = $3, year = $4, price = $5, mileage_km = $6,
            fuel = $7, transmission = $8, description = $9, images = $10, features = $11
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(make)
    .bind(model)
    .bind(year)
    .bind(price)
    .bind(mileage_km)
    .bind(fuel)
    .bind(transmission)
    .bind(description)
    .bind(images)
    .bind(features)
    .fetch_optional(pool)
    .await?;

    Ok(car)
}

pub async fn update_car_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> anyhow::Result<Option<Car>> {
    let car = sqlx::query_as::<_, Car>(
        "UPDATE cars SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(car)
}

pub async fn delete_car(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM cars WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count cars currently on offer, for the stock gauge.
pub async fn count_available(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars WHERE status = 'available'")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
