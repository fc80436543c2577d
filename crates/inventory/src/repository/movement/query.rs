use crate::{
    abstract_trait::movement::repository::MovementQueryRepositoryTrait,
    domain::requests::MovementFilter,
    model::{MovementDetail, MovementReportRow},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

const DETAIL_SELECT: &str = r#"
    SELECT
        m.movement_id,
        m.product_id,
        p.name AS product_name,
        p.sku AS product_sku,
        m.customer_id,
        c.name AS customer_name,
        m.quantity,
        m.kind,
        m.unit_price,
        m.total_value,
        m.note,
        m.created_at
    FROM movements m
    LEFT JOIN products p ON p.product_id = m.product_id
    LEFT JOIN customers c ON c.customer_id = m.customer_id
"#;

// Dates are inclusive on both ends.
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::movement_kind IS NULL OR m.kind = $1)
      AND ($2::INT IS NULL OR m.product_id = $2)
      AND ($3::DATE IS NULL OR m.created_at >= $3::DATE)
      AND ($4::DATE IS NULL OR m.created_at < $4::DATE + INTERVAL '1 day')
"#;

#[derive(Clone)]
pub struct MovementQueryRepository {
    db: ConnectionPool,
}

impl MovementQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovementQueryRepositoryTrait for MovementQueryRepository {
    async fn find_all(
        &self,
        filter: &MovementFilter,
    ) -> Result<(Vec<MovementDetail>, i64), RepositoryError> {
        info!("🔍 Fetching movements with filter: {filter:?}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })?;

        let count_sql = format!("SELECT COUNT(*) FROM movements m {FILTER_CLAUSE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.kind)
            .bind(filter.product_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count movements: {e:?}");
                RepositoryError::from(e)
            })?;

        let list_sql = format!(
            "{DETAIL_SELECT} {FILTER_CLAUSE} \
             ORDER BY m.created_at DESC, m.movement_id DESC \
             LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query_as::<_, MovementDetail>(&list_sql)
            .bind(filter.kind)
            .bind(filter.product_id)
            .bind(filter.from)
            .bind(filter.to)
            .bind(filter.page_size as i64)
            .bind(filter.offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch movements: {e:?}");
                RepositoryError::from(e)
            })?;

        info!("✅ Found {} movements (total {total})", rows.len());
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MovementDetail>, RepositoryError> {
        info!("🆔 Fetching movement by ID: {id}");

        let sql = format!("{DETAIL_SELECT} WHERE m.movement_id = $1");

        sqlx::query_as::<_, MovementDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch movement {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn product_report(
        &self,
        product_id: i32,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<MovementReportRow>, RepositoryError> {
        info!("📊 Building movement report for product {product_id}");

        // Unpriced movements stay out of the sums and averages; they are counted separately.
        sqlx::query_as::<_, MovementReportRow>(
            r#"
            SELECT
                kind,
                COUNT(*) AS total_movements,
                COALESCE(SUM(quantity), 0)::BIGINT AS total_quantity,
                ROUND(AVG(unit_price), 2) AS average_unit_price,
                SUM(total_value) AS total_value,
                COUNT(*) FILTER (WHERE total_value IS NULL) AS unpriced_movements
            FROM movements
            WHERE product_id = $1
              AND ($2::DATE IS NULL OR created_at >= $2::DATE)
              AND ($3::DATE IS NULL OR created_at < $3::DATE + INTERVAL '1 day')
            GROUP BY kind
            ORDER BY kind
            "#,
        )
        .bind(product_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to build report for product {product_id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
