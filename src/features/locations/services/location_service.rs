use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::locations::models::Location;
use crate::shared::constants::LOCATION_IMPORT_BATCH_SIZE;
use crate::shared::types::PaginationQuery;

/// Escape `LIKE` metacharacters so the term matches literally (backslash is the default escape)
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Read access to the location reference table, plus bulk import for seeding
pub struct LocationService {
    pool: PgPool,
}

impl LocationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Search locations with pagination, ordered by zip
    pub async fn list(
        &self,
        search: Option<&str>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<Location>, i64)> {
        match search {
            Some(term) => {
                // $1 matches city/region anywhere, $2 matches the zip prefix
                let escaped = escape_like(term);
                let text_pattern = format!("%{}%", escaped.to_lowercase());
                let zip_pattern = format!("{}%", escaped);

                let total: i64 = sqlx::query_scalar(
                    r#"
                    SELECT COUNT(*) FROM locations
                    WHERE LOWER(city) LIKE $1 OR LOWER(region) LIKE $1 OR zip::text LIKE $2
                    "#,
                )
                .bind(&text_pattern)
                .bind(&zip_pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count locations: {:?}", e);
                    AppError::Database(e)
                })?;

                let locations: Vec<Location> = sqlx::query_as(
                    r#"
                    SELECT zip, city, region, lat, lng
                    FROM locations
                    WHERE LOWER(city) LIKE $1 OR LOWER(region) LIKE $1 OR zip::text LIKE $2
                    ORDER BY zip ASC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(&text_pattern)
                .bind(&zip_pattern)
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch locations: {:?}", e);
                    AppError::Database(e)
                })?;

                Ok((locations, total))
            }
            None => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to count locations: {:?}", e);
                        AppError::Database(e)
                    })?;

                let locations: Vec<Location> = sqlx::query_as(
                    r#"
                    SELECT zip, city, region, lat, lng
                    FROM locations
                    ORDER BY zip ASC
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch locations: {:?}", e);
                    AppError::Database(e)
                })?;

                Ok((locations, total))
            }
        }
    }

    pub async fn get_by_zip(&self, zip: i32) -> Result<Location> {
        sqlx::query_as::<_, Location>(
            r#"
            SELECT zip, city, region, lat, lng
            FROM locations
            WHERE zip = $1
            "#,
        )
        .bind(zip)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch location {}: {:?}", zip, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Location with zip {} not found", zip)))
    }

    /// Fails with `BadRequest` when a referenced zip is not in the table
    pub async fn ensure_exists(&self, zip: i32) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE zip = $1)")
                .bind(zip)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check location {}: {:?}", zip, e);
                    AppError::Database(e)
                })?;

        if exists {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Location {} does not exist",
                zip
            )))
        }
    }

    /// Pick any existing zip
    pub async fn random_zip(&self) -> Result<i32> {
        self.random_zips(1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::InsufficientData(
                    "No locations available; run the seed command first".to_string(),
                )
            })
    }

    /// Up to `count` distinct zips in random order
    pub async fn random_zips(&self, count: usize) -> Result<Vec<i32>> {
        sqlx::query_scalar("SELECT zip FROM locations ORDER BY RANDOM() LIMIT $1")
            .bind(count as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to sample locations: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Insert locations in batches inside one transaction.
    ///
    /// Zips already present are left untouched, so re-running an import is a
    /// no-op. Returns the number of rows actually inserted.
    pub async fn import(&self, locations: &[Location]) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut inserted = 0;

        for batch in locations.chunks(LOCATION_IMPORT_BATCH_SIZE) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO locations (zip, city, region, lat, lng) ");
            builder.push_values(batch, |mut row, location| {
                row.push_bind(location.zip)
                    .push_bind(location.city.clone())
                    .push_bind(location.region.clone())
                    .push_bind(location.lat)
                    .push_bind(location.lng);
            });
            builder.push(" ON CONFLICT (zip) DO NOTHING");

            let result = builder.build().execute(&mut *tx).await.map_err(|e| {
                tracing::error!("Failed to import location batch: {:?}", e);
                AppError::Database(e)
            })?;
            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Imported {} of {} locations",
            inserted,
            locations.len()
        );
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("chicago"), "chicago");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("st_louis"), "st\\_louis");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
