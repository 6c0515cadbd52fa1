use std::borrow::Cow;
use std::sync::Arc;

use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::LocationService;
use crate::features::vehicles::dtos::{CreateVehicleDto, RelocateVehicleDto};
use crate::features::vehicles::models::{Vehicle, VehicleLocation};
use crate::shared::constants::{MAX_DESIGNATOR_ATTEMPTS, MAX_LOAD};

const VEHICLE_COLUMNS: &str = "id, designator, current_location, carrying, created_at, updated_at";

/// Random designator in `NNNNL` form. Uniqueness is left to the database.
pub fn generate_designator() -> String {
    let mut rng = rand::thread_rng();
    let number: u16 = rng.gen_range(0..10_000);
    let letter = rng.gen_range(b'A'..=b'Z') as char;
    format!("{:04}{}", number, letter)
}

fn random_carrying() -> i32 {
    rand::thread_rng().gen_range(0..=MAX_LOAD)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")))
}

/// Map constraint violations to client errors
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            Some("23505") => {
                return AppError::Conflict(
                    "A vehicle with this designator already exists".to_string(),
                );
            }
            Some("23503") => {
                return AppError::BadRequest("Referenced location does not exist".to_string());
            }
            Some("23514") => {
                return AppError::Validation("carrying must be between 0 and 1000".to_string());
            }
            _ => {}
        }
    }

    tracing::error!("Vehicle query failed: {:?}", e);
    AppError::Database(e)
}

pub struct VehicleService {
    pool: PgPool,
    locations: Arc<LocationService>,
}

impl VehicleService {
    pub fn new(pool: PgPool, locations: Arc<LocationService>) -> Self {
        Self { pool, locations }
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>> {
        let query = format!(
            "SELECT {} FROM vehicles ORDER BY designator ASC",
            VEHICLE_COLUMNS
        );

        sqlx::query_as::<_, Vehicle>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch vehicles: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get(&self, id: Uuid) -> Result<Vehicle> {
        let query = format!("SELECT {} FROM vehicles WHERE id = $1", VEHICLE_COLUMNS);

        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch vehicle {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id {} not found", id)))
    }

    /// Create a vehicle, filling in designator and location when omitted
    pub async fn create(&self, dto: CreateVehicleDto) -> Result<Vehicle> {
        let current_location = match dto.current_location {
            Some(zip) => {
                self.locations.ensure_exists(zip).await?;
                zip
            }
            None => self.locations.random_zip().await?,
        };

        let vehicle = match dto.designator {
            Some(designator) => self
                .insert(&designator, current_location, dto.carrying)
                .await
                .map_err(handle_db_error)?,
            None => {
                self.insert_generated(current_location, dto.carrying)
                    .await?
            }
        };

        tracing::info!(
            "Vehicle {} created at {}",
            vehicle.designator,
            vehicle.current_location
        );
        Ok(vehicle)
    }

    /// Move a vehicle to another existing location
    pub async fn relocate(&self, id: Uuid, dto: RelocateVehicleDto) -> Result<Vehicle> {
        self.locations.ensure_exists(dto.current_location).await?;

        let query = format!(
            r#"
            UPDATE vehicles
            SET current_location = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        );

        let vehicle = sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(dto.current_location)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id {} not found", id)))?;

        tracing::info!(
            "Vehicle {} relocated to {}",
            vehicle.designator,
            vehicle.current_location
        );
        Ok(vehicle)
    }

    /// Every vehicle joined with its location's coordinates, ordered by designator
    pub async fn list_positions(&self) -> Result<Vec<VehicleLocation>> {
        sqlx::query_as::<_, VehicleLocation>(
            r#"
            SELECT v.designator, l.lat, l.lng
            FROM vehicles v
            JOIN locations l ON l.zip = v.current_location
            ORDER BY v.designator ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch vehicle positions: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Create `count` vehicles with generated designators and random loads.
    ///
    /// Locations are sampled without replacement; when the table holds fewer
    /// zips than `count` the sample is reused.
    pub async fn seed_fleet(&self, count: usize) -> Result<usize> {
        if count == 0 {
            return Ok(0);
        }

        let zips = self.locations.random_zips(count).await?;
        if zips.is_empty() {
            return Err(AppError::InsufficientData(
                "No locations available; import locations before seeding vehicles".to_string(),
            ));
        }

        for zip in zips.iter().cycle().take(count) {
            self.insert_generated(*zip, random_carrying()).await?;
        }

        tracing::info!("Seeded {} vehicles", count);
        Ok(count)
    }

    async fn insert(
        &self,
        designator: &str,
        current_location: i32,
        carrying: i32,
    ) -> std::result::Result<Vehicle, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO vehicles (designator, current_location, carrying)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        );

        sqlx::query_as::<_, Vehicle>(&query)
            .bind(designator)
            .bind(current_location)
            .bind(carrying)
            .fetch_one(&self.pool)
            .await
    }

    /// Insert with a generated designator, retrying on collisions
    async fn insert_generated(&self, current_location: i32, carrying: i32) -> Result<Vehicle> {
        for attempt in 1..=MAX_DESIGNATOR_ATTEMPTS {
            let designator = generate_designator();

            match self.insert(&designator, current_location, carrying).await {
                Ok(vehicle) => return Ok(vehicle),
                Err(e) if is_unique_violation(&e) => {
                    tracing::debug!(
                        "Designator {} taken (attempt {}/{})",
                        designator,
                        attempt,
                        MAX_DESIGNATOR_ATTEMPTS
                    );
                }
                Err(e) => return Err(handle_db_error(e)),
            }
        }

        Err(AppError::Conflict(format!(
            "Could not generate a unique designator after {} attempts",
            MAX_DESIGNATOR_ATTEMPTS
        )))
    }
}
