use std::borrow::Cow;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::LocationService;
use crate::features::shipments::dtos::{
    CreateShipmentDto, ShipmentDetailDto, ShipmentSummaryDto, UpdateShipmentDto,
};
use crate::features::shipments::models::{Shipment, ShipmentPickup};
use crate::features::vehicles::models::VehicleLocation;
use crate::features::vehicles::VehicleService;
use crate::modules::proximity::{
    ProximityError, ProximityMatch, ProximityMatcher, ProximitySummary, ShipmentOrigin,
    VehiclePosition,
};

const SHIPMENT_COLUMNS: &str = "id, pickup, delivery, weight, description, created_at, updated_at";

const SHIPMENT_PICKUP_QUERY: &str = r#"
    SELECT s.id, s.pickup, s.delivery, s.weight, s.description, l.lat, l.lng
    FROM shipments s
    JOIN locations l ON l.zip = s.pickup
"#;

fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code() == Some(Cow::Borrowed("23503")) {
            return AppError::BadRequest(
                "Pickup or delivery location does not exist".to_string(),
            );
        }

        if db_err.code() == Some(Cow::Borrowed("23514")) {
            return AppError::Validation("weight must be between 0 and 1000".to_string());
        }
    }

    tracing::error!("Shipment query failed: {:?}", e);
    AppError::Database(e)
}

fn vehicle_positions(vehicles: Vec<VehicleLocation>) -> Result<Vec<VehiclePosition>> {
    if vehicles.is_empty() {
        return Err(ProximityError::InsufficientData(
            "No vehicles with a known location".to_string(),
        )
        .into());
    }

    vehicles
        .into_iter()
        .map(VehiclePosition::try_from)
        .collect::<std::result::Result<_, ProximityError>>()
        .map_err(AppError::from)
}

/// List mode: nearby-vehicle counts for each shipment, in query order.
pub fn summarize_shipments(
    matcher: &ProximityMatcher,
    shipments: &[ShipmentPickup],
    vehicles: Vec<VehicleLocation>,
) -> Result<Vec<ShipmentSummaryDto>> {
    if shipments.is_empty() {
        return Err(ProximityError::InsufficientData(
            "No shipments with a known pickup location".to_string(),
        )
        .into());
    }

    let positions = vehicle_positions(vehicles)?;
    let coords: Vec<_> = positions.iter().map(|vehicle| vehicle.coord).collect();
    let origins = shipments
        .iter()
        .map(ShipmentPickup::to_origin)
        .collect::<std::result::Result<Vec<ShipmentOrigin>, ProximityError>>()?;

    let summaries: Vec<ProximitySummary> = matcher.summarize_proximity(&origins, &coords);
    tracing::debug!(
        "Summarized {} shipments against {} vehicles",
        summaries.len(),
        coords.len()
    );

    Ok(shipments
        .iter()
        .zip(summaries)
        .map(|(shipment, summary)| ShipmentSummaryDto {
            id: shipment.id,
            pickup: summary.pickup,
            delivery: summary.delivery,
            vehicle_count: summary.vehicle_count,
        })
        .collect())
}

/// Detail mode: designators of the vehicles near one shipment's pickup.
pub fn match_shipment(
    matcher: &ProximityMatcher,
    shipment: ShipmentPickup,
    vehicles: Vec<VehicleLocation>,
) -> Result<ShipmentDetailDto> {
    let positions = vehicle_positions(vehicles)?;
    let id = shipment.id;
    let matched: ProximityMatch = matcher.match_proximity(shipment.into_cargo()?, &positions);

    tracing::debug!(
        "Shipment {} has {} of {} vehicles nearby",
        id,
        matched.vehicle_ids.len(),
        positions.len()
    );

    Ok(ShipmentDetailDto {
        id,
        pickup: matched.pickup,
        delivery: matched.delivery,
        weight: matched.weight,
        description: matched.description,
        vehicle_ids: matched.vehicle_ids,
    })
}

pub struct ShipmentService {
    pool: PgPool,
    locations: Arc<LocationService>,
    vehicles: Arc<VehicleService>,
    matcher: Arc<ProximityMatcher>,
}

impl ShipmentService {
    pub fn new(
        pool: PgPool,
        locations: Arc<LocationService>,
        vehicles: Arc<VehicleService>,
        matcher: Arc<ProximityMatcher>,
    ) -> Self {
        Self {
            pool,
            locations,
            vehicles,
            matcher,
        }
    }

    /// Every shipment with the number of vehicles near its pickup
    pub async fn list_summaries(&self) -> Result<Vec<ShipmentSummaryDto>> {
        let (shipments, vehicles) =
            tokio::try_join!(self.list_pickups(), self.vehicles.list_positions())?;

        summarize_shipments(&self.matcher, &shipments, vehicles)
    }

    /// One shipment with the designators of vehicles near its pickup
    pub async fn get_detail(&self, id: Uuid) -> Result<ShipmentDetailDto> {
        let (shipment, vehicles) =
            tokio::try_join!(self.get_pickup(id), self.vehicles.list_positions())?;

        match_shipment(&self.matcher, shipment, vehicles)
    }

    pub async fn create(&self, dto: CreateShipmentDto) -> Result<Shipment> {
        self.locations.ensure_exists(dto.pickup).await?;
        self.locations.ensure_exists(dto.delivery).await?;

        let query = format!(
            r#"
            INSERT INTO shipments (pickup, delivery, weight, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            SHIPMENT_COLUMNS
        );

        let shipment = sqlx::query_as::<_, Shipment>(&query)
            .bind(dto.pickup)
            .bind(dto.delivery)
            .bind(dto.weight)
            .bind(&dto.description)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        tracing::info!(
            "Shipment {} created ({} -> {})",
            shipment.id,
            shipment.pickup,
            shipment.delivery
        );
        Ok(shipment)
    }

    /// Update weight and/or description; absent fields keep their value
    pub async fn update(&self, id: Uuid, dto: UpdateShipmentDto) -> Result<Shipment> {
        let query = format!(
            r#"
            UPDATE shipments
            SET weight = COALESCE($2, weight),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SHIPMENT_COLUMNS
        );

        let shipment = sqlx::query_as::<_, Shipment>(&query)
            .bind(id)
            .bind(dto.weight)
            .bind(dto.description)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Shipment with id {} not found", id)))?;

        tracing::info!("Shipment {} updated", id);
        Ok(shipment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM shipments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Shipment with id {} not found",
                id
            )));
        }

        tracing::info!("Shipment {} deleted", id);
        Ok(())
    }

    async fn list_pickups(&self) -> Result<Vec<ShipmentPickup>> {
        let query = format!("{} ORDER BY s.created_at ASC, s.id ASC", SHIPMENT_PICKUP_QUERY);

        sqlx::query_as::<_, ShipmentPickup>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch shipments: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get_pickup(&self, id: Uuid) -> Result<ShipmentPickup> {
        let query = format!("{} WHERE s.id = $1", SHIPMENT_PICKUP_QUERY);

        sqlx::query_as::<_, ShipmentPickup>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch shipment {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Shipment with id {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::proximity::{DistanceEvaluator, DistanceUnit};

    fn shipment(pickup: i32, lat: f64, lng: f64) -> ShipmentPickup {
        ShipmentPickup {
            id: Uuid::now_v7(),
            pickup,
            delivery: 64101,
            weight: 420,
            description: "Machine parts".to_string(),
            lat,
            lng,
        }
    }

    fn vehicle(designator: &str, lat: f64, lng: f64) -> VehicleLocation {
        VehicleLocation {
            designator: designator.to_string(),
            lat,
            lng,
        }
    }

    fn chicago_fleet() -> Vec<VehicleLocation> {
        vec![
            vehicle("1001A", 41.88, -87.63),
            vehicle("1002B", 34.05, -118.24),
            vehicle("1003C", 39.10, -94.58),
        ]
    }

    #[test]
    fn test_summarize_chicago_scenario() {
        let matcher = ProximityMatcher::default();
        let chicago = shipment(60601, 41.85, -87.65);
        let los_angeles = shipment(90001, 34.05, -118.24);

        let summaries =
            summarize_shipments(&matcher, &[chicago.clone(), los_angeles.clone()], chicago_fleet())
                .unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, chicago.id);
        assert_eq!(summaries[0].pickup, 60601);
        assert_eq!(summaries[0].vehicle_count, 2);
        assert_eq!(summaries[1].id, los_angeles.id);
        assert_eq!(summaries[1].vehicle_count, 1);
    }

    #[test]
    fn test_match_chicago_scenario() {
        let matcher = ProximityMatcher::default();
        let chicago = shipment(60601, 41.85, -87.65);
        let id = chicago.id;

        let detail = match_shipment(&matcher, chicago, chicago_fleet()).unwrap();

        assert_eq!(detail.id, id);
        assert_eq!(detail.weight, 420);
        assert_eq!(detail.description, "Machine parts");
        assert_eq!(detail.vehicle_ids, vec!["1001A", "1003C"]);
    }

    #[test]
    fn test_configured_threshold_is_honoured() {
        let evaluator = DistanceEvaluator::new(300.0, DistanceUnit::Kilometers).unwrap();
        let matcher = ProximityMatcher::new(evaluator);

        let detail =
            match_shipment(&matcher, shipment(60601, 41.85, -87.65), chicago_fleet()).unwrap();

        assert_eq!(detail.vehicle_ids, vec!["1001A"]);
    }

    #[test]
    fn test_empty_shipments_is_insufficient_data() {
        let matcher = ProximityMatcher::default();
        let result = summarize_shipments(&matcher, &[], chicago_fleet());
        assert!(
            matches!(result, Err(AppError::InsufficientData(ref m)) if m.contains("shipments"))
        );
    }

    #[test]
    fn test_empty_vehicles_is_insufficient_data() {
        let matcher = ProximityMatcher::default();

        let list = summarize_shipments(&matcher, &[shipment(60601, 41.85, -87.65)], vec![]);
        assert!(matches!(list, Err(AppError::InsufficientData(ref m)) if m.contains("vehicles")));

        let detail = match_shipment(&matcher, shipment(60601, 41.85, -87.65), vec![]);
        assert!(matches!(detail, Err(AppError::InsufficientData(_))));
    }

    #[test]
    fn test_corrupt_coordinates_are_internal_errors() {
        let matcher = ProximityMatcher::default();
        let result = summarize_shipments(
            &matcher,
            &[shipment(60601, 41.85, -87.65)],
            vec![vehicle("1001A", 91.0, 0.0)],
        );
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
