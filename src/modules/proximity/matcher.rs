use super::coordinate::Coordinate;
use super::distance::DistanceEvaluator;

/// A shipment reduced to what list mode needs: its route and pickup point.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentOrigin {
    pub pickup: i32,
    pub delivery: i32,
    pub pickup_coord: Coordinate,
}

/// A single shipment with the cargo details echoed back in detail mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentCargo {
    pub pickup: i32,
    pub delivery: i32,
    pub weight: i32,
    pub description: String,
    pub pickup_coord: Coordinate,
}

/// A vehicle's identifier joined with the coordinate of its current location.
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePosition {
    pub designator: String,
    pub coord: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximitySummary {
    pub pickup: i32,
    pub delivery: i32,
    pub vehicle_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityMatch {
    pub pickup: i32,
    pub delivery: i32,
    pub weight: i32,
    pub description: String,
    pub vehicle_ids: Vec<String>,
}

/// Answers "which vehicles are near which shipment".
///
/// The two queries are separate entry points: [`summarize_proximity`] counts
/// nearby vehicles for many shipments, [`match_proximity`] names them for one.
/// Neither performs I/O or fails on empty input; deciding whether an empty
/// data set is an error belongs to the caller.
///
/// [`summarize_proximity`]: ProximityMatcher::summarize_proximity
/// [`match_proximity`]: ProximityMatcher::match_proximity
#[derive(Debug, Clone, Default)]
pub struct ProximityMatcher {
    evaluator: DistanceEvaluator,
}

impl ProximityMatcher {
    pub fn new(evaluator: DistanceEvaluator) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &DistanceEvaluator {
        &self.evaluator
    }

    /// List mode: one summary per shipment, in input order.
    pub fn summarize_proximity(
        &self,
        shipments: &[ShipmentOrigin],
        vehicles: &[Coordinate],
    ) -> Vec<ProximitySummary> {
        shipments
            .iter()
            .map(|shipment| ProximitySummary {
                pickup: shipment.pickup,
                delivery: shipment.delivery,
                vehicle_count: vehicles
                    .iter()
                    .filter(|coord| self.evaluator.is_within(shipment.pickup_coord, **coord))
                    .count(),
            })
            .collect()
    }

    /// Detail mode: identifiers of every vehicle near the pickup, in input order.
    pub fn match_proximity(
        &self,
        shipment: ShipmentCargo,
        vehicles: &[VehiclePosition],
    ) -> ProximityMatch {
        let vehicle_ids = vehicles
            .iter()
            .filter(|vehicle| self.evaluator.is_within(shipment.pickup_coord, vehicle.coord))
            .map(|vehicle| vehicle.designator.clone())
            .collect();

        ProximityMatch {
            pickup: shipment.pickup,
            delivery: shipment.delivery,
            weight: shipment.weight,
            description: shipment.description,
            vehicle_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::proximity::DistanceUnit;
    use fake::Fake;

    fn point(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn chicago_cargo() -> ShipmentCargo {
        ShipmentCargo {
            pickup: 60601,
            delivery: 64101,
            weight: 420,
            description: "Machine parts".to_string(),
            pickup_coord: point(41.85, -87.65),
        }
    }

    fn fleet() -> Vec<VehiclePosition> {
        vec![
            VehiclePosition {
                designator: "1001A".to_string(),
                coord: point(41.88, -87.63), // downtown Chicago, ~2 mi
            },
            VehiclePosition {
                designator: "1002B".to_string(),
                coord: point(34.05, -118.24), // Los Angeles, ~1741 mi
            },
            VehiclePosition {
                designator: "1003C".to_string(),
                coord: point(39.10, -94.58), // Kansas City, ~411 mi
            },
        ]
    }

    #[test]
    fn test_match_chicago_scenario() {
        let matcher = ProximityMatcher::default();

        let matched = matcher.match_proximity(chicago_cargo(), &fleet());

        assert_eq!(matched.vehicle_ids, vec!["1001A", "1003C"]);
        assert_eq!(matched.pickup, 60601);
        assert_eq!(matched.delivery, 64101);
        assert_eq!(matched.weight, 420);
        assert_eq!(matched.description, "Machine parts");
    }

    #[test]
    fn test_summarize_chicago_scenario() {
        let matcher = ProximityMatcher::default();
        let shipments = vec![ShipmentOrigin {
            pickup: 60601,
            delivery: 64101,
            pickup_coord: point(41.85, -87.65),
        }];
        let coords: Vec<Coordinate> = fleet().into_iter().map(|v| v.coord).collect();

        let summaries = matcher.summarize_proximity(&shipments, &coords);

        assert_eq!(
            summaries,
            vec![ProximitySummary {
                pickup: 60601,
                delivery: 64101,
                vehicle_count: 2,
            }]
        );
    }

    #[test]
    fn test_summarize_without_vehicles_counts_zero() {
        let matcher = ProximityMatcher::default();
        let shipments = vec![
            ShipmentOrigin {
                pickup: 601,
                delivery: 602,
                pickup_coord: point(18.18, -66.75),
            },
            ShipmentOrigin {
                pickup: 10001,
                delivery: 60601,
                pickup_coord: point(40.75, -73.99),
            },
        ];

        let summaries = matcher.summarize_proximity(&shipments, &[]);

        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.vehicle_count == 0));
    }

    #[test]
    fn test_summarize_without_shipments_is_empty() {
        let matcher = ProximityMatcher::default();
        let summaries = matcher.summarize_proximity(&[], &[point(41.85, -87.65)]);
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_match_without_vehicles_is_empty() {
        let matcher = ProximityMatcher::default();
        let matched = matcher.match_proximity(chicago_cargo(), &[]);
        assert!(matched.vehicle_ids.is_empty());
    }

    #[test]
    fn test_summary_preserves_order_and_length() {
        let matcher = ProximityMatcher::default();
        let shipments: Vec<ShipmentOrigin> = (0..25)
            .map(|i| ShipmentOrigin {
                pickup: i,
                delivery: i + 1000,
                pickup_coord: point((-80.0..80.0).fake(), (-170.0..170.0).fake()),
            })
            .collect();
        let vehicles: Vec<Coordinate> = (0..40)
            .map(|_| point((-80.0..80.0).fake(), (-170.0..170.0).fake()))
            .collect();

        let summaries = matcher.summarize_proximity(&shipments, &vehicles);

        assert_eq!(summaries.len(), shipments.len());
        for (summary, shipment) in summaries.iter().zip(&shipments) {
            assert_eq!(summary.pickup, shipment.pickup);
            assert_eq!(summary.delivery, shipment.delivery);
            assert!(summary.vehicle_count <= vehicles.len());
        }
    }

    #[test]
    fn test_match_partitions_vehicles_by_threshold() {
        let matcher = ProximityMatcher::default();
        let vehicles: Vec<VehiclePosition> = (0..60)
            .map(|i| VehiclePosition {
                designator: format!("{:04}X", 1000 + i),
                coord: point((30.0..50.0).fake(), (-100.0..-75.0).fake()),
            })
            .collect();
        let cargo = chicago_cargo();
        let pickup = cargo.pickup_coord;

        let matched = matcher.match_proximity(cargo, &vehicles);

        for vehicle in &vehicles {
            let near = matcher.evaluator().is_within(pickup, vehicle.coord);
            assert_eq!(matched.vehicle_ids.contains(&vehicle.designator), near);
        }
    }

    #[test]
    fn test_list_and_detail_agree() {
        let matcher = ProximityMatcher::default();
        let cargo = chicago_cargo();
        let origin = ShipmentOrigin {
            pickup: cargo.pickup,
            delivery: cargo.delivery,
            pickup_coord: cargo.pickup_coord,
        };
        let vehicles = fleet();
        let coords: Vec<Coordinate> = vehicles.iter().map(|v| v.coord).collect();

        let count = matcher.summarize_proximity(&[origin], &coords)[0].vehicle_count;
        let matched = matcher.match_proximity(cargo, &vehicles);

        assert_eq!(count, matched.vehicle_ids.len());
    }

    #[test]
    fn test_configured_threshold_is_respected() {
        // 300 km excludes Kansas City (~661 km) but keeps downtown Chicago
        let evaluator = DistanceEvaluator::new(300.0, DistanceUnit::Kilometers).unwrap();
        let matcher = ProximityMatcher::new(evaluator);

        let matched = matcher.match_proximity(chicago_cargo(), &fleet());

        assert_eq!(matched.vehicle_ids, vec!["1001A"]);
    }
}
