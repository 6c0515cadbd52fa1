/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// FLEET CONSTANTS
// =============================================================================

/// Upper bound for vehicle `carrying` and shipment `weight`
pub const MAX_LOAD: i32 = 1000;

/// Attempts at a generated designator before giving up on unique collisions
pub const MAX_DESIGNATOR_ATTEMPTS: usize = 5;

/// Rows per INSERT statement when importing locations
pub const LOCATION_IMPORT_BATCH_SIZE: usize = 1000;
