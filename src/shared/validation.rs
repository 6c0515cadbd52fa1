use regex::Regex;
use std::sync::LazyLock;

/// Vehicle designator: four digits followed by one uppercase letter
/// - Valid: "1001A", "0000Z"
/// - Invalid: "1001a", "101A", "10011A", "A1001"
pub static VEHICLE_DESIGNATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}[A-Z]$").unwrap());
