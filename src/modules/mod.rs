//! Modules layer - self-contained domain engines with no HTTP or database coupling
//!
//! Contains the proximity-matching core used by the shipments feature.

pub mod proximity;
