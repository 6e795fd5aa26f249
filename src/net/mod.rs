//! Outbound HTTP: the shared client wrapper, endpoint calls and wire DTOs.

pub mod api;
pub mod endpoints;
pub mod types;
