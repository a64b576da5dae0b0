//! Loan eligibility, offer generation, and vehicle valuation for a vehicle marketplace.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
