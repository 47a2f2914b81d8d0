//! Business logic services

pub mod prediction_service;

pub use prediction_service::{AverageSummary, PredictionService, Submission};
