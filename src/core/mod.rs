//! Core business logic abstractions

pub mod rates;

// Re-export main types for cleaner imports
pub use rates::RateService;
