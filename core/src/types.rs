//! Shared primitive types used across the scoring engine.

/// A stable, unique identifier for a transaction.
pub type TransactionId = String;

/// An ISO 3166-1 alpha-2 country code ("US", "RU", ...).
pub type CountryCode = String;
