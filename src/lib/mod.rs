//! Implementations that are useful accross the whole project
//!
//! Dates, records, errors and the aggregations over sales

pub mod aggregate;
pub mod date;
pub mod error;
pub mod period;
pub mod record;
