use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("initial capital must be positive: {capital}")]
    NonPositiveCapital {
        capital: Money,
    },

    #[error("annual rate must not be negative: {rate}")]
    NegativeRate {
        rate: Rate,
    },

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("target value {target} is unreachable: {reason}")]
    UnreachableTarget {
        target: Money,
        reason: String,
    },

    #[error("missing parameter: {name}")]
    MissingParameter {
        name: &'static str,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("amount does not fit a presentation decimal: {value}")]
    PresentationOverflow {
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, PlacementError>;
