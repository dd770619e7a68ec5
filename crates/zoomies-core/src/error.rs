use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from donation input handling and optimistic updates.
///
/// The split calculator itself is total and never returns one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoomiesError {
    #[error("invalid {field}: '{value}' is not a number")]
    InvalidAmount { field: &'static str, value: String },

    #[error("{field} {value} exceeds the maximum of {max}")]
    AmountOutOfRange {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },

    #[error("a speculative update is already in flight")]
    SpeculationInFlight,

    #[error("no speculative update is pending")]
    NothingPending,
}

impl ZoomiesError {
    pub fn invalid_amount(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn invalid_amount_display_names_field_and_value() {
        let err = ZoomiesError::invalid_amount("tip", "ten");
        let s = err.to_string();
        assert!(s.contains("tip"));
        assert!(s.contains("ten"));
    }

    #[test]
    fn out_of_range_display() {
        let err = ZoomiesError::AmountOutOfRange {
            field: "amount",
            value: dec!(5000000),
            max: dec!(1000000),
        };
        assert_eq!(
            err.to_string(),
            "amount 5000000 exceeds the maximum of 1000000"
        );
    }
}
