use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ZoomiesError;
use crate::fees::{compute_donation_split, DonationSplit};

/// Smallest donation accepted, in currency units.
pub const MIN_DONATION: Decimal = dec!(1);

/// Starting values shown in the donation form before the supporter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationDefaults {
    pub amount: Decimal,
    pub tip: Decimal,
}

impl Default for DonationDefaults {
    fn default() -> Self {
        Self {
            amount: dec!(100),
            tip: dec!(10),
        }
    }
}

/// User-entered donation amount and tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub amount: Decimal,
    pub tip: Decimal,
}

impl DonationRequest {
    pub fn new(amount: Decimal, tip: Decimal) -> Self {
        Self { amount, tip }
    }

    pub fn with_defaults(defaults: DonationDefaults) -> Self {
        Self::new(defaults.amount, defaults.tip)
    }

    /// Parse form input without clamping. Blank or missing fields fall back
    /// to `defaults`.
    pub fn parse_input(
        amount: Option<&str>,
        tip: Option<&str>,
        defaults: DonationDefaults,
    ) -> Result<Self, ZoomiesError> {
        let amount = parse_field("amount", amount)?.unwrap_or(defaults.amount);
        let tip = parse_field("tip", tip)?.unwrap_or(defaults.tip);
        Ok(Self::new(amount, tip))
    }

    /// [`DonationRequest::parse_input`] followed by clamping.
    pub fn from_input(
        amount: Option<&str>,
        tip: Option<&str>,
        defaults: DonationDefaults,
    ) -> Result<Self, ZoomiesError> {
        Ok(Self::parse_input(amount, tip, defaults)?.clamped())
    }

    /// `amount = max(1, amount)`, `tip = max(0, tip)`.
    pub fn clamped(self) -> Self {
        Self {
            amount: self.amount.max(MIN_DONATION),
            tip: self.tip.max(Decimal::ZERO),
        }
    }

    /// True when `amount >= 1` and `tip >= 0`, i.e. clamping would not
    /// change anything.
    pub fn is_within_bounds(&self) -> bool {
        self.amount >= MIN_DONATION && self.tip >= Decimal::ZERO
    }

    /// Reject values above `max` after clamping.
    pub fn ensure_at_most(&self, max: Decimal) -> Result<(), ZoomiesError> {
        if self.amount > max {
            return Err(ZoomiesError::AmountOutOfRange {
                field: "amount",
                value: self.amount,
                max,
            });
        }
        if self.tip > max {
            return Err(ZoomiesError::AmountOutOfRange {
                field: "tip",
                value: self.tip,
                max,
            });
        }
        Ok(())
    }

    /// Compute the split for the clamped request.
    pub fn split(&self) -> DonationSplit {
        let clamped = self.clamped();
        compute_donation_split(clamped.amount, clamped.tip)
    }
}

impl Default for DonationRequest {
    fn default() -> Self {
        Self::with_defaults(DonationDefaults::default())
    }
}

fn parse_field(field: &'static str, raw: Option<&str>) -> Result<Option<Decimal>, ZoomiesError> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let parsed = if raw.contains(['e', 'E']) {
        Decimal::from_scientific(raw)
    } else {
        Decimal::from_str(raw)
    };
    parsed
        .map(Some)
        .map_err(|_| ZoomiesError::invalid_amount(field, raw))
}
