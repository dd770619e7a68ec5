use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fee policy applied to every donation.
///
/// Fixed platform policy: there is no runtime knob for these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Card processor percentage, as a fraction of the donation.
    pub processing_rate: Decimal,
    /// Card processor flat fee per transaction, in currency units.
    pub processing_flat: Decimal,
    /// Platform percentage, as a fraction of the donation.
    pub platform_rate: Decimal,
}

impl FeeSchedule {
    /// 2.9% + 0.30 processing, 3% platform.
    pub const STANDARD: FeeSchedule = FeeSchedule {
        processing_rate: dec!(0.029),
        processing_flat: dec!(0.30),
        platform_rate: dec!(0.03),
    };

    pub fn processing_fee(&self, amount: Decimal) -> Decimal {
        amount
            .saturating_mul(self.processing_rate)
            .saturating_add(self.processing_flat)
    }

    pub fn platform_fee(&self, amount: Decimal) -> Decimal {
        amount.saturating_mul(self.platform_rate)
    }

    /// Allocate `amount + tip` between processing, platform and beneficiary.
    ///
    /// The tip pays the processing fee first and the platform fee second.
    /// Once it covers both, the beneficiary keeps the whole donation and the
    /// rest of the tip is platform margin. Inputs are not validated: callers
    /// clamp `amount >= 1` and `tip >= 0` beforehand. Sums that would leave
    /// the `Decimal` range saturate at its bounds.
    pub fn split(&self, amount: Decimal, tip: Decimal) -> DonationSplit {
        let processing_fee = self.processing_fee(amount);
        let platform_fee = self.platform_fee(amount);
        let total_fees = processing_fee.saturating_add(platform_fee);

        let (coverage, processing_fee_remaining, platform_fee_remaining, beneficiary_receives) =
            if tip >= total_fees {
                (Coverage::Covered, Decimal::ZERO, Decimal::ZERO, amount)
            } else {
                let to_processing = tip.min(processing_fee);
                let to_platform = tip.saturating_sub(processing_fee).max(Decimal::ZERO);
                (
                    Coverage::Partial,
                    processing_fee
                        .saturating_sub(to_processing)
                        .max(Decimal::ZERO),
                    platform_fee.saturating_sub(to_platform).max(Decimal::ZERO),
                    amount.saturating_sub(total_fees.saturating_sub(tip)),
                )
            };

        let tip_percent_of_donation = if amount.is_zero() {
            Decimal::ZERO
        } else {
            tip.checked_div(amount).unwrap_or(Decimal::ZERO)
        };

        let split = DonationSplit {
            amount,
            processing_fee,
            platform_fee,
            total_fees,
            coverage,
            processing_fee_remaining,
            platform_fee_remaining,
            tip_applied: tip,
            beneficiary_receives,
            donor_total_charge: amount.saturating_add(tip),
            tip_percent_of_donation,
        };

        debug!(
            amount = %split.amount,
            tip = %split.tip_applied,
            coverage = ?split.coverage,
            beneficiary_receives = %split.beneficiary_receives,
            "Computed donation split"
        );

        split
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Whether the tip absorbed every fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    /// `tip >= total_fees`: beneficiary receives the full donation.
    Covered,
    /// The shortfall is deducted from the donation.
    Partial,
}

/// How a donation and its tip are allocated. Exact, unrounded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationSplit {
    pub amount: Decimal,
    pub processing_fee: Decimal,
    pub platform_fee: Decimal,
    pub total_fees: Decimal,
    pub coverage: Coverage,
    /// Processing fee left after the tip is applied to it.
    pub processing_fee_remaining: Decimal,
    /// Platform fee left after any tip beyond the processing fee.
    pub platform_fee_remaining: Decimal,
    /// Always the input tip.
    pub tip_applied: Decimal,
    pub beneficiary_receives: Decimal,
    /// `amount + tip`, whatever the allocation.
    pub donor_total_charge: Decimal,
    /// `tip / amount` as a fraction; zero for a zero amount.
    pub tip_percent_of_donation: Decimal,
}

impl DonationSplit {
    pub fn is_covered(&self) -> bool {
        self.coverage == Coverage::Covered
    }

    /// Format every money field to two decimal places.
    pub fn display(&self) -> DisplaySplit {
        DisplaySplit {
            amount: format_money(self.amount),
            processing_fee: format_money(self.processing_fee),
            platform_fee: format_money(self.platform_fee),
            total_fees: format_money(self.total_fees),
            processing_fee_remaining: format_money(self.processing_fee_remaining),
            platform_fee_remaining: format_money(self.platform_fee_remaining),
            tip_applied: format_money(self.tip_applied),
            beneficiary_receives: format_money(self.beneficiary_receives),
            donor_total_charge: format_money(self.donor_total_charge),
            tip_percent_of_donation: format_percent(self.tip_percent_of_donation),
        }
    }
}

/// Display-ready split. Strings so that `100` renders as `100.00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySplit {
    pub amount: String,
    pub processing_fee: String,
    pub platform_fee: String,
    pub total_fees: String,
    pub processing_fee_remaining: String,
    pub platform_fee_remaining: String,
    pub tip_applied: String,
    pub beneficiary_receives: String,
    pub donor_total_charge: String,
    pub tip_percent_of_donation: String,
}

/// Compute the split under the standard fee schedule.
pub fn compute_donation_split(amount: Decimal, tip: Decimal) -> DonationSplit {
    FeeSchedule::STANDARD.split(amount, tip)
}

/// Convert currency units to integer minor units (cents), rounding half away
/// from zero. `None` if the result does not fit in an `i64`.
pub fn to_minor_units(value: Decimal) -> Option<i64> {
    round_cents(value)
        .checked_mul(dec!(100))
        .and_then(|cents| cents.to_i64())
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn format_money(value: Decimal) -> String {
    let mut rounded = round_cents(value);
    rounded.rescale(2);
    rounded.to_string()
}

fn format_percent(fraction: Decimal) -> String {
    let mut pct =
        fraction
            .saturating_mul(dec!(100))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    pct.rescale(1);
    format!("{}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ui_values_are_fully_covered() {
        let split = compute_donation_split(dec!(100), dec!(10));
        assert_eq!(split.processing_fee, dec!(3.20));
        assert_eq!(split.platform_fee, dec!(3.00));
        assert_eq!(split.total_fees, dec!(6.20));
        assert!(split.is_covered());
        assert_eq!(split.beneficiary_receives, dec!(100));
        assert_eq!(split.processing_fee_remaining, Decimal::ZERO);
        assert_eq!(split.platform_fee_remaining, Decimal::ZERO);
        assert_eq!(split.donor_total_charge, dec!(110));
        assert_eq!(split.tip_applied, dec!(10));
        assert_eq!(split.tip_percent_of_donation, dec!(0.1));
    }

    #[test]
    fn small_tip_goes_to_processing_first() {
        let split = compute_donation_split(dec!(100), dec!(2));
        assert_eq!(split.coverage, Coverage::Partial);
        assert_eq!(split.processing_fee_remaining, dec!(1.20));
        assert_eq!(split.platform_fee_remaining, dec!(3.00));
        assert_eq!(split.beneficiary_receives, dec!(95.80));
        assert_eq!(split.donor_total_charge, dec!(102));
    }

    #[test]
    fn zero_tip_deducts_all_fees() {
        let split = compute_donation_split(dec!(50), Decimal::ZERO);
        assert_eq!(split.processing_fee, dec!(1.75));
        assert_eq!(split.platform_fee, dec!(1.50));
        assert_eq!(split.processing_fee_remaining, dec!(1.75));
        assert_eq!(split.platform_fee_remaining, dec!(1.50));
        assert_eq!(split.beneficiary_receives, dec!(46.75));
        assert_eq!(split.donor_total_charge, dec!(50));
        assert_eq!(split.tip_percent_of_donation, Decimal::ZERO);
    }

    #[test]
    fn tip_overflowing_processing_reduces_platform_fee() {
        // processing 3.20, platform 3.00
        let split = compute_donation_split(dec!(100), dec!(5));
        assert_eq!(split.processing_fee_remaining, Decimal::ZERO);
        assert_eq!(split.platform_fee_remaining, dec!(1.20));
        assert_eq!(split.beneficiary_receives, dec!(98.80));
    }

    #[test]
    fn tip_equal_to_total_fees_counts_as_covered() {
        let split = compute_donation_split(dec!(100), dec!(6.20));
        assert!(split.is_covered());
        assert_eq!(split.beneficiary_receives, dec!(100));
        assert_eq!(split.processing_fee_remaining, Decimal::ZERO);
        assert_eq!(split.platform_fee_remaining, Decimal::ZERO);

        let just_under = compute_donation_split(dec!(100), dec!(6.19));
        assert!(!just_under.is_covered());
        assert_eq!(just_under.beneficiary_receives, dec!(99.99));
    }

    #[test]
    fn minimum_donation_split() {
        let split = compute_donation_split(dec!(1), Decimal::ZERO);
        assert_eq!(split.processing_fee, dec!(0.329));
        assert_eq!(split.platform_fee, dec!(0.03));
        assert_eq!(split.beneficiary_receives, dec!(0.641));
    }

    #[test]
    fn zero_amount_has_zero_tip_percent() {
        let split = compute_donation_split(Decimal::ZERO, dec!(5));
        assert_eq!(split.tip_percent_of_donation, Decimal::ZERO);
    }

    #[test]
    fn display_rounds_only_at_the_end() {
        // 123.45 * 0.029 + 0.30 = 3.88005
        let split = compute_donation_split(dec!(123.45), Decimal::ZERO);
        assert_eq!(split.processing_fee, dec!(3.88005));
        let display = split.display();
        assert_eq!(display.processing_fee, "3.88");
        assert_eq!(display.platform_fee, "3.70");
        assert_eq!(display.amount, "123.45");
        assert_eq!(display.tip_percent_of_donation, "0.0%");

        let display = compute_donation_split(dec!(100), dec!(10)).display();
        assert_eq!(display.beneficiary_receives, "100.00");
        assert_eq!(display.donor_total_charge, "110.00");
        assert_eq!(display.processing_fee_remaining, "0.00");
        assert_eq!(display.tip_percent_of_donation, "10.0%");
    }

    #[test]
    fn minor_units_round_half_away_from_zero() {
        assert_eq!(to_minor_units(dec!(3.20)), Some(320));
        assert_eq!(to_minor_units(dec!(0.005)), Some(1));
        assert_eq!(to_minor_units(dec!(0.641)), Some(64));
        assert_eq!(to_minor_units(dec!(-1.005)), Some(-101));
    }

    #[test]
    fn extreme_inputs_saturate_instead_of_panicking() {
        let split = compute_donation_split(Decimal::MAX, Decimal::MAX);
        assert!(split.is_covered());
        assert_eq!(split.beneficiary_receives, Decimal::MAX);
        assert_eq!(split.donor_total_charge, Decimal::MAX);
        assert_eq!(split.tip_percent_of_donation, Decimal::ONE);

        let split = compute_donation_split(dec!(1), Decimal::MAX);
        assert_eq!(split.donor_total_charge, Decimal::MAX);
        assert_eq!(split.beneficiary_receives, dec!(1));
        let display = split.display();
        assert!(display.tip_percent_of_donation.ends_with('%'));

        let split = compute_donation_split(Decimal::MAX, Decimal::ZERO);
        assert!(!split.is_covered());
        assert!(split.beneficiary_receives < Decimal::MAX);
        assert_eq!(split.donor_total_charge, Decimal::MAX);
    }

    #[test]
    fn minor_units_out_of_range_is_none() {
        assert_eq!(to_minor_units(Decimal::MAX), None);
    }

    #[test]
    fn split_serializes_money_as_strings() {
        let split = compute_donation_split(dec!(100), dec!(2));
        let json = serde_json::to_value(&split).unwrap();
        assert_eq!(json["coverage"], "partial");
        // scale is carried through the arithmetic, not trimmed
        assert_eq!(json["beneficiary_receives"], "95.800");
        let restored: DonationSplit = serde_json::from_value(json).unwrap();
        assert_eq!(restored, split);
    }

    #[test]
    fn standard_schedule_is_the_default() {
        assert_eq!(FeeSchedule::default(), FeeSchedule::STANDARD);
        assert_eq!(FeeSchedule::STANDARD.processing_rate, dec!(0.029));
    }
}
