use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::records::DonationRecord;

/// Totals over a set of donations, e.g. everything a supporter has given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationSummary {
    pub donation_count: usize,
    pub total_donated: Decimal,
    pub total_tips: Decimal,
    pub total_fees: Decimal,
    pub total_received_by_beneficiaries: Decimal,
    pub total_charged: Decimal,
}

impl DonationSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DonationRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut summary, record| {
                summary.donation_count += 1;
                summary.total_donated = summary.total_donated.saturating_add(record.amount);
                summary.total_tips = summary.total_tips.saturating_add(record.tip);
                summary.total_fees = summary
                    .total_fees
                    .saturating_add(record.processing_fee.saturating_add(record.platform_fee));
                summary.total_received_by_beneficiaries = summary
                    .total_received_by_beneficiaries
                    .saturating_add(record.beneficiary_receives);
                summary.total_charged = summary
                    .total_charged
                    .saturating_add(record.donor_total_charge);
                summary
            })
    }
}

/// Proceeds for one sanctuary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryTotals {
    pub sanctuary_id: Uuid,
    pub donation_count: usize,
    pub received: Decimal,
    pub distinct_donors: usize,
}

impl BeneficiaryTotals {
    /// Group by sanctuary; largest `received` first, ties by id.
    pub fn group<'a>(records: impl IntoIterator<Item = &'a DonationRecord>) -> Vec<Self> {
        let mut grouped: BTreeMap<Uuid, (usize, Decimal, Vec<Uuid>)> = BTreeMap::new();
        for record in records {
            let entry = grouped
                .entry(record.sanctuary_id)
                .or_insert_with(|| (0, Decimal::ZERO, Vec::new()));
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(record.beneficiary_receives);
            if !entry.2.contains(&record.donor_id) {
                entry.2.push(record.donor_id);
            }
        }

        let mut totals = grouped
            .into_iter()
            .map(|(sanctuary_id, (donation_count, received, donors))| Self {
                sanctuary_id,
                donation_count,
                received,
                distinct_donors: donors.len(),
            })
            .collect::<Vec<_>>();
        totals.sort_by(|a, b| {
            b.received
                .cmp(&a.received)
                .then_with(|| a.sanctuary_id.cmp(&b.sanctuary_id))
        });
        totals
    }
}
