//! Donation core for Zoomies.
//!
//! This crate holds the pieces of the app that are more than UI glue:
//!
//! - **Split calculator**: given a donation and a voluntary tip, decide how
//!   the donor's charge is divided between card processing, the platform and
//!   the beneficiary sanctuary. The tip pays the processing fee first, then
//!   the platform fee.
//! - **Donation requests**: platform defaults and input clamping applied
//!   before a split is computed.
//! - **Records**: typed rows for the hosted data store (profiles, animals,
//!   donations, follows, posts, comments, votes).
//! - **Dashboard**: totals over donation records.
//! - **Optimistic updates**: apply speculative state, then confirm or revert.
//!
//! All money is exact decimal (`rust_decimal`). Rounding happens only when a
//! value is formatted for display.

#![deny(unsafe_code)]

pub mod dashboard;
pub mod error;
pub mod fees;
pub mod optimistic;
pub mod records;
pub mod types;

pub use dashboard::{BeneficiaryTotals, DonationSummary};
pub use error::ZoomiesError;
pub use fees::{
    compute_donation_split, to_minor_units, Coverage, DisplaySplit, DonationSplit, FeeSchedule,
};
pub use optimistic::{FollowState, Speculative, VoteTally};
pub use records::{
    AnimalProfile, Comment, DonationRecord, Follow, Post, PostVote, Profile, ProfileRole,
    VoteDirection,
};
pub use types::{DonationDefaults, DonationRequest, MIN_DONATION};
