//! Typed rows read from and written to the hosted data store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fees::DonationSplit;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfileRole {
    Supporter,
    Sanctuary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: ProfileRole,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(username: impl Into<String>, role: ProfileRole) -> Self {
        let username = username.into();
        Self {
            id: Uuid::new_v4(),
            display_name: username.clone(),
            username,
            role,
            bio: None,
            avatar_url: None,
            banner_url: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_sanctuary(&self) -> bool {
        self.role == ProfileRole::Sanctuary
    }
}

/// An ambassador animal living at a sanctuary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnimalProfile {
    pub id: Uuid,
    pub sanctuary_id: Uuid,
    pub name: String,
    pub species: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AnimalProfile {
    pub fn new(sanctuary_id: Uuid, name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sanctuary_id,
            name: name.into(),
            species: species.into(),
            bio: None,
            photo_url: None,
            created_at: Utc::now(),
        }
    }
}

/// A completed donation, snapshotting the split that was shown to the donor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DonationRecord {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub sanctuary_id: Uuid,
    /// Set when the donation was made from an animal's page.
    pub animal_id: Option<Uuid>,
    pub amount: Decimal,
    pub tip: Decimal,
    pub processing_fee: Decimal,
    pub platform_fee: Decimal,
    pub beneficiary_receives: Decimal,
    pub donor_total_charge: Decimal,
    pub created_at: DateTime<Utc>,
}

impl DonationRecord {
    pub fn from_split(
        donor_id: Uuid,
        sanctuary_id: Uuid,
        animal_id: Option<Uuid>,
        split: &DonationSplit,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            donor_id,
            sanctuary_id,
            animal_id,
            amount: split.amount,
            tip: split.tip_applied,
            processing_fee: split.processing_fee,
            platform_fee: split.platform_fee,
            beneficiary_receives: split.beneficiary_receives,
            donor_total_charge: split.donor_total_charge,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub animal_id: Option<Uuid>,
    pub body: String,
    pub image_url: Option<String>,
    /// Upvotes minus downvotes.
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn weight(self) -> i64 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostVote {
    pub post_id: Uuid,
    pub voter_id: Uuid,
    pub direction: VoteDirection,
}
