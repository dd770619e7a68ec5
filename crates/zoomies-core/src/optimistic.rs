use std::fmt::Display;
use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ZoomiesError;
use crate::records::VoteDirection;

/// Client-side state that can run ahead of the server.
///
/// `apply` shows a change immediately; the server's answer then either
/// becomes the new confirmed value (`confirm`) or is discarded and the last
/// confirmed value is restored (`revert`). One speculative change may be in
/// flight at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speculative<T> {
    confirmed: T,
    pending: Option<T>,
}

impl<T: Clone> Speculative<T> {
    pub fn new(confirmed: T) -> Self {
        Self {
            confirmed,
            pending: None,
        }
    }

    /// What the UI should render.
    pub fn current(&self) -> &T {
        self.pending.as_ref().unwrap_or(&self.confirmed)
    }

    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn apply(&mut self, update: impl FnOnce(&mut T)) -> Result<&T, ZoomiesError> {
        if self.pending.is_some() {
            return Err(ZoomiesError::SpeculationInFlight);
        }
        let mut next = self.confirmed.clone();
        update(&mut next);
        Ok(self.pending.insert(next))
    }

    /// Accept the server's value, which may differ from the speculation.
    pub fn confirm(&mut self, server_value: T) -> Result<&T, ZoomiesError> {
        if self.pending.take().is_none() {
            return Err(ZoomiesError::NothingPending);
        }
        self.confirmed = server_value;
        Ok(&self.confirmed)
    }

    pub fn revert(&mut self) -> Result<&T, ZoomiesError> {
        if self.pending.take().is_none() {
            return Err(ZoomiesError::NothingPending);
        }
        Ok(&self.confirmed)
    }

    /// Apply `update`, hand the speculative value to `commit`, then confirm
    /// with its result or revert on error.
    pub async fn commit_with<F, Fut, E>(
        &mut self,
        update: impl FnOnce(&mut T),
        commit: F,
    ) -> Result<&T, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<ZoomiesError> + Display,
    {
        let speculative = self.apply(update)?.clone();
        match commit(speculative).await {
            Ok(server_value) => {
                debug!("Speculative update confirmed");
                Ok(self.confirm(server_value)?)
            }
            Err(err) => {
                warn!(error = %err, "Speculative update rejected, reverting");
                self.revert()?;
                Err(err)
            }
        }
    }
}

/// Follow button state on a profile page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowState {
    pub following: bool,
    pub follower_count: u64,
}

impl FollowState {
    pub fn toggle(&mut self) {
        if self.following {
            self.following = false;
            self.follower_count = self.follower_count.saturating_sub(1);
        } else {
            self.following = true;
            self.follower_count += 1;
        }
    }
}

/// A post's score and the viewer's own vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub score: i64,
    pub my_vote: Option<VoteDirection>,
}

impl VoteTally {
    /// Voting the same direction twice withdraws the vote; the opposite
    /// direction flips it.
    pub fn cast(&mut self, direction: VoteDirection) {
        if let Some(previous) = self.my_vote.take() {
            self.score -= previous.weight();
            if previous == direction {
                return;
            }
        }
        self.score += direction.weight();
        self.my_vote = Some(direction);
    }
}
