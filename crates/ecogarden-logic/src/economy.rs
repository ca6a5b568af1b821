//! Player economy — points balance, nickname and earned badges.
//!
//! Points never go negative. Spending checks the balance first and fails
//! without touching it; penalties are floored at zero.

use serde::{Deserialize, Serialize};

use crate::error::GardenError;

/// Points needed to fill the "next badge" progress bar.
pub const BADGE_THRESHOLD: u32 = 100;

/// The player's wallet and profile, shared by the garden and habit screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEconomy {
    points: u32,
    nickname: String,
    badges: Vec<String>,
}

impl Default for UserEconomy {
    fn default() -> Self {
        Self::new("Eco Enthusiast", 0)
    }
}

impl UserEconomy {
    pub fn new(nickname: &str, points: u32) -> Self {
        Self {
            points,
            nickname: nickname.to_string(),
            badges: Vec::new(),
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn set_nickname(&mut self, nickname: &str) {
        self.nickname = nickname.to_string();
    }

    pub fn badges(&self) -> &[String] {
        &self.badges
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.points >= cost
    }

    /// Add points (harvests, rewards, bonuses).
    pub fn credit(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    /// Pay `cost` points, or fail with the shortfall and leave the balance alone.
    pub fn spend(&mut self, cost: u32) -> Result<(), GardenError> {
        if !self.can_afford(cost) {
            return Err(GardenError::InsufficientFunds {
                needed: cost,
                available: self.points,
            });
        }
        self.points -= cost;
        Ok(())
    }

    /// Remove up to `amount` points. Returns how many were actually lost.
    pub fn penalize(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.points);
        self.points -= lost;
        lost
    }

    /// Award a badge. Returns false if the player already has it.
    pub fn award_badge(&mut self, badge: &str) -> bool {
        if self.badges.iter().any(|b| b == badge) {
            return false;
        }
        self.badges.push(badge.to_string());
        true
    }

    /// Progress toward the next badge, 0.0..=1.0.
    pub fn badge_progress(&self) -> f32 {
        (self.points as f32 / BADGE_THRESHOLD as f32).clamp(0.0, 1.0)
    }
}
