//! Contextual and regional point multipliers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::InvalidCatalogError;

/// Boolean context about the user and the moment an action happens.
///
/// All flags default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextFlags {
    pub is_new_user: bool,
    pub is_premium: bool,
    pub is_expert: bool,
    pub is_community_leader: bool,
    pub is_festival_period: bool,
    pub is_weekend: bool,
    pub is_birthday_month: bool,
}

/// Multiplicative factor per context condition. Every factor is > 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextMultipliers {
    pub new_user: f64,
    pub premium: f64,
    pub expert: f64,
    pub community_leader: f64,
    pub festival_period: f64,
    pub weekend: f64,
    pub birthday_month: f64,
}

impl Default for ContextMultipliers {
    fn default() -> Self {
        Self {
            new_user: 1.5,
            premium: 1.2,
            expert: 1.3,
            community_leader: 1.4,
            festival_period: 2.0,
            weekend: 1.1,
            birthday_month: 1.25,
        }
    }
}

impl ContextMultipliers {
    pub fn validate(&self) -> Result<(), InvalidCatalogError> {
        for (name, value) in self.named() {
            if !value.is_finite() || value <= 1.0 {
                return Err(InvalidCatalogError::MultiplierNotAboveOne { name, value });
            }
        }
        Ok(())
    }

    /// Fold every active flag into a single factor (1.0 when none are set)
    pub fn combined(&self, flags: &ContextFlags) -> f64 {
        let active = [
            (flags.is_new_user, self.new_user),
            (flags.is_premium, self.premium),
            (flags.is_expert, self.expert),
            (flags.is_community_leader, self.community_leader),
            (flags.is_festival_period, self.festival_period),
            (flags.is_weekend, self.weekend),
            (flags.is_birthday_month, self.birthday_month),
        ];

        active
            .iter()
            .filter(|(on, _)| *on)
            .fold(1.0, |acc, (_, factor)| acc * factor)
    }

    fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("new_user", self.new_user),
            ("premium", self.premium),
            ("expert", self.expert),
            ("community_leader", self.community_leader),
            ("festival_period", self.festival_period),
            ("weekend", self.weekend),
            ("birthday_month", self.birthday_month),
        ]
    }
}

/// Optional regional context for an award
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalContext {
    pub city: Option<String>,
    pub festival: Option<String>,
    pub breed: Option<String>,
}

/// Regional bonuses applied on top of the contextual multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalBonusTable {
    pub major_city_bonus: f64,
    pub major_cities: Vec<String>,
    /// Festival name -> multiplier
    pub festivals: BTreeMap<String, f64>,
    pub native_breed_bonus: f64,
    pub native_breeds: Vec<String>,
}

impl Default for RegionalBonusTable {
    fn default() -> Self {
        Self {
            major_city_bonus: 1.1,
            major_cities: Vec::new(),
            festivals: BTreeMap::new(),
            native_breed_bonus: 1.2,
            native_breeds: Vec::new(),
        }
    }
}

impl RegionalBonusTable {
    pub fn validate(&self) -> Result<(), InvalidCatalogError> {
        let fixed = [
            ("major_city_bonus".to_string(), self.major_city_bonus),
            ("native_breed_bonus".to_string(), self.native_breed_bonus),
        ];
        let festivals = self
            .festivals
            .iter()
            .map(|(name, value)| (format!("festival:{}", name), *value));

        for (name, value) in fixed.into_iter().chain(festivals) {
            if !value.is_finite() || value < 1.0 {
                return Err(InvalidCatalogError::RegionalBonusBelowOne { name, value });
            }
        }
        Ok(())
    }

    /// Product of every recognised regional bonus; unknown names count as 1.0
    pub fn bonus(&self, ctx: &RegionalContext) -> f64 {
        let mut bonus = 1.0;

        if let Some(city) = ctx.city.as_deref() {
            if contains_name(&self.major_cities, city) {
                bonus *= self.major_city_bonus;
            }
        }

        if let Some(factor) = ctx
            .festival
            .as_deref()
            .and_then(|festival| self.festival_multiplier(festival))
        {
            bonus *= factor;
        }

        if let Some(breed) = ctx.breed.as_deref() {
            if contains_name(&self.native_breeds, breed) {
                bonus *= self.native_breed_bonus;
            }
        }

        bonus
    }

    pub fn festival_multiplier(&self, name: &str) -> Option<f64> {
        let wanted = normalize(name);
        self.festivals
            .iter()
            .find(|(k, _)| normalize(k) == wanted)
            .map(|(_, v)| *v)
    }
}

fn contains_name(list: &[String], name: &str) -> bool {
    let wanted = normalize(name);
    list.iter().any(|entry| normalize(entry) == wanted)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
