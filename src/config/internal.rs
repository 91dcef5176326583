//! Built-in catalogs embedded at compile-time
//!
//! `assets/internal/defaults.toml` ships the platform's standard actions,
//! levels, achievements and chains. It is merged into user configuration with
//! versioned replacement for achievements and chains.

use std::collections::HashMap;

use super::Config;

/// Embedded defaults TOML content (compile-time)
pub const INTERNAL_DEFAULTS_TOML: &str = include_str!("../../assets/internal/defaults.toml");

/// Internal defaults share the user config format
#[derive(Debug, Clone)]
pub struct InternalDefaults {
    config: Config,
}

impl InternalDefaults {
    /// Parse the embedded defaults TOML
    pub fn load() -> Result<Self, toml::de::Error> {
        let config = toml::from_str(INTERNAL_DEFAULTS_TOML)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merge internal defaults into a config.
    ///
    /// - Missing actions, cities, festivals and breeds are added; user values win.
    /// - An empty level table is replaced by the built-in one.
    /// - Achievements and chains: missing ones are added; an existing one is
    ///   replaced only when the internal version is higher.
    ///
    /// Multipliers are never merged: missing fields already deserialize to the
    /// built-in values.
    pub fn merge_into(&self, target: &mut Config) -> bool {
        let defaults = &self.config;
        let mut changed = false;

        for (action, points) in &defaults.actions {
            if !target.actions.contains_key(action) {
                target.actions.insert(action.clone(), *points);
                changed = true;
            }
        }

        if target.levels.thresholds.is_empty() {
            target.levels = defaults.levels.clone();
            changed = true;
        }

        changed |= merge_names(
            &mut target.regional.major_cities,
            &defaults.regional.major_cities,
        );
        changed |= merge_names(
            &mut target.regional.native_breeds,
            &defaults.regional.native_breeds,
        );
        for (festival, factor) in &defaults.regional.festivals {
            if target.regional.festival_multiplier(festival).is_none() {
                target.regional.festivals.insert(festival.clone(), *factor);
                changed = true;
            }
        }

        changed |= merge_versioned(
            &mut target.achievement,
            &defaults.achievement,
            |a| a.id.as_str(),
            |a| a.version,
        );
        changed |= merge_versioned(
            &mut target.chain,
            &defaults.chain,
            |c| c.id.as_str(),
            |c| c.version,
        );

        changed
    }
}

fn merge_names(target: &mut Vec<String>, defaults: &[String]) -> bool {
    let mut changed = false;
    for name in defaults {
        let present = target
            .iter()
            .any(|existing| existing.trim().eq_ignore_ascii_case(name.trim()));
        if !present {
            target.push(name.clone());
            changed = true;
        }
    }
    changed
}

/// Add missing entries, upgrade entries whose internal version is higher
fn merge_versioned<T: Clone>(
    target: &mut Vec<T>,
    defaults: &[T],
    id: impl Fn(&T) -> &str,
    version: impl Fn(&T) -> u32,
) -> bool {
    let positions: HashMap<String, usize> = target
        .iter()
        .enumerate()
        .map(|(i, item)| (id(item).to_string(), i))
        .collect();

    let mut changed = false;
    for internal in defaults {
        match positions.get(id(internal)) {
            Some(&i) if version(&target[i]) >= version(internal) => {
                // User has same or newer version, keep it
            }
            Some(&i) => {
                target[i] = internal.clone();
                changed = true;
            }
            None => {
                target.push(internal.clone());
                changed = true;
            }
        }
    }
    changed
}
