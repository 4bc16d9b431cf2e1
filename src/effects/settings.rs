//! Per-track effect settings
//!
//! `EffectRack` holds exactly one [`EffectSettings`] per [`EffectKind`]. The
//! slots live in a fixed array indexed by kind, so a rack can never gain or
//! lose an entry after construction.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::registry::EffectKind;
use crate::error::LumniaError;

/// Parameter name to value.
pub type ParamMap = BTreeMap<String, f64>;

/// Enabled flag plus parameter values for one effect on one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSettings {
    pub enabled: bool,
    pub params: ParamMap,
}

impl EffectSettings {
    pub fn new(enabled: bool, params: ParamMap) -> Self {
        Self { enabled, params }
    }

    /// Build settings from literal `(name, value)` pairs.
    pub fn from_pairs(enabled: bool, pairs: &[(&str, f64)]) -> Self {
        let params = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        Self { enabled, params }
    }

    /// Get a single parameter value
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }
}

/// The complete effect rack of a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<EffectKind, EffectSettings>",
    into = "BTreeMap<EffectKind, EffectSettings>"
)]
pub struct EffectRack {
    slots: [EffectSettings; EffectKind::COUNT],
}

impl Default for EffectRack {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|i| EffectKind::ALL[i].default_settings()),
        }
    }
}

impl EffectRack {
    /// Rack populated from registry defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: EffectKind) -> &EffectSettings {
        &self.slots[kind.index()]
    }

    pub fn get_mut(&mut self, kind: EffectKind) -> &mut EffectSettings {
        &mut self.slots[kind.index()]
    }

    /// Replace the settings for one kind, returning the previous value.
    pub fn replace(&mut self, kind: EffectKind, settings: EffectSettings) -> EffectSettings {
        std::mem::replace(self.get_mut(kind), settings)
    }

    /// Iterate over all slots in rack order.
    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, &EffectSettings)> {
        EffectKind::ALL.into_iter().zip(self.slots.iter())
    }

    /// Kinds currently enabled.
    pub fn enabled_kinds(&self) -> Vec<EffectKind> {
        self.iter()
            .filter(|(_, settings)| settings.enabled)
            .map(|(kind, _)| kind)
            .collect()
    }
}

impl Index<EffectKind> for EffectRack {
    type Output = EffectSettings;

    fn index(&self, kind: EffectKind) -> &Self::Output {
        self.get(kind)
    }
}

impl IndexMut<EffectKind> for EffectRack {
    fn index_mut(&mut self, kind: EffectKind) -> &mut Self::Output {
        self.get_mut(kind)
    }
}

impl TryFrom<BTreeMap<EffectKind, EffectSettings>> for EffectRack {
    type Error = LumniaError;

    fn try_from(mut map: BTreeMap<EffectKind, EffectSettings>) -> Result<Self, Self::Error> {
        let mut rack = EffectRack::default();
        for kind in EffectKind::ALL {
            let settings = map
                .remove(&kind)
                .ok_or(LumniaError::MissingEffect { kind })?;
            rack.replace(kind, settings);
        }
        Ok(rack)
    }
}

impl From<EffectRack> for BTreeMap<EffectKind, EffectSettings> {
    fn from(rack: EffectRack) -> Self {
        EffectKind::ALL.into_iter().zip(rack.slots).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rack_matches_registry() {
        let rack = EffectRack::new();
        assert_eq!(rack.iter().count(), EffectKind::COUNT);
        for (kind, settings) in rack.iter() {
            assert_eq!(settings, &kind.default_settings());
        }
        assert_eq!(rack.enabled_kinds(), vec![EffectKind::Eq, EffectKind::Pan]);
    }

    #[test]
    fn test_replace_touches_one_slot() {
        let mut rack = EffectRack::new();
        let previous = rack.replace(
            EffectKind::Reverb,
            EffectSettings::from_pairs(true, &[("mix", 15.0), ("size", 40.0), ("decay", 1.8)]),
        );
        assert!(!previous.enabled);
        assert!(rack[EffectKind::Reverb].enabled);
        assert_eq!(rack[EffectKind::Reverb].param("size"), Some(40.0));
        for (kind, settings) in rack.iter().filter(|(k, _)| *k != EffectKind::Reverb) {
            assert_eq!(settings, &kind.default_settings());
        }
    }

    #[test]
    fn test_rack_serializes_as_keyed_map() {
        let rack = EffectRack::new();
        let json = serde_json::to_value(&rack).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), EffectKind::COUNT);
        assert_eq!(object["eq"]["enabled"], serde_json::Value::Bool(true));
        assert_eq!(object["delay"]["params"]["time"], serde_json::json!(500.0));

        let back: EffectRack = serde_json::from_value(json).unwrap();
        assert_eq!(back, rack);
    }

    #[test]
    fn test_rack_missing_kind_is_rejected() {
        let mut json = serde_json::to_value(EffectRack::new()).unwrap();
        json.as_object_mut().unwrap().remove("chorus");
        let err = serde_json::from_value::<EffectRack>(json).unwrap_err();
        assert!(err.to_string().contains("chorus"), "{err}");
    }

    #[test]
    fn test_rack_unknown_kind_is_rejected() {
        let mut json = serde_json::to_value(EffectRack::new()).unwrap();
        json.as_object_mut().unwrap().insert(
            "phaser".to_string(),
            serde_json::json!({ "enabled": false, "params": {} }),
        );
        assert!(serde_json::from_value::<EffectRack>(json).is_err());
    }
}
