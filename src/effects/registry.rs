//! Effect registry
//!
//! The closed catalog of effect kinds. Each kind owns a fixed set of
//! parameters with a legal range and a default value; the default rack of
//! every new track is built from this table.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::settings::{EffectSettings, ParamMap};

/// Effect kinds available on every track.
///
/// The set is closed: a track always carries exactly one settings entry for
/// each variant listed in [`EffectKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Tuning,
    Eq,
    Compression,
    Deesser,
    Cleaning,
    Saturation,
    Reverb,
    Delay,
    Chorus,
    Pan,
    Stereo,
}

/// Definition of a single effect parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Key used in the parameter map (e.g. "threshold")
    pub name: &'static str,
    /// Short label shown next to the knob
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Display unit, empty when unitless
    pub unit: &'static str,
}

impl ParamSpec {
    const fn new(
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        default: f64,
        unit: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            min,
            max,
            default,
            unit,
        }
    }

    /// Bound a value to this parameter's legal range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Check whether a value lies inside the legal range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

const TUNING_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("retune", "Retune", 0.0, 100.0, 20.0, "ms"),
    ParamSpec::new("humanize", "Human", 0.0, 100.0, 50.0, "%"),
    ParamSpec::new("scale", "Scale", 0.0, 12.0, 0.0, ""),
];

const EQ_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("low", "Low", -12.0, 12.0, 0.0, "dB"),
    ParamSpec::new("mid", "Mid", -12.0, 12.0, 0.0, "dB"),
    ParamSpec::new("high", "High", -12.0, 12.0, 0.0, "dB"),
];

const COMPRESSION_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("threshold", "Thresh", -60.0, 0.0, -20.0, "dB"),
    ParamSpec::new("ratio", "Ratio", 1.0, 20.0, 4.0, ""),
    ParamSpec::new("makeup", "Gain", 0.0, 24.0, 0.0, "dB"),
];

const DEESSER_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("freq", "Freq", 2000.0, 12000.0, 5000.0, "Hz"),
    ParamSpec::new("threshold", "Thresh", -60.0, 0.0, -20.0, "dB"),
    ParamSpec::new("range", "Range", 0.0, 24.0, 6.0, "dB"),
];

const CLEANING_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("noise", "Noise", 0.0, 100.0, 50.0, "%"),
    ParamSpec::new("gate", "Gate", -80.0, 0.0, -40.0, "dB"),
    ParamSpec::new("attack", "Attack", 0.0, 100.0, 10.0, "ms"),
];

const SATURATION_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("drive", "Drive", 0.0, 100.0, 0.0, "%"),
    ParamSpec::new("color", "Color", 0.0, 100.0, 50.0, "%"),
    ParamSpec::new("output", "Output", -12.0, 12.0, 0.0, "dB"),
];

const REVERB_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("mix", "Mix", 0.0, 100.0, 20.0, "%"),
    ParamSpec::new("size", "Size", 0.0, 100.0, 50.0, "%"),
    ParamSpec::new("decay", "Decay", 0.1, 10.0, 2.5, "s"),
];

const DELAY_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("time", "Time", 1.0, 2000.0, 500.0, "ms"),
    ParamSpec::new("feedback", "Feedback", 0.0, 100.0, 30.0, "%"),
    ParamSpec::new("mix", "Mix", 0.0, 100.0, 15.0, "%"),
];

const CHORUS_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("rate", "Rate", 0.1, 10.0, 1.5, "Hz"),
    ParamSpec::new("depth", "Depth", 0.0, 100.0, 40.0, "%"),
    ParamSpec::new("mix", "Mix", 0.0, 100.0, 20.0, "%"),
];

const PAN_PARAMS: &[ParamSpec] = &[ParamSpec::new("value", "Pan", -100.0, 100.0, 0.0, "")];

const STEREO_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("width", "Width", 0.0, 200.0, 100.0, "%"),
    ParamSpec::new("spread", "Spread", 0.0, 100.0, 50.0, "%"),
    ParamSpec::new("pan", "Pan", -100.0, 100.0, 0.0, ""),
];

impl EffectKind {
    /// Number of effect kinds.
    pub const COUNT: usize = 11;

    /// Every kind, in rack order.
    pub const ALL: [EffectKind; Self::COUNT] = [
        EffectKind::Tuning,
        EffectKind::Eq,
        EffectKind::Compression,
        EffectKind::Deesser,
        EffectKind::Cleaning,
        EffectKind::Saturation,
        EffectKind::Reverb,
        EffectKind::Delay,
        EffectKind::Chorus,
        EffectKind::Pan,
        EffectKind::Stereo,
    ];

    /// Position of this kind inside a rack.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Identifier used in serialized state.
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::Tuning => "tuning",
            EffectKind::Eq => "eq",
            EffectKind::Compression => "compression",
            EffectKind::Deesser => "deesser",
            EffectKind::Cleaning => "cleaning",
            EffectKind::Saturation => "saturation",
            EffectKind::Reverb => "reverb",
            EffectKind::Delay => "delay",
            EffectKind::Chorus => "chorus",
            EffectKind::Pan => "pan",
            EffectKind::Stereo => "stereo",
        }
    }

    /// Human-readable name for listings.
    pub fn display_name(self) -> &'static str {
        match self {
            EffectKind::Tuning => "Auto-Tune",
            EffectKind::Eq => "Equalizer",
            EffectKind::Compression => "Compressor",
            EffectKind::Deesser => "De-Esser",
            EffectKind::Cleaning => "Noise Cleaning",
            EffectKind::Saturation => "Saturation",
            EffectKind::Reverb => "Reverb",
            EffectKind::Delay => "Delay",
            EffectKind::Chorus => "Chorus",
            EffectKind::Pan => "Pan",
            EffectKind::Stereo => "Stereo Width",
        }
    }

    /// Parameters this kind accepts, with their ranges and defaults.
    pub fn param_specs(self) -> &'static [ParamSpec] {
        match self {
            EffectKind::Tuning => TUNING_PARAMS,
            EffectKind::Eq => EQ_PARAMS,
            EffectKind::Compression => COMPRESSION_PARAMS,
            EffectKind::Deesser => DEESSER_PARAMS,
            EffectKind::Cleaning => CLEANING_PARAMS,
            EffectKind::Saturation => SATURATION_PARAMS,
            EffectKind::Reverb => REVERB_PARAMS,
            EffectKind::Delay => DELAY_PARAMS,
            EffectKind::Chorus => CHORUS_PARAMS,
            EffectKind::Pan => PAN_PARAMS,
            EffectKind::Stereo => STEREO_PARAMS,
        }
    }

    /// Look up one parameter definition by key.
    pub fn param_spec(self, name: &str) -> Option<&'static ParamSpec> {
        self.param_specs().iter().find(|spec| spec.name == name)
    }

    /// EQ and pan are the always-on baseline; everything else starts bypassed.
    pub fn default_enabled(self) -> bool {
        matches!(self, EffectKind::Eq | EffectKind::Pan)
    }

    /// Fresh default settings for this kind.
    pub fn default_settings(self) -> EffectSettings {
        let params: ParamMap = self
            .param_specs()
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default))
            .collect();
        EffectSettings::new(self.default_enabled(), params)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, kind) in EffectKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_only_eq_and_pan_default_enabled() {
        let enabled: Vec<EffectKind> = EffectKind::ALL
            .into_iter()
            .filter(|k| k.default_settings().enabled)
            .collect();
        assert_eq!(enabled, vec![EffectKind::Eq, EffectKind::Pan]);
    }

    #[test_case(EffectKind::Tuning, &[("retune", 20.0), ("humanize", 50.0), ("scale", 0.0)])]
    #[test_case(EffectKind::Eq, &[("low", 0.0), ("mid", 0.0), ("high", 0.0)])]
    #[test_case(EffectKind::Compression, &[("threshold", -20.0), ("ratio", 4.0), ("makeup", 0.0)])]
    #[test_case(EffectKind::Deesser, &[("freq", 5000.0), ("threshold", -20.0), ("range", 6.0)])]
    #[test_case(EffectKind::Cleaning, &[("noise", 50.0), ("gate", -40.0), ("attack", 10.0)])]
    #[test_case(EffectKind::Saturation, &[("drive", 0.0), ("color", 50.0), ("output", 0.0)])]
    #[test_case(EffectKind::Reverb, &[("mix", 20.0), ("size", 50.0), ("decay", 2.5)])]
    #[test_case(EffectKind::Delay, &[("time", 500.0), ("feedback", 30.0), ("mix", 15.0)])]
    #[test_case(EffectKind::Chorus, &[("rate", 1.5), ("depth", 40.0), ("mix", 20.0)])]
    #[test_case(EffectKind::Pan, &[("value", 0.0)])]
    #[test_case(EffectKind::Stereo, &[("width", 100.0), ("spread", 50.0), ("pan", 0.0)])]
    fn test_default_params(kind: EffectKind, expected: &[(&str, f64)]) {
        let settings = kind.default_settings();
        assert_eq!(settings.params.len(), expected.len());
        for (name, value) in expected {
            assert_eq!(settings.param(name), Some(*value), "{kind}.{name}");
        }
    }

    #[test]
    fn test_defaults_lie_inside_ranges() {
        for kind in EffectKind::ALL {
            for spec in kind.param_specs() {
                assert!(spec.min < spec.max, "{kind}.{} has empty range", spec.name);
                assert!(spec.contains(spec.default), "{kind}.{} default out of range", spec.name);
            }
        }
    }

    #[test]
    fn test_param_spec_clamp() {
        let decay = EffectKind::Reverb.param_spec("decay").unwrap();
        assert_eq!(decay.clamp(0.0), 0.1);
        assert_eq!(decay.clamp(25.0), 10.0);
        assert_eq!(decay.clamp(1.8), 1.8);
        assert!(EffectKind::Reverb.param_spec("feedback").is_none());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&EffectKind::Deesser).unwrap(),
            "\"deesser\""
        );
        let kind: EffectKind = serde_json::from_str("\"stereo\"").unwrap();
        assert_eq!(kind, EffectKind::Stereo);
        for kind in EffectKind::ALL {
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
        }
    }
}
