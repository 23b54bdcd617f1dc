const DEFAULT_LOADER_DELAY_MS: u32 = 1_500;
const DEFAULT_LOADER_FADE_MS: u32 = 500;
const DEFAULT_HEADER_OFFSET: f64 = 80.0;
const DEFAULT_SUBMIT_DELAY_MS: u32 = 2_000;
const DEFAULT_TOAST_LIFETIME_MS: u32 = 5_000;

const LOADER_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const SUBMIT_DELAY_MS_BOUNDS: (u32, u32) = (0, 30_000);
const TOAST_LIFETIME_MS_BOUNDS: (u32, u32) = (500, 60_000);
const HEADER_OFFSET_BOUNDS: (f64, f64) = (0.0, 400.0);

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Timings and thresholds for every page effect.
///
/// Defaults match the shipped stylesheet. A page can override the ones that
/// depend on its own markup through `data-*` attributes on `<html>`.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub loader_delay_ms: u32,
    pub loader_fade_ms: u32,
    pub header_offset: f64,
    pub reveal_stagger_seconds: f64,
    pub navbar_tint_threshold: f64,
    pub navbar_hide_threshold: f64,
    pub submit_delay_ms: u32,
    pub toast_lifetime_ms: u32,
    pub hero_amplitude: f64,
    pub hero_phase_step: f64,
    pub debug_logging: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            loader_delay_ms: DEFAULT_LOADER_DELAY_MS,
            loader_fade_ms: DEFAULT_LOADER_FADE_MS,
            header_offset: DEFAULT_HEADER_OFFSET,
            reveal_stagger_seconds: 0.1,
            navbar_tint_threshold: 100.0,
            navbar_hide_threshold: 200.0,
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            toast_lifetime_ms: DEFAULT_TOAST_LIFETIME_MS,
            hero_amplitude: 3.0,
            hero_phase_step: 0.5,
            debug_logging: false,
        }
    }
}

impl PageConfig {
    /// Builds a config from attribute lookups, keyed by the attribute name
    /// without the `data-` prefix.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            loader_delay_ms: parse_u32_with_bounds(
                lookup("loader-delay-ms"),
                defaults.loader_delay_ms,
                LOADER_DELAY_MS_BOUNDS,
            ),
            header_offset: parse_f64_with_bounds(
                lookup("header-offset"),
                defaults.header_offset,
                HEADER_OFFSET_BOUNDS,
            ),
            submit_delay_ms: parse_u32_with_bounds(
                lookup("submit-delay-ms"),
                defaults.submit_delay_ms,
                SUBMIT_DELAY_MS_BOUNDS,
            ),
            toast_lifetime_ms: parse_u32_with_bounds(
                lookup("toast-lifetime-ms"),
                defaults.toast_lifetime_ms,
                TOAST_LIFETIME_MS_BOUNDS,
            ),
            debug_logging: parse_non_empty_string(lookup("log-level"))
                .is_some_and(|value| value.eq_ignore_ascii_case("debug")),
            ..defaults
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_element(root: Option<&web_sys::Element>) -> Self {
        match root {
            Some(root) => Self::from_lookup(|key| root.get_attribute(&format!("data-{key}"))),
            None => Self::default(),
        }
    }
}

pub fn parse_u32_with_bounds(raw: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub fn parse_f64_with_bounds(raw: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub fn parse_non_empty_string(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> PageConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        PageConfig::from_lookup(|key| attributes.get(key).cloned())
    }

    #[test]
    fn missing_attributes_keep_defaults() {
        assert_eq!(config_from(&[]), PageConfig::default());
    }

    #[test]
    fn overrides_within_bounds_are_applied() {
        let config = config_from(&[
            ("submit-delay-ms", " 750 "),
            ("toast-lifetime-ms", "8000"),
            ("header-offset", "64.5"),
            ("log-level", "DEBUG"),
        ]);

        assert_eq!(config.submit_delay_ms, 750);
        assert_eq!(config.toast_lifetime_ms, 8_000);
        assert_eq!(config.header_offset, 64.5);
        assert!(config.debug_logging);
        assert_eq!(config.loader_delay_ms, DEFAULT_LOADER_DELAY_MS);
    }

    #[test]
    fn out_of_range_or_garbage_values_fall_back() {
        let config = config_from(&[
            ("submit-delay-ms", "90000"),
            ("toast-lifetime-ms", "10"),
            ("header-offset", "NaN"),
            ("loader-delay-ms", "soon"),
            ("log-level", "  "),
        ]);

        assert_eq!(config.submit_delay_ms, DEFAULT_SUBMIT_DELAY_MS);
        assert_eq!(config.toast_lifetime_ms, DEFAULT_TOAST_LIFETIME_MS);
        assert_eq!(config.header_offset, DEFAULT_HEADER_OFFSET);
        assert_eq!(config.loader_delay_ms, DEFAULT_LOADER_DELAY_MS);
        assert!(!config.debug_logging);
    }
}
