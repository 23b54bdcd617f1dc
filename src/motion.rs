//! Pure math behind the page's motion effects.

/// Vertical float applied to hero text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroFloat {
    pub amplitude: f64,
    pub phase_step: f64,
}

impl HeroFloat {
    pub fn offset(self, time_seconds: f64, index: usize) -> f64 {
        (time_seconds + index as f64 * self.phase_step).sin() * self.amplitude
    }

    pub fn transform(self, time_seconds: f64, index: usize) -> String {
        format!("translateY({}px)", self.offset(time_seconds, index))
    }
}

/// Animation delay for the `index`-th sibling in a reveal cascade.
pub fn stagger_delay(index: usize, step_seconds: f64) -> String {
    format!("{}s", index as f64 * step_seconds)
}

/// Remembers which reveal targets have already animated.
///
/// Targets are addressed by their position in the list handed to the observer.
#[derive(Clone, Debug)]
pub struct RevealTracker {
    revealed: Vec<bool>,
    stagger_seconds: f64,
}

impl RevealTracker {
    pub fn new(target_count: usize, stagger_seconds: f64) -> Self {
        Self {
            revealed: vec![false; target_count],
            stagger_seconds,
        }
    }

    /// Animation delay for the first intersection of `target`. Later
    /// intersections, and targets outside the list, get `None`.
    pub fn reveal(&mut self, target: usize, sibling_index: usize) -> Option<String> {
        let revealed = self.revealed.get_mut(target)?;
        if *revealed {
            return None;
        }
        *revealed = true;
        Some(stagger_delay(sibling_index, self.stagger_seconds))
    }
}

/// Document-relative scroll target for an element, leaving room for the fixed header.
pub fn scroll_target(rect_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    rect_top + page_offset - header_offset
}

/// Selector for an in-page link, or `None` for a bare `#`.
pub fn fragment_selector(href: &str) -> Option<&str> {
    href.strip_prefix('#')
        .filter(|fragment| !fragment.is_empty())
        .map(|_| href)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOAT: HeroFloat = HeroFloat {
        amplitude: 3.0,
        phase_step: 0.5,
    };

    #[test]
    fn hero_offset_stays_within_amplitude() {
        for step in 0..200 {
            let time = f64::from(step) * 0.137;
            for index in 0..3 {
                assert!(FLOAT.offset(time, index).abs() <= 3.0);
            }
        }
    }

    #[test]
    fn hero_offset_is_phase_shifted_per_element() {
        assert_eq!(FLOAT.offset(0.0, 0), 0.0);
        assert!((FLOAT.offset(0.0, 1) - 0.5_f64.sin() * 3.0).abs() < 1e-12);
        assert!((FLOAT.offset(std::f64::consts::FRAC_PI_2, 0) - 3.0).abs() < 1e-12);
        assert_eq!(FLOAT.transform(0.0, 0), "translateY(0px)");
    }

    #[test]
    fn stagger_grows_with_sibling_index() {
        assert_eq!(stagger_delay(0, 0.1), "0s");
        assert_eq!(stagger_delay(1, 0.1), "0.1s");
        assert_eq!(stagger_delay(2, 0.25), "0.5s");
    }

    #[test]
    fn each_target_is_revealed_exactly_once() {
        let mut tracker = RevealTracker::new(3, 0.1);
        assert_eq!(tracker.reveal(1, 1).as_deref(), Some("0.1s"));
        assert_eq!(tracker.reveal(1, 1), None);
        assert_eq!(tracker.reveal(0, 0).as_deref(), Some("0s"));

        // scrolling away and back again
        for _ in 0..5 {
            assert_eq!(tracker.reveal(0, 0), None);
            assert_eq!(tracker.reveal(1, 1), None);
        }
        assert_eq!(tracker.reveal(2, 2).as_deref(), Some("0.2s"));
        assert_eq!(tracker.reveal(3, 0), None);
    }

    #[test]
    fn scroll_target_subtracts_header() {
        assert_eq!(scroll_target(320.0, 1_000.0, 80.0), 1_240.0);
        assert_eq!(scroll_target(-50.0, 40.0, 80.0), -90.0);
    }

    #[test]
    fn fragment_selector_skips_bare_hash() {
        assert_eq!(fragment_selector("#contact"), Some("#contact"));
        assert_eq!(fragment_selector("#"), None);
        assert_eq!(fragment_selector("/about#team"), None);
    }
}
