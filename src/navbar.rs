#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavbarTint {
    Translucent,
    Solid,
}

impl NavbarTint {
    pub fn background(self) -> &'static str {
        match self {
            Self::Translucent => "rgba(26, 26, 46, 0.95)",
            Self::Solid => "rgba(26, 26, 46, 0.98)",
        }
    }

    pub fn backdrop_filter(self) -> &'static str {
        match self {
            Self::Translucent => "blur(10px)",
            Self::Solid => "blur(15px)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavbarPosition {
    Docked,
    Hidden,
}

impl NavbarPosition {
    pub fn transform(self) -> &'static str {
        match self {
            Self::Docked => "translateY(0)",
            Self::Hidden => "translateY(-100%)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavbarLook {
    pub tint: NavbarTint,
    pub position: NavbarPosition,
}

/// Decides how the navbar looks for each scroll offset.
///
/// Keeps the previous offset so it can tell scroll direction. Every call to
/// [`NavbarTracker::observe`] overwrites it.
#[derive(Clone, Debug)]
pub struct NavbarTracker {
    last_offset: f64,
    tint_threshold: f64,
    hide_threshold: f64,
}

impl NavbarTracker {
    pub fn new(initial_offset: f64, tint_threshold: f64, hide_threshold: f64) -> Self {
        Self {
            last_offset: initial_offset,
            tint_threshold,
            hide_threshold,
        }
    }

    pub fn observe(&mut self, offset: f64) -> NavbarLook {
        let tint = if offset > self.tint_threshold {
            NavbarTint::Solid
        } else {
            NavbarTint::Translucent
        };

        let scrolling_down = offset > self.last_offset;
        let position = if scrolling_down && offset > self.hide_threshold {
            NavbarPosition::Hidden
        } else {
            NavbarPosition::Docked
        };

        self.last_offset = offset;
        NavbarLook { tint, position }
    }

    #[cfg(test)]
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> NavbarTracker {
        NavbarTracker::new(0.0, 100.0, 200.0)
    }

    #[test]
    fn docked_and_translucent_at_top() {
        let look = tracker().observe(0.0);
        assert_eq!(look.position, NavbarPosition::Docked);
        assert_eq!(look.tint, NavbarTint::Translucent);
        assert_eq!(look.position.transform(), "translateY(0)");
    }

    #[test]
    fn tint_switches_past_threshold_without_hysteresis() {
        let mut tracker = tracker();
        assert_eq!(tracker.observe(100.0).tint, NavbarTint::Translucent);
        assert_eq!(tracker.observe(100.5).tint, NavbarTint::Solid);
        assert_eq!(tracker.observe(100.0).tint, NavbarTint::Translucent);
        assert_eq!(NavbarTint::Solid.background(), "rgba(26, 26, 46, 0.98)");
        assert_eq!(NavbarTint::Solid.backdrop_filter(), "blur(15px)");
    }

    #[test]
    fn hides_only_when_scrolling_down_past_threshold() {
        let mut tracker = tracker();
        assert_eq!(tracker.observe(150.0).position, NavbarPosition::Docked);
        assert_eq!(tracker.observe(200.0).position, NavbarPosition::Docked);
        assert_eq!(tracker.observe(201.0).position, NavbarPosition::Hidden);
        assert_eq!(tracker.observe(900.0).position, NavbarPosition::Hidden);
        assert_eq!(tracker.last_offset(), 900.0);
    }

    #[test]
    fn scrolling_up_redocks_on_the_next_event() {
        let mut tracker = tracker();
        tracker.observe(500.0);
        assert_eq!(tracker.observe(800.0).position, NavbarPosition::Hidden);
        assert_eq!(tracker.observe(799.0).position, NavbarPosition::Docked);
        assert_eq!(tracker.observe(799.0).position, NavbarPosition::Docked);
        assert_eq!(NavbarPosition::Hidden.transform(), "translateY(-100%)");
    }

    #[test]
    fn initial_offset_sets_the_direction_baseline() {
        let mut tracker = NavbarTracker::new(1_000.0, 100.0, 200.0);
        assert_eq!(tracker.observe(600.0).position, NavbarPosition::Docked);
        assert_eq!(tracker.observe(601.0).position, NavbarPosition::Hidden);
    }
}
