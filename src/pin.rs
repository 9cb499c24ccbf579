use serde_json::json;

use crate::{
    logging::{log_event, LogLevel},
    viewport::Bounds,
};

pub const SERVICES_TITLE_BAR_HEIGHT_MOBILE: f64 = 100.0;
pub const SERVICES_TITLE_BAR_HEIGHT_DESKTOP: f64 = 170.0;
pub const SERVICES_CARD_ROW_HEIGHT: f64 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

impl Breakpoint {
    pub fn resolve(viewport_width: f64, breakpoint_px: u32) -> Self {
        if viewport_width < f64::from(breakpoint_px) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinLayout {
    pub title_bar_height: f64,
    pub row_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinConfig {
    pub breakpoint_px: u32,
    pub mobile: Option<PinLayout>,
    pub desktop: Option<PinLayout>,
}

impl PinConfig {
    pub fn services(breakpoint_px: u32) -> Self {
        Self {
            breakpoint_px,
            mobile: None,
            desktop: Some(PinLayout {
                title_bar_height: SERVICES_TITLE_BAR_HEIGHT_DESKTOP,
                row_height: SERVICES_CARD_ROW_HEIGHT,
            }),
        }
    }

    pub fn services_all_breakpoints(breakpoint_px: u32) -> Self {
        Self {
            mobile: Some(PinLayout {
                title_bar_height: SERVICES_TITLE_BAR_HEIGHT_MOBILE,
                row_height: SERVICES_CARD_ROW_HEIGHT,
            }),
            ..Self::services(breakpoint_px)
        }
    }

    pub fn top_on_desktop(breakpoint_px: u32) -> Self {
        Self {
            breakpoint_px,
            mobile: None,
            desktop: Some(PinLayout {
                title_bar_height: 0.0,
                row_height: 0.0,
            }),
        }
    }

    fn layout_for(&self, breakpoint: Breakpoint) -> Option<PinLayout> {
        match breakpoint {
            Breakpoint::Mobile => self.mobile,
            Breakpoint::Desktop => self.desktop,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PinSpec {
    sections: Vec<String>,
    layout: PinLayout,
    pin_points: Vec<f64>,
}

impl PinSpec {
    fn build(sections: &[String], layout: PinLayout) -> Self {
        let pin_points = (0..sections.len())
            .map(|index| layout.title_bar_height + index as f64 * layout.row_height.max(0.0))
            .collect();

        Self {
            sections: sections.to_vec(),
            layout,
            pin_points,
        }
    }

    pub fn pin_points(&self) -> &[f64] {
        &self.pin_points
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinState {
    Unpinned,
    Pinned,
    Released,
}

/// Decides which sections of a group are stuck to their slot at a given scroll
/// offset.
///
/// Scroll offsets are measured from the top of the group: `y = -group.top`.
/// Section `i` pins at `title_bar_height + i * row_height` and is released
/// once the bottom of the group reaches the bottom of the viewport. A released
/// section stays released until `y` drops back above its pin point.
pub struct PinChoreographer {
    config: PinConfig,
    breakpoint: Option<Breakpoint>,
    spec: Option<PinSpec>,
    states: Vec<PinState>,
}

impl PinChoreographer {
    pub fn new(config: PinConfig) -> Self {
        Self {
            config,
            breakpoint: None,
            spec: None,
            states: Vec::new(),
        }
    }

    pub fn rebuild(&mut self, viewport_width: f64, sections: &[String]) -> usize {
        self.spec = None;
        self.states.clear();

        let breakpoint = Breakpoint::resolve(viewport_width, self.config.breakpoint_px);
        self.breakpoint = Some(breakpoint);
        self.spec = self
            .config
            .layout_for(breakpoint)
            .map(|layout| PinSpec::build(sections, layout));
        self.states = vec![PinState::Unpinned; self.registered_count()];

        let (sections, layout) = match self.spec.as_ref() {
            Some(spec) => (spec.sections.len(), Some(spec.layout)),
            None => (sections.len(), None),
        };
        log_event(
            LogLevel::Debug,
            "pin_rebuild",
            json!({
                "breakpoint": breakpoint.as_str(),
                "sections": sections,
                "title_bar_height": layout.map(|layout| layout.title_bar_height),
                "row_height": layout.map(|layout| layout.row_height),
                "registered": self.registered_count(),
            }),
        );

        self.registered_count()
    }

    pub fn on_resize(&mut self, viewport_width: f64, sections: &[String]) -> bool {
        let breakpoint = Breakpoint::resolve(viewport_width, self.config.breakpoint_px);
        if self.breakpoint == Some(breakpoint) {
            return false;
        }

        self.rebuild(viewport_width, sections);
        true
    }

    pub fn teardown(&mut self) {
        self.spec = None;
        self.states.clear();
        self.breakpoint = None;
    }

    pub fn breakpoint(&self) -> Option<Breakpoint> {
        self.breakpoint
    }

    pub fn spec(&self) -> Option<&PinSpec> {
        self.spec.as_ref()
    }

    pub fn registered_count(&self) -> usize {
        self.spec
            .as_ref()
            .map(|spec| spec.pin_points.len())
            .unwrap_or(0)
    }

    pub fn states(&self) -> &[PinState] {
        &self.states
    }

    pub fn slot_top(&self, index: usize) -> Option<f64> {
        self.spec.as_ref()?.pin_points.get(index).copied()
    }

    pub fn pinned_index(&self, y: f64) -> Option<usize> {
        let spec = self.spec.as_ref()?;
        spec.pin_points
            .iter()
            .rposition(|pin_point| y >= *pin_point)
    }

    pub fn update(&mut self, group: Bounds, viewport_height: f64) -> Vec<(usize, PinState)> {
        let Some(spec) = self.spec.as_ref() else {
            return Vec::new();
        };

        let y = -group.top;
        let released = group.bottom <= viewport_height;
        let mut changed = Vec::new();

        for (index, pin_point) in spec.pin_points.iter().enumerate() {
            let next = match self.states[index] {
                _ if y < *pin_point => PinState::Unpinned,
                PinState::Released => PinState::Released,
                _ if released => PinState::Released,
                _ => PinState::Pinned,
            };

            if self.states[index] != next {
                self.states[index] = next;
                changed.push((index, next));
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("#service-card-{index}")).collect()
    }

    fn group_at(y: f64, height: f64) -> Bounds {
        Bounds {
            top: -y,
            bottom: height - y,
        }
    }

    #[test]
    fn pin_points_are_monotonic() {
        let mut pins = PinChoreographer::new(PinConfig::services(768));
        pins.rebuild(1_280.0, &cards(4));

        let points = pins.spec().map(|spec| spec.pin_points().to_vec()).unwrap_or_default();

        assert_eq!(points, vec![170.0, 250.0, 330.0, 410.0]);
        assert!(points.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn pinned_index_never_decreases_as_scroll_increases() {
        for count in 0..6 {
            let mut pins = PinChoreographer::new(PinConfig::services(768));
            pins.rebuild(1_440.0, &cards(count));

            let mut previous: Option<usize> = None;
            let mut y = -200.0;
            while y < 2_000.0 {
                let current = pins.pinned_index(y);
                assert!(current >= previous, "count {count}, y {y}");
                previous = current;
                y += 7.5;
            }
        }
    }

    #[test]
    fn section_walks_unpinned_pinned_released() {
        let mut pins = PinChoreographer::new(PinConfig::services(768));
        pins.rebuild(1_280.0, &cards(2));
        let group_height = 2_400.0;
        let viewport_height = 800.0;

        assert!(pins.update(group_at(0.0, group_height), viewport_height).is_empty());

        let changed = pins.update(group_at(200.0, group_height), viewport_height);
        assert_eq!(changed, vec![(0, PinState::Pinned)]);

        pins.update(group_at(300.0, group_height), viewport_height);
        assert_eq!(pins.states(), &[PinState::Pinned, PinState::Pinned]);

        pins.update(group_at(1_600.0, group_height), viewport_height);
        assert_eq!(pins.states(), &[PinState::Released, PinState::Released]);

        pins.update(group_at(100.0, group_height), viewport_height);
        assert_eq!(pins.states(), &[PinState::Unpinned, PinState::Unpinned]);
    }

    #[test]
    fn released_section_does_not_pin_again_on_the_way_back() {
        let mut pins = PinChoreographer::new(PinConfig::services(768));
        pins.rebuild(1_280.0, &cards(1));
        let viewport_height = 800.0;

        let history: Vec<Vec<(usize, PinState)>> = [200.0, 1_700.0, 1_000.0, 400.0]
            .into_iter()
            .map(|y| pins.update(group_at(y, 2_400.0), viewport_height))
            .collect();

        assert_eq!(
            history,
            vec![
                vec![(0, PinState::Pinned)],
                vec![(0, PinState::Released)],
                vec![],
                vec![],
            ]
        );

        assert_eq!(
            pins.update(group_at(120.0, 2_400.0), viewport_height),
            vec![(0, PinState::Unpinned)]
        );
        assert_eq!(
            pins.update(group_at(200.0, 2_400.0), viewport_height),
            vec![(0, PinState::Pinned)]
        );
    }

    #[test]
    fn crossing_the_breakpoint_replaces_all_registrations() {
        let mut pins = PinChoreographer::new(PinConfig::services_all_breakpoints(768));
        let sections = cards(3);

        assert_eq!(pins.rebuild(1_280.0, &sections), 3);
        assert_eq!(pins.slot_top(2), Some(330.0));

        assert!(pins.on_resize(600.0, &sections));
        assert_eq!(pins.registered_count(), 3);
        assert_eq!(pins.states().len(), 3);
        assert_eq!(pins.slot_top(0), Some(SERVICES_TITLE_BAR_HEIGHT_MOBILE));
        assert_eq!(pins.slot_top(2), Some(260.0));
    }

    #[test]
    fn disabled_breakpoint_leaves_nothing_registered() {
        let mut pins = PinChoreographer::new(PinConfig::services(768));
        let sections = cards(3);
        pins.rebuild(1_280.0, &sections);
        pins.update(group_at(500.0, 3_000.0), 800.0);

        assert!(pins.on_resize(500.0, &sections));

        assert_eq!(pins.breakpoint(), Some(Breakpoint::Mobile));
        assert_eq!(pins.registered_count(), 0);
        assert!(pins.states().is_empty());
        assert_eq!(pins.pinned_index(10_000.0), None);
        assert!(pins.update(group_at(500.0, 3_000.0), 800.0).is_empty());
    }

    #[test]
    fn resize_within_a_breakpoint_keeps_the_pin_points() {
        let mut pins = PinChoreographer::new(PinConfig::services(768));
        let sections = cards(3);
        pins.rebuild(1_280.0, &sections);

        assert!(!pins.on_resize(1_024.0, &sections));
        assert_eq!(pins.registered_count(), 3);
    }

    #[test]
    fn rebuild_resets_states_to_unpinned() {
        let mut pins = PinChoreographer::new(PinConfig::top_on_desktop(768));
        let sections = vec!["#works-number".to_string()];
        pins.rebuild(1_280.0, &sections);
        pins.update(group_at(50.0, 4_000.0), 800.0);
        assert_eq!(pins.states(), &[PinState::Pinned]);

        pins.rebuild(1_300.0, &sections);

        assert_eq!(pins.states(), &[PinState::Unpinned]);
    }
}
