use std::{collections::BTreeMap, fmt, str::FromStr};

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Fraction(f64),
    Pixels(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRule {
    pub edge: Edge,
    pub anchor: Anchor,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("scroll rule `{0}` must have exactly two parts")]
    Shape(String),
    #[error("unknown element edge `{0}`")]
    Edge(String),
    #[error("unknown viewport anchor `{0}`")]
    Anchor(String),
}

impl ScrollRule {
    pub const fn new(edge: Edge, anchor: Anchor) -> Self {
        Self { edge, anchor }
    }

    pub const fn entering() -> Self {
        Self::new(Edge::Top, Anchor::Fraction(0.85))
    }

    fn reached(&self, bounds: Bounds, viewport_height: f64) -> bool {
        let edge = match self.edge {
            Edge::Top => bounds.top,
            Edge::Center => (bounds.top + bounds.bottom) / 2.0,
            Edge::Bottom => bounds.bottom,
        };
        let line = match self.anchor {
            Anchor::Fraction(fraction) => viewport_height * fraction,
            Anchor::Pixels(pixels) => pixels,
        };
        edge <= line
    }
}

fn parse_edge(value: &str) -> Option<Edge> {
    match value {
        "top" => Some(Edge::Top),
        "center" => Some(Edge::Center),
        "bottom" => Some(Edge::Bottom),
        _ => None,
    }
}

fn parse_anchor(value: &str) -> Option<Anchor> {
    match value {
        "top" => return Some(Anchor::Fraction(0.0)),
        "center" => return Some(Anchor::Fraction(0.5)),
        "bottom" => return Some(Anchor::Fraction(1.0)),
        _ => {}
    }

    if let Some(percent) = value.strip_suffix('%') {
        return percent
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| Anchor::Fraction(value / 100.0));
    }

    value
        .strip_suffix("px")
        .and_then(|pixels| pixels.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(Anchor::Pixels)
}

impl FromStr for ScrollRule {
    type Err = RuleParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.split_whitespace().collect();
        let [edge, anchor] = parts.as_slice() else {
            return Err(RuleParseError::Shape(raw.to_string()));
        };

        let edge = parse_edge(edge).ok_or_else(|| RuleParseError::Edge(edge.to_string()))?;
        let anchor =
            parse_anchor(anchor).ok_or_else(|| RuleParseError::Anchor(anchor.to_string()))?;

        Ok(Self { edge, anchor })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSample {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Read-only access to the document layout.
///
/// Returns `None` when the target is not in the document, which is normal for
/// components torn down mid-transition.
pub trait Geometry {
    fn bounds(&self, target: &str) -> Option<Bounds>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct TriggerRegion {
    pub target: String,
    pub start: ScrollRule,
    pub end: Option<ScrollRule>,
    pub once: bool,
}

impl TriggerRegion {
    pub fn once(target: impl Into<String>, start: ScrollRule) -> Self {
        Self {
            target: target.into(),
            start,
            end: None,
            once: true,
        }
    }

    pub fn span(target: impl Into<String>, start: ScrollRule, end: ScrollRule) -> Self {
        Self {
            target: target.into(),
            start,
            end: Some(end),
            once: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerEvent {
    pub subscription: SubscriptionId,
    pub kind: TriggerKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Before,
    Active,
    After,
}

struct Registration {
    region: TriggerRegion,
    phase: Phase,
    past_start: bool,
    spent: bool,
}

#[derive(Default)]
pub struct ViewportObserver {
    next_id: u64,
    regions: BTreeMap<SubscriptionId, Registration>,
    frame_pending: bool,
    sample: Option<ViewportSample>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, region: TriggerRegion) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.regions.insert(
            id,
            Registration {
                region,
                phase: Phase::Before,
                past_start: false,
                spent: false,
            },
        );
        id
    }

    pub fn unobserve(&mut self, id: SubscriptionId) {
        self.regions.remove(&id);
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn sample(&self) -> Option<ViewportSample> {
        self.sample
    }

    pub fn is_past(&self, id: SubscriptionId) -> bool {
        self.regions
            .get(&id)
            .map(|registration| registration.past_start)
            .unwrap_or(false)
    }

    pub fn request_frame(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn flush(&mut self, sample: ViewportSample, geometry: &impl Geometry) -> Vec<TriggerEvent> {
        self.frame_pending = false;
        self.sample = Some(sample);

        let mut events = Vec::new();
        for (id, registration) in self.regions.iter_mut() {
            let Some(bounds) = geometry.bounds(&registration.region.target) else {
                continue;
            };

            let past_start = registration.region.start.reached(bounds, sample.height);
            registration.past_start = past_start;
            if registration.spent {
                continue;
            }
            let past_end = registration
                .region
                .end
                .map(|end| end.reached(bounds, sample.height))
                .unwrap_or(false);

            let next = match (past_start, past_end) {
                (false, _) => Phase::Before,
                (true, false) => Phase::Active,
                (true, true) => Phase::After,
            };

            if registration.region.once {
                if next != Phase::Before {
                    registration.spent = true;
                    registration.phase = next;
                    events.push(TriggerEvent {
                        subscription: *id,
                        kind: TriggerKind::Enter,
                    });
                }
                continue;
            }

            for kind in transitions(registration.phase, next) {
                events.push(TriggerEvent {
                    subscription: *id,
                    kind: *kind,
                });
            }
            registration.phase = next;
        }

        events
    }
}

fn transitions(from: Phase, to: Phase) -> &'static [TriggerKind] {
    use TriggerKind::*;

    match (from, to) {
        (Phase::Before, Phase::Active) => &[Enter],
        (Phase::Before, Phase::After) => &[Enter, Leave],
        (Phase::Active, Phase::After) => &[Leave],
        (Phase::After, Phase::Active) => &[EnterBack],
        (Phase::After, Phase::Before) => &[EnterBack, LeaveBack],
        (Phase::Active, Phase::Before) => &[LeaveBack],
        _ => &[],
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveIndex {
    current: usize,
}

impl ActiveIndex {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn apply(&mut self, index: usize, kind: TriggerKind) -> bool {
        match kind {
            TriggerKind::Enter | TriggerKind::EnterBack if index != self.current => {
                self.current = index;
                true
            }
            _ => false,
        }
    }

    pub fn label(&self) -> String {
        format!("{:02}", self.current + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeLayout {
        document_tops: HashMap<String, (f64, f64)>,
        scroll_y: f64,
    }

    impl FakeLayout {
        fn with(mut self, target: &str, top: f64, height: f64) -> Self {
            self.document_tops.insert(target.to_string(), (top, height));
            self
        }

        fn at(&mut self, scroll_y: f64) -> ViewportSample {
            self.scroll_y = scroll_y;
            ViewportSample {
                scroll_y,
                width: 1280.0,
                height: 800.0,
            }
        }
    }

    impl Geometry for FakeLayout {
        fn bounds(&self, target: &str) -> Option<Bounds> {
            let (top, height) = self.document_tops.get(target)?;
            Some(Bounds {
                top: top - self.scroll_y,
                bottom: top + height - self.scroll_y,
            })
        }
    }

    #[test]
    fn parses_common_rules() {
        assert_eq!(
            "top 85%".parse::<ScrollRule>(),
            Ok(ScrollRule::new(Edge::Top, Anchor::Fraction(0.85)))
        );
        assert_eq!(
            "bottom center".parse::<ScrollRule>(),
            Ok(ScrollRule::new(Edge::Bottom, Anchor::Fraction(0.5)))
        );
        assert_eq!(
            "top 170px".parse::<ScrollRule>(),
            Ok(ScrollRule::new(Edge::Top, Anchor::Pixels(170.0)))
        );
    }

    #[test]
    fn rejects_malformed_rules() {
        assert_eq!(
            "top".parse::<ScrollRule>(),
            Err(RuleParseError::Shape("top".to_string()))
        );
        assert_eq!(
            "left 50%".parse::<ScrollRule>(),
            Err(RuleParseError::Edge("left".to_string()))
        );
        assert_eq!(
            "top eighty%".parse::<ScrollRule>(),
            Err(RuleParseError::Anchor("eighty%".to_string()))
        );
    }

    #[test]
    fn frame_requests_coalesce_until_flush() {
        let mut observer = ViewportObserver::new();
        let mut layout = FakeLayout::default();

        assert!(observer.request_frame());
        assert!(!observer.request_frame());
        assert!(!observer.request_frame());

        observer.flush(layout.at(0.0), &layout);
        assert!(!observer.frame_pending());
        assert!(observer.request_frame());
    }

    #[test]
    fn once_region_fires_a_single_enter_under_scroll_back_and_forth() {
        let mut observer = ViewportObserver::new();
        let mut layout = FakeLayout::default().with(".about-heading", 1_500.0, 100.0);
        let id = observer.observe(TriggerRegion::once(".about-heading", ScrollRule::entering()));

        let mut enters = 0;
        for scroll_y in [0.0, 900.0, 1_000.0, 200.0, 1_200.0, 0.0, 1_400.0] {
            let sample = layout.at(scroll_y);
            enters += observer
                .flush(sample, &layout)
                .iter()
                .filter(|event| event.subscription == id && event.kind == TriggerKind::Enter)
                .count();
        }

        assert_eq!(enters, 1);
    }

    #[test]
    fn spent_region_still_tracks_its_start_line() {
        let mut observer = ViewportObserver::new();
        let mut layout = FakeLayout::default().with(".contact-form", 1_000.0, 400.0);
        let id = observer.observe(TriggerRegion::once(".contact-form", ScrollRule::entering()));

        let sample = layout.at(600.0);
        assert_eq!(observer.flush(sample, &layout).len(), 1);
        assert!(observer.is_past(id));

        let sample = layout.at(0.0);
        assert!(observer.flush(sample, &layout).is_empty());
        assert!(!observer.is_past(id));

        let sample = layout.at(600.0);
        assert!(observer.flush(sample, &layout).is_empty());
        assert!(observer.is_past(id));
    }

    #[test]
    fn page_rule_strings_parse() {
        for raw in ["top bottom", "top center", "bottom center", "top 80%"] {
            assert!(raw.parse::<ScrollRule>().is_ok(), "{raw}");
        }
    }

    #[test]
    fn missing_target_is_a_silent_no_op() {
        let mut observer = ViewportObserver::new();
        let mut layout = FakeLayout::default();
        let id = observer.observe(TriggerRegion::once("#gone", ScrollRule::entering()));

        let sample = layout.at(5_000.0);
        assert!(observer.flush(sample, &layout).is_empty());
        assert!(!observer.is_past(id));
    }

    #[test]
    fn reversible_region_reports_every_crossing() {
        let mut observer = ViewportObserver::new();
        let mut layout = FakeLayout::default().with("#project-2", 1_000.0, 300.0);
        let id = observer.observe(TriggerRegion::span(
            "#project-2",
            ScrollRule::new(Edge::Top, Anchor::Fraction(0.5)),
            ScrollRule::new(Edge::Bottom, Anchor::Fraction(0.5)),
        ));

        let mut kinds = Vec::new();
        for scroll_y in [0.0, 700.0, 1_000.0, 800.0, 0.0] {
            let sample = layout.at(scroll_y);
            kinds.extend(
                observer
                    .flush(sample, &layout)
                    .into_iter()
                    .filter(|event| event.subscription == id)
                    .map(|event| event.kind),
            );
        }

        assert_eq!(
            kinds,
            vec![
                TriggerKind::Enter,
                TriggerKind::Leave,
                TriggerKind::EnterBack,
                TriggerKind::LeaveBack,
            ]
        );
    }

    #[test]
    fn jumping_past_a_region_reports_enter_then_leave() {
        let mut observer = ViewportObserver::new();
        let mut layout = FakeLayout::default().with("#project-1", 500.0, 200.0);
        observer.observe(TriggerRegion::span(
            "#project-1",
            ScrollRule::new(Edge::Top, Anchor::Fraction(0.5)),
            ScrollRule::new(Edge::Bottom, Anchor::Fraction(0.5)),
        ));

        let sample = layout.at(4_000.0);
        let kinds: Vec<_> = observer
            .flush(sample, &layout)
            .into_iter()
            .map(|event| event.kind)
            .collect();

        assert_eq!(kinds, vec![TriggerKind::Enter, TriggerKind::Leave]);
    }

    #[test]
    fn unobserve_drops_the_region() {
        let mut observer = ViewportObserver::new();
        let mut layout = FakeLayout::default().with(".contact-title", 100.0, 50.0);
        let id = observer.observe(TriggerRegion::once(".contact-title", ScrollRule::entering()));

        observer.unobserve(id);
        observer.unobserve(id);

        assert_eq!(observer.region_count(), 0);
        let sample = layout.at(1_000.0);
        assert!(observer.flush(sample, &layout).is_empty());
    }

    #[test]
    fn active_index_follows_enter_and_enter_back() {
        let mut active = ActiveIndex::default();

        assert!(!active.apply(0, TriggerKind::Enter));
        assert!(active.apply(2, TriggerKind::Enter));
        assert!(!active.apply(1, TriggerKind::Leave));
        assert!(active.apply(1, TriggerKind::EnterBack));
        assert_eq!(active.label(), "02");
    }
}
