use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
    rc::{Rc, Weak},
};

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::{Interval, Timeout};
use js_sys::{Date, Math};
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::{
    body_state::{BodyClaim, BodyProperty, BodyStateService},
    config::SiteConfig,
    contact::{submit, ContactError, ContactField, ContactForm, FormStatus},
    cursor::{cursor_enabled, CursorFollower},
    dom::{self, DomBodySink, DomGeometry, DomSessionStore, EmailJsTransport},
    easing::Easing,
    logging::{log_event, set_min_level, LogLevel},
    navigation::{
        section_scroll_target, NavVisibility, ScrollDriver, ScrollPlan, SmoothScroll, MENU_CLOSE_DELAY_MS,
        MENU_ITEMS, SECTION_SCROLL_OFFSET_PX,
    },
    pin::{Breakpoint, PinChoreographer, PinConfig},
    reveal::{scroll_through, RevealAnimator, RevealConfig, ScrubTrack},
    scramble::Scramble,
    session::ScrollSlot,
    viewport::{
        ActiveIndex, Geometry, RuleParseError, ScrollRule, SubscriptionId, TriggerKind, TriggerRegion,
        ViewportObserver, ViewportSample,
    },
};

const RESTORE_DELAY_MS: u32 = 100;
const CLOCK_TICK_MS: u32 = 1_000;
const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

struct StageInner {
    config: SiteConfig,
    driver: ScrollDriver,
    observer: RefCell<ViewportObserver>,
    reveals: RefCell<RevealAnimator>,
    triggers: RefCell<HashMap<SubscriptionId, Callback<TriggerKind>>>,
    frame_listeners: RefCell<BTreeMap<u64, Callback<ViewportSample>>>,
    next_listener: Cell<u64>,
    scroll_tween: RefCell<Option<SmoothScroll>>,
    frame: RefCell<Option<AnimationFrame>>,
    window_listeners: RefCell<Vec<EventListener>>,
}

#[derive(Clone)]
struct Stage {
    inner: Rc<StageInner>,
}

impl PartialEq for Stage {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Stage {
    fn new(config: SiteConfig) -> Self {
        let stage = Self {
            inner: Rc::new(StageInner {
                config,
                driver: ScrollDriver::init(dom::probe_smoother()),
                observer: RefCell::new(ViewportObserver::new()),
                reveals: RefCell::new(RevealAnimator::new()),
                triggers: RefCell::new(HashMap::new()),
                frame_listeners: RefCell::new(BTreeMap::new()),
                next_listener: Cell::new(0),
                scroll_tween: RefCell::new(None),
                frame: RefCell::new(None),
                window_listeners: RefCell::new(Vec::new()),
            }),
        };
        stage.listen_to_window();
        stage
    }

    fn upgrade(weak: &Weak<StageInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    fn is_desktop(&self) -> bool {
        let (width, _) = dom::viewport_size();
        Breakpoint::resolve(width, self.config().mobile_breakpoint_px) == Breakpoint::Desktop
    }

    fn listen_to_window(&self) {
        let Some(win) = window() else {
            return;
        };

        let listeners = ["scroll", "resize"]
            .into_iter()
            .map(|event_type| {
                let weak = Rc::downgrade(&self.inner);
                EventListener::new(&win, event_type, move |_event: &Event| {
                    if let Some(stage) = Stage::upgrade(&weak) {
                        stage.schedule();
                    }
                })
            })
            .collect();
        *self.inner.window_listeners.borrow_mut() = listeners;
    }

    fn schedule(&self) {
        if !self.inner.observer.borrow_mut().request_frame() {
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let handle = request_animation_frame(move |_timestamp| {
            if let Some(stage) = Stage::upgrade(&weak) {
                stage.run_frame();
            }
        });
        *self.inner.frame.borrow_mut() = Some(handle);
    }

    fn run_frame(&self) {
        self.inner.frame.borrow_mut().take();
        let now = dom::now_ms();
        let sample = dom::viewport_sample();
        let events = self.inner.observer.borrow_mut().flush(sample, &DomGeometry);

        for event in events {
            let listener = self.inner.triggers.borrow().get(&event.subscription).cloned();
            match listener {
                Some(listener) => listener.emit(event.kind),
                None if event.kind == TriggerKind::Enter => {
                    self.inner
                        .reveals
                        .borrow_mut()
                        .trigger(event.subscription, now, dom::is_present);
                }
                None => {}
            }
        }

        let listeners: Vec<Callback<ViewportSample>> =
            self.inner.frame_listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener.emit(sample);
        }

        let tween = *self.inner.scroll_tween.borrow();
        if let Some(tween) = tween {
            let (y, done) = tween.step(now);
            dom::scroll_to(y);
            if done {
                self.inner.scroll_tween.borrow_mut().take();
            }
        }

        let frames = self.inner.reveals.borrow_mut().frame(now);
        frames.iter().for_each(dom::apply_frame);

        let animating = self.inner.reveals.borrow().is_animating();
        if animating || self.inner.scroll_tween.borrow().is_some() {
            self.schedule();
        }
    }

    fn observe(&self, region: TriggerRegion, listener: Callback<TriggerKind>) -> SubscriptionId {
        let id = self.inner.observer.borrow_mut().observe(region);
        self.inner.triggers.borrow_mut().insert(id, listener);
        self.schedule();
        id
    }

    fn unobserve(&self, id: SubscriptionId) {
        self.inner.observer.borrow_mut().unobserve(id);
        self.inner.triggers.borrow_mut().remove(&id);
    }

    fn observe_reveal(&self, region: TriggerRegion, targets: Vec<String>, config: RevealConfig) -> SubscriptionId {
        let id = self.inner.observer.borrow_mut().observe(region);
        let hidden = self.inner.reveals.borrow_mut().register(id, targets, config);
        hidden.iter().for_each(dom::apply_frame);
        self.schedule();
        id
    }

    fn release_reveal(&self, id: SubscriptionId) {
        let settled = {
            let mut reveals = self.inner.reveals.borrow_mut();
            let settled = reveals.cancel(id);
            reveals.remove(id);
            settled
        };
        settled.iter().for_each(dom::apply_frame);
        self.inner.observer.borrow_mut().unobserve(id);
    }

    fn on_frame(&self, listener: Callback<ViewportSample>) -> u64 {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.frame_listeners.borrow_mut().insert(id, listener);
        self.schedule();
        id
    }

    fn off_frame(&self, id: u64) {
        self.inner.frame_listeners.borrow_mut().remove(&id);
    }

    fn scroll_to_section(&self, selector: &str) {
        let Some(bounds) = DomGeometry.bounds(selector) else {
            log_event(LogLevel::Debug, "section_missing", json!({ "selector": selector }));
            return;
        };
        let target = section_scroll_target(dom::scroll_y(), bounds.top, 0.0, SECTION_SCROLL_OFFSET_PX);
        self.scroll_to(target);
    }

    fn scroll_to(&self, target: f64) {
        match self.inner.driver.plan(dom::scroll_y(), target, dom::now_ms()) {
            ScrollPlan::Jump(y) => {
                self.inner.scroll_tween.borrow_mut().take();
                dom::scroll_to(y);
            }
            ScrollPlan::Tween(tween) => {
                *self.inner.scroll_tween.borrow_mut() = Some(tween);
                self.schedule();
            }
        }
    }

    fn jump_to(&self, y: f64) {
        self.inner.scroll_tween.borrow_mut().take();
        dom::scroll_to(y);
        self.schedule();
    }
}

fn rule(text: &str) -> ScrollRule {
    text.parse().unwrap_or_else(|error: RuleParseError| {
        log_event(LogLevel::Warn, "scroll_rule_invalid", json!({ "error": error.to_string() }));
        ScrollRule::entering()
    })
}

fn breakpoint_px(stage: Option<&Stage>) -> u32 {
    stage
        .map(|stage| stage.config().mobile_breakpoint_px)
        .unwrap_or_else(|| SiteConfig::default().mobile_breakpoint_px)
}

#[derive(Clone)]
struct RevealSpec {
    region: TriggerRegion,
    targets: Vec<String>,
    config: RevealConfig,
}

impl RevealSpec {
    fn entering(target: &str, config: RevealConfig) -> Self {
        Self::group(target, vec![target.to_string()], config)
    }

    fn on_load(target: &str, config: RevealConfig) -> Self {
        Self {
            region: TriggerRegion::once(target, rule("top bottom")),
            targets: vec![target.to_string()],
            config,
        }
    }

    fn group(trigger: &str, targets: Vec<String>, config: RevealConfig) -> Self {
        Self {
            region: TriggerRegion::once(trigger, ScrollRule::entering()),
            targets,
            config,
        }
    }

    fn at(mut self, start: ScrollRule) -> Self {
        self.region.start = start;
        self
    }
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|index| format!("#{prefix}-{index}")).collect()
}

fn split_chars(text: &str, prefix: &str) -> Html {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            let shown = if ch == ' ' { '\u{a0}' } else { ch };
            html! { <span id={format!("{prefix}-{index}")} class="char">{shown.to_string()}</span> }
        })
        .collect()
}

#[hook]
fn use_reveals(specs: Vec<RevealSpec>) {
    let stage = use_context::<Stage>();
    use_effect_with((), move |_| {
        let registrations: Vec<(Stage, SubscriptionId)> = match stage {
            Some(stage) => specs
                .into_iter()
                .map(|spec| {
                    let id = stage.observe_reveal(spec.region, spec.targets, spec.config);
                    (stage.clone(), id)
                })
                .collect(),
            None => Vec::new(),
        };
        move || {
            for (stage, id) in registrations {
                stage.release_reveal(id);
            }
        }
    });
}

#[hook]
fn use_frame(listener: Callback<ViewportSample>) {
    let stage = use_context::<Stage>();
    use_effect_with((), move |_| {
        let registration = stage.map(|stage| {
            let id = stage.on_frame(listener);
            (stage, id)
        });
        move || {
            if let Some((stage, id)) = registration {
                stage.off_frame(id);
            }
        }
    });
}

#[hook]
fn use_pin_stack(group: &'static str, sections: Vec<String>, config: PinConfig) {
    let stage = use_context::<Stage>();
    use_effect_with((), move |_| {
        let pins = Rc::new(RefCell::new(PinChoreographer::new(config)));
        let (width, _) = dom::viewport_size();
        pins.borrow_mut().rebuild(width, &sections);
        let cleared = sections.clone();

        let registration = stage.map(|stage| {
            let pins = pins.clone();
            let id = stage.on_frame(Callback::from(move |sample: ViewportSample| {
                let mut pins = pins.borrow_mut();
                if pins.on_resize(sample.width, &sections) {
                    sections.iter().for_each(|section| dom::clear_pin(section));
                }
                let Some(group) = DomGeometry.bounds(group) else {
                    return;
                };
                for (index, state) in pins.update(group, sample.height) {
                    if let Some(section) = sections.get(index) {
                        dom::apply_pin(section, state, pins.slot_top(index));
                    }
                }
            }));
            (stage, id)
        });

        move || {
            if let Some((stage, id)) = registration {
                stage.off_frame(id);
            }
            pins.borrow_mut().teardown();
            cleared.iter().for_each(|section| dom::clear_pin(section));
        }
    });
}

#[hook]
fn use_active_label(targets: Vec<String>) -> String {
    let stage = use_context::<Stage>();
    let label = use_state_eq(|| ActiveIndex::default().label());
    let active = use_mut_ref(ActiveIndex::default);
    {
        let label = label.clone();
        use_effect_with((), move |_| {
            let registrations: Vec<(Stage, SubscriptionId)> = match stage {
                Some(stage) => targets
                    .into_iter()
                    .enumerate()
                    .map(|(index, target)| {
                        let active = active.clone();
                        let label = label.clone();
                        let listener = Callback::from(move |kind: TriggerKind| {
                            let mut active = active.borrow_mut();
                            if active.apply(index, kind) {
                                label.set(active.label());
                            }
                        });
                        let region = TriggerRegion::span(
                            target,
                            rule("top center"),
                            rule("bottom center"),
                        );
                        (stage.clone(), stage.observe(region, listener))
                    })
                    .collect(),
                None => Vec::new(),
            };
            move || {
                for (stage, id) in registrations {
                    stage.unobserve(id);
                }
            }
        });
    }
    (*label).clone()
}

#[hook]
fn use_scramble(anchor: String, final_text: AttrValue) -> (String, bool) {
    let stage = use_context::<Stage>();
    let text = use_state(|| final_text.to_string());
    let started = use_state_eq(|| false);
    let ticker = use_mut_ref(|| None::<Interval>);
    {
        let text = text.clone();
        let started = started.clone();
        use_effect_with((), move |_| {
            let registration = stage.map(|stage| {
                let period = stage.config().scramble_interval_ms;
                let slot = ticker.clone();
                let on_enter = Callback::from(move |kind: TriggerKind| {
                    if kind != TriggerKind::Enter || slot.borrow().is_some() {
                        return;
                    }
                    started.set(true);

                    let mut scramble = Scramble::new(&final_text, Math::random);
                    let text = text.clone();
                    let owner = slot.clone();
                    let interval = Interval::new(period, move || {
                        if let Some(frame) = scramble.next() {
                            text.set(frame);
                        }
                        if scramble.is_finished() {
                            let owner = owner.clone();
                            spawn_local(async move {
                                owner.borrow_mut().take();
                            });
                        }
                    });
                    *slot.borrow_mut() = Some(interval);
                });
                let id = stage.observe(TriggerRegion::once(anchor, ScrollRule::entering()), on_enter);
                (stage, id)
            });

            move || {
                ticker.borrow_mut().take();
                if let Some((stage, id)) = registration {
                    stage.unobserve(id);
                }
            }
        });
    }
    ((*text).clone(), *started)
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let stage = use_context::<Stage>();
    let body = use_context::<BodyStateService>();
    let menu_open = use_state_eq(|| false);
    let hidden = use_state_eq(|| false);
    let visibility = use_mut_ref(NavVisibility::default);
    let menu_flag = use_mut_ref(|| false);

    {
        let hidden = hidden.clone();
        let visibility = visibility.clone();
        let menu_flag = menu_flag.clone();
        use_frame(Callback::from(move |sample: ViewportSample| {
            let next = visibility.borrow_mut().update(sample.scroll_y, *menu_flag.borrow());
            hidden.set(next);
        }));
    }

    {
        let hidden = hidden.clone();
        use_effect_with(*menu_open, move |open| {
            *menu_flag.borrow_mut() = *open;
            let claim: Option<BodyClaim> = if *open {
                visibility.borrow_mut().reveal();
                hidden.set(false);
                body.map(|body| {
                    body.acquire(
                        "menu",
                        &[(BodyProperty::Overflow, "hidden"), (BodyProperty::Cursor, "default")],
                    )
                })
            } else {
                None
            };
            move || drop(claim)
        });
    }

    use_reveals(vec![RevealSpec::on_load(
        ".nav-bar",
        RevealConfig::default().from_offset(-20.0).duration(800.0),
    )]);

    let on_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let go_to = {
        let menu_open = menu_open.clone();
        Callback::from(move |href: &'static str| {
            menu_open.set(false);
            let stage = stage.clone();
            Timeout::new(MENU_CLOSE_DELAY_MS, move || {
                if let Some(stage) = stage {
                    stage.scroll_to_section(href);
                }
            })
            .forget();
        })
    };

    let nav_style = if *hidden { "top: -120px;" } else { "top: 0;" };

    html! {
        <>
            <nav class="nav-bar" style={nav_style}>
                <a class="nav-brand" href="#home">{"RATAN GULATI"}</a>
                <button
                    class={classes!("nav-toggle", (*menu_open).then_some("is-open"))}
                    aria-label={if *menu_open { "Close menu" } else { "Open menu" }}
                    aria-expanded={(*menu_open).to_string()}
                    onclick={on_toggle}
                >
                    <span class="nav-toggle-line" />
                    <span class="nav-toggle-line" />
                </button>
            </nav>
            if *menu_open {
                <div class="menu-overlay">
                    <ul class="menu-list">
                        { for MENU_ITEMS.iter().map(|item| {
                            let go_to = go_to.clone();
                            let href = item.href;
                            let onclick = Callback::from(move |event: MouseEvent| {
                                event.prevent_default();
                                go_to.emit(href);
                            });
                            html! {
                                <li><a class="menu-link" href={href} {onclick}>{item.label}</a></li>
                            }
                        }) }
                    </ul>
                </div>
            }
        </>
    }
}

fn current_month_label() -> String {
    let date = Date::new_0();
    let month = MONTHS[(date.get_month() as usize) % MONTHS.len()];
    format!("{month}'{:02}", date.get_full_year() % 100)
}

#[function_component(Hero)]
fn hero() -> Html {
    const FIRST: &str = "RATAN";
    const LAST: &str = "GULATI";

    let char_config = RevealConfig::default()
        .from_opacity(1.0)
        .from_offset(170.0)
        .duration(600.0)
        .stagger(60.0);
    let mut title_targets = numbered("hero-first", FIRST.chars().count());
    title_targets.extend(numbered("hero-last", LAST.chars().count()));

    use_reveals(vec![
        RevealSpec::group("#hero-title", title_targets, char_config)
            .at(rule("top bottom")),
        RevealSpec::on_load(".hero-arrow", RevealConfig::default().from_offset(0.0).duration(2_700.0).delay(200.0)),
        RevealSpec::on_load(".hero-tagline", RevealConfig::default().from_offset(80.0).duration(1_000.0)),
        RevealSpec::on_load(".hero-resume", RevealConfig::default().from_offset(80.0).duration(1_500.0)),
        RevealSpec::on_load(".hero-available", RevealConfig::default().from_offset(30.0).duration(1_300.0).delay(200.0)),
        RevealSpec::on_load(".hero-date", RevealConfig::default().from_offset(80.0).duration(1_000.0).delay(400.0)),
        RevealSpec::on_load(".hero-portrait", RevealConfig::default().from_offset(0.0).duration(1_800.0)),
    ]);

    use_frame(Callback::from(|_: ViewportSample| {
        let Some(bounds) = DomGeometry.bounds("#home") else {
            return;
        };
        let through = scroll_through(bounds);
        let fade = ScrubTrack::new(1.0, 0.0).between(0.0, 0.5).easing(Easing::Power2In);
        let scale = ScrubTrack::new(1.0, 0.92);
        let lift = ScrubTrack::new(0.0, 100.0);

        dom::set_style("#hero-content", "opacity", &format!("{:.3}", fade.value(through)));
        dom::set_style(
            "#hero-content",
            "transform",
            &format!("translateY({:.1}px) scale({:.4})", lift.value(through), scale.value(through)),
        );
    }));

    let month = use_memo((), |_| current_month_label());

    html! {
        <section id="home" class="hero">
            <div id="hero-content" class="hero-content">
                <h1 id="hero-title" class="hero-title">
                    <span class="hero-name">{split_chars(FIRST, "hero-first")}</span>
                    <span class="hero-name">{split_chars(LAST, "hero-last")}</span>
                </h1>
                <div class="hero-portrait" />
                <div class="hero-grid">
                    <div class="hero-intro">
                        <svg class="hero-arrow" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor">
                            <path stroke-linecap="round" stroke-linejoin="round" d="m4.5 4.5 15 15m0 0V8.25m0 11.25H8.25" />
                        </svg>
                        <p class="hero-tagline">
                            {"Passionate about building scalable systems and intelligent automation that make development faster and smarter. Always open to opportunities that challenge me to innovate and grow."}
                        </p>
                        <a class="hero-resume" href="/resume.pdf" target="_blank" rel="noopener noreferrer">{"MY RESUME ↗"}</a>
                    </div>
                    <div class="hero-status">
                        <p class="hero-available">{"AVAILABLE FOR WORK"}</p>
                        <p class="hero-date">{(*month).clone()}</p>
                    </div>
                </div>
            </div>
        </section>
    }
}

struct Service {
    number: &'static str,
    title: &'static str,
    description: &'static str,
    tech: [&'static str; 3],
}

const SERVICES: [Service; 3] = [
    Service {
        number: "01",
        title: "Full-Stack Development",
        description: "From frontend interactions to backend APIs, I build complete web solutions. I work with modern stacks to deliver apps that are scalable, maintainable, and ready for real-world users.",
        tech: ["React, Node.js, Express.js", "REST APIs, Firebase, Docker", "Git, GitHub, Postman"],
    },
    Service {
        number: "02",
        title: "UI/UX & Frontend",
        description: "Design is more than looks. I design and develop clean, responsive interfaces that feel intuitive across devices, with a focus on clarity and accessibility.",
        tech: ["Next.js, TypeScript, Tailwind", "Figma, Framer Motion, GSAP", "Responsive layout, a11y"],
    },
    Service {
        number: "03",
        title: "Optimization",
        description: "I enjoy turning complex raw inputs into reliable, usable systems, designing pipelines that power insights and building for scale, speed, and stability.",
        tech: ["PostgreSQL, MongoDB, Redis", "AWS, GCP, Terraform", "CI/CD, Jenkins, Kubernetes"],
    },
];

#[function_component(Services)]
fn services() -> Html {
    let stage = use_context::<Stage>();
    let breakpoint = breakpoint_px(stage.as_ref());
    let desktop = stage.as_ref().map(Stage::is_desktop).unwrap_or(true);
    let cards = numbered("service-card", SERVICES.len());

    use_pin_stack("#services", vec!["#services-title-bar".to_string()], PinConfig::top_on_desktop(breakpoint));
    use_pin_stack("#services", cards.clone(), PinConfig::services(breakpoint));

    let mut reveals = vec![
        RevealSpec::entering(
            "#services-title",
            RevealConfig::default().from_opacity(1.0).from_offset(150.0).duration(600.0),
        ),
        RevealSpec::entering(".services-intro-label", RevealConfig::default().from_offset(30.0).duration(800.0)),
        RevealSpec::group(
            "#services-title",
            vec![".services-intro".to_string()],
            RevealConfig::default().from_offset(40.0).duration(800.0).delay(700.0),
        ),
    ];
    if desktop {
        reveals.extend(cards.iter().map(|card| {
            RevealSpec::entering(card, RevealConfig::default().from_offset(60.0).duration(800.0))
                .at(rule("top 80%"))
        }));
    }
    use_reveals(reveals);

    html! {
        <section id="services" class="services">
            <div id="services-title-bar" class="services-title-bar">
                <h2 id="services-title" class="services-title">{"WHAT I DO /"}</h2>
            </div>
            <div class="services-intro-row">
                <p class="services-intro-label">{"(SERVICES)"}</p>
                <p class="services-intro">
                    {"I specialize in building full-stack web applications that are fast, reliable, and user-friendly. With a solid foundation in both frontend and backend technologies, I help bring ideas to life whether it's for a business, a startup, or a product team."}
                </p>
            </div>
            <div class="services-stack">
                { for SERVICES.iter().enumerate().map(|(index, service)| html! {
                    <article id={format!("service-card-{index}")} class="service-card">
                        <header class="service-card-head">
                            <span class="service-number">{format!("({})", service.number)}</span>
                            <h3 class="service-title">{service.title}</h3>
                        </header>
                        <p class="service-description">{service.description}</p>
                        <ul class="service-tech">
                            { for service.tech.iter().enumerate().map(|(row, text)| html! {
                                <li>
                                    <span class="service-tech-label">{format!("{:02}", row + 1)}</span>
                                    <span>{*text}</span>
                                </li>
                            }) }
                        </ul>
                    </article>
                }) }
            </div>
        </section>
    }
}

struct Project {
    title: &'static str,
    subtitle: &'static str,
    live_url: &'static str,
    github_url: &'static str,
    year: &'static str,
}

const PROJECTS: [Project; 5] = [
    Project {
        title: "CompileX",
        subtitle: "Real-time Collaborative Code Editor",
        live_url: "https://compilex-drwp.onrender.com/",
        github_url: "https://github.com/Ratangulati/CompileX",
        year: "2025",
    },
    Project {
        title: "Debt Detox",
        subtitle: "Personal Debt Manager",
        live_url: "https://debt-detox.vercel.app/",
        github_url: "https://github.com/Ratangulati/Debt_Detox",
        year: "2025",
    },
    Project {
        title: "CodeBuddy-AI",
        subtitle: "AI-Powered Code Review Assistant",
        live_url: "https://github.com/Ratangulati/CodeBuddy-AI",
        github_url: "https://github.com/Ratangulati/CodeBuddy-AI",
        year: "2025",
    },
    Project {
        title: "Github_Code_Analyzer",
        subtitle: "AI Powered Smart Repository Analyzer",
        live_url: "https://githubcodeanalyzer.vercel.app/",
        github_url: "https://github.com/Ratangulati/Github_Code_Analyzer",
        year: "2025",
    },
    Project {
        title: "Classroom",
        subtitle: "Education Management Platform",
        live_url: "https://github.com/Ratangulati/Classroom",
        github_url: "https://github.com/Ratangulati/Classroom",
        year: "2025",
    },
];

#[derive(Properties, PartialEq)]
struct RollingDigitProps {
    digit: char,
}

#[function_component(RollingDigit)]
fn rolling_digit(props: &RollingDigitProps) -> Html {
    html! {
        <span class="rolling-digit">
            <span key={props.digit.to_string()} class="rolling-digit-value">{props.digit.to_string()}</span>
        </span>
    }
}

#[function_component(Works)]
fn works() -> Html {
    const TITLE: &str = "SELECTED WORKS /";

    let stage = use_context::<Stage>();
    let breakpoint = breakpoint_px(stage.as_ref());
    let desktop = stage.as_ref().map(Stage::is_desktop).unwrap_or(true);
    let hovered = use_state_eq(|| None::<usize>);
    let projects = numbered("project", PROJECTS.len());

    let label = use_active_label(projects.clone());
    use_pin_stack("#works-projects", vec!["#works-number".to_string()], PinConfig::top_on_desktop(breakpoint));

    let mut reveals = vec![
        if desktop {
            RevealSpec::group(
                "#works-title",
                numbered("works-char", TITLE.chars().count()),
                RevealConfig::default().from_opacity(1.0).from_offset(170.0).duration(500.0).stagger(40.0),
            )
        } else {
            RevealSpec::entering("#works-title", RevealConfig::default().from_offset(30.0))
        },
        RevealSpec::entering(".works-intro-label", RevealConfig::default().from_offset(30.0).duration(800.0)),
        RevealSpec::entering(".works-intro", RevealConfig::default().from_offset(40.0).duration(800.0)),
    ];
    if desktop {
        reveals.extend(projects.iter().map(|project| {
            RevealSpec::entering(project, RevealConfig::default().from_offset(60.0).duration(1_000.0))
                .at(rule("top 80%"))
        }));
    }
    use_reveals(reveals);

    let digits: Vec<char> = label.chars().collect();

    html! {
        <section id="works" class="works">
            <h2 id="works-title" class="works-title">{split_chars(TITLE, "works-char")}</h2>
            <div class="works-intro-row">
                <p class="works-intro-label">{"(PROJECTS)"}</p>
                <p class="works-intro">
                    {"These are some of my projects built with modern technologies, from real-time collaboration platforms to AI-powered automation tools that enhance developer productivity."}
                </p>
            </div>
            <div id="works-projects" class="works-projects">
                <div id="works-number" class="works-number" aria-hidden="true">
                    { for digits.into_iter().map(|digit| html! { <RollingDigit {digit} /> }) }
                </div>
                <div class="works-list">
                    { for PROJECTS.iter().enumerate().map(|(index, project)| {
                        let onmouseenter = {
                            let hovered = hovered.clone();
                            Callback::from(move |_: MouseEvent| hovered.set(Some(index)))
                        };
                        let onmouseleave = {
                            let hovered = hovered.clone();
                            Callback::from(move |_: MouseEvent| hovered.set(None))
                        };
                        html! {
                            <article id={format!("project-{index}")} class={classes!("project-item", (*hovered == Some(index)).then_some("is-hovered"))}>
                                <a class="project-media" href={project.live_url} target="_blank" rel="noopener noreferrer" data-cursor="view" {onmouseenter} {onmouseleave}>
                                    <span class="project-media-title">{project.title}</span>
                                </a>
                                <div class="project-meta">
                                    <div>
                                        <h3 class="project-title">{project.title}</h3>
                                        <p class="project-subtitle">{project.subtitle}</p>
                                    </div>
                                    <div class="project-links">
                                        <a class="pill" href={project.github_url} target="_blank" rel="noopener noreferrer">{"GitHub ↗"}</a>
                                        <span class="pill is-filled">{project.year}</span>
                                    </div>
                                </div>
                            </article>
                        }
                    }) }
                </div>
            </div>
        </section>
    }
}

struct SkillCategory {
    title: &'static str,
    skills: &'static [&'static str],
}

const SKILL_CATEGORIES: [SkillCategory; 3] = [
    SkillCategory {
        title: "Languages & Tools",
        skills: &["Java", "JavaScript", "TypeScript", "Python", "Bash", "Git", "Postman", "Docker", "Kubernetes"],
    },
    SkillCategory {
        title: "Frameworks & Libraries",
        skills: &["React", "Next.js", "Node.js", "Express.js", "MongoDB", "Postgres", "Prisma", "Socket.io", "Tailwind"],
    },
    SkillCategory {
        title: "DevOps & Cloud",
        skills: &["AWS", "GCP", "Terraform", "CI/CD", "Jenkins", "GitHub Actions", "Linux/Unix", "REST APIs"],
    },
];

#[derive(Properties, PartialEq)]
struct SkillItemProps {
    id: AttrValue,
    skill: AttrValue,
}

#[function_component(SkillItem)]
fn skill_item(props: &SkillItemProps) -> Html {
    let (text, started) = use_scramble(format!("#{}", props.id), props.skill.clone());
    let style = if started { "" } else { "opacity: 0;" };

    html! {
        <li id={props.id.clone()} class="skill-item" {style}>{text}</li>
    }
}

#[function_component(SkillsAbout)]
fn skills_about() -> Html {
    const TITLE: &str = "DEVELOPER DESIGNER CREATOR /";

    use_frame(Callback::from(|_: ViewportSample| {
        let Some(bounds) = DomGeometry.bounds("#skills-about") else {
            return;
        };
        let through = scroll_through(bounds);
        let scale = ScrubTrack::new(1.0, 0.88).easing(Easing::Linear);
        let radius = ScrubTrack::new(0.0, 36.0);

        dom::set_style("#skills-about", "transform", &format!("scale({:.4})", scale.value(through)));
        dom::set_style("#skills-about", "border-radius", &format!("{:.1}px", radius.value(through)));
    }));

    use_reveals(vec![
        RevealSpec::group(
            "#skills-title",
            numbered("skills-char", TITLE.chars().count()),
            RevealConfig::default().from_opacity(1.0).from_offset(150.0).duration(500.0).stagger(30.0),
        ),
        RevealSpec::entering(".skills-heading", RevealConfig::default().from_offset(40.0).duration(800.0)),
        RevealSpec::entering(".about-portrait", RevealConfig::default().from_offset(60.0).duration(1_000.0)),
        RevealSpec::entering(".about-heading", RevealConfig::default().from_offset(60.0).duration(1_000.0)),
        RevealSpec::entering(".about-label", RevealConfig::default().from_offset(30.0).duration(800.0)),
        RevealSpec::group(
            ".about-paragraphs",
            numbered("about-paragraph", 2),
            RevealConfig::default().from_offset(60.0).duration(1_000.0).stagger(200.0),
        )
        .at(rule("top 80%")),
    ]);

    html! {
        <section id="skills-about" class="skills-about">
            <div class="skills">
                <h2 id="skills-title" class="skills-title">{split_chars(TITLE, "skills-char")}</h2>
                <div class="skills-body">
                    <h3 class="skills-heading">{"Skills"}</h3>
                    <div class="skills-grid">
                        { for SKILL_CATEGORIES.iter().enumerate().map(|(column, category)| html! {
                            <div class="skills-category">
                                <h4>{category.title}</h4>
                                <ul>
                                    { for category.skills.iter().enumerate().map(|(row, skill)| html! {
                                        <SkillItem id={format!("skill-{column}-{row}")} skill={*skill} />
                                    }) }
                                </ul>
                            </div>
                        }) }
                    </div>
                </div>
            </div>
            <div class="about">
                <div class="about-portrait" />
                <div class="about-text">
                    <h2 class="about-heading">
                        {"I'm a full-stack developer and DevOps engineer driven by a passion for building scalable systems and intelligent automation solutions."}
                    </h2>
                    <p class="about-label">{"(ABOUT ME)"}</p>
                    <div class="about-paragraphs">
                        <p id="about-paragraph-0">
                            {"I specialize in full-stack development, cloud infrastructure, and AI integration. My journey began with solving real-world problems through code, leading me to build platforms like CompileX, a real-time collaborative editor, and AI-powered tools like CodeScan AI."}
                        </p>
                        <p id="about-paragraph-1">
                            {"I'm passionate about open-source contributions as Project Admin at GirlScript Summer of Code, and hold certifications in IBM DevOps Engineering and Google Cloud."}
                        </p>
                    </div>
                </div>
            </div>
        </section>
    }
}

enum FormAction {
    Edit(ContactField, String),
    Begin,
    Finish(Result<(), ContactError>),
}

impl Reducible for ContactForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Edit(field, value) => next.edit(field, value),
            FormAction::Begin => {
                next.begin_submit();
            }
            FormAction::Finish(result) => next.finish(result),
        }
        Rc::new(next)
    }
}

#[function_component(Contact)]
fn contact() -> Html {
    let stage = use_context::<Stage>();
    let form = use_reducer(ContactForm::default);

    use_reveals(vec![
        RevealSpec::entering(
            "#contact-title",
            RevealConfig::default().from_opacity(1.0).from_offset(150.0).duration(600.0),
        ),
        RevealSpec::entering(".contact-form", RevealConfig::default().from_offset(60.0).duration(1_000.0)),
    ]);

    let edit_input = |field: ContactField| {
        let form = form.dispatcher();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            form.dispatch(FormAction::Edit(field, value));
        })
    };
    let edit_message = {
        let form = form.dispatcher();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlTextAreaElement>().value();
            form.dispatch(FormAction::Edit(ContactField::Message, value));
        })
    };

    let onsubmit = {
        let form = form.clone();
        let email = stage.map(|stage| stage.config().email.clone()).unwrap_or_default();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let mut draft = (*form).clone();
            let Some(message) = draft.begin_submit() else {
                return;
            };
            form.dispatch(FormAction::Begin);

            let form = form.dispatcher();
            let email = email.clone();
            spawn_local(async move {
                let result = submit(&email, &message, &EmailJsTransport).await;
                form.dispatch(FormAction::Finish(result));
            });
        })
    };

    let sending = form.is_sending();
    let notice = match &form.status {
        FormStatus::Success => Some(("is-success", "Message sent. I'll get back to you soon.".to_string())),
        FormStatus::Error(message) => Some(("is-error", message.clone())),
        FormStatus::Idle | FormStatus::Sending => None,
    };

    html! {
        <section id="contact" class="contact">
            <h2 id="contact-title" class="contact-title">{"LET'S TALK /"}</h2>
            <form class="contact-form" {onsubmit}>
                <label>
                    <span>{"Name"}</span>
                    <input type="text" name="from_name" value={form.fields.name.clone()} oninput={edit_input(ContactField::Name)} disabled={sending} />
                </label>
                <label>
                    <span>{"Email"}</span>
                    <input type="email" name="from_email" value={form.fields.email.clone()} oninput={edit_input(ContactField::Email)} disabled={sending} />
                </label>
                <label>
                    <span>{"Message"}</span>
                    <textarea name="message" rows="5" value={form.fields.message.clone()} oninput={edit_message} disabled={sending} />
                </label>
                <button type="submit" class="contact-submit" disabled={sending}>
                    {if sending { "SENDING…" } else { "SEND MESSAGE ↗" }}
                </button>
                if let Some((class, text)) = notice {
                    <p class={classes!("contact-notice", class)} role="status">{text}</p>
                }
            </form>
        </section>
    }
}

fn format_clock(date: &Date) -> String {
    let hours = date.get_hours();
    let suffix = if hours < 12 { "AM" } else { "PM" };
    let hour = match hours % 12 {
        0 => 12,
        hour => hour,
    };
    format!("{hour:02}:{:02}:{:02} {suffix}", date.get_minutes(), date.get_seconds())
}

const SOCIAL_LINKS: [(&str, &str); 4] = [
    ("LinkedIn", "https://www.linkedin.com/in/ratangulati/"),
    ("Instagram", "https://www.instagram.com/ratangulati.dev/"),
    ("GitHub", "https://github.com/Ratangulati"),
    ("X", "https://x.com/ratanstwt"),
];

#[function_component(Footer)]
fn footer() -> Html {
    let stage = use_context::<Stage>();
    let clock = use_state(|| format_clock(&Date::new_0()));

    {
        let clock = clock.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(CLOCK_TICK_MS, move || clock.set(format_clock(&Date::new_0())));
            move || drop(interval)
        });
    }

    let back_to_top = {
        let stage = stage.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            if let Some(stage) = stage.as_ref() {
                stage.scroll_to(0.0);
            }
        })
    };

    html! {
        <footer class="footer">
            <div class="footer-columns">
                <ul class="footer-links">
                    { for MENU_ITEMS.iter().map(|item| {
                        let stage = stage.clone();
                        let href = item.href;
                        let onclick = Callback::from(move |event: MouseEvent| {
                            event.prevent_default();
                            if let Some(stage) = stage.as_ref() {
                                stage.scroll_to_section(href);
                            }
                        });
                        html! { <li><a href={href} {onclick}>{item.label}</a></li> }
                    }) }
                </ul>
                <ul class="footer-links">
                    { for SOCIAL_LINKS.iter().map(|(label, href)| html! {
                        <li><a href={*href} target="_blank" rel="noopener noreferrer">{*label}</a></li>
                    }) }
                </ul>
                <div class="footer-clock">
                    <p class="footer-label">{"LOCAL TIME"}</p>
                    <p class="footer-time">{(*clock).clone()}</p>
                </div>
            </div>
            <a class="footer-top" href="#home" onclick={back_to_top}>{"BACK TO TOP ↑"}</a>
        </footer>
    }
}

struct CursorRuntime {
    node: NodeRef,
    follower: RefCell<CursorFollower>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
    _claim: Option<BodyClaim>,
}

impl CursorRuntime {
    fn start(node: NodeRef, body: Option<BodyStateService>) -> Option<Rc<Self>> {
        let win = window()?;
        let page = win.document()?.body()?;
        let claim = body.map(|body| body.acquire("cursor", &[(BodyProperty::Cursor, "none")]));
        let runtime = Rc::new(Self {
            node,
            follower: RefCell::new(CursorFollower::default()),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            _claim: claim,
        });

        let on_move = {
            let weak = Rc::downgrade(&runtime);
            EventListener::new(&win, "mousemove", move |event: &Event| {
                let (Some(runtime), Some(event)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                    return;
                };
                let now = dom::now_ms();
                let mut follower = runtime.follower.borrow_mut();
                follower.move_to(f64::from(event.client_x()), f64::from(event.client_y()), now);
                follower.set_visible(true, now);
                drop(follower);
                runtime.pump();
            })
        };
        let visibility = [("mouseenter", true), ("mouseleave", false)].map(|(event_type, visible)| {
            let weak = Rc::downgrade(&runtime);
            EventListener::new(&page, event_type, move |_event: &Event| {
                if let Some(runtime) = weak.upgrade() {
                    runtime.follower.borrow_mut().set_visible(visible, dom::now_ms());
                    runtime.pump();
                }
            })
        });

        let mut listeners = runtime.listeners.borrow_mut();
        listeners.push(on_move);
        listeners.extend(visibility);
        drop(listeners);
        Some(runtime)
    }

    fn pump(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }

        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |_timestamp| {
            let Some(runtime) = weak.upgrade() else {
                return;
            };
            runtime.frame.borrow_mut().take();

            let now = dom::now_ms();
            let frame = runtime.follower.borrow().frame(now);
            if let Some(element) = runtime.node.cast::<HtmlElement>() {
                let _ = element.style().set_css_text(&frame.to_css());
            }
            if !runtime.follower.borrow().is_settled(now) {
                runtime.pump();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }
}

#[function_component(CustomCursor)]
fn custom_cursor() -> Html {
    let stage = use_context::<Stage>();
    let body = use_context::<BodyStateService>();
    let node = use_node_ref();

    {
        let node = node.clone();
        use_effect_with((), move |_| {
            let (width, _) = dom::viewport_size();
            let enabled = cursor_enabled(dom::is_touch_device(), width, breakpoint_px(stage.as_ref()));
            let runtime = if enabled {
                CursorRuntime::start(node, body)
            } else {
                None
            };
            move || drop(runtime)
        });
    }

    html! { <div ref={node} class="custom-cursor" aria-hidden="true" /> }
}

#[function_component(App)]
fn app() -> Html {
    let stage = use_memo((), |_| {
        let config = SiteConfig::from_build_env();
        set_min_level(config.log_level);
        log_event(
            LogLevel::Info,
            "site_start",
            json!({
                "mobile_breakpoint_px": config.mobile_breakpoint_px,
                "email_configured": config.email.credentials().is_ok(),
            }),
        );
        Stage::new(config)
    });
    let body = use_memo((), |_| BodyStateService::new(DomBodySink));

    {
        let stage = (*stage).clone();
        use_effect_with((), move |_| {
            let restore = ScrollSlot::new(DomSessionStore).take().map(|offset| {
                Timeout::new(RESTORE_DELAY_MS, move || {
                    log_event(LogLevel::Debug, "scroll_restored", json!({ "offset": offset }));
                    stage.jump_to(offset);
                })
            });
            let save_on_unload = window().map(|win| {
                EventListener::new(&win, "beforeunload", |_event: &Event| {
                    ScrollSlot::new(DomSessionStore).save(dom::scroll_y());
                })
            });
            move || {
                drop(restore);
                drop(save_on_unload);
            }
        });
    }

    html! {
        <ContextProvider<Stage> context={(*stage).clone()}>
            <ContextProvider<BodyStateService> context={(*body).clone()}>
                <CustomCursor />
                <Navigation />
                <main id="smooth-content">
                    <Hero />
                    <Services />
                    <Works />
                    <SkillsAbout />
                    <Contact />
                </main>
                <Footer />
            </ContextProvider<BodyStateService>>
        </ContextProvider<Stage>>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
