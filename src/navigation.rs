use serde_json::json;
use thiserror::Error;

use crate::{
    easing::{lerp, progress, Easing},
    logging::{log_event, LogLevel},
};

pub const NAV_HIDE_THRESHOLD_PX: f64 = 100.0;
pub const NAV_DEADZONE_PX: f64 = 3.0;
pub const SECTION_SCROLL_OFFSET_PX: f64 = 100.0;
pub const MENU_CLOSE_DELAY_MS: u32 = 300;
const SMOOTH_SCROLL_DURATION_MS: f64 = 600.0;

pub struct MenuItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub const MENU_ITEMS: [MenuItem; 4] = [
    MenuItem { label: "TechStack", href: "#services" },
    MenuItem { label: "Projects", href: "#works" },
    MenuItem { label: "About", href: "#skills-about" },
    MenuItem { label: "Contact", href: "#contact" },
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavVisibility {
    last_y: f64,
    hidden: bool,
}

impl NavVisibility {
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn update(&mut self, scroll_y: f64, menu_open: bool) -> bool {
        if menu_open {
            return self.hidden;
        }

        let delta = scroll_y - self.last_y;
        if delta > NAV_DEADZONE_PX && scroll_y > NAV_HIDE_THRESHOLD_PX {
            self.hidden = true;
        } else if delta < -NAV_DEADZONE_PX {
            self.hidden = false;
        }

        self.last_y = scroll_y;
        self.hidden
    }

    pub fn reveal(&mut self) {
        self.hidden = false;
    }
}

pub fn section_scroll_target(current: f64, element_top: f64, content_top: f64, offset: f64) -> f64 {
    (current + (element_top - content_top) - offset).max(0.0)
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SmootherUnavailable {
    #[error("reduced motion requested")]
    ReducedMotion,
    #[error("requestAnimationFrame is not available")]
    NoAnimationFrame,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothScroll {
    from: f64,
    to: f64,
    started_at: f64,
    duration_ms: f64,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, started_at: f64) -> Self {
        Self {
            from,
            to,
            started_at,
            duration_ms: SMOOTH_SCROLL_DURATION_MS,
        }
    }

    pub fn step(&self, now_ms: f64) -> (f64, bool) {
        let t = progress(now_ms, self.started_at, self.duration_ms);
        if t >= 1.0 {
            return (self.to, true);
        }
        (lerp(self.from, self.to, Easing::Power2InOut.apply(t)), false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDriver {
    Smoothed,
    Direct,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollPlan {
    Jump(f64),
    Tween(SmoothScroll),
}

impl ScrollDriver {
    pub fn init(probe: Result<(), SmootherUnavailable>) -> Self {
        match probe {
            Ok(()) => Self::Smoothed,
            Err(reason) => {
                log_event(
                    LogLevel::Warn,
                    "scroll_smoother_init_failed",
                    json!({ "reason": reason.to_string() }),
                );
                Self::Direct
            }
        }
    }

    pub fn plan(self, current: f64, target: f64, now_ms: f64) -> ScrollPlan {
        match self {
            Self::Smoothed if (target - current).abs() >= 1.0 => {
                ScrollPlan::Tween(SmoothScroll::new(current, target, now_ms))
            }
            _ => ScrollPlan::Jump(target),
        }
    }
}
