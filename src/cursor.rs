use crate::easing::{lerp, progress, Easing};

const FOLLOW_DURATION_MS: f64 = 150.0;
const FADE_DURATION_MS: f64 = 300.0;

pub fn cursor_enabled(touch_device: bool, viewport_width: f64, breakpoint_px: u32) -> bool {
    !touch_device && viewport_width >= f64::from(breakpoint_px)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tween {
    from: f64,
    to: f64,
    started_at: f64,
    duration_ms: f64,
}

impl Tween {
    fn at_rest(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            started_at: 0.0,
            duration_ms: 0.0,
        }
    }

    fn value(&self, now_ms: f64) -> f64 {
        let t = progress(now_ms, self.started_at, self.duration_ms);
        if t >= 1.0 {
            return self.to;
        }
        lerp(self.from, self.to, Easing::Power2Out.apply(t))
    }

    fn retarget(&mut self, to: f64, now_ms: f64, duration_ms: f64) {
        *self = Self {
            from: self.value(now_ms),
            to,
            started_at: now_ms,
            duration_ms,
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFrame {
    pub x: f64,
    pub y: f64,
    pub presence: f64,
}

impl CursorFrame {
    pub fn to_css(&self) -> String {
        format!(
            "transform: translate({:.1}px, {:.1}px) translate(-50%, -50%) scale({:.3}); opacity: {:.3};",
            self.x, self.y, self.presence, self.presence
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CursorFollower {
    x: Tween,
    y: Tween,
    presence: Tween,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self {
            x: Tween::at_rest(0.0),
            y: Tween::at_rest(0.0),
            presence: Tween::at_rest(0.0),
        }
    }
}

impl CursorFollower {
    pub fn move_to(&mut self, x: f64, y: f64, now_ms: f64) {
        self.x.retarget(x, now_ms, FOLLOW_DURATION_MS);
        self.y.retarget(y, now_ms, FOLLOW_DURATION_MS);
    }

    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        let to = if visible { 1.0 } else { 0.0 };
        self.presence.retarget(to, now_ms, FADE_DURATION_MS);
    }

    pub fn frame(&self, now_ms: f64) -> CursorFrame {
        CursorFrame {
            x: self.x.value(now_ms),
            y: self.y.value(now_ms),
            presence: self.presence.value(now_ms),
        }
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        [self.x, self.y, self.presence]
            .iter()
            .all(|tween| progress(now_ms, tween.started_at, tween.duration_ms) >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_for_touch_and_narrow_viewports() {
        assert!(!cursor_enabled(true, 1_440.0, 768));
        assert!(!cursor_enabled(false, 700.0, 768));
        assert!(cursor_enabled(false, 768.0, 768));
    }

    #[test]
    fn follows_pointer_and_settles_on_it() {
        let mut cursor = CursorFollower::default();
        cursor.move_to(200.0, 100.0, 0.0);

        let midway = cursor.frame(50.0);
        assert!(midway.x > 0.0 && midway.x < 200.0);
        assert!(!cursor.is_settled(50.0));

        let settled = cursor.frame(150.0);
        assert_eq!((settled.x, settled.y), (200.0, 100.0));
        assert!(cursor.is_settled(150.0));
    }

    #[test]
    fn retargeting_mid_flight_starts_from_current_position() {
        let mut cursor = CursorFollower::default();
        cursor.move_to(300.0, 0.0, 0.0);
        let before = cursor.frame(75.0).x;

        cursor.move_to(0.0, 0.0, 75.0);

        assert_eq!(cursor.frame(75.0).x, before);
        assert_eq!(cursor.frame(300.0).x, 0.0);
    }

    #[test]
    fn fades_in_and_out() {
        let mut cursor = CursorFollower::default();
        assert_eq!(cursor.frame(0.0).presence, 0.0);

        cursor.set_visible(true, 0.0);
        assert_eq!(cursor.frame(300.0).presence, 1.0);

        cursor.set_visible(false, 400.0);
        assert_eq!(cursor.frame(700.0).presence, 0.0);
    }
}
