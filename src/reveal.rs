use std::collections::HashMap;

use crate::{
    easing::{lerp, progress, Easing},
    viewport::{Bounds, SubscriptionId},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    pub from_opacity: f64,
    pub from_offset: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: Easing,
    pub stagger_ms: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            from_opacity: 0.0,
            from_offset: 50.0,
            duration_ms: 600.0,
            delay_ms: 0.0,
            easing: Easing::Power2Out,
            stagger_ms: 0.0,
        }
    }
}

impl RevealConfig {
    pub fn from_offset(mut self, offset: f64) -> Self {
        self.from_offset = offset;
        self
    }

    pub fn from_opacity(mut self, opacity: f64) -> Self {
        self.from_opacity = opacity;
        self
    }

    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn stagger(mut self, stagger_ms: f64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    fn child_start(&self, started_at: f64, index: usize) -> f64 {
        started_at + self.delay_ms + self.stagger_ms * index as f64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleFrame {
    pub target: String,
    pub opacity: f64,
    pub offset_y: f64,
}

impl StyleFrame {
    fn visible(target: &str) -> Self {
        Self {
            target: target.to_string(),
            opacity: 1.0,
            offset_y: 0.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.opacity == 1.0 && self.offset_y == 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Armed,
    Playing { started_at: f64 },
    Settled,
}

struct Reveal {
    targets: Vec<String>,
    config: RevealConfig,
    phase: Phase,
    plays: u32,
}

impl Reveal {
    fn settled_frames(&self) -> Vec<StyleFrame> {
        self.targets.iter().map(|target| StyleFrame::visible(target)).collect()
    }
}

#[derive(Default)]
pub struct RevealAnimator {
    reveals: HashMap<SubscriptionId, Reveal>,
}

impl RevealAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        subscription: SubscriptionId,
        targets: Vec<String>,
        config: RevealConfig,
    ) -> Vec<StyleFrame> {
        let hidden = targets
            .iter()
            .map(|target| StyleFrame {
                target: target.clone(),
                opacity: config.from_opacity,
                offset_y: config.from_offset,
            })
            .collect();

        self.reveals.insert(
            subscription,
            Reveal {
                targets,
                config,
                phase: Phase::Armed,
                plays: 0,
            },
        );
        hidden
    }

    pub fn trigger(
        &mut self,
        subscription: SubscriptionId,
        now_ms: f64,
        present: impl Fn(&str) -> bool,
    ) -> bool {
        let Some(reveal) = self.reveals.get_mut(&subscription) else {
            return false;
        };
        if reveal.phase != Phase::Armed {
            return false;
        }

        reveal.targets.retain(|target| present(target));
        if reveal.targets.is_empty() {
            return false;
        }

        reveal.phase = Phase::Playing { started_at: now_ms };
        reveal.plays += 1;
        true
    }

    pub fn frame(&mut self, now_ms: f64) -> Vec<StyleFrame> {
        let mut frames = Vec::new();

        for reveal in self.reveals.values_mut() {
            let Phase::Playing { started_at } = reveal.phase else {
                continue;
            };
            let config = reveal.config;
            let last_start = config.child_start(started_at, reveal.targets.len().saturating_sub(1));

            if progress(now_ms, last_start, config.duration_ms) >= 1.0 {
                reveal.phase = Phase::Settled;
                frames.extend(reveal.settled_frames());
                continue;
            }

            for (index, target) in reveal.targets.iter().enumerate() {
                let t = config.easing.apply(progress(
                    now_ms,
                    config.child_start(started_at, index),
                    config.duration_ms,
                ));
                frames.push(StyleFrame {
                    target: target.clone(),
                    opacity: lerp(config.from_opacity, 1.0, t),
                    offset_y: lerp(config.from_offset, 0.0, t),
                });
            }
        }

        frames
    }

    pub fn cancel(&mut self, subscription: SubscriptionId) -> Vec<StyleFrame> {
        let Some(reveal) = self.reveals.get_mut(&subscription) else {
            return Vec::new();
        };
        if reveal.phase == Phase::Settled {
            return Vec::new();
        }

        reveal.phase = Phase::Settled;
        reveal.settled_frames()
    }

    pub fn cancel_all(&mut self) -> Vec<StyleFrame> {
        let ids: Vec<SubscriptionId> = self.reveals.keys().copied().collect();
        ids.into_iter().flat_map(|id| self.cancel(id)).collect()
    }

    pub fn remove(&mut self, subscription: SubscriptionId) {
        self.reveals.remove(&subscription);
    }

    pub fn play_count(&self, subscription: SubscriptionId) -> u32 {
        self.reveals
            .get(&subscription)
            .map(|reveal| reveal.plays)
            .unwrap_or(0)
    }

    pub fn is_animating(&self) -> bool {
        self.reveals
            .values()
            .any(|reveal| matches!(reveal.phase, Phase::Playing { .. }))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubTrack {
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub end: f64,
    pub easing: Easing,
}

impl ScrubTrack {
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            start: 0.0,
            end: 1.0,
            easing: Easing::Linear,
        }
    }

    pub fn between(mut self, start: f64, end: f64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn value(&self, scroll_progress: f64) -> f64 {
        let t = progress(scroll_progress, self.start, self.end - self.start);
        lerp(self.from, self.to, self.easing.apply(t))
    }
}

pub fn scroll_through(bounds: Bounds) -> f64 {
    let height = bounds.height();
    if height <= 0.0 {
        return if bounds.top < 0.0 { 1.0 } else { 0.0 };
    }
    (-bounds.top / height).clamp(0.0, 1.0)
}
