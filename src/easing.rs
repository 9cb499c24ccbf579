#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3Out,
}

impl Easing {
    pub fn apply(self, progress: f64) -> f64 {
        let t = if progress.is_nan() { 1.0 } else { progress.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,
            Self::Power2In => t.powi(3),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

pub fn progress(now_ms: f64, start_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return if now_ms >= start_ms { 1.0 } else { 0.0 };
    }

    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power2In,
        Easing::Power2Out,
        Easing::Power2InOut,
        Easing::Power3Out,
    ];

    #[test]
    fn every_curve_hits_both_endpoints() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?} at 1");
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-3.0), 0.0);
            assert!((easing.apply(7.5) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn ease_out_leads_linear_and_ease_in_lags() {
        assert!(Easing::Power2Out.apply(0.3) > 0.3);
        assert!(Easing::Power3Out.apply(0.3) > Easing::Power2Out.apply(0.3));
        assert!(Easing::Power2In.apply(0.3) < 0.3);
        assert!((Easing::Power2InOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        assert_eq!(progress(10.0, 10.0, 0.0), 1.0);
        assert_eq!(progress(9.0, 10.0, 0.0), 0.0);
        assert_eq!(progress(15.0, 10.0, 10.0), 0.5);
    }
}
