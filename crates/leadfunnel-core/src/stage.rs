use crate::config::{ResistanceConfig, StageBreakpoints};
use crate::math::{clamp_progress, smoothstep};

/// Narrative phase of the hero, derived from scroll progress.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Stage {
    Scattered = 0,
    Converging = 1,
    Falling = 2,
    Converted = 3,
}

/// Caption shown while a stage is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caption {
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Scattered,
        Stage::Converging,
        Stage::Falling,
        Stage::Converted,
    ];

    pub fn from_progress(progress: f32, breakpoints: &StageBreakpoints) -> Self {
        let p = clamp_progress(progress);
        if p < breakpoints.converging {
            Stage::Scattered
        } else if p < breakpoints.falling {
            Stage::Converging
        } else if p < breakpoints.converted {
            Stage::Falling
        } else {
            Stage::Converted
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn caption(self) -> Caption {
        match self {
            Stage::Scattered => Caption {
                title: "Cold Leads Everywhere",
                subtitle: "Scattered across the internet, waiting to be found",
            },
            Stage::Converging => Caption {
                title: "AI-Powered Discovery",
                subtitle: "We find and enrich your ideal prospects",
            },
            Stage::Falling => Caption {
                title: "Personalized Outreach",
                subtitle: "Every message crafted for maximum impact",
            },
            Stage::Converted => Caption {
                title: "Booked Calls",
                subtitle: "Qualified meetings on your calendar",
            },
        }
    }
}

const CURVE_SAMPLES: usize = 512;

/// Monotonic remap of raw progress that slows movement near stage
/// breakpoints.
///
/// The slope is `1 - strength * bump(x)` where `bump` peaks at each
/// breakpoint; its running integral is tabulated and normalised so that
/// 0 and 1 are fixed points. Linear interpolation over the table keeps the
/// curve continuous, and a strictly positive slope keeps it monotonic.
#[derive(Clone, Debug)]
pub struct ResistanceCurve {
    table: Option<Vec<f32>>,
}

impl ResistanceCurve {
    pub fn identity() -> Self {
        Self { table: None }
    }

    pub fn new(breakpoints: &StageBreakpoints, config: &ResistanceConfig) -> Self {
        if !config.enabled || config.strength <= 0.0 || config.half_width <= 0.0 {
            return Self::identity();
        }
        let strength = config.strength.min(0.99);
        let centers = breakpoints.as_array();
        let slope = |x: f32| {
            let bump = centers
                .iter()
                .map(|c| 1.0 - smoothstep(0.0, config.half_width, (x - c).abs()))
                .fold(0.0_f32, f32::max);
            1.0 - strength * bump
        };

        let step = 1.0 / CURVE_SAMPLES as f32;
        let mut table = Vec::with_capacity(CURVE_SAMPLES + 1);
        let mut acc = 0.0_f32;
        table.push(0.0);
        for i in 0..CURVE_SAMPLES {
            let x0 = i as f32 * step;
            // trapezoid
            acc += 0.5 * (slope(x0) + slope(x0 + step)) * step;
            table.push(acc);
        }
        for v in &mut table {
            *v /= acc;
        }
        table[CURVE_SAMPLES] = 1.0;
        Self { table: Some(table) }
    }

    pub fn is_identity(&self) -> bool {
        self.table.is_none()
    }

    pub fn remap(&self, raw: f32) -> f32 {
        let p = clamp_progress(raw);
        let Some(table) = &self.table else {
            return p;
        };
        let scaled = p * CURVE_SAMPLES as f32;
        let i = (scaled.floor() as usize).min(CURVE_SAMPLES - 1);
        let t = scaled - i as f32;
        table[i] + (table[i + 1] - table[i]) * t
    }
}

impl Default for ResistanceCurve {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_boundaries() {
        let bp = StageBreakpoints::default();
        assert_eq!(Stage::from_progress(0.0, &bp), Stage::Scattered);
        assert_eq!(Stage::from_progress(0.0999, &bp), Stage::Scattered);
        assert_eq!(Stage::from_progress(0.10, &bp), Stage::Converging);
        assert_eq!(Stage::from_progress(0.45, &bp), Stage::Falling);
        assert_eq!(Stage::from_progress(0.75, &bp), Stage::Converted);
        assert_eq!(Stage::from_progress(1.0, &bp), Stage::Converted);
    }

    #[test]
    fn test_out_of_range_progress_clamps() {
        let bp = StageBreakpoints::default();
        assert_eq!(Stage::from_progress(-1.0, &bp), Stage::Scattered);
        assert_eq!(Stage::from_progress(4.0, &bp), Stage::Converted);
        assert_eq!(Stage::from_progress(f32::NAN, &bp), Stage::Scattered);
    }

    #[test]
    fn test_identity_curve_passthrough() {
        let curve = ResistanceCurve::identity();
        assert_eq!(curve.remap(0.37), 0.37);
        assert_eq!(curve.remap(2.0), 1.0);
    }

    #[test]
    fn test_disabled_config_gives_identity() {
        let curve = ResistanceCurve::new(&StageBreakpoints::default(), &ResistanceConfig::default());
        assert!(curve.is_identity());
    }
}
