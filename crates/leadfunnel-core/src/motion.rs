use crate::config::{HeroConfig, MotionTiming, StageBreakpoints};
use crate::geometry::{CalendarGeometry, FunnelGeometry};
use crate::math::{
    clamp_progress, ease_in_out_cubic, ease_in_pow, ease_out_pow, hash11, lerp_vec2, unlerp,
};
use crate::particle::{Lead, Viewport};
use glam::Vec2;

/// Per-field immutable data shared by every lead sample in a frame.
#[derive(Clone, Debug)]
pub struct Scene {
    pub viewport: Viewport,
    pub funnel: FunnelGeometry,
    pub calendar: CalendarGeometry,
    pub breakpoints: StageBreakpoints,
    pub timing: MotionTiming,
    pub funnel_fade_span: f32,
    pub calendar_reveal_span: f32,
}

impl Scene {
    pub fn new(viewport: Viewport, config: &HeroConfig) -> Self {
        Self {
            viewport,
            funnel: FunnelGeometry::resolve(&viewport, &config.funnel),
            calendar: CalendarGeometry::resolve(&viewport, &config.calendar),
            breakpoints: config.breakpoints,
            timing: config.motion,
            funnel_fade_span: config.funnel.fade_span,
            calendar_reveal_span: config.calendar.reveal_span,
        }
    }

    /// Point above the rim where a lead gathers before dropping in.
    fn gather_point(&self, lead: &Lead) -> Vec2 {
        let spread = ((lead.group_index % 12) as f32 - 6.0) / 6.0;
        Vec2::new(
            self.funnel.center_x + spread * self.funnel.top_half_width * 0.6,
            self.funnel.top_y - self.timing.hover_above_rim,
        )
    }

    /// Point just inside the funnel mouth where the fall begins.
    fn mouth_point(&self, lead: &Lead) -> Vec2 {
        let spread = ((lead.group_index % 10) as f32 - 5.0) / 5.0;
        Vec2::new(
            self.funnel.center_x + spread * self.funnel.top_half_width * 0.5,
            self.funnel.top_y + self.timing.mouth_depth,
        )
    }
}

/// Derived per-frame state of one lead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeadSample {
    pub position: Vec2,
    pub opacity: f32,
    pub size: f32,
    /// Depth through the funnel while falling, 0 otherwise.
    pub fall_depth: f32,
    pub glowing: bool,
}

impl LeadSample {
    fn hidden() -> Self {
        Self {
            position: Vec2::ZERO,
            opacity: 0.0,
            size: 0.0,
            fall_depth: 0.0,
            glowing: false,
        }
    }
}

/// Compute where `lead` is drawn at `progress`.
///
/// Pure in its inputs; `time_ms` only feeds the idle float while scattered.
pub fn sample_lead(lead: &Lead, scene: &Scene, progress: f32, time_ms: f64) -> LeadSample {
    let p = clamp_progress(progress);
    let bp = &scene.breakpoints;

    if p < bp.converging {
        scattered(lead, scene, time_ms)
    } else if p < bp.falling {
        converging(lead, scene, unlerp(bp.converging, bp.falling, p))
    } else if p < bp.converted {
        falling(lead, scene, unlerp(bp.falling, bp.converted, p))
    } else {
        converted(lead, scene, unlerp(bp.converted, 1.0, p))
    }
}

fn scattered(lead: &Lead, scene: &Scene, time_ms: f64) -> LeadSample {
    let t = &scene.timing;
    // f64 keeps epoch-millisecond timestamps precise before the sin.
    let time = if time_ms.is_finite() { time_ms } else { 0.0 };
    let speed = lead.speed_factor as f64;
    let phase = lead.phase_angle as f64;
    let float_x = (time * t.idle_freq_x as f64 * speed + phase).sin() as f32 * t.idle_amplitude_x;
    let float_y = (time * t.idle_freq_y as f64 * speed + phase).cos() as f32 * t.idle_amplitude_y;

    LeadSample {
        position: lead.origin + Vec2::new(float_x, float_y),
        opacity: lead.opacity_base,
        size: lead.size_base,
        fall_depth: 0.0,
        glowing: false,
    }
}

fn converging(lead: &Lead, scene: &Scene, s: f32) -> LeadSample {
    let t = &scene.timing;
    let gather = scene.gather_point(lead);

    let (position, size) = if s < t.gather_fraction {
        let eased = ease_in_out_cubic(unlerp(0.0, t.gather_fraction, s));
        (
            lerp_vec2(lead.origin, gather, eased),
            lead.size_base * (1.0 - eased * 0.05),
        )
    } else {
        let eased = ease_in_pow(unlerp(t.gather_fraction, 1.0, s), t.drop_exponent);
        (
            lerp_vec2(gather, scene.mouth_point(lead), eased),
            lead.size_base * (0.95 - eased * 0.05),
        )
    };

    LeadSample {
        position,
        opacity: lead.opacity_base,
        size,
        fall_depth: 0.0,
        glowing: false,
    }
}

fn falling(lead: &Lead, scene: &Scene, s: f32) -> LeadSample {
    let t = &scene.timing;
    let funnel = &scene.funnel;

    let row_size = t.fall_row_size.max(1);
    let row = lead.group_index / row_size;
    let col = lead.group_index % row_size;
    let delay = (row as f32 * t.fall_row_delay
        + col as f32 * t.fall_col_delay
        + hash11(lead.id as f32 + 1.0) * 0.01)
        .min(0.9);
    let delayed = ((s - delay) / (1.0 - delay)).clamp(0.0, 1.0);
    let eased = ease_in_pow(delayed, t.fall_exponent);
    let depth = eased;

    let start = scene.mouth_point(lead);
    let lane_offset = ((lead.lane % 8) as f32 / 8.0 - 0.5) * 0.4 + lead.color.lane_bias();
    let target = Vec2::new(
        funnel.center_x + lane_offset * funnel.half_width_at(depth),
        start.y + (funnel.spout_bottom_y - start.y) * depth,
    );
    let position = lerp_vec2(start, target, eased);

    let opacity = if !lead.converted() && depth > t.fade_depth {
        lead.opacity_base * (1.0 - unlerp(t.fade_depth, 1.0, depth))
    } else {
        lead.opacity_base
    };

    LeadSample {
        position,
        opacity,
        size: lead.size_base * (0.9 - depth * 0.12),
        fall_depth: depth,
        glowing: false,
    }
}

fn converted(lead: &Lead, scene: &Scene, s: f32) -> LeadSample {
    let t = &scene.timing;
    let Some(slot) = lead.slot else {
        return LeadSample::hidden();
    };

    let eased = ease_out_pow(s, t.flight_exponent);
    let stagger = (slot as f32 * t.flight_stagger).min(0.9);
    let own = ((eased - stagger) / (1.0 - stagger)).clamp(0.0, 1.0);
    let smooth = ease_out_pow(own, 2.0);

    let start = scene.funnel.spout_exit();
    let target = scene.calendar.slot_center(slot);
    let position = if smooth >= 1.0 {
        target
    } else {
        lerp_vec2(start, target, smooth)
    };

    LeadSample {
        position,
        opacity: 1.0,
        size: lead.size_base * (0.85 + smooth * 0.25),
        fall_depth: 0.0,
        glowing: smooth > 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ColorClass;

    fn scene() -> Scene {
        Scene::new(Viewport::new(1280.0, 720.0, 1.0), &HeroConfig::default())
    }

    fn lead(slot: Option<usize>) -> Lead {
        Lead {
            id: 3,
            origin: Vec2::new(200.0, 300.0),
            color: ColorClass::Warm,
            size_base: 18.0,
            opacity_base: 0.8,
            phase_angle: 1.2,
            speed_factor: 0.5,
            group_index: 3,
            lane: 5,
            slot,
        }
    }

    #[test]
    fn test_converging_ends_at_mouth() {
        let scene = scene();
        let l = lead(None);
        let end = sample_lead(&l, &scene, 0.4499999, 0.0);
        let start_fall = sample_lead(&l, &scene, 0.45, 0.0);
        assert!(end.position.distance(start_fall.position) < 0.5);
    }

    #[test]
    fn test_converted_exact_at_end() {
        let scene = scene();
        let l = lead(Some(4));
        let s = sample_lead(&l, &scene, 1.0, 0.0);
        assert_eq!(s.position, scene.calendar.slot_center(4));
        assert_eq!(s.opacity, 1.0);
        assert!(s.glowing);
    }

    #[test]
    fn test_unconverted_hidden_in_final_stage() {
        let scene = scene();
        let s = sample_lead(&lead(None), &scene, 0.8, 0.0);
        assert_eq!(s.opacity, 0.0);
        assert_eq!(s.size, 0.0);
    }

    #[test]
    fn test_nan_time_is_stable() {
        let scene = scene();
        let s = sample_lead(&lead(None), &scene, 0.0, f64::NAN);
        assert!(s.position.is_finite());
    }
}
