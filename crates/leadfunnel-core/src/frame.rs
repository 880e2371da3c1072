use crate::field::LeadField;
use crate::geometry::{CalendarGeometry, FunnelGeometry};
use crate::math::{clamp_progress, lerp, unlerp};
use crate::motion::{sample_lead, LeadSample, Scene};
use crate::particle::{ColorClass, Lead};
use crate::stage::Stage;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
        )
    }
}

pub const CORAL: Rgb = Rgb::new(255.0, 107.0, 107.0);
pub const TEAL: Rgb = Rgb::new(0.0, 212.0, 200.0);
pub const TEAL_GLOW: Rgb = Rgb::new(0.0, 255.0, 229.0);

/// How far warm leads drift toward teal by the end of the fall.
const WARM_SHIFT: f32 = 0.3;
/// Fall depth at which warm leads start drifting toward teal.
const WARM_SHIFT_DEPTH: f32 = 0.5;

/// One lead as drawn this frame: 32 bytes, eight `f32`s, so a slice can be
/// handed to a host as a flat float array.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 1.0 when drawn with a glow, else 0.0.
    pub glow: f32,
}

impl Sprite {
    pub fn color(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn is_glowing(&self) -> bool {
        self.glow > 0.5
    }
}

/// Everything needed to draw one frame, independent of the surface.
#[derive(Clone, Debug)]
pub struct FramePlan {
    pub progress: f32,
    pub stage: Stage,
    pub funnel_opacity: f32,
    pub calendar_opacity: f32,
    pub funnel: FunnelGeometry,
    pub calendar: CalendarGeometry,
    pub width: f32,
    pub height: f32,
    /// Sprites in lead order; leads below the draw cutoff are omitted.
    pub sprites: Vec<Sprite>,
    /// Lead id for each entry of `sprites`.
    pub sprite_ids: Vec<u32>,
}

impl FramePlan {
    pub fn funnel_visible(&self) -> bool {
        self.funnel_opacity > 0.0
    }

    pub fn calendar_visible(&self) -> bool {
        self.calendar_opacity > 0.0
    }

    pub fn sprite_for(&self, id: u32) -> Option<&Sprite> {
        self.sprite_ids
            .iter()
            .position(|&sid| sid == id)
            .map(|i| &self.sprites[i])
    }
}

pub fn funnel_opacity(scene: &Scene, progress: f32) -> f32 {
    let p = clamp_progress(progress);
    let bp = &scene.breakpoints;
    if p <= bp.converging || p >= bp.converted {
        return 0.0;
    }
    let span = scene.funnel_fade_span;
    let fade_in = unlerp(bp.converging, bp.converging + span, p);
    let fade_out = 1.0 - unlerp(bp.converted - span, bp.converted, p);
    fade_in.min(fade_out).max(0.0)
}

pub fn calendar_opacity(scene: &Scene, progress: f32) -> f32 {
    let p = clamp_progress(progress);
    let start = scene.breakpoints.converted;
    if p <= start {
        return 0.0;
    }
    if scene.calendar_reveal_span <= 0.0 {
        return 1.0;
    }
    ((p - start) / scene.calendar_reveal_span).min(1.0)
}

fn lead_color(lead: &Lead, scene: &Scene, progress: f32, sample: &LeadSample) -> Rgb {
    if sample.glowing || (lead.converted() && progress >= scene.breakpoints.converted) {
        return TEAL_GLOW;
    }
    match lead.color {
        ColorClass::Cool => TEAL,
        ColorClass::Warm if sample.fall_depth > WARM_SHIFT_DEPTH => CORAL.mix(
            TEAL,
            unlerp(WARM_SHIFT_DEPTH, 1.0, sample.fall_depth) * WARM_SHIFT,
        ),
        ColorClass::Warm => CORAL,
    }
}

/// Sample every lead of `field` and resolve the frame's shapes.
pub fn plan_frame(scene: &Scene, field: &LeadField, progress: f32, time_ms: f64) -> FramePlan {
    let p = clamp_progress(progress);
    let cutoff = scene.timing.draw_cutoff;

    let mut sprites = Vec::with_capacity(field.len());
    let mut sprite_ids = Vec::with_capacity(field.len());
    for lead in field.leads() {
        let sample = sample_lead(lead, scene, p, time_ms);
        if sample.opacity <= cutoff {
            continue;
        }
        let color = lead_color(lead, scene, p, &sample);
        sprites.push(Sprite {
            x: sample.position.x,
            y: sample.position.y,
            size: sample.size,
            opacity: sample.opacity,
            r: color.r,
            g: color.g,
            b: color.b,
            glow: if sample.glowing { 1.0 } else { 0.0 },
        });
        sprite_ids.push(lead.id);
    }

    FramePlan {
        progress: p,
        stage: Stage::from_progress(p, &scene.breakpoints),
        funnel_opacity: funnel_opacity(scene, p),
        calendar_opacity: calendar_opacity(scene, p),
        funnel: scene.funnel,
        calendar: scene.calendar.clone(),
        width: scene.viewport.width,
        height: scene.viewport.height,
        sprites,
        sprite_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeroConfig;
    use crate::particle::Viewport;

    fn scene() -> Scene {
        Scene::new(Viewport::new(1280.0, 720.0, 1.0), &HeroConfig::default())
    }

    #[test]
    fn test_sprite_is_32_bytes() {
        assert_eq!(std::mem::size_of::<Sprite>(), 32);
    }

    #[test]
    fn test_funnel_fades_at_window_edges() {
        let s = scene();
        assert_eq!(funnel_opacity(&s, 0.05), 0.0);
        assert!(funnel_opacity(&s, 0.13) > 0.0 && funnel_opacity(&s, 0.13) < 1.0);
        assert_eq!(funnel_opacity(&s, 0.5), 1.0);
        assert!(funnel_opacity(&s, 0.72) < 1.0);
        assert_eq!(funnel_opacity(&s, 0.8), 0.0);
    }

    #[test]
    fn test_calendar_reveal_ramps() {
        let s = scene();
        assert_eq!(calendar_opacity(&s, 0.75), 0.0);
        assert!((calendar_opacity(&s, 0.81) - 0.5).abs() < 1e-4);
        assert_eq!(calendar_opacity(&s, 0.95), 1.0);
    }

    #[test]
    fn test_rgb_mix() {
        let c = CORAL.mix(TEAL, 0.5);
        assert_eq!(c, Rgb::new(127.5, 159.5, 153.5));
    }
}
