use crate::config::HeroConfig;
use crate::error::HeroError;
use crate::field::LeadField;
use crate::frame::{plan_frame, FramePlan};
use crate::math::clamp_progress;
use crate::motion::Scene;
use crate::particle::Viewport;
use crate::stage::{ResistanceCurve, Stage};
use rand::Rng;

/// Owned state of one mounted hero.
///
/// Holds the lead field for the current viewport and the most recent
/// progress value. Progress updates are last-write-wins; a frame always
/// reads whatever was stored last.
pub struct Hero {
    config: HeroConfig,
    curve: ResistanceCurve,
    scene: Option<Scene>,
    field: Option<LeadField>,
    raw_progress: f32,
    progress: f32,
}

impl Hero {
    pub fn new(config: HeroConfig) -> Result<Self, HeroError> {
        config.validate()?;
        let curve = ResistanceCurve::new(&config.breakpoints, &config.resistance);
        Ok(Self {
            config,
            curve,
            scene: None,
            field: None,
            raw_progress: 0.0,
            progress: 0.0,
        })
    }

    /// Rebuild the field for `viewport`.
    ///
    /// Returns `false` and keeps the previous field when the viewport has
    /// no area.
    pub fn resize<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) -> bool {
        match LeadField::generate(viewport, &self.config.field, rng) {
            Ok(field) => {
                self.scene = Some(Scene::new(viewport, &self.config));
                self.field = Some(field);
                true
            }
            Err(e) => {
                log::warn!("skipping lead regeneration: {e}");
                false
            }
        }
    }

    pub fn set_progress(&mut self, raw: f32) {
        self.raw_progress = clamp_progress(raw);
        self.progress = self.curve.remap(self.raw_progress);
    }

    /// Progress after the resistance remap.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn raw_progress(&self) -> f32 {
        self.raw_progress
    }

    pub fn stage(&self) -> Stage {
        Stage::from_progress(self.progress, &self.config.breakpoints)
    }

    pub fn field(&self) -> Option<&LeadField> {
        self.field.as_ref()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Plan the frame at `time_ms`, or `None` before any valid viewport.
    pub fn frame(&self, time_ms: f64) -> Option<FramePlan> {
        let scene = self.scene.as_ref()?;
        let field = self.field.as_ref()?;
        Some(plan_frame(scene, field, self.progress, time_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_frame_before_resize() {
        let hero = Hero::new(HeroConfig::default()).unwrap();
        assert!(hero.frame(0.0).is_none());
    }

    #[test]
    fn test_degenerate_resize_keeps_field() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut hero = Hero::new(HeroConfig::default()).unwrap();
        assert!(hero.resize(Viewport::new(1024.0, 768.0, 1.0), &mut rng));
        let before = hero.field().unwrap().leads().to_vec();
        assert!(!hero.resize(Viewport::new(0.0, 0.0, 1.0), &mut rng));
        assert_eq!(hero.field().unwrap().leads(), &before[..]);
    }

    #[test]
    fn test_last_progress_wins() {
        let mut hero = Hero::new(HeroConfig::default()).unwrap();
        hero.set_progress(0.2);
        hero.set_progress(0.9);
        hero.set_progress(0.6);
        assert_eq!(hero.progress(), 0.6);
        assert_eq!(hero.stage(), Stage::Falling);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = HeroConfig::default();
        config.field.converted_per_color = 30;
        assert!(matches!(Hero::new(config), Err(HeroError::InvalidConfig(_))));
    }
}
