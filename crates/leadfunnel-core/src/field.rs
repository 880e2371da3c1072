use crate::config::FieldConfig;
use crate::error::HeroError;
use crate::particle::{ColorClass, Lead, Viewport};
use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

/// The fixed set of leads for one viewport size.
///
/// Built once per valid viewport and replaced wholesale on resize; leads
/// are never mutated after generation.
#[derive(Clone, Debug)]
pub struct LeadField {
    leads: Vec<Lead>,
    viewport: Viewport,
}

impl LeadField {
    /// Sample a new field for `viewport`.
    ///
    /// Counts, color split and the converted subset are fixed by `config`;
    /// origins and motion parameters are drawn from `rng`.
    pub fn generate<R: Rng + ?Sized>(
        viewport: Viewport,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Result<Self, HeroError> {
        if viewport.is_degenerate() {
            return Err(HeroError::DegenerateViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let total = config.total();
        let mut lanes: Vec<u32> = (0..total).collect();
        lanes.shuffle(rng);

        let mut leads = Vec::with_capacity(total as usize);
        let groups = [
            (ColorClass::Warm, config.warm_count, 0.05),
            (ColorClass::Cool, config.cool_count, 0.35),
        ];
        for (color, count, left_frac) in groups {
            let slot_base = match color {
                ColorClass::Warm => 0,
                ColorClass::Cool => config.converted_per_color as usize,
            };
            for group_index in 0..count {
                let id = leads.len() as u32;
                let origin = Vec2::new(
                    rng.gen::<f32>() * viewport.width * 0.6 + viewport.width * left_frac,
                    rng.gen::<f32>() * viewport.height * 0.55 + viewport.height * 0.12,
                );
                let slot = (group_index < config.converted_per_color)
                    .then(|| slot_base + group_index as usize);
                leads.push(Lead {
                    id,
                    origin,
                    color,
                    size_base: 16.0 + rng.gen::<f32>() * 6.0,
                    opacity_base: 0.75 + rng.gen::<f32>() * 0.25,
                    phase_angle: rng.gen::<f32>() * std::f32::consts::TAU,
                    speed_factor: 0.4 + rng.gen::<f32>() * 0.3,
                    group_index,
                    lane: lanes[id as usize],
                    slot,
                });
            }
        }

        log::debug!(
            "generated lead field: {} leads for {}x{}",
            leads.len(),
            viewport.width,
            viewport.height
        );

        Ok(Self { leads, viewport })
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn count_color(&self, color: ColorClass) -> usize {
        self.leads.iter().filter(|l| l.color == color).count()
    }

    pub fn converted(&self) -> impl Iterator<Item = &Lead> {
        self.leads.iter().filter(|l| l.converted())
    }
}
