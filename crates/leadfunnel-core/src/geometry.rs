use crate::config::{CalendarConfig, FunnelConfig};
use crate::particle::Viewport;
use glam::Vec2;

/// Funnel cone resolved against a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FunnelGeometry {
    pub center_x: f32,
    pub top_y: f32,
    pub bottom_y: f32,
    pub spout_bottom_y: f32,
    pub top_half_width: f32,
    pub spout_half_width: f32,
}

impl FunnelGeometry {
    pub fn resolve(viewport: &Viewport, config: &FunnelConfig) -> Self {
        let top_y = viewport.height * config.top_frac;
        let bottom_y = viewport.height * config.bottom_frac;
        Self {
            center_x: viewport.center_x(),
            top_y,
            bottom_y,
            spout_bottom_y: bottom_y + viewport.height * config.spout_frac,
            top_half_width: config
                .max_top_half_width
                .min(viewport.width * config.top_half_width_frac),
            spout_half_width: config.spout_half_width,
        }
    }

    /// Half-width of the cone after falling `depth` (0 = rim, 1 = spout).
    pub fn half_width_at(&self, depth: f32) -> f32 {
        let depth = depth.clamp(0.0, 1.0);
        self.top_half_width - (self.top_half_width - self.spout_half_width) * depth
    }

    pub fn spout_exit(&self) -> Vec2 {
        Vec2::new(self.center_x, self.spout_bottom_y)
    }
}

/// Calendar widget resolved against a viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarGeometry {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub rows: u32,
    pub cols: u32,
    pub header_height: f32,
    pub day_header_height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    slots: Vec<(u32, u32)>,
}

impl CalendarGeometry {
    pub fn resolve(viewport: &Viewport, config: &CalendarConfig) -> Self {
        let center_y = viewport.height * config.center_frac;
        let rows = config.rows.max(1);
        let cols = config.cols.max(1);
        Self {
            left: viewport.center_x() - config.width / 2.0,
            top: center_y - config.height / 2.0,
            width: config.width,
            height: config.height,
            rows,
            cols,
            header_height: config.header_height,
            day_header_height: config.day_header_height,
            cell_width: config.width / cols as f32,
            cell_height: (config.height - config.header_height - config.day_header_height)
                / rows as f32,
            slots: config.slots.clone(),
        }
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Top edge of the cell grid, below the title and day labels.
    pub fn grid_top(&self) -> f32 {
        self.top + self.header_height + self.day_header_height
    }

    pub fn cell_center(&self, row: u32, col: u32) -> Vec2 {
        Vec2::new(
            self.left + col as f32 * self.cell_width + self.cell_width / 2.0,
            self.grid_top() + row as f32 * self.cell_height + self.cell_height / 2.0,
        )
    }

    /// Centre of the cell assigned to converted slot `slot`.
    pub fn slot_center(&self, slot: usize) -> Vec2 {
        if self.slots.is_empty() {
            return Vec2::new(self.center_x(), self.center_y());
        }
        let (row, col) = self.slots[slot % self.slots.len()];
        self.cell_center(row, col)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funnel_narrows_to_spout() {
        let f = FunnelGeometry::resolve(&Viewport::new(1280.0, 720.0, 1.0), &FunnelConfig::default());
        assert_eq!(f.top_half_width, 260.0);
        assert_eq!(f.half_width_at(0.0), 260.0);
        assert_eq!(f.half_width_at(1.0), 28.0);
        assert!(f.half_width_at(0.5) < 260.0 && f.half_width_at(0.5) > 28.0);
    }

    #[test]
    fn test_narrow_viewport_limits_rim() {
        let f = FunnelGeometry::resolve(&Viewport::new(400.0, 800.0, 1.0), &FunnelConfig::default());
        assert!((f.top_half_width - 96.0).abs() < 1e-4);
    }

    #[test]
    fn test_cell_center_inside_calendar() {
        let cal = CalendarGeometry::resolve(&Viewport::new(1280.0, 720.0, 1.0), &CalendarConfig::default());
        for slot in 0..cal.slot_count() {
            let c = cal.slot_center(slot);
            assert!(c.x > cal.left && c.x < cal.left + cal.width);
            assert!(c.y > cal.grid_top() && c.y < cal.top + cal.height);
        }
    }
}
