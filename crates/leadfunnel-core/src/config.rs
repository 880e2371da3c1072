use crate::error::HeroError;

/// Lead counts for one field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub warm_count: u32,
    pub cool_count: u32,
    /// Converted leads per color class.
    pub converted_per_color: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            warm_count: 26,
            cool_count: 22,
            converted_per_color: 5,
        }
    }
}

impl FieldConfig {
    pub fn total(&self) -> u32 {
        self.warm_count + self.cool_count
    }
}

/// Progress values at which each stage begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageBreakpoints {
    pub converging: f32,
    pub falling: f32,
    pub converted: f32,
}

impl Default for StageBreakpoints {
    fn default() -> Self {
        Self {
            converging: 0.10,
            falling: 0.45,
            converted: 0.75,
        }
    }
}

impl StageBreakpoints {
    pub fn as_array(&self) -> [f32; 3] {
        [self.converging, self.falling, self.converted]
    }
}

/// Sticky zones around stage breakpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResistanceConfig {
    pub enabled: bool,
    /// Half-width of each zone in raw progress units.
    pub half_width: f32,
    /// 0 = no resistance, approaching 1 = nearly flat inside the zone.
    pub strength: f32,
}

impl Default for ResistanceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            half_width: 0.04,
            strength: 0.6,
        }
    }
}

/// Funnel geometry as fractions of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FunnelConfig {
    pub top_frac: f32,
    pub bottom_frac: f32,
    pub spout_frac: f32,
    /// Rim half-width is `min(max_top_half_width, width * top_half_width_frac)`.
    pub top_half_width_frac: f32,
    pub max_top_half_width: f32,
    pub spout_half_width: f32,
    /// Progress span over which the funnel fades in and out.
    pub fade_span: f32,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            top_frac: 0.22,
            bottom_frac: 0.58,
            spout_frac: 0.08,
            top_half_width_frac: 0.24,
            max_top_half_width: 260.0,
            spout_half_width: 28.0,
            fade_span: 0.07,
        }
    }
}

/// Calendar widget layout in CSS pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarConfig {
    pub width: f32,
    pub height: f32,
    pub rows: u32,
    pub cols: u32,
    pub header_height: f32,
    pub day_header_height: f32,
    /// Vertical centre as a fraction of viewport height.
    pub center_frac: f32,
    /// Progress span over which the calendar fades in.
    pub reveal_span: f32,
    /// `(row, col)` cell for each converted slot.
    pub slots: Vec<(u32, u32)>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 380.0,
            rows: 4,
            cols: 5,
            header_height: 45.0,
            day_header_height: 25.0,
            center_frac: 0.55,
            reveal_span: 0.12,
            slots: vec![
                (0, 1),
                (1, 3),
                (2, 0),
                (0, 4),
                (2, 2),
                (1, 0),
                (3, 3),
                (1, 2),
                (3, 1),
                (2, 4),
            ],
        }
    }
}

/// Motion constants for the per-lead position function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionTiming {
    pub idle_amplitude_x: f32,
    pub idle_amplitude_y: f32,
    pub idle_freq_x: f32,
    pub idle_freq_y: f32,
    /// Fraction of the converging stage spent gathering above the rim.
    pub gather_fraction: f32,
    pub hover_above_rim: f32,
    pub mouth_depth: f32,
    pub drop_exponent: f32,
    pub fall_exponent: f32,
    pub fall_row_size: u32,
    pub fall_row_delay: f32,
    pub fall_col_delay: f32,
    pub fade_depth: f32,
    pub flight_exponent: f32,
    pub flight_stagger: f32,
    /// Opacity below which a lead is not drawn.
    pub draw_cutoff: f32,
}

impl Default for MotionTiming {
    fn default() -> Self {
        Self {
            idle_amplitude_x: 8.0,
            idle_amplitude_y: 6.0,
            idle_freq_x: 0.0006,
            idle_freq_y: 0.0005,
            gather_fraction: 0.6,
            hover_above_rim: 35.0,
            mouth_depth: 30.0,
            drop_exponent: 1.5,
            fall_exponent: 1.8,
            fall_row_size: 6,
            fall_row_delay: 0.06,
            fall_col_delay: 0.008,
            fade_depth: 0.65,
            flight_exponent: 2.5,
            flight_stagger: 0.05,
            draw_cutoff: 0.02,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeroConfig {
    pub field: FieldConfig,
    pub breakpoints: StageBreakpoints,
    pub resistance: ResistanceConfig,
    pub funnel: FunnelConfig,
    pub calendar: CalendarConfig,
    pub motion: MotionTiming,
}

impl HeroConfig {
    pub fn validate(&self) -> Result<(), HeroError> {
        let field = &self.field;
        if field.converted_per_color > field.warm_count
            || field.converted_per_color > field.cool_count
        {
            return Err(HeroError::InvalidConfig(format!(
                "{} converted per color exceeds a color group ({} warm, {} cool)",
                field.converted_per_color, field.warm_count, field.cool_count
            )));
        }

        let slots_needed = field.converted_per_color as usize * 2;
        if slots_needed > self.calendar.slots.len() {
            return Err(HeroError::InvalidConfig(format!(
                "{} converted leads but only {} calendar slots",
                slots_needed,
                self.calendar.slots.len()
            )));
        }

        let cal = &self.calendar;
        if cal.rows == 0 || cal.cols == 0 {
            return Err(HeroError::InvalidConfig("calendar grid is empty".into()));
        }
        if let Some(&(row, col)) = cal.slots.iter().find(|(r, c)| *r >= cal.rows || *c >= cal.cols) {
            return Err(HeroError::InvalidConfig(format!(
                "slot ({row}, {col}) lies outside the {}x{} calendar",
                cal.rows, cal.cols
            )));
        }

        let [a, b, c] = self.breakpoints.as_array();
        if !(0.0 < a && a < b && b < c && c < 1.0) {
            return Err(HeroError::InvalidConfig(format!(
                "breakpoints must be strictly ascending inside (0,1): {a}, {b}, {c}"
            )));
        }

        let r = &self.resistance;
        if !(0.0..1.0).contains(&r.strength) || !(r.half_width >= 0.0) {
            return Err(HeroError::InvalidConfig(format!(
                "resistance strength {} must lie in [0,1) and half width {} be non-negative",
                r.strength, r.half_width
            )));
        }

        Ok(())
    }
}
