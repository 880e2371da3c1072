use glam::Vec2;

/// Color class of a lead. Warm leads enter from the left and sort to the
/// left side of the funnel, cool leads the opposite.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ColorClass {
    Warm = 0,
    Cool = 1,
}

impl ColorClass {
    /// Horizontal bias inside the funnel, as a fraction of its current width.
    pub fn lane_bias(self) -> f32 {
        match self {
            ColorClass::Warm => -0.35,
            ColorClass::Cool => 0.35,
        }
    }
}

/// One simulated lead. Every field is fixed when the field is generated;
/// per-frame position, opacity and size are derived in [`crate::motion`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lead {
    pub id: u32,
    pub origin: Vec2,
    pub color: ColorClass,
    pub size_base: f32,
    pub opacity_base: f32,
    pub phase_angle: f32,
    pub speed_factor: f32,
    /// Index within its color group.
    pub group_index: u32,
    /// Shuffled lane used while falling so colors interleave.
    pub lane: u32,
    /// Calendar slot for converted leads.
    pub slot: Option<usize>,
}

impl Lead {
    pub fn converted(&self) -> bool {
        self.slot.is_some()
    }
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }

    /// Backing-store size in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.device_pixel_ratio).round().max(0.0) as u32,
            (self.height * self.device_pixel_ratio).round().max(0.0) as u32,
        )
    }
}
