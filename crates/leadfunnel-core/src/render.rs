use crate::frame::{FramePlan, Sprite};
use crate::geometry::{CalendarGeometry, FunnelGeometry};

/// Drawing surface for a [`FramePlan`].
///
/// Implemented by the canvas bridge; tests record the calls.
pub trait Painter {
    fn clear(&mut self, width: f32, height: f32);
    fn funnel(&mut self, funnel: &FunnelGeometry, opacity: f32);
    fn calendar(&mut self, calendar: &CalendarGeometry, opacity: f32);
    fn lead(&mut self, sprite: &Sprite);
}

/// Issue the draw calls for one frame: clear, funnel, calendar, leads.
pub fn draw_frame<P: Painter + ?Sized>(plan: &FramePlan, painter: &mut P) {
    painter.clear(plan.width, plan.height);
    if plan.funnel_visible() {
        painter.funnel(&plan.funnel, plan.funnel_opacity);
    }
    if plan.calendar_visible() {
        painter.calendar(&plan.calendar, plan.calendar_opacity);
    }
    for sprite in &plan.sprites {
        painter.lead(sprite);
    }
}
