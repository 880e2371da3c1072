use leadfunnel_core::config::HeroConfig;
use leadfunnel_core::error::HeroError;
use leadfunnel_core::frame::Sprite;
use leadfunnel_core::hero::Hero;
use leadfunnel_core::particle::Viewport;
use leadfunnel_core::render::draw_frame;
use leadfunnel_core::scroll::PinnedScroll;
use leadfunnel_core::stage::Stage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, Window};

mod painter;

use painter::CanvasPainter;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn js_error(e: HeroError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Another module may already own the logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Tunables a host may pass to [`ScrollHero::mount_with`].
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct ScrollHeroOptions {
    resistance: bool,
    pin_factor: f32,
    scrub_ms: f32,
    track_scroll: bool,
}

#[wasm_bindgen]
impl ScrollHeroOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ScrollHeroOptions {
        let scroll = PinnedScroll::default();
        ScrollHeroOptions {
            resistance: false,
            pin_factor: scroll.pin_factor,
            scrub_ms: scroll.scrub_ms,
            track_scroll: true,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn resistance(&self) -> bool {
        self.resistance
    }

    #[wasm_bindgen(getter)]
    pub fn pin_factor(&self) -> f32 {
        self.pin_factor
    }

    #[wasm_bindgen(getter)]
    pub fn scrub_ms(&self) -> f32 {
        self.scrub_ms
    }

    #[wasm_bindgen(getter)]
    pub fn track_scroll(&self) -> bool {
        self.track_scroll
    }

    /// Sticky zones around stage breakpoints.
    #[wasm_bindgen(setter)]
    pub fn set_resistance(&mut self, enabled: bool) {
        self.resistance = enabled;
    }

    /// Viewport heights the section stays pinned for.
    #[wasm_bindgen(setter)]
    pub fn set_pin_factor(&mut self, pin_factor: f32) {
        self.pin_factor = pin_factor;
    }

    #[wasm_bindgen(setter)]
    pub fn set_scrub_ms(&mut self, scrub_ms: f32) {
        self.scrub_ms = scrub_ms.max(0.0);
    }

    /// Follow `window.scrollY`; turn off when the host calls `set_progress`.
    #[wasm_bindgen(setter)]
    pub fn set_track_scroll(&mut self, track: bool) {
        self.track_scroll = track;
    }
}

impl Default for ScrollHeroOptions {
    fn default() -> Self {
        Self::new()
    }
}

struct HeroState {
    hero: Hero,
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    rng: StdRng,
    scroll: PinnedScroll,
    track_scroll: bool,
    target_progress: f32,
    last_time: Option<f64>,
    last_stage: Option<Stage>,
    sprites: Vec<Sprite>,
    frame_handle: Option<i32>,
}

impl HeroState {
    fn viewport(&self) -> Viewport {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width as f32, height as f32, self.window.device_pixel_ratio() as f32)
    }

    /// Resize the backing store and regenerate leads. Zero-area viewports
    /// leave the canvas and the field untouched.
    fn resize(&mut self) {
        let viewport = self.viewport();
        if viewport.is_degenerate() {
            log::warn!("ignoring resize to {}x{}", viewport.width, viewport.height);
            return;
        }
        let (pw, ph) = viewport.physical_size();
        self.canvas.set_width(pw);
        self.canvas.set_height(ph);
        let style = self.canvas.style();
        let sized = style
            .set_property("width", &format!("{}px", viewport.width))
            .and_then(|_| style.set_property("height", &format!("{}px", viewport.height)));
        if let Err(e) = sized {
            log::warn!("failed to size canvas: {:?}", e);
        }
        let dpr = viewport.device_pixel_ratio as f64;
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("failed to scale canvas: {:?}", e);
        }
        self.hero.resize(viewport, &mut self.rng);
        self.anchor_track();
    }

    /// The tall element the pinned section sticks inside: the section's
    /// parent, or the section itself when it has none.
    fn track(&self) -> Option<Element> {
        let section = self.canvas.parent_element()?;
        Some(section.parent_element().unwrap_or(section))
    }

    /// Record the track's document offset. The track is never pinned, so
    /// this holds for any scroll position until the layout changes.
    fn anchor_track(&mut self) {
        let Some(track) = self.track() else {
            return;
        };
        let scroll_y = self.window.scroll_y().unwrap_or(0.0) as f32;
        self.scroll
            .anchor(track.get_bounding_client_rect().top() as f32, scroll_y);
    }

    fn on_scroll(&mut self) {
        if !self.track_scroll {
            return;
        }
        let scroll_y = self.window.scroll_y().unwrap_or(0.0) as f32;
        let height = self.viewport().height;
        self.target_progress = self.scroll.progress_at(scroll_y, height);
    }

    fn tick(&mut self, now: f64) {
        let dt = self.last_time.map_or(0.0, |last| (now - last).max(0.0));
        self.last_time = Some(now);

        if self.track_scroll {
            let next = self
                .scroll
                .scrub(self.hero.raw_progress(), self.target_progress, dt as f32);
            self.hero.set_progress(next);
        }

        let Some(plan) = self.hero.frame(now) else {
            return;
        };
        let mut painter = CanvasPainter::new(&self.ctx);
        draw_frame(&plan, &mut painter);
        if let Err(e) = painter.finish() {
            log::warn!("canvas error while drawing frame: {:?}", e);
        }

        if self.last_stage != Some(plan.stage) {
            self.last_stage = Some(plan.stage);
            log::debug!("hero stage -> {:?}", plan.stage);
            if let Some(section) = self.canvas.parent_element() {
                if let Err(e) = section.set_attribute("data-stage", &plan.stage.index().to_string()) {
                    log::warn!("failed to publish stage: {:?}", e);
                }
            }
        }
        self.sprites = plan.sprites;
    }
}

/// Scroll-driven lead funnel drawn on a canvas.
///
/// Owns the animation frame loop and the window listeners; `unmount` (or
/// dropping the handle) cancels all of them.
///
/// Expected markup when following the window scroll: a track element
/// `pin_factor + 1` viewport heights tall, holding a `position: sticky;
/// top: 0` section one viewport tall, with the canvas directly inside the
/// section. Progress runs from 0 to 1 while the section is stuck, and the
/// section receives `data-stage`.
#[wasm_bindgen]
pub struct ScrollHero {
    state: Rc<RefCell<HeroState>>,
    frame_cb: FrameCallback,
    resize_cb: Option<Closure<dyn FnMut()>>,
    scroll_cb: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ScrollHero {
    pub fn mount(canvas: HtmlCanvasElement) -> Result<ScrollHero, JsValue> {
        Self::mount_with(canvas, ScrollHeroOptions::default())
    }

    pub fn mount_with(
        canvas: HtmlCanvasElement,
        options: ScrollHeroOptions,
    ) -> Result<ScrollHero, JsValue> {
        let window = web_sys::window()
            .ok_or_else(|| js_error(HeroError::MissingContext("no window".into())))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error(HeroError::MissingContext("canvas has no 2d context".into())))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| js_error(HeroError::MissingContext("unexpected context type".into())))?;

        let mut config = HeroConfig::default();
        config.resistance.enabled = options.resistance;
        let hero = Hero::new(config).map_err(js_error)?;

        let state = Rc::new(RefCell::new(HeroState {
            hero,
            window: window.clone(),
            canvas,
            ctx,
            rng: StdRng::from_entropy(),
            scroll: PinnedScroll::new(options.pin_factor, options.scrub_ms),
            track_scroll: options.track_scroll,
            target_progress: 0.0,
            last_time: None,
            last_stage: None,
            sprites: Vec::new(),
            frame_handle: None,
        }));

        {
            let mut s = state.borrow_mut();
            s.resize();
            s.anchor_track();
            s.on_scroll();
            let snap = s.target_progress;
            s.hero.set_progress(snap);
        }

        let resize_cb = {
            let state = state.clone();
            Closure::<dyn FnMut()>::new(move || state.borrow_mut().resize())
        };
        window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

        let scroll_cb = {
            let state = state.clone();
            Closure::<dyn FnMut()>::new(move || state.borrow_mut().on_scroll())
        };
        window.add_event_listener_with_callback("scroll", scroll_cb.as_ref().unchecked_ref())?;

        let frame_cb: FrameCallback = Rc::new(RefCell::new(None));
        {
            let state = state.clone();
            let next = frame_cb.clone();
            *frame_cb.borrow_mut() = Some(Closure::new(move |now: f64| {
                let mut s = state.borrow_mut();
                s.tick(now);
                let handle = match next.borrow().as_ref() {
                    Some(cb) => s.window.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
                    None => None,
                };
                s.frame_handle = handle;
            }));
        }
        let first = match frame_cb.borrow().as_ref() {
            Some(cb) => Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?),
            None => None,
        };
        state.borrow_mut().frame_handle = first;

        log::info!("scroll hero mounted");
        Ok(ScrollHero {
            state,
            frame_cb,
            resize_cb: Some(resize_cb),
            scroll_cb: Some(scroll_cb),
        })
    }

    /// Drive progress directly. Stops following the window scroll.
    pub fn set_progress(&mut self, progress: f32) {
        let mut s = self.state.borrow_mut();
        s.track_scroll = false;
        s.target_progress = progress;
        s.hero.set_progress(progress);
    }

    pub fn progress(&self) -> f32 {
        self.state.borrow().hero.progress()
    }

    pub fn stage(&self) -> u32 {
        self.state.borrow().hero.stage().index()
    }

    pub fn stage_title(&self) -> String {
        self.state.borrow().hero.stage().caption().title.to_string()
    }

    pub fn stage_subtitle(&self) -> String {
        self.state.borrow().hero.stage().caption().subtitle.to_string()
    }

    /// Latest frame's sprites as `[x, y, size, opacity, r, g, b, glow]*`.
    pub fn sprites(&self) -> js_sys::Float32Array {
        let s = self.state.borrow();
        let floats: &[f32] = bytemuck::cast_slice(&s.sprites);
        js_sys::Float32Array::from(floats)
    }

    pub fn particle_count(&self) -> usize {
        self.state.borrow().hero.field().map_or(0, |f| f.len())
    }

    /// Cancel the pending frame and remove listeners. Safe to call twice.
    pub fn unmount(&mut self) {
        let mut s = self.state.borrow_mut();
        if let Some(handle) = s.frame_handle.take() {
            if let Err(e) = s.window.cancel_animation_frame(handle) {
                log::warn!("failed to cancel animation frame: {:?}", e);
            }
        }
        // Dropping the closure breaks the frame loop's Rc cycle.
        self.frame_cb.borrow_mut().take();

        let listeners = [("resize", self.resize_cb.take()), ("scroll", self.scroll_cb.take())];
        let mut removed = false;
        for (event, cb) in listeners {
            let Some(cb) = cb else {
                continue;
            };
            removed = true;
            if let Err(e) = s
                .window
                .remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove {} listener: {:?}", event, e);
            }
        }
        if removed {
            log::info!("scroll hero unmounted");
        }
    }
}

impl Drop for ScrollHero {
    fn drop(&mut self) {
        self.unmount();
    }
}
