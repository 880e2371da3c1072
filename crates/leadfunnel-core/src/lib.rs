//! Scroll-driven lead funnel animation.
//!
//! Leads scatter across the hero, converge into a funnel, fall and sort by
//! color, and the converted few fly into calendar slots. Everything here
//! is a pure function of scroll progress; drawing happens behind
//! [`render::Painter`].
pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod geometry;
pub mod hero;
pub mod math;
pub mod motion;
pub mod particle;
pub mod render;
pub mod scroll;
pub mod stage;
