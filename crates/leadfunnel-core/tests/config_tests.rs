use leadfunnel_core::config::{HeroConfig, StageBreakpoints};
use leadfunnel_core::error::HeroError;
use leadfunnel_core::hero::Hero;

#[test]
fn test_config_default_values() {
    let config = HeroConfig::default();

    assert_eq!(config.field.warm_count, 26);
    assert_eq!(config.field.cool_count, 22);
    assert_eq!(config.field.converted_per_color, 5);
    assert_eq!(config.field.total(), 48);
    assert_eq!(config.breakpoints.converging, 0.10);
    assert_eq!(config.breakpoints.falling, 0.45);
    assert_eq!(config.breakpoints.converted, 0.75);
    assert_eq!(config.resistance.enabled, false);
    assert_eq!(config.funnel.max_top_half_width, 260.0);
    assert_eq!(config.funnel.spout_half_width, 28.0);
    assert_eq!(config.calendar.rows, 4);
    assert_eq!(config.calendar.cols, 5);
    assert_eq!(config.calendar.slots.len(), 10);
    assert_eq!(config.motion.fall_exponent, 1.8);
    assert_eq!(config.motion.flight_exponent, 2.5);
    assert_eq!(config.motion.fade_depth, 0.65);
    assert!(config.validate().is_ok());
}

#[test]
fn test_rejects_unordered_breakpoints() {
    let mut config = HeroConfig::default();
    config.breakpoints = StageBreakpoints {
        converging: 0.5,
        falling: 0.4,
        converted: 0.8,
    };
    assert!(matches!(config.validate(), Err(HeroError::InvalidConfig(_))));
}

#[test]
fn test_rejects_too_few_slots() {
    let mut config = HeroConfig::default();
    config.field.converted_per_color = 6;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("calendar slots"), "{}", err);
}

#[test]
fn test_rejects_slot_outside_grid() {
    let mut config = HeroConfig::default();
    config.calendar.slots[0] = (4, 0);
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_full_resistance() {
    let mut config = HeroConfig::default();
    config.resistance.strength = 1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_nan_resistance_width() {
    let mut config = HeroConfig::default();
    config.resistance.enabled = true;
    config.resistance.half_width = f32::NAN;
    assert!(matches!(config.validate(), Err(HeroError::InvalidConfig(_))));
    assert!(Hero::new(config).is_err());
}

#[test]
fn test_valid_resistance_keeps_progress_finite() {
    let mut config = HeroConfig::default();
    config.resistance.enabled = true;
    let mut hero = Hero::new(config).unwrap();
    for i in 0..=100 {
        hero.set_progress(i as f32 / 100.0);
        assert!(hero.progress().is_finite(), "NaN progress at step {}", i);
    }
}

#[test]
fn test_error_messages() {
    let e = HeroError::DegenerateViewport {
        width: 0.0,
        height: 0.0,
    };
    assert_eq!(e.to_string(), "viewport 0x0 has no drawable area");
    let e = HeroError::MissingContext("canvas has no 2d context".into());
    assert_eq!(
        e.to_string(),
        "drawing context unavailable: canvas has no 2d context"
    );
}
