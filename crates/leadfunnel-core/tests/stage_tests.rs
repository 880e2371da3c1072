use leadfunnel_core::config::{HeroConfig, ResistanceConfig, StageBreakpoints};
use leadfunnel_core::hero::Hero;
use leadfunnel_core::stage::{ResistanceCurve, Stage};

fn resistance_on() -> ResistanceConfig {
    ResistanceConfig {
        enabled: true,
        ..Default::default()
    }
}

#[test]
fn test_stage_index_in_range_and_monotonic() {
    let bp = StageBreakpoints::default();
    let mut prev = 0;
    for i in 0..=10_000 {
        let p = i as f32 / 10_000.0;
        let idx = Stage::from_progress(p, &bp).index();
        assert!(idx <= 3, "stage index {} out of range at p={}", idx, p);
        assert!(idx >= prev, "stage went backwards at p={}: {} -> {}", p, prev, idx);
        prev = idx;
    }
    assert_eq!(prev, 3);
}

#[test]
fn test_every_stage_reachable() {
    let bp = StageBreakpoints::default();
    let seen: Vec<Stage> = [0.0, 0.2, 0.5, 0.9]
        .iter()
        .map(|&p| Stage::from_progress(p, &bp))
        .collect();
    assert_eq!(seen, Stage::ALL.to_vec());
}

#[test]
fn test_captions() {
    assert_eq!(Stage::Scattered.caption().title, "Cold Leads Everywhere");
    assert_eq!(Stage::Converging.caption().title, "AI-Powered Discovery");
    assert_eq!(Stage::Falling.caption().title, "Personalized Outreach");
    assert_eq!(Stage::Converted.caption().title, "Booked Calls");
    assert_eq!(
        Stage::Converted.caption().subtitle,
        "Qualified meetings on your calendar"
    );
}

#[test]
fn test_resistance_fixes_endpoints() {
    let curve = ResistanceCurve::new(&StageBreakpoints::default(), &resistance_on());
    assert!(!curve.is_identity());
    assert_eq!(curve.remap(0.0), 0.0);
    assert!((curve.remap(1.0) - 1.0).abs() < 1e-6);
}

#[test]
fn test_resistance_monotonic_and_continuous() {
    let curve = ResistanceCurve::new(&StageBreakpoints::default(), &resistance_on());
    let n = 20_000;
    let mut prev = curve.remap(0.0);
    for i in 1..=n {
        let x = i as f32 / n as f32;
        let y = curve.remap(x);
        assert!(y >= prev, "remap decreased at {}: {} -> {}", x, prev, y);
        assert!(y - prev < 1e-3, "remap jumped at {}: {} -> {}", x, prev, y);
        prev = y;
    }
}

#[test]
fn test_resistance_slows_near_breakpoints() {
    let bp = StageBreakpoints::default();
    let curve = ResistanceCurve::new(&bp, &resistance_on());
    for c in bp.as_array() {
        let span = curve.remap(c + 0.01) - curve.remap(c - 0.01);
        assert!(span < 0.02, "no resistance around {}: span {}", c, span);
        assert!(span > 0.0);
    }
}

#[test]
fn test_resistance_does_not_flicker_stage() {
    let mut config = HeroConfig::default();
    config.resistance = resistance_on();
    let mut hero = Hero::new(config).unwrap();
    let mut prev = Stage::Scattered;
    for i in 0..=5_000 {
        hero.set_progress(i as f32 / 5_000.0);
        let stage = hero.stage();
        assert!(stage >= prev, "stage flickered back at step {}", i);
        prev = stage;
    }
    assert_eq!(prev, Stage::Converted);
}
