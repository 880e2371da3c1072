use leadfunnel_core::config::HeroConfig;
use leadfunnel_core::hero::Hero;
use leadfunnel_core::scroll::PinnedScroll;
use leadfunnel_core::stage::Stage;

const VIEWPORT_H: f32 = 800.0;

/// Client top of a sticky section inside a track starting at `track_top`:
/// it scrolls normally, then sticks at 0 for the pin, then scrolls away.
fn sticky_client_top(track_top: f32, scroll_y: f32, pin: f32) -> f32 {
    let offset = track_top - scroll_y;
    if offset > 0.0 {
        offset
    } else if scroll_y - track_top < pin {
        0.0
    } else {
        pin - (scroll_y - track_top)
    }
}

#[test]
fn test_progress_advances_while_section_is_pinned() {
    let track_top = 200.0;
    let mut scroll = PinnedScroll::new(3.0, 0.0);
    // measured at mount, before the pin engages
    scroll.anchor(track_top, 0.0);

    let pin = scroll.pin_factor * VIEWPORT_H;
    let mut prev = 0.0;
    for i in 0..=100 {
        let scroll_y = track_top + pin * i as f32 / 100.0;
        assert!(sticky_client_top(track_top, scroll_y, pin) <= 0.0);
        let p = scroll.progress_at(scroll_y, VIEWPORT_H);
        assert!(p >= prev, "progress went backwards at scroll {}", scroll_y);
        prev = p;
    }
    assert_eq!(prev, 1.0);
    assert_eq!(scroll.progress_at(track_top + pin * 0.5, VIEWPORT_H), 0.5);
}

#[test]
fn test_anchor_taken_mid_pin_uses_track_not_section() {
    let track_top = 200.0;
    let mut scroll = PinnedScroll::new(3.0, 0.0);
    // remeasured on resize while scrolled into the pin: the track's rect
    // still reports its true offset
    let scroll_y = track_top + 1200.0;
    scroll.anchor(track_top - scroll_y, scroll_y);
    assert_eq!(scroll.track_top(), Some(track_top));
    assert_eq!(scroll.progress_at(scroll_y, VIEWPORT_H), 0.5);
}

#[test]
fn test_pinned_scroll_drives_hero_through_every_stage() {
    let track_top = 0.0;
    let mut scroll = PinnedScroll::new(3.0, 0.0);
    scroll.anchor(track_top, 0.0);
    let mut hero = Hero::new(HeroConfig::default()).unwrap();

    let mut seen = Vec::new();
    for i in 0..=240 {
        let scroll_y = i as f32 * 10.0;
        hero.set_progress(scroll.progress_at(scroll_y, VIEWPORT_H));
        if seen.last() != Some(&hero.stage()) {
            seen.push(hero.stage());
        }
    }
    assert_eq!(seen, Stage::ALL.to_vec());
}
