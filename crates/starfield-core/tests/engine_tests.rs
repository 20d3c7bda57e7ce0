// Host-side tests for star generation, drawing and sprite lifecycles,
// driven through the in-memory host doubles.

mod common;

use common::*;
use glam::Vec2;
use starfield_core::constants::*;
use starfield_core::*;

fn desktop_at(width: f32) -> Env {
    let mut env = Env::desktop();
    env.viewport.width = width;
    env
}

fn streak_draws(frame: &[Draw]) -> Vec<f32> {
    frame
        .iter()
        .filter_map(|d| match d {
            Draw::Streak { alpha, .. } => Some(*alpha),
            _ => None,
        })
        .collect()
}

fn star_draws(frame: &[Draw]) -> Vec<Vec2> {
    frame
        .iter()
        .filter_map(|d| match d {
            Draw::Star { center, .. } => Some(*center),
            _ => None,
        })
        .collect()
}

/// Pump in 10 ms ticks until a streak exists; returns its birth time.
fn pump_until_streak(h: &mut Harness) -> f64 {
    for _ in 0..100 {
        let until = h.now() + STREAK_CADENCE_MS as f64;
        h.pump(until, 10.0);
        if let Some(s) = h.engine.streaks().iter().next() {
            return s.born_at;
        }
    }
    panic!("no streak spawned");
}

#[test]
fn star_count_follows_viewport_width() {
    let narrow = Harness::booted(desktop_at(640.0), 1);
    // 640 css px is a constrained device: base 100, scale clamped to 0.75
    assert_eq!(narrow.engine.stars().len(), 75);

    let reference = Harness::booted(desktop_at(1280.0), 1);
    assert_eq!(reference.engine.stars().len(), 140);

    let wide = Harness::booted(desktop_at(2560.0), 1);
    assert_eq!(wide.engine.stars().len(), 168);
}

#[test]
fn fit_sizes_backing_store_by_pixel_ratio() {
    let mut env = Env::desktop();
    env.viewport.device_pixel_ratio = 2.0;
    let h = Harness::booted(env, 3);
    assert_eq!(
        h.engine.surface().log[0],
        Draw::Resize {
            backing: (2560, 1440),
            css: (1280.0, 720.0)
        }
    );
    assert_eq!(h.engine.surface_size(), Vec2::new(2560.0, 1440.0));
}

#[test]
fn constrained_devices_cap_pixel_ratio() {
    let h = Harness::booted(Env::phone(), 3);
    assert_eq!(h.engine.pixel_ratio(), 1.5);
    assert_eq!(
        h.engine.surface().log[0],
        Draw::Resize {
            backing: (585, 1266),
            css: (390.0, 844.0)
        }
    );
}

#[test]
fn every_fit_regenerates_the_whole_field() {
    let mut h = Harness::booted(Env::desktop(), 9);
    let before = h.engine.stars().to_vec();
    h.engine.fit();
    let after = h.engine.stars();
    assert_eq!(before.len(), after.len());
    assert_ne!(before.as_slice(), after);
}

#[test]
fn same_seed_draws_the_same_frames() {
    let mut a = Harness::booted(Env::desktop(), 42);
    let mut b = Harness::booted(Env::desktop(), 42);
    a.pump(10_000.0, 16.0);
    b.pump(10_000.0, 16.0);
    assert_eq!(a.engine.surface().log, b.engine.surface().log);
}

#[test]
fn frame_composites_glow_stars_then_links() {
    let mut h = Harness::booted(Env::desktop(), 4);
    h.pump(16.0, 16.0);
    let frame = h.engine.surface().last_frame();
    assert_eq!(frame[0], Draw::Clear);
    assert_eq!(frame[1], Draw::Glow);
    assert_eq!(star_draws(frame).len(), h.engine.stars().len());
    let first_link = frame.iter().position(|d| matches!(d, Draw::Link { .. }));
    let last_star = frame.iter().rposition(|d| matches!(d, Draw::Star { .. }));
    if let (Some(link), Some(star)) = (first_link, last_star) {
        assert!(link > star);
    }
    for d in frame {
        if let Draw::Star { alpha, .. } = d {
            assert!(*alpha >= STAR_FILL_ALPHA * 0.5 - 1e-6 && *alpha <= STAR_FILL_ALPHA + 1e-6);
        }
        if let Draw::Link { from, to, alpha } = d {
            assert!(from.distance(*to) < LINK_DISTANCE);
            assert!(*alpha > 0.0 && *alpha <= LINK_ALPHA);
        }
    }
}

#[test]
fn time_accumulates_motion_speed_per_frame() {
    let mut h = Harness::booted(Env::desktop(), 4);
    h.pump(160.0, 16.0);
    assert_eq!(h.engine.surface().frames(), 10);
    assert!((h.engine.time() - 10.0 * MOTION_SPEED).abs() < 1e-5);
}

#[test]
fn pointer_moves_stars_on_desktop_only() {
    let mut still = Harness::booted(Env::desktop(), 8);
    let mut pointed = Harness::booted(Env::desktop(), 8);
    pointed.env.borrow_mut().pointer = Some(Vec2::new(1280.0, 0.0));
    still.pump(16.0, 16.0);
    pointed.pump(16.0, 16.0);
    assert_ne!(
        star_draws(still.engine.surface().last_frame()),
        star_draws(pointed.engine.surface().last_frame())
    );

    let mut phone_still = Harness::booted(Env::phone(), 8);
    let mut phone_pointed = Harness::booted(Env::phone(), 8);
    phone_pointed.env.borrow_mut().pointer = Some(Vec2::new(390.0, 0.0));
    phone_still.pump(16.0, 16.0);
    phone_pointed.pump(16.0, 16.0);
    assert_eq!(
        star_draws(phone_still.engine.surface().last_frame()),
        star_draws(phone_pointed.engine.surface().last_frame())
    );
}

#[test]
fn pointer_is_normalised_against_the_current_viewport() {
    let mut plain = Harness::booted(Env::desktop(), 8);
    let mut pointed = Harness::booted(Env::desktop(), 8);
    for h in [&mut plain, &mut pointed] {
        h.env.borrow_mut().viewport.width = 2560.0;
    }
    // centre of the widened window, so no pointer offset
    pointed.env.borrow_mut().pointer = Some(Vec2::new(1280.0, 360.0));
    plain.pump(16.0, 16.0);
    pointed.pump(16.0, 16.0);
    assert_eq!(
        star_draws(plain.engine.surface().last_frame()),
        star_draws(pointed.engine.surface().last_frame())
    );
}

#[test]
fn scroll_pushes_stars_down() {
    let mut top = Harness::booted(Env::desktop(), 12);
    let mut scrolled = Harness::booted(Env::desktop(), 12);
    scrolled.env.borrow_mut().scroll = ScrollMetrics {
        offset: 2000.0,
        scroll_height: 2720.0,
        viewport_height: 720.0,
    };
    top.pump(16.0, 16.0);
    scrolled.pump(16.0, 16.0);
    let a = star_draws(top.engine.surface().last_frame());
    let b = star_draws(scrolled.engine.surface().last_frame());
    for (star, (p, q)) in top.engine.stars().iter().zip(a.iter().zip(b.iter())) {
        let expected = SCROLL_DRIFT_AMPLITUDE * star.depth;
        assert!((q.y - p.y - expected).abs() < 1e-3);
        assert_eq!(p.x, q.x);
    }
}

#[test]
fn zero_viewport_draws_nothing_and_does_not_panic() {
    let mut env = Env::desktop();
    env.viewport.width = 0.0;
    env.viewport.height = 0.0;
    let mut h = Harness::booted(env, 1);
    assert!(h.engine.stars().is_empty());
    h.pump(20_000.0, 16.0);
    let frame = h.engine.surface().last_frame();
    assert!(star_draws(frame).is_empty());
    assert!(!frame.iter().any(|d| matches!(d, Draw::Link { .. })));
}

#[test]
fn expired_streak_is_never_drawn() {
    let mut h = Harness::booted(Env::desktop(), 21);
    let born = pump_until_streak(&mut h);

    h.pump(born + STREAK_LIFETIME_MS - 10.0, 10.0);
    let alphas = streak_draws(h.engine.surface().last_frame());
    assert_eq!(alphas.len(), 1);
    let expected = STREAK_ALPHA * (10.0 / STREAK_LIFETIME_MS) as f32;
    assert!((alphas[0] - expected).abs() < 1e-6);

    h.pump(born + STREAK_LIFETIME_MS, 10.0);
    assert!(streak_draws(h.engine.surface().last_frame()).is_empty());
    assert!(h.engine.streaks().is_empty());
}

#[test]
fn streak_is_half_faded_at_half_life() {
    let mut h = Harness::booted(Env::desktop(), 22);
    let born = pump_until_streak(&mut h);
    h.pump(born + STREAK_LIFETIME_MS / 2.0, 10.0);
    let alphas = streak_draws(h.engine.surface().last_frame());
    assert_eq!(alphas.len(), 1);
    assert!((alphas[0] - STREAK_ALPHA * 0.5).abs() < 1e-6);
}

#[test]
fn drawn_sprites_match_live_population() {
    let mut h = Harness::booted(Env::desktop(), 5);
    h.engine.set_sprite_image(SpriteImage::Ready);
    while h.now() < 60_000.0 {
        let until = h.now() + 16.0;
        h.pump(until, 16.0);
        let now = h.now();
        let frame = h.engine.surface().last_frame();
        let sprites = frame
            .iter()
            .filter(|d| matches!(d, Draw::Sprite { .. }))
            .count();
        assert_eq!(streak_draws(frame).len(), h.engine.streaks().len());
        assert_eq!(sprites, h.engine.asteroids().len());
        assert!(h
            .engine
            .streaks()
            .iter()
            .all(|s| now - s.born_at < STREAK_LIFETIME_MS));
        assert!(h
            .engine
            .asteroids()
            .iter()
            .all(|a| now - a.born_at < SPRITE_LIFETIME_MS));
    }
}

#[test]
fn populations_stay_bounded_by_cadence_and_lifetime() {
    let streak_cap = (STREAK_LIFETIME_MS / STREAK_CADENCE_MS as f64).ceil() as usize;
    let sprite_cap = (SPRITE_LIFETIME_MS / SPRITE_CADENCE_MS as f64).ceil() as usize;
    let mut h = Harness::booted(Env::desktop(), 77);
    h.engine.set_sprite_image(SpriteImage::Ready);
    let mut saw_streak = false;
    let mut saw_sprite = false;
    while h.now() < 120_000.0 {
        let until = h.now() + 16.0;
        h.pump(until, 16.0);
        assert!(h.engine.streaks().len() <= streak_cap);
        assert!(h.engine.asteroids().len() <= sprite_cap);
        saw_streak |= !h.engine.streaks().is_empty();
        saw_sprite |= !h.engine.asteroids().is_empty();
    }
    assert!(saw_streak && saw_sprite);
}

#[test]
fn sprites_wait_for_their_image() {
    let mut h = Harness::booted(Env::desktop(), 31);
    h.pump(60_000.0, 16.0);
    assert!(h.engine.asteroids().is_empty());

    h.engine.set_sprite_image(SpriteImage::Ready);
    h.pump(180_000.0, 16.0);
    assert!(h
        .engine
        .surface()
        .log
        .iter()
        .any(|d| matches!(d, Draw::Sprite { .. })));
}

#[test]
fn failed_image_disables_sprites_for_good() {
    let mut h = Harness::booted(Env::desktop(), 32);
    h.engine.set_sprite_image(SpriteImage::Unavailable);
    h.engine.set_sprite_image(SpriteImage::Ready);
    h.pump(120_000.0, 16.0);
    assert!(h.engine.asteroids().is_empty());
    assert!(!h
        .engine
        .surface()
        .log
        .iter()
        .any(|d| matches!(d, Draw::Sprite { .. })));
    // streaks are unaffected
    assert!(h
        .engine
        .surface()
        .log
        .iter()
        .any(|d| matches!(d, Draw::Streak { .. })));
}

#[test]
fn constrained_devices_spawn_no_transient_sprites() {
    let mut h = Harness::booted(Env::phone(), 40);
    h.engine.set_sprite_image(SpriteImage::Ready);
    h.pump(60_000.0, 16.0);
    assert!(h.engine.streaks().is_empty());
    assert!(h.engine.asteroids().is_empty());
    assert!(!h.engine.config().streaks_enabled);
}
