use std::sync::Arc;

use super::*;
use crate::assets::decode::SourceImage;
use crate::foundation::core::GroupId;
use crate::grid::config::SpriteGridConfig;

fn clock(fps: u32) -> PlaybackClock {
    PlaybackClock::new(Fps::new(fps).unwrap())
}

#[test]
fn twelve_fps_with_one_exclusion() {
    let c = clock(12);
    let valid = [0, 2, 3];
    assert_eq!(c.active_frame(0.0, &valid), Some(0));
    assert_eq!(c.active_frame(84.0, &valid), Some(2));
    assert_eq!(c.active_frame(167.0, &valid), Some(3));
    assert_eq!(c.active_frame(1000.0, &valid), Some(0));
}

#[test]
fn empty_valid_list_renders_nothing() {
    assert_eq!(clock(12).active_frame(500.0, &[]), None);
}

#[test]
fn playback_is_periodic() {
    let c = clock(10);
    let valid = [1, 4, 5, 7];
    let period_ms = c.period(valid.len()).as_secs_f64() * 1000.0;
    assert!((period_ms - 400.0).abs() < 1e-6);
    for t in (0..2000).step_by(7) {
        let t = f64::from(t);
        assert_eq!(
            c.active_frame(t, &valid),
            c.active_frame(t + period_ms, &valid),
            "t={t}"
        );
    }
}

#[test]
fn never_returns_an_excluded_frame() {
    let c = clock(24);
    let mut edits = FrameEditStore::new();
    edits.toggle_exclusion(0);
    edits.toggle_exclusion(3);
    edits.toggle_exclusion(5);
    for t in 0..3000 {
        let idx = c.active_frame_for(f64::from(t), 6, &edits).unwrap();
        assert!(!edits.is_excluded(idx));
        assert!(idx < 6);
    }
}

#[test]
fn exclusions_apply_on_the_next_tick() {
    let c = clock(12);
    let mut edits = FrameEditStore::new();
    assert_eq!(c.active_frame_for(84.0, 4, &edits), Some(1));
    edits.toggle_exclusion(1);
    assert_eq!(c.active_frame_for(84.0, 4, &edits), Some(2));
    edits.toggle_exclusion(1);
    assert_eq!(c.active_frame_for(84.0, 4, &edits), Some(1));
}

#[test]
fn session_tick_composites_the_active_frame() {
    let mut px = Vec::new();
    for x in 0..4u8 {
        px.extend_from_slice(&[x * 60, 0, 0, 255]);
    }
    let src = SourceImage::from_rgba8(4, 1, px).unwrap();
    let mut group = Group::with_config(
        GroupId(0),
        Arc::new(src),
        SpriteGridConfig::new(1, 4).unwrap(),
    );
    group.set_fps(10).unwrap();

    let start = Instant::now();
    let session = PlaybackSession::start_at(start);

    let at = |ms: u64| start + Duration::from_millis(ms);
    let shown = session.tick(&group, at(250)).unwrap().unwrap();
    assert_eq!(shown.index, 2);
    assert_eq!(shown.frame.pixel(0, 0), [120, 0, 0, 255]);

    for i in 0..4 {
        group.toggle_exclusion(i);
    }
    assert_eq!(session.tick(&group, at(250)).unwrap(), None);
}
