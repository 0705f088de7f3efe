use super::*;
use crate::grid::addressing::Direction;

/// Every pixel encodes its own coordinates: `[x, y, 7, 255]`.
fn coord_source(w: u32, h: u32) -> SourceImage {
    let mut px = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            px.extend_from_slice(&[x as u8, y as u8, 7, 255]);
        }
    }
    SourceImage::from_rgba8(w, h, px).unwrap()
}

#[test]
fn frames_sample_their_cell() {
    let src = coord_source(8, 4);
    let cfg = SpriteGridConfig::new(2, 2).unwrap();
    let edits = FrameEditStore::new();

    let f3 = composite(&src, &cfg, &edits, 3).unwrap();
    assert_eq!((f3.width, f3.height), (4, 2));
    assert_eq!(f3.pixel(0, 0), [4, 2, 7, 255]);
    assert_eq!(f3.pixel(3, 1), [7, 3, 7, 255]);
}

#[test]
fn column_major_walks_down_first() {
    let src = coord_source(8, 4);
    let mut cfg = SpriteGridConfig::new(2, 2).unwrap();
    cfg.set_direction(Direction::ColumnMajor);
    let f1 = composite(&src, &cfg, &FrameEditStore::new(), 1).unwrap();
    assert_eq!(f1.pixel(0, 0), [0, 2, 7, 255]);
}

#[test]
fn positive_offset_moves_content_right() {
    let src = coord_source(20, 10);
    let cfg = SpriteGridConfig::new(1, 2).unwrap();
    let mut edits = FrameEditStore::new();
    edits.set_offset(0, 5, 0);

    let f = composite(&src, &cfg, &edits, 0).unwrap();
    assert_eq!((f.width, f.height), (10, 10));
    for y in 0..10 {
        for x in 0..5 {
            assert_eq!(f.pixel(x, y), [0, 0, 0, 0], "({x},{y}) should be out of bounds");
        }
        for x in 5..10 {
            assert_eq!(f.pixel(x, y), [(x - 5) as u8, y as u8, 7, 255]);
        }
    }
}

#[test]
fn negative_offset_samples_into_the_neighbour_cell() {
    let src = coord_source(20, 10);
    let cfg = SpriteGridConfig::new(1, 2).unwrap();
    let mut edits = FrameEditStore::new();
    edits.set_offset(0, -3, 2);

    let f = composite(&src, &cfg, &edits, 0).unwrap();
    assert_eq!(f.pixel(0, 0), [0, 0, 0, 0]);
    assert_eq!(f.pixel(0, 2), [3, 0, 7, 255]);
    assert_eq!(f.pixel(9, 9), [12, 7, 7, 255]);
}

#[test]
fn offsets_past_the_image_yield_transparent_frames() {
    let src = coord_source(4, 4);
    let cfg = SpriteGridConfig::new(1, 1).unwrap();
    let mut edits = FrameEditStore::new();
    edits.set_offset(0, 1000, -1000);

    let f = composite(&src, &cfg, &edits, 0).unwrap();
    assert!(f.data.iter().all(|b| *b == 0));
}

#[test]
fn reset_offset_restores_the_unmodified_frame() {
    let src = coord_source(12, 6);
    let cfg = SpriteGridConfig::new(2, 3).unwrap();
    let pristine = FrameEditStore::new();

    for index in 0..cfg.total_frames() {
        let mut edits = FrameEditStore::new();
        edits.set_offset(index, 3, -2);
        edits.set_offset(index, 1, 1);
        edits.reset_offset(index);
        assert_eq!(
            composite(&src, &cfg, &edits, index).unwrap(),
            composite(&src, &cfg, &pristine, index).unwrap()
        );
    }
}

#[test]
fn fractional_cells_use_floored_origins() {
    let src = coord_source(10, 3);
    let cfg = SpriteGridConfig::new(1, 3).unwrap();
    let compositor = FrameCompositor::new(&src, &cfg).unwrap();
    assert_eq!(compositor.geometry().frame_width(), 3);

    let f2 = compositor.composite(&FrameEditStore::new(), 2).unwrap();
    assert_eq!(f2.width, 3);
    assert_eq!(f2.pixel(0, 0), [6, 0, 7, 255]);
    assert_eq!(f2.pixel(2, 2), [8, 2, 7, 255]);
}

#[test]
fn frames_beyond_total_are_rejected() {
    let src = coord_source(4, 4);
    let mut cfg = SpriteGridConfig::new(2, 2).unwrap();
    cfg.set_total_frames(3).unwrap();
    assert!(composite(&src, &cfg, &FrameEditStore::new(), 3).is_err());
    assert!(composite(&src, &cfg, &FrameEditStore::new(), 2).is_ok());
}
