use super::*;

#[test]
fn integral_cells() {
    let g = CellGeometry::new(64, 32, 2, 4).unwrap();
    assert_eq!((g.frame_width(), g.frame_height()), (16, 16));
    assert_eq!(g.origin(Cell::new(1, 3)), (48, 16));
}

#[test]
fn fractional_cells_round_consistently() {
    let g = CellGeometry::new(100, 10, 1, 3).unwrap();
    assert!((g.cell_width() - 33.333).abs() < 0.01);
    assert_eq!(g.frame_width(), 33);
    assert_eq!(g.origin(Cell::new(0, 0)).0, 0);
    assert_eq!(g.origin(Cell::new(0, 1)).0, 33);
    assert_eq!(g.origin(Cell::new(0, 2)).0, 66);
}

#[test]
fn tiny_sources_still_yield_one_pixel_frames() {
    let g = CellGeometry::new(3, 3, 4, 4).unwrap();
    assert_eq!((g.frame_width(), g.frame_height()), (1, 1));
}

#[test]
fn rejects_degenerate_input() {
    assert!(CellGeometry::new(10, 10, 0, 1).is_err());
    assert!(CellGeometry::new(10, 10, 1, 0).is_err());
    assert!(CellGeometry::new(0, 10, 1, 1).is_err());
}
