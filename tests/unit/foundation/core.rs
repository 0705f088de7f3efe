use super::*;

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0).is_err());
    assert_eq!(Fps::new(12).unwrap().get(), 12);
}

#[test]
fn fps_steps_land_on_exact_second_boundaries() {
    let fps = Fps::new(12).unwrap();
    assert_eq!(fps.steps_at(0.0), 0);
    assert_eq!(fps.steps_at(83.0), 0);
    assert_eq!(fps.steps_at(84.0), 1);
    assert_eq!(fps.steps_at(1000.0), 12);
    assert_eq!(fps.steps_at(-5.0), 0);
    assert_eq!(fps.steps_at(f64::NAN), 0);
}

#[test]
fn fps_frame_delay_rounds() {
    assert_eq!(Fps::new(12).unwrap().frame_delay_ms(), 83);
    assert_eq!(Fps::new(10).unwrap().frame_delay_ms(), 100);
    assert_eq!(Fps::new(3).unwrap().frame_delay_ms(), 333);
}

#[test]
fn fps_serde_is_a_bare_number() {
    let fps: Fps = serde_json::from_str("24").unwrap();
    assert_eq!(fps.get(), 24);
    assert_eq!(serde_json::to_string(&fps).unwrap(), "24");
    assert!(serde_json::from_str::<Fps>("0").is_err());
}

#[test]
fn hex_colour_parsing() {
    assert_eq!(Rgb8::parse_hex("#FF00ff").unwrap(), Rgb8::new(255, 0, 255));
    assert_eq!(Rgb8::parse_hex("102030").unwrap(), Rgb8::new(16, 32, 48));
    assert!(Rgb8::parse_hex("#fff").is_err());
    assert!(Rgb8::parse_hex("#gg0000").is_err());
    assert_eq!(Rgb8::new(1, 2, 255).to_hex(), "#0102ff");
}

#[test]
fn hex_colour_serde_roundtrip_through_string() {
    let c: Rgb8 = serde_json::from_str("\"#00ff00\"").unwrap();
    assert_eq!(c, Rgb8::new(0, 255, 0));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#00ff00\"");
}
