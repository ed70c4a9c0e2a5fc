use report_core::units::{resolve_scale, UnitSystem};

#[test]
fn every_known_code_has_a_positive_scale() {
    for code in 0..=25 {
        let scale = resolve_scale(code);
        assert!(scale.is_finite() && scale > 0.0, "code {code} -> {scale}");
        assert!(UnitSystem::from_code(code).is_some());
    }
}

#[test]
fn common_units_convert_to_meters() {
    assert_eq!(1.0, resolve_scale(4));
    assert!((resolve_scale(8) - 0.0254).abs() < 1e-12);
    assert!((resolve_scale(2) - 0.001).abs() < 1e-15);
    assert!((resolve_scale(9) - 0.3048).abs() < 1e-12);
    assert!((resolve_scale(22) - 1852.0).abs() < 1e-9);
}

#[test]
fn unknown_and_custom_codes_fall_back_to_one() {
    assert_eq!(1.0, resolve_scale(0));
    assert_eq!(1.0, resolve_scale(11));
    assert_eq!(1.0, resolve_scale(26));
    assert_eq!(1.0, resolve_scale(-1));
}

#[test]
fn parsec_is_larger_than_light_year() {
    assert!(resolve_scale(25) > resolve_scale(24));
    assert!(resolve_scale(24) > resolve_scale(23));
}
