use super::*;

#[test]
fn non_zero_extent_rejects_empty_axes() {
    assert!(Extent::non_zero(0, 4).is_err());
    assert!(Extent::non_zero(4, 0).is_err());
    let e = Extent::non_zero(3, 2).unwrap();
    assert_eq!(e.area(), 6);
    assert!(!e.is_empty());
}

#[test]
fn extent_to_vec2_keeps_axes() {
    assert_eq!(Extent::new(7, 9).to_vec2(), Vec2::new(7.0, 9.0));
}
