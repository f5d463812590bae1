use super::*;

#[test]
fn thousands_groups_digits() {
    assert_eq!(thousands(0), "0");
    assert_eq!(thousands(999), "999");
    assert_eq!(thousands(1000), "1,000");
    assert_eq!(thousands(1_234_567), "1,234,567");
    assert_eq!(thousands(-45_000), "-45,000");
}

#[test]
fn points_appends_unit() {
    assert_eq!(points(80), "80P");
    assert_eq!(points_spaced(12_500), "12,500 P");
}
