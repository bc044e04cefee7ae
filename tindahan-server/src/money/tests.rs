use super::*;

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    let sum_f64 = a + b;

    // f64 fails
    assert_ne!(sum_f64, 0.3);

    // Decimal succeeds
    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_accumulation_precision() {
    // Sum 0.01 one thousand times
    let mut total = Decimal::ZERO;
    for _ in 0..1000 {
        total += to_decimal(0.01);
    }
    assert_eq!(to_f64(total), 10.0);
}

#[test]
fn test_line_total() {
    assert_eq!(to_f64(line_total(3, 10.99)), 32.97);
    assert_eq!(to_f64(line_total(5, 100.0)), 500.0);
    assert_eq!(to_f64(line_total(0, 42.5)), 0.0);
}

#[test]
fn test_order_total_matches_exact() {
    // 5 × 100 + 2 × 10.50 = 521.00
    let lines = [(5, 100.0), (2, 10.50)];
    assert!(order_total_matches(&lines, 521.0));
    assert!(!order_total_matches(&lines, 520.0));
}

#[test]
fn test_order_total_matches_within_tolerance() {
    let lines = [(3, 33.33)];
    // 99.99 exactly; 99.985 is off by 0.005 < tolerance
    assert!(order_total_matches(&lines, 99.99));
    assert!(order_total_matches(&lines, 99.985));
    assert!(!order_total_matches(&lines, 100.1));
}

#[test]
fn test_amounts_equal_tolerance_boundary() {
    let a = to_decimal(10.00);
    assert!(amounts_equal(a, to_decimal(10.01)));
    assert!(!amounts_equal(a, to_decimal(10.02)));
}
