//! Behavior tests for rupee conversion and display units.

use rupeetick_core::{CurrencyConverter, DisplayMode, ValidationError, USD_TO_INR_RATE};

#[test]
fn conversion_is_linear_within_rounding() {
    // Given: the default converter
    let converter = CurrencyConverter::default();

    // When: amounts are converted separately and as a sum
    for (a, b) in [(175.0, 340.0), (0.49, 12.51), (1.0e9, 2.5e9), (3.2, 0.0)] {
        let separate = converter.convert(a) + converter.convert(b);
        let combined = converter.convert(a + b);

        // Then: whole-rupee rounding is the only difference
        assert!((separate - combined).abs() <= 1.0, "{a} + {b}");
    }
}

#[test]
fn default_rate_is_fixed() {
    let converter = CurrencyConverter::default();
    assert_eq!(converter.rate(), USD_TO_INR_RATE);
    assert_eq!(converter.convert(1.0), 83.0);
    assert_eq!(converter.convert(100.0), 8_325.0);
}

#[test]
fn custom_rate_scales_every_amount() {
    let converter = CurrencyConverter::with_rate(80.0).expect("positive rate");
    assert_eq!(converter.convert(2.5), 200.0);

    assert!(matches!(
        CurrencyConverter::with_rate(-1.0),
        Err(ValidationError::InvalidExchangeRate { .. })
    ));
    assert!(CurrencyConverter::with_rate(f64::NAN).is_err());
}

#[test]
fn market_scale_figures_render_in_indian_units() {
    let converter = CurrencyConverter::default();

    assert_eq!(
        converter.format(12_000_000_000_000.0, DisplayMode::Crores),
        "₹1200.00 Lakh Cr"
    );
    assert_eq!(converter.format(5_000_000_000.0, DisplayMode::Lakhs), "₹5.00 Cr");
    assert_eq!(converter.format(1_234_567.0, DisplayMode::Plain), "₹12,34,567");
}

#[test]
fn converted_reference_market_cap_reads_in_lakh_crore() {
    // Given: a three trillion dollar market cap
    let converter = CurrencyConverter::default();
    let rupees = converter.convert(3_000_000_000_000.0);

    // Then: crore figures of a thousand or more escalate to the lakh crore unit
    assert_eq!(rupees, 249_750_000_000_000.0);
    assert_eq!(converter.format_large(rupees), "₹24975.00 Lakh Cr");
}
