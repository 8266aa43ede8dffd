/// Aero data text format: markers, constants and tokenization

/// Format constants
pub mod constants;
/// Comment stripping and tokenization
pub mod tokenizer;

pub use constants::*;
pub use tokenizer::{tokenize, Token};

/// Render a data value: sign forced, fixed point, padded to the value width
pub fn format_value(value: f64) -> String {
    format!("{:+width$.prec$}", value, width = VALUE_WIDTH, prec = VALUE_PRECISION)
}

/// Render a count or multiplier: sign forced, fixed point, no padding
pub fn format_unpadded(value: f64) -> String {
    format!("{:+.prec$}", value, prec = VALUE_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_padding() {
        assert_eq!(format_value(0.2), "  +0.200000");
        assert_eq!(format_value(-1.5), "  -1.500000");
        assert_eq!(format_value(123.456789), "+123.456789");
    }

    #[test]
    fn test_format_value_wide_numbers_overflow() {
        assert_eq!(format_value(-12345.5), "-12345.500000");
    }

    #[test]
    fn test_format_unpadded() {
        assert_eq!(format_unpadded(3.0), "+3.000000");
        assert_eq!(format_unpadded(0.85), "+0.850000");
    }
}
