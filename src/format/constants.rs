/// Aero data file markers and layout constants

/// Comment marker; everything from here to end of line is ignored
pub const COMMENT_CHAR: char = '#';

/// Phrase on the line that opens the basic aerodynamic coefficients section
pub const AERO_SECTION_MARKER: &str = "BASIC AERODYNAMIC COEFFICIENTS";

/// Phrase on the line that closes the aero data section
pub const AERO_END_MARKER: &str = "End of Aero Data";

/// Keyword introducing an aerodata option pair
pub const AEROPT_KEYWORD: &str = "aeropt";

/// Option value enabling the advanced trailing edge flap block
pub const AEROPT_ADVANCED_TEF: &str = "AdvancedTEF";

/// Option value flagging that leading edge flap lift is included in CL
pub const AEROPT_LEF_INCLUDED_IN_CL: &str = "LefIncludedinCL";

/// Token offset of the landing gear count
pub const GEAR_COUNT_OFFSET: usize = 13;

/// Number of fields per landing gear entry
pub const GEAR_COLUMNS: usize = 4;

/// Fixed fields between the last gear entry and the aero section
pub const GEAR_TRAILING_FIELDS: usize = 6;

/// Field width of a written data value
pub const VALUE_WIDTH: usize = 11;

/// Fractional digits of written values, counts and multipliers
pub const VALUE_PRECISION: usize = 6;

/// Maximum number of data values per written line
pub const MAX_VALUES_PER_LINE: usize = 10;

/// Horizontal rule framing section sub-headers
pub const SUB_HEADER_RULE: &str = "#-----------------------------------------------------";

/// Compute the token offset of the aero section from the gear count
///
/// Returns `None` if the offset does not fit in a `usize`.
#[inline]
pub fn aero_section_offset(num_gears: usize) -> Option<usize> {
    num_gears
        .checked_mul(GEAR_COLUMNS)?
        .checked_add(GEAR_COUNT_OFFSET + GEAR_TRAILING_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aero_section_offset() {
        assert_eq!(aero_section_offset(0), Some(19));
        assert_eq!(aero_section_offset(3), Some(31));
        assert_eq!(aero_section_offset(5), Some(39));
    }

    #[test]
    fn test_aero_section_offset_overflow() {
        assert_eq!(aero_section_offset(usize::MAX), None);
        assert_eq!(aero_section_offset(usize::MAX / GEAR_COLUMNS), None);
    }

    #[test]
    fn test_rule_is_a_comment() {
        assert!(SUB_HEADER_RULE.starts_with(COMMENT_CHAR));
    }
}
