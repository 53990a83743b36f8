/// Canonical form used for every postcode comparison: no whitespace, uppercase.
pub fn normalize_postcode(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '\u{feff}' | '\u{200b}'))
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize_postcode;

    #[test]
    fn strips_interior_and_surrounding_whitespace() {
        assert_eq!(normalize_postcode("  pl5 2ld\t"), "PL52LD");
        assert_eq!(normalize_postcode("PL5  1EE"), "PL51EE");
    }

    #[test]
    fn drops_byte_order_marks_from_exported_files() {
        assert_eq!(normalize_postcode("\u{feff}pl51th"), "PL51TH");
    }
}
