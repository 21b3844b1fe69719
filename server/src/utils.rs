/// Parses the leading digit run of a free-form count field ("25", "25대",
/// " 12 ") the way the original importer's `parseInt` did. Returns `None`
/// when the field does not start with a digit.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
