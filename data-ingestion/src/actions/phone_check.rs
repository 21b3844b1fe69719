//! Phone-number coverage report for operating Seoul businesses.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;

use crate::repository;

// Korean landline/mobile formats, with or without dashes.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0\d{1,2}-?\d{3,4}-?\d{4}$").unwrap());

pub async fn check(conn: &Connection) -> anyhow::Result<()> {
    println!("=== Phone number check (Seoul, operating) ===");

    let samples = repository::seoul_operating_with_phone(conn, 5)?;
    println!("Sample businesses with a phone number ({}):", samples.len());
    for (i, sample) in samples.iter().enumerate() {
        let phone = sample.phone.as_deref().unwrap_or("-");
        let shape = if PHONE_RE.is_match(phone) { "ok" } else { "unusual format" };
        println!(
            "{}. {}",
            i + 1,
            sample.business_name.as_deref().unwrap_or("(unnamed)")
        );
        println!("   address: {}", sample.full_address.as_deref().unwrap_or("-"));
        println!("   phone: {phone} ({shape})\n");
    }

    let with_phone = repository::count_seoul_operating_with_phone(conn)?;
    let without_phone = repository::count_seoul_operating_without_phone(conn)?;
    println!("With phone: {with_phone}");
    println!("Without phone: {without_phone}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_korean_formats() {
        assert!(PHONE_RE.is_match("02-1234-5678"));
        assert!(PHONE_RE.is_match("031-123-4567"));
        assert!(PHONE_RE.is_match("01012345678"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!PHONE_RE.is_match("1234"));
        assert!(!PHONE_RE.is_match("전화없음"));
        assert!(!PHONE_RE.is_match("82-2-1234-5678"));
    }
}
