//! Sanity report over the imported table: row counts, status breakdown and
//! a few sample rows.

use rusqlite::Connection;

use crate::repository;

pub async fn check(conn: &Connection) -> anyhow::Result<()> {
    println!("=== Database data check ===");

    let total = repository::count_all(conn)?;
    println!("Total game businesses: {total}");

    let with_coords = repository::count_with_coords(conn)?;
    println!("With coordinates: {with_coords}");

    println!("\nBy operating status:");
    for (status, count) in repository::status_counts(conn)? {
        println!("  {}: {count}", status.as_deref().unwrap_or("(none)"));
    }

    let eligible = repository::count_eligible(conn)?;
    println!("\nEligible for nearby search: {eligible}");

    println!("\nSample rows:");
    for (i, row) in repository::sample_with_coords(conn, 5)?.iter().enumerate() {
        println!(
            "{}. {}",
            i + 1,
            row.business_name.as_deref().unwrap_or("(unnamed)")
        );
        println!("   address: {}", row.full_address.as_deref().unwrap_or("-"));
        println!(
            "   coords: ({}, {})",
            row.coord_x.map_or("-".to_string(), |x| x.to_string()),
            row.coord_y.map_or("-".to_string(), |y| y.to_string()),
        );
        println!("   status: {}", row.status_name.as_deref().unwrap_or("-"));
        println!("   category: {}\n", row.category.as_deref().unwrap_or("-"));
    }

    Ok(())
}
