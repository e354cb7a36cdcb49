//! Basic Read Example
//!
//! This example demonstrates the most basic usage of xlsxrows:
//! reading every worksheet of a workbook as fixed-width rows.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example basic_read -- input.xlsx 3
//! ```
//!
//! If no arguments are provided, it will try to use `demos/fixtures/sample.xlsx`
//! with 3 columns.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Get input file path from command line arguments or use default
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/fixtures/sample.xlsx".to_string());

    // Get row width from command line arguments or use default
    let columns = match std::env::args().nth(2) {
        Some(value) => value.parse::<usize>()?,
        None => 3,
    };

    println!("Reading {} with {} column(s)...", input_path, columns);

    let table = xlsxrows::read_rows(&input_path, columns).map_err(|e| {
        eprintln!("Error: Could not read '{}'", input_path);
        eprintln!("  {}", e);
        e
    })?;

    for (i, row) in table.iter().enumerate() {
        let cells: Vec<&str> = row.iter().map(|cell| cell.unwrap_or("-")).collect();
        println!("{:>5}: {}", i + 1, cells.join(" | "));
    }

    println!("{} row(s) read", table.len());

    Ok(())
}
