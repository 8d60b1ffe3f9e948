use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Month};

use sales_report::product::{Product, count_products, create_product, create_products_table};

/// A utility for creating a test database for the REST API server of sales_report.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The year the seeded sales happen in.
    #[arg(long, default_value_t = 2022)]
    year: i32,
}

const CATEGORIES: [(&str, &[&str]); 4] = [
    ("electronics", &["Hard Drive", "Monitor", "SSD", "Headphones"]),
    ("jewelery", &["Gold Ring", "Silver Bracelet", "Pendant"]),
    ("men's clothing", &["Backpack", "Cotton Jacket", "Slim Fit T-Shirt"]),
    ("women's clothing", &["Rain Jacket", "Short Sleeve Top", "Moto Biker Jacket"]),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    create_products_table(&conn)?;

    println!("Creating products...");

    for month_number in 1..=12u8 {
        let month = Month::try_from(month_number)?;

        for (category_index, (category, titles)) in CATEGORIES.iter().enumerate() {
            for (title_index, title) in titles.iter().enumerate() {
                let seed = usize::from(month_number) * 7 + category_index * 5 + title_index * 3;
                let day = (seed % 28 + 1) as u8;
                let price = ((seed * 137) % 1200) as f64 + 0.99;
                let date = Date::from_calendar_date(args.year, month, day)?;

                create_product(
                    Product::build(title, category, price, date)
                        .description(&format!("A {category} item listed in {month}"))
                        .sold(seed % 3 != 0),
                    &conn,
                )?;
            }
        }
    }

    let count = count_products(&conn)?;
    println!("Created {count} products. Success!");

    Ok(())
}
