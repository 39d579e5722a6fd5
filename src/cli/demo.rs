use chrono::{Datelike, Local};
use colored::Colorize;
use rand::Rng;
use rusqlite::Connection;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::fmt::number;
use crate::settings::get_data_dir;

/// (id, name, base unit price) — prices jitter around the base.
const PRODUCT_LINES: &[(i64, &str, f64)] = &[
    (1, "Classic Cars", 104.0),
    (2, "Motorcycles", 68.0),
    (3, "Planes", 82.0),
    (4, "Ships", 57.0),
    (5, "Trains", 49.0),
    (6, "Trucks and Buses", 73.0),
    (7, "Vintage Cars", 88.0),
];

/// (employee number, first, last, manager)
const EMPLOYEES: &[(i64, &str, &str, &str)] = &[
    (1165, "Leslie", "Jennings", "Anthony Bow"),
    (1166, "Leslie", "Thompson", "Anthony Bow"),
    (1188, "Julie", "Firrelli", "Anthony Bow"),
    (1216, "Steve", "Patterson", "Anthony Bow"),
    (1286, "Foon Yue", "Tseng", "Anthony Bow"),
    (1323, "George", "Vanauf", "Anthony Bow"),
    (1337, "Loui", "Bondur", "Gerard Bondur"),
    (1370, "Gerard", "Hernandez", "Gerard Bondur"),
    (1401, "Pamela", "Castillo", "Gerard Bondur"),
    (1621, "Mami", "Nishi", "Mary Patterson"),
];

/// (customer number, name, country, city)
const CUSTOMERS: &[(i64, &str, &str, &str)] = &[
    (103, "Atelier graphique", "France", "Nantes"),
    (112, "Signal Gift Stores", "USA", "Las Vegas"),
    (114, "Australian Collectors, Co.", "Australia", "Melbourne"),
    (119, "La Rochelle Gifts", "France", "Nantes"),
    (121, "Baane Mini Imports", "Norway", "Stavern"),
    (124, "Mini Gifts Distributors Ltd.", "USA", "San Rafael"),
    (128, "Blauer See Auto, Co.", "Germany", "Frankfurt"),
    (129, "Mini Wheels Co.", "USA", "San Francisco"),
    (131, "Land of Toys Inc.", "USA", "NYC"),
    (141, "Euro+ Shopping Channel", "Spain", "Madrid"),
    (144, "Volvo Model Replicas, Co", "Sweden", "Lulea"),
    (146, "Saveley & Henriot, Co.", "France", "Lyon"),
];

pub fn run() -> Result<()> {
    let dir = get_data_dir();
    std::fs::create_dir_all(&dir)?;
    let conn = get_connection(&dir.join("pinnacle.db"))?;
    init_db(&conn)?;

    reset(&conn)?;
    seed(&conn)?;

    let orders: i64 = conn.query_row("SELECT count(*) FROM shippedorders", [], |r| r.get(0))?;
    println!(
        "{} Seeded demo warehouse: {} employees, {} product lines, {} customers, {} shipped order lines.",
        "✓".green(),
        EMPLOYEES.len(),
        PRODUCT_LINES.len(),
        CUSTOMERS.len(),
        number(orders)
    );
    println!("Try: pinnacle report product-line --line 'Classic Cars' --grain quarterly");
    Ok(())
}

fn reset(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DELETE FROM shippedorders;
         DELETE FROM calendar;
         DELETE FROM customers;
         DELETE FROM productline;
         DELETE FROM salesrepemployee;",
    )?;
    Ok(())
}

fn seed(conn: &Connection) -> Result<()> {
    for (id, first, last, manager) in EMPLOYEES {
        conn.execute(
            "INSERT INTO salesrepemployee (employeeNumber, firstName, lastName, managerName) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![id, first, last, manager],
        )?;
    }
    for (id, name, _) in PRODUCT_LINES {
        conn.execute(
            "INSERT INTO productline (productLineID, productLineName) VALUES (?1, ?2)",
            rusqlite::params![id, name],
        )?;
    }
    for (id, name, country, city) in CUSTOMERS {
        conn.execute(
            "INSERT INTO customers (customerNumber, customerName, country, city) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![id, name, country, city],
        )?;
    }

    // Two full calendar years ending last year, one entry per month.
    let this_year = Local::now().year();
    let years = [this_year - 2, this_year - 1];
    for year in years {
        for month in 1..=12u32 {
            let key = year as i64 * 10_000 + month as i64 * 100 + 15;
            let date = format!("{year:04}-{month:02}-15");
            let qtr = (month - 1) / 3 + 1;
            conn.execute(
                "INSERT INTO calendar (calendar_key, date, month, qtr, year) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![key, date, month, qtr, year],
            )?;
        }
    }

    // Every rep books one to three order lines per month.
    let mut rng = rand::thread_rng();
    let mut order_number = 10_100i64;
    for year in years {
        for month in 1..=12u32 {
            let calendar_key = year as i64 * 10_000 + month as i64 * 100 + 15;
            for (rep, _, _, _) in EMPLOYEES {
                for _ in 0..rng.gen_range(1..=3) {
                    let (line_id, _, base) = PRODUCT_LINES[rng.gen_range(0..PRODUCT_LINES.len())];
                    let (customer, _, _, _) = CUSTOMERS[rng.gen_range(0..CUSTOMERS.len())];
                    let qty: i64 = rng.gen_range(2..=48);
                    let price = (base * rng.gen_range(0.85..1.2) * 100.0).round() / 100.0;
                    conn.execute(
                        "INSERT INTO shippedorders \
                         (orderNumber, salesRepEmployeeNumber, productLineID, customerNumber, \
                          calendar_key, quantityOrdered, priceEach) \
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                        rusqlite::params![order_number, rep, line_id, customer, calendar_key, qty, price],
                    )?;
                    order_number += 1;
                }
            }
        }
    }

    Ok(())
}
