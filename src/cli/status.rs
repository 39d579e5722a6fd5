use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::number;
use crate::settings::{get_data_dir, load_settings};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = get_data_dir();
    let db_path = data_dir.join("pinnacle.db");

    println!("Company:    {}", if settings.company_name.is_empty() { "(not set)" } else { &settings.company_name });
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let conn = get_connection(&db_path)?;

        let employees: i64 = conn.query_row("SELECT count(*) FROM salesrepemployee", [], |r| r.get(0))?;
        let lines: i64 = conn.query_row("SELECT count(*) FROM productline", [], |r| r.get(0))?;
        let customers: i64 = conn.query_row("SELECT count(*) FROM customers", [], |r| r.get(0))?;
        let calendar: i64 = conn.query_row("SELECT count(*) FROM calendar", [], |r| r.get(0))?;
        let orders: i64 = conn.query_row("SELECT count(*) FROM shippedorders", [], |r| r.get(0))?;

        println!();
        println!("Employees:       {}", number(employees));
        println!("Product lines:   {}", number(lines));
        println!("Customers:       {}", number(customers));
        println!("Calendar days:   {}", number(calendar));
        println!("Shipped orders:  {}", number(orders));
    } else {
        println!();
        println!("Database not found. Run `pinnacle init` to set up.");
    }

    Ok(())
}
