use comfy_table::Table;

use crate::db::get_connection;
use crate::error::Result;
use crate::reports;
use crate::settings::db_path;

pub fn employees() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let employees = reports::list_employees(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["First Name", "Last Name"]);
    for e in &employees {
        table.add_row(vec![e.first_name.clone(), e.last_name.clone()]);
    }
    println!("{table}");
    println!("{} employee(s)", employees.len());
    Ok(())
}

pub fn product_lines() -> Result<()> {
    let conn = get_connection(&db_path())?;
    for line in reports::list_product_lines(&conn)? {
        println!("{line}");
    }
    Ok(())
}

pub fn countries() -> Result<()> {
    let conn = get_connection(&db_path())?;
    for country in reports::list_countries(&conn)? {
        println!("{country}");
    }
    Ok(())
}

pub fn cities(country: &str) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let cities = reports::list_cities(&conn, country)?;
    if cities.is_empty() {
        println!("No customer cities found for {country}");
        return Ok(());
    }
    for city in cities {
        println!("{city}");
    }
    Ok(())
}
