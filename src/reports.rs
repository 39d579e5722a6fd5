//! Warehouse queries: selector lookups and the three aggregate sales
//! reports. Every user-supplied filter value is a bound parameter; the
//! only text interpolated into a statement is the grain grouping column,
//! which comes from the closed `TimeGrain` enum.

use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{PinnacleError, Result};
use crate::grain::TimeGrain;
use crate::models::{EmployeeKey, LocationKey, Scalar};

// ---------------------------------------------------------------------------
// Selector lookups
// ---------------------------------------------------------------------------

/// Employees in selector order. The selector preserves this order.
pub fn list_employees(conn: &Connection) -> Result<Vec<EmployeeKey>> {
    let mut stmt = conn.prepare(
        "SELECT firstName, lastName FROM salesrepemployee ORDER BY firstName, lastName",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(EmployeeKey {
            first_name: row.get(0)?,
            last_name: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn list_product_lines(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT productLineName FROM productline ORDER BY productLineName")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn list_countries(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT country FROM customers ORDER BY country")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Cities repopulate whenever the country selector changes.
pub fn list_cities(conn: &Connection, country: &str) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT city FROM customers WHERE country = ?1 ORDER BY city")?;
    let rows = stmt.query_map([country], |row| row.get(0))?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Key resolution (CLI arguments → selector keys)
// ---------------------------------------------------------------------------

/// Resolve a "First Last" display name to an employee key.
pub fn find_employee(conn: &Connection, name: &str) -> Result<EmployeeKey> {
    let mut stmt = conn.prepare(
        "SELECT firstName, lastName FROM salesrepemployee \
         WHERE firstName || ' ' || lastName = ?1",
    )?;
    let mut rows = stmt.query_map([name], |row| {
        Ok(EmployeeKey {
            first_name: row.get(0)?,
            last_name: row.get(1)?,
        })
    })?;
    match rows.next() {
        Some(key) => Ok(key?),
        None => Err(PinnacleError::UnknownEmployee(name.to_string())),
    }
}

pub fn find_product_line(conn: &Connection, name: &str) -> Result<String> {
    let found: Option<String> = conn
        .query_row(
            "SELECT productLineName FROM productline WHERE productLineName = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    found.ok_or_else(|| PinnacleError::UnknownProductLine(name.to_string()))
}

pub fn find_location(conn: &Connection, country: &str, city: &str) -> Result<LocationKey> {
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM customers WHERE country = ?1 AND city = ?2",
        [country, city],
        |row| row.get(0),
    )?;
    if count == 0 {
        return Err(PinnacleError::UnknownLocation(format!("{country}/{city}")));
    }
    Ok(LocationKey {
        country: country.to_string(),
        city: city.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Aggregate sales queries
// ---------------------------------------------------------------------------

fn collect_rows(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<Vec<Scalar>>> {
    let mut stmt = conn.prepare(sql)?;
    let cols = stmt.column_count();
    let rows = stmt.query_map(params, |row| {
        (0..cols)
            .map(|i| row.get::<_, Scalar>(i))
            .collect::<std::result::Result<Vec<_>, _>>()
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Append an optional year filter as the next bound parameter.
fn year_clause(year: Option<i32>, next_param: usize) -> (String, Option<i32>) {
    match year {
        Some(y) => (format!(" AND ca.year = ?{next_param}"), Some(y)),
        None => (String::new(), None),
    }
}

/// Revenue per employee, bucketed by the active grain.
/// Columns: firstName, lastName, managerName, <grain>, year, revenue.
pub fn employee_sales(
    conn: &Connection,
    key: &EmployeeKey,
    grain: TimeGrain,
    year: Option<i32>,
) -> Result<Vec<Vec<Scalar>>> {
    let g = grain.column();
    let (extra, year_param) = year_clause(year, 3);
    let sql = format!(
        "SELECT sa.firstName, sa.lastName, sa.managerName, ca.{g}, ca.year, \
                sum(sh.quantityOrdered * sh.priceEach) \
         FROM shippedorders sh \
         JOIN salesrepemployee sa ON sa.employeeNumber = sh.salesRepEmployeeNumber \
         JOIN calendar ca ON ca.calendar_key = sh.calendar_key \
         WHERE sa.firstName = ?1 AND sa.lastName = ?2{extra} \
         GROUP BY sa.firstName, sa.lastName, sa.managerName, ca.{g}, ca.year \
         ORDER BY sa.firstName, sa.lastName, ca.year, ca.{g}"
    );
    let mut params: Vec<&dyn ToSql> = vec![&key.first_name, &key.last_name];
    if let Some(y) = year_param.as_ref() {
        params.push(y);
    }
    collect_rows(conn, &sql, &params)
}

/// Quantity, average price, and total sales per product line.
/// Columns: productLineName, <grain>, year, quantity, avg price, total.
pub fn product_line_sales(
    conn: &Connection,
    product_line: &str,
    grain: TimeGrain,
    year: Option<i32>,
) -> Result<Vec<Vec<Scalar>>> {
    let g = grain.column();
    let (extra, year_param) = year_clause(year, 2);
    let sql = format!(
        "SELECT pl.productLineName, ca.{g}, ca.year, \
                sum(sh.quantityOrdered), round(avg(sh.priceEach), 2), \
                sum(sh.quantityOrdered * sh.priceEach) \
         FROM shippedorders sh \
         JOIN productline pl ON pl.productLineID = sh.productLineID \
         JOIN calendar ca ON ca.calendar_key = sh.calendar_key \
         WHERE pl.productLineName = ?1{extra} \
         GROUP BY pl.productLineName, ca.{g}, ca.year \
         ORDER BY pl.productLineName, ca.year, ca.{g}"
    );
    let mut params: Vec<&dyn ToSql> = vec![&product_line];
    if let Some(y) = year_param.as_ref() {
        params.push(y);
    }
    collect_rows(conn, &sql, &params)
}

/// Product line sales filtered to one customer country/city.
/// Columns: country, city, productLineName, <grain>, year, quantity,
/// avg price, total.
pub fn location_sales(
    conn: &Connection,
    key: &LocationKey,
    grain: TimeGrain,
    year: Option<i32>,
) -> Result<Vec<Vec<Scalar>>> {
    let g = grain.column();
    let (extra, year_param) = year_clause(year, 3);
    let sql = format!(
        "SELECT cu.country, cu.city, pl.productLineName, ca.{g}, ca.year, \
                sum(sh.quantityOrdered), round(avg(sh.priceEach), 2), \
                sum(sh.quantityOrdered * sh.priceEach) \
         FROM shippedorders sh \
         JOIN productline pl ON pl.productLineID = sh.productLineID \
         JOIN calendar ca ON ca.calendar_key = sh.calendar_key \
         JOIN customers cu ON cu.customerNumber = sh.customerNumber \
         WHERE cu.country = ?1 AND cu.city = ?2{extra} \
         GROUP BY cu.country, cu.city, pl.productLineName, ca.{g}, ca.year \
         ORDER BY pl.productLineName, ca.year, ca.{g}"
    );
    let mut params: Vec<&dyn ToSql> = vec![&key.country, &key.city];
    if let Some(y) = year_param.as_ref() {
        params.push(y);
    }
    collect_rows(conn, &sql, &params)
}
