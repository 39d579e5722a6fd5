use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

/// The warehouse star schema: one fact table (`shippedorders`) joined to
/// employee, product line, calendar, and customer-location dimensions.
/// Column names follow the upstream warehouse naming.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS salesrepemployee (
    employeeNumber INTEGER PRIMARY KEY,
    firstName TEXT NOT NULL,
    lastName TEXT NOT NULL,
    managerName TEXT
);

CREATE TABLE IF NOT EXISTS productline (
    productLineID INTEGER PRIMARY KEY,
    productLineName TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS customers (
    customerNumber INTEGER PRIMARY KEY,
    customerName TEXT NOT NULL,
    country TEXT NOT NULL,
    city TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS calendar (
    calendar_key INTEGER PRIMARY KEY,
    date TEXT NOT NULL,
    month INTEGER NOT NULL,
    qtr INTEGER NOT NULL,
    year INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS shippedorders (
    id INTEGER PRIMARY KEY,
    orderNumber INTEGER NOT NULL,
    salesRepEmployeeNumber INTEGER NOT NULL,
    productLineID INTEGER NOT NULL,
    customerNumber INTEGER NOT NULL,
    calendar_key INTEGER NOT NULL,
    quantityOrdered INTEGER NOT NULL,
    priceEach REAL NOT NULL,
    FOREIGN KEY (salesRepEmployeeNumber) REFERENCES salesrepemployee(employeeNumber),
    FOREIGN KEY (productLineID) REFERENCES productline(productLineID),
    FOREIGN KEY (customerNumber) REFERENCES customers(customerNumber),
    FOREIGN KEY (calendar_key) REFERENCES calendar(calendar_key)
);

CREATE INDEX IF NOT EXISTS idx_orders_rep ON shippedorders(salesRepEmployeeNumber);
CREATE INDEX IF NOT EXISTS idx_orders_line ON shippedorders(productLineID);
CREATE INDEX IF NOT EXISTS idx_orders_customer ON shippedorders(customerNumber);
CREATE INDEX IF NOT EXISTS idx_orders_calendar ON shippedorders(calendar_key);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["salesrepemployee", "productline", "customers", "calendar", "shippedorders"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }
}
