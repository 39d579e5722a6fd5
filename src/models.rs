use rusqlite::types::{FromSql, FromSqlResult, ValueRef};

/// One value in a report row. Rows come back from the warehouse as
/// positionally-aligned scalars; the controller decides per column
/// whether a cell renders as plain text or as currency.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl Scalar {
    /// The value's plain textual form, used for every non-currency column.
    pub fn plain(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Real(r) => r.to_string(),
            Scalar::Text(t) => t.clone(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromSql for Scalar {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Scalar::Null,
            ValueRef::Integer(i) => Scalar::Int(i),
            ValueRef::Real(r) => Scalar::Real(r),
            ValueRef::Text(t) => Scalar::Text(String::from_utf8_lossy(t).into_owned()),
            // The warehouse schema carries no blob columns.
            ValueRef::Blob(b) => Scalar::Text(format!("<{} bytes>", b.len())),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeKey {
    pub first_name: String,
    pub last_name: String,
}

impl EmployeeKey {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationKey {
    pub country: String,
    pub city: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_forms() {
        assert_eq!(Scalar::Text("Jane".into()).plain(), "Jane");
        assert_eq!(Scalar::Int(2).plain(), "2");
        assert_eq!(Scalar::Int(2023).plain(), "2023");
        assert_eq!(Scalar::Null.plain(), "");
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Scalar::Int(7).as_f64(), Some(7.0));
        assert_eq!(Scalar::Real(1.5).as_f64(), Some(1.5));
        assert_eq!(Scalar::Text("x".into()).as_f64(), None);
    }
}
