//! Column classification: decides whether a raw column is converted as
//! numeric or as datetime.
//!
//! The check is a cheap heuristic over a sample of non-empty cells, not a
//! numeric grammar. Signs, exponents and thousand separators all classify
//! a value as non-numeric.

/// Number of non-empty cells examined by default
pub const DEFAULT_TEST_SIZE: usize = 10;

/// How a raw column will be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Temporal,
}

/// True when `value` is ASCII digits with at most one decimal point removed
pub fn looks_numeric(value: &str) -> bool {
    let stripped = value.replacen('.', "", 1);
    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit())
}

/// Check whether the first `test_size` non-empty cells of `col` look numeric.
///
/// A `test_size` of zero examines nothing and returns true, as does a column
/// with no non-empty cells.
pub fn is_col_numeric<S: AsRef<str>>(col: &[S], test_size: usize) -> bool {
    col.iter()
        .map(AsRef::as_ref)
        .filter(|v| !v.is_empty())
        .take(test_size)
        .all(looks_numeric)
}

pub fn classify_column<S: AsRef<str>>(col: &[S], test_size: usize) -> ColumnKind {
    if is_col_numeric(col, test_size) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Temporal
    }
}
