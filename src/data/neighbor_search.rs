//! Nearest non-empty neighbor lookup used to repair missing cells

use crate::error::{LoadError, Result};

/// Find the first non-empty entry scanning from `start_index` (inclusive).
///
/// Forward scans toward the end of `values`, backward scans down to index 0.
/// Returns `None` when every entry in the scanned range is empty.
pub fn find_first_entry<S: AsRef<str>>(
    values: &[S],
    start_index: usize,
    forward: bool,
) -> Result<Option<&str>> {
    if start_index >= values.len() {
        return Err(LoadError::Range {
            index: start_index,
            len: values.len(),
        });
    }

    let found = if forward {
        values[start_index..]
            .iter()
            .map(AsRef::as_ref)
            .find(|v| !v.is_empty())
    } else {
        values[..=start_index]
            .iter()
            .rev()
            .map(AsRef::as_ref)
            .find(|v| !v.is_empty())
    };

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_finds_next() {
        let col = vec!["1", "", "3"];
        assert_eq!(find_first_entry(&col, 1, true).unwrap(), Some("3"));
    }

    #[test]
    fn test_start_index_is_inclusive() {
        let col = vec!["1", "2", "3"];
        assert_eq!(find_first_entry(&col, 1, true).unwrap(), Some("2"));
        assert_eq!(find_first_entry(&col, 1, false).unwrap(), Some("2"));
    }

    #[test]
    fn test_backward_scans_toward_start() {
        let col = vec!["a", "b", "", ""];
        assert_eq!(find_first_entry(&col, 3, false).unwrap(), Some("b"));
        assert_eq!(find_first_entry(&col, 2, true).unwrap(), None);
    }

    #[test]
    fn test_empty_scan_returns_none() {
        let col = vec!["", "2", ""];
        assert_eq!(find_first_entry(&col, 0, false).unwrap(), None);
        assert_eq!(find_first_entry(&col, 2, true).unwrap(), None);
    }

    #[test]
    fn test_out_of_range() {
        let col: Vec<String> = vec!["x".to_string()];
        let err = find_first_entry(&col, 1, true).unwrap_err();
        assert!(matches!(err, LoadError::Range { index: 1, len: 1 }));

        let empty: Vec<&str> = Vec::new();
        assert!(find_first_entry(&empty, 0, false).is_err());
    }
}
