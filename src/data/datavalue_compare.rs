use crate::data::datatable::DataValue;
use std::cmp::Ordering;

/// Compare two DataValues of compatible types.
///
/// Integers and floats compare by numeric value. Returns `None` when either
/// side is null, for NaN, or when a number meets a datetime.
pub fn compare_datavalues(a: &DataValue, b: &DataValue) -> Option<Ordering> {
    match (a, b) {
        (DataValue::Integer(a), DataValue::Integer(b)) => Some(a.cmp(b)),
        (DataValue::DateTime(a), DataValue::DateTime(b)) => Some(a.cmp(b)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

/// True when `min <= value <= max`
pub fn within_bounds(value: &DataValue, min: &DataValue, max: &DataValue) -> bool {
    matches!(
        compare_datavalues(min, value),
        Some(Ordering::Less | Ordering::Equal)
    ) && matches!(
        compare_datavalues(value, max),
        Some(Ordering::Less | Ordering::Equal)
    )
}
