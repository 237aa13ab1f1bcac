use chrono::NaiveDateTime;
use csv_inspect::data::type_converter::TemporalOptions;
use csv_inspect::notice::NoticeBuffer;
use csv_inspect::{filter_data, DataValue, FilterBounds, LoadError, LoadOptions, TableSession};
use std::io::Write;
use tempfile::NamedTempFile;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn dt(s: &str) -> DataValue {
    DataValue::DateTime(NaiveDateTime::parse_from_str(s, FORMAT).unwrap())
}

fn load(content: &str) -> std::sync::Arc<csv_inspect::DataTable> {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut options = LoadOptions {
        temporal: TemporalOptions {
            format: FORMAT.to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    options.read.header = true;

    let mut session = TableSession::with_sink(Box::new(NoticeBuffer::new()));
    session.load(file.path(), &options).unwrap()
}

#[test]
fn test_filter_loaded_ages() {
    let table = load("age\n10\n20\n30\n");
    let bounds = FilterBounds::new().with_range("age", DataValue::Integer(15), DataValue::Integer(25));

    let filtered = filter_data(&table, &bounds).unwrap();
    assert_eq!(filtered.row_count(), 1);
    assert_eq!(filtered.get_value_by_name(0, "age"), Some(&DataValue::Float(20.0)));

    // The cached table is untouched
    assert_eq!(table.row_count(), 3);
}

#[test]
fn test_filter_by_time_window() {
    let table = load(
        "time,power\n\
         2019-05-06 10:47:00,1\n\
         2019-05-06 10:48:00,2\n\
         2019-05-06 10:50:00,3\n\
         2019-05-06 10:52:00,4\n\
         2019-05-06 10:53:00,5\n",
    );
    let bounds = FilterBounds::new().with_range(
        "time",
        dt("2019-05-06 10:48:00"),
        dt("2019-05-06 10:52:00"),
    );

    let filtered = filter_data(&table, &bounds).unwrap();
    let power: Vec<_> = filtered.get_column("power").unwrap().values.clone();
    assert_eq!(
        power,
        vec![
            DataValue::Float(2.0),
            DataValue::Float(3.0),
            DataValue::Float(4.0)
        ]
    );
}

#[test]
fn test_numeric_column_with_datetime_bound() {
    let table = load("age\n10\n20\n");
    let bounds = FilterBounds::new().with_range(
        "age",
        dt("2019-05-06 10:48:00"),
        dt("2019-05-06 10:52:00"),
    );
    let err = filter_data(&table, &bounds).unwrap_err();
    assert!(matches!(err, LoadError::TypeMismatch(_)));
}
