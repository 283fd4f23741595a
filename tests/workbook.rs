use calamine::{DataType, Reader, Xlsx, open_workbook};
use pcs_tools::export;
use pcs_tools::io::excel_write::{self, COLUMN_HEADERS, SHEET_NAME};
use pcs_tools::model::{DATA_SOURCE, IndicatorRecord};
use serde_json::{Value, json};
use tempfile::tempdir;

fn record(goal: u8, target_number: &str, discrimination: &str) -> IndicatorRecord {
    IndicatorRecord {
        goal,
        target_number: target_number.to_string(),
        target_description: format!("target {target_number}"),
        discrimination: discrimination.to_string(),
        source: DATA_SOURCE.to_string(),
        years: std::array::from_fn(|_| Value::Null),
    }
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

fn read_sheet(path: &std::path::Path) -> calamine::Range<DataType> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook opened");
    workbook
        .worksheet_range(SHEET_NAME)
        .expect("sheet present")
        .expect("sheet readable")
}

#[test]
fn workbook_contains_header_row_and_typed_record_cells() {
    let mut exported = record(1, "1.2", "Total");
    exported.years[0] = json!(10.0);
    exported.years[1] = json!(20.5);
    exported.years[2] = json!("n/d");

    let dir = tempdir().expect("temporary directory");
    let path = dir.path().join("indicadores.xlsx");
    excel_write::write_workbook(&path, &[exported]).expect("workbook written");

    let range = read_sheet(&path);
    let header: Vec<String> = range
        .rows()
        .next()
        .expect("header row")
        .iter()
        .map(cell_text)
        .collect();
    assert_eq!(header, COLUMN_HEADERS);

    let row = range.rows().nth(1).expect("data row");
    assert_eq!(row.len(), COLUMN_HEADERS.len());
    assert_eq!(row[0], DataType::Float(1.0));
    assert_eq!(cell_text(&row[1]), "1.2");
    assert_eq!(cell_text(&row[2]), "target 1.2");
    assert_eq!(cell_text(&row[3]), "Total");
    assert_eq!(row[4], DataType::Float(10.0));
    assert_eq!(row[5], DataType::Float(20.5));
    assert_eq!(cell_text(&row[6]), "n/d");
    for col in 7..12 {
        assert_eq!(row[col], DataType::Empty, "year column {col} should be blank");
    }
    assert_eq!(cell_text(&row[12]), DATA_SOURCE);
}

#[test]
fn workbook_rows_follow_goal_then_target_order() {
    let mut dataset = vec![
        record(3, "", "sem meta"),
        record(1, "1.10", "b"),
        record(3, "3.1", "c"),
        record(1, "1.2", "a"),
    ];
    export::sort_dataset(&mut dataset);

    let dir = tempdir().expect("temporary directory");
    let path = dir.path().join("ordenado.xlsx");
    excel_write::write_workbook(&path, &dataset).expect("workbook written");

    let range = read_sheet(&path);
    let keys: Vec<(String, String)> = range
        .rows()
        .skip(1)
        .map(|row| (cell_text(&row[0]), cell_text(&row[1])))
        .collect();

    assert_eq!(
        keys,
        [
            ("1".to_string(), "1.10".to_string()),
            ("1".to_string(), "1.2".to_string()),
            ("3".to_string(), "3.1".to_string()),
            ("3".to_string(), String::new()),
        ]
    );
}

#[test]
fn saving_overwrites_an_existing_workbook() {
    let dir = tempdir().expect("temporary directory");
    let path = dir.path().join("sobrescrito.xlsx");

    let first = vec![record(1, "1.1", "a"), record(2, "2.1", "b")];
    excel_write::write_workbook(&path, &first).expect("first write");

    let second = vec![record(5, "5.3", "c")];
    excel_write::write_workbook(&path, &second).expect("second write");

    let range = read_sheet(&path);
    let data_rows: Vec<_> = range.rows().skip(1).collect();
    assert_eq!(data_rows.len(), 1);
    assert_eq!(cell_text(&data_rows[0][0]), "5");
    assert_eq!(cell_text(&data_rows[0][1]), "5.3");
}
