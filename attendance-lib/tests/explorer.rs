//! End-to-end explorer scenarios over normalized backend payloads.

use attendance_lib::explorer::Direction;
use attendance_lib::explorer::Explorer;
use attendance_lib::explorer::SortState;
use attendance_lib::explorer::TableBody;
use attendance_lib::model::Row;
use attendance_lib::model::Value;
use attendance_lib::normalize;
use attendance_lib::views;
use serde_json::json;

fn names(explorer: &Explorer) -> Vec<String> {
    explorer
        .view()
        .page
        .iter()
        .map(|row| row.get("name").map(Value::to_string).unwrap_or_default())
        .collect()
}

fn attendance_payload(count: usize) -> serde_json::Value {
    let records: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "Empcode": format!("E{:03}", i),
                "Name": format!("Employee {:03}", i),
                "DateString": "01/05/2024",
                "WorkTime": format!("{}:00", 6 + i % 4),
                "Status": if i % 5 == 0 { "A" } else { "P" },
            })
        })
        .collect();
    json!({ "data": { "data": records } })
}

#[test]
fn test_sort_then_search() {
    let rows = vec![
        Row::new().set("empcode", "E1").set("name", "Bob").set("work_time", "8:30"),
        Row::new().set("empcode", "E2").set("name", "Amy").set("work_time", "7:15"),
    ];
    let mut explorer = Explorer::with_rows(views::attendance(), rows);

    explorer.toggle_sort("name");
    assert_eq!(names(&explorer), ["Amy", "Bob"]);

    explorer.set_search_term("bob");
    assert_eq!(names(&explorer), ["Bob"]);
    assert_eq!(explorer.total_pages(), 1);
}

#[test]
fn test_normalized_attendance_pages() {
    let rows = normalize::rows_with(attendance_payload(45), normalize::attendance_row);
    let mut explorer = Explorer::with_rows(views::attendance(), rows);

    assert_eq!(explorer.total_pages(), 3);
    explorer.set_page(3);
    assert_eq!(explorer.view().page.len(), 5);

    let table = explorer.render();
    let pagination = table.pagination.unwrap();
    assert_eq!(pagination.label(), "Page 3 of 3 (45 total)");
    assert!(!pagination.has_next);
}

#[test]
fn test_search_restricted_to_keys() {
    let rows = normalize::rows_with(attendance_payload(10), normalize::attendance_row);
    let mut explorer = Explorer::with_rows(views::attendance(), rows);

    // status is not a search key
    explorer.set_search_term("A");
    assert_eq!(explorer.total_count(), 0);

    explorer.set_search_term("employee 00");
    assert_eq!(explorer.total_count(), 10);

    explorer.set_search_term("E007");
    assert_eq!(names(&explorer), ["Employee 007"]);
}

#[test]
fn test_descending_keeps_blanks_last() {
    let rows = vec![
        Row::new().set("empcode", "E1").set("status", "P"),
        Row::new().set("empcode", "E2").set("status", Value::Null),
        Row::new().set("empcode", "E3").set("status", "A"),
    ];
    let mut explorer = Explorer::with_rows(views::attendance(), rows);
    explorer.toggle_sort("status");
    assert_eq!(explorer.toggle_sort("status"), Some(SortState::desc("status")));

    let codes: Vec<String> = explorer
        .view()
        .sorted
        .iter()
        .map(|row| row.get("empcode").map(Value::to_string).unwrap_or_default())
        .collect();
    assert_eq!(codes, ["E1", "E3", "E2"]);
    assert_eq!(explorer.render().headers[8].indicator, Some(Direction::Desc));
}

#[test]
fn test_export_covers_all_pages_in_sort_order() {
    let rows = normalize::rows_with(attendance_payload(25), normalize::attendance_row);
    let mut explorer = Explorer::with_rows(views::attendance(), rows);
    explorer.toggle_sort("empcode");
    explorer.toggle_sort("empcode");

    let csv = explorer.export_csv().unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 26);
    assert!(lines[0].starts_with("\"Empcode\",\"Name\",\"Date\""));
    assert!(lines[1].starts_with("\"E024\",\"Employee 024\""));
}

#[test]
fn test_export_matches_sorted_rows() {
    let rows = normalize::rows_with(attendance_payload(150), normalize::attendance_row);
    let mut explorer = Explorer::with_rows(views::attendance(), rows);
    explorer.set_search_term("employee 1");
    explorer.toggle_sort("work_time");
    explorer.toggle_sort("work_time");
    assert_eq!(explorer.total_count(), 50);
    assert_eq!(explorer.total_pages(), 3);

    let csv = explorer.export_csv().unwrap();
    let fields = explorer.config().export_field_list();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());

    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    let expected_headers: Vec<String> = fields.iter().map(|f| f.header.clone()).collect();
    assert_eq!(headers, expected_headers);

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    let sorted = explorer.sorted_rows();
    assert_eq!(records.len(), sorted.len());
    for (record, row) in records.iter().zip(&sorted) {
        let expected: Vec<String> = fields
            .iter()
            .map(|f| row.resolve(&f.key).map(Value::to_string).unwrap_or_default())
            .collect();
        assert_eq!(record.iter().collect::<Vec<_>>(), expected);
    }
    assert_eq!(&records[0][0], "E103");
    assert_eq!(&records[1][0], "E107");
}

#[test]
fn test_export_nothing_matches() {
    let rows = normalize::rows_with(attendance_payload(3), normalize::attendance_row);
    let mut explorer = Explorer::with_rows(views::attendance(), rows);
    explorer.set_search_term("nobody");

    assert!(explorer.export_csv().unwrap_err().is_empty());
    assert!(matches!(explorer.render().body, TableBody::Empty { colspan: 10, .. }));
}

#[test]
fn test_files_view() {
    let payload = json!({
        "files": [
            {"id": 2, "filename": "june.csv", "from_date": "01/06/2024", "to_date": "",
             "total_records": 45210, "unique_employees": 312, "blob_url": "https://blob/june.csv"},
            {"id": 1, "filename": "may.csv", "from_date": "01/05/2024", "to_date": "31/05/2024",
             "total_records": 1200, "created_at": "not a date"}
        ]
    });
    let rows: Vec<Row> = normalize::collection(payload["files"].clone());
    let mut explorer = Explorer::with_rows(views::files(), rows);
    explorer.toggle_sort("id");

    let TableBody::Rows(cells) = explorer.render().body else {
        panic!("expected rows");
    };
    assert_eq!(cells[0][1], "may.csv");
    assert_eq!(cells[0][5], "0");
    assert_eq!(cells[0][6], "-");
    assert_eq!(cells[0][7], "Process");
    assert_eq!(cells[1][3], "-");
    assert_eq!(cells[1][4], "45,210");
    assert_eq!(cells[1][7], "Download | Process");

    explorer.toggle_sort("actions");
    assert_eq!(explorer.state().sort, Some(SortState::asc("id")));
}
