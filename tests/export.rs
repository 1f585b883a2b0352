//! Integration tests for workbook assembly, read back with calamine.

use calamine::{Data, Reader, Xlsx};
use serde_json::{json, Value};
use std::io::Cursor;
use volley_schedule_web::{assemble_workbook, RecordRow, RecordTable};

fn row(pairs: &[(&str, Value)]) -> RecordRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn open(bytes: &[u8]) -> Xlsx<Cursor<Vec<u8>>> {
    Xlsx::new(Cursor::new(bytes.to_vec())).unwrap()
}

#[test]
fn sheets_appear_in_supplied_order() {
    let schedule: RecordTable = vec![row(&[("Day", json!(1)), ("Match", json!("A vs B"))])];
    let counts: RecordTable = vec![row(&[("Referee", json!("R1")), ("Count", json!(3))])];
    let groups: RecordTable = vec![row(&[("Group", json!("A")), ("Team", json!("Eagles"))])];

    let bytes = assemble_workbook(&[
        ("Schedule", &schedule),
        ("Referee Counts", &counts),
        ("Groupings", &groups),
    ])
    .unwrap();

    let workbook = open(&bytes);
    let names = workbook.sheet_names().to_owned();
    assert_eq!(names, vec!["Schedule", "Referee Counts", "Groupings"]);
}

#[test]
fn headers_follow_first_seen_key_order() {
    let table: RecordTable = vec![
        row(&[("Day", json!(1)), ("Match", json!("A vs B"))]),
        row(&[("Match", json!("C vs D")), ("Referee", json!("R2"))]),
    ];
    let bytes = assemble_workbook(&[("Schedule", &table)]).unwrap();

    let mut workbook = open(&bytes);
    let range = workbook.worksheet_range("Schedule").unwrap();
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("Day".into())));
    assert_eq!(range.get_value((0, 1)), Some(&Data::String("Match".into())));
    assert_eq!(range.get_value((0, 2)), Some(&Data::String("Referee".into())));

    // Row order preserved; keys absent on a row leave the cell blank.
    assert_eq!(range.get_value((1, 0)), Some(&Data::Float(1.0)));
    assert_eq!(range.get_value((2, 1)), Some(&Data::String("C vs D".into())));
    assert!(matches!(range.get_value((1, 2)), None | Some(&Data::Empty)));
    assert!(matches!(range.get_value((2, 0)), None | Some(&Data::Empty)));
}

#[test]
fn generator_key_order_survives_to_the_sheet() {
    // Keys arrive in non-alphabetical order and must stay that way.
    let table: RecordTable = vec![row(&[
        ("Team", json!("Eagles")),
        ("Group", json!("A")),
        ("Court", json!(1)),
    ])];
    let bytes = assemble_workbook(&[("Groupings", &table)]).unwrap();
    let mut workbook = open(&bytes);
    let range = workbook.worksheet_range("Groupings").unwrap();
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("Team".into())));
    assert_eq!(range.get_value((0, 1)), Some(&Data::String("Group".into())));
    assert_eq!(range.get_value((0, 2)), Some(&Data::String("Court".into())));
}

#[test]
fn identical_input_yields_identical_sheet_content() {
    let table: RecordTable = vec![
        row(&[("Group", json!("A")), ("Team", json!("Eagles"))]),
        row(&[("Group", json!("A")), ("Team", json!("Hawks"))]),
    ];
    let first = assemble_workbook(&[("Groupings", &table)]).unwrap();
    let second = assemble_workbook(&[("Groupings", &table)]).unwrap();

    let mut a = open(&first);
    let mut b = open(&second);
    let rows_a: Vec<Vec<Data>> = a
        .worksheet_range("Groupings")
        .unwrap()
        .rows()
        .map(|r| r.to_vec())
        .collect();
    let rows_b: Vec<Vec<Data>> = b
        .worksheet_range("Groupings")
        .unwrap()
        .rows()
        .map(|r| r.to_vec())
        .collect();
    assert_eq!(rows_a, rows_b);
    assert_eq!(rows_a.len(), 3);
}

#[test]
fn mixed_value_types_are_written() {
    let table: RecordTable = vec![row(&[
        ("Name", json!("R1")),
        ("Count", json!(2.5)),
        ("Active", json!(true)),
    ])];
    let bytes = assemble_workbook(&[("Sheet1", &table)]).unwrap();
    let mut workbook = open(&bytes);
    let range = workbook.worksheet_range("Sheet1").unwrap();
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("R1".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(2.5)));
    assert_eq!(range.get_value((1, 2)), Some(&Data::Bool(true)));
}
