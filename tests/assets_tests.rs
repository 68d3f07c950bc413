#![cfg(feature = "assets")]

use std::fs;

use librosple::assets::*;
use librosple::core::*;

fn header() -> Sheet {
    let mut rows = vec![Row::default(); 7];
    rows[4] = Row::new(vec![Cell::text("RUC"), Cell::text("20100066603")]);
    rows[5] = Row::new(vec![Cell::text("Año"), Cell::text("2023")]);
    rows[6] = Row::new(vec![Cell::text("Operaciones"), Cell::text("1")]);
    Sheet::new(HEADER_SHEET, rows)
}

fn book(name: &str, info: bool, header: usize, data: Vec<Row>) -> Sheet {
    let mut rows = vec![Row::new(vec![Cell::boolean(info)])];
    rows.extend(std::iter::repeat_n(Row::default(), header - 1));
    rows.extend(data);
    Sheet::new(name, rows)
}

#[test]
fn fixed_assets_file_name_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut cells: Vec<Cell> = (0..40).map(|_| Cell::default()).collect();
    cells[0] = Cell::text("3361");
    cells[3] = Cell::text("Camioneta");
    cells[16] = Cell::number(85000.0);
    cells[25] = Cell::text("01-03-2021");
    let wb = Workbook::new(vec![
        header(),
        book("070100", true, 4, vec![Row::new(cells.clone()), Row::new(cells)]),
        book("070300", false, 3, vec![]),
    ]);
    let files = AssetsProcessor::new().process(&wb, dir.path()).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].path.ends_with("LE2010006660320230000070100001111.TXT"));
    assert!(files[1].path.ends_with("LE2010006660320230000070300001011.TXT"));
    assert_eq!(files[0].lines, 2);

    let content = fs::read_to_string(&files[0].path).unwrap();
    let first: Vec<&str> = content.lines().next().unwrap().split('|').collect();
    assert_eq!(first[0], "20230000");
    assert_eq!(first[2], "M000000001");
    assert_eq!(first[3], "3361");
    assert_eq!(first[10], "Camioneta");
    assert_eq!(first[14], "85000.00");
    assert_eq!(first[23], "01/03/2021");
    assert_eq!(first[24], "00/00/0000");
    assert_eq!(first[36], "1");
}

#[test]
fn leased_assets_record() {
    let dir = tempfile::tempdir().unwrap();
    let row = Row::new(vec![
        Cell::text("3362"),
        Cell::text("15-01-2023"),
        Cell::text("CONTRATO-9"),
        Cell::default(),
        Cell::text("15-01-2026"),
        Cell::number(36.0),
        Cell::number(1200.005),
    ]);
    let wb = Workbook::new(vec![header(), book("070400", true, 3, vec![row])]);
    let files = AssetsProcessor::new().process(&wb, dir.path()).unwrap();
    let content = fs::read_to_string(&files[0].path).unwrap();
    let fields: Vec<&str> = content.trim_end_matches("\r\n").split('|').collect();
    assert_eq!(
        &fields[3..],
        ["9", "3362", "15/01/2023", "CONTRATO-9", "15/01/2026", "36", "1200.01", "1", ""]
    );
}
