#![cfg(all(feature = "json", feature = "inventories"))]

use librosple::core::*;
use librosple::inventories::InventoryProcessor;

const SNAPSHOT: &str = r#"{
  "sheets": [
    {
      "name": "030000",
      "rows": [
        [], [], [], [],
        [{"formatted": "RUC"}, {"formatted": "20512345678"}],
        [{"formatted": "Año"}, {"formatted": "2023"}],
        [{"formatted": "Mes"}, {"formatted": "12"}],
        [{"formatted": "Día"}, {"formatted": "31"}],
        [{"formatted": "Oportunidad"}, {"formatted": "01"}],
        [], [], [], [], [], [],
        [{"formatted": "Operaciones"}, {"formatted": "1"}]
      ]
    },
    {
      "name": "030200",
      "rows": [
        [{"formatted": "TRUE", "value": {"bool": true}}],
        [], [], [],
        [
          {"formatted": "1041"},
          {"formatted": "BCP"},
          {},
          {"formatted": "193-12345"},
          {"formatted": "PEN"},
          {"formatted": "15,000.50", "value": {"number": 15000.5}},
          {"formatted": "D"},
          {"formatted": "CTA/01"}
        ]
      ]
    }
  ]
}"#;

#[test]
fn workbook_from_json_snapshot() {
    let wb = Workbook::from_json(SNAPSHOT).unwrap();
    assert_eq!(wb.sheets.len(), 2);
    assert!(wb.require_sheet("030200").unwrap().info_flag());

    let dir = tempfile::tempdir().unwrap();
    let files = InventoryProcessor::new().process(&wb, dir.path()).unwrap();
    assert_eq!(
        std::fs::read_to_string(&files[0].path).unwrap(),
        "20231231|1041|BCP|193-12345|PEN|15000.50|D|1|CTA-01|\r\n"
    );
}

#[test]
fn malformed_json_is_an_error() {
    let err = Workbook::from_json("{").unwrap_err();
    assert!(matches!(err, ExportError::Json(_)));
}
