//! File-based conversion tests

use tabsheet::prelude::*;

#[test]
fn test_convert_and_save_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("people.html");
    std::fs::write(
        &input,
        "<html><body><table><tr><td>Name</td></tr><tr><td>Ana</td></tr></table></body></html>",
    )
    .unwrap();

    let conversion = Converter::default().convert_file(&input).unwrap();
    let output = dir.path().join(&conversion.file_name);
    conversion.save(&output).unwrap();

    let sheet = XlsxReader::read_file(&output).unwrap();
    assert_eq!(sheet.to_text_rows().unwrap(), vec![vec!["Name"], vec!["Ana"]]);
}

#[test]
fn test_unexpected_extension_still_converts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("table.txt");
    std::fs::write(&input, "<table><tr><td>x</td></tr></table>").unwrap();

    let conversion = Converter::default().convert_file(&input).unwrap();
    assert_eq!(conversion.grid.row_count(), 1);
}

#[test]
fn test_extract_file_matches_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("table.txt");
    std::fs::write(
        &input,
        "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>",
    )
    .unwrap();

    let converter = Converter::default();
    let grid = converter.extract_file(&input).unwrap();
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.col_count(), 2);
    assert_eq!(grid, converter.convert_file(&input).unwrap().grid);

    let err = converter.extract_file(dir.path().join("absent.htm")).unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Converter::default()
        .convert_file(dir.path().join("absent.html"))
        .unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
    assert!(err.is_recoverable());
}

#[test]
fn test_failed_conversion_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("converted.xlsx");

    let result = tabsheet::convert("<p>none</p>").and_then(|c| c.save(&output));
    assert!(result.is_err());
    assert!(!output.exists());
}
