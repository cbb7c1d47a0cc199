//! 検索結果エクスポートの統合テスト

use manga_check::cli::ExportFormat;
use manga_check::export::export_results;
use manga_check_common::{ReconciliationEntry, VolumeCandidate};
use calamine::{open_workbook_auto, Data, Reader};
use tempfile::tempdir;

fn create_test_entry(index: usize) -> ReconciliationEntry {
    ReconciliationEntry {
        source_index: index,
        original_title: format!("作品{}", index),
        candidate: VolumeCandidate {
            title: format!("作品{} {}", index, index + 1),
            volume: (index + 1).to_string(),
            isbn: format!("978400000000{}", index),
            sales_date: "2026年04月01日".to_string(),
            item_url: String::new(),
        },
    }
}

#[test]
fn test_export_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let entries: Vec<_> = (0..3).map(create_test_entry).collect();

    let written = export_results(&entries, &ExportFormat::Xlsx, dir.path(), "最新巻チェック").unwrap();
    assert_eq!(written, vec![dir.path().join("最新巻チェック.xlsx")]);

    let mut workbook = open_workbook_auto(&written[0]).unwrap();
    let range = workbook.worksheet_range("最新巻チェック").unwrap();
    assert_eq!(range.height(), 4);
    assert_eq!(range.get((0, 1)), Some(&Data::String("作品名".to_string())));
    assert_eq!(range.get((1, 1)), Some(&Data::String("作品0 1".to_string())));
    // ISBNは文字列のまま
    assert_eq!(range.get((2, 4)), Some(&Data::String("9784000000001".to_string())));
}

#[test]
fn test_export_json_to_file_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.json");
    let entries: Vec<_> = (0..2).map(create_test_entry).collect();

    let written = export_results(&entries, &ExportFormat::Json, &output, "無視される").unwrap();
    assert_eq!(written, vec![output.clone()]);

    let content = std::fs::read_to_string(&output).unwrap();
    let loaded: Vec<ReconciliationEntry> = serde_json::from_str(&content).unwrap();
    assert_eq!(loaded, entries);
}

#[test]
fn test_export_both() {
    let dir = tempdir().expect("Failed to create temp dir");
    let written = export_results(&[], &ExportFormat::Both, dir.path(), "結果").unwrap();

    assert_eq!(written.len(), 2);
    for path in &written {
        assert!(path.exists(), "ファイルが作成されていない: {}", path.display());
    }
    assert_eq!(std::fs::read_to_string(&written[1]).unwrap().trim(), "[]");
}
