//! 検索結果セッションのテスト

use chrono::NaiveDate;
use manga_check::session::{session_folder, Session};
use manga_check::sheet::{SeriesSheet, XlsxSheet};
use rust_xlsxwriter::Workbook;
use manga_check_common::{ReconciliationEntry, VolumeCandidate};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn entry(source_index: usize, title: &str, volume: &str) -> ReconciliationEntry {
    ReconciliationEntry {
        source_index,
        original_title: title.to_string(),
        candidate: VolumeCandidate {
            title: format!("{} {}", title, volume),
            volume: volume.to_string(),
            isbn: "9784000000000".to_string(),
            sales_date: "2026年04月01日".to_string(),
            item_url: String::new(),
        },
    }
}

/// セッションがなければNone
#[test]
fn test_load_missing_session() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(Session::load(dir.path()).unwrap().is_none());
}

/// 保存と読み込み
#[test]
fn test_session_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();

    let session = Session::new(today, "作品一覧", vec![entry(0, "作品A", "4"), entry(2, "作品C", "11")]);
    session.save(dir.path()).expect("セッション保存失敗");

    let loaded = Session::load(dir.path()).unwrap().expect("セッションが見つからない");
    assert_eq!(loaded.reference_date, today);
    assert_eq!(loaded.worksheet, "作品一覧");
    assert_eq!(loaded.results, session.results);
}

/// バージョンが異なるセッションは破棄
#[test]
fn test_session_version_mismatch() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(
        Session::session_path(dir.path()),
        r#"{"version": 99, "referenceDate": "2026-05-01", "worksheet": "x", "results": []}"#,
    )
    .unwrap();

    assert!(Session::load(dir.path()).unwrap().is_none());
}

/// 削除
#[test]
fn test_session_clear() {
    let dir = tempdir().expect("Failed to create temp dir");
    let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    Session::new(today, "作品一覧", Vec::new()).save(dir.path()).unwrap();

    assert!(Session::clear(dir.path()).unwrap());
    assert!(!Session::clear(dir.path()).unwrap());
    assert!(Session::load(dir.path()).unwrap().is_none());
}

/// 削除できない場合はエラー
#[test]
fn test_session_clear_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(Session::session_path(dir.path())).unwrap();

    assert!(Session::clear(dir.path()).is_err());
}

/// 書き戻し先は先頭のシートではなく検索時のシート
#[test]
fn test_session_opens_searched_worksheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("作品一覧.xlsx");

    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("別シート").unwrap();
    workbook.add_worksheet().set_name("作品一覧").unwrap();
    workbook.save(&path).unwrap();

    let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let session = Session::new(today, "作品一覧", Vec::new());

    let settings = session.sheet_settings(&path);
    assert_eq!(settings.worksheet.as_deref(), Some("作品一覧"));
    let sheet = XlsxSheet::open(&settings).unwrap();
    assert_eq!(sheet.name(), "作品一覧");
}

#[test]
fn test_session_folder() {
    assert_eq!(session_folder(Path::new("/data/作品一覧.xlsx")), PathBuf::from("/data"));
    assert_eq!(session_folder(Path::new("作品一覧.xlsx")), PathBuf::from("."));
}
