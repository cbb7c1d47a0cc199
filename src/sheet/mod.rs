//! 作品一覧スプレッドシート
//!
//! シートの読み書きは `SeriesSheet` トレイトの背後に置く。
//! 本番はローカルの .xlsx（calamineで読み込み、rust_xlsxwriterで書き出し）。

mod xlsx;

pub use xlsx::{create_workbook, XlsxSheet};

use crate::error::{CheckError, Result};
use manga_check_common::{parse_rows, plan_updates, CellUpdate, ParsedSheet, ReconciliationEntry, TrackedSeries};

/// 作品一覧シートの読み書き
pub trait SeriesSheet {
    /// シート名
    fn name(&self) -> &str;

    /// 全行をセル文字列で返す（ヘッダー行を含む）
    fn rows(&self) -> Result<Vec<Vec<String>>>;

    /// セルを書き換える
    fn write_cells(&mut self, updates: &[CellUpdate]) -> Result<()>;
}

/// シートから追跡対象の作品を読み込む
///
/// シートが空、または有効な行が1件もない場合は `CheckError::NoValidRows`。
pub fn load_series<S: SeriesSheet + ?Sized>(sheet: &S) -> Result<ParsedSheet> {
    let rows = sheet.rows()?;
    let parsed = parse_rows(&rows);

    for warning in &parsed.warnings {
        tracing::warn!(sheet = %sheet.name(), "{}", warning);
    }

    if parsed.series.is_empty() {
        return Err(CheckError::NoValidRows);
    }

    tracing::info!(sheet = %sheet.name(), count = parsed.series.len(), "作品データを取得");
    Ok(parsed)
}

/// チェック結果の巻数をシートに書き戻す
///
/// 巻数が変わる行だけを書き換え、変更内容を返す。
pub fn apply_updates<S: SeriesSheet + ?Sized>(
    sheet: &mut S,
    series: &[TrackedSeries],
    entries: &[ReconciliationEntry],
) -> Result<Vec<CellUpdate>> {
    let updates = plan_updates(series, entries);
    if updates.is_empty() {
        return Ok(updates);
    }

    sheet.write_cells(&updates)?;
    for update in &updates {
        tracing::info!(row = update.row, "{}", update);
    }
    Ok(updates)
}
