//! 最新巻チェックの一括実行
//!
//! 作品を入力順に1件ずつ処理する。1作品の失敗は記録して次へ進み、
//! 全体を中断しない。再試行はしない。

use crate::catalog::CatalogSearch;
use crate::resolver::resolve_selection;
use chrono::NaiveDate;
use manga_check_common::{ReconciliationEntry, TrackedSeries, UnparsedDate};

/// 1作品の処理失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesFailure {
    pub source_index: usize,
    pub title: String,
    pub message: String,
}

impl std::fmt::Display for SeriesFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "「{}」の検索でエラー: {}", self.title, self.message)
    }
}

/// 発売日を解釈できずスキップした検索結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub series_title: String,
    pub item: UnparsedDate,
}

/// 一括実行の結果
#[derive(Debug, Clone, Default)]
pub struct ReconciliationReport {
    /// 次巻が見つかった作品（入力順）
    pub entries: Vec<ReconciliationEntry>,
    pub failures: Vec<SeriesFailure>,
    pub skipped_items: Vec<SkippedItem>,
}

impl ReconciliationReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// 全作品の次巻を順に探す
///
/// `on_progress` は各作品の検索前に `(処理中の番号(1始まり), 総数, 作品)` で呼ばれる。
pub async fn run_reconciliation<C, F>(
    series_list: &[TrackedSeries],
    today: NaiveDate,
    client: &C,
    mut on_progress: F,
) -> ReconciliationReport
where
    C: CatalogSearch,
    F: FnMut(usize, usize, &TrackedSeries),
{
    let mut report = ReconciliationReport::default();
    let total = series_list.len();

    for (i, series) in series_list.iter().enumerate() {
        on_progress(i + 1, total, series);

        match resolve_selection(client, series, today).await {
            Ok(selection) => {
                report.skipped_items.extend(selection.unparsed_dates.into_iter().map(|item| {
                    SkippedItem {
                        series_title: series.title.clone(),
                        item,
                    }
                }));

                match selection.candidate {
                    Some(candidate) => {
                        tracing::info!(
                            title = %series.title,
                            volume = %candidate.volume,
                            isbn = %candidate.isbn,
                            "次巻を検出"
                        );
                        report.entries.push(ReconciliationEntry {
                            source_index: series.source_index,
                            original_title: series.title.clone(),
                            candidate,
                        });
                    }
                    None => tracing::debug!(title = %series.title, "該当なし"),
                }
            }
            Err(e) => {
                tracing::warn!(title = %series.title, error = %e, "検索に失敗");
                report.failures.push(SeriesFailure {
                    source_index: series.source_index,
                    title: series.title.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    report
}
