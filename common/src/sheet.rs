//! 作品一覧シートの行解釈と書き戻し計画
//!
//! シートの構成: 1行目はヘッダー、2行目以降が
//! 「タイトル / 照合用タイトル / 巻数」の3列。

use crate::types::{ReconciliationEntry, TrackedSeries};
use std::collections::HashMap;

/// 巻数の列（1始まり）
pub const VOLUME_COLUMN: usize = 3;

/// 必要な列数
pub const REQUIRED_COLUMNS: usize = 3;

/// 読み飛ばした行の警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    /// シート上の行番号（1始まり）
    pub row: usize,
    pub message: String,
}

impl std::fmt::Display for RowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "行{}: {}", self.row, self.message)
    }
}

/// シート解釈結果
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub series: Vec<TrackedSeries>,
    pub warnings: Vec<RowWarning>,
}

/// データ行のインデックスからシート上の行番号へ（ヘッダー分と1始まりで+2）
pub fn sheet_row(source_index: usize) -> usize {
    source_index + 2
}

/// シートの全行から追跡対象の作品を取り出す
///
/// ヘッダー行は常に読み飛ばす。列数不足・タイトル空欄の行は警告付きで除外。
pub fn parse_rows(rows: &[Vec<String>]) -> ParsedSheet {
    let mut parsed = ParsedSheet::default();

    for (source_index, row) in rows.iter().skip(1).enumerate() {
        let row_number = sheet_row(source_index);

        if row.len() < REQUIRED_COLUMNS {
            parsed.warnings.push(RowWarning {
                row: row_number,
                message: format!("データが不完全です（列数: {}）", row.len()),
            });
            continue;
        }

        let title = row[0].trim();
        if title.is_empty() {
            parsed.warnings.push(RowWarning {
                row: row_number,
                message: "タイトルが空です".to_string(),
            });
            continue;
        }

        parsed.series.push(TrackedSeries {
            title: title.to_string(),
            search_title: row[1].trim().to_string(),
            current_volume: row[2].trim().to_string(),
            source_index,
        });
    }

    parsed
}

/// 巻数セルの書き換え1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    /// シート上の行番号（1始まり）
    pub row: usize,
    /// 列番号（1始まり）
    pub column: usize,
    pub title: String,
    pub old_value: String,
    pub new_value: String,
}

impl std::fmt::Display for CellUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} の巻数を {} → {} に変更",
            self.title, self.old_value, self.new_value
        )
    }
}

/// チェック結果から書き戻すセルを決める
///
/// 巻数が文字列として異なる行だけを対象にする。
/// 検索後に行が並べ替えられた場合に備え、タイトルが一致しない行は書き換えない。
pub fn plan_updates(
    series: &[TrackedSeries],
    entries: &[ReconciliationEntry],
) -> Vec<CellUpdate> {
    let by_index: HashMap<usize, &TrackedSeries> =
        series.iter().map(|s| (s.source_index, s)).collect();

    entries
        .iter()
        .filter_map(|entry| {
            let Some(original) = by_index.get(&entry.source_index) else {
                tracing::warn!(
                    source_index = entry.source_index,
                    title = %entry.original_title,
                    "元データに該当行がないため書き戻しをスキップ"
                );
                return None;
            };

            if original.title != entry.original_title {
                tracing::warn!(
                    row = sheet_row(entry.source_index),
                    expected = %entry.original_title,
                    actual = %original.title,
                    "行のタイトルが検索時と異なるため書き戻しをスキップ"
                );
                return None;
            }

            if entry.candidate.volume == original.current_volume {
                return None;
            }

            Some(CellUpdate {
                row: sheet_row(entry.source_index),
                column: VOLUME_COLUMN,
                title: original.title.clone(),
                old_value: original.current_volume.clone(),
                new_value: entry.candidate.volume.clone(),
            })
        })
        .collect()
}
