//! 検索結果からの次巻選択
//!
//! 新しい発売日順に並んだ1ページ分の検索結果を先頭から走査し、
//! 「発売済み」かつ「照合用タイトルを含む」最初の1件を採用する。
//! 発売日が解釈できない項目はその項目だけをスキップする。

use crate::date::is_past;
use crate::error::{Error, Result};
use crate::title::{build_match_target, matches, next_volume};
use crate::types::{CatalogPage, TrackedSeries, VolumeCandidate};
use chrono::NaiveDate;

/// 発売日を解釈できずスキップした項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedDate {
    pub title: String,
    pub sales_date: String,
}

/// 選択結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub candidate: Option<VolumeCandidate>,
    pub unparsed_dates: Vec<UnparsedDate>,
}

/// 1ページ分の検索結果から次巻の候補を選ぶ
///
/// `page_count == 0` の場合は項目に関わらず候補なし。
/// 現在の巻数が数値でない場合は `Error::InvalidVolume`。
pub fn select_candidate(
    series: &TrackedSeries,
    page: &CatalogPage,
    today: NaiveDate,
) -> Result<Selection> {
    let mut selection = Selection::default();
    if page.page_count == 0 {
        return Ok(selection);
    }

    let volume = next_volume(&series.current_volume)?;
    let target = build_match_target(&series.search_title, volume);

    for item in &page.items {
        match is_past(&item.sales_date, today) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(Error::DateFormat(raw)) => {
                tracing::warn!(
                    series = %series.title,
                    item = %item.title,
                    sales_date = %raw,
                    "発売日を解釈できないためスキップ"
                );
                selection.unparsed_dates.push(UnparsedDate {
                    title: item.title.clone(),
                    sales_date: raw,
                });
                continue;
            }
            Err(e) => return Err(e),
        }

        if matches(&item.title, &target) {
            selection.candidate = Some(VolumeCandidate {
                title: item.title.clone(),
                volume: volume.to_string(),
                isbn: item.isbn.clone(),
                sales_date: item.sales_date.clone(),
                item_url: item.item_url.clone(),
            });
            break;
        }
    }

    Ok(selection)
}
