//! 次巻の解決（1作品分）

use crate::catalog::CatalogSearch;
use crate::error::Result;
use chrono::NaiveDate;
use manga_check_common::{select_candidate, Selection, TrackedSeries, VolumeCandidate};

/// 作品の次巻を探す
///
/// タイトルでカタログを1回だけ検索し（1ページ目のみ）、
/// 発売済みかつ照合用タイトルを含む最初の項目を返す。
pub async fn resolve_next_volume<C: CatalogSearch>(
    client: &C,
    series: &TrackedSeries,
    today: NaiveDate,
) -> Result<Option<VolumeCandidate>> {
    Ok(resolve_selection(client, series, today).await?.candidate)
}

/// 次巻の候補に加え、発売日を解釈できずスキップした項目も返す
pub async fn resolve_selection<C: CatalogSearch>(
    client: &C,
    series: &TrackedSeries,
    today: NaiveDate,
) -> Result<Selection> {
    let page = client.search(&series.title).await?;
    if page.page_count > 1 {
        tracing::debug!(
            title = %series.title,
            page_count = page.page_count,
            "2ページ目以降は検索しない"
        );
    }
    Ok(select_candidate(series, &page, today)?)
}
