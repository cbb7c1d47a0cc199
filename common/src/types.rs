//! 最新巻チェックの型定義
//!
//! CLIと照合ロジックで共有される型:
//! - TrackedSeries: スプレッドシートの1行（追跡中の作品）
//! - CatalogItem / CatalogPage: 書籍カタログの検索結果
//! - VolumeCandidate: 「次の巻」として選ばれた検索結果
//! - ReconciliationEntry: 1作品分のチェック結果

use serde::{Deserialize, Serialize};

/// 追跡中の作品（スプレッドシートの1データ行）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedSeries {
    /// カタログ検索に使うタイトル
    pub title: String,

    /// 照合用タイトル（`num` を次巻の番号に置換する）
    pub search_title: String,

    /// 最後に確認した巻数（空欄可）
    #[serde(default)]
    pub current_volume: String,

    /// ヘッダーを除いたデータ行のインデックス（0始まり）
    pub source_index: usize,
}

/// カタログ検索結果の1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogItem {
    pub title: String,
    pub isbn: String,

    /// 発売日（例: 「2026年04月30日」「2026年05月下旬」）
    pub sales_date: String,

    pub author: String,
    pub publisher_name: String,
    pub item_url: String,
}

/// カタログ検索結果の1ページ（新しい発売日順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    pub page_count: u32,
    pub items: Vec<CatalogItem>,
}

/// 次巻の候補
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeCandidate {
    /// カタログ上の書名
    pub title: String,

    /// 判定した巻数（現在の巻数 + 1）
    pub volume: String,

    pub isbn: String,
    pub sales_date: String,

    #[serde(default)]
    pub item_url: String,
}

/// 1作品分のチェック結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationEntry {
    /// 元データ行のインデックス（書き戻し先の特定に使用）
    pub source_index: usize,

    /// スプレッドシート上のタイトル
    pub original_title: String,

    #[serde(flatten)]
    pub candidate: VolumeCandidate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_deserialize_partial() {
        let json = r#"{"title": "作品 5", "isbn": "9784000000001", "salesDate": "2026年04月30日"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "作品 5");
        assert_eq!(item.sales_date, "2026年04月30日");
        assert!(item.author.is_empty());
        assert!(item.item_url.is_empty());
    }

    #[test]
    fn test_reconciliation_entry_serializes_flat() {
        let entry = ReconciliationEntry {
            source_index: 2,
            original_title: "作品".to_string(),
            candidate: VolumeCandidate {
                title: "作品 4".to_string(),
                volume: "4".to_string(),
                isbn: "9784000000002".to_string(),
                sales_date: "2020年01月01日".to_string(),
                item_url: String::new(),
            },
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["sourceIndex"], 2);
        assert_eq!(value["originalTitle"], "作品");
        assert_eq!(value["volume"], "4");
        assert_eq!(value["salesDate"], "2020年01月01日");

        let back: ReconciliationEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
