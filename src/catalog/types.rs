//! 楽天ブックス書籍検索APIのレスポンス型

use crate::error::{CheckError, Result};
use manga_check_common::{CatalogItem, CatalogPage};
use serde::Deserialize;

/// 検索レスポンス（formatVersion=1）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default = "default_page_count")]
    pub page_count: u32,

    #[serde(rename = "Items", default)]
    pub items: Vec<ItemWrapper>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemWrapper {
    #[serde(rename = "Item")]
    pub item: CatalogItem,
}

/// エラーレスポンス
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

fn default_page_count() -> u32 {
    1
}

impl From<SearchResponse> for CatalogPage {
    fn from(response: SearchResponse) -> Self {
        CatalogPage {
            page_count: response.page_count,
            items: response.items.into_iter().map(|w| w.item).collect(),
        }
    }
}

/// レスポンス本文を検索結果に変換
pub fn parse_search_response(body: &str) -> Result<CatalogPage> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| CheckError::catalog(None, format!("レスポンスのパースに失敗: {}", e)))?;
    Ok(response.into())
}

/// エラーレスポンス本文からメッセージを取り出す
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(e) if e.error_description.is_empty() => e.error,
        Ok(e) => format!("{} ({})", e.error_description, e.error),
        Err(_) => body.chars().take(200).collect(),
    }
}
