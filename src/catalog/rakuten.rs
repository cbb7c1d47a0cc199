//! 楽天ブックス書籍検索APIクライアント

use super::types::{error_message, parse_search_response};
use super::{CatalogSearch, FIRST_PAGE, SORT_NEWEST_FIRST};
use crate::config::CatalogSettings;
use crate::error::{CheckError, Result};
use manga_check_common::CatalogPage;
use std::time::Duration;

const USER_AGENT: &str = concat!("manga-check/", env!("CARGO_PKG_VERSION"));

pub struct RakutenBooksClient {
    http_client: reqwest::Client,
    settings: CatalogSettings,
}

impl RakutenBooksClient {
    pub fn new(settings: CatalogSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| CheckError::Config(format!("HTTPクライアント初期化エラー: {}", e)))?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    fn query_params(&self, title: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("applicationId", self.settings.application_id.clone()),
            ("title", title.to_string()),
            ("sort", SORT_NEWEST_FIRST.to_string()),
            ("hits", self.settings.hits.to_string()),
            ("page", FIRST_PAGE.to_string()),
        ];
        if let Some(affiliate_id) = &self.settings.affiliate_id {
            params.push(("affiliateId", affiliate_id.clone()));
        }
        params
    }
}

impl CatalogSearch for RakutenBooksClient {
    async fn search(&self, title: &str) -> Result<CatalogPage> {
        tracing::debug!(title = %title, endpoint = %self.settings.endpoint, "カタログ検索");

        let response = self
            .http_client
            .get(&self.settings.endpoint)
            .query(&self.query_params(title))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CheckError::catalog(None, format!("タイムアウト ({}秒)", self.settings.timeout_seconds))
                } else {
                    CheckError::catalog(None, format!("通信エラー: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckError::catalog(Some(status.as_u16()), format!("レスポンス読み込みエラー: {}", e)))?;

        if !status.is_success() {
            return Err(CheckError::catalog(Some(status.as_u16()), error_message(&body)));
        }

        let page = parse_search_response(&body)?;
        tracing::debug!(title = %title, page_count = page.page_count, items = page.items.len(), "検索結果を取得");
        Ok(page)
    }
}
