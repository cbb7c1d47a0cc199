//! 書籍カタログ検索
//!
//! 検索処理は `CatalogSearch` トレイトの背後に置き、
//! 本番は楽天ブックス書籍検索API、テストはメモリ上の偽実装を使う。

mod rakuten;
mod types;

pub use rakuten::RakutenBooksClient;
pub use types::{parse_search_response, SearchResponse};

use crate::error::Result;
use manga_check_common::CatalogPage;
use std::future::Future;

/// 検索時の並び順（新しい発売日順）
pub const SORT_NEWEST_FIRST: &str = "-releaseDate";

/// 取得するページ（1ページ目のみ）
pub const FIRST_PAGE: u32 = 1;

/// タイトルで書籍カタログを検索する
pub trait CatalogSearch {
    /// 新しい発売日順の1ページ目を返す
    ///
    /// 通信失敗・2xx以外・不正なJSONは `CheckError::CatalogQuery`。
    fn search(&self, title: &str) -> impl Future<Output = Result<CatalogPage>>;
}
