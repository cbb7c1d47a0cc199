//! 最新巻チェック
//!
//! 作品一覧スプレッドシートの各作品について書籍カタログを検索し、
//! 発売済みの次巻があれば検出してシートの巻数を更新する。

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod reconcile;
pub mod resolver;
pub mod session;
pub mod sheet;

pub use manga_check_common as common;
