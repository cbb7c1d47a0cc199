//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("日付形式を解釈できません: {0}")]
    DateFormat(String),

    #[error("巻数を数値として解釈できません: {0}")]
    InvalidVolume(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
