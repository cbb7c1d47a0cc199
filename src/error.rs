use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{0}が設定されていません。`manga-check config` または環境変数で設定してください")]
    MissingCredential(&'static str),

    #[error("カタログ検索エラー{}: {message}", status_suffix(.status))]
    CatalogQuery { status: Option<u16>, message: String },

    #[error("スプレッドシートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SheetRead(String),

    #[error("スプレッドシート書き込みエラー: {0}")]
    SheetWrite(String),

    #[error("有効なデータが見つかりません")]
    NoValidRows,

    #[error("保存された検索結果がありません。先に `manga-check run` を実行してください")]
    NoSession,

    #[error("エクスポートエラー: {0}")]
    Export(String),

    #[error(transparent)]
    Common(#[from] manga_check_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    pub fn catalog(status: Option<u16>, message: impl Into<String>) -> Self {
        CheckError::CatalogQuery {
            status,
            message: message.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, CheckError>;
