//! 検索結果セッション
//!
//! 直近の `run` の結果をスプレッドシートと同じフォルダに保存する。
//! `update` / `export` はこのファイルを読み込んで処理する。

use crate::config::SheetSettings;
use crate::error::Result;
use chrono::NaiveDate;
use manga_check_common::ReconciliationEntry;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const SESSION_FILE_NAME: &str = ".manga-check-session.json";

/// セッションファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 判定の基準日
    pub reference_date: NaiveDate,
    /// 検索対象のシート名
    pub worksheet: String,
    /// 次巻が見つかった作品
    pub results: Vec<ReconciliationEntry>,
}

impl Session {
    const CURRENT_VERSION: u32 = 1;

    pub fn new(
        reference_date: NaiveDate,
        worksheet: impl Into<String>,
        results: Vec<ReconciliationEntry>,
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            reference_date,
            worksheet: worksheet.into(),
            results,
        }
    }

    /// 検索時のシートを指す設定
    pub fn sheet_settings(&self, sheet_path: &Path) -> SheetSettings {
        SheetSettings {
            path: sheet_path.to_path_buf(),
            worksheet: Some(self.worksheet.clone()),
        }
    }

    /// セッションファイルのパス
    pub fn session_path(folder: &Path) -> PathBuf {
        folder.join(SESSION_FILE_NAME)
    }

    /// セッションを読み込み（なければ `None`）
    pub fn load(folder: &Path) -> Result<Option<Self>> {
        let path = Self::session_path(folder);
        if !path.exists() {
            return Ok(None);
        }

        let reader = BufReader::new(File::open(&path)?);
        let session: Session = serde_json::from_reader(reader)?;
        if session.version != Self::CURRENT_VERSION {
            tracing::warn!(path = %path.display(), "セッションのバージョン不一致のため破棄");
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// セッションを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(Self::session_path(folder))?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// セッションを削除（削除した場合 `true`）
    pub fn clear(folder: &Path) -> Result<bool> {
        let path = Self::session_path(folder);
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// シートのパスからセッションの保存先フォルダを決める
pub fn session_folder(sheet_path: &Path) -> PathBuf {
    match sheet_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
