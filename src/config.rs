//! 設定の読み込み
//!
//! 必須項目（楽天アプリID・スプレッドシート）は複数の設定元を順に試し、
//! すべて揃った最初の設定元を採用する:
//! 1. 環境変数
//! 2. 設定ファイル（~/.config/manga-check/config.json）
//!
//! コマンドライン引数は各設定元の上に重ねて評価する。

use crate::error::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://app.rakuten.co.jp/services/api/BooksBook/Search/20170404";

pub const ENV_APPLICATION_ID: &str = "MANGA_CHECK_APPLICATION_ID";
pub const ENV_AFFILIATE_ID: &str = "MANGA_CHECK_AFFILIATE_ID";
pub const ENV_SHEET: &str = "MANGA_CHECK_SHEET";
pub const ENV_WORKSHEET: &str = "MANGA_CHECK_WORKSHEET";

/// 設定ファイルの内容
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub application_id: Option<String>,
    pub affiliate_id: Option<String>,
    pub sheet_path: Option<PathBuf>,
    pub worksheet: Option<String>,
    pub endpoint: String,
    pub hits: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application_id: None,
            affiliate_id: None,
            sheet_path: None,
            worksheet: None,
            endpoint: DEFAULT_ENDPOINT.into(),
            hits: 30,
            timeout_seconds: 15,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CheckError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("manga-check").join("config.json"))
    }

    fn as_source(&self) -> SourceValues {
        SourceValues {
            application_id: self.application_id.clone(),
            affiliate_id: self.affiliate_id.clone(),
            sheet_path: self.sheet_path.clone(),
            worksheet: self.worksheet.clone(),
        }
    }
}

/// 1つの設定元から得られた値（欠けていてもよい）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceValues {
    pub application_id: Option<String>,
    pub affiliate_id: Option<String>,
    pub sheet_path: Option<PathBuf>,
    pub worksheet: Option<String>,
}

impl SourceValues {
    /// 環境変数から読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            application_id: get(ENV_APPLICATION_ID),
            affiliate_id: get(ENV_AFFILIATE_ID),
            sheet_path: get(ENV_SHEET).map(PathBuf::from),
            worksheet: get(ENV_WORKSHEET),
        }
    }

    /// `self` の値を優先し、欠けている項目を `fallback` で埋める
    fn overlay(&self, fallback: &SourceValues) -> SourceValues {
        SourceValues {
            application_id: self.application_id.clone().or_else(|| fallback.application_id.clone()),
            affiliate_id: self.affiliate_id.clone().or_else(|| fallback.affiliate_id.clone()),
            sheet_path: self.sheet_path.clone().or_else(|| fallback.sheet_path.clone()),
            worksheet: self.worksheet.clone().or_else(|| fallback.worksheet.clone()),
        }
    }
}

/// 名前付きの設定元
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub name: &'static str,
    pub values: SourceValues,
}

/// カタログAPIの接続設定
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub application_id: String,
    pub affiliate_id: Option<String>,
    pub endpoint: String,
    pub hits: u32,
    pub timeout_seconds: u64,
}

/// 作品一覧シートの場所
#[derive(Debug, Clone)]
pub struct SheetSettings {
    pub path: PathBuf,
    pub worksheet: Option<String>,
}

/// 実行に必要な設定一式
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub sheet: SheetSettings,
}

/// 既定の設定元（環境変数 → 設定ファイル）
pub fn default_sources(config: &Config) -> Vec<ConfigSource> {
    vec![
        ConfigSource { name: "環境変数", values: SourceValues::from_env() },
        ConfigSource { name: "設定ファイル", values: config.as_source() },
    ]
}

/// コマンドライン引数・環境変数・設定ファイルから設定を確定する
pub fn resolve(overrides: &SourceValues, config: &Config) -> Result<Settings> {
    resolve_with(overrides, &default_sources(config), config)
}

/// シートの場所だけを確定する（カタログ検索を行わないコマンド用）
pub fn resolve_sheet(overrides: &SourceValues, config: &Config) -> Result<SheetSettings> {
    resolve_sheet_with(overrides, &default_sources(config))
}

pub fn resolve_sheet_with(overrides: &SourceValues, sources: &[ConfigSource]) -> Result<SheetSettings> {
    sources
        .iter()
        .map(|source| overrides.overlay(&source.values))
        .find_map(|values| {
            values.sheet_path.map(|path| SheetSettings {
                path,
                worksheet: values.worksheet,
            })
        })
        .ok_or(CheckError::MissingCredential("スプレッドシートのパス"))
}

/// 設定元を順に試し、必須項目が揃った最初のものを採用する
pub fn resolve_with(
    overrides: &SourceValues,
    sources: &[ConfigSource],
    config: &Config,
) -> Result<Settings> {
    for source in sources {
        let values = overrides.overlay(&source.values);
        let (Some(application_id), Some(path)) = (values.application_id, values.sheet_path) else {
            tracing::debug!(source = source.name, "必須項目が揃っていない設定元をスキップ");
            continue;
        };

        tracing::debug!(source = source.name, "設定元を採用");
        return Ok(Settings {
            catalog: CatalogSettings {
                application_id,
                affiliate_id: values.affiliate_id,
                endpoint: config.endpoint.clone(),
                hits: config.hits,
                timeout_seconds: config.timeout_seconds,
            },
            sheet: SheetSettings {
                path,
                worksheet: values.worksheet,
            },
        });
    }

    let has_application_id = overrides.application_id.is_some()
        || sources.iter().any(|s| s.values.application_id.is_some());
    if has_application_id {
        Err(CheckError::MissingCredential("スプレッドシートのパス"))
    } else {
        Err(CheckError::MissingCredential("楽天アプリID"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(app: Option<&str>, sheet: Option<&str>) -> SourceValues {
        SourceValues {
            application_id: app.map(String::from),
            sheet_path: sheet.map(PathBuf::from),
            ..Default::default()
        }
    }

    fn sources(env: SourceValues, file: SourceValues) -> Vec<ConfigSource> {
        vec![
            ConfigSource { name: "環境変数", values: env },
            ConfigSource { name: "設定ファイル", values: file },
        ]
    }

    #[test]
    fn test_first_complete_source_wins() {
        let env = SourceValues {
            affiliate_id: Some("aff-env".into()),
            ..values(Some("env-id"), Some("env.xlsx"))
        };
        let file = values(Some("file-id"), Some("file.xlsx"));

        let settings = resolve_with(&SourceValues::default(), &sources(env, file), &Config::default()).unwrap();
        assert_eq!(settings.catalog.application_id, "env-id");
        assert_eq!(settings.catalog.affiliate_id.as_deref(), Some("aff-env"));
        assert_eq!(settings.sheet.path, PathBuf::from("env.xlsx"));
    }

    #[test]
    fn test_incomplete_source_is_not_mixed_with_next() {
        let env = values(Some("env-id"), None);
        let file = values(Some("file-id"), Some("file.xlsx"));

        let settings = resolve_with(&SourceValues::default(), &sources(env, file), &Config::default()).unwrap();
        assert_eq!(settings.catalog.application_id, "file-id");
        assert_eq!(settings.sheet.path, PathBuf::from("file.xlsx"));
    }

    #[test]
    fn test_overrides_complete_a_source() {
        let env = values(Some("env-id"), None);
        let overrides = values(None, Some("cli.xlsx"));

        let settings = resolve_with(&overrides, &sources(env, SourceValues::default()), &Config::default()).unwrap();
        assert_eq!(settings.catalog.application_id, "env-id");
        assert_eq!(settings.sheet.path, PathBuf::from("cli.xlsx"));
    }

    #[test]
    fn test_missing_application_id() {
        let err = resolve_with(
            &SourceValues::default(),
            &sources(values(None, Some("a.xlsx")), SourceValues::default()),
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CheckError::MissingCredential("楽天アプリID")));
    }

    #[test]
    fn test_missing_sheet_path() {
        let err = resolve_with(
            &SourceValues::default(),
            &sources(values(Some("id"), None), SourceValues::default()),
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CheckError::MissingCredential("スプレッドシートのパス")));
    }

    #[test]
    fn test_tunables_come_from_config() {
        let config = Config {
            hits: 10,
            timeout_seconds: 3,
            ..Config::default()
        };
        let settings = resolve_with(
            &values(Some("id"), Some("a.xlsx")),
            &[],
            &config,
        );
        // 設定元が1つもない場合は引数だけでは採用されない
        assert!(settings.is_err());

        let settings = resolve_with(
            &values(Some("id"), Some("a.xlsx")),
            &sources(SourceValues::default(), SourceValues::default()),
            &config,
        )
        .unwrap();
        assert_eq!(settings.catalog.hits, 10);
        assert_eq!(settings.catalog.timeout_seconds, 3);
        assert_eq!(settings.catalog.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_resolve_sheet_without_application_id() {
        let file = SourceValues {
            worksheet: Some("作品一覧".into()),
            ..values(None, Some("file.xlsx"))
        };
        let sheet = resolve_sheet_with(&SourceValues::default(), &sources(SourceValues::default(), file)).unwrap();
        assert_eq!(sheet.path, PathBuf::from("file.xlsx"));
        assert_eq!(sheet.worksheet.as_deref(), Some("作品一覧"));

        let err = resolve_sheet_with(&SourceValues::default(), &[]).unwrap_err();
        assert!(matches!(err, CheckError::MissingCredential(_)));
    }

    #[test]
    fn test_from_lookup_ignores_blank_values() {
        let values = SourceValues::from_lookup(|key| match key {
            ENV_APPLICATION_ID => Some("id".to_string()),
            ENV_SHEET => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(values.application_id.as_deref(), Some("id"));
        assert!(values.sheet_path.is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            application_id: Some("app".into()),
            sheet_path: Some(PathBuf::from("作品一覧.xlsx")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.application_id.as_deref(), Some("app"));
        assert_eq!(loaded.sheet_path, Some(PathBuf::from("作品一覧.xlsx")));
        assert_eq!(loaded.hits, 30);
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert!(loaded.application_id.is_none());
        assert_eq!(loaded.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(loaded.timeout_seconds, 15);
    }
}
