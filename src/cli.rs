use clap::{Parser, Subcommand};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "manga-check")]
#[command(about = "作品一覧と書籍カタログを照合する最新巻チェックツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 作品一覧スプレッドシート（.xlsx）
    #[arg(long, global = true)]
    pub sheet: Option<PathBuf>,

    /// 対象のワークシート名（省略時は先頭のシート）
    #[arg(long, global = true)]
    pub worksheet: Option<String>,

    /// 楽天アプリID
    #[arg(long, global = true)]
    pub application_id: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 作品一覧シートが開けるか確認
    Sheet,

    /// 作品一覧シートの内容を表示
    Show,

    /// 最新刊チェックを実行
    Run {
        /// 判定の基準日（YYYY-MM-DD、省略時は今日）
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// 検出した巻数をシートに書き戻す
        #[arg(short, long)]
        update: bool,

        /// 書き戻しの確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 直近の検索結果をシートに書き戻す
    Update {
        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 直近の検索結果をファイルに出力
    Export {
        /// 出力形式 (xlsx/json/both)
        #[arg(short, long, default_value = "xlsx")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ファイル名・シート名
        #[arg(short, long, default_value = "最新巻チェック")]
        title: String,
    },

    /// 直近の検索結果を削除
    Clear,

    /// 設定を表示/編集
    Config {
        /// 楽天アプリIDを設定
        #[arg(long)]
        set_application_id: Option<String>,

        /// 楽天アフィリエイトIDを設定
        #[arg(long)]
        set_affiliate_id: Option<String>,

        /// 作品一覧スプレッドシートのパスを設定
        #[arg(long)]
        set_sheet: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Json,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "json" => Ok(ExportFormat::Json),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use xlsx, json, or both", s)),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("日付はYYYY-MM-DD形式で指定してください: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!("Excel".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("both".parse::<ExportFormat>().unwrap(), ExportFormat::Both);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_parse_run_with_today() {
        let cli = Cli::try_parse_from(["manga-check", "run", "--today", "2026-05-01", "--update", "-y"]).unwrap();
        match cli.command {
            Commands::Run { today, update, yes } => {
                assert_eq!(today, NaiveDate::from_ymd_opt(2026, 5, 1));
                assert!(update);
                assert!(yes);
            }
            _ => panic!("runコマンドとして解釈されていない"),
        }
    }

    #[test]
    fn test_parse_invalid_today() {
        assert!(Cli::try_parse_from(["manga-check", "run", "--today", "2026/05/01"]).is_err());
    }

    #[test]
    fn test_global_sheet_option() {
        let cli = Cli::try_parse_from(["manga-check", "show", "--sheet", "作品一覧.xlsx"]).unwrap();
        assert_eq!(cli.sheet, Some(PathBuf::from("作品一覧.xlsx")));
        assert!(matches!(cli.command, Commands::Show));
    }
}
