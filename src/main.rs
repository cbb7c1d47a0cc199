use anyhow::Context;
use chrono::Local;
use clap::Parser;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use manga_check::{catalog, cli, config, export, reconcile, session, sheet};
use manga_check::error::CheckError;
use manga_check_common::ReconciliationEntry;
use cli::{Cli, Commands};
use config::{Config, SourceValues};
use session::Session;
use sheet::{SeriesSheet, XlsxSheet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;
    let overrides = SourceValues {
        application_id: cli.application_id.clone(),
        affiliate_id: None,
        sheet_path: cli.sheet.clone(),
        worksheet: cli.worksheet.clone(),
    };

    match cli.command {
        Commands::Sheet => {
            let sheet_settings = config::resolve_sheet(&overrides, &config)?;
            println!("「{}」を確認中...", sheet_settings.path.display());
            let workbook = XlsxSheet::open(&sheet_settings)?;
            println!("✅ 「{}」シートが見つかりました", workbook.name());
        }

        Commands::Show => {
            let sheet_settings = config::resolve_sheet(&overrides, &config)?;
            let workbook = XlsxSheet::open(&sheet_settings)?;
            let rows = workbook.rows()?;

            if rows.is_empty() {
                println!("⚠️ スプレッドシートにデータがありません");
                return Ok(());
            }

            let data_rows = if rows.len() > 1 { rows.len() - 1 } else { rows.len() };
            println!("✅ {}件のデータを取得しました\n", data_rows);
            println!("📊 スプレッドシートの内容（{}）", workbook.name());
            for row in &rows {
                println!("  {}", row.join(" | "));
            }
        }

        Commands::Run { today, update, yes } => {
            println!("📚 最新巻チェック\n");

            // 設定不備はシート・カタログに触れる前に止める
            let settings = config::resolve(&overrides, &config)?;
            let client = catalog::RakutenBooksClient::new(settings.catalog.clone())?;

            // 1. 作品一覧の取得
            println!("[1/3] 「{}」を取得中...", settings.sheet.path.display());
            let mut workbook = XlsxSheet::open(&settings.sheet)?;
            let parsed = sheet::load_series(&workbook)?;
            for warning in &parsed.warnings {
                println!("⚠️ {}", warning);
            }
            println!("✔ {}件の有効なデータを処理します\n", parsed.series.len());

            // 2. カタログ検索
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            println!("[2/3] 🔎 検索中...（基準日: {}）", today.format("%Y年%m月%d日"));
            let progress = ProgressBar::new(parsed.series.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("  {bar:40} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            let report = reconcile::run_reconciliation(&parsed.series, today, &client, |i, total, series| {
                progress.set_position((i - 1) as u64);
                progress.set_message(format!("検索中: {} ({}/{})", series.title, i, total));
            })
            .await;
            progress.finish_and_clear();

            for failure in &report.failures {
                println!("❌ {}", failure);
            }
            for skipped in &report.skipped_items {
                println!(
                    "⚠️ 「{}」: 発売日を解釈できない検索結果をスキップ（{} / {}）",
                    skipped.series_title, skipped.item.title, skipped.item.sales_date
                );
            }
            if report.has_failures() {
                println!("✔ 検索完了（{}件でエラー）\n", report.failures.len());
            } else {
                println!("✔ 検索完了\n");
            }

            // 3. 結果表示・保存
            println!("[3/3] 🔎 検索結果");
            print_results(&report.entries);

            let folder = session::session_folder(&settings.sheet.path);
            let current = Session::new(today, workbook.name(), report.entries);
            current.save(&folder)?;

            if update {
                write_back(&mut workbook, &current, yes)?;
            }

            println!("\n✅ 最新刊チェックが完了しました！");
        }

        Commands::Update { yes } => {
            let sheet_settings = config::resolve_sheet(&overrides, &config)?;
            let folder = session::session_folder(&sheet_settings.path);
            let current = Session::load(&folder)?.ok_or(CheckError::NoSession)?;

            // 書き戻し先は常に検索時のシート
            if let Some(requested) = sheet_settings.worksheet.as_deref() {
                if requested != current.worksheet {
                    println!(
                        "⚠️ 指定のシート「{}」ではなく検索時のシート「{}」に書き戻します",
                        requested, current.worksheet
                    );
                }
            }
            let mut workbook = XlsxSheet::open(&current.sheet_settings(&sheet_settings.path))?;
            write_back(&mut workbook, &current, yes)?;
        }

        Commands::Export { format, output, title } => {
            let sheet_settings = config::resolve_sheet(&overrides, &config)?;
            let folder = session::session_folder(&sheet_settings.path);
            let current = Session::load(&folder)?.ok_or(CheckError::NoSession)?;

            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            for path in export::export_results(&current.results, &format, &output_dir, &title)? {
                println!("✔ 出力: {}", path.display());
            }
            println!("\n✅ エクスポート完了（{}件）", current.results.len());
        }

        Commands::Clear => {
            let sheet_settings = config::resolve_sheet(&overrides, &config)?;
            let folder = session::session_folder(&sheet_settings.path);
            let path = Session::session_path(&folder);
            if Session::clear(&folder).context("検索結果の削除に失敗しました")? {
                println!("🗑️ 検索結果を削除しました: {}", path.display());
            } else {
                println!("保存された検索結果はありません");
            }
        }

        Commands::Config { set_application_id, set_affiliate_id, set_sheet, show } => {
            let mut config = config;
            let changed = set_application_id.is_some() || set_affiliate_id.is_some() || set_sheet.is_some();

            if let Some(id) = set_application_id {
                config.application_id = Some(id);
            }
            if let Some(id) = set_affiliate_id {
                config.affiliate_id = Some(id);
            }
            if let Some(path) = set_sheet {
                config.sheet_path = Some(path);
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let status = |set: bool| if set { "✅ 設定済み" } else { "❌ 未設定" };
                println!("設定:");
                println!("  楽天アプリID: {}", status(config.application_id.is_some()));
                println!("  楽天アフィリエイトID: {}", status(config.affiliate_id.is_some()));
                println!(
                    "  スプレッドシート: {}",
                    config
                        .sheet_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "❌ 未設定".into())
                );
                println!("  ワークシート: {}", config.worksheet.as_deref().unwrap_or("（先頭のシート）"));
                println!("  検索件数: {}", config.hits);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "manga_check=debug,manga_check_common=debug"
    } else {
        "manga_check=info,manga_check_common=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_results(entries: &[ReconciliationEntry]) {
    if entries.is_empty() {
        println!("⚠️ 条件に一致する最新刊は見つかりませんでした");
        return;
    }

    println!("  作品名 | 巻数 | 出版日 | ISBN");
    for entry in entries {
        let c = &entry.candidate;
        println!("  {} | {} | {} | {}", c.title, c.volume, c.sales_date, c.isbn);
    }
    println!("✅ {}件の最新刊が見つかりました！", entries.len());
}

/// 検索結果をシートに書き戻す（確認あり）
fn write_back(workbook: &mut XlsxSheet, current: &Session, yes: bool) -> anyhow::Result<()> {
    if current.results.is_empty() {
        println!("更新する必要のある巻数はありませんでした");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("📝 「{}」の巻数を更新しますか？", workbook.path().display()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("更新を中止しました");
            return Ok(());
        }
    }

    println!("スプレッドシートを更新中...");
    let parsed = sheet::load_series(&*workbook)?;
    let updates = sheet::apply_updates(workbook, &parsed.series, &current.results)?;

    for update in &updates {
        println!("更新: {}", update);
    }
    if updates.is_empty() {
        println!("更新する必要のある巻数はありませんでした");
    } else {
        println!("✅ {}件の巻数を更新しました", updates.len());
    }
    Ok(())
}
