pub mod excel;
pub mod json;

use crate::cli::ExportFormat;
use crate::error::Result;
use manga_check_common::ReconciliationEntry;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let excel_path = output.join(format!("{}.xlsx", title));
        let json_path = output.join(format!("{}.json", title));
        (excel_path, json_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        let excel_path = parent.join(format!("{}.xlsx", stem));
        let json_path = parent.join(format!("{}.json", stem));
        (excel_path, json_path)
    }
}

/// 検索結果を書き出し、作成したファイルのパスを返す
pub fn export_results(
    entries: &[ReconciliationEntry],
    format: &ExportFormat,
    output_dir: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    let written = match format {
        ExportFormat::Xlsx => {
            let output_path = output_path_for_format(output_dir, title, "xlsx");
            excel::generate_excel(entries, &output_path, title)?;
            vec![output_path]
        }
        ExportFormat::Json => {
            let output_path = output_path_for_format(output_dir, title, "json");
            json::generate_json(entries, &output_path)?;
            vec![output_path]
        }
        ExportFormat::Both => {
            let (excel_path, json_path) = output_paths_for_both(output_dir, title);
            excel::generate_excel(entries, &excel_path, title)?;
            json::generate_json(entries, &json_path)?;
            vec![excel_path, json_path]
        }
    };

    for path in &written {
        tracing::info!(path = %path.display(), "エクスポート");
    }
    Ok(written)
}
