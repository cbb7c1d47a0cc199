//! Excel出力
//!
//! 検索結果を1シートの表として書き出す（作品名 / 巻数 / 出版日 / ISBN）。

use crate::error::{CheckError, Result};
use manga_check_common::ReconciliationEntry;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// 結果表の見出し
pub const HEADERS: [&str; 5] = ["元タイトル", "作品名", "巻数", "出版日", "ISBN"];

pub fn generate_excel(entries: &[ReconciliationEntry], output_path: &Path, title: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(title)).map_err(excel_error)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_error)?;
    }

    for (i, entry) in entries.iter().enumerate() {
        let row = (i + 1) as u32;
        let c = &entry.candidate;
        worksheet.write_string(row, 0, &entry.original_title).map_err(excel_error)?;
        worksheet.write_string(row, 1, &c.title).map_err(excel_error)?;
        worksheet.write_string(row, 2, &c.volume).map_err(excel_error)?;
        worksheet.write_string(row, 3, &c.sales_date).map_err(excel_error)?;
        // ISBNは先頭の0を保つため文字列で書く
        worksheet.write_string(row, 4, &c.isbn).map_err(excel_error)?;
    }

    worksheet.set_column_width(0, 24).map_err(excel_error)?;
    worksheet.set_column_width(1, 48).map_err(excel_error)?;
    worksheet.set_column_width(3, 18).map_err(excel_error)?;
    worksheet.set_column_width(4, 16).map_err(excel_error)?;

    workbook
        .save(output_path)
        .map_err(|e| CheckError::Export(format!("{}: {}", output_path.display(), e)))?;
    Ok(())
}

/// Excelのシート名制約（31文字・一部記号不可）に合わせる
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "結果".to_string()
    } else {
        cleaned
    }
}

fn excel_error(e: rust_xlsxwriter::XlsxError) -> CheckError {
    CheckError::Export(e.to_string())
}
