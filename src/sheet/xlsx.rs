//! .xlsx ファイルの作品一覧シート

use super::SeriesSheet;
use crate::config::SheetSettings;
use crate::error::{CheckError, Result};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use manga_check_common::CellUpdate;
use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet, XlsxError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct XlsxSheet {
    path: PathBuf,
    worksheet: String,
}

impl XlsxSheet {
    /// ワークブックを開き、対象シートの存在を確認する
    ///
    /// シート名の指定がなければ先頭のシートを使う。
    pub fn open(settings: &SheetSettings) -> Result<Self> {
        if !settings.path.exists() {
            return Err(CheckError::SheetNotFound(settings.path.display().to_string()));
        }

        let workbook = open_workbook_auto(&settings.path)
            .map_err(|e| CheckError::SheetRead(format!("{}: {}", settings.path.display(), e)))?;
        let names = workbook.sheet_names();

        let worksheet = match &settings.worksheet {
            Some(name) if names.iter().any(|n| n == name) => name.clone(),
            Some(name) => {
                return Err(CheckError::SheetNotFound(format!(
                    "{} (シート「{}」)",
                    settings.path.display(),
                    name
                )))
            }
            None => names
                .first()
                .cloned()
                .ok_or_else(|| CheckError::SheetRead("ワークシートがありません".into()))?,
        };

        Ok(Self {
            path: settings.path.clone(),
            worksheet,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 全シートの内容を読み込む（書き戻し時に他のシートを残すため）
    fn read_all_sheets(&self) -> Result<Vec<SheetContent>> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| CheckError::SheetRead(format!("{}: {}", self.path.display(), e)))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| CheckError::SheetRead(format!("{}: {}", name, e)))?;
            let formulas = match workbook.worksheet_formula(&name) {
                Ok(formulas) => formula_map(&formulas),
                Err(e) => {
                    tracing::debug!(sheet = %name, error = %e, "数式を読み込めないため値のみ書き戻す");
                    HashMap::new()
                }
            };
            sheets.push(SheetContent {
                cells: range_to_grid(&range),
                formulas,
                name,
            });
        }
        Ok(sheets)
    }
}

impl SeriesSheet for XlsxSheet {
    fn name(&self) -> &str {
        &self.worksheet
    }

    fn rows(&self) -> Result<Vec<Vec<String>>> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| CheckError::SheetRead(format!("{}: {}", self.path.display(), e)))?;
        let range = workbook
            .worksheet_range(&self.worksheet)
            .map_err(|e| CheckError::SheetRead(format!("{}: {}", self.worksheet, e)))?;
        Ok(range_to_grid(&range)
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    fn write_cells(&mut self, updates: &[CellUpdate]) -> Result<()> {
        let mut sheets = self.read_all_sheets()?;

        let target = sheets
            .iter_mut()
            .find(|sheet| sheet.name == self.worksheet)
            .ok_or_else(|| CheckError::SheetNotFound(self.worksheet.clone()))?;
        for update in updates {
            target.set_value(update.row - 1, update.column - 1, &update.new_value);
        }

        write_workbook(&self.path, &sheets)
    }
}

/// 1シート分のセル値と数式（位置はA1起点の0始まり）
struct SheetContent {
    name: String,
    cells: Vec<Vec<Data>>,
    formulas: HashMap<(usize, usize), String>,
}

impl SheetContent {
    /// セルを書き換える（数式は値で置き換わる）
    fn set_value(&mut self, row: usize, col: usize, value: &str) {
        if self.cells.len() <= row {
            self.cells.resize(row + 1, Vec::new());
        }
        let cells = &mut self.cells[row];
        if cells.len() <= col {
            cells.resize(col + 1, Data::Empty);
        }
        cells[col] = value_cell(value);
        self.formulas.remove(&(row, col));
    }
}

/// セル範囲をA1起点のグリッドに変換
///
/// 範囲の開始位置がA1でない場合は先頭を空セルで埋める。
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut grid: Vec<Vec<Data>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let cells: Vec<Data> = std::iter::repeat(Data::Empty)
            .take(start_col as usize)
            .chain(row.iter().cloned())
            .collect();
        grid.push(cells);
    }
    grid
}

fn formula_map(range: &Range<String>) -> HashMap<(usize, usize), String> {
    let Some((start_row, start_col)) = range.start() else {
        return HashMap::new();
    };

    range
        .used_cells()
        .filter(|(_, _, formula)| !formula.is_empty())
        .map(|(r, c, formula)| {
            ((start_row as usize + r, start_col as usize + c), formula.clone())
        })
        .collect()
}

/// セルの表示文字列（整数値の数値セルは小数点なし）
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// 書き込む文字列をセル値にする（整数として読める値は数値セル）
fn value_cell(value: &str) -> Data {
    match integer_cell(value) {
        Some(n) => Data::Float(n as f64),
        None if value.is_empty() => Data::Empty,
        None => Data::String(value.to_string()),
    }
}

fn date_format(datetime: &ExcelDateTime) -> &'static str {
    let serial = datetime.as_f64();
    if datetime.is_duration() {
        "[h]:mm:ss"
    } else if serial.fract() == 0.0 {
        "yyyy/mm/dd"
    } else if serial < 1.0 {
        "hh:mm:ss"
    } else {
        "yyyy/mm/dd hh:mm:ss"
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Data,
) -> std::result::Result<(), XlsxError> {
    match cell {
        Data::Empty => Ok(()),
        Data::Int(i) => worksheet.write_number(row, col, *i as f64).map(|_| ()),
        Data::Float(f) => worksheet.write_number(row, col, *f).map(|_| ()),
        Data::Bool(b) => worksheet.write_boolean(row, col, *b).map(|_| ()),
        Data::DateTime(datetime) => {
            let format = Format::new().set_num_format(date_format(datetime));
            worksheet
                .write_number_with_format(row, col, datetime.as_f64(), &format)
                .map(|_| ())
        }
        Data::String(s) => worksheet.write_string(row, col, s).map(|_| ()),
        other => worksheet.write_string(row, col, other.to_string()).map(|_| ()),
    }
}

/// セル値と数式からワークブックを書き出す
///
/// 数式のセルは数式のまま、読み込んだ値を計算結果として残す。
fn write_workbook(path: &Path, sheets: &[SheetContent]) -> Result<()> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| CheckError::SheetWrite(format!("シート名エラー: {}", e)))?;

        for (r, row) in sheet.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if sheet.formulas.contains_key(&(r, c)) {
                    continue;
                }
                write_cell(worksheet, r as u32, c as u16, cell)
                    .map_err(|e| CheckError::SheetWrite(format!("セル書き込みエラー: {}", e)))?;
            }
        }

        for (&(r, c), formula) in &sheet.formulas {
            let cached = sheet
                .cells
                .get(r)
                .and_then(|row| row.get(c))
                .map(cell_to_string)
                .unwrap_or_default();
            worksheet
                .write_formula(r as u32, c as u16, Formula::new(formula).set_result(cached))
                .map_err(|e| CheckError::SheetWrite(format!("数式書き込みエラー: {}", e)))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| CheckError::SheetWrite(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

fn integer_cell(value: &str) -> Option<i64> {
    let digits_only = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());
    let no_leading_zero = value == "0" || !value.starts_with('0');
    if digits_only && no_leading_zero && value.len() <= 15 {
        value.parse().ok()
    } else {
        None
    }
}

/// ワークブックを新規作成する（1シート）
///
/// 整数として読める値は数値セル、それ以外は文字列セルにする。
pub fn create_workbook(path: &Path, worksheet: &str, rows: &[Vec<String>]) -> Result<()> {
    let sheet = SheetContent {
        name: worksheet.to_string(),
        cells: rows
            .iter()
            .map(|row| row.iter().map(|value| value_cell(value)).collect())
            .collect(),
        formulas: HashMap::new(),
    };
    write_workbook(path, &[sheet])
}
