//! 発売日判定
//!
//! カタログの発売日文字列は2種類の粒度で届く:
//! - 日付あり: 「2026年04月30日」「2026年4月30日頃」
//! - 月まで: 「2026年05月」「2026年05月下旬」
//!
//! 月までの表記は日が不明なため月単位でのみ比較し、
//! 同じ月は「発売済み」と判定しない。

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;

lazy_static::lazy_static! {
    // 先頭一致（後続の「頃」「下旬」などは無視）
    static ref FULL_DATE_RE: Regex = Regex::new(r"^([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日").unwrap();
    static ref MONTH_ONLY_RE: Regex = Regex::new(r"^([0-9]{4})年([0-9]{1,2})月").unwrap();
}

/// 解釈済みの発売日
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDate {
    /// 日付まで判明
    Day(NaiveDate),
    /// 年月のみ判明
    Month { year: i32, month: u32 },
}

impl ReleaseDate {
    /// 発売日文字列を解釈する
    ///
    /// どちらの形式にも一致しない場合や、存在しない日付の場合は
    /// `Error::DateFormat` を返す。
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some(caps) = FULL_DATE_RE.captures(raw) {
            let year = caps[1].parse::<i32>().map_err(|_| date_error(raw))?;
            let month = caps[2].parse::<u32>().map_err(|_| date_error(raw))?;
            let day = caps[3].parse::<u32>().map_err(|_| date_error(raw))?;
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| date_error(raw))?;
            return Ok(ReleaseDate::Day(date));
        }

        if let Some(caps) = MONTH_ONLY_RE.captures(raw) {
            let year = caps[1].parse::<i32>().map_err(|_| date_error(raw))?;
            let month = caps[2].parse::<u32>().map_err(|_| date_error(raw))?;
            if !(1..=12).contains(&month) {
                return Err(date_error(raw));
            }
            return Ok(ReleaseDate::Month { year, month });
        }

        Err(date_error(raw))
    }

    /// 基準日より前に発売済みか
    ///
    /// 日付ありは基準日と厳密比較（同日は未発売扱い）、
    /// 月までの表記は `年*100+月` で比較する。
    pub fn is_before(&self, today: NaiveDate) -> bool {
        match *self {
            ReleaseDate::Day(date) => date < today,
            ReleaseDate::Month { year, month } => {
                let target = year * 100 + month as i32;
                let reference = today.year() * 100 + today.month() as i32;
                target < reference
            }
        }
    }
}

/// 発売日が基準日より前か判定
pub fn is_past(date_str: &str, today: NaiveDate) -> Result<bool> {
    Ok(ReleaseDate::parse(date_str)?.is_before(today))
}

fn date_error(raw: &str) -> Error {
    Error::DateFormat(raw.to_string())
}
