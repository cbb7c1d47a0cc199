//! 照合用タイトルの生成と一致判定

use crate::error::{Error, Result};

/// 照合用タイトル中で巻数に置き換えるトークン
pub const VOLUME_PLACEHOLDER: &str = "num";

/// 次の巻数を求める（空欄は0巻扱い）
pub fn next_volume(current_volume: &str) -> Result<u32> {
    let trimmed = current_volume.trim();
    if trimmed.is_empty() {
        return Ok(1);
    }

    let current = trimmed
        .parse::<u32>()
        .map_err(|_| Error::InvalidVolume(current_volume.to_string()))?;
    current
        .checked_add(1)
        .ok_or_else(|| Error::InvalidVolume(current_volume.to_string()))
}

/// 照合用タイトルの `num` をすべて巻数に置換
pub fn build_match_target(pattern: &str, next_volume: u32) -> String {
    pattern.replace(VOLUME_PLACEHOLDER, &next_volume.to_string())
}

/// カタログの書名が照合用タイトルを含むか（完全一致の部分文字列検索）
pub fn matches(catalog_title: &str, match_target: &str) -> bool {
    catalog_title.contains(match_target)
}
