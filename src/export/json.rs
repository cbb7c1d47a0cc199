//! JSON出力

use crate::error::Result;
use manga_check_common::ReconciliationEntry;
use std::path::Path;

pub fn generate_json(entries: &[ReconciliationEntry], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(output_path, json)?;
    Ok(())
}
