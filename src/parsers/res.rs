//! # AIRSS .res 格式解析器
//!
//! 从 AIRSS / SHELX .res 文件中读取晶格。
//!
//! ## .res 格式说明
//! ```text
//! TITL name P V E H 0 0 n (sym)
//! CELL 1.0 a b c alpha beta gamma
//! LATT -1
//! SFAC Element1 Element2 ...
//! ...
//! END
//! ```
//! CELL 行第一个数是波长，与晶格无关。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/structure.rs`

use super::read_file;
use crate::error::{KgridError, Result};
use crate::models::{Lattice, Structure};
use std::path::Path;

/// 解析 .res 文件
pub fn parse_res_file(path: &Path) -> Result<Structure> {
    let content = read_file(path)?;
    let default_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    parse_res_content(&content, default_name, &path.display().to_string())
}

/// 从字符串内容解析 .res 格式
pub fn parse_res_content(content: &str, default_name: &str, source: &str) -> Result<Structure> {
    let parse_error = |reason: String| KgridError::ParseError {
        format: "res".to_string(),
        path: source.to_string(),
        reason,
    };

    let mut name = default_name.to_string();
    let mut lattice: Option<Lattice> = None;

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            continue;
        };

        match keyword.to_uppercase().as_str() {
            "TITL" => {
                if let Some(title) = parts.get(1) {
                    name = title.to_string();
                }
            }
            "CELL" => {
                // CELL wavelength a b c alpha beta gamma
                if parts.len() < 8 {
                    return Err(parse_error(format!("Incomplete CELL line: '{}'", line.trim())));
                }
                let params = parts[2..8]
                    .iter()
                    .map(|s| s.parse::<f64>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|_| parse_error(format!("Invalid CELL line: '{}'", line.trim())))?;
                lattice = Some(Lattice::from_parameters(
                    params[0], params[1], params[2], params[3], params[4], params[5],
                ));
            }
            "END" => break,
            _ => {}
        }
    }

    let lattice = lattice.ok_or_else(|| parse_error("Missing CELL line".to_string()))?;

    Ok(Structure::new(name, lattice).with_format("res"))
}
