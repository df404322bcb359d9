//! # FHI-aims geometry.in 解析器
//!
//! 周期性结构用三行 `lattice_vector` 给出晶格（单位 Å）：
//! ```text
//! lattice_vector  4.2266  0.0000  0.0000
//! lattice_vector  0.0000  4.2266  0.0000
//! lattice_vector  0.0000  0.0000  2.6888
//! atom_frac 0.0 0.0 0.0 Si
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/structure.rs`

use super::{parse_vector, read_file};
use crate::error::{KgridError, Result};
use crate::models::{Lattice, Structure};
use std::path::Path;

/// 解析 geometry.in 文件
pub fn parse_aims_file(path: &Path) -> Result<Structure> {
    let content = read_file(path)?;
    parse_aims_content(&content, "geometry", &path.display().to_string())
}

/// 从字符串内容解析 geometry.in 格式
pub fn parse_aims_content(content: &str, name: &str, source: &str) -> Result<Structure> {
    let parse_error = |reason: String| KgridError::ParseError {
        format: "aims".to_string(),
        path: source.to_string(),
        reason,
    };

    let mut vectors: Vec<[f64; 3]> = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        let Some(rest) = line.strip_prefix("lattice_vector") else {
            continue;
        };
        let vector = parse_vector(rest)
            .ok_or_else(|| parse_error(format!("Invalid lattice_vector at line {}", line_no + 1)))?;
        vectors.push(vector);
    }

    match vectors.as_slice() {
        [a, b, c] => {
            let lattice = Lattice::from_vectors([*a, *b, *c]);
            Ok(Structure::new(name, lattice).with_format("aims"))
        }
        [] => Err(parse_error(
            "No lattice_vector lines (non-periodic geometry)".to_string(),
        )),
        other => Err(parse_error(format!(
            "Expected 3 lattice_vector lines, found {}",
            other.len()
        ))),
    }
}
