//! # VASP POSCAR 格式解析器
//!
//! 解析 VASP POSCAR/CONTCAR 文件的晶格部分。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor（负数表示目标体积，三个数表示分量缩放）
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # 以下内容与 k 点网格无关，不解析
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/structure.rs`

use super::{parse_vector, read_file};
use crate::error::{KgridError, Result};
use crate::models::{Lattice, Structure};
use std::path::Path;

/// 解析 POSCAR/CONTCAR 文件
pub fn parse_poscar_file(path: &Path) -> Result<Structure> {
    let content = read_file(path)?;
    parse_poscar_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 POSCAR 格式
pub fn parse_poscar_content(content: &str, source: &str) -> Result<Structure> {
    let parse_error = |reason: String| KgridError::ParseError {
        format: "poscar".to_string(),
        path: source.to_string(),
        reason,
    };

    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 5 {
        return Err(parse_error("File too short".to_string()));
    }

    // Line 0: Comment/name
    let name = lines[0].trim().to_string();

    // Line 1: Scaling factor(s)
    let scale: Vec<f64> = lines[1]
        .split_whitespace()
        .take_while(|s| !s.starts_with('#') && !s.starts_with('!'))
        .map(|s| s.parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| parse_error(format!("Invalid scaling factor: '{}'", lines[1].trim())))?;

    // Lines 2-4: Lattice vectors
    let mut matrix = [[0.0; 3]; 3];
    for (i, row) in matrix.iter_mut().enumerate() {
        *row = parse_vector(lines[2 + i])
            .ok_or_else(|| parse_error(format!("Invalid lattice vector at line {}", 3 + i)))?;
    }
    let unscaled = Lattice::from_vectors(matrix);

    let lattice = match scale.as_slice() {
        [s] if *s > 0.0 => unscaled.scaled(*s),
        [s] if *s < 0.0 => {
            // 负缩放因子：晶胞缩放到 |s| 的体积
            let volume = unscaled.volume().abs();
            if volume == 0.0 {
                return Err(parse_error("Cannot rescale a zero-volume cell".to_string()));
            }
            unscaled.scaled((s.abs() / volume).cbrt())
        }
        [sx, sy, sz] if *sx > 0.0 && *sy > 0.0 && *sz > 0.0 => {
            let mut matrix = unscaled.matrix;
            for row in matrix.iter_mut() {
                row[0] *= sx;
                row[1] *= sy;
                row[2] *= sz;
            }
            Lattice::from_vectors(matrix)
        }
        _ => {
            return Err(parse_error(format!(
                "Invalid scaling factor: '{}'",
                lines[1].trim()
            )))
        }
    };

    Ok(Structure::new(name, lattice).with_format("poscar"))
}
