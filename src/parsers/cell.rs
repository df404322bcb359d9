//! # CASTEP .cell 格式解析器
//!
//! 解析 CASTEP 输入文件 .cell 中的晶格块。
//!
//! ## .cell 格式说明
//! ```text
//! %BLOCK LATTICE_CART
//! ang
//! a1 a2 a3
//! b1 b2 b3
//! c1 c2 c3
//! %ENDBLOCK LATTICE_CART
//! ```
//! 或
//! ```text
//! %BLOCK LATTICE_ABC
//! a b c
//! alpha beta gamma
//! %ENDBLOCK LATTICE_ABC
//! ```
//! 块名与单位不区分大小写，`#` / `!` 开头为注释。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/structure.rs`
//! - 使用 `regex` 定位块

use super::{parse_vector, read_file};
use crate::error::{KgridError, Result};
use crate::models::{Lattice, Structure};

use regex::Regex;
use std::path::Path;

const BOHR_TO_ANGSTROM: f64 = 0.529_177_210_903;

/// 解析 .cell 文件
pub fn parse_cell_file(path: &Path) -> Result<Structure> {
    let content = read_file(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    parse_cell_content(&content, name, &path.display().to_string())
}

/// 从字符串内容解析 .cell 格式
pub fn parse_cell_content(content: &str, name: &str, source: &str) -> Result<Structure> {
    let parse_error = |reason: &str| KgridError::ParseError {
        format: "cell".to_string(),
        path: source.to_string(),
        reason: reason.to_string(),
    };

    let lattice = if let Some(block) = find_block(content, "LATTICE_CART") {
        parse_lattice_cart(&block).map_err(|r| parse_error(&r))?
    } else if let Some(block) = find_block(content, "LATTICE_ABC") {
        parse_lattice_abc(&block).map_err(|r| parse_error(&r))?
    } else {
        return Err(parse_error("Missing LATTICE_CART or LATTICE_ABC block"));
    };

    Ok(Structure::new(name, lattice).with_format("cell"))
}

/// 取出 %BLOCK name ... %ENDBLOCK name 之间的有效行（去掉空行与注释）
fn find_block<'a>(content: &'a str, block_name: &str) -> Option<Vec<&'a str>> {
    let start = Regex::new(&format!(r"(?im)^\s*%BLOCK\s+{}\b", block_name)).ok()?;
    let end = Regex::new(r"(?i)^\s*%ENDBLOCK").ok()?;

    let offset = start.find(content)?.end();
    let lines = content[offset..]
        .lines()
        .skip(1)
        .take_while(|line| !end.is_match(line))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .collect();

    Some(lines)
}

/// 单位行换算为 Å 的因子
fn unit_factor(line: &str) -> Option<f64> {
    match line.to_lowercase().as_str() {
        "ang" | "angstrom" => Some(1.0),
        "bohr" | "a0" => Some(BOHR_TO_ANGSTROM),
        "nm" => Some(10.0),
        "m" => Some(1e10),
        "cm" => Some(1e8),
        _ => None,
    }
}

/// 拆出可选的单位行
fn split_units<'a, 'b>(block: &'b [&'a str]) -> (f64, &'b [&'a str]) {
    match block.first().and_then(|first| unit_factor(first)) {
        Some(factor) => (factor, &block[1..]),
        None => (1.0, block),
    }
}

/// 解析 LATTICE_CART 块
fn parse_lattice_cart(block: &[&str]) -> std::result::Result<Lattice, String> {
    let (factor, rows) = split_units(block);
    if rows.len() < 3 {
        return Err("Incomplete LATTICE_CART block".to_string());
    }

    let mut matrix = [[0.0; 3]; 3];
    for (i, row) in matrix.iter_mut().enumerate() {
        *row = parse_vector(rows[i])
            .ok_or_else(|| format!("Invalid LATTICE_CART row: '{}'", rows[i]))?;
    }

    Ok(Lattice::from_vectors(matrix).scaled(factor))
}

/// 解析 LATTICE_ABC 块
fn parse_lattice_abc(block: &[&str]) -> std::result::Result<Lattice, String> {
    let (factor, rows) = split_units(block);
    if rows.len() < 2 {
        return Err("Incomplete LATTICE_ABC block (need a b c alpha beta gamma)".to_string());
    }

    let lengths = parse_vector(rows[0])
        .ok_or_else(|| format!("Invalid LATTICE_ABC lengths: '{}'", rows[0]))?;
    let angles = parse_vector(rows[1])
        .ok_or_else(|| format!("Invalid LATTICE_ABC angles: '{}'", rows[1]))?;

    Ok(Lattice::from_parameters(
        lengths[0] * factor,
        lengths[1] * factor,
        lengths[2] * factor,
        angles[0],
        angles[1],
        angles[2],
    ))
}
