//! # 解析器模块
//!
//! 从各种结构文件中读取晶格向量。k 点网格只需要晶格，原子信息一律跳过。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: poscar, cell, res, aims

pub mod aims;
pub mod cell;
pub mod poscar;
pub mod res;

use crate::error::{KgridError, Result};
use crate::models::Structure;

use clap::ValueEnum;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 支持的结构文件格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StructureFormat {
    /// VASP POSCAR/CONTCAR
    #[value(alias = "poscar")]
    Vasp,
    /// CASTEP .cell
    #[value(alias = "cell")]
    Castep,
    /// AIRSS/SHELX .res
    Res,
    /// FHI-aims geometry.in
    Aims,
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureFormat::Vasp => write!(f, "vasp"),
            StructureFormat::Castep => write!(f, "castep"),
            StructureFormat::Res => write!(f, "res"),
            StructureFormat::Aims => write!(f, "aims"),
        }
    }
}

/// 读取结构文件；未指定格式时按文件名和内容推断
pub fn read_structure(path: &Path, format: Option<StructureFormat>) -> Result<Structure> {
    let format = match format {
        Some(format) => format,
        None => detect_format(path)?,
    };

    match format {
        StructureFormat::Vasp => poscar::parse_poscar_file(path),
        StructureFormat::Castep => cell::parse_cell_file(path),
        StructureFormat::Res => res::parse_res_file(path),
        StructureFormat::Aims => aims::parse_aims_file(path),
    }
}

/// 从文件路径推断格式，无法判断时查看内容
pub fn detect_format(path: &Path) -> Result<StructureFormat> {
    if let Some(format) = format_from_name(path) {
        return Ok(format);
    }

    let content = read_file(path)?;
    format_from_content(&content).ok_or_else(|| {
        KgridError::UnsupportedFormat(format!(
            "Cannot determine format for: {} (use --type)",
            path.display()
        ))
    })
}

fn format_from_name(path: &Path) -> Option<StructureFormat> {
    let name = path.file_name().and_then(|n| n.to_str())?;
    if name.starts_with("POSCAR") || name.starts_with("CONTCAR") {
        return Some(StructureFormat::Vasp);
    }
    if name == "geometry.in" {
        return Some(StructureFormat::Aims);
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())?;

    match ext.as_str() {
        "res" => Some(StructureFormat::Res),
        "cell" => Some(StructureFormat::Castep),
        "vasp" | "poscar" => Some(StructureFormat::Vasp),
        "in" => Some(StructureFormat::Aims),
        _ => None,
    }
}

fn format_from_content(content: &str) -> Option<StructureFormat> {
    let upper = content.to_uppercase();
    let first_keyword = content
        .lines()
        .find_map(|l| l.split_whitespace().next())
        .map(|w| w.to_uppercase());

    if content.lines().any(|l| l.trim_start().starts_with("lattice_vector")) {
        Some(StructureFormat::Aims)
    } else if upper.contains("%BLOCK") {
        Some(StructureFormat::Castep)
    } else if matches!(first_keyword.as_deref(), Some("TITL") | Some("CELL")) {
        Some(StructureFormat::Res)
    } else if content.lines().nth(2).and_then(parse_vector).is_some() {
        Some(StructureFormat::Vasp)
    } else {
        None
    }
}

/// 读取整个文件
pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => KgridError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => KgridError::FileReadError {
            path: path.display().to_string(),
            source: e,
        },
    })
}

/// 解析一行开头的三个浮点数
pub(crate) fn parse_vector(line: &str) -> Option<[f64; 3]> {
    let mut parts = line.split_whitespace().map(|s| s.parse::<f64>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) => Some([x, y, z]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const POSCAR: &str = "SiO2\n1.0\n4.22666 0 0\n0 4.22666 0\n0 0 2.68884\nSi O\n2 4\nDirect\n";

    #[test]
    fn test_format_from_name() {
        let cases = [
            ("POSCAR", Some(StructureFormat::Vasp)),
            ("CONTCAR_relaxed", Some(StructureFormat::Vasp)),
            ("geometry.in", Some(StructureFormat::Aims)),
            ("quartz.res", Some(StructureFormat::Res)),
            ("quartz.CELL", Some(StructureFormat::Castep)),
            ("quartz.vasp", Some(StructureFormat::Vasp)),
            ("ambiguous-name", None),
        ];
        for (name, expected) in cases {
            assert_eq!(format_from_name(&PathBuf::from(name)), expected, "{}", name);
        }
    }

    #[test]
    fn test_format_from_content() {
        assert_eq!(format_from_content(POSCAR), Some(StructureFormat::Vasp));
        assert_eq!(
            format_from_content("lattice_vector 1 0 0\n"),
            Some(StructureFormat::Aims)
        );
        assert_eq!(
            format_from_content("%block lattice_cart\n"),
            Some(StructureFormat::Castep)
        );
        assert_eq!(
            format_from_content("TITL x\nCELL 1.0 1 1 1 90 90 90\n"),
            Some(StructureFormat::Res)
        );
        assert_eq!(format_from_content("hello\nworld\n"), None);
    }

    #[test]
    fn test_read_structure_with_hint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ambiguous-name");
        fs::write(&path, POSCAR).unwrap();

        let structure = read_structure(&path, Some(StructureFormat::Vasp)).unwrap();
        assert_eq!(structure.lattice.matrix[2], [0.0, 0.0, 2.68884]);

        // 无提示时按内容推断
        let structure = read_structure(&path, None).unwrap();
        assert_eq!(structure.source_format.as_deref(), Some("poscar"));
    }

    #[test]
    fn test_read_structure_missing_file() {
        let err = read_structure(Path::new("/nonexistent/geometry.in"), None).unwrap_err();
        assert!(matches!(err, KgridError::FileNotFound { .. }));
    }

    #[test]
    fn test_read_structure_unknown_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not a structure\n").unwrap();

        assert!(matches!(
            read_structure(&path, None),
            Err(KgridError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector(" 1.0 2 3e0 extra"), Some([1.0, 2.0, 3.0]));
        assert_eq!(parse_vector("1.0 2.0"), None);
        assert_eq!(parse_vector("a b c"), None);
    }
}
