//! # 统一错误处理模块
//!
//! 定义 kgrid 的所有错误类型，使用 `thiserror` 派生。
//! 核心计算 (`grid/`) 只产生前五类错误，其余来自文件读取与命令层。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// kgrid 统一错误类型
#[derive(Error, Debug)]
pub enum KgridError {
    // ─────────────────────────────────────────────────────────────
    // 计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid lattice geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown mode '{0}' (expected one of: default, vasp_auto, kspacing, castep_mp_spacing)")]
    InvalidMode(String),

    #[error("Invalid cutoff {0}: must be a positive finite number")]
    InvalidCutoff(f64),

    #[error("Invalid cutoff range [{min}, {max}): {reason}")]
    InvalidRange { min: f64, max: f64, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, KgridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KgridError::InvalidMode("monkhorst".to_string());
        assert!(err.to_string().contains("'monkhorst'"));

        let err = KgridError::InvalidCutoff(-1.0);
        assert!(err.to_string().contains("-1"));

        let err = KgridError::InvalidRange {
            min: 9.0,
            max: 3.0,
            reason: "min must be below max".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid cutoff range [9, 3): min must be below max"
        );
    }
}
