//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `grid/`, `batch/`, `utils/`
//! - 子模块: grid, series

pub mod grid;
pub mod series;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Grid(args) => grid::execute(args),
        Commands::Series(args) => series::execute(args),
    }
}
