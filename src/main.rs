//! # kgrid - k 点网格计算工具
//!
//! 由实空间截断长度计算周期结构的 k 点采样网格，并列出收敛测试用的截断序列。
//!
//! ## 子命令
//! - `grid`   - 计算 k 点网格（单文件或目录批量）
//! - `series` - 截断区间内网格变化的阈值序列
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (结构文件 -> 晶格)
//!   │     ├── grid/      (网格与序列计算)
//!   │     └── batch/     (目录批量处理)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod grid;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
