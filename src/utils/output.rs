//! # 美化输出工具
//!
//! 状态信息的统一终端样式。计算结果（网格、序列）直接写 stdout，不经过这里。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::path::PathBuf;

/// 失败列表最多显示的条数
const MAX_FAILURES_SHOWN: usize = 10;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// 打印失败文件列表，超过上限时只显示前几条
pub fn print_failures(failures: &[(PathBuf, String)]) {
    if failures.is_empty() {
        return;
    }

    print_warning("Failed files:");
    for (path, err) in failures.iter().take(MAX_FAILURES_SHOWN) {
        print_error(&format!("  {}: {}", path.display(), err));
    }
    if failures.len() > MAX_FAILURES_SHOWN {
        print_warning(&format!(
            "  ... and {} more",
            failures.len() - MAX_FAILURES_SHOWN
        ));
    }
}
