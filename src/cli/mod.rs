//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `grid`: 计算单个结构（或整个目录）的 k 点网格
//! - `series`: 列出截断区间内网格发生变化的阈值
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: grid, series

pub mod grid;
pub mod series;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// kgrid - k 点网格计算工具
#[derive(Parser, Debug)]
#[command(name = "kgrid")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Calculate k-point grids from a real-space cutoff length",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print debug diagnostics to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 初始化 stderr 日志：`-v` 时为 debug，否则读取 RUST_LOG（默认 warn）
    pub fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate the k-point sampling grid of a structure (or a directory of structures)
    Grid(grid::GridArgs),

    /// List the cutoff lengths at which the k-point grid changes
    Series(series::SeriesArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Mode;

    fn grid_args(argv: &[&str]) -> grid::GridArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Grid(args) => args,
            other => panic!("expected grid, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_defaults() {
        let args = grid_args(&["kgrid", "grid"]);
        assert_eq!(args.input.to_str(), Some("geometry.in"));
        assert_eq!(args.threshold(), (Mode::Default, 10.0));
        assert!(!args.realspace);
    }

    #[test]
    fn test_grid_threshold_flags() {
        let args = grid_args(&["kgrid", "grid", "POSCAR", "-a", "20"]);
        assert_eq!(args.threshold(), (Mode::VaspAuto, 20.0));

        let args = grid_args(&["kgrid", "grid", "POSCAR", "-s", "0.3"]);
        assert_eq!(args.threshold(), (Mode::Kspacing, 0.3));

        let args = grid_args(&["kgrid", "grid", "POSCAR", "--castep-mp-spacing", "0.05"]);
        assert_eq!(args.threshold(), (Mode::CastepMpSpacing, 0.05));

        let args = grid_args(&["kgrid", "grid", "POSCAR", "-m", "KSPACING", "-c", "0.25"]);
        assert_eq!(args.threshold(), (Mode::Kspacing, 0.25));
    }

    #[test]
    fn test_grid_castep_aliases() {
        for flag in [
            "--castep",
            "--castep-spacing",
            "--castep_spacing",
            "--castep-mp-spacing",
            "--castep_mp_spacing",
        ] {
            let args = grid_args(&["kgrid", "grid", "POSCAR", flag, "0.05"]);
            assert_eq!(args.threshold(), (Mode::CastepMpSpacing, 0.05), "{}", flag);
        }
    }

    #[test]
    fn test_grid_threshold_flags_are_exclusive() {
        assert!(Cli::try_parse_from(["kgrid", "grid", "-a", "20", "-s", "0.3"]).is_err());
        assert!(Cli::try_parse_from(["kgrid", "grid", "-c", "12", "--castep", "0.05"]).is_err());
        assert!(Cli::try_parse_from(["kgrid", "grid", "-m", "default", "-a", "20"]).is_err());
    }

    #[test]
    fn test_grid_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["kgrid", "grid", "-m", "gamma"]).is_err());
    }

    #[test]
    fn test_series_defaults() {
        let cli = Cli::try_parse_from(["kgrid", "series", "-v"]).unwrap();
        assert!(cli.verbose);
        let Commands::Series(args) = cli.command else {
            panic!("expected series");
        };
        assert_eq!(args.min, 10.0);
        assert_eq!(args.max, 30.0);
        assert_eq!(args.decimals, 4);
        assert!(!args.comma_sep && !args.castep);
    }
}
