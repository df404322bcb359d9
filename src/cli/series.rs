//! # series 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/series.rs`

use crate::grid::series::DEFAULT_DECIMALS;
use crate::parsers::StructureFormat;

use clap::Args;
use std::path::PathBuf;

/// series 子命令参数
#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Input structure file
    #[arg(default_value = "geometry.in")]
    pub input: PathBuf,

    /// Input file type (auto-detected if not specified)
    #[arg(short = 't', long = "type", value_enum)]
    pub file_type: Option<StructureFormat>,

    /// Minimum real-space cutoff in Å (inclusive)
    #[arg(long, default_value_t = 10.0)]
    pub min: f64,

    /// Maximum real-space cutoff in Å (exclusive)
    #[arg(long, default_value_t = 30.0)]
    pub max: f64,

    /// Decimal places used when merging nearly equal cutoffs
    #[arg(long, default_value_t = DEFAULT_DECIMALS, allow_negative_numbers = true)]
    pub decimals: i32,

    /// Output the samples as a comma-separated list on one line
    #[arg(long, visible_alias = "comma_sep", default_value_t = false)]
    pub comma_sep: bool,

    /// Show CASTEP-like MP spacing instead of VASP-like KSPACING
    #[arg(long, default_value_t = false)]
    pub castep: bool,

    /// Also write the series to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
