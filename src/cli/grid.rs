//! # grid 子命令 CLI 定义
//!
//! 截断参数四选一：`-c` (默认)、`-a` (VASP Auto)、`-s` (VASP KSPACING)、
//! `--castep` (CASTEP MP spacing)。`-m` 用模式名重新解释 `-c` 的值。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/grid.rs`

use crate::grid::Mode;
use crate::parsers::StructureFormat;

use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// 批量模式默认文件模式
pub const DEFAULT_PATTERN: &str = "POSCAR*,CONTCAR*,*.vasp,*.cell,*.res,geometry.in";

/// 解析模式名（不区分大小写）
pub fn parse_mode(input: &str) -> Result<Mode, String> {
    input.parse::<Mode>().map_err(|e| e.to_string())
}

/// grid 子命令参数
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("threshold")
        .args(["cutoff_length", "vasp_auto", "kspacing", "castep"])
        .multiple(false)
))]
pub struct GridArgs {
    /// Input: structure file, or a directory for batch mode
    #[arg(default_value = "geometry.in")]
    pub input: PathBuf,

    /// Length cutoff in Å
    #[arg(short, long, default_value_t = 10.0)]
    pub cutoff_length: f64,

    /// Real-space cutoff like Auto in a VASP KPOINTS file
    #[arg(short = 'a', long)]
    pub vasp_auto: Option<f64>,

    /// Reciprocal-space distance like KSPACING in VASP
    #[arg(short = 's', long = "vasp-kspacing")]
    pub kspacing: Option<f64>,

    /// Reciprocal-space distance like KPOINTS_MP_SPACING in CASTEP (differs from KSPACING by 1/(2π))
    #[arg(
        long,
        visible_aliases = ["castep-spacing", "castep-mp-spacing", "castep_spacing", "castep_mp_spacing"]
    )]
    pub castep: Option<f64>,

    /// Interpret --cutoff-length with this mode (default, vasp_auto, kspacing, castep_mp_spacing)
    #[arg(
        short,
        long,
        value_parser = parse_mode,
        conflicts_with_all = ["vasp_auto", "kspacing", "castep"]
    )]
    pub mode: Option<Mode>,

    /// Input file type (auto-detected if not specified)
    #[arg(short = 't', long = "type", value_enum)]
    pub file_type: Option<StructureFormat>,

    /// Use real-space vector lengths instead of the reciprocal cell (not recommended)
    #[arg(short, long, default_value_t = false)]
    pub realspace: bool,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode, comma separated)
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Also write the batch results to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl GridArgs {
    /// 选中的模式及其参数值
    pub fn threshold(&self) -> (Mode, f64) {
        if let Some(l) = self.vasp_auto {
            (Mode::VaspAuto, l)
        } else if let Some(k) = self.kspacing {
            (Mode::Kspacing, k)
        } else if let Some(k) = self.castep {
            (Mode::CastepMpSpacing, k)
        } else {
            (self.mode.unwrap_or_default(), self.cutoff_length)
        }
    }
}
