//! # k 点网格计算模块
//!
//! 由晶格和单一密度参数计算倒空间采样网格，以及收敛测试用的截断序列。
//! 纯计算，不读文件、不打印。
//!
//! ## 子模块
//! - `geometry`: 实空间 / 倒空间晶轴长度
//! - `mode`: 截断参数约定 (default, vasp_auto, kspacing, castep_mp_spacing)
//! - `calculator`: k 点网格
//! - `series`: 截断阈值序列
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs`、`commands/series.rs` 使用
//! - 使用 `models/structure.rs`

pub mod calculator;
pub mod geometry;
pub mod mode;
pub mod series;

pub use calculator::{compute_grid, GridSamples};
pub use mode::Mode;
pub use series::{castep_mp_spacing_series, cutoff_series, kspacing_series, series_samples};
