//! # k 点网格计算器
//!
//! 给定截断参数和模式，计算每个倒格矢方向的采样数。
//!
//! ## 算法概述
//! 1. 模式换算为等效实空间截断 l 和取整规则
//! 2. 计算晶轴长度（默认倒格矢，`realspace` 时用实空间向量）
//! 3. 原始采样数：倒空间 2·l·|b_i|，实空间 2·l/|a_i|
//! 4. 按规则取整
//!
//! 截断 l 对应超胞中不重叠球的半径，超胞沿每个方向的尺寸至少为 2l。
//!
//! ## 依赖关系
//! - 被 `grid/series.rs` 和 `commands/` 调用
//! - 使用 `grid/geometry.rs`、`grid/mode.rs`

use crate::error::{KgridError, Result};
use crate::grid::geometry::{self, AxisLengths};
use crate::grid::mode::{Mode, Rounding};
use crate::models::Lattice;

use serde::Serialize;
use std::fmt;

/// 三个方向的采样数，顺序与晶格向量一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridSamples(pub [u32; 3]);

impl GridSamples {
    pub fn as_array(&self) -> [u32; 3] {
        self.0
    }

    /// 总 k 点数（未做对称约化）
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&n| n as u64).product()
    }

    /// 空格分隔的紧凑形式，如 "2 2 3"
    pub fn to_compact_string(&self) -> String {
        format!("{} {} {}", self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Display for GridSamples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:3} {:3} {:3}", self.0[0], self.0[1], self.0[2])
    }
}

/// 计算结构的 k 点网格
pub fn compute_grid(
    lattice: &Lattice,
    cutoff_length: f64,
    mode: Mode,
    realspace: bool,
) -> Result<GridSamples> {
    if !cutoff_length.is_finite() || cutoff_length <= 0.0 {
        return Err(KgridError::InvalidCutoff(cutoff_length));
    }

    let (effective_cutoff, rounding) = mode.normalize(cutoff_length);

    let lengths = if realspace {
        geometry::real_space_lengths(lattice)?
    } else {
        geometry::reciprocal_lengths(lattice)?
    };

    samples_from_lengths(&lengths, effective_cutoff, rounding, realspace)
}

/// 由晶轴长度和等效截断得到采样数
///
/// 取整结果超出 u32 范围时报错，不做截断。
pub(crate) fn samples_from_lengths(
    lengths: &AxisLengths,
    effective_cutoff: f64,
    rounding: Rounding,
    realspace: bool,
) -> Result<GridSamples> {
    let mut samples = [0u32; 3];
    for (axis, (n, &l)) in samples.iter_mut().zip(lengths).enumerate() {
        let raw = if realspace {
            2.0 * effective_cutoff / l
        } else {
            2.0 * effective_cutoff * l
        };
        let rounded = rounding.apply(raw);
        if !(0.0..=u32::MAX as f64).contains(&rounded) {
            return Err(KgridError::InvalidArgument(format!(
                "sample count {:e} along axis {} is out of range",
                rounded,
                axis + 1
            )));
        }
        // 取整后已是范围内的整数，这里只是类型转换
        *n = rounded as u32;
    }

    Ok(GridSamples(samples))
}
