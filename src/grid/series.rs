//! # 截断序列
//!
//! 枚举区间 [l_min, l_max) 内使任一方向采样数发生变化的实空间截断值，
//! 用于 k 点收敛测试。
//!
//! 对倒格矢长度为 a 的方向，采样数 ceil(2·l·a) 恰好在 l0 = 1/(2a) 的
//! 整数倍处增加。三个方向各自的倍数取并集即为全部阈值。
//!
//! 不同方向的阈值可能数值上非常接近（近立方晶胞），统一按 `decimals`
//! 位小数舍入后去重，舍入策略只在 [`round_to_decimals`] 中实现。
//!
//! ## 依赖关系
//! - 被 `commands/series.rs` 调用
//! - 使用 `grid/geometry.rs`、`grid/calculator.rs`

use crate::error::{KgridError, Result};
use crate::grid::calculator::{samples_from_lengths, GridSamples};
use crate::grid::geometry::{self, AxisLengths};
use crate::grid::mode::Rounding;
use crate::models::Lattice;

use std::f64::consts::PI;

/// 默认舍入位数
pub const DEFAULT_DECIMALS: i32 = 4;

/// 阈值处采样数的取值偏移，避免舍入后的阈值恰好落在跳变点上
pub const SAMPLE_OFFSET: f64 = 1e-4;

/// 超过此位数的舍入对 f64 没有意义
const MAX_DECIMALS: u32 = 15;

/// 单个方向上允许枚举的最多阈值数
const MAX_MEMBERS_PER_AXIS: f64 = 1e6;

/// 每个方向相邻阈值的间隔 l0 = 1/(2a)
pub fn get_increments(lengths: &AxisLengths) -> Result<[f64; 3]> {
    if let Some(&bad) = lengths.iter().find(|a| !a.is_finite() || **a <= 0.0) {
        return Err(KgridError::InvalidGeometry(format!(
            "axis length must be positive, got {}",
            bad
        )));
    }
    Ok(lengths.map(|a| 1.0 / (2.0 * a)))
}

/// 舍入到 `decimals` 位小数（银行家舍入）
pub fn round_to_decimals(x: f64, decimals: u32) -> f64 {
    if decimals > MAX_DECIMALS {
        return x;
    }
    let scale = 10f64.powi(decimals as i32);
    (x * scale).round_ties_even() / scale
}

/// 区间 [l_min, l_max) 内所有阈值，升序且去重
pub fn cutoff_series(
    lattice: &Lattice,
    l_min: f64,
    l_max: f64,
    decimals: i32,
) -> Result<Vec<f64>> {
    check_range(l_min, l_max)?;
    if decimals < 0 {
        return Err(KgridError::InvalidArgument(format!(
            "decimals must be non-negative, got {}",
            decimals
        )));
    }
    let decimals = decimals as u32;

    let lengths = geometry::reciprocal_lengths(lattice)?;
    let increments = get_increments(&lengths)?;

    let mut members = Vec::new();
    for li in increments {
        let span = ((l_max - l_min) / li).ceil();
        if span > MAX_MEMBERS_PER_AXIS {
            return Err(KgridError::InvalidRange {
                min: l_min,
                max: l_max,
                reason: format!("range spans about {:e} thresholds per axis", span),
            });
        }

        // l_min 有限且非负，转换不会出错（过大时饱和，循环立即结束）
        let n_min = (l_min / li).ceil() as u64;
        let n_max = n_min.saturating_add(span as u64);
        for n in n_min..=n_max {
            let value = n as f64 * li;
            if value >= l_max {
                break;
            }
            let rounded = round_to_decimals(value, decimals);
            if rounded < l_max {
                members.push(rounded);
            }
        }
    }

    members.sort_by(f64::total_cmp);
    members.dedup();
    Ok(members)
}

/// VASP KSPACING 序列：κ = π / l，顺序与截断序列一一对应（κ 递减）
pub fn kspacing_series(
    lattice: &Lattice,
    l_min: f64,
    l_max: f64,
    decimals: i32,
) -> Result<Vec<f64>> {
    Ok(cutoff_series(lattice, l_min, l_max, decimals)?
        .into_iter()
        .map(|c| PI / c)
        .collect())
}

/// CASTEP KPOINTS_MP_SPACING 序列：κ = 1 / (2l)，顺序同上
pub fn castep_mp_spacing_series(
    lattice: &Lattice,
    l_min: f64,
    l_max: f64,
    decimals: i32,
) -> Result<Vec<f64>> {
    Ok(cutoff_series(lattice, l_min, l_max, decimals)?
        .into_iter()
        .map(|c| 1.0 / (2.0 * c))
        .collect())
}

/// 每个阈值对应的网格：取 l - SAMPLE_OFFSET 处的默认模式结果，
/// 即该阈值以下（含）仍然适用的网格。阈值 0 对应 `0 0 0`。
pub fn series_samples(lattice: &Lattice, cutoffs: &[f64]) -> Result<Vec<GridSamples>> {
    let lengths = geometry::reciprocal_lengths(lattice)?;
    cutoffs
        .iter()
        .map(|&c| {
            let effective_cutoff = (c - SAMPLE_OFFSET).max(0.0);
            samples_from_lengths(&lengths, effective_cutoff, Rounding::Up, false)
        })
        .collect()
}

fn check_range(l_min: f64, l_max: f64) -> Result<()> {
    let reason = if !l_min.is_finite() || !l_max.is_finite() {
        "bounds must be finite"
    } else if l_min < 0.0 {
        "minimum must be non-negative"
    } else if l_min >= l_max {
        "minimum must be below maximum"
    } else {
        return Ok(());
    };

    Err(KgridError::InvalidRange {
        min: l_min,
        max: l_max,
        reason: reason.to_string(),
    })
}
