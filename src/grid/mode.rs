//! # 截断参数约定
//!
//! 不同程序对“k 点密度”的单标量参数有不同约定，这里统一换算为
//! Moreno-Soler 实空间截断长度和取整规则。
//!
//! | 模式 | 等效截断 | 取整 |
//! |---|---|---|
//! | `default` | l | 向上 |
//! | `vasp_auto` | l / 2 | 四舍五入 |
//! | `kspacing` | π / l | 向上 |
//! | `castep_mp_spacing` | 1 / (2 l) | 向上 |
//!
//! ## 依赖关系
//! - 被 `grid/calculator.rs` 和 `cli/grid.rs` 使用

use crate::error::KgridError;

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// 截断参数的解释方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// 实空间截断长度 (Å)，超胞中不重叠球半径
    #[default]
    Default,
    /// VASP KPOINTS 全自动模式的长度参数 (Å)
    VaspAuto,
    /// VASP KSPACING (Å⁻¹，含 2π)
    Kspacing,
    /// CASTEP KPOINTS_MP_SPACING (Å⁻¹，不含 2π)
    CastepMpSpacing,
}

/// 取整规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// 向上取整
    Up,
    /// floor(x + 0.5)
    Nearest,
}

impl Rounding {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Rounding::Up => x.ceil(),
            Rounding::Nearest => (x + 0.5).floor(),
        }
    }
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Default,
        Mode::VaspAuto,
        Mode::Kspacing,
        Mode::CastepMpSpacing,
    ];

    /// 模式名称（与 `FromStr` 互逆）
    pub fn name(self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::VaspAuto => "vasp_auto",
            Mode::Kspacing => "kspacing",
            Mode::CastepMpSpacing => "castep_mp_spacing",
        }
    }

    /// 换算为 (等效实空间截断, 取整规则)
    ///
    /// vasp_auto 的减半和四舍五入是为了与 VASP 全自动模式的结果一致。
    pub fn normalize(self, cutoff_length: f64) -> (f64, Rounding) {
        match self {
            Mode::Default => (cutoff_length, Rounding::Up),
            Mode::VaspAuto => (cutoff_length / 2.0, Rounding::Nearest),
            Mode::Kspacing => (PI / cutoff_length, Rounding::Up),
            Mode::CastepMpSpacing => (1.0 / (2.0 * cutoff_length), Rounding::Up),
        }
    }
}

impl FromStr for Mode {
    type Err = KgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == lower)
            .ok_or_else(|| KgridError::InvalidMode(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
