//! # 晶轴长度
//!
//! 由实空间晶格得到三个晶轴的模长：实空间向量长度，或倒格矢长度。
//!
//! 倒格矢取晶格矩阵的逆转置，**不含 2π 因子**。`calculator` 和 `series`
//! 中的所有截断公式都以此为前提，整个 crate 只在这里计算倒格矢。
//!
//! ## 依赖关系
//! - 被 `grid/calculator.rs`、`grid/series.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{KgridError, Result};
use crate::models::structure::{cross, norm};
use crate::models::Lattice;

/// 三个晶轴的模长，顺序与晶格向量一致
pub type AxisLengths = [f64; 3];

/// 体积相对容差：|V| <= TOL * |a||b||c| 视为退化晶胞
const VOLUME_TOLERANCE: f64 = 1e-10;

/// 实空间晶格向量长度 (|a|, |b|, |c|)
pub fn real_space_lengths(lattice: &Lattice) -> Result<AxisLengths> {
    let lengths = vector_lengths(lattice)?;
    check_volume(lattice, &lengths)?;
    Ok(lengths)
}

/// 倒格矢长度 (|a*|, |b*|, |c*|)
///
/// a* = (b × c) / V，b* = (c × a) / V，c* = (a × b) / V，
/// 即逆矩阵转置的行向量。
pub fn reciprocal_lengths(lattice: &Lattice) -> Result<AxisLengths> {
    let lengths = vector_lengths(lattice)?;
    let volume = check_volume(lattice, &lengths)?;

    let [a, b, c] = lattice.matrix;
    let recip = [cross(&b, &c), cross(&c, &a), cross(&a, &b)];

    Ok(recip.map(|v| norm(&v) / volume.abs()))
}

/// 检查矩阵元素有限且每个向量长度为正
fn vector_lengths(lattice: &Lattice) -> Result<AxisLengths> {
    if lattice.matrix.iter().flatten().any(|x| !x.is_finite()) {
        return Err(KgridError::InvalidGeometry(
            "lattice contains non-finite components".to_string(),
        ));
    }

    let lengths = lattice.matrix.map(|v| norm(&v));
    if let Some(axis) = lengths.iter().position(|&l| l <= 0.0) {
        return Err(KgridError::InvalidGeometry(format!(
            "lattice vector {} has zero length",
            axis + 1
        )));
    }

    Ok(lengths)
}

/// 检查晶胞非退化，返回带符号体积
fn check_volume(lattice: &Lattice, lengths: &AxisLengths) -> Result<f64> {
    let volume = lattice.volume();
    let scale = lengths[0] * lengths[1] * lengths[2];

    if volume.abs() <= VOLUME_TOLERANCE * scale {
        return Err(KgridError::InvalidGeometry(format!(
            "lattice vectors are linearly dependent (volume = {:e})",
            volume
        )));
    }

    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_space_lengths_orthorhombic() {
        let lattice = Lattice::orthorhombic(3.0, 4.0, 5.0);
        let lengths = real_space_lengths(&lattice).unwrap();
        assert_eq!(lengths, [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_reciprocal_lengths_have_no_two_pi() {
        let lattice = Lattice::orthorhombic(2.0, 4.0, 5.0);
        let lengths = reciprocal_lengths(&lattice).unwrap();

        assert!((lengths[0] - 0.5).abs() < 1e-12);
        assert!((lengths[1] - 0.25).abs() < 1e-12);
        assert!((lengths[2] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_reciprocal_lengths_hexagonal() {
        // 六方晶系 |a*| = 2 / (sqrt(3) a)，|c*| = 1 / c
        let lattice = Lattice::from_parameters(3.0, 3.0, 5.0, 90.0, 90.0, 120.0);
        let lengths = reciprocal_lengths(&lattice).unwrap();
        let expected_a = 2.0 / (3.0_f64.sqrt() * 3.0);

        assert!((lengths[0] - expected_a).abs() < 1e-9);
        assert!((lengths[1] - expected_a).abs() < 1e-9);
        assert!((lengths[2] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_reciprocal_lengths_left_handed_cell() {
        // 交换两个向量后体积为负，模长不变
        let lattice = Lattice::from_vectors([[0.0, 4.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 5.0]]);
        assert!(lattice.volume() < 0.0);

        let lengths = reciprocal_lengths(&lattice).unwrap();
        assert!((lengths[0] - 0.25).abs() < 1e-12);
        assert!((lengths[1] - 0.5).abs() < 1e-12);
        assert!((lengths[2] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_lattice_rejected() {
        let coplanar = Lattice::from_vectors([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]);
        assert!(matches!(
            reciprocal_lengths(&coplanar),
            Err(KgridError::InvalidGeometry(_))
        ));
        assert!(matches!(
            real_space_lengths(&coplanar),
            Err(KgridError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_zero_vector_rejected() {
        let lattice = Lattice::from_vectors([[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let err = reciprocal_lengths(&lattice).unwrap_err();
        assert!(err.to_string().contains("vector 2"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let lattice = Lattice::orthorhombic(f64::NAN, 1.0, 1.0);
        assert!(matches!(
            real_space_lengths(&lattice),
            Err(KgridError::InvalidGeometry(_))
        ));
    }
}
