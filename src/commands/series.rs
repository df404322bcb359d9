//! # series 子命令实现
//!
//! 列出 [min, max) 内网格变化的截断阈值，以及每个阈值对应的 KSPACING
//! （或 CASTEP MP spacing）和该阈值以下适用的网格。
//!
//! ## 输出格式
//! ```text
//! Length cutoff  KSPACING    Samples
//! -------------  --------  ------------
//!        4.033    0.7789     2   2   3
//! ```
//! `--comma-sep` 时只输出一行 `2 2 3,2 2 4,...`。
//!
//! ## 依赖关系
//! - 使用 `cli/series.rs` 定义的 SeriesArgs
//! - 使用 `parsers/` 读取结构，`grid/series.rs` 生成序列

use crate::cli::series::SeriesArgs;
use crate::error::{KgridError, Result};
use crate::grid::{self, GridSamples};
use crate::parsers;

use std::path::Path;
use tracing::debug;

/// 一个阈值及其对应的 κ 和网格
#[derive(Debug, Clone, Copy, PartialEq)]
struct SeriesRow {
    cutoff: f64,
    spacing: f64,
    samples: GridSamples,
}

/// 执行 series 子命令
pub fn execute(args: SeriesArgs) -> Result<()> {
    let rows = build_rows(&args)?;

    if args.comma_sep {
        println!("{}", format_comma_separated(&rows));
    } else {
        for line in format_table(&rows, args.castep) {
            println!("{}", line);
        }
    }

    if let Some(csv_path) = &args.csv {
        write_series_csv(&rows, args.castep, csv_path)?;
    }

    Ok(())
}

/// 读取结构并生成序列
fn build_rows(args: &SeriesArgs) -> Result<Vec<SeriesRow>> {
    let structure = parsers::read_structure(&args.input, args.file_type)?;
    let lattice = &structure.lattice;
    debug!(
        path = %args.input.display(),
        name = %structure.name,
        min = args.min,
        max = args.max,
        decimals = args.decimals,
        "cutoff series"
    );

    let cutoffs = grid::cutoff_series(lattice, args.min, args.max, args.decimals)?;
    let spacings = if args.castep {
        grid::castep_mp_spacing_series(lattice, args.min, args.max, args.decimals)?
    } else {
        grid::kspacing_series(lattice, args.min, args.max, args.decimals)?
    };
    let samples = grid::series_samples(lattice, &cutoffs)?;
    debug!(count = cutoffs.len(), "series generated");

    Ok(cutoffs
        .into_iter()
        .zip(spacings)
        .zip(samples)
        .map(|((cutoff, spacing), samples)| SeriesRow {
            cutoff,
            spacing,
            samples,
        })
        .collect())
}

/// 所有网格写成一行，逗号分隔
fn format_comma_separated(rows: &[SeriesRow]) -> String {
    rows.iter()
        .map(|row| row.samples.to_compact_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// 表头、分隔线和每个阈值一行
fn format_table(rows: &[SeriesRow], castep: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    if castep {
        lines.push("Length cutoff  MP SPACING    Samples".to_string());
        lines.push("-------------  ----------  ------------".to_string());
    } else {
        lines.push("Length cutoff  KSPACING    Samples".to_string());
        lines.push("-------------  --------  ------------".to_string());
    }

    for row in rows {
        let line = if castep {
            format!("{:12.3}   {:9.6}   {}", row.cutoff, row.spacing, row.samples)
        } else {
            format!("{:12.3}   {:7.4}   {}", row.cutoff, row.spacing, row.samples)
        };
        lines.push(line);
    }

    lines
}

/// 保存序列到 CSV
fn write_series_csv(rows: &[SeriesRow], castep: bool, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let spacing_column = if castep { "mp_spacing" } else { "kspacing" };
    wtr.write_record(["cutoff", spacing_column, "n1", "n2", "n3"])?;

    for row in rows {
        let [n1, n2, n3] = row.samples.as_array();
        wtr.write_record(&[
            row.cutoff.to_string(),
            format!("{:.6}", row.spacing),
            n1.to_string(),
            n2.to_string(),
            n3.to_string(),
        ])?;
    }

    wtr.flush().map_err(|e| KgridError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;

    const SIO2_POSCAR: &str =
        "SiO2\n1.0\n4.22666 0.0 0.0\n0.0 4.22666 0.0\n0.0 0.0 2.68884\nSi O\n2 4\nDirect\n";

    /// 在临时目录写出 SiO2 POSCAR，解析 series 参数
    fn series_args(extra: &[&str]) -> (tempfile::TempDir, SeriesArgs) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("POSCAR");
        fs::write(&path, SIO2_POSCAR).unwrap();

        let mut argv = vec!["kgrid", "series", path.to_str().unwrap()];
        argv.extend_from_slice(extra);
        let args = match Cli::try_parse_from(argv).unwrap().command {
            Commands::Series(args) => args,
            other => panic!("expected series, got {:?}", other),
        };
        (dir, args)
    }

    #[test]
    fn test_comma_separated_output() {
        let (_dir, args) = series_args(&["-t", "vasp", "--min=4", "--max", "7", "--comma_sep"]);
        assert!(args.comma_sep);

        let rows = build_rows(&args).unwrap();
        assert_eq!(format_comma_separated(&rows), "2 2 3,2 2 4,3 3 4,3 3 5,4 4 5");
    }

    #[test]
    fn test_kspacing_table() {
        let (_dir, args) = series_args(&["--min", "4", "--max", "7"]);
        let rows = build_rows(&args).unwrap();

        assert_eq!(
            format_table(&rows, false),
            [
                "Length cutoff  KSPACING    Samples",
                "-------------  --------  ------------",
                "       4.033    0.7789     2   2   3",
                "       4.227    0.7433     2   2   4",
                "       5.378    0.5842     3   3   4",
                "       6.340    0.4955     3   3   5",
                "       6.722    0.4674     4   4   5",
            ]
        );
    }

    #[test]
    fn test_castep_table() {
        let (_dir, args) = series_args(&["--min=2", "--max", "4", "--castep"]);
        let rows = build_rows(&args).unwrap();

        assert_eq!(
            format_table(&rows, true),
            [
                "Length cutoff  MP SPACING    Samples",
                "-------------  ----------  ------------",
                "       2.113    0.236597     1   1   2",
                "       2.689    0.185957     2   2   2",
            ]
        );
    }

    #[test]
    fn test_empty_series_prints_header_only() {
        assert_eq!(format_table(&[], false).len(), 2);
        assert_eq!(format_comma_separated(&[]), "");
    }

    #[test]
    fn test_invalid_range() {
        let (_dir, args) = series_args(&["--min", "9", "--max", "3"]);
        assert!(matches!(
            build_rows(&args),
            Err(KgridError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_negative_decimals() {
        let (_dir, args) = series_args(&["--decimals", "-1"]);
        assert!(matches!(
            build_rows(&args),
            Err(KgridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_csv_export() {
        let (dir, args) = series_args(&["--min=2", "--max", "4", "--castep"]);
        let rows = build_rows(&args).unwrap();
        let csv_path = dir.path().join("series.csv");

        write_series_csv(&rows, true, &csv_path).unwrap();

        let content = fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            [
                "cutoff,mp_spacing,n1,n2,n3",
                "2.1133,0.236597,1,1,2",
                "2.6888,0.185957,2,2,2",
            ]
        );
    }
}
