//! # grid 子命令实现
//!
//! 计算结构的 k 点网格。
//!
//! ## 功能
//! - 单文件：只向 stdout 输出 `"%3d %3d %3d"` 一行
//! - 目录：并行计算所有匹配文件，表格汇总，可导出 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/grid.rs` 定义的 GridArgs
//! - 使用 `parsers/` 读取结构，`grid/` 计算网格
//! - 使用 `batch/` 模块进行批量处理

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::grid::GridArgs;
use crate::error::{KgridError, Result};
use crate::grid::{self, GridSamples, Mode};
use crate::models::Structure;
use crate::parsers::{self, StructureFormat};
use crate::utils::output;

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};
use tracing::{debug, info};

/// 单个结构的计算设置
#[derive(Debug, Clone, Copy)]
struct GridSettings {
    mode: Mode,
    cutoff: f64,
    realspace: bool,
    format: Option<StructureFormat>,
}

/// 批量结果表格行
#[derive(Debug, Clone, Tabled, Serialize)]
struct GridRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Format")]
    format: String,
    n1: u32,
    n2: u32,
    n3: u32,
    #[tabled(rename = "Total")]
    total: u64,
}

impl GridRow {
    fn new(file: String, structure: &Structure, samples: GridSamples) -> Self {
        let [n1, n2, n3] = samples.as_array();
        Self {
            file,
            format: structure.source_format.clone().unwrap_or_default(),
            n1,
            n2,
            n3,
            total: samples.total(),
        }
    }
}

/// 执行 grid 子命令
pub fn execute(args: GridArgs) -> Result<()> {
    let (mode, cutoff) = args.threshold();
    let settings = GridSettings {
        mode,
        cutoff,
        realspace: args.realspace,
        format: args.file_type,
    };
    debug!(mode = %mode, cutoff, realspace = args.realspace, "grid settings");

    if args.input.is_dir() {
        execute_batch(&args, &settings)
    } else {
        execute_single_file(&args.input, &settings)
    }
}

/// 单文件模式
fn execute_single_file(input: &Path, settings: &GridSettings) -> Result<()> {
    let (_, samples) = grid_for_file(input, settings)?;
    println!("{}", samples);
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &GridArgs, settings: &GridSettings) -> Result<()> {
    output::print_header("k-point Grid Calculation");
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(KgridError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    output::print_info(&format!("Found {} structure files", files.len()));
    output::print_info(&format!(
        "Mode: {} = {}{}",
        settings.mode,
        settings.cutoff,
        if settings.realspace { " (real-space lengths)" } else { "" }
    ));

    let runner = BatchRunner::new(args.jobs);
    info!(jobs = runner.jobs(), files = files.len(), "starting batch");

    let result = runner.run(files, |file| {
        match grid_for_file(file, settings) {
            Ok((structure, samples)) => {
                let name = relative_name(&args.input, file);
                ProcessResult::Success(file.clone(), GridRow::new(name, &structure, samples))
            }
            Err(e) => ProcessResult::Failed(file.clone(), e.to_string()),
        }
    });

    let rows: Vec<GridRow> = result.outputs.iter().map(|(_, row)| row.clone()).collect();
    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }

    if let Some(csv_path) = &args.csv {
        write_grid_csv(&rows, csv_path)?;
        output::print_success(&format!("Results saved to '{}'", csv_path.display()));
    }

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} of {} files succeeded, {} failed",
        result.success(),
        result.total(),
        result.failed()
    ));
    output::print_failures(&result.failures);

    Ok(())
}

/// 读取结构并计算网格
fn grid_for_file(path: &Path, settings: &GridSettings) -> Result<(Structure, GridSamples)> {
    let structure = parsers::read_structure(path, settings.format)?;
    let (a, b, c, alpha, beta, gamma) = structure.lattice.parameters();
    debug!(
        path = %path.display(),
        name = %structure.name,
        a, b, c, alpha, beta, gamma,
        volume = structure.lattice.volume(),
        "structure loaded"
    );

    let samples = grid::compute_grid(
        &structure.lattice,
        settings.cutoff,
        settings.mode,
        settings.realspace,
    )?;
    debug!(path = %path.display(), samples = %samples.to_compact_string(), "grid computed");

    Ok((structure, samples))
}

/// 相对输入目录的显示名
fn relative_name(root: &Path, file: &Path) -> String {
    file.strip_prefix(root).unwrap_or(file).display().to_string()
}

/// 保存批量结果到 CSV
fn write_grid_csv(rows: &[GridRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| KgridError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
