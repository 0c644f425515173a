// ==========================================
// 智能仓储物流分配系统 - 结果导出
// ==========================================
// 职责: 将优化结果落盘（JSON 完整结构 / CSV 扁平分配明细）
// 红线: 只读消费 OptimizationResult,不做新计算
// ==========================================

use crate::domain::allocation::OptimizationResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::info;

// ==========================================
// ExportFormat - 导出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
        }
    }
}

// ==========================================
// ExportError - 导出错误
// ==========================================
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),
}

/// 导出优化结果
///
/// - JSON: 完整结果结构（含利用率/指标/未满足清单）
/// - CSV: 分配明细逐行扁平化
pub fn export_results(
    result: &OptimizationResult,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => {
            let file = File::create(path)?;
            serde_json::to_writer_pretty(file, result)?;
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(["warehouse_id", "order_id", "quantity", "cost", "distance"])?;
            for records in result.allocation_plan.values() {
                for record in records {
                    writer.write_record([
                        record.warehouse_id.clone(),
                        record.order_id.clone(),
                        record.quantity.to_string(),
                        format!("{:.4}", record.cost),
                        format!("{:.4}", record.distance),
                    ])?;
                }
            }
            writer.flush()?;
        }
    }

    info!(format = %format, path = %path.display(), "优化结果已导出");
    Ok(())
}
