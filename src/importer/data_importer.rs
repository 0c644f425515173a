// ==========================================
// 智能仓储物流分配系统 - 数据导入器
// ==========================================
// 职责: 导入主流程编排（解析 → 映射 → 校验 → 转换）
// 输出: 通过校验的领域记录 + DQ 报告
// 红线: Error/Conflict 级违规行阻断,不得进入领域记录
// ==========================================

use crate::domain::ingest::{DqLevel, DqReport, DqSummary, DqViolation, ImportOutcome};
use crate::domain::order::{Order, RawOrderRecord};
use crate::domain::types::OrderPriority;
use crate::domain::warehouse::{RawWarehouseRecord, Warehouse};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, FileParser};
use crate::importer::validator::DataValidator;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

// ==========================================
// DataImporter - 数据导入器
// ==========================================
pub struct DataImporter {
    parser: CsvParser,
}

impl DataImporter {
    pub fn new() -> Self {
        Self { parser: CsvParser }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 导入仓库表
    pub fn import_warehouses(&self, file_path: &Path) -> ImportResult<ImportOutcome<Warehouse>> {
        let started = Instant::now();
        let rows = self.parser.parse_to_raw_records(file_path)?;

        // 首行为表头,数据行号从 2 起
        let raw_records: Vec<RawWarehouseRecord> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| FieldMapper::map_warehouse_row(row, idx + 2))
            .collect();

        let mut violations = DataValidator::validate_warehouse_keys(&raw_records);
        for record in &raw_records {
            violations.extend(DataValidator::validate_warehouse_row(record));
        }

        let blocked_rows = blocked_row_numbers(&violations);
        let records: Vec<Warehouse> = raw_records
            .iter()
            .filter(|r| !blocked_rows.contains(&r.row_number))
            .filter_map(to_warehouse)
            .collect();

        let outcome = build_outcome(records, raw_records.len(), violations, started);
        log_outcome("warehouses", file_path, &outcome.report.summary);
        Ok(outcome)
    }

    /// 导入订单表
    pub fn import_orders(&self, file_path: &Path) -> ImportResult<ImportOutcome<Order>> {
        let started = Instant::now();
        let rows = self.parser.parse_to_raw_records(file_path)?;

        let raw_records: Vec<RawOrderRecord> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| FieldMapper::map_order_row(row, idx + 2))
            .collect();

        let mut violations = DataValidator::validate_order_keys(&raw_records);
        for record in &raw_records {
            violations.extend(DataValidator::validate_order_row(record));
        }

        let blocked_rows = blocked_row_numbers(&violations);
        let records: Vec<Order> = raw_records
            .iter()
            .filter(|r| !blocked_rows.contains(&r.row_number))
            .filter_map(to_order)
            .collect();

        let outcome = build_outcome(records, raw_records.len(), violations, started);
        log_outcome("orders", file_path, &outcome.report.summary);
        Ok(outcome)
    }
}

impl Default for DataImporter {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// Error/Conflict 级违规命中的行号集合
fn blocked_row_numbers(violations: &[DqViolation]) -> HashSet<usize> {
    violations
        .iter()
        .filter(|v| matches!(v.level, DqLevel::Error | DqLevel::Conflict))
        .map(|v| v.row_number)
        .collect()
}

/// 未被阻断的行此处字段必然齐备,缺失兜底返回 None 直接跳过
fn to_warehouse(record: &RawWarehouseRecord) -> Option<Warehouse> {
    Some(Warehouse {
        warehouse_id: record.warehouse_id.clone()?,
        name: record.name.clone()?,
        location: record.location.clone(),
        capacity: record.capacity?,
        current_stock: record.current_stock?,
        storage_cost: record.storage_cost?,
        latitude: record.latitude?,
        longitude: record.longitude?,
        last_updated: record.last_updated,
    })
}

fn to_order(record: &RawOrderRecord) -> Option<Order> {
    Some(Order {
        order_id: record.order_id.clone()?,
        order_date: record.order_date?,
        product_id: record.product_id.clone(),
        quantity: record.quantity?,
        delivery_deadline: record.delivery_deadline?,
        status: record
            .status
            .as_deref()
            .map(OrderPriority::from_str)
            .unwrap_or(OrderPriority::Normal),
        delivery_latitude: record.delivery_latitude?,
        delivery_longitude: record.delivery_longitude?,
    })
}

fn build_outcome<T>(
    records: Vec<T>,
    total_rows: usize,
    violations: Vec<DqViolation>,
    started: Instant,
) -> ImportOutcome<T> {
    let blocked = blocked_row_numbers(&violations).len();
    let warning = violations
        .iter()
        .filter(|v| v.level == DqLevel::Warning)
        .count();
    let conflict = violations
        .iter()
        .filter(|v| v.level == DqLevel::Conflict)
        .count();

    ImportOutcome {
        report: DqReport {
            batch_id: Uuid::new_v4(),
            summary: DqSummary {
                total_rows,
                success: records.len(),
                blocked,
                warning,
                conflict,
            },
            violations,
        },
        records,
        elapsed: started.elapsed(),
    }
}

fn log_outcome(table: &str, file_path: &Path, summary: &DqSummary) {
    if summary.blocked > 0 || summary.conflict > 0 {
        warn!(
            table,
            file = %file_path.display(),
            total = summary.total_rows,
            success = summary.success,
            blocked = summary.blocked,
            conflict = summary.conflict,
            "导入存在阻断行"
        );
    } else {
        info!(
            table,
            file = %file_path.display(),
            total = summary.total_rows,
            success = summary.success,
            warning = summary.warning,
            "导入完成"
        );
    }
}
