// ==========================================
// 智能仓储物流分配系统 - 导入数据质量模型
// ==========================================
// 职责: DQ 违规/汇总/报告结构（导入管道公共产物）
// ==========================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Error,    // 错误（阻断导入）
    Warning,  // 警告（允许导入）
    Info,     // 提示（仅记录）
    Conflict, // 冲突（主键重复等）
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,          // 原始文件行号
    pub record_id: Option<String>,  // 主键（如果可解析）
    pub level: DqLevel,             // 违规级别
    pub field: String,              // 违规字段
    pub message: String,            // 违规描述
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize, // 总行数
    pub success: usize,    // 成功导入
    pub blocked: usize,    // 阻断（ERROR）
    pub warning: usize,    // 警告（WARNING）
    pub conflict: usize,   // 冲突（CONFLICT）
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DqReport {
    pub batch_id: Uuid,               // 导入批次 ID
    pub summary: DqSummary,           // 汇总统计
    pub violations: Vec<DqViolation>, // 违规明细
}

impl DqReport {
    /// 是否存在阻断级违规
    pub fn has_blocking_violations(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v.level, DqLevel::Error | DqLevel::Conflict))
    }
}

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
// 用途: 导入接口返回值（已转换的领域记录 + DQ 报告）
#[derive(Debug, Clone)]
pub struct ImportOutcome<T> {
    pub records: Vec<T>,                   // 通过校验的领域记录
    pub report: DqReport,                  // DQ 报告
    pub elapsed: std::time::Duration,      // 导入耗时
}
