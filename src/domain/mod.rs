// ==========================================
// 智能仓储物流分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、结果结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod ingest;
pub mod order;
pub mod types;
pub mod warehouse;

// 重导出核心类型
pub use allocation::{
    AllocationRecord, AuditContext, OptimizationResult, OptimizationSummary, PerformanceMetrics,
    UnfulfilledOrder, WarehouseUtilization, REASON_INSUFFICIENT_STOCK,
};
pub use ingest::{DqLevel, DqReport, DqSummary, DqViolation, ImportOutcome};
pub use order::{Order, RawOrderRecord};
pub use types::{DistanceUnit, GeoPoint, OptimizationStatus, OrderPriority};
pub use warehouse::{RawWarehouseRecord, Warehouse};
