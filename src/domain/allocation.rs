// ==========================================
// 智能仓储物流分配系统 - 分配结果领域模型
// ==========================================
// 依据: 数据字典 - 分配方案/仓库利用率/性能指标
// 红线: 结果结构在一次 optimize 调用内增量填充,返回后只读
// ==========================================

use crate::domain::types::OptimizationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 订单无法满足时的固定原因文案
pub const REASON_INSUFFICIENT_STOCK: &str = "Insufficient stock across all warehouses";

// ==========================================
// AllocationRecord - 分配记录
// ==========================================
// 每个被满足的订单恰好产生一条,生成后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub warehouse_id: String, // 供货仓库
    pub order_id: String,     // 订单号
    pub quantity: i64,        // 分配数量（整单,不拆分）
    pub cost: f64,            // 本单综合成本（运输 + 仓储）
    pub distance: f64,        // 仓库到交付点的大圆距离
}

// ==========================================
// UnfulfilledOrder - 未满足订单记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnfulfilledOrder {
    pub order_id: String,
    pub quantity: i64,
    pub reason: String, // 固定为 REASON_INSUFFICIENT_STOCK
}

// ==========================================
// WarehouseUtilization - 仓库利用率快照
// ==========================================
// 基线: 本次运行前的原始库存/容量,每次分配到该仓库时覆写
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseUtilization {
    pub warehouse_name: String,
    pub initial_stock: i64,           // 运行前库存
    pub used_capacity: i64,           // 本次运行累计分配量
    pub remaining_stock: i64,         // 运行后剩余库存
    pub total_capacity: i64,          // 仓库总容量
    pub utilization_percentage: f64,  // (initial_stock - used_capacity) / capacity * 100
}

// ==========================================
// PerformanceMetrics - 性能指标
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_orders: usize,
    pub fulfilled_orders: usize,
    pub fulfillment_rate: f64,        // 百分比, 零订单时为 0
    pub average_cost_per_order: f64,  // 零满足时为 0
}

impl PerformanceMetrics {
    /// 由运行汇总量计算指标（除零场景按约定取 0）
    pub fn compute(total_orders: usize, unfulfilled_orders: usize, total_cost: f64) -> Self {
        let fulfilled_orders = total_orders.saturating_sub(unfulfilled_orders);
        let fulfillment_rate = if total_orders > 0 {
            fulfilled_orders as f64 / total_orders as f64 * 100.0
        } else {
            0.0
        };
        let average_cost_per_order = if fulfilled_orders > 0 {
            total_cost / fulfilled_orders as f64
        } else {
            0.0
        };

        Self {
            total_orders,
            fulfilled_orders,
            fulfillment_rate,
            average_cost_per_order,
        }
    }
}

// ==========================================
// AuditContext - 审计上下文
// ==========================================
// 操作人与时间戳由调用方显式传入,引擎内不使用进程级常量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditContext {
    pub user: String,
    pub timestamp: DateTime<Utc>,
}

// ==========================================
// OptimizationResult - 优化运行结果
// ==========================================
// 生命周期: optimize 开始时创建为空,逐单填充,结束后只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub run_id: Uuid,

    // ===== 分配方案 =====
    pub allocation_plan: BTreeMap<String, Vec<AllocationRecord>>, // 仓库ID → 分配记录
    pub warehouse_utilization: BTreeMap<String, WarehouseUtilization>,
    pub unfulfilled_orders: Vec<UnfulfilledOrder>,

    // ===== 汇总量 =====
    pub total_cost: f64,
    pub solving_time_secs: f64,
    pub status: OptimizationStatus,

    // ===== 审计字段 =====
    pub optimization_timestamp: DateTime<Utc>,
    pub optimization_user: String,

    // ===== 派生指标 =====
    pub performance_metrics: PerformanceMetrics,
}

impl OptimizationResult {
    /// 创建空结果（状态为进行中,由引擎逐步填充）
    pub fn new(audit: &AuditContext) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            allocation_plan: BTreeMap::new(),
            warehouse_utilization: BTreeMap::new(),
            unfulfilled_orders: Vec::new(),
            total_cost: 0.0,
            solving_time_secs: 0.0,
            status: OptimizationStatus::InProgress,
            optimization_timestamp: audit.timestamp,
            optimization_user: audit.user.clone(),
            performance_metrics: PerformanceMetrics::default(),
        }
    }

    /// 本次运行中产生的分配记录总数
    pub fn allocated_count(&self) -> usize {
        self.allocation_plan.values().map(|records| records.len()).sum()
    }

    /// 生成展示用摘要（只做舍入,不引入新计算）
    pub fn summary(&self) -> OptimizationSummary {
        OptimizationSummary {
            total_cost: round2(self.total_cost),
            total_orders: self.performance_metrics.total_orders,
            fulfilled_orders: self.performance_metrics.fulfilled_orders,
            fulfillment_rate: round1(self.performance_metrics.fulfillment_rate),
            average_cost_per_order: round2(self.performance_metrics.average_cost_per_order),
            solving_time_secs: round2(self.solving_time_secs),
            status: self.status,
            timestamp: self.optimization_timestamp,
        }
    }
}

// ==========================================
// OptimizationSummary - 展示用摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSummary {
    pub total_cost: f64,             // 2 位小数
    pub total_orders: usize,
    pub fulfilled_orders: usize,
    pub fulfillment_rate: f64,       // 1 位小数
    pub average_cost_per_order: f64, // 2 位小数
    pub solving_time_secs: f64,      // 2 位小数
    pub status: OptimizationStatus,
    pub timestamp: DateTime<Utc>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
