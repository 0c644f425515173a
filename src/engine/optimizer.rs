// ==========================================
// 智能仓储物流分配系统 - 分配优化引擎
// ==========================================
// 职责: 贪心分配（排序 → 逐单选仓 → 扣减工作库存 → 汇总指标）
// 输入: 仓库快照 + 订单快照（已通过导入层校验/过滤）
// 输出: OptimizationResult
// 红线: 不回写调用方快照; 整单分配,不拆单
// ==========================================

use crate::config::OptimizationParams;
use crate::domain::allocation::{
    AllocationRecord, AuditContext, OptimizationResult, PerformanceMetrics, UnfulfilledOrder,
    WarehouseUtilization, REASON_INSUFFICIENT_STOCK,
};
use crate::domain::order::Order;
use crate::domain::types::{DistanceUnit, OptimizationStatus};
use crate::domain::warehouse::Warehouse;
use crate::engine::distance::DistanceCalculator;
use crate::engine::error::{OptimizeError, OptimizeResult};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// 单位距离运输费率
pub const TRANSPORT_COST_PER_DISTANCE_UNIT: f64 = 10.0;

/// 仓储成本附加系数（按搬运量比例计费）
pub const STORAGE_COST_FACTOR: f64 = 0.01;

// ==========================================
// AllocationEngine - 分配优化引擎
// ==========================================
pub struct AllocationEngine {
    calculator: DistanceCalculator,
    transport_cost_per_unit_distance: f64,
    storage_cost_factor: f64,
    /// 求解时间上限（秒）。贪心过程不消费该值,保留给后续非贪心策略
    solver_time_limit_secs: u64,
}

/// 单个订单的候选仓库评估结果
struct Candidate<'a> {
    warehouse: &'a Warehouse,
    cost: f64,
    distance: f64,
}

impl AllocationEngine {
    /// 构造函数（公里路径 + 默认费率）
    pub fn new() -> Self {
        Self {
            calculator: DistanceCalculator::new(DistanceUnit::Kilometers),
            transport_cost_per_unit_distance: TRANSPORT_COST_PER_DISTANCE_UNIT,
            storage_cost_factor: STORAGE_COST_FACTOR,
            solver_time_limit_secs: OptimizationParams::default().max_solver_time_secs,
        }
    }

    /// 按配置构造（距离单位 + 优化参数）
    pub fn with_config(unit: DistanceUnit, params: &OptimizationParams) -> Self {
        Self {
            calculator: DistanceCalculator::new(unit),
            transport_cost_per_unit_distance: TRANSPORT_COST_PER_DISTANCE_UNIT,
            storage_cost_factor: STORAGE_COST_FACTOR,
            solver_time_limit_secs: params.max_solver_time_secs,
        }
    }

    /// 配置的求解时间上限（秒）
    pub fn solver_time_limit_secs(&self) -> u64 {
        self.solver_time_limit_secs
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行一次分配优化
    ///
    /// 流程:
    /// 1) 建立工作库存映射（本次调用私有,与输入快照分离）
    /// 2) 订单排序: 优先级升序（紧急在前）、同级数量降序、再同保持输入顺序
    /// 3) 逐单在当前工作库存上选成本最低的可行仓库,严格更低才替换,成本相同先见者胜
    /// 4) 命中则落分配记录并扣减库存,否则落未满足记录
    /// 5) 置状态为已完成,计算耗时与性能指标
    ///
    /// # 返回
    /// - Ok(OptimizationResult): 完整结果
    /// - Err(OptimizeError): 运行级失败（如仓库主键重复）,无部分结果
    #[instrument(skip(self, warehouses, orders, audit), fields(
        warehouse_count = warehouses.len(),
        order_count = orders.len(),
        user = %audit.user
    ))]
    pub fn optimize(
        &self,
        warehouses: &[Warehouse],
        orders: &[Order],
        audit: &AuditContext,
    ) -> OptimizeResult<OptimizationResult> {
        let started = Instant::now();
        info!("开始分配优化");

        // 1. 输入快照索引 + 工作库存（仓库ID → 剩余库存）
        let mut working_stock: HashMap<&str, i64> = HashMap::with_capacity(warehouses.len());
        for warehouse in warehouses {
            if working_stock
                .insert(warehouse.warehouse_id.as_str(), warehouse.current_stock)
                .is_some()
            {
                return Err(OptimizeError::DuplicateWarehouseId(
                    warehouse.warehouse_id.clone(),
                ));
            }
        }

        // 本次运行内各仓库的累计分配量（利用率基线计算用）
        let mut allocated_total: HashMap<&str, i64> = HashMap::new();

        let mut result = OptimizationResult::new(audit);

        // 2. 订单排序
        let sorted_orders = self.sort_orders(orders);

        // 3. 逐单选仓
        for order in sorted_orders {
            let mut best: Option<Candidate<'_>> = None;

            for warehouse in warehouses {
                let stock = working_stock
                    .get(warehouse.warehouse_id.as_str())
                    .copied()
                    .ok_or_else(|| {
                        OptimizeError::MissingWorkingStock(warehouse.warehouse_id.clone())
                    })?;

                if stock < order.quantity {
                    continue;
                }

                let distance = self
                    .calculator
                    .distance(warehouse.geo_point(), order.delivery_point());
                let cost = distance * self.transport_cost_per_unit_distance
                    + warehouse.storage_cost * order.quantity as f64 * self.storage_cost_factor;

                // 严格更低才替换: 坐标无效产生的无穷成本永远不会当选,
                // 成本完全相同时保留先遇到的仓库
                let is_better = match &best {
                    None => cost < f64::INFINITY,
                    Some(current) => cost < current.cost,
                };
                if is_better {
                    best = Some(Candidate {
                        warehouse,
                        cost,
                        distance,
                    });
                }
            }

            // 4. 提交分配或记录未满足
            match best {
                Some(candidate) => {
                    self.commit_allocation(
                        &candidate,
                        order,
                        &mut working_stock,
                        &mut allocated_total,
                        &mut result,
                    )?;
                }
                None => {
                    debug!(order_id = %order.order_id, quantity = order.quantity, "无可行仓库");
                    result.unfulfilled_orders.push(UnfulfilledOrder {
                        order_id: order.order_id.clone(),
                        quantity: order.quantity,
                        reason: REASON_INSUFFICIENT_STOCK.to_string(),
                    });
                }
            }
        }

        // 5. 收尾
        result.solving_time_secs = started.elapsed().as_secs_f64();
        result.status = OptimizationStatus::Completed;
        result.performance_metrics = PerformanceMetrics::compute(
            orders.len(),
            result.unfulfilled_orders.len(),
            result.total_cost,
        );

        info!(
            fulfilled = result.performance_metrics.fulfilled_orders,
            unfulfilled = result.unfulfilled_orders.len(),
            total_cost = result.total_cost,
            "分配优化完成"
        );

        Ok(result)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 订单处理顺序: 优先级升序、数量降序,稳定排序保证同键订单保持输入顺序
    fn sort_orders<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let mut sorted: Vec<&Order> = orders.iter().collect();
        sorted.sort_by(|a, b| {
            a.status
                .cmp(&b.status)
                .then_with(|| b.quantity.cmp(&a.quantity))
        });
        sorted
    }

    /// 提交一条分配: 落记录、扣减工作库存、覆写利用率、累计总成本
    fn commit_allocation<'a>(
        &self,
        candidate: &Candidate<'a>,
        order: &Order,
        working_stock: &mut HashMap<&'a str, i64>,
        allocated_total: &mut HashMap<&'a str, i64>,
        result: &mut OptimizationResult,
    ) -> OptimizeResult<()> {
        let warehouse = candidate.warehouse;
        let warehouse_id = warehouse.warehouse_id.as_str();

        let stock = working_stock
            .get_mut(warehouse_id)
            .ok_or_else(|| OptimizeError::MissingWorkingStock(warehouse.warehouse_id.clone()))?;
        // 选择阶段已保证 stock >= quantity
        *stock -= order.quantity;
        let remaining = *stock;

        let total = allocated_total.entry(warehouse_id).or_insert(0);
        *total += order.quantity;

        result
            .allocation_plan
            .entry(warehouse.warehouse_id.clone())
            .or_default()
            .push(AllocationRecord {
                warehouse_id: warehouse.warehouse_id.clone(),
                order_id: order.order_id.clone(),
                quantity: order.quantity,
                cost: candidate.cost,
                distance: candidate.distance,
            });

        // 利用率基线取运行前库存/容量,每次分配到该仓库时覆写
        let utilization_percentage = if warehouse.capacity > 0 {
            remaining as f64 / warehouse.capacity as f64 * 100.0
        } else {
            0.0
        };
        result.warehouse_utilization.insert(
            warehouse.warehouse_id.clone(),
            WarehouseUtilization {
                warehouse_name: warehouse.name.clone(),
                initial_stock: warehouse.current_stock,
                used_capacity: *total,
                remaining_stock: remaining,
                total_capacity: warehouse.capacity,
                utilization_percentage,
            },
        );

        result.total_cost += candidate.cost;

        debug!(
            order_id = %order.order_id,
            warehouse_id = %warehouse.warehouse_id,
            cost = candidate.cost,
            distance = candidate.distance,
            remaining_stock = remaining,
            "订单已分配"
        );

        Ok(())
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new()
    }
}
