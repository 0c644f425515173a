// ==========================================
// 智能仓储物流分配系统 - 订单领域模型
// ==========================================
// 依据: 数据字典 - orders 表
// ==========================================

use crate::domain::types::{GeoPoint, OrderPriority};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 需求订单
// ==========================================
// 用途: 导入层写入,引擎层只读
// 说明: 交期过滤在数据访问层完成,引擎不做硬约束
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    // ===== 主键 =====
    pub order_id: String, // 订单唯一标识

    // ===== 基础信息 =====
    pub order_date: NaiveDate,      // 下单日期
    pub product_id: Option<String>, // 商品标识（引擎不消费）
    pub quantity: i64,              // 需求数量（件, > 0 由导入层校验）

    // ===== 交付信息 =====
    pub delivery_deadline: NaiveDate, // 交付截止日期
    pub status: OrderPriority,        // 优先级（仅用于排序）

    // ===== 交付坐标 =====
    pub delivery_latitude: f64,  // 交付点纬度
    pub delivery_longitude: f64, // 交付点经度
}

impl Order {
    /// 交付点坐标
    pub fn delivery_point(&self) -> GeoPoint {
        GeoPoint::new(self.delivery_latitude, self.delivery_longitude)
    }
}

// ==========================================
// RawOrderRecord - 导入中间结构体
// ==========================================
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrderRecord {
    // 源字段（已类型转换, 解析失败记为 None）
    pub order_id: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
    pub delivery_deadline: Option<NaiveDate>,
    pub status: Option<String>,
    pub delivery_latitude: Option<f64>,
    pub delivery_longitude: Option<f64>,

    // 元信息
    pub row_number: usize, // 原始文件行号（用于 DQ 报告）
}
