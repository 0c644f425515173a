// ==========================================
// 智能仓储物流分配系统 - 仓库领域模型
// ==========================================
// 依据: 数据字典 - warehouses 表
// 红线: 引擎只读输入快照,库存消耗记录在私有工作库存中
// ==========================================

use crate::domain::types::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Warehouse - 仓库主数据
// ==========================================
// 用途: 导入层写入,引擎层只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    // ===== 主键 =====
    pub warehouse_id: String, // 仓库唯一标识

    // ===== 基础信息 =====
    pub name: String,             // 仓库名称
    pub location: Option<String>, // 所在区域（自由文本）

    // ===== 库存维度 =====
    pub capacity: i64,      // 总容量（件）
    pub current_stock: i64, // 当前库存（件）, 0 <= stock <= capacity 由导入层校验
    pub storage_cost: f64,  // 单位仓储成本

    // ===== 地理坐标 =====
    pub latitude: f64,  // 纬度 [-90, 90]
    pub longitude: f64, // 经度 [-180, 180]

    // ===== 审计字段 =====
    pub last_updated: Option<DateTime<Utc>>, // 源数据最后更新时间
}

impl Warehouse {
    /// 仓库所在坐标点
    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

// ==========================================
// RawWarehouseRecord - 导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 字段映射 → 此结构）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWarehouseRecord {
    // 源字段（已类型转换, 解析失败记为 None）
    pub warehouse_id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    pub current_stock: Option<i64>,
    pub storage_cost: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,

    // 元信息
    pub row_number: usize, // 原始文件行号（用于 DQ 报告）
}
