// ==========================================
// 智能仓储物流分配系统 - 领域类型定义
// ==========================================
// 依据: 数据字典 - 订单状态/距离单位/运行状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单优先级 (Order Priority)
// ==========================================
// 红线: 等级制,不是评分制
// 排序语义: 升序排列时紧急订单排在最前
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPriority {
    Urgent, // 紧急
    Normal, // 正常
    Low,    // 低优先级
}

impl fmt::Display for OrderPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderPriority::Urgent => write!(f, "URGENT"),
            OrderPriority::Normal => write!(f, "NORMAL"),
            OrderPriority::Low => write!(f, "LOW"),
        }
    }
}

impl OrderPriority {
    /// 从字符串解析优先级（大小写不敏感）
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "URGENT" => OrderPriority::Urgent,
            "LOW" => OrderPriority::Low,
            _ => OrderPriority::Normal, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OrderPriority::Urgent => "URGENT",
            OrderPriority::Normal => "NORMAL",
            OrderPriority::Low => "LOW",
        }
    }
}

// ==========================================
// 优化运行状态 (Optimization Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationStatus {
    InProgress, // 进行中
    Completed,  // 已完成
}

impl fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationStatus::InProgress => write!(f, "IN_PROGRESS"),
            OptimizationStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

// ==========================================
// 距离单位 (Distance Unit)
// ==========================================
// 两种单位共用同一条 haversine 代码路径，仅地球半径不同
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceUnit {
    Kilometers, // 公里（分配主路径）
    Miles,      // 英里
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Kilometers => write!(f, "KILOMETERS"),
            DistanceUnit::Miles => write!(f, "MILES"),
        }
    }
}

// ==========================================
// 地理坐标点 (Geo Point)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,  // 纬度 [-90, 90]
    pub longitude: f64, // 经度 [-180, 180]
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// 坐标是否有效（有限数值且在经纬度范围内）
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering_urgent_first() {
        // 升序排列时 URGENT < NORMAL < LOW
        assert!(OrderPriority::Urgent < OrderPriority::Normal);
        assert!(OrderPriority::Normal < OrderPriority::Low);

        let mut priorities = vec![
            OrderPriority::Low,
            OrderPriority::Urgent,
            OrderPriority::Normal,
        ];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![
                OrderPriority::Urgent,
                OrderPriority::Normal,
                OrderPriority::Low
            ]
        );
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!(OrderPriority::from_str("urgent"), OrderPriority::Urgent);
        assert_eq!(OrderPriority::from_str(" URGENT "), OrderPriority::Urgent);
        assert_eq!(OrderPriority::from_str("low"), OrderPriority::Low);
        // 未知值回落到 NORMAL
        assert_eq!(OrderPriority::from_str("whatever"), OrderPriority::Normal);
        assert_eq!(OrderPriority::from_str(""), OrderPriority::Normal);
    }

    #[test]
    fn test_geo_point_validity() {
        assert!(GeoPoint::new(40.0, -75.0).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());

        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }
}
