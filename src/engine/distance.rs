// ==========================================
// 智能仓储物流分配系统 - 距离计算引擎
// ==========================================
// 职责: 仓库到交付点的大圆距离（haversine）
// 红线: 坐标异常不得向上传播错误,返回"不可达"哨兵值
// ==========================================

use crate::domain::types::{DistanceUnit, GeoPoint};
use tracing::warn;

/// 地球半径（公里）
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 地球半径（英里）
pub const EARTH_RADIUS_MILES: f64 = 3959.87433;

/// 不可达哨兵值: 坐标无效时返回,使该仓库在成本比较中永远不被选中
pub const UNREACHABLE: f64 = f64::INFINITY;

// ==========================================
// DistanceCalculator - 距离计算器
// ==========================================
// 无状态计算,两种单位共用同一条代码路径
#[derive(Debug, Clone, Copy)]
pub struct DistanceCalculator {
    unit: DistanceUnit,
}

impl DistanceCalculator {
    pub fn new(unit: DistanceUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// 计算两点间大圆距离
    ///
    /// haversine 公式:
    ///   a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
    ///   d = 2·R·atan2(√a, √(1−a))
    ///
    /// 坐标无效（非有限数值或超出经纬度范围）时返回 UNREACHABLE,不报错
    pub fn distance(&self, origin: GeoPoint, destination: GeoPoint) -> f64 {
        if !origin.is_valid() || !destination.is_valid() {
            warn!(
                origin_lat = origin.latitude,
                origin_lon = origin.longitude,
                dest_lat = destination.latitude,
                dest_lon = destination.longitude,
                "坐标无效,距离记为不可达"
            );
            return UNREACHABLE;
        }

        let lat1 = origin.latitude.to_radians();
        let lon1 = origin.longitude.to_radians();
        let lat2 = destination.latitude.to_radians();
        let lon2 = destination.longitude.to_radians();

        let dlat = lat2 - lat1;
        let dlon = lon2 - lon1;

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        let radius = match self.unit {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Miles => EARTH_RADIUS_MILES,
        };

        radius * c
    }
}

impl Default for DistanceCalculator {
    fn default() -> Self {
        Self::new(DistanceUnit::Kilometers)
    }
}
