// ==========================================
// 智能仓储物流分配系统 - 引擎层
// ==========================================
// 职责: 实现分配业务规则,不拼 SQL
// 红线: 引擎不回写调用方快照,所有未满足必须输出 reason
// ==========================================

pub mod distance;
pub mod error;
pub mod optimizer;

// 重导出核心引擎
pub use distance::{DistanceCalculator, EARTH_RADIUS_KM, EARTH_RADIUS_MILES, UNREACHABLE};
pub use error::{OptimizeError, OptimizeResult};
pub use optimizer::{AllocationEngine, STORAGE_COST_FACTOR, TRANSPORT_COST_PER_DISTANCE_UNIT};
