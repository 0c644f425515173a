// ==========================================
// 智能仓储物流分配系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
///
/// 运行级失败整单中止,不产生部分结果;
/// 坐标异常/库存不足不属于错误,分别以哨兵距离和未满足记录表达
#[derive(Error, Debug)]
pub enum OptimizeError {
    // ===== 输入快照不一致 =====
    #[error("仓库ID重复: {0}")]
    DuplicateWarehouseId(String),

    #[error("工作库存缺少仓库条目: {0}")]
    MissingWorkingStock(String),

    // ===== 通用错误 =====
    #[error("优化过程失败: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type OptimizeResult<T> = Result<T, OptimizeError>;
