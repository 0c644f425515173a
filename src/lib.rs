// ==========================================
// 智能仓储物流分配系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (分配方案供人工确认)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 结果导出
pub mod export;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DistanceUnit, GeoPoint, OptimizationStatus, OrderPriority};

// 领域实体
pub use domain::{
    AllocationRecord, AuditContext, Order, OptimizationResult, OptimizationSummary,
    UnfulfilledOrder, Warehouse, WarehouseUtilization,
};

// 引擎
pub use engine::{AllocationEngine, DistanceCalculator, OptimizeError};

// 导入
pub use importer::DataImporter;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "智能仓储物流分配系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";
