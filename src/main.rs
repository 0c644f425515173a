// ==========================================
// 智能仓储物流分配系统 - 主入口
// ==========================================
// 技术栈: Rust + SQLite
// 流程: 导入 CSV → 落库 → 加载快照 → 分配优化 → 摘要/导出
// ==========================================

use anyhow::{Context, Result};
use chrono::Utc;
use logitrack_aps::config::AppConfig;
use logitrack_aps::db;
use logitrack_aps::domain::AuditContext;
use logitrack_aps::engine::AllocationEngine;
use logitrack_aps::export::{export_results, ExportFormat};
use logitrack_aps::importer::DataImporter;
use logitrack_aps::repository::{OrderRepository, WarehouseRepository};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

fn main() -> Result<()> {
    // 初始化日志系统
    logitrack_aps::logging::init();

    info!("==================================================");
    info!("{} - 决策支持系统", logitrack_aps::APP_NAME);
    info!("系统版本: {}", logitrack_aps::VERSION);
    info!("==================================================");

    // 数据目录（第一个参数,默认 data/）
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    // 加载配置
    let config = AppConfig::load_or_default(Path::new("logitrack.json"));

    // 获取数据库路径
    let db_path = config.resolve_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("无法创建数据目录: {}", parent.display()))?;
    }
    info!("使用数据库: {}", db_path.display());

    let conn = db::open_sqlite_connection(&db_path.to_string_lossy()).context("数据库连接失败")?;
    db::init_schema(&conn).context("数据库初始化失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let warehouse_repo = WarehouseRepository::from_connection(conn.clone());
    let order_repo = OrderRepository::from_connection(conn);

    // 导入 CSV 数据
    let importer = DataImporter::new();
    let warehouse_outcome = importer
        .import_warehouses(&data_dir.join("sample_warehouses.csv"))
        .context("仓库数据导入失败")?;
    warehouse_repo
        .batch_insert(&warehouse_outcome.records)
        .context("仓库数据落库失败")?;

    let order_outcome = importer
        .import_orders(&data_dir.join("sample_orders.csv"))
        .context("订单数据导入失败")?;
    order_repo
        .batch_insert(&order_outcome.records)
        .context("订单数据落库失败")?;

    // 加载分配输入快照
    let warehouses = warehouse_repo.list_all().context("仓库快照加载失败")?;
    let today = Utc::now().date_naive();
    let orders = order_repo.find_pending(today).context("待履约订单加载失败")?;
    info!(
        warehouses = warehouses.len(),
        pending_orders = orders.len(),
        "分配输入快照就绪"
    );

    // 执行分配优化
    let engine = AllocationEngine::with_config(config.distance_unit, &config.optimization);
    let audit = AuditContext {
        user: std::env::var("USER").unwrap_or_else(|_| "system".to_string()),
        timestamp: Utc::now(),
    };
    let result = engine
        .optimize(&warehouses, &orders, &audit)
        .context("分配优化失败")?;

    // 输出摘要
    let summary = result.summary();
    info!("================== 优化摘要 ==================");
    info!("状态: {}", summary.status);
    info!("订单总数: {}", summary.total_orders);
    info!("已满足: {}", summary.fulfilled_orders);
    info!("满足率: {:.1}%", summary.fulfillment_rate);
    info!("总成本: {:.2}", summary.total_cost);
    info!("单均成本: {:.2}", summary.average_cost_per_order);
    info!("求解耗时: {:.2}s", summary.solving_time_secs);
    info!("==============================================");

    // 导出完整结果
    let output = format!(
        "optimization_results_{}.json",
        Utc::now().format("%Y%m%d_%H%M%S")
    );
    export_results(&result, ExportFormat::Json, Path::new(&output)).context("结果导出失败")?;

    Ok(())
}
