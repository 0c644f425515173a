// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据构造等功能
// ==========================================

use chrono::NaiveDate;
use logitrack_aps::db;
use logitrack_aps::domain::types::OrderPriority;
use logitrack_aps::domain::{Order, Warehouse};
use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    let conn = Connection::open(&db_path)?;
    db::configure_sqlite_connection(&conn)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 创建测试用仓库
pub fn create_test_warehouse(
    warehouse_id: &str,
    stock: i64,
    capacity: i64,
    storage_cost: f64,
    latitude: f64,
    longitude: f64,
) -> Warehouse {
    Warehouse {
        warehouse_id: warehouse_id.to_string(),
        name: format!("仓库 {}", warehouse_id),
        location: Some("East".to_string()),
        capacity,
        current_stock: stock,
        storage_cost,
        latitude,
        longitude,
        last_updated: None,
    }
}

/// 创建测试用订单
pub fn create_test_order(
    order_id: &str,
    quantity: i64,
    status: OrderPriority,
    latitude: f64,
    longitude: f64,
) -> Order {
    Order {
        order_id: order_id.to_string(),
        order_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        product_id: Some("P001".to_string()),
        quantity,
        delivery_deadline: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        status,
        delivery_latitude: latitude,
        delivery_longitude: longitude,
    }
}
