use crate::db::open_sqlite_connection;
use crate::domain::order::Order;
use crate::domain::types::OrderPriority;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// OrderRepository - 订单仓储
// ==========================================
/// 订单仓储
/// 职责: 管理 orders 表的数据访问 + 交期过滤
/// 说明: 交期过滤在此层完成,引擎收到的订单已是待履约集合
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    /// 创建新的 OrderRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量插入订单（INSERT OR REPLACE,事务内）
    pub fn batch_insert(&self, orders: &[Order]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        for order in orders {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO orders (
                    order_id, order_date, product_id, quantity,
                    delivery_deadline, status, delivery_latitude, delivery_longitude
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    order.order_id,
                    order.order_date.to_string(),
                    order.product_id,
                    order.quantity,
                    order.delivery_deadline.to_string(),
                    order.status.to_db_str(),
                    order.delivery_latitude,
                    order.delivery_longitude,
                ],
            )?;
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// 查询所有订单（下单日期倒序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT order_id, order_date, product_id, quantity,
                   delivery_deadline, status, delivery_latitude, delivery_longitude
            FROM orders
            ORDER BY order_date DESC, order_id
            "#,
        )?;

        let orders = stmt
            .query_map([], map_order_row)?
            .collect::<SqliteResult<Vec<Order>>>()?;

        Ok(orders)
    }

    /// 查询待履约订单
    ///
    /// 口径: 已下单（order_date <= today）且未过交付期（delivery_deadline >= today）
    pub fn find_pending(&self, today: NaiveDate) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT order_id, order_date, product_id, quantity,
                   delivery_deadline, status, delivery_latitude, delivery_longitude
            FROM orders
            WHERE delivery_deadline >= ?1 AND order_date <= ?1
            ORDER BY order_date DESC, order_id
            "#,
        )?;

        let orders = stmt
            .query_map(params![today.to_string()], map_order_row)?
            .collect::<SqliteResult<Vec<Order>>>()?;

        Ok(orders)
    }
}

/// 行映射: SELECT 列顺序与此保持一致
fn map_order_row(row: &Row<'_>) -> SqliteResult<Order> {
    let order_date: String = row.get(1)?;
    let delivery_deadline: String = row.get(4)?;
    let status: String = row.get(5)?;

    Ok(Order {
        order_id: row.get(0)?,
        order_date: parse_stored_date(&order_date, 1)?,
        product_id: row.get(2)?,
        quantity: row.get(3)?,
        delivery_deadline: parse_stored_date(&delivery_deadline, 4)?,
        status: OrderPriority::from_str(&status),
        delivery_latitude: row.get(6)?,
        delivery_longitude: row.get(7)?,
    })
}

/// 库内日期统一为 ISO 格式,解析失败按类型错误上抛
fn parse_stored_date(value: &str, column: usize) -> SqliteResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::InvalidColumnType(
            column,
            "date".to_string(),
            rusqlite::types::Type::Text,
        )
    })
}
