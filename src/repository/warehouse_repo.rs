use crate::db::open_sqlite_connection;
use crate::domain::warehouse::Warehouse;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// WarehouseRepository - 仓库主数据仓储
// ==========================================
/// 仓库主数据仓储
/// 职责: 管理 warehouses 表的数据访问
/// 红线: 不含业务逻辑,只负责数据访问
pub struct WarehouseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WarehouseRepository {
    /// 创建新的 WarehouseRepository 实例
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量插入仓库主数据（INSERT OR REPLACE）
    ///
    /// # 说明
    /// - upsert 语义: warehouse_id 已存在则整行更新
    /// - 使用事务确保原子性
    pub fn batch_insert(&self, warehouses: &[Warehouse]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        for warehouse in warehouses {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO warehouses (
                    warehouse_id, name, location, capacity, current_stock,
                    storage_cost, latitude, longitude, last_updated
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    warehouse.warehouse_id,
                    warehouse.name,
                    warehouse.location,
                    warehouse.capacity,
                    warehouse.current_stock,
                    warehouse.storage_cost,
                    warehouse.latitude,
                    warehouse.longitude,
                    warehouse.last_updated.map(|dt| dt.to_rfc3339()),
                ],
            )?;
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// 查询所有仓库（按主键排序,保证快照顺序稳定）
    pub fn list_all(&self) -> RepositoryResult<Vec<Warehouse>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT warehouse_id, name, location, capacity, current_stock,
                   storage_cost, latitude, longitude, last_updated
            FROM warehouses
            ORDER BY warehouse_id
            "#,
        )?;

        let warehouses = stmt
            .query_map([], map_warehouse_row)?
            .collect::<SqliteResult<Vec<Warehouse>>>()?;

        Ok(warehouses)
    }

    /// 按 warehouse_id 查询
    pub fn find_by_id(&self, warehouse_id: &str) -> RepositoryResult<Option<Warehouse>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT warehouse_id, name, location, capacity, current_stock,
                   storage_cost, latitude, longitude, last_updated
            FROM warehouses
            WHERE warehouse_id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![warehouse_id], map_warehouse_row);

        match result {
            Ok(warehouse) => Ok(Some(warehouse)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// 行映射: SELECT 列顺序与此保持一致
fn map_warehouse_row(row: &Row<'_>) -> SqliteResult<Warehouse> {
    Ok(Warehouse {
        warehouse_id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        capacity: row.get(3)?,
        current_stock: row.get(4)?,
        storage_cost: row.get(5)?,
        latitude: row.get(6)?,
        longitude: row.get(7)?,
        last_updated: row
            .get::<_, Option<String>>(8)?
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc)),
    })
}
