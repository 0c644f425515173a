// ==========================================
// 智能仓储物流分配系统 - 数据质量校验器
// ==========================================
// 职责: 阶段 2 - 主键/必填/数值范围校验 + 判级
// 判级: Error 阻断该行, Conflict 阻断重复行,
//       Warning/Info 允许导入仅记录
// ==========================================

use crate::domain::ingest::{DqLevel, DqViolation};
use crate::domain::order::RawOrderRecord;
use crate::domain::warehouse::RawWarehouseRecord;
use std::collections::HashSet;

const LATITUDE_MIN: f64 = -90.0;
const LATITUDE_MAX: f64 = 90.0;
const LONGITUDE_MIN: f64 = -180.0;
const LONGITUDE_MAX: f64 = 180.0;

// ==========================================
// DataValidator - 数据质量校验器
// ==========================================
pub struct DataValidator;

impl DataValidator {
    // ==========================================
    // 批次级校验（主键唯一性）
    // ==========================================

    /// 仓库批次主键校验（缺失 → Error, 同批次重复 → Conflict）
    pub fn validate_warehouse_keys(records: &[RawWarehouseRecord]) -> Vec<DqViolation> {
        Self::validate_keys(
            records.iter().map(|r| (r.warehouse_id.as_deref(), r.row_number)),
            "warehouse_id",
        )
    }

    /// 订单批次主键校验
    pub fn validate_order_keys(records: &[RawOrderRecord]) -> Vec<DqViolation> {
        Self::validate_keys(
            records.iter().map(|r| (r.order_id.as_deref(), r.row_number)),
            "order_id",
        )
    }

    fn validate_keys<'a>(
        keys: impl Iterator<Item = (Option<&'a str>, usize)>,
        field: &str,
    ) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (key, row_number) in keys {
            match key {
                None => violations.push(DqViolation {
                    row_number,
                    record_id: None,
                    level: DqLevel::Error,
                    field: field.to_string(),
                    message: "主键缺失".to_string(),
                }),
                Some(id) => {
                    if !seen.insert(id.to_string()) {
                        violations.push(DqViolation {
                            row_number,
                            record_id: Some(id.to_string()),
                            level: DqLevel::Conflict,
                            field: field.to_string(),
                            message: "主键重复（同批次内）".to_string(),
                        });
                    }
                }
            }
        }

        violations
    }

    // ==========================================
    // 行级校验 - 仓库
    // ==========================================

    pub fn validate_warehouse_row(record: &RawWarehouseRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let id = record.warehouse_id.clone();
        let row = record.row_number;

        if record.name.is_none() {
            violations.push(Self::error(row, &id, "name", "仓库名称缺失"));
        }

        match record.capacity {
            None => violations.push(Self::error(row, &id, "capacity", "容量缺失或无法解析")),
            Some(capacity) if capacity <= 0 => violations.push(Self::error(
                row,
                &id,
                "capacity",
                &format!("容量必须为正数: {}", capacity),
            )),
            Some(_) => {}
        }

        match record.current_stock {
            None => violations.push(Self::error(
                row,
                &id,
                "current_stock",
                "当前库存缺失或无法解析",
            )),
            Some(stock) if stock < 0 => violations.push(Self::error(
                row,
                &id,
                "current_stock",
                &format!("库存不得为负数: {}", stock),
            )),
            Some(stock) => {
                // 库存不得超过容量,违反视为输入形状错误而非静默传播
                if let Some(capacity) = record.capacity {
                    if capacity > 0 && stock > capacity {
                        violations.push(Self::error(
                            row,
                            &id,
                            "current_stock",
                            &format!("库存 {} 超过容量 {}", stock, capacity),
                        ));
                    }
                }
            }
        }

        if record.storage_cost.is_none() {
            violations.push(Self::error(
                row,
                &id,
                "storage_cost",
                "仓储成本缺失或无法解析",
            ));
        }

        violations.extend(Self::validate_coordinates(
            row,
            &id,
            record.latitude,
            record.longitude,
            "latitude",
            "longitude",
        ));

        violations
    }

    // ==========================================
    // 行级校验 - 订单
    // ==========================================

    pub fn validate_order_row(record: &RawOrderRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let id = record.order_id.clone();
        let row = record.row_number;

        if record.order_date.is_none() {
            violations.push(Self::error(row, &id, "date", "下单日期缺失或无法解析"));
        }

        if record.delivery_deadline.is_none() {
            violations.push(Self::error(
                row,
                &id,
                "delivery_deadline",
                "交付截止日期缺失或无法解析",
            ));
        }

        match record.quantity {
            None => violations.push(Self::error(row, &id, "quantity", "数量缺失或无法解析")),
            Some(quantity) if quantity <= 0 => violations.push(Self::error(
                row,
                &id,
                "quantity",
                &format!("数量必须为正数: {}", quantity),
            )),
            Some(_) => {}
        }

        if record.status.is_none() {
            violations.push(DqViolation {
                row_number: row,
                record_id: id.clone(),
                level: DqLevel::Warning,
                field: "status".to_string(),
                message: "状态缺失,按 NORMAL 处理".to_string(),
            });
        }

        if record.product_id.is_none() {
            violations.push(DqViolation {
                row_number: row,
                record_id: id.clone(),
                level: DqLevel::Warning,
                field: "product_id".to_string(),
                message: "商品标识缺失".to_string(),
            });
        }

        violations.extend(Self::validate_coordinates(
            row,
            &id,
            record.delivery_latitude,
            record.delivery_longitude,
            "delivery_latitude",
            "delivery_longitude",
        ));

        violations
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn validate_coordinates(
        row: usize,
        id: &Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        lat_field: &str,
        lon_field: &str,
    ) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        match latitude {
            None => violations.push(Self::error(row, id, lat_field, "纬度缺失或无法解析")),
            Some(lat) if !(LATITUDE_MIN..=LATITUDE_MAX).contains(&lat) => violations.push(
                Self::error(row, id, lat_field, &format!("纬度超出范围 [-90, 90]: {}", lat)),
            ),
            Some(_) => {}
        }

        match longitude {
            None => violations.push(Self::error(row, id, lon_field, "经度缺失或无法解析")),
            Some(lon) if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&lon) => violations.push(
                Self::error(
                    row,
                    id,
                    lon_field,
                    &format!("经度超出范围 [-180, 180]: {}", lon),
                ),
            ),
            Some(_) => {}
        }

        violations
    }

    fn error(row: usize, id: &Option<String>, field: &str, message: &str) -> DqViolation {
        DqViolation {
            row_number: row,
            record_id: id.clone(),
            level: DqLevel::Error,
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_warehouse(row_number: usize, id: &str) -> RawWarehouseRecord {
        RawWarehouseRecord {
            warehouse_id: Some(id.to_string()),
            name: Some("测试仓".to_string()),
            location: Some("East".to_string()),
            capacity: Some(500),
            current_stock: Some(300),
            storage_cost: Some(2.0),
            latitude: Some(40.0),
            longitude: Some(-75.0),
            last_updated: None,
            row_number,
        }
    }

    fn valid_order(row_number: usize, id: &str) -> RawOrderRecord {
        RawOrderRecord {
            order_id: Some(id.to_string()),
            order_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 1),
            product_id: Some("P001".to_string()),
            quantity: Some(50),
            delivery_deadline: chrono::NaiveDate::from_ymd_opt(2026, 3, 15),
            status: Some("normal".to_string()),
            delivery_latitude: Some(40.0),
            delivery_longitude: Some(-75.0),
            row_number,
        }
    }

    #[test]
    fn test_valid_rows_produce_no_violations() {
        assert!(DataValidator::validate_warehouse_row(&valid_warehouse(2, "W001")).is_empty());
        assert!(DataValidator::validate_order_row(&valid_order(2, "O001")).is_empty());
    }

    #[test]
    fn test_duplicate_warehouse_id_flagged_conflict() {
        let records = vec![valid_warehouse(2, "W001"), valid_warehouse(3, "W001")];
        let violations = DataValidator::validate_warehouse_keys(&records);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, DqLevel::Conflict);
        assert_eq!(violations[0].row_number, 3);
    }

    #[test]
    fn test_missing_primary_key_flagged_error() {
        let mut record = valid_order(2, "O001");
        record.order_id = None;
        let violations = DataValidator::validate_order_keys(&[record]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, DqLevel::Error);
    }

    #[test]
    fn test_stock_over_capacity_is_error() {
        let mut record = valid_warehouse(2, "W001");
        record.current_stock = Some(600);
        let violations = DataValidator::validate_warehouse_row(&record);
        assert!(violations
            .iter()
            .any(|v| v.field == "current_stock" && v.level == DqLevel::Error));
    }

    #[test]
    fn test_negative_stock_is_error() {
        let mut record = valid_warehouse(2, "W001");
        record.current_stock = Some(-5);
        let violations = DataValidator::validate_warehouse_row(&record);
        assert!(violations.iter().any(|v| v.level == DqLevel::Error));
    }

    #[test]
    fn test_out_of_range_coordinates_are_error() {
        let mut warehouse = valid_warehouse(2, "W001");
        warehouse.latitude = Some(95.0);
        assert!(DataValidator::validate_warehouse_row(&warehouse)
            .iter()
            .any(|v| v.field == "latitude" && v.level == DqLevel::Error));

        let mut order = valid_order(2, "O001");
        order.delivery_longitude = Some(-200.0);
        assert!(DataValidator::validate_order_row(&order)
            .iter()
            .any(|v| v.field == "delivery_longitude" && v.level == DqLevel::Error));
    }

    #[test]
    fn test_non_positive_quantity_is_error() {
        let mut record = valid_order(2, "O001");
        record.quantity = Some(0);
        assert!(DataValidator::validate_order_row(&record)
            .iter()
            .any(|v| v.field == "quantity" && v.level == DqLevel::Error));
    }

    #[test]
    fn test_missing_status_is_warning_only() {
        let mut record = valid_order(2, "O001");
        record.status = None;
        let violations = DataValidator::validate_order_row(&record);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, DqLevel::Warning);
        assert_eq!(violations[0].field, "status");
    }
}
