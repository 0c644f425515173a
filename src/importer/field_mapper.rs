// ==========================================
// 智能仓储物流分配系统 - 字段映射器
// ==========================================
// 职责: 阶段 1 - 原始行映射 + 类型转换
// 说明: 转换失败记为 None,由校验层判级,此处不报错
// ==========================================

use crate::domain::order::RawOrderRecord;
use crate::domain::warehouse::RawWarehouseRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;

/// 日期解析尝试的格式列表（常见导出格式）
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d/%m/%Y",
];

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper;

impl FieldMapper {
    /// 仓库行映射
    ///
    /// # 参数
    /// - `row`: 表头 → 单元格文本
    /// - `row_number`: 原始文件行号（首行为表头,数据行从 2 起）
    pub fn map_warehouse_row(
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> RawWarehouseRecord {
        RawWarehouseRecord {
            warehouse_id: Self::get_text(row, "warehouse_id"),
            name: Self::get_text(row, "name"),
            location: Self::get_text(row, "location"),
            capacity: Self::get_i64(row, "capacity"),
            current_stock: Self::get_i64(row, "current_stock"),
            storage_cost: Self::get_f64(row, "storage_cost"),
            latitude: Self::get_f64(row, "latitude"),
            longitude: Self::get_f64(row, "longitude"),
            last_updated: Self::get_text(row, "last_updated")
                .as_deref()
                .and_then(Self::parse_datetime),
            row_number,
        }
    }

    /// 订单行映射
    pub fn map_order_row(row: &HashMap<String, String>, row_number: usize) -> RawOrderRecord {
        RawOrderRecord {
            order_id: Self::get_text(row, "order_id"),
            order_date: Self::get_text(row, "date")
                .as_deref()
                .and_then(Self::parse_date),
            product_id: Self::get_text(row, "product_id"),
            quantity: Self::get_i64(row, "quantity"),
            delivery_deadline: Self::get_text(row, "delivery_deadline")
                .as_deref()
                .and_then(Self::parse_date),
            status: Self::get_text(row, "status"),
            delivery_latitude: Self::get_f64(row, "delivery_latitude"),
            delivery_longitude: Self::get_f64(row, "delivery_longitude"),
            row_number,
        }
    }

    // ==========================================
    // 单元格读取与类型转换
    // ==========================================

    /// 非空文本（空白视为缺失）
    fn get_text(row: &HashMap<String, String>, key: &str) -> Option<String> {
        row.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    fn get_i64(row: &HashMap<String, String>, key: &str) -> Option<i64> {
        Self::get_text(row, key).and_then(|v| v.parse::<i64>().ok())
    }

    fn get_f64(row: &HashMap<String, String>, key: &str) -> Option<f64> {
        Self::get_text(row, key)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// 逐格式尝试解析日期
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Some(date);
            }
        }
        // 兼容带时间的日期列（取日期部分）
        Self::parse_datetime(trimmed).map(|dt| dt.date_naive())
    }

    /// 解析时间戳: RFC3339 优先,退回 "YYYY-MM-DD HH:MM:SS"（按 UTC 处理）
    pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
        let trimmed = value.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_warehouse_row_full() {
        let record = FieldMapper::map_warehouse_row(
            &row(&[
                ("warehouse_id", "W001"),
                ("name", "东部枢纽仓"),
                ("location", "East"),
                ("capacity", "500"),
                ("current_stock", "320"),
                ("storage_cost", "2.5"),
                ("latitude", "40.7128"),
                ("longitude", "-74.0060"),
                ("last_updated", "2026-03-01 08:30:00"),
            ]),
            2,
        );

        assert_eq!(record.warehouse_id.as_deref(), Some("W001"));
        assert_eq!(record.capacity, Some(500));
        assert_eq!(record.current_stock, Some(320));
        assert_eq!(record.storage_cost, Some(2.5));
        assert_eq!(record.latitude, Some(40.7128));
        assert!(record.last_updated.is_some());
        assert_eq!(record.row_number, 2);
    }

    #[test]
    fn test_unparseable_numeric_becomes_none() {
        let record = FieldMapper::map_warehouse_row(
            &row(&[
                ("warehouse_id", "W001"),
                ("capacity", "五百"),
                ("current_stock", ""),
                ("latitude", "abc"),
            ]),
            3,
        );

        assert_eq!(record.capacity, None);
        assert_eq!(record.current_stock, None);
        assert_eq!(record.latitude, None);
    }

    #[test]
    fn test_map_order_row_status_text_kept_raw() {
        let record = FieldMapper::map_order_row(
            &row(&[
                ("order_id", "O001"),
                ("date", "2026-03-01"),
                ("quantity", "60"),
                ("delivery_deadline", "2026/03/15"),
                ("status", "urgent"),
                ("delivery_latitude", "40.0"),
                ("delivery_longitude", "-75.0"),
            ]),
            2,
        );

        assert_eq!(record.order_id.as_deref(), Some("O001"));
        assert_eq!(record.quantity, Some(60));
        assert_eq!(record.status.as_deref(), Some("urgent"));
        assert_eq!(
            record.order_date,
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(
            record.delivery_deadline,
            NaiveDate::from_ymd_opt(2026, 3, 15)
        );
    }

    #[test]
    fn test_parse_date_multiple_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(FieldMapper::parse_date("2026-03-05"), Some(expected));
        assert_eq!(FieldMapper::parse_date("2026/03/05"), Some(expected));
        assert_eq!(FieldMapper::parse_date("03/05/2026"), Some(expected));
        assert_eq!(FieldMapper::parse_date("2026-03-05 10:00:00"), Some(expected));
        assert_eq!(FieldMapper::parse_date("not-a-date"), None);
    }
}
