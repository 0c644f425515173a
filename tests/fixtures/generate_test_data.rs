// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成示例仓库/订单 CSV 文件
// 输出: data/sample_warehouses.csv, data/sample_orders.csv
// ==========================================

use chrono::{Duration, Utc};
use csv::Writer;
use std::error::Error;
use std::fs;

const WAREHOUSE_HEADER: &[&str] = &[
    "warehouse_id",
    "name",
    "location",
    "capacity",
    "current_stock",
    "storage_cost",
    "latitude",
    "longitude",
    "last_updated",
];

const ORDER_HEADER: &[&str] = &[
    "order_id",
    "date",
    "product_id",
    "quantity",
    "delivery_deadline",
    "status",
    "delivery_latitude",
    "delivery_longitude",
];

// 示例仓库: 美国主要物流枢纽
const WAREHOUSES: &[(&str, &str, &str, i64, i64, f64, f64, f64)] = &[
    ("W001", "East Coast Hub", "East", 800, 650, 2.5, 40.7128, -74.0060),
    ("W002", "West Coast Hub", "West", 700, 420, 3.1, 34.0522, -118.2437),
    ("W003", "Midwest Center", "Midwest", 600, 510, 1.8, 41.8781, -87.6298),
    ("W004", "South Gateway", "South", 500, 230, 1.5, 29.7604, -95.3698),
    ("W005", "Mountain Depot", "Mountain", 400, 360, 1.2, 39.7392, -104.9903),
];

// 示例订单目的地: (城市纬度, 城市经度)
const DESTINATIONS: &[(f64, f64)] = &[
    (42.3601, -71.0589),  // Boston
    (33.4484, -112.0740), // Phoenix
    (44.9778, -93.2650),  // Minneapolis
    (32.7767, -96.7970),  // Dallas
    (47.6062, -122.3321), // Seattle
    (25.7617, -80.1918),  // Miami
];

fn main() -> Result<(), Box<dyn Error>> {
    fs::create_dir_all("data")?;

    write_warehouses()?;
    write_orders()?;

    println!("示例数据已生成: data/sample_warehouses.csv, data/sample_orders.csv");
    Ok(())
}

fn write_warehouses() -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path("data/sample_warehouses.csv")?;
    writer.write_record(WAREHOUSE_HEADER)?;

    let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    for (id, name, location, capacity, stock, cost, lat, lon) in WAREHOUSES {
        writer.write_record([
            id.to_string(),
            name.to_string(),
            location.to_string(),
            capacity.to_string(),
            stock.to_string(),
            cost.to_string(),
            lat.to_string(),
            lon.to_string(),
            now.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_orders() -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path("data/sample_orders.csv")?;
    writer.write_record(ORDER_HEADER)?;

    let today = Utc::now().date_naive();
    for i in 0..30 {
        let (lat, lon) = DESTINATIONS[i % DESTINATIONS.len()];
        // 数量/优先级按序号展开,保证三档优先级都有覆盖
        let quantity = 20 + (i as i64 % 7) * 15;
        let status = match i % 5 {
            0 => "urgent",
            4 => "low",
            _ => "normal",
        };
        let order_date = today - Duration::days((i % 6) as i64);
        let deadline = today + Duration::days(3 + (i % 10) as i64);

        writer.write_record([
            format!("O{:03}", i + 1),
            order_date.to_string(),
            format!("P{:03}", (i % 8) + 1),
            quantity.to_string(),
            deadline.to_string(),
            status.to_string(),
            lat.to_string(),
            lon.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
