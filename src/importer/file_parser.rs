// ==========================================
// 智能仓储物流分配系统 - 文件解析器实现
// ==========================================
// 职责: 阶段 0 - 文件读取与解析
// 支持: CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// FileParser - 文件解析接口
// ==========================================
// 输出: 表头 → 单元格文本 的行映射,后续由字段映射层做类型转换
pub trait FileParser {
    fn parse_to_raw_records(&self, file_path: &Path)
        -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(
        &self,
        file_path: &Path,
    ) -> ImportResult<Vec<HashMap<String, String>>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let file = temp_csv("warehouse_id,name,capacity\nW001,东部枢纽仓,500\nW002,西部枢纽仓,300\n");

        let parser = CsvParser;
        let records = parser.parse_to_raw_records(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("warehouse_id"), Some(&"W001".to_string()));
        assert_eq!(records[0].get("capacity"), Some(&"500".to_string()));
        assert_eq!(records[1].get("name"), Some(&"西部枢纽仓".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let parser = CsvParser;
        let result = parser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_rejects_wrong_extension() {
        let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        write!(file, "a,b\n1,2\n").unwrap();

        let parser = CsvParser;
        let result = parser.parse_to_raw_records(file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let file = temp_csv("warehouse_id,capacity\nW001,500\n,\nW002,300\n");

        let parser = CsvParser;
        let records = parser.parse_to_raw_records(file.path()).unwrap();

        // 应跳过空行
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_parser_trims_cells() {
        let file = temp_csv("warehouse_id , name\n W001 ,  中心仓 \n");

        let parser = CsvParser;
        let records = parser.parse_to_raw_records(file.path()).unwrap();

        assert_eq!(records[0].get("warehouse_id"), Some(&"W001".to_string()));
        assert_eq!(records[0].get("name"), Some(&"中心仓".to_string()));
    }
}
