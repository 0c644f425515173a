// ==========================================
// 智能仓储物流分配系统 - 配置层
// ==========================================
// 职责: 优化参数与运行配置的加载/默认值
// 存储: JSON 配置文件,缺省时使用内置默认值
// ==========================================

use crate::domain::types::DistanceUnit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// OptimizationParams - 优化参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationParams {
    /// 求解时间上限（秒）。贪心分配不消费该值,保留给后续非贪心策略
    pub max_solver_time_secs: u64,

    /// 仓库利用率下限阈值（预留,供报表层标注低利用仓库）
    pub min_utilization: f64,

    /// 仓库利用率上限阈值（预留,供报表层标注过载仓库）
    pub max_utilization: f64,
}

impl Default for OptimizationParams {
    fn default() -> Self {
        Self {
            max_solver_time_secs: 10,
            min_utilization: 0.3,
            max_utilization: 0.9,
        }
    }
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库文件路径,缺省时落在平台数据目录下
    pub db_path: Option<PathBuf>,

    /// 距离单位（分配主路径用公里）
    pub distance_unit: DistanceUnit,

    /// 优化参数
    pub optimization: OptimizationParams,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            distance_unit: DistanceUnit::Kilometers,
            optimization: OptimizationParams::default(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e.to_string()))?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置,文件不存在时回落默认值
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match Self::load(path) {
                Ok(config) => {
                    info!(config = %path.display(), "配置文件已加载");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(config = %path.display(), error = %e, "配置加载失败,使用默认值");
                }
            }
        } else {
            debug!(config = %path.display(), "配置文件不存在,使用默认值");
        }
        Self::default()
    }

    /// 解析数据库文件路径
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(default_db_path)
    }
}

/// 默认数据库路径: <平台数据目录>/logitrack-aps/logitrack.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logitrack-aps")
        .join("logitrack.db")
}

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({0}): {1}")]
    ReadError(String, String),

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = OptimizationParams::default();
        assert_eq!(params.max_solver_time_secs, 10);
        assert_eq!(params.min_utilization, 0.3);
        assert_eq!(params.max_utilization, 0.9);
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"distance_unit":"MILES"}"#).unwrap();
        assert_eq!(config.distance_unit, DistanceUnit::Miles);
        assert_eq!(config.optimization.max_solver_time_secs, 10);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "db_path": "/tmp/test.db",
                "distance_unit": "KILOMETERS",
                "optimization": {
                    "max_solver_time_secs": 30,
                    "min_utilization": 0.2,
                    "max_utilization": 0.95
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.optimization.max_solver_time_secs, 30);
        assert_eq!(config.resolve_db_path(), PathBuf::from("/tmp/test.db"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("no_such_config.json"));
        assert_eq!(config.distance_unit, DistanceUnit::Kilometers);
    }
}
