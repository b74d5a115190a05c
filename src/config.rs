// 配置管理模块
//
// 所有路径和参数默认值集中在显式的配置结构中，构造 Client 时传入，
// 不读取任何全局状态。

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::fs;
use crate::error::AppResult;
use crate::utils::join_path;
use tracing::{info, warn};

/// 默认置信度阈值
pub const DEFAULT_THRESHOLD: f64 = 0.25;
/// 默认层级遍历置信度
pub const DEFAULT_HIERARCHY: f64 = 0.5;
/// 现有 darknet 版本使用的阈值参数（原拼写）
pub const DEFAULT_THRESHOLD_FLAG: &str = "-thersh";
pub const HIERARCHY_FLAG: &str = "-hier";

/// 日志级别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl LogLevel {
    /// 转换为 tracing 过滤器字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 检测程序配置
///
/// 四个目录 + 六个名称，构造后只读。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// darknet 可执行文件所在目录
    pub binary_dir: String,
    /// 权重文件所在目录
    pub weights_dir: String,
    /// 网络结构配置所在目录
    pub config_dir: String,
    /// 标签数据所在目录
    pub data_dir: String,
    /// 可执行文件名
    pub binary: String,
    /// 子命令
    pub command: String,
    /// 运行模式
    pub mode: String,
    /// 标签数据文件
    pub data: String,
    /// 网络结构文件
    pub config: String,
    /// 权重文件
    pub weights: String,
    /// 阈值参数名，默认保留旧版拼写
    pub threshold_flag: String,
    /// 非零退出码是否视为失败
    pub check_exit_status: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            binary_dir: ".".to_string(),
            weights_dir: "/mnt/hd/data/networks/yolo".to_string(),
            config_dir: "cfg/".to_string(),
            data_dir: "cfg/".to_string(),
            binary: "darknet".to_string(),
            command: "detector".to_string(),
            mode: "test".to_string(),
            data: "combine9k.data".to_string(),
            config: "yolo9000.cfg".to_string(),
            weights: "yolo9000.weights".to_string(),
            threshold_flag: DEFAULT_THRESHOLD_FLAG.to_string(),
            check_exit_status: false,
        }
    }
}

impl ClientConfig {
    pub fn binary_path(&self) -> String {
        join_path(&self.binary_dir, &self.binary)
    }

    pub fn data_path(&self) -> String {
        join_path(&self.data_dir, &self.data)
    }

    pub fn config_path(&self) -> String {
        join_path(&self.config_dir, &self.config)
    }

    pub fn weights_path(&self) -> String {
        join_path(&self.weights_dir, &self.weights)
    }
}

/// 单次检测参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectOptions {
    /// 返回类别的最低置信度 (0.0 - 1.0)
    pub threshold: f64,
    /// 层级遍历置信度 (0.0 - 1.0)
    pub hierarchy: f64,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            hierarchy: DEFAULT_HIERARCHY,
        }
    }
}

/// 命令行工具配置（对应 JSON 配置文件结构）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub detect: DetectOptions,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 文件不存在时使用默认配置；JSON 解析失败时记录警告并回退到默认配置。
    pub fn load(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            info!("[CONFIG] 配置文件不存在，使用默认配置: {}", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)?;
        let config = serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("[CONFIG] 配置文件 JSON 解析失败: {}，使用默认配置", e);
            AppConfig::default()
        });

        info!("[CONFIG] 配置已加载: {}", config_path.display());
        Ok(config)
    }
}
