// yolo-client - 已编译 darknet/YOLO 检测程序的调用封装
//
// 拼接命令行 → 启动子进程 → 读取 stdout → 解析 JSON → 返回结果或错误。

pub mod config;
pub mod detection;
pub mod error;
pub mod logging;
pub mod runner;
pub mod utils;

pub use config::{AppConfig, ClientConfig, DetectOptions, LogLevel};
pub use detection::{Client, DetectionRecord, DetectionResult};
pub use error::{AppError, AppResult};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
