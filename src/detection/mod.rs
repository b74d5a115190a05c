// 目标检测模块
//
// 子模块：
// - detector: Client，负责拼接命令行、启动 darknet 子进程、解析 stdout
// - result: 检测结果数据结构

pub mod detector;
pub mod result;

pub use detector::Client;
pub use result::{DetectionRecord, DetectionResult};
