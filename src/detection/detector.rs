// darknet 检测客户端
//
// 调用已安装、已编译的 darknet 程序对单张图片做目标检测，
// 从 stdout 读取 JSON 结果。每次调用启动一个独立子进程并阻塞等待其结束，
// 不重试、不缓存、不设超时。

use crate::config::{ClientConfig, DetectOptions, HIERARCHY_FLAG};
use crate::detection::result::DetectionResult;
use crate::error::{AppError, AppResult};
use crate::runner::{CommandOutput, CommandRunner, SystemRunner};
use crate::utils::format_float;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

/// 已编译 YOLO 网络的调用客户端
///
/// 配置在构造时确定，之后只读；客户端本身没有可变状态，
/// 可在多个线程间共享，每次 `detect` 各自启动子进程。
#[derive(Debug, Clone)]
pub struct Client<R = SystemRunner> {
    config: ClientConfig,
    runner: R,
}

impl Client<SystemRunner> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl Default for Client<SystemRunner> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<R: CommandRunner> Client<R> {
    /// 使用自定义的进程执行器（测试中替换为假实现）
    pub fn with_runner(config: ClientConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 以默认阈值 (0.25) 和层级置信度 (0.5) 检测图片
    ///
    /// 按 DetectionResult 严格解析：坐标必须为整数，记录缺字段或
    /// `detections` 为 null 都会返回 Decode 错误，多余字段会被丢弃。
    /// 需要原样保留程序输出时使用 [`Client::detect_value`]。
    pub fn detect(&self, image_path: &str) -> AppResult<DetectionResult> {
        self.detect_with(image_path, &DetectOptions::default())
    }

    pub fn detect_with(&self, image_path: &str, options: &DetectOptions) -> AppResult<DetectionResult> {
        let result: DetectionResult = self.run_and_decode(image_path, options)?;
        info!("[DETECTOR] 检测完成: {} 个目标", result.len());
        Ok(result)
    }

    /// 返回未做类型转换的 JSON，内容与程序输出完全一致
    pub fn detect_value(&self, image_path: &str, options: &DetectOptions) -> AppResult<serde_json::Value> {
        self.run_and_decode(image_path, options)
    }

    /// 构建完整命令行，第一个元素为可执行文件
    ///
    /// 参数名与参数值合为一个元素，例如 "-thersh 0.25"。
    pub fn command_line(&self, image_path: &str, options: &DetectOptions) -> Vec<String> {
        let mut command_line = vec![self.config.binary_path()];
        command_line.extend(self.arguments(image_path, options));
        command_line
    }

    /// 可执行文件之后的参数
    fn arguments(&self, image_path: &str, options: &DetectOptions) -> Vec<String> {
        vec![
            self.config.command.clone(),
            self.config.mode.clone(),
            self.config.data_path(),
            self.config.config_path(),
            self.config.weights_path(),
            image_path.to_string(),
            format!("{} {}", self.config.threshold_flag, format_float(options.threshold)),
            format!("{} {}", HIERARCHY_FLAG, format_float(options.hierarchy)),
        ]
    }

    fn run_and_decode<T: DeserializeOwned>(&self, image_path: &str, options: &DetectOptions) -> AppResult<T> {
        info!("[DETECTOR] 图片: {}, 阈值={}, 层级置信度={}",
            image_path, options.threshold, options.hierarchy);

        let program = self.config.binary_path();
        let args = self.arguments(image_path, options);
        debug!("[DETECTOR] 命令行: {} {:?}", program, args);

        let output = self.runner.run(&program, &args)?;
        self.decode(&output)
    }

    fn decode<T: DeserializeOwned>(&self, output: &CommandOutput) -> AppResult<T> {
        if !output.success() {
            if self.config.check_exit_status {
                error!("[DETECTOR] 检测程序异常退出: {:?}", output.code);
                return Err(AppError::ExitStatus {
                    code: output.code,
                    stderr: output.stderr_lossy(),
                });
            }
            warn!("[DETECTOR] 检测程序退出码非零: {:?}，继续解析输出", output.code);
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            error!("[DETECTOR] 解析检测输出失败: {}", e);
            AppError::Decode {
                stdout: output.stdout_lossy(),
                stderr: output.stderr_lossy(),
                source: e,
            }
        })
    }
}
