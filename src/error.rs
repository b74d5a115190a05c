// 错误处理模块

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// 检测程序的 stdout 无法解析为 JSON，附带原始输出便于排查
    #[error("无法解析检测输出: stdout={stdout:?}, stderr={stderr:?}: {source}")]
    Decode {
        stdout: String,
        stderr: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("启动检测程序失败 {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// 仅在开启 check_exit_status 时产生
    #[error("检测程序异常退出 (退出码 {code:?}): {stderr}")]
    ExitStatus { code: Option<i32>, stderr: String },

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_message_contains_streams() {
        let source = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let err = AppError::Decode {
            stdout: "partial {".to_string(),
            stderr: "cannot open img.jpg".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("partial {"));
        assert!(msg.contains("cannot open img.jpg"));
        assert!(msg.contains("EOF"));
    }

    #[test]
    fn test_exit_status_message() {
        let err = AppError::ExitStatus {
            code: Some(1),
            stderr: "Couldn't open file: cfg/yolo9000.cfg".to_string(),
        };
        assert!(err.to_string().contains("Couldn't open file"));
    }
}
