// 日志管理模块
// 控制台日志输出到 stderr（stdout 只用于输出检测结果 JSON），
// 可选按天轮转的日志文件

use std::path::Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use crate::config::LogLevel;

/// 日志保留天数
const LOG_RETENTION_DAYS: u64 = 7;

/// 日志文件名前缀
const LOG_FILE_NAME: &str = "yolo-client.log";

/// 初始化日志系统
///
/// 指定 log_dir 时额外写入日志文件，并返回 WorkerGuard，
/// 必须在 main 函数中保持存活，否则异步日志线程会提前退出
pub fn init_logging(log_level: LogLevel, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // RUST_LOG 优先，其次使用配置的日志级别
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            if let Err(e) = fs::create_dir_all(dir) {
                eprintln!("创建日志目录失败: {}", e);
            }
            cleanup_old_logs(dir);

            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

            // 文件日志层 - 详细格式
            let layer = fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// 清理超过保留期限的旧日志文件
fn cleanup_old_logs(log_dir: &Path) {
    let now = std::time::SystemTime::now();
    let retention_duration = std::time::Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60);

    let entries = match fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        // 只清理本程序的日志文件
        if !file_name.starts_with(LOG_FILE_NAME) {
            continue;
        }

        let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(_) => continue,
        };

        if let Ok(age) = now.duration_since(modified) {
            if age > retention_duration {
                if let Err(e) = fs::remove_file(&path) {
                    eprintln!("删除旧日志文件失败 {:?}: {}", path, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn touch(path: &Path, age: Duration) {
        fs::write(path, "log").unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[test]
    fn test_cleanup_old_logs() {
        let dir = tempfile::tempdir().unwrap();
        let day = Duration::from_secs(24 * 60 * 60);

        let old = dir.path().join("yolo-client.log.2026-01-01");
        let recent = dir.path().join("yolo-client.log.2026-10-17");
        let other = dir.path().join("darknet.log");
        touch(&old, day * 30);
        touch(&recent, day);
        touch(&other, day * 30);

        cleanup_old_logs(dir.path());

        assert!(!old.exists());
        assert!(recent.exists());
        assert!(other.exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        cleanup_old_logs(&dir.path().join("missing"));
    }
}
