// 工具模块

use std::path::Path;
use std::process::Command;

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

/// Windows 下隐藏控制台窗口的标志
#[cfg(target_os = "windows")]
pub const CREATE_NO_WINDOW: u32 = 0x08000000;

/// 创建一个隐藏控制台窗口的 Command（Windows 专用）
/// 在非 Windows 平台上等同于 Command::new
#[cfg(target_os = "windows")]
pub fn hidden_command(program: &str) -> Command {
    let mut cmd = Command::new(program);
    cmd.creation_flags(CREATE_NO_WINDOW);
    cmd
}

#[cfg(not(target_os = "windows"))]
pub fn hidden_command(program: &str) -> Command {
    Command::new(program)
}

/// 用系统路径分隔符拼接目录和文件名，不检查文件是否存在
///
/// 文件名为绝对路径时直接返回文件名。
pub fn join_path(dir: &str, name: &str) -> String {
    Path::new(dir).join(name).to_string_lossy().to_string()
}

/// 格式化命令行中的浮点数，与旧版 darknet 调用脚本的写法一致：
/// 最短往返表示，整数值保留 ".0"，指数至少两位并带符号
/// （0.25 -> "0.25"，1 -> "1.0"，1e-5 -> "1e-05"，1e16 -> "1e+16"）
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    // Debug 与上述写法使用相同的科学计数法区间 [1e-4, 1e16)，只有指数格式不同
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => repr,
        },
        None => repr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_join_path() {
        assert_eq!(join_path(".", "darknet"), "./darknet");
        assert_eq!(join_path("cfg/", "yolo9000.cfg"), "cfg/yolo9000.cfg");
        assert_eq!(join_path("cfg", "yolo9000.cfg"), "cfg/yolo9000.cfg");
        assert_eq!(join_path("cfg/", "/etc/coco.data"), "/etc/coco.data");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.0001), "0.0001");
    }

    #[test]
    fn test_format_float_exponent() {
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(2.5e-7), "2.5e-07");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1e-100), "1e-100");
        assert_eq!(format_float(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_format_float_special() {
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(-0.0), "-0.0");
    }
}
