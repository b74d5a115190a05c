// 子进程执行模块
//
// 将"启动外部程序"抽象为 CommandRunner，检测逻辑只依赖该 trait，
// 测试时可替换为不启动真实程序的实现。

use crate::error::{AppError, AppResult};
use crate::utils::hidden_command;
use std::process::Stdio;
use tracing::{debug, error};

/// 子进程的完整输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// 退出码，被信号终止时为 None
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }
}

/// 执行一条命令并阻塞等待结束
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> AppResult<CommandOutput>;
}

/// 基于 std::process 的默认实现
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> AppResult<CommandOutput> {
        debug!("[RUNNER] 执行: {} {}", program, args.join(" "));

        // output() 会读完 stdout/stderr 并回收子进程，出错路径也不会泄漏管道
        let output = hidden_command(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                error!("[RUNNER] 启动 {} 失败: {}", program, e);
                AppError::Launch {
                    program: program.to_string(),
                    source: e,
                }
            })?;

        debug!("[RUNNER] 退出码: {:?}, stdout {} 字节, stderr {} 字节",
            output.status.code(), output.stdout.len(), output.stderr.len());

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            code: output.status.code(),
        })
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> AppResult<CommandOutput> {
        (**self).run(program, args)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, program: &str, args: &[String]) -> AppResult<CommandOutput> {
        (**self).run(program, args)
    }
}
