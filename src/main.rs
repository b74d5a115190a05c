// yolo-client - 命令行入口
//
// detect: 调用 darknet 检测图片并将结果 JSON 输出到 stdout
// command: 只打印将要执行的命令行，不启动子进程

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use yolo_client::{AppConfig, AppResult, Client, ClientConfig, DetectOptions, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "yolo-client",
    version,
    about = "Run a pre-built darknet/YOLO detector on an image and print its JSON output"
)]
struct Cli {
    /// Path to the JSON config file (missing file means defaults)
    #[arg(long, value_name = "PATH", env = "YOLO_CLIENT_CONFIG", default_value = "yolo-client.json", global = true)]
    config: PathBuf,

    /// Also write daily-rotated log files into this directory
    #[arg(long, value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    action: Action,
}

/// 覆盖配置文件中的路径和参数
#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    /// Directory containing the darknet binary
    #[arg(long, value_name = "DIR", global = true)]
    binary_dir: Option<String>,
    /// Directory containing the weights file
    #[arg(long, value_name = "DIR", global = true)]
    weights_dir: Option<String>,
    /// Directory containing the network config file
    #[arg(long, value_name = "DIR", global = true)]
    config_dir: Option<String>,
    /// Directory containing the label data file
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<String>,
    /// Binary name
    #[arg(long, global = true)]
    binary: Option<String>,
    /// darknet sub-command
    #[arg(long = "command", value_name = "NAME", global = true)]
    darknet_command: Option<String>,
    /// Run mode of the sub-command
    #[arg(long, global = true)]
    mode: Option<String>,
    /// Label data file name
    #[arg(long, global = true)]
    data: Option<String>,
    /// Network config file name
    #[arg(long = "cfg", value_name = "FILE", global = true)]
    network: Option<String>,
    /// Weights file name
    #[arg(long, global = true)]
    weights: Option<String>,
    /// Flag text used for the threshold argument
    #[arg(long, global = true, allow_hyphen_values = true)]
    threshold_flag: Option<String>,
    /// Fail when darknet exits with a non-zero status
    #[arg(long, global = true)]
    check_exit_status: bool,
}

impl ConfigOverrides {
    fn apply(self, config: &mut ClientConfig) {
        let fields = [
            (self.binary_dir, &mut config.binary_dir),
            (self.weights_dir, &mut config.weights_dir),
            (self.config_dir, &mut config.config_dir),
            (self.data_dir, &mut config.data_dir),
            (self.binary, &mut config.binary),
            (self.darknet_command, &mut config.command),
            (self.mode, &mut config.mode),
            (self.data, &mut config.data),
            (self.network, &mut config.config),
            (self.weights, &mut config.weights),
            (self.threshold_flag, &mut config.threshold_flag),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if self.check_exit_status {
            config.check_exit_status = true;
        }
    }
}

#[derive(Args, Debug)]
struct DetectArgs {
    /// Image file passed to darknet
    image: String,
    /// Minimum confidence for returning a class
    #[arg(long)]
    threshold: Option<f64>,
    /// Hierarchy traversal confidence
    #[arg(long)]
    hierarchy: Option<f64>,
}

impl DetectArgs {
    fn options(&self, defaults: DetectOptions) -> DetectOptions {
        DetectOptions {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            hierarchy: self.hierarchy.unwrap_or(defaults.hierarchy),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Run detection and print the JSON document darknet produced
    Detect {
        #[command(flatten)]
        args: DetectArgs,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Decode into detection records first (fails on unexpected shapes, drops unknown keys)
        #[arg(long)]
        typed: bool,
    },
    /// Print the command line that would be executed
    Command {
        #[command(flatten)]
        args: DetectArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut app_config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("读取配置失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_level = if cli.verbose { LogLevel::Debug } else { app_config.log_level };
    // guard 必须保持存活，否则异步日志线程会退出
    let _log_guard = yolo_client::logging::init_logging(log_level, cli.log_dir.as_deref());

    cli.overrides.apply(&mut app_config.client);

    match run(cli.action, app_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("yolo-client: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(action: Action, app_config: AppConfig) -> AppResult<()> {
    let client = Client::new(app_config.client);

    match action {
        Action::Detect { args, pretty, typed } => {
            let options = args.options(app_config.detect);
            // 默认原样输出程序的 JSON，--typed 时先按检测记录解析
            let document = if typed {
                serde_json::to_value(client.detect_with(&args.image, &options)?)?
            } else {
                client.detect_value(&args.image, &options)?
            };
            let count = document["detections"].as_array().map(|d| d.len()).unwrap_or(0);
            info!("[CLI] {} 检测到 {} 个目标", args.image, count);
            println!("{}", render(&document, pretty)?);
        }
        Action::Command { args } => {
            let options = args.options(app_config.detect);
            for arg in client.command_line(&args.image, &options) {
                println!("{}", arg);
            }
        }
    }

    Ok(())
}

fn render(document: &serde_json::Value, pretty: bool) -> AppResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}
