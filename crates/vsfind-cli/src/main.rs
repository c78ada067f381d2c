//! Visual Studio 安装探测命令行工具（vsfind）。
//!
//! 职责：
//! - 定位 vswhere 并查询本机 Visual Studio 安装实例，输出摘要或 JSON
//! - 输出给定查询选项对应的 vswhere 参数（不访问系统，用于排障）
//! - 环境自检（平台、Program Files 变量、候选路径）
//!
//! 说明：
//! - 日志输出到 stderr，stdout 只输出结果，便于脚本解析
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use vsfind_core::args::build_args;
use vsfind_core::paths::{LocatorConfig, PROGRAM_FILES_VAR, PROGRAM_FILES_X86_VAR};
use vsfind_core::{Installation, Product, QueryOptions, Version, VersionRange};
use vsfind_windows::locate::path_exists;
use vsfind_windows::platform;
use vsfind_windows::process::InvokeOptions;
use vsfind_windows::{VsWhere, VsWhereConfig};

/// 命令行参数。
///
/// 说明：
/// - `vswhere` 显式指定 vswhere 路径（优先于 Program Files 下的默认位置）
/// - `timeout_secs` 为 vswhere 调用设置截止时间，超时会终止子进程
#[derive(Debug, Parser)]
#[command(name = "vsfind", version)]
struct Cli {
    #[command(flatten)]
    tool: ToolArgs,

    #[command(subcommand)]
    command: Commands,
}

/// 定位与调用 vswhere 的全局参数。
#[derive(Debug, Args)]
struct ToolArgs {
    #[arg(long, global = true)]
    vswhere: Option<PathBuf>,

    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

impl ToolArgs {
    /// 由全局参数与环境变量构造查询配置（会读取 Program Files 环境变量）。
    fn config(&self) -> VsWhereConfig {
        let mut locator = LocatorConfig::from_env();
        locator.explicit_path = self.vswhere.clone();
        VsWhereConfig {
            locator,
            invoke: InvokeOptions {
                timeout: self.timeout_secs.map(Duration::from_secs),
            },
        }
    }
}

/// vsfind 支持的子命令。
#[derive(Debug, Subcommand)]
enum Commands {
    /// 查询安装实例。
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// 以 JSON 输出完整实例信息。
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// 输出 vswhere 路径。
    Locate,
    /// 输出查询选项对应的 vswhere 参数（每行一个）。
    Args {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// 环境自检。
    Doctor,
}

/// 查询选项（与 vswhere 参数一一对应）。
///
/// 说明：
/// - 未给出任何查询选项时，按 `--all --prerelease --sort` 处理
#[derive(Debug, Args)]
struct QueryArgs {
    #[arg(long)]
    all: bool,
    #[arg(long)]
    prerelease: bool,
    /// 产品：community/professional/enterprise/buildtools 或完整产品 ID。
    #[arg(long, num_args = 1..)]
    products: Vec<Product>,
    /// 必需的工作负载/组件 ID（支持 `?`/`*` 通配符）。
    #[arg(long, num_args = 1..)]
    requires: Vec<String>,
    #[arg(long)]
    requires_any: bool,
    /// 版本下界，例如 `17` 或 `17.4.2`。
    #[arg(long)]
    min_version: Option<Version>,
    #[arg(long, requires = "min_version")]
    min_exclusive: bool,
    /// 版本上界。
    #[arg(long)]
    max_version: Option<Version>,
    #[arg(long, requires = "max_version")]
    max_exclusive: bool,
    #[arg(long)]
    latest: bool,
    #[arg(long)]
    sort: bool,
    #[arg(long)]
    legacy: bool,
}

impl QueryArgs {
    /// 转换为查询选项；未给出任何选项时返回 `None`（由参数构造器套用默认值）。
    fn into_options(self) -> Option<QueryOptions> {
        let bound = |v: Option<Version>, exclusive: bool| v.map(|v| Version { exclusive, ..v });
        let lower = bound(self.min_version, self.min_exclusive);
        let upper = bound(self.max_version, self.max_exclusive);
        let options = QueryOptions {
            all: self.all,
            prerelease: self.prerelease,
            products: self.products,
            requires: self.requires,
            requires_any: self.requires_any,
            version_range: (lower.is_some() || upper.is_some())
                .then(|| VersionRange::new(lower, upper)),
            latest: self.latest,
            sort: self.sort,
            legacy: self.legacy,
        };
        (options != QueryOptions::default()).then_some(options)
    }
}

/// 程序入口：解析参数并分发子命令。
///
/// 异常处理：
/// - 任意子命令执行失败会返回 `Err`，由运行时输出错误链并以非 0 退出
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Cli { tool, command } = Cli::parse();
    match command {
        Commands::List { query, json } => list(&tool, query.into_options(), json).await,
        Commands::Locate => locate(&tool).await,
        Commands::Args { query } => print_args(query.into_options()),
        Commands::Doctor => doctor(&tool).await,
    }
}

/// 查询并输出安装实例。
///
/// 输出：
/// - 默认每个实例一行：`<displayName> (<instanceId>) = <installationPath>`
/// - `--json`：校验后的实例数组（pretty JSON）
async fn list(tool: &ToolArgs, options: Option<QueryOptions>, json: bool) -> Result<()> {
    platform::ensure_supported_platform(std::env::consts::OS)?;
    let installations = VsWhere::new(tool.config())
        .installations(options.as_ref())
        .await
        .context("查询 Visual Studio 安装实例失败")?;
    info!("找到 {} 个实例", installations.len());
    if json {
        println!("{}", serde_json::to_string_pretty(&installations)?);
    } else {
        for installation in &installations {
            println!("{}", summary_line(installation));
        }
    }
    Ok(())
}

fn summary_line(installation: &Installation) -> String {
    let name = if installation.display_name.is_empty() {
        installation.product_id.as_str()
    } else {
        installation.display_name.as_str()
    };
    format!(
        "{} ({}) = {}",
        name, installation.instance_id, installation.installation_path
    )
}

/// 输出 vswhere 路径。
async fn locate(tool: &ToolArgs) -> Result<()> {
    platform::ensure_supported_platform(std::env::consts::OS)?;
    let path = VsWhere::new(tool.config()).locate().await.context("定位 vswhere 失败")?;
    println!("{}", path.display());
    Ok(())
}

/// 输出参数列表（纯计算，不检查平台、不读取环境变量、不访问文件系统）。
fn print_args(options: Option<QueryOptions>) -> Result<()> {
    for arg in build_args(options.as_ref()) {
        println!("{arg}");
    }
    Ok(())
}

/// 环境自检（用于排障）。
///
/// 输出：
/// - 当前平台及是否受支持
/// - Program Files 环境变量
/// - 每个候选路径及其是否存在
/// - 定位结果
async fn doctor(tool: &ToolArgs) -> Result<()> {
    println!(
        "platform = {} (supported = {})",
        std::env::consts::OS,
        platform::is_current_platform_supported()
    );
    let vswhere = VsWhere::new(tool.config());
    let locator = &vswhere.config().locator;
    let show = |p: &Option<PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unset>".to_string())
    };
    println!("{PROGRAM_FILES_X86_VAR} = {}", show(&locator.program_files_x86));
    println!("{PROGRAM_FILES_VAR} = {}", show(&locator.program_files));
    for candidate in locator.candidates() {
        println!("candidate {} = {}", candidate.display(), path_exists(&candidate).await);
    }
    match vswhere.locate().await {
        Ok(path) => println!("vswhere = {}", path.display()),
        Err(e) => println!("vswhere = <{e}>"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vsfind").chain(args.iter().copied()))
            .expect("parse cli")
    }

    fn query_of(cli: Cli) -> Option<QueryOptions> {
        match cli.command {
            Commands::Args { query } | Commands::List { query, .. } => query.into_options(),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    /// 验证未给出查询选项时返回 `None`，交由参数构造器套用默认值。
    fn no_query_flags_means_absent_options() {
        assert_eq!(query_of(parse(&["args"])), None);
    }

    #[test]
    fn query_flags_map_to_options() {
        let options = query_of(parse(&[
            "list",
            "--products",
            "community",
            "buildtools",
            "--min-version",
            "17",
            "--max-version",
            "18",
            "--max-exclusive",
            "--latest",
            "--json",
        ]))
        .expect("options present");
        assert_eq!(options.products, vec![Product::Community, Product::BuildTools]);
        assert_eq!(
            options.version_range,
            Some(VersionRange::new(Some(Version::new(17)), Some(Version::new(18).exclusive())))
        );
        assert!(options.latest);
        assert!(!options.all);
    }

    #[test]
    fn exclusive_flag_requires_its_bound() {
        assert!(Cli::try_parse_from(["vsfind", "args", "--min-exclusive"]).is_err());
        assert!(Cli::try_parse_from(["vsfind", "args", "--products", "express"]).is_err());
    }

    #[test]
    fn global_flags_flow_into_config() {
        let cli = parse(&["--vswhere", "C:/tools/vswhere.exe", "--timeout-secs", "5", "locate"]);
        let config = cli.tool.config();
        assert_eq!(config.locator.explicit_path, Some(PathBuf::from("C:/tools/vswhere.exe")));
        assert_eq!(config.invoke.timeout, Some(Duration::from_secs(5)));
    }
}
