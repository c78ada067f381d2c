//! 顶层编排：平台检查 → 构造参数 → 定位 vswhere → 调用 → 解析校验。
//!
//! 约定：
//! - 任一步失败立即返回，不重试、不返回部分结果
//! - 各步之间不持有需要清理的资源
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use std::future::Future;
use std::path::PathBuf;

use tracing::debug;
use vsfind_core::args::build_args;
use vsfind_core::parse::{interpret_output, parse_installations};
use vsfind_core::paths::LocatorConfig;
use vsfind_core::{Installation, QueryOptions, VsWhereError};

use crate::locate::locate_vswhere;
use crate::platform::ensure_supported_platform;
use crate::process::{run_tool_until, InvokeOptions};

/// 一次查询所需的全部配置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VsWhereConfig {
    /// 候选搜索路径。
    pub locator: LocatorConfig,
    /// 调用参数（截止时间）。
    pub invoke: InvokeOptions,
}

impl VsWhereConfig {
    /// 从进程环境变量读取定位配置；调用参数取默认值（无截止时间）。
    pub fn from_env() -> Self {
        Self {
            locator: LocatorConfig::from_env(),
            invoke: InvokeOptions::default(),
        }
    }
}

/// 基于显式配置的 vswhere 查询器。
///
/// 说明：
/// - 不做平台检查；平台检查由入口 [`get_installations`] 负责
/// - 无内部状态，可被多个任务并发使用，每次查询各自启动独立子进程
#[derive(Debug, Clone, Default)]
pub struct VsWhere {
    config: VsWhereConfig,
}

impl VsWhere {
    pub fn new(config: VsWhereConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(VsWhereConfig::from_env())
    }

    pub fn config(&self) -> &VsWhereConfig {
        &self.config
    }

    /// 仅定位 vswhere，不启动进程。
    pub async fn locate(&self) -> Result<PathBuf, VsWhereError> {
        locate_vswhere(&self.config.locator).await
    }

    /// 查询安装实例。
    ///
    /// 参数：
    /// - `options`：查询选项；`None` 时等价于 `all + prerelease + sort`
    ///
    /// 返回值：
    /// - 成功：经过校验的全部实例
    ///
    /// 异常处理：
    /// - 定位、调用、解析、校验任一步失败都会直接返回对应错误
    pub async fn installations(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<Vec<Installation>, VsWhereError> {
        self.installations_until(options, std::future::pending()).await
    }

    /// 同 [`VsWhere::installations`]，但在 `cancel` 完成时终止子进程并返回 `Cancelled`。
    pub async fn installations_until<F>(
        &self,
        options: Option<&QueryOptions>,
        cancel: F,
    ) -> Result<Vec<Installation>, VsWhereError>
    where
        F: Future<Output = ()>,
    {
        let args = build_args(options);
        debug!(?args, "已构造 vswhere 参数");
        let vswhere = self.locate().await?;
        debug!(path = %vswhere.display(), "已定位 vswhere");
        let output = run_tool_until(&vswhere, &args, &self.config.invoke, cancel).await?;
        let text = interpret_output(output.stdout, output.stderr)?;
        let installations = parse_installations(&text)?;
        debug!(count = installations.len(), "vswhere 查询完成");
        Ok(installations)
    }
}

/// 获取本机 Visual Studio 安装实例（入口）。
///
/// 参数：
/// - `options`：查询选项；`None` 时 `all`、`prerelease`、`sort` 默认为真
///
/// 返回值：
/// - 成功：经过校验的全部实例
///
/// 异常处理：
/// - 非 Windows 平台：立即返回 `UnsupportedPlatform`，不读取环境变量、不访问文件系统
/// - 其余错误见 [`VsWhere::installations`]
pub async fn get_installations(
    options: Option<&QueryOptions>,
) -> Result<Vec<Installation>, VsWhereError> {
    ensure_supported_platform(std::env::consts::OS)?;
    VsWhere::from_env().installations(options).await
}
