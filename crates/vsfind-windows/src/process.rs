//! vswhere 子进程调用。
//!
//! 行为：
//! - 直接启动 vswhere（不经过 shell），stdout/stderr 同时读取直到 EOF，再等待退出
//! - 可选截止时间与取消信号；触发时终止子进程并返回 `TimedOut`/`Cancelled`
//! - 调用 future 被丢弃时子进程同样会被终止（`kill_on_drop`）
//! - 退出码只记录日志，不参与成功判定（判定规则见 [`vsfind_core::parse::interpret_output`]）
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use std::ffi::OsStr;
use std::future::Future;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};
use vsfind_core::parse::interpret_output;
use vsfind_core::VsWhereError;

/// 调用参数。
///
/// 字段说明：
/// - `timeout`：截止时间；`None` 表示无限等待
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvokeOptions {
    pub timeout: Option<Duration>,
}

impl InvokeOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// 子进程的完整输出（按 UTF-8 解码，非法字节以替换字符表示）。
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

enum Outcome {
    Exited(io::Result<ToolOutput>),
    TimedOut,
    Cancelled,
}

/// 启动工具并返回判定后的 stdout 文本。
///
/// 异常处理：
/// - 见 [`run_tool`] 与 [`interpret_output`]
pub async fn invoke<S: AsRef<OsStr>>(
    path: &Path,
    args: &[S],
    options: &InvokeOptions,
) -> Result<String, VsWhereError> {
    let output = run_tool(path, args, options).await?;
    interpret_output(output.stdout, output.stderr)
}

/// 启动工具并收集输出（无取消信号）。
pub async fn run_tool<S: AsRef<OsStr>>(
    path: &Path,
    args: &[S],
    options: &InvokeOptions,
) -> Result<ToolOutput, VsWhereError> {
    run_tool_until(path, args, options, std::future::pending()).await
}

/// 启动工具并收集输出，直到进程退出、截止时间到达或 `cancel` 完成。
///
/// 参数：
/// - `path`：可执行文件路径
/// - `args`：命令行参数
/// - `options`：截止时间等调用参数
/// - `cancel`：取消信号；完成即视为取消
///
/// 异常处理：
/// - 无法启动：`SpawnFailed`
/// - 读取管道/等待退出失败：`OutputRead`
/// - 截止时间到达：终止子进程后返回 `TimedOut`
/// - 取消：终止子进程后返回 `Cancelled`
pub async fn run_tool_until<S, F>(
    path: &Path,
    args: &[S],
    options: &InvokeOptions,
    cancel: F,
) -> Result<ToolOutput, VsWhereError>
where
    S: AsRef<OsStr>,
    F: Future<Output = ()>,
{
    let mut child = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| VsWhereError::SpawnFailed {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), pid = ?child.id(), "已启动 vswhere");

    let timeout = options.timeout;
    let deadline = async move {
        match timeout {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);
    tokio::pin!(cancel);

    let outcome = {
        let collect = collect_output(&mut child);
        tokio::pin!(collect);
        tokio::select! {
            res = &mut collect => Outcome::Exited(res),
            _ = &mut deadline => Outcome::TimedOut,
            _ = &mut cancel => Outcome::Cancelled,
        }
    };

    match outcome {
        Outcome::Exited(res) => {
            let output = res.map_err(VsWhereError::OutputRead)?;
            debug!(
                status = %output.status,
                stdout_len = output.stdout.len(),
                stderr_len = output.stderr.len(),
                "vswhere 已退出"
            );
            Ok(output)
        }
        Outcome::TimedOut => {
            terminate(&mut child, "超时").await;
            Err(VsWhereError::TimedOut(timeout.unwrap_or_default()))
        }
        Outcome::Cancelled => {
            terminate(&mut child, "取消").await;
            Err(VsWhereError::Cancelled)
        }
    }
}

/// 同时读取 stdout/stderr 直到 EOF，再等待进程退出。
///
/// 两路管道并发读取，避免子进程因某一路缓冲区写满而阻塞。
async fn collect_output(child: &mut Child) -> io::Result<ToolOutput> {
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("stdout 未被捕获"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("stderr 未被捕获"))?;

    let mut out = Vec::new();
    let mut err = Vec::new();
    let (read_out, read_err) = tokio::join!(
        stdout.read_to_end(&mut out),
        stderr.read_to_end(&mut err)
    );
    read_out?;
    read_err?;
    let status = child.wait().await?;

    Ok(ToolOutput {
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
        status,
    })
}

/// 终止子进程（尽力而为：失败只记录日志）。
async fn terminate(child: &mut Child, reason: &str) {
    warn!(pid = ?child.id(), reason, "终止 vswhere 子进程");
    if let Err(e) = child.kill().await {
        warn!(error = %e, "终止 vswhere 子进程失败");
    }
}
