//! 统一错误类型。
//!
//! 约定：
//! - 所有错误均为终态，本库不做重试；是否重试由调用方决定
//! - 错误只返回、不在内部记录日志或吞掉
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 查询 vswhere 过程中可能出现的错误。
#[derive(Debug, Error)]
pub enum VsWhereError {
    /// 当前主机平台不是 vswhere 的目标平台（Windows）。
    #[error("vswhere 仅在 Windows 上可用（当前平台: {os}）")]
    UnsupportedPlatform { os: String },

    /// 所有候选路径均不存在。
    #[error("未找到 vswhere（已检查 {} 个候选路径）", searched.len())]
    ToolNotFound { searched: Vec<PathBuf> },

    /// 操作系统无法启动子进程（权限不足、文件损坏等）。
    #[error("启动 vswhere 失败: {}", path.display())]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// vswhere 写出了 stderr，或 stdout 不是以 `[` 开头的文本。
    #[error("vswhere 报告错误: {0}")]
    ToolReportedError(String),

    /// stdout 不是合法 JSON。
    #[error("vswhere 输出不是合法 JSON")]
    MalformedOutput(#[source] serde_json::Error),

    /// JSON 结构不符合预期（不是数组，或元素缺少必填字段）。
    #[error("vswhere 返回的安装数据无效: {0}")]
    InvalidResultShape(String),

    /// 超过截止时间，子进程已被终止。
    #[error("vswhere 在 {0:?} 内未退出，已终止")]
    TimedOut(Duration),

    /// 调用方取消，子进程已被终止。
    #[error("vswhere 调用已取消")]
    Cancelled,

    /// 读取子进程输出或等待退出时发生 IO 错误。
    #[error("读取 vswhere 输出失败")]
    OutputRead(#[source] std::io::Error),
}

/// 错误分类（不携带数据，便于调用方按类别匹配）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedPlatform,
    ToolNotFound,
    SpawnFailed,
    ToolReportedError,
    MalformedOutput,
    InvalidResultShape,
    TimedOut,
    Cancelled,
    OutputRead,
}

impl VsWhereError {
    /// 返回错误所属的分类。
    pub fn kind(&self) -> ErrorKind {
        match self {
            VsWhereError::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            VsWhereError::ToolNotFound { .. } => ErrorKind::ToolNotFound,
            VsWhereError::SpawnFailed { .. } => ErrorKind::SpawnFailed,
            VsWhereError::ToolReportedError(_) => ErrorKind::ToolReportedError,
            VsWhereError::MalformedOutput(_) => ErrorKind::MalformedOutput,
            VsWhereError::InvalidResultShape(_) => ErrorKind::InvalidResultShape,
            VsWhereError::TimedOut(_) => ErrorKind::TimedOut,
            VsWhereError::Cancelled => ErrorKind::Cancelled,
            VsWhereError::OutputRead(_) => ErrorKind::OutputRead,
        }
    }
}
