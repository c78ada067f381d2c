//! Visual Studio 安装探测核心库（跨平台/无 IO）。
//!
//! 功能：
//! - 定义 vswhere 输出的安装实例模型（`installation`）
//! - 定义查询选项模型，并将其翻译为 vswhere 命令行参数（`options` / `args`）
//! - 解析并校验 vswhere 的 JSON 输出（`parse`）
//! - 统一错误类型（`error`）与 vswhere 路径约定（`paths`）
//!
//! 约定：
//! - 本库不启动进程、不访问文件系统；这些能力由 `vsfind-windows` 提供
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

pub mod args;
pub mod error;
pub mod installation;
pub mod options;
pub mod parse;
pub mod paths;

pub use error::{ErrorKind, VsWhereError};
pub use installation::{Catalog, Installation, Properties};
pub use options::{Product, QueryOptions, Version, VersionRange};
