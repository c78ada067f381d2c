//! Windows 平台能力封装：定位并调用 vswhere。
//!
//! 目标：
//! - 将平台检查、文件系统探测与子进程调用集中在本库，`vsfind-core` 保持纯逻辑
//! - 统一错误类型（以 [`vsfind_core::VsWhereError`] 向上返回）
//!
//! 说明：
//! - 定位与调用本身不依赖 Win32 API，可在其他平台上配合显式配置测试；
//!   只有入口 [`get_installations`] 会拒绝非 Windows 平台
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

pub mod locate;
pub mod platform;
pub mod process;
pub mod query;

pub use query::{get_installations, VsWhere, VsWhereConfig};
