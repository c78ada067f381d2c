//! vswhere 定位。
//!
//! 实现策略：
//! - 按 [`LocatorConfig::candidates`] 的优先级逐个探测，返回第一个存在的路径
//! - 探测出错（权限、路径非法等）一律视为“不存在”，不作为致命错误
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use std::path::{Path, PathBuf};

use tracing::debug;
use vsfind_core::paths::LocatorConfig;
use vsfind_core::VsWhereError;

/// 定位 vswhere 可执行文件。
///
/// 参数：
/// - `config`：候选搜索路径配置
///
/// 返回值：
/// - 成功：第一个存在的候选路径
///
/// 异常处理：
/// - 没有候选或所有候选均不存在：`ToolNotFound`（携带已检查的路径）
pub async fn locate_vswhere(config: &LocatorConfig) -> Result<PathBuf, VsWhereError> {
    let candidates = config.candidates();
    for candidate in &candidates {
        let found = path_exists(candidate).await;
        debug!(path = %candidate.display(), found, "探测 vswhere 候选路径");
        if found {
            return Ok(candidate.clone());
        }
    }
    Err(VsWhereError::ToolNotFound { searched: candidates })
}

/// 路径是否存在（stat 出错视为不存在）。
pub async fn path_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}
