//! 平台检查。
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use vsfind_core::VsWhereError;

/// vswhere 的目标平台（与 `std::env::consts::OS` 取值一致）。
pub const TARGET_OS: &str = "windows";

/// 判断给定平台是否受支持。
///
/// 参数：
/// - `os`：平台名（通常传入 `std::env::consts::OS`）
///
/// 异常处理：
/// - 非 Windows 返回 `UnsupportedPlatform`；该检查不读取环境变量、不访问文件系统
pub fn ensure_supported_platform(os: &str) -> Result<(), VsWhereError> {
    if os == TARGET_OS {
        Ok(())
    } else {
        Err(VsWhereError::UnsupportedPlatform { os: os.to_string() })
    }
}

/// 当前进程所在平台是否受支持。
pub fn is_current_platform_supported() -> bool {
    ensure_supported_platform(std::env::consts::OS).is_ok()
}
