//! vswhere 路径约定与定位配置。
//!
//! 约定：
//! - vswhere 随 Visual Studio Installer 安装在
//!   `<ProgramFiles>\Microsoft Visual Studio\Installer\vswhere.exe`
//! - 先查 `ProgramFiles(x86)`，再查 `ProgramFiles`
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// vswhere 可执行文件名。
pub const VSWHERE_EXE: &str = "vswhere.exe";

/// Program Files 下的安装程序目录（逐级）。
pub const INSTALLER_SUBDIRS: [&str; 2] = ["Microsoft Visual Studio", "Installer"];

/// 32 位 Program Files 环境变量名（第一候选）。
pub const PROGRAM_FILES_X86_VAR: &str = "ProgramFiles(x86)";

/// 标准 Program Files 环境变量名（第二候选）。
pub const PROGRAM_FILES_VAR: &str = "ProgramFiles";

/// 返回某个 Program Files 根目录下的 vswhere 路径。
pub fn vswhere_under(program_files: &Path) -> PathBuf {
    let mut p = program_files.to_path_buf();
    for dir in INSTALLER_SUBDIRS {
        p.push(dir);
    }
    p.push(VSWHERE_EXE);
    p
}

/// vswhere 定位配置（候选搜索路径）。
///
/// 字段说明：
/// - `explicit_path`：显式指定的 vswhere 路径，优先级最高
/// - `program_files_x86`/`program_files`：Program Files 根目录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorConfig {
    pub explicit_path: Option<PathBuf>,
    pub program_files_x86: Option<PathBuf>,
    pub program_files: Option<PathBuf>,
}

impl LocatorConfig {
    /// 从进程环境变量读取 Program Files 根目录。
    ///
    /// 说明：
    /// - 变量未设置或为空串时视为不存在
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var_os(name))
    }

    /// 通过给定的变量读取函数构造配置（便于在不修改进程环境的情况下测试）。
    pub fn from_vars(mut var: impl FnMut(&str) -> Option<OsString>) -> Self {
        let mut read = |name: &str| var(name).filter(|v| !v.is_empty()).map(PathBuf::from);
        Self {
            explicit_path: None,
            program_files_x86: read(PROGRAM_FILES_X86_VAR),
            program_files: read(PROGRAM_FILES_VAR),
        }
    }

    pub fn with_explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// 按优先级返回全部候选路径。
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        if let Some(p) = &self.explicit_path {
            out.push(p.clone());
        }
        out.extend(
            [&self.program_files_x86, &self.program_files]
                .into_iter()
                .flatten()
                .map(|root| vswhere_under(root)),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// 验证空串环境变量与未设置等价。
    fn empty_vars_are_absent() {
        let cfg = LocatorConfig::from_vars(|name| match name {
            PROGRAM_FILES_X86_VAR => Some(OsString::new()),
            _ => None,
        });
        assert_eq!(cfg, LocatorConfig::default());
        assert!(cfg.candidates().is_empty());
    }

    #[test]
    /// 验证候选顺序：显式路径 > x86 > 标准 Program Files。
    fn candidates_follow_priority() {
        let cfg = LocatorConfig::from_vars(|name| match name {
            PROGRAM_FILES_X86_VAR => Some(OsString::from("PF86")),
            PROGRAM_FILES_VAR => Some(OsString::from("PF")),
            _ => None,
        })
        .with_explicit_path("tools/vswhere.exe");
        let expected = vec![
            PathBuf::from("tools/vswhere.exe"),
            Path::new("PF86").join("Microsoft Visual Studio").join("Installer").join("vswhere.exe"),
            Path::new("PF").join("Microsoft Visual Studio").join("Installer").join("vswhere.exe"),
        ];
        assert_eq!(cfg.candidates(), expected);
    }
}
