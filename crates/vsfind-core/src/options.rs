//! 查询选项模型（对应 vswhere 的过滤/排序参数）。
//!
//! 说明：
//! - 选项由调用方按次构造，仅被参数构造器消费一次，不做持久化
//! - 未提供选项时的默认行为见 [`QueryOptions::implicit`]
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual Studio 产品 ID。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "Microsoft.VisualStudio.Product.Community")]
    Community,
    #[serde(rename = "Microsoft.VisualStudio.Product.Professional")]
    Professional,
    #[serde(rename = "Microsoft.VisualStudio.Product.Enterprise")]
    Enterprise,
    #[serde(rename = "Microsoft.VisualStudio.Product.BuildTools")]
    BuildTools,
}

impl Product {
    /// 全部已知产品（按固定顺序）。
    pub const ALL: [Product; 4] = [
        Product::Community,
        Product::Professional,
        Product::Enterprise,
        Product::BuildTools,
    ];

    /// 返回 vswhere 使用的完整产品 ID。
    pub fn id(self) -> &'static str {
        match self {
            Product::Community => "Microsoft.VisualStudio.Product.Community",
            Product::Professional => "Microsoft.VisualStudio.Product.Professional",
            Product::Enterprise => "Microsoft.VisualStudio.Product.Enterprise",
            Product::BuildTools => "Microsoft.VisualStudio.Product.BuildTools",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            Product::Community => "community",
            Product::Professional => "professional",
            Product::Enterprise => "enterprise",
            Product::BuildTools => "buildtools",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Product {
    type Err = String;

    /// 接受短名（`community`，不区分大小写）或完整产品 ID。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::ALL
            .into_iter()
            .find(|p| p.short_name().eq_ignore_ascii_case(s) || p.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("未知产品: {s}（可选: community/professional/enterprise/buildtools）"))
    }
}

/// 版本边界。
///
/// 字段说明：
/// - `major`：必填
/// - `minor`/`patch`：可选且分层，`patch` 仅在 `minor` 存在时有意义
/// - `exclusive`：该边界是否为开区间
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    #[serde(default)]
    pub minor: Option<u32>,
    #[serde(default)]
    pub patch: Option<u32>,
    #[serde(default)]
    pub exclusive: bool,
}

impl Version {
    /// 仅含主版本号的闭边界。
    pub fn new(major: u32) -> Self {
        Self {
            major,
            ..Self::default()
        }
    }

    pub fn with_minor(mut self, minor: u32) -> Self {
        self.minor = Some(minor);
        self
    }

    pub fn with_patch(mut self, patch: u32) -> Self {
        self.patch = Some(patch);
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }
}

/// 按 vswhere 区间表达式中的写法渲染版本号。
///
/// 规则：
/// - 仅有 `major`：`17`
/// - 有 `minor` 无 `patch`：`major` 与 `minor` 直接拼接，不加分隔符（`17` + `5` => `175`）
/// - 同时有 `minor` 与 `patch`：`17.5.2`
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.minor, self.patch) {
            (None, _) => write!(f, "{}", self.major),
            (Some(minor), None) => write!(f, "{}{}", self.major, minor),
            (Some(minor), Some(patch)) => write!(f, "{}.{}.{}", self.major, minor, patch),
        }
    }
}

impl FromStr for Version {
    type Err = String;

    /// 解析 `17`、`17.5`、`17.5.2` 形式的版本（结果为闭边界）。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let mut next_number = |name: &str| -> Result<Option<u32>, String> {
            match parts.next() {
                None => Ok(None),
                Some(p) => p
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|_| format!("版本号 {name} 部分不是数字: {s}")),
            }
        };
        let major = next_number("major")?.ok_or_else(|| format!("空版本号: {s}"))?;
        let minor = next_number("minor")?;
        let patch = next_number("patch")?;
        if parts.next().is_some() {
            return Err(format!("版本号最多三段: {s}"));
        }
        Ok(Version {
            major,
            minor,
            patch,
            exclusive: false,
        })
    }
}

/// 版本区间（上下界均可缺省，缺省端为开放端）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    #[serde(default)]
    pub lower: Option<Version>,
    #[serde(default)]
    pub upper: Option<Version>,
}

impl VersionRange {
    pub fn new(lower: Option<Version>, upper: Option<Version>) -> Self {
        Self { lower, upper }
    }

    /// 渲染为 vswhere `-version` 参数的区间表达式，例如 `[17,18)`。
    pub fn to_expression(&self) -> String {
        let lb = if self.lower.is_some_and(|v| v.exclusive) { '(' } else { '[' };
        let rb = if self.upper.is_some_and(|v| v.exclusive) { ')' } else { ']' };
        let lo = self.lower.map(|v| v.to_string()).unwrap_or_default();
        let hi = self.upper.map(|v| v.to_string()).unwrap_or_default();
        format!("{lb}{lo},{hi}{rb}")
    }
}

/// 查询选项。
///
/// 字段说明：
/// - `all`：包含未完成/需重启等非完整状态的实例
/// - `prerelease`：包含预览版实例
/// - `products`：产品过滤；为空表示全部产品（`*`）
/// - `requires`：必需的工作负载/组件 ID，支持 `?`/`*` 通配符，原样传给 vswhere
/// - `requires_any`：`requires` 中任意一项满足即可
/// - `version_range`：版本区间
/// - `latest`：仅返回最新实例
/// - `sort`：按版本与安装时间从新到旧排序
/// - `legacy`：同时搜索 VS2015 及更早的产品（信息有限，不能与 `products`/`requires` 同用）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    pub all: bool,
    pub prerelease: bool,
    pub products: Vec<Product>,
    pub requires: Vec<String>,
    pub requires_any: bool,
    pub version_range: Option<VersionRange>,
    pub latest: bool,
    pub sort: bool,
    pub legacy: bool,
}

impl QueryOptions {
    /// 调用方未提供选项时采用的默认值：`all`、`prerelease`、`sort` 为真，其余为空。
    pub fn implicit() -> Self {
        Self {
            all: true,
            prerelease: true,
            sort: true,
            ..Self::default()
        }
    }
}
