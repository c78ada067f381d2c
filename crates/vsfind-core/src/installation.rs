//! vswhere 输出的安装实例模型。
//!
//! 说明：
//! - 字段名与 vswhere `-format json` 输出保持一致（camelCase）
//! - 除 `instanceId`/`installationPath`/`productId` 外，字段均视为 vswhere 透传的不透明值：
//!   缺失、为 `null` 或类型与预期不符时不报错（不同 vswhere 版本与 `-legacy` 实例输出并不一致）
//!   - 字符串字段：数字/布尔值转为文本，`null` 视为空串
//!   - 其余字段：无法解析时取默认值
//! - 本模块仅定义数据结构；必填字段的校验见 [`crate::parse`]
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use serde::{Deserialize, Serialize};

/// 一个已安装的 Visual Studio 实例。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    /// 实例 ID（必填、非空）。
    pub instance_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub install_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub installation_name: String,
    /// 安装目录（必填、非空）。
    pub installation_path: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub installation_version: String,
    /// 产品 ID（必填、非空），例如 `Microsoft.VisualStudio.Product.Community`。
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub product_path: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    /// 实例状态码（位掩码形式，含义由 vswhere 定义）。
    pub state: i64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_complete: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_launchable: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_prerelease: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_reboot_required: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub display_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub channel_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub channel_uri: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub engine_path: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub installed_channel_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub installed_channel_uri: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub release_notes: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub resolved_installation_path: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub third_party_notices: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub update_date: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    /// 产品目录信息（构建分支、版本号等）。
    pub catalog: Catalog,
    #[serde(default, deserialize_with = "lenient::or_default")]
    /// 安装程序属性。
    pub properties: Properties,
}

/// 实例的产品目录信息（全部按字符串处理）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    #[serde(deserialize_with = "lenient::string")]
    pub build_branch: String,
    #[serde(deserialize_with = "lenient::string")]
    pub build_version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub local_build: String,
    #[serde(deserialize_with = "lenient::string")]
    pub manifest_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub manifest_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_display_version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_line: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_line_version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_milestone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_milestone_is_pre_release: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_patch_version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_pre_release_milestone_suffix: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product_semantic_version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub required_engine_version: String,
}

/// 实例的安装程序属性。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    #[serde(deserialize_with = "lenient::string")]
    pub campaign_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub channel_manifest_id: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    /// 仅部分实例携带。
    pub include_recommended: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub nickname: String,
    #[serde(deserialize_with = "lenient::string")]
    pub setup_engine_file_path: String,
}

/// 宽松反序列化：vswhere 透传字段出现意外类型时不使整条记录失效。
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(text(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn optional_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(text(Value::deserialize(d)?))
    }

    pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(serde_json::from_value(Value::deserialize(d)?).unwrap_or_default())
    }
}
