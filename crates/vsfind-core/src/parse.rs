//! vswhere 输出的判定、解析与校验。
//!
//! 处理顺序：
//! 1) [`interpret_output`]：根据 stderr/stdout 判定调用是否成功
//! 2) [`parse_installations`]：JSON 解析 + 结构校验（全有或全无）
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use serde_json::Value;

use crate::error::VsWhereError;
use crate::installation::Installation;

/// 每个实例必须存在且非空的字段。
pub const REQUIRED_FIELDS: [&str; 3] = ["instanceId", "installationPath", "productId"];

/// 根据子进程捕获的输出判定调用结果。
///
/// 参数：
/// - `stdout`/`stderr`：按 UTF-8 解码后的完整输出
///
/// 返回值：
/// - `Ok(stdout)`：stderr 为空，且 stdout 为空或以 `[` 开头
///
/// 异常处理：
/// - stderr 非空：`ToolReportedError(stderr)`，即使 stdout 中有合法 JSON，且与退出码无关
/// - stdout 非空但首字符不是 `[`：`ToolReportedError(stdout)`（vswhere 部分错误会写到 stdout）
pub fn interpret_output(stdout: String, stderr: String) -> Result<String, VsWhereError> {
    if !stderr.is_empty() {
        return Err(VsWhereError::ToolReportedError(stderr));
    }
    if !stdout.is_empty() && !stdout.starts_with('[') {
        return Err(VsWhereError::ToolReportedError(stdout));
    }
    Ok(stdout)
}

/// 解析并校验 vswhere 的 JSON 输出。
///
/// 返回值：
/// - 成功：全部实例
///
/// 异常处理：
/// - JSON 解析失败（含空文本）：`MalformedOutput`
/// - 顶层不是数组、任一元素不是对象或缺少必填非空字段：`InvalidResultShape`，不返回部分结果
pub fn parse_installations(text: &str) -> Result<Vec<Installation>, VsWhereError> {
    let value: Value = serde_json::from_str(text).map_err(VsWhereError::MalformedOutput)?;
    validate_installations(&value)?;
    serde_json::from_value(value).map_err(|e| VsWhereError::InvalidResultShape(e.to_string()))
}

/// 校验解析后的 JSON 是否为合法的实例数组。
pub fn validate_installations(value: &Value) -> Result<(), VsWhereError> {
    let items = value
        .as_array()
        .ok_or_else(|| VsWhereError::InvalidResultShape(format!("顶层不是数组: {}", json_type(value))))?;
    for (index, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            VsWhereError::InvalidResultShape(format!("第 {index} 个元素不是对象: {}", json_type(item)))
        })?;
        for field in REQUIRED_FIELDS {
            let present = obj
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty());
            if !present {
                return Err(VsWhereError::InvalidResultShape(format!(
                    "第 {index} 个元素缺少非空字段 {field}"
                )));
            }
        }
    }
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
