//! 将 [`QueryOptions`] 翻译为 vswhere 命令行参数。
//!
//! 输出顺序固定（部分 vswhere 版本对参数顺序敏感）：
//! `-all` `-prerelease` `-products` `-requires` `-requiresAny` `-version` `-latest` `-sort`
//! `-legacy`，最后总是 `-format json -utf8`。
//!
//! 作者：vsfind 项目组
//! 创建时间：2026-10-17
//! 修改时间：2026-10-17

use crate::options::QueryOptions;

/// 产品过滤为空时使用的通配符。
pub const ALL_PRODUCTS: &str = "*";

/// 构造 vswhere 参数列表。
///
/// 参数：
/// - `options`：查询选项；为 `None` 时按 [`QueryOptions::implicit`] 处理
///
/// 返回值：
/// - 有序的参数列表（纯函数，无副作用、无失败）
pub fn build_args(options: Option<&QueryOptions>) -> Vec<String> {
    let implicit;
    let options = match options {
        Some(o) => o,
        None => {
            implicit = QueryOptions::implicit();
            &implicit
        }
    };

    let mut args: Vec<String> = Vec::new();
    if options.all {
        args.push("-all".into());
    }
    if options.prerelease {
        args.push("-prerelease".into());
    }
    args.push("-products".into());
    if options.products.is_empty() {
        args.push(ALL_PRODUCTS.into());
    } else {
        args.extend(options.products.iter().map(|p| p.id().to_string()));
    }
    if !options.requires.is_empty() {
        args.push("-requires".into());
        args.extend(options.requires.iter().cloned());
    }
    if options.requires_any {
        args.push("-requiresAny".into());
    }
    if let Some(range) = &options.version_range {
        args.push("-version".into());
        args.push(range.to_expression());
    }
    if options.latest {
        args.push("-latest".into());
    }
    if options.sort {
        args.push("-sort".into());
    }
    if options.legacy {
        args.push("-legacy".into());
    }
    args.extend(["-format", "json", "-utf8"].map(String::from));
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Product, Version, VersionRange};

    #[test]
    /// 验证未提供选项时等价于 `all + prerelease + sort`。
    fn absent_options_use_implicit_defaults() {
        assert_eq!(
            build_args(None),
            ["-all", "-prerelease", "-products", "*", "-sort", "-format", "json", "-utf8"]
        );
        assert_eq!(build_args(None), build_args(Some(&QueryOptions::implicit())));
    }

    #[test]
    /// 验证空选项对象只输出产品通配符与固定尾部参数。
    fn empty_options_only_emit_products_and_format() {
        assert_eq!(
            build_args(Some(&QueryOptions::default())),
            ["-products", "*", "-format", "json", "-utf8"]
        );
    }

    #[test]
    /// 验证全部选项同时开启时的输出顺序。
    fn full_options_keep_fixed_order() {
        let options = QueryOptions {
            all: true,
            prerelease: true,
            products: vec![Product::Community, Product::Enterprise],
            requires: vec![
                "Microsoft.VisualStudio.Component.VC.Tools.x86.x64".to_string(),
                "Microsoft.VisualStudio.Workload.*".to_string(),
            ],
            requires_any: true,
            version_range: Some(VersionRange::new(
                Some(Version::new(17)),
                Some(Version::new(18).exclusive()),
            )),
            latest: true,
            sort: true,
            legacy: true,
        };
        assert_eq!(
            build_args(Some(&options)),
            [
                "-all",
                "-prerelease",
                "-products",
                "Microsoft.VisualStudio.Product.Community",
                "Microsoft.VisualStudio.Product.Enterprise",
                "-requires",
                "Microsoft.VisualStudio.Component.VC.Tools.x86.x64",
                "Microsoft.VisualStudio.Workload.*",
                "-requiresAny",
                "-version",
                "[17,18)",
                "-latest",
                "-sort",
                "-legacy",
                "-format",
                "json",
                "-utf8",
            ]
        );
    }

    #[test]
    /// 验证产品列表按调用方给定顺序输出，且不出现通配符。
    fn products_keep_caller_order() {
        let options = QueryOptions {
            products: vec![Product::BuildTools, Product::Community],
            ..QueryOptions::default()
        };
        let args = build_args(Some(&options));
        assert_eq!(
            &args[..3],
            [
                "-products",
                "Microsoft.VisualStudio.Product.BuildTools",
                "Microsoft.VisualStudio.Product.Community",
            ]
        );
        assert!(!args.iter().any(|a| a == ALL_PRODUCTS));
    }

    #[test]
    /// 验证任意选项组合下参数均以 `-format json -utf8` 结尾。
    fn always_ends_with_format_json_utf8() {
        let mut cases = vec![QueryOptions::default(), QueryOptions::implicit()];
        cases.push(QueryOptions {
            legacy: true,
            latest: true,
            ..QueryOptions::default()
        });
        cases.push(QueryOptions {
            version_range: Some(VersionRange::default()),
            requires: vec!["x".into()],
            ..QueryOptions::default()
        });
        for options in &cases {
            let args = build_args(Some(options));
            assert_eq!(&args[args.len() - 3..], ["-format", "json", "-utf8"], "{options:?}");
        }
    }
}
