#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use uuid::Uuid;
use vsfind_core::args::build_args;
use vsfind_core::paths::{vswhere_under, LocatorConfig};
use vsfind_core::{Product, QueryOptions, Version, VersionRange};
use vsfind_windows::process::InvokeOptions;
use vsfind_windows::{VsWhere, VsWhereConfig};

const FAKE_VSWHERE: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$(dirname "$0")/args.txt"
cat <<'JSON'
[
  {
    "instanceId": "4a1b2c3d",
    "installationPath": "C:\\Program Files\\Microsoft Visual Studio\\2022\\Community",
    "installationVersion": "17.9.34728.123",
    "productId": "Microsoft.VisualStudio.Product.Community",
    "displayName": "Visual Studio Community 2022",
    "isComplete": true,
    "catalog": { "productDisplayVersion": "17.9.6" }
  }
]
JSON
"#;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{prefix}-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn install_fake_vswhere(program_files: &Path) -> PathBuf {
    let exe = vswhere_under(program_files);
    std::fs::create_dir_all(exe.parent().expect("installer dir")).expect("create installer dir");
    std::fs::write(&exe, FAKE_VSWHERE)
        .unwrap_or_else(|e| panic!("write {} failed: {e}", exe.display()));
    std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    exe
}

#[tokio::test]
async fn query_runs_located_tool_with_built_args() {
    let dir = unique_temp_dir("vsfind-pipeline");
    let _cleanup = CleanupDir(dir.clone());
    let exe = install_fake_vswhere(&dir.join("pf"));

    let vswhere = VsWhere::new(VsWhereConfig {
        locator: LocatorConfig {
            program_files: Some(dir.join("pf")),
            ..LocatorConfig::default()
        },
        invoke: InvokeOptions::with_timeout(Duration::from_secs(30)),
    });
    assert_eq!(vswhere.locate().await.expect("locate"), exe);

    let options = QueryOptions {
        products: vec![Product::Community],
        requires: vec!["Microsoft.VisualStudio.Component.VC.*".to_string()],
        version_range: Some(VersionRange::new(
            Some(Version::new(17)),
            Some(Version::new(18).exclusive()),
        )),
        latest: true,
        ..QueryOptions::default()
    };
    let first = vswhere.installations(Some(&options)).await.expect("query");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].instance_id, "4a1b2c3d");
    assert_eq!(first[0].product_id, Product::Community.id());
    assert_eq!(first[0].catalog.product_display_version, "17.9.6");

    let recorded = std::fs::read_to_string(exe.parent().expect("installer dir").join("args.txt"))
        .expect("fake vswhere records its args");
    let recorded: Vec<&str> = recorded.lines().collect();
    assert_eq!(recorded, build_args(Some(&options)));

    let second = vswhere.installations(Some(&options)).await.expect("query again");
    assert_eq!(first, second);
}

struct CleanupDir(PathBuf);

impl Drop for CleanupDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
