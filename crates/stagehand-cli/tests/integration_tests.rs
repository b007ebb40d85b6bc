//! Integration tests for the stagehand CLI binary.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Test context that sets up a synthetic source tree and recipe
struct TestContext {
    temp_dir: TempDir,
}

const RECIPE: &str = r#"
schema = 2

[package]
name = "tst"
version = "1.4.2"
license = "MIT"
description = "xUnit-like testing framework for C++"

[abi]
policy = "minor"
"#;

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let ctx = Self { temp_dir };
        ctx.write("recipe.toml", RECIPE);
        ctx
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.temp_dir.path().join(rel)
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(path, content).expect("failed to write file");
    }

    fn stagehand(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_stagehand");
        let mut cmd = Command::new(bin_path);
        cmd.current_dir(self.temp_dir.path());
        cmd
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx
        .stagehand()
        .arg("--help")
        .output()
        .expect("failed to run stagehand");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_check_command() {
    let ctx = TestContext::new();
    let output = ctx
        .stagehand()
        .args(["check", "recipe.toml"])
        .output()
        .expect("failed to run stagehand");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Recipe is valid"));
    assert!(stdout.contains("Name: tst"));
}

#[test]
fn test_identity_command() {
    let ctx = TestContext::new();
    let output = ctx
        .stagehand()
        .args(["identity", "1.7.3", "--policy", "minor"])
        .output()
        .expect("failed to run stagehand");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1.7");
}

#[test]
fn test_identity_rejects_malformed_version() {
    let ctx = TestContext::new();
    let output = ctx
        .stagehand()
        .args(["identity", "not.a.version"])
        .output()
        .expect("failed to run stagehand");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed version"));
}

#[test]
fn test_package_static_build() {
    let ctx = TestContext::new();
    ctx.write("build/tst/tester.hpp", "// tester");
    ctx.write("build/tst/config.h", "// config");
    ctx.write("build/out/rel/libtst.a", "archive");

    let output = ctx
        .stagehand()
        .args(["package", "--source", "build", "--dest", "pkg", "--os", "linux"])
        .output()
        .expect("failed to run stagehand");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(ctx.path("pkg/include/tst/tester.hpp").exists());
    assert!(ctx.path("pkg/include/tst/config.h").exists());
    assert!(ctx.path("pkg/lib/libtst.a").exists());
    assert!(!ctx.path("pkg/bin").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Package identity: 1.4"));

    let info = std::fs::read_to_string(ctx.path("pkg/pkginfo.toml")).expect("missing pkginfo");
    let info: toml::Value = toml::from_str(&info).expect("bad pkginfo");
    assert_eq!(info["identity"].as_str(), Some("1.4"));
    assert_eq!(info["link-mode"].as_str(), Some("static"));
}

#[test]
fn test_package_shared_build_flattens_runtime_libs() {
    let ctx = TestContext::new();
    ctx.write("build/tst/tester.hpp", "// tester");
    ctx.write("build/out/rel/libtst.so", "so");
    ctx.write("build/out/rel/libtst.so.2", "so.2");

    let output = ctx
        .stagehand()
        .args([
            "package", "--source", "build", "--dest", "pkg", "--os", "linux", "--shared",
        ])
        .output()
        .expect("failed to run stagehand");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(ctx.path("pkg/lib/libtst.so").exists());
    assert!(ctx.path("pkg/lib/libtst.so.2").exists());
    assert!(!ctx.path("pkg/bin").exists());
}

#[test]
fn test_plan_json_output() {
    let ctx = TestContext::new();
    ctx.write("build/tst/tester.hpp", "// tester");
    ctx.write("build/out/rel/libtst.a", "archive");

    let output = ctx
        .stagehand()
        .args(["plan", "--source", "build", "--os", "linux", "--json"])
        .output()
        .expect("failed to run stagehand");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let plan: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("plan is not valid JSON");
    let placements = plan["placements"].as_array().expect("no placements");
    assert_eq!(placements.len(), 2);
}

#[test]
fn test_plan_does_not_copy() {
    let ctx = TestContext::new();
    ctx.write("build/tst/tester.hpp", "// tester");
    ctx.write("build/out/rel/libtst.a", "archive");

    let output = ctx
        .stagehand()
        .args(["plan", "--source", "build", "--os", "linux"])
        .output()
        .expect("failed to run stagehand");
    assert!(output.status.success());
    assert!(!ctx.path("include").exists());
    assert!(!ctx.path("lib").exists());
}

#[test]
fn test_conflicting_destinations_abort_packaging() {
    let ctx = TestContext::new();
    ctx.write("build/out/rel/a/libtst.so", "one");
    ctx.write("build/out/rel/b/libtst.so", "two");

    let output = ctx
        .stagehand()
        .args([
            "package", "--source", "build", "--dest", "pkg", "--os", "linux", "--shared",
        ])
        .output()
        .expect("failed to run stagehand");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("placement conflict"));
    // Nothing may be staged when planning fails.
    assert!(!ctx.path("pkg/lib").exists());
}

#[test]
fn test_missing_release_dir_is_an_error() {
    let ctx = TestContext::new();
    ctx.write("build/tst/tester.hpp", "// tester");

    let output = ctx
        .stagehand()
        .args(["package", "--source", "build", "--dest", "pkg", "--os", "linux"])
        .output()
        .expect("failed to run stagehand");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("release output directory"));
}
