//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

fn run_weave(root: &Path, args: &[&str], env: &[(&str, &str)]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_weave");
    Command::new(bin)
        .args(args)
        .current_dir(root)
        .env("WEAVE_ROOT", root)
        .env_remove("WEAVE_RECORD")
        .env_remove("WEAVE_REPLAY")
        .envs(env.iter().copied())
        .output()
        .expect("failed to run weave binary")
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn help_lists_every_command() {
    let root = scratch("weave_cli_help");
    let output = run_weave(&root, &["--help"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for name in [
        "combine",
        "build",
        "dist",
        "cdist",
        "clean-build",
        "clean-src",
        "watch",
        "lang-check",
        "icons-check",
    ] {
        assert!(stdout.contains(name), "help is missing {name}");
    }
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn unknown_subcommand_fails() {
    let root = scratch("weave_cli_unknown");
    let output = run_weave(&root, &["bundle"], &[]);
    assert!(!output.status.success());
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn clean_src_deletes_compiled_tree_and_tolerates_absence() {
    let root = scratch("weave_cli_clean_src");
    write(&root, "src/views/index.js", "x");
    write(&root, "tmpl/views/index.ts", "x");

    let output = run_weave(&root, &["clean-src"], &[]);
    assert!(output.status.success());
    assert!(!root.join("src").exists());
    assert!(root.join("tmpl/views/index.ts").exists());

    let again = run_weave(&root, &["clean-src"], &[]);
    assert!(again.status.success());
    let build = run_weave(&root, &["clean-build"], &[]);
    assert!(build.status.success());
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn combine_failure_exits_non_zero_but_dist_failure_does_not() {
    let root = scratch("weave_cli_failures");
    write(&root, "tmpl/iot.ts", "boot();");
    let failing = [("WEAVE_TRANSPILE_CMD", "cat >/dev/null; echo boom >&2; exit 3")];

    let combine = run_weave(&root, &["combine"], &failing);
    assert!(!combine.status.success());
    assert!(String::from_utf8_lossy(&combine.stderr).contains("boom"));

    let dist = run_weave(&root, &["dist"], &failing);
    assert!(dist.status.success());
    assert!(String::from_utf8_lossy(&dist.stderr).contains("boom"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn combine_with_custom_transpiler_writes_normalized_modules() {
    let root = scratch("weave_cli_combine");
    write(&root, "tmpl/views/index.ts", "exports.default = view;");
    write(&root, "tmpl/views/index.html", "<div></div>");

    let output = run_weave(&root, &["combine"], &[("WEAVE_TRANSPILE_CMD", "cat")]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("complete"));
    assert!(stdout.contains("tmpl/views/index.ts 2/2"));

    let module = std::fs::read_to_string(root.join("src/views/index.js")).unwrap();
    assert!(module.starts_with("define(\"rd/views/index\""));
    assert!(module.contains("module.exports = view;"));
    assert!(root.join("src/views/index.html").exists());
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn lang_check_reports_and_writes_snapshot() {
    let root = scratch("weave_cli_lang_check");
    write(
        &root,
        "tmpl/i18n/zh-cn.ts",
        "export default { '@:{lang#ok}': '确定', '@:{lang#no}': '否' };",
    );
    write(&root, "tmpl/views/a.html", "<b>@:{lang#ok}</b><i>@:{lang#lost}</i><p>保存</p>");

    let output = run_weave(&root, &["lang-check"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Unused markers (1)"));
    assert!(stdout.contains("@:{lang#no}"));
    assert!(stdout.contains("Missed markers (1)"));
    assert!(stdout.contains("@:{lang#lost}"));
    assert!(stdout.contains("保存"));
    assert!(root.join(".weave-cache/lang-check.yaml").exists());
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn binary_assets_pass_through_combine_and_lang_check() {
    let root = scratch("weave_cli_binary_assets");
    let png: &[u8] = &[0x89, b'P', b'N', b'G', 0xff, 0xfe, 0];
    std::fs::create_dir_all(root.join("tmpl/assets")).unwrap();
    std::fs::write(root.join("tmpl/assets/logo.png"), png).unwrap();
    write(&root, "tmpl/i18n/zh-cn.ts", "export default { '@:{lang#ok}': '确定' };");
    write(&root, "tmpl/views/a.html", "<b>@:{lang#ok}</b>");

    let combine = run_weave(&root, &["combine"], &[("WEAVE_TRANSPILE_CMD", "cat")]);
    assert!(combine.status.success(), "stderr: {}", String::from_utf8_lossy(&combine.stderr));
    assert_eq!(std::fs::read(root.join("src/assets/logo.png")).unwrap(), png);

    let lang = run_weave(&root, &["lang-check"], &[]);
    assert!(lang.status.success(), "stderr: {}", String::from_utf8_lossy(&lang.stderr));
    assert!(String::from_utf8_lossy(&lang.stdout).contains("Unused markers (0)"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn lang_check_without_locale_file_fails() {
    let root = scratch("weave_cli_lang_missing");
    let output = run_weave(&root, &["lang-check"], &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("locale file"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn icons_check_replays_catalog_from_cassette() {
    let root = scratch("weave_cli_icons_check");
    write(&root, "tmpl/a.css", r".a:before { content: '\e6a1'; }");
    let cassette = root.join("catalog.cassette.yaml");
    write(
        &root,
        "catalog.cassette.yaml",
        r#"name: icons-check
recorded_at: 2025-06-15T09:30:00Z
source: test
interactions:
- seq: 0
  port: catalog
  method: fetch
  input: {}
  output:
    ok: '{"data":{"icons":[{"unicode":"59041","name":"used"},{"unicode":"59042","name":"spare"}]}}'
"#,
    );

    let replay = [("WEAVE_REPLAY", cassette.to_str().unwrap())];
    let output = run_weave(&root, &["icons-check"], &replay);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Unused icons (1)"));
    assert!(stdout.contains("e6a2"));
    assert!(stdout.contains("spare"));
    let _ = std::fs::remove_dir_all(&root);
}
