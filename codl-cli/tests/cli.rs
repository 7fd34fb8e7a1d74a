use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const SHOP: &str = "IMPORT shop::handlers\n\
                    ROUTE cart \"Shopping cart\"\n    DOES «handlers::cart» \"cart\"\n        USING id FROM path:id\n";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

#[test]
fn build_translates_every_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shop.codl", SHOP);
    write(dir.path(), "admin-api.codl", "ROUTE users DOES «admin::users»\n");

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.current_dir(dir.path()).arg("build");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("translated"));

    let shop = fs::read_to_string(dir.path().join("shop.rs")).unwrap();
    assert!(shop.starts_with("// This file is auto-generated by codl. Do not edit.\n"));
    assert!(shop.contains("use shop::handlers;"));
    assert!(shop.contains("pub fn shop_routes(reg: &mut Registry) {"));
    assert!(shop.contains(".using(\"id\").from(\"path:id\");"));

    let admin = fs::read_to_string(dir.path().join("admin-api.rs")).unwrap();
    assert!(admin.contains("pub fn admin_api_routes(reg: &mut Registry) {"));
}

#[test]
fn build_with_dir_flag() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shop.codl", SHOP);

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("build").arg("-d").arg(dir.path());
    cmd.assert().success();
    assert!(dir.path().join("shop.rs").exists());
}

#[test]
fn build_without_sources_exits_2() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("build").arg("--dir").arg(dir.path());
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("No *.codl files found"));
}

#[test]
fn build_reports_grammar_error_with_context() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.codl", "ROUTE a\n  FROM x\n");

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("build").arg("-d").arg(dir.path());
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains(
            "broken.codl:2:3: FROM can only appear inside of a USING",
        ))
        .stderr(predicate::str::contains(">>   2 |   FROM x"));
    assert!(!dir.path().join("broken.rs").exists());
}

#[test]
fn strict_dialect_from_flag() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "loose.codl", "ROUTE a DOES web::flush\n");

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("build").arg("-d").arg(dir.path()).arg("--dialect").arg("strict");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("DOES requires a `literal` handler"));
}

#[test]
fn project_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shop.codl", SHOP);
    write(
        dir.path(),
        "codl.toml",
        "[render]\nregistry_path = \"crate::web::Router\"\n",
    );

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.current_dir(dir.path()).arg("build");
    cmd.assert().success();

    let shop = fs::read_to_string(dir.path().join("shop.rs")).unwrap();
    assert!(shop.contains("use crate::web::Router;"));
    assert!(shop.contains("pub fn shop_routes(reg: &mut Router) {"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shop.codl", SHOP);

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.current_dir(dir.path())
        .arg("build")
        .arg("--config")
        .arg("missing.toml");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn json_format_writes_json_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shop.codl", SHOP);

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("build").arg("-d").arg(dir.path()).arg("--format").arg("json");
    cmd.assert().success();

    let json = fs::read_to_string(dir.path().join("shop.json")).unwrap();
    assert!(json.contains("\"namespace\": \"shop\""));
    assert!(!dir.path().join("shop.rs").exists());
}

#[test]
fn inspect_tokens() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shop.codl", SHOP);

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("inspect")
        .arg(dir.path().join("shop.codl"))
        .arg("--format")
        .arg("tokens");
    cmd.assert().success().stdout(
        predicate::str::starts_with("1:1\tIMPORT\n1:8\t\"shop::handlers\"\n2:1\tROUTE\n")
            .and(predicate::str::contains("3:10\t«handlers::cart»")),
    );
}

#[test]
fn inspect_renders_rust_by_default() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shop.codl", SHOP);

    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("inspect").arg(dir.path().join("shop.codl"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "    reg.route(\"cart\", \"Shopping cart\")\n        .does(handlers::cart, \"cart\")\n",
        ));
    assert!(!dir.path().join("shop.rs").exists());
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("translate");
    cmd.assert().failure();
}

#[test]
fn version_flag() {
    let mut cmd = cargo_bin_cmd!("codl");
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
