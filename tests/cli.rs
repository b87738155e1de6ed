use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn write_bundle(path: &Path, entries: &[(&str, &str)]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn xrefmap() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("xrefmap"))
}

/// Antora root of a page group inside a checkout
fn antora(checkout: &Path, path: &str) -> PathBuf {
    checkout
        .join("spring-boot-project")
        .join(path)
        .join("src/docs/antora")
}

/// Checkout with two page groups sharing a rewrite destination
fn sample_checkout(root: &Path) {
    let docs = antora(root, "spring-boot-docs");
    write_file(
        &docs.join("modules/ROOT/pages/web/servlet.adoc"),
        "[[web.servlet]]\n= Servlet Web Applications\n\n[[web.servlet.spring-mvc]]\n== Spring MVC\n",
    );
    write_file(
        &docs.join("modules/ROOT/partials/web/mvc-props.adoc"),
        "[[web.servlet.spring-mvc.properties]]\n=== Properties\n",
    );
    write_file(
        &docs.join("modules/how-to/pages/webserver.adoc"),
        "[[howto.webserver]]\n= Embedded Web Servers\n",
    );
    write_file(
        &docs.join("anchor-rewrite.properties"),
        "# legacy anchors\n\
         boot-features-spring-mvc=web.servlet.spring-mvc\n\
         howto-embedded-web-servers=howto-webserver-legacy\n\
         howto-webserver-legacy=howto.webserver\n\
         build-tool-plugins=@gradle-plugin:index.adoc\n",
    );

    let gradle = antora(root, "spring-boot-tools/spring-boot-gradle-plugin");
    write_file(
        &gradle.join("modules/ROOT/pages/packaging.adoc"),
        "[[packaging-executable]]\n= Packaging Executable Archives\n",
    );
    write_file(
        &gradle.join("anchor-rewrite.properties"),
        "spring-mvc=@ROOT:web/servlet.adoc#web.servlet.spring-mvc\n",
    );
}

fn write_config(root: &Path) -> PathBuf {
    let config = root.join("xrefmap.toml");
    write_file(
        &config,
        r#"
[[pages]]
name = "gradle-plugin"
path = "spring-boot-tools/spring-boot-gradle-plugin"

[[pages]]
name = ""
path = "spring-boot-docs"
"#,
    );
    config
}

#[test]
fn generate_prints_sorted_redirect_page() {
    let temp = tempdir().unwrap();
    sample_checkout(temp.path());
    let config = write_config(temp.path());

    let assert = xrefmap()
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .arg(temp.path())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let expected = "\
:page-layout: redirect

* xref:ROOT:packaging.adoc#packaging-executable[gradle-plugin#packaging-executable]
* xref:ROOT:web/servlet.adoc#web.servlet[#web.servlet]
* xref:ROOT:web/servlet.adoc#web.servlet.spring-mvc[gradle-plugin#spring-mvc]
* xref:ROOT:web/servlet.adoc#web.servlet.spring-mvc[#web.servlet.spring-mvc]
* xref:ROOT:web/servlet.adoc#web.servlet.spring-mvc[#boot-features-spring-mvc]
* xref:ROOT:web/servlet.adoc#web.servlet.spring-mvc.properties[#web.servlet.spring-mvc.properties]
* xref:gradle-plugin:index.adoc[#build-tool-plugins]
* xref:how-to:webserver.adoc#howto.webserver[#howto.webserver]
* xref:how-to:webserver.adoc#howto.webserver[#howto-embedded-web-servers]
* xref:how-to:webserver.adoc#howto.webserver[#howto-webserver-legacy]
";
    assert_eq!(stdout, expected);
}

#[test]
fn generate_is_reproducible() {
    let temp = tempdir().unwrap();
    sample_checkout(temp.path());
    let config = write_config(temp.path());

    let run = || {
        xrefmap()
            .arg("--config")
            .arg(&config)
            .arg("generate")
            .arg(temp.path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn generate_with_page_flags_and_jsonl() {
    let temp = tempdir().unwrap();
    sample_checkout(temp.path());

    let assert = xrefmap()
        .arg("--page")
        .arg("gradle-plugin=spring-boot-tools/spring-boot-gradle-plugin")
        .arg("--format")
        .arg("jsonl")
        .arg("generate")
        .arg(temp.path())
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[0]["xref"],
        "ROOT:packaging.adoc#packaging-executable"
    );
    assert_eq!(items[0]["source"], "gradle-plugin#packaging-executable");
    assert_eq!(items[1]["source"], "gradle-plugin#spring-mvc");
}

#[test]
fn generate_json_groups_sources() {
    let temp = tempdir().unwrap();
    sample_checkout(temp.path());
    let config = write_config(temp.path());

    let assert = xrefmap()
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json")
        .arg("generate")
        .arg(temp.path())
        .assert()
        .success();

    let value: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let redirects = value.as_array().unwrap();
    let mvc = redirects
        .iter()
        .find(|r| r["xref"] == "ROOT:web/servlet.adoc#web.servlet.spring-mvc")
        .unwrap();
    assert_eq!(
        mvc["sources"],
        serde_json::json!([
            "gradle-plugin#spring-mvc",
            "#web.servlet.spring-mvc",
            "#boot-features-spring-mvc"
        ])
    );
}

#[test]
fn generate_resolves_anchors_from_content_bundles() {
    let temp = tempdir().unwrap();
    let docs = antora(temp.path(), "docs");
    write_file(&docs.join("modules/ROOT/pages/gen.adoc"), "[[gen]]\n= Generated\n");
    write_file(&docs.join("anchor-rewrite.properties"), "old-props=gen.props\n");
    write_bundle(
        &temp
            .path()
            .join("spring-boot-project/docs/build/generated/docs/antora-content")
            .join("x-aggregate-content.zip"),
        &[("modules/ROOT/partials/props.adoc", "[[gen.props]]\n== Properties\n")],
    );

    let assert = xrefmap()
        .arg("--page")
        .arg("docs=docs")
        .arg("generate")
        .arg(temp.path())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert_eq!(
        stdout,
        ":page-layout: redirect\n\n\
         * xref:ROOT:gen.adoc#gen[docs#gen]\n\
         * xref:ROOT:gen.adoc#gen.props[docs#gen.props]\n\
         * xref:ROOT:gen.adoc#gen.props[docs#old-props]\n"
    );
}

#[test]
fn generate_fails_on_rewrite_cycle_without_output() {
    let temp = tempdir().unwrap();
    let docs = antora(temp.path(), "docs");
    write_file(&docs.join("modules/ROOT/pages/a.adoc"), "[[a]]\n");
    write_file(&docs.join("anchor-rewrite.properties"), "x=y\ny=x\n");

    xrefmap()
        .arg("--page")
        .arg("=docs")
        .arg("generate")
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Rewrite cycle"));
}

#[test]
fn generate_fails_on_orphan_partial() {
    let temp = tempdir().unwrap();
    let docs = antora(temp.path(), "docs");
    write_file(&docs.join("modules/ROOT/pages/a.adoc"), "[[a]]\n");
    write_file(&docs.join("modules/ROOT/partials/b.adoc"), "[[b.child]]\n");

    xrefmap()
        .arg("--page")
        .arg("p=docs")
        .arg("generate")
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("b.child"));
}

#[test]
fn generate_fails_on_missing_source() {
    let temp = tempdir().unwrap();

    xrefmap()
        .arg("generate")
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Source path does not exist"));
}

#[test]
fn anchors_lists_titles() {
    let temp = tempdir().unwrap();
    sample_checkout(temp.path());
    let config = write_config(temp.path());

    let assert = xrefmap()
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("jsonl")
        .arg("anchors")
        .arg(temp.path())
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["page"], "gradle-plugin");
    assert_eq!(items[0]["title"], "Packaging Executable Archives");

    let props = items
        .iter()
        .find(|i| i["id"] == "web.servlet.spring-mvc.properties")
        .unwrap();
    assert_eq!(props["kind"], "partial");
    assert_eq!(props["path"], "web/mvc-props.adoc");
    assert_eq!(props["title"], "Properties");
}

#[test]
fn check_reports_duplicates_as_warnings() {
    let temp = tempdir().unwrap();
    let docs = antora(temp.path(), "docs");
    write_file(&docs.join("modules/ROOT/pages/a.adoc"), "[[dup]]\n");
    write_file(&docs.join("modules/ROOT/pages/b.adoc"), "[[dup]]\n");

    xrefmap()
        .arg("--page")
        .arg("p=docs")
        .arg("check")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("warning[DUPLICATE_ID]"));
}

#[test]
fn check_fails_on_missing_rewrite_target() {
    let temp = tempdir().unwrap();
    let docs = antora(temp.path(), "docs");
    write_file(&docs.join("modules/ROOT/pages/a.adoc"), "[[a]]\n");
    write_file(&docs.join("anchor-rewrite.properties"), "old=gone\n");

    xrefmap()
        .arg("--page")
        .arg("p=docs")
        .arg("check")
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("error[REWRITE_TARGET_MISSING]"));
}

#[test]
fn rejects_unknown_format() {
    let temp = tempdir().unwrap();
    sample_checkout(temp.path());

    xrefmap()
        .arg("--format")
        .arg("yaml")
        .arg("generate")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));
}
