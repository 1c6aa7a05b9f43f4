//! End-to-end runs of the `valkyrie-gallery` binary against a fixture site.

mod common;

use common::{TestServer, fixture_site, run, stdout};

fn site_arg(site: &std::path::Path) -> String {
    site.to_str().unwrap().to_string()
}

#[test]
fn build_resolves_portraits_against_site_root() {
    let site = fixture_site();
    let root = site_arg(site.path());
    let out = site.path().join("dist");
    let output = run(
        site.path(),
        &["--site-root", &root, "build", "--output", out.to_str().unwrap()],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let html = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert_eq!(html.matches("<article").count(), 4);
    assert!(html.contains(r#"src="/assets/hi3/characters/kiana.webp""#));
    assert!(html.contains(r#"src="/assets/hi3/characters/mei.jpg""#));
    assert!(html.contains(r#"src="/assets/hi3/characters/bronya.png""#));
    assert!(html.contains(r#"src="/assets/placeholder.png""#));
    assert!(out.join("gallery.js").is_file());

    // Cards keep source order
    let kiana = html.find(r#"data-slug="kiana""#).unwrap();
    let mei = html.find(r#"data-slug="mei""#).unwrap();
    let himeko = html.find(r#"data-slug="himeko""#).unwrap();
    assert!(kiana < mei && mei < himeko);

    let text = stdout(&output);
    assert!(text.contains("(4 items)"));
    assert!(text.contains("4 cards rendered"));
}

#[test]
fn build_without_site_root_defers_to_browser() {
    let site = fixture_site();
    let data = site.path().join("data/characters.json");
    let out = site.path().join("dist");
    let output = run(
        site.path(),
        &["--data", data.to_str().unwrap(), "build", "--output", out.to_str().unwrap()],
    );
    assert!(output.status.success());

    let html = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains(r#"src="/assets/hi3/characters/himeko.webp""#));
    assert_eq!(html.matches(r#"data-attempt="0""#).count(), 4);
}

#[test]
fn build_with_missing_data_renders_empty_grid() {
    let site = fixture_site();
    let out = site.path().join("dist");
    let output = run(
        site.path(),
        &["--data", "/nowhere/characters.json", "build", "--output", out.to_str().unwrap()],
    );
    assert!(output.status.success());

    let html = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains(r#"<div id="grid"></div>"#));
    assert!(stdout(&output).contains("unavailable"));
}

#[test]
fn search_filters_case_and_whitespace_insensitively() {
    let site = fixture_site();
    let root = site_arg(site.path());
    let output = run(site.path(), &["--site-root", &root, "search", "Kas Lana"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Search \"Kas Lana\": 1 of 4"));
    assert!(text.contains("001 Kiana Kaslana（琪亚娜） [kiana]"));
}

#[test]
fn search_without_matches() {
    let site = fixture_site();
    let root = site_arg(site.path());
    let output = run(site.path(), &["--site-root", &root, "search", "xyz"]);
    assert!(stdout(&output).contains("Search \"xyz\": 0 of 4"));
}

#[test]
fn show_opens_lightbox_on_resolved_source() {
    let site = fixture_site();
    let root = site_arg(site.path());
    let output = run(site.path(), &["--site-root", &root, "show", "mei"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Lightbox: Open"));
    assert!(text.contains("Image: /assets/hi3/characters/mei.jpg"));
    assert!(text.contains("Caption: Raiden Mei（雷电芽衣）"));
}

#[test]
fn show_unknown_slug_fails() {
    let site = fixture_site();
    let root = site_arg(site.path());
    let output = run(site.path(), &["--site-root", &root, "show", "otto"]);
    assert!(!output.status.success());
}

#[test]
fn check_reports_placeholder_and_unused_images() {
    let site = fixture_site();
    let root = site_arg(site.path());
    let output = run(site.path(), &["--site-root", &root, "check"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Unused images"));
    assert!(text.contains("theresa.png"));
    assert!(text.contains("4 items, 1 without a portrait, 1 unused images"));
}

#[test]
fn gen_config_is_valid_toml() {
    let site = fixture_site();
    let output = run(site.path(), &["gen-config"]);
    assert!(output.status.success());
    let parsed: toml::Value = toml::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["img_base"].as_str(), Some("/assets/hi3/characters/"));
}

#[test]
fn config_file_with_unknown_key_fails() {
    let site = fixture_site();
    let config = site.path().join("gallery.toml");
    std::fs::write(&config, "img_bse = \"/x/\"\n").unwrap();
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_valkyrie-gallery"))
        .arg("--config")
        .arg(&config)
        .args(["search", "kiana"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn http_data_source() {
    let site = fixture_site();
    let server = TestServer::start(site.path().to_path_buf());
    let url = format!("{}/data/characters.json", server.url());
    let output = run(site.path(), &["--data", &url, "search", "芽衣"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Search \"芽衣\": 1 of 4"));
}

#[test]
fn http_404_gives_empty_gallery() {
    let site = fixture_site();
    let server = TestServer::start(site.path().to_path_buf());
    let url = format!("{}/data/missing.json", server.url());
    let output = run(site.path(), &["--data", &url, "search", ""]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("HTTP status 404"));
    assert!(text.contains("Search \"\": 0 of 0"));
}

#[test]
fn remote_portraits_resolve_with_fetch_images() {
    let site = fixture_site();
    let server = TestServer::start(site.path().to_path_buf());
    let data = format!("{}/data/characters.json", server.url());
    let img_base = format!("{}/assets/hi3/characters/", server.url());
    let output = run(
        site.path(),
        &["--data", &data, "--img-base", &img_base, "--fetch-images", "show", "bronya"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains(&format!("Image: {img_base}bronya.png")));
}

#[test]
fn check_without_site_root_reports_portraits_as_unchecked() {
    let site = fixture_site();
    let data = site.path().join("data/characters.json");
    let output = run(site.path(), &["--data", data.to_str().unwrap(), "check"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("4 items, 4 not checked, 0 unused images"));
    assert!(!text.contains("without a portrait"));
}
