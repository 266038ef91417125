//! Tests for `cobble check` and `cobble download` against a local release server

use super::common::{manifest_json, package_zip, TestHome};
use std::process::Output;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_release(server: &MockServer, release: &str, version: &str) {
    let package_url = format!("{}/PebbleWuff.appx.zip", server.uri());

    Mock::given(method("GET"))
        .and(path("/version.js"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(manifest_json(&package_url, release, version)),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/PebbleWuff.appx.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(package_zip()))
        .mount(server)
        .await;
}

fn point_at(home: &TestHome, server: &MockServer) {
    home.write_config(&format!("manifest_url: {}/version.js\n", server.uri()));
}

async fn run(home: &TestHome, args: &'static [&'static str]) -> Output {
    let mut cmd = home.command();
    cmd.args(args).arg("--quiet");
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_reports_new_version() {
    let server = MockServer::start().await;
    serve_release(&server, "rc", "1.4").await;
    let home = TestHome::new();
    point_at(&home, &server);

    let output = run(&home, &["check"]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("New Update Available! v1.4-rc"));
    assert!(stdout.contains("cobble install"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_up_to_date() {
    let server = MockServer::start().await;
    serve_release(&server, "beta", "1.4").await;
    let home = TestHome::new();
    point_at(&home, &server);
    home.write_state("1.4", "stable");
    std::fs::create_dir_all(home.work_dir()).unwrap();
    std::fs::write(home.work_dir().join("PebbleWuff.appx"), "appx").unwrap();

    let output = run(&home, &["check"]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Up to date, Current: v1.4-stable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_server_error_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version.js"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let home = TestHome::new();
    point_at(&home, &server);

    let output = run(&home, &["check"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Update check failed"));
    assert!(stderr.contains("Error: HTTP error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_fetches_and_records_release() {
    let server = MockServer::start().await;
    serve_release(&server, "rc", "1.4").await;
    let home = TestHome::new();
    point_at(&home, &server);

    let output = run(&home, &["download"]).await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(home.work_dir().join("PebbleWuff.appx").is_file());
    assert!(!home.work_dir().join("PebbleWuff.appx.zip").exists());

    let state = home.read_state();
    assert!(state.contains("1.4"));
    assert!(state.contains("current_release: rc"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_skips_when_up_to_date() {
    let server = MockServer::start().await;
    serve_release(&server, "rc", "1.4").await;
    let home = TestHome::new();
    point_at(&home, &server);
    home.write_state("1.4", "rc");
    std::fs::create_dir_all(home.work_dir()).unwrap();
    std::fs::write(home.work_dir().join("PebbleWuff.appx"), "old").unwrap();

    let output = run(&home, &["download"]).await;
    assert!(output.status.success());
    assert_eq!(
        std::fs::read(home.work_dir().join("PebbleWuff.appx")).unwrap(),
        b"old"
    );

    let output = run(&home, &["download", "--force"]).await;
    assert!(output.status.success());
    assert_eq!(
        std::fs::read(home.work_dir().join("PebbleWuff.appx")).unwrap(),
        b"fake appx"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_keeps_files_next_to_custom_work_dir() {
    let server = MockServer::start().await;
    serve_release(&server, "rc", "1.4").await;
    let home = TestHome::new();
    let documents = home.path().join("Documents");
    std::fs::create_dir_all(&documents).unwrap();
    std::fs::write(documents.join("thesis.docx"), "draft").unwrap();
    home.write_config(&format!(
        "manifest_url: {}/version.js\nwork_dir: {}\n",
        server.uri(),
        documents.display()
    ));

    let output = run(&home, &["download", "--force"]).await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        std::fs::read_to_string(documents.join("thesis.docx")).unwrap(),
        "draft"
    );
    assert!(documents.join("Res").join("PebbleWuff.appx").is_file());
}
