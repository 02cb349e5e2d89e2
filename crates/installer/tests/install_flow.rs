//! End-to-end installation tests against a stub release server.

use std::collections::HashMap;
use std::io::{Cursor, Write};

use relkit_core::{ArtifactKind, AssetName, Error, ToolSpec, VersionRequest};
use relkit_github::ReleaseClient;
use relkit_installer::Installer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn zip_with_binary(name: &str) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
        writer.start_file(name, options).unwrap();
        writer.write_all(b"#!/bin/sh\nexit 0\n").unwrap();
        writer.finish().unwrap();
    }
    buffer.into_inner()
}

fn installer_for(server: &MockServer, root: &std::path::Path) -> Installer {
    let client = ReleaseClient::new().with_base_urls(server.uri(), server.uri());
    Installer::new(client, root.to_path_buf())
}

#[tokio::test]
async fn pinned_zip_install_end_to_end() {
    let server = MockServer::start().await;
    // Expected URL shape: /O/R/releases/download/v1.0.0/x_v1.0.0_linux_amd64.zip
    Mock::given(method("GET"))
        .and(path("/O/R/releases/download/v1.0.0/x_v1.0.0_linux_amd64.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_with_binary("x")))
        .expect(1)
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let installer = installer_for(&server, root.path());

    let spec = ToolSpec::new(
        "x",
        "O",
        AssetName::template("x_{version}_linux_amd64.zip"),
        ArtifactKind::Zip,
    )
    .with_repo("R");

    let installed = installer
        .install(&spec, &VersionRequest::Pinned("v1.0.0".to_string()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(installed.version, "v1.0.0");
    assert_eq!(installed.dir, root.path().join("x").join("v1.0.0"));
    assert!(installed.dir.join("x").is_file());
}

#[tokio::test]
async fn latest_resolution_feeds_the_asset_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/O/tool/releases/latest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tag_name": "v2.3.1" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/O/tool/releases/download/v2.3.1/tool_v2.3.1_linux_amd64.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_with_binary("tool")))
        .expect(1)
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let installer = installer_for(&server, root.path());

    let spec = ToolSpec::new(
        "tool",
        "O",
        AssetName::template("tool_{version}_linux_amd64.zip"),
        ArtifactKind::Zip,
    );

    let installed = installer
        .install(&spec, &VersionRequest::Latest)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(installed.version, "v2.3.1");
}

#[tokio::test]
async fn raw_binary_install_places_executable_under_tool_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/O/bare/releases/download/v1.0.0/bare-v1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x7fELF".to_vec()))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let installer = installer_for(&server, root.path());

    let spec = ToolSpec::new(
        "bare",
        "O",
        AssetName::template("bare-{version}"),
        ArtifactKind::Binary,
    );

    let installed = installer
        .install(&spec, &VersionRequest::Pinned("v1.0.0".to_string()))
        .await
        .unwrap()
        .unwrap();

    let binary = installed.dir.join("bare");
    assert!(binary.is_file());
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0, "installed binary must be executable");
    }
}

#[tokio::test]
async fn one_failing_tool_does_not_block_the_next() {
    let server = MockServer::start().await;
    // Tool A: download 404s. Tool B: succeeds.
    Mock::given(method("GET"))
        .and(path("/O/b/releases/download/v1.0.0/b_v1.0.0_linux_amd64.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_with_binary("b")))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let installer = installer_for(&server, root.path());

    let specs = vec![
        ToolSpec::new(
            "a",
            "O",
            AssetName::template("a_{version}_linux_amd64.zip"),
            ArtifactKind::Zip,
        ),
        ToolSpec::new(
            "b",
            "O",
            AssetName::template("b_{version}_linux_amd64.zip"),
            ArtifactKind::Zip,
        ),
    ];
    let requests = HashMap::from([
        ("a".to_string(), VersionRequest::Pinned("v1.0.0".to_string())),
        ("b".to_string(), VersionRequest::Pinned("v1.0.0".to_string())),
    ]);

    let summary = installer.run_all(&specs, &requests).await;

    assert!(summary.is_failure());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].name, "a");
    assert!(matches!(
        summary.failures[0].error,
        Error::DownloadFailed { .. }
    ));

    assert_eq!(summary.installed.len(), 1);
    assert_eq!(summary.installed[0].name, "b");
    assert!(summary.installed[0].dir.join("b").is_file());
}

#[tokio::test]
async fn corrupt_archive_is_extract_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/O/c/releases/download/v1.0.0/c_v1.0.0_linux_amd64.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"this is not a zip".to_vec()))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let installer = installer_for(&server, root.path());

    let spec = ToolSpec::new(
        "c",
        "O",
        AssetName::template("c_{version}_linux_amd64.zip"),
        ArtifactKind::Zip,
    );

    let err = installer
        .install(&spec, &VersionRequest::Pinned("v1.0.0".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ExtractFailed { .. }));
}

#[tokio::test]
async fn failing_post_install_fails_the_tool_after_binary_lands() {
    use relkit_core::{HookAction, PostInstall, VersionGate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/O/d/releases/download/v2.0.0/d_v2.0.0_linux_amd64.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_with_binary("d")))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let installer = installer_for(&server, root.path());

    let spec = ToolSpec::new(
        "d",
        "O",
        AssetName::template("d_{version}_linux_amd64.zip"),
        ArtifactKind::Zip,
    )
    .with_post_install(PostInstall::when(
        VersionGate::after("1.0.0"),
        HookAction::command("false", Vec::<String>::new()),
    ));

    let err = installer
        .install(&spec, &VersionRequest::Pinned("v2.0.0".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PostInstallFailed { .. }));

    // The binary itself did land; only the hook failed.
    assert!(root.path().join("d").join("v2.0.0").join("d").is_file());
}
