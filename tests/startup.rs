//! Process-level startup behaviour, including settings read from a `.env`
//! file in the working directory.

use std::time::Duration;

use tokio::process::Command;

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn exits_non_zero_without_credentials_and_never_binds() {
    let workdir = tempfile::tempdir().unwrap();
    let port = free_port();

    let output = tokio::time::timeout(
        Duration::from_secs(30),
        Command::new(env!("CARGO_BIN_EXE_confluence-proxy"))
            .env_clear()
            .env("PORT", port.to_string())
            .env("CONFLUENCE_SPACE_KEY", "DOCS")
            .current_dir(workdir.path())
            .output(),
    )
    .await
    .expect("proxy should exit promptly")
    .unwrap();

    assert!(!output.status.success());

    // The port was never taken.
    assert!(std::net::TcpListener::bind(("127.0.0.1", port)).is_ok());
}

#[tokio::test]
async fn exits_non_zero_with_only_email() {
    let workdir = tempfile::tempdir().unwrap();

    let status = tokio::time::timeout(
        Duration::from_secs(30),
        Command::new(env!("CARGO_BIN_EXE_confluence-proxy"))
            .env_clear()
            .env("CONFLUENCE_EMAIL", "someone@example.com")
            .current_dir(workdir.path())
            .status(),
    )
    .await
    .expect("proxy should exit promptly")
    .unwrap();

    assert!(!status.success());
}

#[tokio::test]
async fn starts_from_dotenv_in_working_directory() {
    let workdir = tempfile::tempdir().unwrap();
    let port = free_port();
    std::fs::write(
        workdir.path().join(".env"),
        format!(
            "PORT={port}\n\
             CONFLUENCE_EMAIL=someone@example.com\n\
             CONFLUENCE_API_TOKEN=from-dotenv\n\
             CONFLUENCE_BASE_URL=http://127.0.0.1:9\n"
        ),
    )
    .unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_confluence-proxy"))
        .env_clear()
        .current_dir(workdir.path())
        .kill_on_drop(true)
        .spawn()
        .unwrap();

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let health = format!("http://127.0.0.1:{}/health", port);
    let mut status = None;
    for _ in 0..100 {
        if let Ok(res) = client.get(&health).send().await {
            status = Some(res.status());
            break;
        }
        if let Ok(Some(exit)) = child.try_wait() {
            panic!("proxy exited early: {exit}");
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    child.kill().await.unwrap();
    assert_eq!(status, Some(reqwest::StatusCode::OK));
}
