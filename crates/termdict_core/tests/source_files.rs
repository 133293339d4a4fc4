use std::fs;
use termdict_core::{
    DefaultFetcher, LoadStatus, LoaderConfig, SourceError, SourceFetcher, SourceLocation,
    SourceSpec, Subject, TermLoader,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves exactly one HTTP response on a local port and returns its URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut buf).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });
    format!("http://{addr}/physics.json")
}

fn http_spec(url: &str) -> SourceSpec {
    SourceSpec::new(Subject::Physics, SourceLocation::Http(url.to_string()))
}

#[tokio::test]
async fn default_fetcher_reads_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("physics.json");
    fs::write(
        &path,
        r#"{"Force":"A push or pull","Mass":"Amount of matter"}"#,
    )
    .unwrap();

    let record = DefaultFetcher::new()
        .fetch(&SourceSpec::file(Subject::Physics, &path))
        .await
        .unwrap();
    assert_eq!(record.len(), 2);
    assert_eq!(
        record.entries()[0],
        ("Force".to_string(), "A push or pull".to_string())
    );
}

#[tokio::test]
async fn missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let spec = SourceSpec::file(Subject::Biology, dir.path().join("biology.json"));

    let err = DefaultFetcher::new().fetch(&spec).await.unwrap_err();
    assert!(matches!(
        err,
        SourceError::Unavailable {
            subject: Subject::Biology,
            ..
        }
    ));
}

#[tokio::test]
async fn non_object_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mathematics.json");
    fs::write(&path, r#"["Integral","Derivative"]"#).unwrap();

    let err = DefaultFetcher::new()
        .fetch(&SourceSpec::file(Subject::Mathematics, &path))
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Malformed { .. }));
    assert!(err.to_string().contains("expected a JSON object"));
}

#[tokio::test]
async fn data_dir_load_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("physics.json"),
        r#"{"Velocity":"Rate of change of position"}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("mathematics.json"),
        r#"{"Integral":"Area under curve"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("biology.json"), "{}").unwrap();

    let loader =
        TermLoader::with_default_fetcher(LoaderConfig::for_data_dir(dir.path())).unwrap();
    let outcome = loader.load().await;
    assert_eq!(outcome.status(), LoadStatus::Succeeded { term_count: 2 });
}

#[tokio::test]
async fn data_dir_with_broken_file_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("physics.json"),
        r#"{"Velocity":"Rate of change of position"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("mathematics.json"), "{ not json").unwrap();
    fs::write(dir.path().join("biology.json"), r#"{"Cell":"Unit of life"}"#).unwrap();

    let loader =
        TermLoader::with_default_fetcher(LoaderConfig::for_data_dir(dir.path())).unwrap();
    let outcome = loader.load().await;
    assert!(outcome.terms.is_empty());
    assert!(outcome
        .error
        .unwrap()
        .starts_with("Failed to parse Mathematics terms"));
}

#[tokio::test]
async fn invalid_utf8_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("physics.json");
    fs::write(&path, b"{\"F\xff\":\"x\"}").unwrap();

    let err = DefaultFetcher::new()
        .fetch(&SourceSpec::file(Subject::Physics, &path))
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Malformed { .. }));
    assert_eq!(err.code(), "source_malformed");
    assert!(err.to_string().starts_with("Failed to parse Physics terms"));
}

#[tokio::test]
async fn http_error_status_is_unavailable() {
    let url = serve_once("404 Not Found", "").await;

    let err = DefaultFetcher::new().fetch(&http_spec(&url)).await.unwrap_err();
    assert_eq!(
        err,
        SourceError::Unavailable {
            subject: Subject::Physics,
            location: url.clone(),
            detail: "Status: 404".to_string(),
        }
    );
}

#[tokio::test]
async fn http_success_body_is_parsed() {
    let url = serve_once("200 OK", r#"{"Force":"Push","Mass":"Amount of matter"}"#).await;

    let record = DefaultFetcher::new().fetch(&http_spec(&url)).await.unwrap();
    assert_eq!(
        record.entries(),
        &[
            ("Force".to_string(), "Push".to_string()),
            ("Mass".to_string(), "Amount of matter".to_string()),
        ]
    );
}
