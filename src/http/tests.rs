use super::executor::describe_error;
use super::test_support::{closed_port_url, spawn_status_server};
use super::*;
use std::future::Future;
use std::time::Duration;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn executor_for(base_url: &str, timeout: Duration) -> Result<HttpExecutor, String> {
    let client = build_client(&ClientSettings {
        request_timeout: timeout,
        pool_size: 2,
    })
    .map_err(|err| format!("client build failed: {}", err))?;
    Ok(HttpExecutor::new(client, base_url))
}

#[test]
fn executor_records_ok_response() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_status_server("200 OK", None).await?;
        let executor = executor_for(&server.url, Duration::from_secs(5))?;

        let sample = executor.execute("/stress.php?cpu=1").await;
        if sample.status_code() != 200 {
            return Err(format!("Unexpected status: {}", sample.status_code()));
        }
        if sample.error().is_some() {
            return Err("Expected no error for a completed response".to_owned());
        }
        if !sample.is_success() {
            return Err("Expected success".to_owned());
        }
        if server.hits() != 1 {
            return Err(format!("Expected one hit, got {}", server.hits()));
        }
        Ok(())
    })
}

#[test]
fn executor_keeps_real_status_for_error_responses() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_status_server("503 Service Unavailable", None).await?;
        let executor = executor_for(&server.url, Duration::from_secs(5))?;

        let sample = executor.execute("/").await;
        if sample.status_code() != 503 {
            return Err(format!("Unexpected status: {}", sample.status_code()));
        }
        if sample.error().is_some() {
            return Err("Non-2xx responses are not request errors".to_owned());
        }
        if sample.is_success() {
            return Err("Expected failure".to_owned());
        }
        Ok(())
    })
}

#[test]
fn executor_connection_refused_yields_error_sample() -> Result<(), String> {
    run_async_test(async {
        let url = closed_port_url()?;
        let executor = executor_for(&url, Duration::from_secs(5))?;

        let sample = executor.execute("/").await;
        if sample.status_code() != 0 {
            return Err(format!("Expected status 0, got {}", sample.status_code()));
        }
        match sample.error() {
            Some(error) if !error.is_empty() => {}
            Some(_) | None => return Err("Expected an error description".to_owned()),
        }
        if sample.response_time() > Duration::from_secs(5) {
            return Err("Connection failure should not wait for the timeout".to_owned());
        }
        Ok(())
    })
}

#[test]
fn executor_timeout_yields_error_sample() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_status_server("200 OK", Some(Duration::from_secs(5))).await?;
        let executor = executor_for(&server.url, Duration::from_millis(200))?;

        let sample = executor.execute("/slow").await;
        if sample.status_code() != 0 {
            return Err(format!("Expected status 0, got {}", sample.status_code()));
        }
        if sample.error().is_none() {
            return Err("Expected timeout description".to_owned());
        }
        if sample.response_time() < Duration::from_millis(200) {
            return Err(format!(
                "Elapsed time should cover the timeout, got {:?}",
                sample.response_time()
            ));
        }
        Ok(())
    })
}

#[test]
fn executor_strips_trailing_slashes() -> Result<(), String> {
    let executor = executor_for("http://localhost:8080///", Duration::from_secs(1))?;
    if executor.base_url() != "http://localhost:8080" {
        return Err(format!("Unexpected base url: {}", executor.base_url()));
    }
    Ok(())
}

#[test]
fn normalize_base_url_accepts_http_and_https() -> Result<(), String> {
    let cases = [
        ("http://localhost/", "http://localhost"),
        ("https://app.example.com/base//", "https://app.example.com/base"),
        ("  http://10.0.0.1:8080  ", "http://10.0.0.1:8080"),
    ];
    for (input, expected) in cases {
        let normalized =
            normalize_base_url(input).map_err(|err| format!("{} rejected: {}", input, err))?;
        if normalized != expected {
            return Err(format!("Unexpected normalization of {}: {}", input, normalized));
        }
    }
    Ok(())
}

#[test]
fn normalize_base_url_rejects_invalid() -> Result<(), String> {
    for input in ["localhost:8080", "ftp://example.com", "not a url", ""] {
        if normalize_base_url(input).is_ok() {
            return Err(format!("Expected {} to be rejected", input));
        }
    }
    Ok(())
}

#[test]
fn describe_error_includes_sources() -> Result<(), String> {
    let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let outer = crate::error::OutputError::Write {
        path: "out.json".into(),
        source: inner,
    };
    let description = describe_error(&outer);
    if !description.contains("out.json") || !description.ends_with("refused") {
        return Err(format!("Unexpected description: {}", description));
    }
    Ok(())
}
