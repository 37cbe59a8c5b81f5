use serde_json::{json, Value};

use crate::cli::utils::{output_error, print_structured};
use crate::cli::OutputFormat;

async fn probe(client: &reqwest::Client, url: &str) -> Value {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            json!({ "url": url, "status": status, "body": body })
        }
        Err(e) => json!({ "url": url, "error": e.to_string() }),
    }
}

pub async fn handle(server: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let base = server.unwrap_or_else(|| {
        let config = crate::config::config();
        format!("http://localhost:{}", config.server.port)
    });
    let base = base.trim_end_matches('/');
    let client = reqwest::Client::new();

    let health_url = format!("{}/api/health", base);
    let ready_url = format!("{}/api/health/ready", base);
    let (health, ready) = futures::join!(probe(&client, &health_url), probe(&client, &ready_url));
    let healthy = ready.get("status").and_then(Value::as_u64) == Some(200);

    match output_format {
        OutputFormat::Text => {
            for result in [&health, &ready] {
                match (result.get("status"), result.get("error")) {
                    (Some(status), _) => println!("{:<40} {}", result["url"].as_str().unwrap_or_default(), status),
                    (_, Some(error)) => println!("{:<40} unreachable: {}", result["url"].as_str().unwrap_or_default(), error),
                    _ => {}
                }
            }
        }
        _ => print_structured(&output_format, &json!({ "server": base, "health": health, "ready": ready }))?,
    }

    if !healthy {
        output_error(&output_format, &format!("{} is not ready", base), Some("NOT_READY"))?;
        anyhow::bail!("server not ready");
    }
    Ok(())
}
