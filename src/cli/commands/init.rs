use serde_json::json;

use crate::cli::utils::{load_context, output_success};
use crate::cli::OutputFormat;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let ctx = load_context();
    let provisioned = ctx.initialize().await;
    ctx.database.close().await;
    let provisioned = provisioned?;

    output_success(
        &output_format,
        &format!("Provisioned {} collections", provisioned),
        Some(json!({ "collections": provisioned })),
    )
}
