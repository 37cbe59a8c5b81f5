use crate::cli::utils::{load_context, output_error, print_structured};
use crate::cli::OutputFormat;
use crate::services::clear_all_data;

pub async fn handle(yes: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    if !yes {
        output_error(
            &output_format,
            "Refusing to wipe without --yes; this deletes every application document",
            Some("CONFIRMATION_REQUIRED"),
        )?;
        anyhow::bail!("wipe not confirmed");
    }

    let ctx = load_context();
    let report = clear_all_data(ctx.store.as_ref()).await;
    ctx.database.close().await;

    match output_format {
        OutputFormat::Text => {
            println!("{:<18} {}", "COLLECTION", "DELETED");
            println!("{}", "-".repeat(30));
            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(count) => println!("{:<18} {}", outcome.collection, count),
                    Err(e) => println!("{:<18} FAILED: {}", outcome.collection, e),
                }
            }
            println!("✓ Database cleared ({} documents removed)", report.total_deleted());
        }
        _ => print_structured(&output_format, &report.to_json())?,
    }

    if report.has_failures() {
        anyhow::bail!("{} collection(s) could not be cleared", report.failed_collections().len());
    }
    Ok(())
}
