use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::context::AppContext;

/// Context over the environment's configuration, as the server would build it
pub fn load_context() -> AppContext {
    let _ = dotenvy::dotenv();
    AppContext::from_config(crate::config::config().clone())
}

/// Print structured data as pretty JSON or YAML
pub fn print_structured<T: Serialize>(output_format: &OutputFormat, value: &T) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Text => {
            println!("✓ {}", message);
            Ok(())
        }
        _ => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }
            print_structured(output_format, &response)
        }
    }
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
            Ok(())
        }
        _ => {
            let mut response = json!({
                "success": false,
                "error": message
            });
            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }
            print_structured(output_format, &response)
        }
    }
}
