use crate::cli::utils::print_structured;
use crate::cli::OutputFormat;
use crate::database::models::{all_schemas, find_schema, CollectionSchema, IndexDirection};

fn describe_indexes(schema: &CollectionSchema) -> String {
    schema
        .indexes
        .iter()
        .map(|index| {
            let fields: Vec<String> = index
                .fields
                .iter()
                .map(|(field, direction)| match direction {
                    IndexDirection::Asc => field.to_string(),
                    IndexDirection::Desc => format!("{} desc", field),
                })
                .collect();
            let unique = if index.unique { " unique" } else { "" };
            format!("({}){}", fields.join(", "), unique)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn handle(collection: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let schemas = match collection {
        Some(name) => vec![find_schema(&name).ok_or_else(|| anyhow::anyhow!("Unknown collection: {}", name))?],
        None => all_schemas(),
    };

    match output_format {
        OutputFormat::Text => {
            println!("{:<16} {:<14} {:<12} {}", "COLLECTION", "MODEL", "SCOPE", "INDEXES");
            println!("{}", "-".repeat(90));
            for schema in &schemas {
                println!(
                    "{:<16} {:<14} {:<12} {}",
                    schema.collection,
                    schema.model,
                    schema.scope_key,
                    describe_indexes(schema)
                );
            }
            Ok(())
        }
        _ => print_structured(&output_format, &schemas),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_description_marks_direction_and_uniqueness() {
        let contacts = find_schema("contacts").unwrap();
        let described = describe_indexes(&contacts);
        assert!(described.starts_with("(contactId) unique"));
        assert!(described.contains("(email, createdAt desc)"));
    }
}
