//! Implementation of the `promptforge compile` command.
//!
//! Builds bindings from `--set` pairs and/or a named test case, compiles
//! the prompt, and prints the provider-agnostic result as JSON.

use crate::cli::CompileArgs;
use crate::compiler;
use crate::document::PromptDocument;
use crate::error::{ForgeError, Result};
use crate::schema;
use serde_json::Value;
use std::collections::BTreeMap;

/// Execute the `promptforge compile` command.
pub fn cmd_compile(args: CompileArgs) -> Result<()> {
    let document = PromptDocument::load(&args.file)?;

    let mut bindings: BTreeMap<String, Value> = BTreeMap::new();

    // Test case inputs first; explicit --set pairs override them.
    if let Some(case_name) = &args.test_case {
        let case = document.test_case(case_name).ok_or_else(|| {
            let available: Vec<&str> = document
                .test_cases
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|tc| tc.name.as_str())
                .collect();
            ForgeError::UserError(format!(
                "test case '{}' not found in '{}'.\n\n\
                 Available test cases: {}",
                case_name,
                args.file.display(),
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            ))
        })?;
        bindings.extend(case.inputs.clone());
    }

    for pair in &args.set {
        let (name, value) = parse_binding(pair)?;
        bindings.insert(name, value);
    }

    // Unbound required variables are not an error: the placeholder stays
    // visible in the output. Still worth a heads-up on stderr.
    for variable in schema::extract_variables(&document) {
        if variable.required && !bindings.contains_key(&variable.name) {
            eprintln!(
                "warning: no binding for required variable '{}'",
                variable.name
            );
        }
    }

    let compiled = compiler::compile(&document, &bindings);
    let json = serde_json::to_string_pretty(&compiled)
        .map_err(|e| ForgeError::UserError(format!("failed to serialize compiled prompt: {}", e)))?;

    match &args.output {
        Some(path) => {
            crate::fs::atomic_write_file(path, &format!("{}\n", json))?;
            println!("Wrote compiled prompt to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Parse a `NAME=VALUE` binding pair. The value is always a string; typed
/// bindings come from test cases.
fn parse_binding(pair: &str) -> Result<(String, Value)> {
    let Some((name, value)) = pair.split_once('=') else {
        return Err(ForgeError::UserError(format!(
            "invalid --set value '{}': expected NAME=VALUE",
            pair
        )));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(ForgeError::UserError(format!(
            "invalid --set value '{}': variable name is empty",
            pair
        )));
    }

    Ok((name.to_string(), Value::String(value.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_binding() {
        let (name, value) = parse_binding("query=hello world").unwrap();
        assert_eq!(name, "query");
        assert_eq!(value, Value::String("hello world".to_string()));
    }

    #[test]
    fn value_may_contain_equals_signs() {
        let (name, value) = parse_binding("expr=a=b").unwrap();
        assert_eq!(name, "expr");
        assert_eq!(value, Value::String("a=b".to_string()));
    }

    #[test]
    fn rejects_pair_without_equals() {
        assert!(parse_binding("queryhello").is_err());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(parse_binding("=value").is_err());
    }
}
