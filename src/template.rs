//! Template engine for user input templates.
//!
//! Prompt documents carry a `user_input_template` string containing
//! `{{variable}}` placeholders. This module provides the two operations the
//! rest of the tool builds on:
//!
//! - [`extract_variables`]: list the distinct variable names a template
//!   references, in first-occurrence order
//! - [`substitute`]: replace placeholders with bound values
//!
//! # Syntax
//!
//! A placeholder is two opening braces, optional whitespace, a name made of
//! any run of characters other than `}`, optional whitespace, and two closing
//! braces. Names are not validated against an identifier grammar, so
//! `{{a.b}}` extracts as `a.b`; interpreting dotted or otherwise complex
//! names is the caller's business.
//!
//! # Error Handling
//!
//! Substitution is fail-safe in the opposite direction from most template
//! engines: an unbound variable is not an error. The placeholder passes
//! through literally, which keeps the gap visible in compiled output instead
//! of silently dropping it or aborting the compile.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Matches a `{{ name }}` placeholder. The capture holds the raw name,
/// whitespace included; callers trim it.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder regex is valid"));

/// Extract the distinct variable names referenced by a template.
///
/// Names appear in first-occurrence order with duplicates collapsed to
/// their first occurrence. An empty template, or one without placeholders,
/// yields an empty list.
///
/// This function is pure and deterministic; the validator and compiler both
/// rely on it producing identical output for identical input.
///
/// # Examples
///
/// ```no_run
/// use promptforge::template::extract_variables;
///
/// let vars = extract_variables("Review {{code}} in {{language}} ({{code}})");
/// assert_eq!(vars, vec!["code".to_string(), "language".to_string()]);
/// ```
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut names = Vec::new();

    for caps in PLACEHOLDER.captures_iter(template) {
        let name = caps[1].trim().to_string();
        // First occurrence wins; order is part of the contract, so this is
        // an explicit list + contains check rather than map iteration.
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

/// Substitute bound values into a template.
///
/// Every `{{ name }}` occurrence whose trimmed name has a binding is
/// replaced with the string form of the bound value. Unbound placeholders
/// are left in place. Substitution is a single pass over the template, so
/// placeholders inside substituted values are never themselves substituted.
pub fn substitute(template: &str, bindings: &BTreeMap<String, Value>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| {
            let name = caps[1].trim();
            match bindings.get(name) {
                Some(value) => value_to_string(value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// String form of a bound value.
///
/// JSON strings substitute verbatim (no surrounding quotes); everything
/// else uses its compact JSON rendering.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bindings<const N: usize>(pairs: [(&str, Value); N]) -> BTreeMap<String, Value> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn extracts_single_variable() {
        assert_eq!(extract_variables("{{query}}"), vec!["query"]);
    }

    #[test]
    fn extracts_in_first_occurrence_order() {
        let vars = extract_variables("{{b}} then {{a}} then {{c}}");
        assert_eq!(vars, vec!["b", "a", "c"]);
    }

    #[test]
    fn collapses_duplicates_to_first_occurrence() {
        let vars = extract_variables("{{x}} {{y}} {{x}} {{y}} {{x}}");
        assert_eq!(vars, vec!["x", "y"]);
    }

    #[test]
    fn trims_whitespace_around_names() {
        let vars = extract_variables("{{ name }} and {{\tother }}");
        assert_eq!(vars, vec!["name", "other"]);
    }

    #[test]
    fn whitespace_variants_collapse_to_one_name() {
        let vars = extract_variables("{{name}} {{ name }} {{name }}");
        assert_eq!(vars, vec!["name"]);
    }

    #[test]
    fn empty_template_yields_empty_list() {
        assert_eq!(extract_variables(""), Vec::<String>::new());
    }

    #[test]
    fn template_without_placeholders_yields_empty_list() {
        assert_eq!(
            extract_variables("just plain text with } braces {"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn dotted_names_pass_through_unvalidated() {
        let vars = extract_variables("{{user.name}} {{items[0]}}");
        assert_eq!(vars, vec!["user.name", "items[0]"]);
    }

    #[test]
    fn single_braces_are_not_placeholders() {
        assert_eq!(
            extract_variables("if (x) { return y; }"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let template = "{{b}} {{a}} {{b}}";
        assert_eq!(extract_variables(template), extract_variables(template));
    }

    #[test]
    fn substitutes_string_value() {
        let b = bindings([("query", json!("Hello, world!"))]);
        assert_eq!(substitute("{{query}}", &b), "Hello, world!");
    }

    #[test]
    fn substitutes_all_occurrences() {
        let b = bindings([("x", json!("X"))]);
        assert_eq!(substitute("{{x}}-{{x}}-{{x}}", &b), "X-X-X");
    }

    #[test]
    fn substitutes_with_whitespace_in_placeholder() {
        let b = bindings([("name", json!("Alice"))]);
        assert_eq!(substitute("Hello { name }!", &b), "Hello { name }!");
        assert_eq!(substitute("Hello {{ name }}!", &b), "Hello Alice!");
    }

    #[test]
    fn unbound_placeholder_passes_through_literally() {
        let b = bindings([("known", json!("v"))]);
        assert_eq!(
            substitute("{{known}} and {{unknown}}", &b),
            "v and {{unknown}}"
        );
    }

    #[test]
    fn numbers_and_booleans_stringify() {
        let b = bindings([("age", json!(30)), ("active", json!(true))]);
        assert_eq!(
            substitute("Age: {{age}}, Active: {{active}}", &b),
            "Age: 30, Active: true"
        );
    }

    #[test]
    fn arrays_render_as_compact_json() {
        let b = bindings([("items", json!(["a", "b"]))]);
        assert_eq!(substitute("{{items}}", &b), "[\"a\",\"b\"]");
    }

    #[test]
    fn substitution_is_single_pass() {
        // The substituted value contains a placeholder for another binding;
        // a single pass must leave it alone.
        let b = bindings([("a", json!("{{b}}")), ("b", json!("X"))]);
        assert_eq!(substitute("{{a}}", &b), "{{b}}");
    }

    #[test]
    fn value_with_dollar_signs_is_literal() {
        let b = bindings([("price", json!("$100"))]);
        assert_eq!(substitute("Cost: {{price}}", &b), "Cost: $100");
    }

    #[test]
    fn empty_binding_value_substitutes() {
        let b = bindings([("empty", json!(""))]);
        assert_eq!(substitute("before{{empty}}after", &b), "beforeafter");
    }

    #[test]
    fn unicode_in_template_and_values() {
        let b = bindings([("emoji", json!("🎉")), ("text", json!("日本語"))]);
        assert_eq!(
            substitute("Hello {{emoji}} {{text}}!", &b),
            "Hello 🎉 日本語!"
        );
    }
}
