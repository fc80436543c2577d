use crate::errors::FieldError;
use validator::ValidationErrors;

fn default_message(code: &str, field: &str) -> String {
    match code {
        "email" => "Invalid email format".to_string(),
        "url" => "Invalid URL format".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        "required" => format!("{field} is required"),
        "custom" => "Custom validation failed".to_string(),
        _ => format!("Invalid {field}"),
    }
}

/// Flattens `validator` output into field errors, sorted by field name so the
/// report order does not depend on hash map iteration.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut result: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| default_message(e.code.as_ref(), field.as_ref()));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();

    result.sort_by(|a, b| a.field.cmp(&b.field));
    result
}
