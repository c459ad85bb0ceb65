//! Runtime template rendering
//!
//! Templates are plain files substituted with `{{ key }}` placeholders at
//! send time. The engine also understands conditional and loop blocks, but
//! variable substitution is all this crate relies on.

use std::collections::HashMap;
use std::path::Path;

use minijinja::Environment;
use serde_json::Value;

use crate::error::MailError;

/// Read a template file and render it with the given data mapping
///
/// Unknown placeholders render as empty text rather than failing.
///
/// # Errors
///
/// Returns `MailError::TemplateNotFound` if the file cannot be read, or
/// `MailError::Template` if it fails to compile or render
pub async fn render_file(
    path: &Path,
    data: &HashMap<String, Value>,
) -> Result<String, MailError> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|_| MailError::TemplateNotFound(path.display().to_string()))?;

    let env = Environment::new();
    let template = env.template_from_str(&source)?;

    Ok(template.render(data)?)
}
