//! Query templates: `{entity}` substitution and placeholder validation.

use clap::ValueEnum;

pub const PLACEHOLDER: &str = "{entity}";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template must include the {{entity}} placeholder: {0:?}")]
    MissingPlaceholder(String),
}

/// Whether a template without `{entity}` is accepted.
///
/// `Allow` keeps static templates usable: every entity then receives the same literal query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlaceholderPolicy {
    Require,
    Allow,
}

pub fn has_placeholder(template: &str) -> bool {
    template.contains(PLACEHOLDER)
}

/// Replace every `{entity}` in `template` with `entity`. Templates without the
/// placeholder come back unchanged.
pub fn expand(template: &str, entity: &str) -> String {
    template.replace(PLACEHOLDER, entity)
}

pub fn validate(template: &str, policy: PlaceholderPolicy) -> Result<(), TemplateError> {
    match policy {
        PlaceholderPolicy::Require if !has_placeholder(template) => {
            Err(TemplateError::MissingPlaceholder(template.to_string()))
        }
        _ => Ok(()),
    }
}
