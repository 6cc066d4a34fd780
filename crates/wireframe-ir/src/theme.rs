//! Theme and project-config resolution.
//!
//! Merges the project's `theme` block (if any) over the engine defaults and
//! converts `colors`/`mocks` blocks into pass-through config maps. Duplicate
//! blocks are reported by the structure pass; here only the first block of
//! each kind is read.

use indexmap::IndexMap;
use wireframe_ast::ast::{Project, PropBlock, Value};
use wireframe_ast::{Diagnostic, ErrorKind};

use crate::document::{
    ConfigValue, Density, ProjectConfig, RadiusToken, SpacingToken, StrokeWeight, ThemeConfig,
};

/// Resolve the project configuration.
pub fn resolve(project: &Project, diags: &mut Vec<Diagnostic>) -> ProjectConfig {
    let mut config = ProjectConfig::default();

    if let Some(block) = project.themes.first() {
        apply_theme(block, &mut config.theme, diags);
    }
    if let Some(block) = project.colors.first() {
        config.colors = to_config_map(block);
    }
    if let Some(block) = project.mocks.first() {
        config.mocks = to_config_map(block);
    }

    config
}

fn apply_theme(block: &PropBlock, theme: &mut ThemeConfig, diags: &mut Vec<Diagnostic>) {
    for (key, value) in &block.entries {
        match key.as_str() {
            "density" => {
                apply_token(value, block, key, diags, theme, |t, k| {
                    Density::from_keyword(k).map(|v| t.density = v)
                });
            }
            "spacing" => {
                apply_token(value, block, key, diags, theme, |t, k| {
                    SpacingToken::from_keyword(k).map(|v| t.spacing = v)
                });
            }
            "radius" => {
                apply_token(value, block, key, diags, theme, |t, k| {
                    RadiusToken::from_keyword(k).map(|v| t.radius = v)
                });
            }
            "stroke" => {
                apply_token(value, block, key, diags, theme, |t, k| {
                    StrokeWeight::from_keyword(k).map(|v| t.stroke = v)
                });
            }
            "font" => match value {
                Value::Text(s) => theme.font = s.clone(),
                Value::Keyword(k) => theme.font = k.clone(),
                Value::Number(_) => diags.push(Diagnostic::error(
                    ErrorKind::Theme,
                    Some(block.span),
                    "theme 'font' must be a string",
                )),
            },
            other => diags.push(Diagnostic::warning(
                ErrorKind::Theme,
                Some(block.span),
                format!("unknown theme key '{}'", other),
            )),
        }
    }
}

/// Apply one keyword-valued theme entry, reporting an error when the value
/// is not a keyword or not one of the accepted tokens.
fn apply_token(
    value: &Value,
    block: &PropBlock,
    key: &str,
    diags: &mut Vec<Diagnostic>,
    theme: &mut ThemeConfig,
    set: impl FnOnce(&mut ThemeConfig, &str) -> Option<()>,
) {
    let accepted = match value.as_keyword() {
        Some(keyword) => set(theme, keyword).is_some(),
        None => false,
    };
    if !accepted {
        diags.push(Diagnostic::error(
            ErrorKind::Theme,
            Some(block.span),
            format!("invalid value {} for theme key '{}'", value, key),
        ));
    }
}

fn to_config_map(block: &PropBlock) -> IndexMap<String, ConfigValue> {
    block
        .entries
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Text(s) => ConfigValue::Text(s.clone()),
                Value::Keyword(k) => ConfigValue::Text(k.clone()),
                Value::Number(n) => ConfigValue::Number(*n),
            };
            (key.clone(), value)
        })
        .collect()
}

impl Density {
    /// Parse a density keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "compact" => Some(Density::Compact),
            "normal" => Some(Density::Normal),
            "comfortable" => Some(Density::Comfortable),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireframe_ast::foundation::Span;
    use wireframe_ast::has_errors;

    fn project_with_theme(entries: Vec<(&str, Value)>) -> Project {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Project {
            name: "T".to_string(),
            themes: vec![PropBlock {
                entries,
                span: Span::zero(0),
            }],
            colors: Vec::new(),
            mocks: Vec::new(),
            defines: Vec::new(),
            screens: Vec::new(),
            span: Span::zero(0),
        }
    }

    #[test]
    fn test_defaults_without_theme_block() {
        let project = project_with_theme(vec![]);
        let mut diags = Vec::new();
        let config = resolve(&project, &mut diags);
        assert_eq!(config.theme, ThemeConfig::default());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let project = project_with_theme(vec![
            ("spacing", Value::Keyword("lg".to_string())),
            ("density", Value::Keyword("compact".to_string())),
        ]);
        let mut diags = Vec::new();
        let config = resolve(&project, &mut diags);

        assert_eq!(config.theme.spacing, SpacingToken::Lg);
        assert_eq!(config.theme.density, Density::Compact);
        // Untouched keys keep their defaults
        assert_eq!(config.theme.radius, RadiusToken::Md);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_unknown_theme_key_is_warning() {
        let project = project_with_theme(vec![("densty", Value::Keyword("compact".to_string()))]);
        let mut diags = Vec::new();
        resolve(&project, &mut diags);

        assert_eq!(diags.len(), 1);
        assert!(!has_errors(&diags));
        assert!(diags[0].message.contains("densty"));
    }

    #[test]
    fn test_invalid_token_value_is_error() {
        let project = project_with_theme(vec![("spacing", Value::Keyword("huge".to_string()))]);
        let mut diags = Vec::new();
        resolve(&project, &mut diags);

        assert!(has_errors(&diags));
        assert!(diags[0].message.contains("'spacing'"));
    }

    #[test]
    fn test_non_keyword_token_value_is_error() {
        let project = project_with_theme(vec![("spacing", Value::Number(12.0))]);
        let mut diags = Vec::new();
        resolve(&project, &mut diags);
        assert!(has_errors(&diags));
    }

    #[test]
    fn test_colors_pass_through() {
        let mut project = project_with_theme(vec![]);
        let mut entries = indexmap::IndexMap::new();
        entries.insert(
            "primary".to_string(),
            Value::Text("#336699".to_string()),
        );
        project.colors.push(PropBlock {
            entries,
            span: Span::zero(0),
        });

        let mut diags = Vec::new();
        let config = resolve(&project, &mut diags);
        assert_eq!(
            config.colors.get("primary"),
            Some(&ConfigValue::Text("#336699".to_string()))
        );
    }
}
