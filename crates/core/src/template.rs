use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PLACEHOLDER: char = '#';

/// A naming template with its placeholder run resolved.
///
/// The padding width is the total number of placeholder characters in the
/// template, wherever they appear. Substitution looks for that many
/// placeholders in a row, so a scattered arrangement such as `a#b#` counts
/// as width 2 but never matches the `##` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceTemplate {
    template: String,
    placeholder: char,
    width: usize,
    token: String,
}

/// Template shapes that parse fine but will not number files as intended.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateIssue {
    #[error("template has no '{0}' placeholder; every file gets the same name")]
    NoPlaceholder(char),
    #[error("the {width} '{placeholder}' placeholders are not contiguous; no number will be inserted")]
    NonContiguous { placeholder: char, width: usize },
}

impl SequenceTemplate {
    pub fn parse(template: &str, placeholder: char) -> Self {
        let width = template.chars().filter(|&c| c == placeholder).count();
        let token = std::iter::repeat(placeholder).take(width).collect();
        Self {
            template: template.to_string(),
            placeholder,
            width,
            token,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Zero-pads `n` to the placeholder width. Numbers wider than the run are
    /// kept whole.
    pub fn format_sequence(&self, n: usize) -> String {
        if self.width == 0 {
            return String::new();
        }
        format!("{:0width$}", n, width = self.width)
    }

    /// Base name (without extension) for the `n`-th file. Every occurrence of
    /// the token is replaced.
    pub fn render(&self, n: usize) -> String {
        if self.width == 0 {
            return self.template.clone();
        }
        self.template.replace(&self.token, &self.format_sequence(n))
    }

    pub fn is_contiguous(&self) -> bool {
        self.width == 0 || self.template.contains(&self.token)
    }

    pub fn issues(&self) -> Vec<TemplateIssue> {
        if self.width == 0 {
            vec![TemplateIssue::NoPlaceholder(self.placeholder)]
        } else if !self.is_contiguous() {
            vec![TemplateIssue::NonContiguous {
                placeholder: self.placeholder,
                width: self.width,
            }]
        } else {
            Vec::new()
        }
    }
}

pub fn parse_template(template: &str) -> SequenceTemplate {
    SequenceTemplate::parse(template, DEFAULT_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_and_token_follow_placeholder_run() {
        let t = parse_template("img-###");
        assert_eq!(t.width(), 3);
        assert_eq!(t.token(), "###");
        assert!(t.is_contiguous());
        assert!(t.issues().is_empty());
    }

    #[test]
    fn render_pads_to_width() {
        let t = parse_template("img-###");
        assert_eq!(t.render(1), "img-001");
        assert_eq!(t.render(42), "img-042");
        assert_eq!(t.render(999), "img-999");
    }

    #[test]
    fn render_overflows_width_without_truncation() {
        let t = parse_template("p#");
        assert_eq!(t.render(9), "p9");
        assert_eq!(t.render(10), "p10");
        assert_eq!(t.render(123), "p123");
    }

    #[test]
    fn no_placeholder_renders_template_unchanged() {
        let t = parse_template("photo");
        assert_eq!(t.width(), 0);
        assert_eq!(t.format_sequence(7), "");
        assert_eq!(t.render(1), "photo");
        assert_eq!(t.render(2), "photo");
        assert_eq!(t.issues(), vec![TemplateIssue::NoPlaceholder('#')]);
    }

    #[test]
    fn scattered_placeholders_count_total_but_do_not_substitute() {
        let t = parse_template("a#b#");
        assert_eq!(t.width(), 2);
        assert_eq!(t.token(), "##");
        assert!(!t.is_contiguous());
        assert_eq!(t.render(1), "a#b#");
        assert!(matches!(
            t.issues().as_slice(),
            [TemplateIssue::NonContiguous { width: 2, .. }]
        ));
    }

    #[test]
    fn two_runs_never_match_the_total_width_token() {
        let t = parse_template("##_x_##");
        assert_eq!(t.width(), 4);
        assert_eq!(t.token(), "####");
        assert_eq!(t.render(3), "##_x_##");
    }

    #[test]
    fn custom_placeholder_character() {
        let t = SequenceTemplate::parse("scan_@@@@ (#1)", '@');
        assert_eq!(t.width(), 4);
        assert_eq!(t.render(12), "scan_0012 (#1)");
    }
}
