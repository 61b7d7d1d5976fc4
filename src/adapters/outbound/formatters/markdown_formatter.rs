use crate::application::read_models::{Document, IgnoredMatchView, MatchView, SourceTarget};
use crate::ports::outbound::DocumentFormatter;
use crate::shared::Result;

/// Markdown table header for matches
const MATCH_TABLE_HEADER: &str =
    "| Vulnerability | Severity | Risk | Package | Version | Type | Fixed In | State |\n";

/// Markdown table separator line for matches
const MATCH_TABLE_SEPARATOR: &str =
    "|---------------|----------|------|---------|---------|------|----------|-------|\n";

/// Markdown table header for ignored matches
const IGNORED_TABLE_HEADER: &str = "| Vulnerability | Package | Version | Reason |\n";

/// Markdown table separator line for ignored matches
const IGNORED_TABLE_SEPARATOR: &str = "|---------------|---------|---------|--------|\n";

/// MarkdownFormatter adapter for a human-readable vulnerability report
///
/// Matches are listed in document order, so the chosen sort strategy
/// carries over to the table.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn or_dash(text: &str) -> String {
        if text.is_empty() {
            "-".to_string()
        } else {
            Self::escape_markdown_table_cell(text)
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, document: &Document) {
        output.push_str("# Vulnerability Report\n\n");
        output.push_str(&format!(
            "Generated by {} {} at {}\n\n",
            document.descriptor.name, document.descriptor.version, document.descriptor.timestamp
        ));

        if let Some(source) = &document.source {
            let target = match &source.target {
                SourceTarget::Image(image) => image.user_input.as_str(),
                SourceTarget::Path(path) => path.as_str(),
            };
            output.push_str(&format!(
                "- **Source**: {} `{}`\n",
                source.kind,
                Self::or_dash(target)
            ));
        }
        if !document.distro.name.is_empty() {
            output.push_str(&format!(
                "- **Distro**: {} {}\n",
                document.distro.name, document.distro.version
            ));
        }
        output.push('\n');
    }

    fn render_matches(&self, output: &mut String, matches: &[MatchView]) {
        output.push_str("## Matches\n\n");
        if matches.is_empty() {
            output.push_str("*No vulnerabilities found*\n\n");
            return;
        }

        output.push_str(MATCH_TABLE_HEADER);
        output.push_str(MATCH_TABLE_SEPARATOR);
        for m in matches {
            let vulnerability = &m.vulnerability;
            output.push_str(&format!(
                "| {} | {} | {:.1} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&vulnerability.metadata.id),
                vulnerability.metadata.severity,
                vulnerability.risk,
                Self::escape_markdown_table_cell(&m.artifact.name),
                Self::or_dash(&m.artifact.version),
                Self::or_dash(&m.artifact.package_type),
                Self::or_dash(&vulnerability.fix.versions.join(", ")),
                vulnerability.fix.state.as_str(),
            ));
        }
        output.push('\n');
    }

    fn render_ignored(&self, output: &mut String, ignored: &[IgnoredMatchView]) {
        output.push_str("## Ignored Matches\n\n");
        output.push_str(IGNORED_TABLE_HEADER);
        output.push_str(IGNORED_TABLE_SEPARATOR);
        for ignored_match in ignored {
            let m = &ignored_match.matched;
            let reasons: Vec<&str> = ignored_match
                .applied_ignore_rules
                .iter()
                .map(|rule| rule.reason.as_str())
                .filter(|reason| !reason.is_empty())
                .collect();
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&m.vulnerability.metadata.id),
                Self::escape_markdown_table_cell(&m.artifact.name),
                Self::or_dash(&m.artifact.version),
                Self::or_dash(&reasons.join("; ")),
            ));
        }
        output.push('\n');
    }
}

impl DocumentFormatter for MarkdownFormatter {
    fn format(&self, document: &Document) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, document);
        self.render_matches(&mut output, &document.matches);
        if let Some(ignored) = &document.ignored_matches {
            self.render_ignored(&mut output, ignored);
        }
        Ok(output)
    }
}
