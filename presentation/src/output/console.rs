//! Console output formatter for tool outcomes

use crate::cli::commands::OutputFormat;
use blockagent_domain::{ConfigIssue, Severity, ToolDefinition, ToolError, ToolErrorView, ToolOutcome};
use colored::Colorize;
use serde_json::{Value, json};

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an outcome in the requested format
    pub fn outcome(outcome: &ToolOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(outcome),
            OutputFormat::Pretty => Self::format_outcome(outcome),
        }
    }

    /// Format a pipeline error in the requested format
    pub fn error(error: &ToolError, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                let view = ToolErrorView::from(error);
                Self::pretty_json(&json!({"error": view.error, "message": view.message}))
            }
            OutputFormat::Pretty => format!(
                "{} {}\n{}",
                "Error:".red().bold(),
                error.code().red(),
                error
            ),
        }
    }

    /// Format as JSON
    pub fn format_json(outcome: &ToolOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Human-readable outcome
    pub fn format_outcome(outcome: &ToolOutcome) -> String {
        let mut output = String::new();

        if let Some(simulation) = &outcome.simulation {
            output.push_str(&Self::section_header("Simulation"));
            output.push_str(&Self::indent(&Self::pretty_json(simulation), "  "));
            output.push('\n');
        }

        if let Some(result) = &outcome.result {
            output.push_str(&Self::section_header("Result"));
            output.push_str(&Self::indent(&Self::pretty_json(result), "  "));
            output.push('\n');
        }

        if let Some(note) = &outcome.note {
            output.push_str(&format!(
                "\n{} {}\n{}\n",
                "Note:".yellow().bold(),
                note,
                "Re-run with --approve to execute.".dimmed()
            ));
        }

        output
    }

    /// Table of registered tools
    pub fn format_tools(definitions: &[&ToolDefinition]) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Registered Tools"));
        output.push('\n');

        for definition in definitions {
            let kind = if definition.kind.requires_approval() {
                definition.kind.to_string().yellow()
            } else {
                definition.kind.to_string().green()
            };
            output.push_str(&format!(
                "\n{} [{}]\n  {}\n",
                definition.name.cyan().bold(),
                kind,
                definition.description
            ));

            for param in &definition.parameters {
                let required = if param.required { "required" } else { "optional" };
                output.push_str(&format!(
                    "    {:<10} {:<8} {:<8} {}\n",
                    param.name,
                    param.param_type,
                    required.dimmed(),
                    param.description
                ));
            }
        }

        output
    }

    /// Config sources in priority order, followed by validation issues
    pub fn format_config(sources: &[(bool, &str, String)], issues: &[ConfigIssue]) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Configuration sources"));

        for (found, label, location) in sources {
            let marker = if *found { "✓".green() } else { "✗".dimmed() };
            output.push_str(&format!("  {} {:<9} {}\n", marker, label, location));
        }

        output.push_str(&Self::section_header("Validation"));
        if issues.is_empty() {
            output.push_str(&format!("  {}\n", "no issues".green()));
        }
        for issue in issues {
            output.push_str(&format!("  {}\n", Self::format_issue(issue)));
        }

        output
    }

    /// One-line config issue
    pub fn format_issue(issue: &ConfigIssue) -> String {
        let severity = match issue.severity {
            Severity::Error => issue.severity.as_str().red().bold(),
            Severity::Warning => issue.severity.as_str().yellow(),
        };
        format!("{} {}: {}", severity, issue.field, issue.message)
    }

    fn pretty_json(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
