//! Output formatters for score reports

use crate::config::{OutputFormat, ScoringWeights};
use crate::error::{MatcherError, Result};
use crate::output::report::{MatchBand, ScoreReport};
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Facts about a scoring run that are not part of the score itself
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub resume_file: String,
    pub job_file: String,
    pub embedding_model: String,
    pub weights: ScoringWeights,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport, context: &ReportContext) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badge
pub struct ConsoleFormatter {
    use_colors: bool,
    max_skill_chips: usize,
}

/// JSON formatter emitting exactly the report structure
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Dispatches to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn band_color(band: MatchBand) -> Color {
    match band {
        MatchBand::Excellent => Color::Green,
        MatchBand::Good => Color::BrightGreen,
        MatchBand::Fair => Color::Yellow,
        MatchBand::NeedsWork => Color::Red,
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, max_skill_chips: usize) -> Self {
        Self {
            use_colors,
            max_skill_chips,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: MatchBand) -> String {
        if self.use_colors {
            format!("[{}]", band.label().color(band_color(band)).bold())
        } else {
            format!("[{}]", band.label())
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport, context: &ReportContext) -> Result<String> {
        let mut output = String::new();
        let band = report.band();

        output.push_str(&self.format_header("📊 RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            context.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            context.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {:.1}/100 {}\n",
            report.total_score,
            self.format_score_badge(band)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(band.verdict(), Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        let subscores = &report.subscores;
        let rows = [
            ("🎯 Content Similarity", subscores.embedding_similarity, context.weights.embedding),
            ("🧩 Skills Coverage", subscores.skills_coverage, context.weights.coverage),
            ("🔍 Keyword Alignment", subscores.keyword_alignment, context.weights.keyword_alignment),
            ("📈 Evidence Quality", subscores.evidence, context.weights.evidence),
        ];
        for (name, score, weight) in rows {
            output.push_str(&format!("{}: {:.1}% (weight: {:.1})\n", name, score, weight));
        }

        output.push_str(&self.format_header("✅ Matched Skills", 3));
        if report.aligned_skills.is_empty() {
            output.push_str("  No skills detected\n");
        } else {
            let chips: Vec<String> = report
                .aligned_skills
                .iter()
                .take(self.max_skill_chips)
                .map(|skill| self.colorize(&format!("✓ {}", skill), Color::Green))
                .collect();
            output.push_str(&format!("  {}\n", chips.join("  ")));
            if report.aligned_skills.len() > self.max_skill_chips {
                output.push_str(&format!(
                    "  ... and {} more\n",
                    report.aligned_skills.len() - self.max_skill_chips
                ));
            }
        }

        if !report.missing_skills.is_empty() {
            output.push_str(&self.format_header("🎯 Missing Skills", 3));
            for missing in &report.missing_skills {
                output.push_str(&format!(
                    "  • {} {}\n",
                    self.colorize(&missing.term, Color::Yellow),
                    self.colorize(&format!("(importance {:.1})", missing.importance), Color::BrightBlack)
                ));
            }
        }

        if !report.warnings.is_empty() {
            output.push_str(&self.format_header("⚠️  Notes", 3));
            for warning in &report.warnings {
                output.push_str(&format!("  • {}\n", self.colorize(warning.describe(), Color::BrightBlack)));
            }
        }

        output.push_str(&format!(
            "\n{} Resume Matcher v{} | Model: {}\n",
            self.colorize("ℹ️", Color::Blue),
            env!("CARGO_PKG_VERSION"),
            context.embedding_model
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport, _context: &ReportContext) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn file_name(path: &str) -> String {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport, context: &ReportContext) -> Result<String> {
        let mut output = String::new();
        let band = report.band();

        output.push_str("# 📊 Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                context.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                context.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                Self::file_name(&context.resume_file),
                Self::file_name(&context.job_file)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {:.1}/100 ({})\n\n",
            report.total_score,
            band.label()
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", band.verdict()));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        let subscores = &report.subscores;
        output.push_str(&format!(
            "| Content Similarity | {:.1}% | {:.1} |\n",
            subscores.embedding_similarity, context.weights.embedding
        ));
        output.push_str(&format!(
            "| Skills Coverage | {:.1}% | {:.1} |\n",
            subscores.skills_coverage, context.weights.coverage
        ));
        output.push_str(&format!(
            "| Keyword Alignment | {:.1}% | {:.1} |\n",
            subscores.keyword_alignment, context.weights.keyword_alignment
        ));
        output.push_str(&format!(
            "| Evidence Quality | {:.1}% | {:.1} |\n\n",
            subscores.evidence, context.weights.evidence
        ));

        output.push_str("## ✅ Matched Skills\n\n");
        if report.aligned_skills.is_empty() {
            output.push_str("_No skills detected_\n\n");
        } else {
            for skill in &report.aligned_skills {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        if !report.missing_skills.is_empty() {
            output.push_str("## 🎯 Missing Skills\n\n");
            output.push_str("| Skill | Importance |\n");
            output.push_str("|-------|------------|\n");
            for missing in &report.missing_skills {
                output.push_str(&format!("| {} | {:.1} |\n", missing.term, missing.importance));
            }
            output.push('\n');
        }

        if !report.warnings.is_empty() {
            output.push_str("## Notes\n\n");
            for warning in &report.warnings {
                output.push_str(&format!("> {}\n", warning.describe()));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Matcher v{} using {}*\n",
                env!("CARGO_PKG_VERSION"),
                context.embedding_model
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, 20, true, true)
    }

    pub fn with_options(use_colors: bool, max_skill_chips: usize, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, max_skill_chips),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, context: &ReportContext, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        formatter.format_report(report, context)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content).map_err(|e| {
        MatcherError::OutputFormatting(format!("Failed to write report to {}: {}", file_path.display(), e))
    })
}

/// `target` itself, or a suggested timestamped file inside it when it is a directory
pub fn resolve_save_path(target: &Path, format: &OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
    } else {
        target.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", base_name, timestamp_suffix),
    }
}
