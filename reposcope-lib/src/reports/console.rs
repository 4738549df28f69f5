use crate::Result;
use crate::enhancement::{Priority, Recommendation};
use crate::facts::Coverage;
use crate::pipeline::RepositoryAnalysis;
use crate::portfolio::PortfolioAggregate;
use core::fmt::Write;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

const SEPARATOR: &str = "═══════════════════════════════════════";

/// Width of the label column in `label : value` lines
const LABEL_WIDTH: usize = 22;

/// Indent for wrapped continuation lines: "  " (2) + label + " : " (3)
const VALUE_INDENT: usize = 2 + LABEL_WIDTH + 3;

pub fn generate_repository<W: Write>(analysis: &RepositoryAnalysis, use_colors: bool, writer: &mut W) -> Result<()> {
    let mut out = Console::new(writer, use_colors);
    let repo = &analysis.repository;

    out.title(&repo.full_name)?;
    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        out.field("Description", description)?;
    }
    out.field("URL", &repo.url)?;
    out.field("Primary language", repo.language.as_deref().unwrap_or("n/a"))?;
    out.field("Stars", &repo.stars.to_string())?;
    out.field("Forks", &repo.forks.to_string())?;
    out.field("Contributors", &analysis.signals.contributors.to_string())?;
    out.field("Commits examined", &analysis.signals.commits.to_string())?;
    out.field(
        "Issues",
        &format!("{} open, {} closed", analysis.signals.open_issues, analysis.signals.closed_issues),
    )?;
    if !repo.topics.is_empty() {
        out.field("Topics", &repo.topics.join(", "))?;
    }
    out.field("Signals fetched", &fetched(&analysis.signal_coverage))?;

    out.section("Basic Scores")?;
    let scores = &analysis.scores;
    out.score("Technical", scores.technical())?;
    out.score("Quality", scores.quality())?;
    out.score("Activity", scores.activity())?;
    out.score("Overall", scores.overall())?;

    out.section("Enhanced Scores")?;
    let enhanced = &analysis.enhanced_scores;
    out.score("Technical", enhanced.technical())?;
    out.score("Quality", enhanced.quality())?;
    out.score("Activity", enhanced.activity())?;
    out.score("Market position", enhanced.market_position())?;
    out.score("Improvement potential", enhanced.improvement_potential())?;
    out.score("Overall", enhanced.overall())?;

    out.section("Comparison")?;
    let comparison = &analysis.comparison;
    out.field("Searches succeeded", &fetched(&analysis.search_coverage))?;
    out.field("Similar repositories", &analysis.similar_repositories.len().to_string())?;
    if comparison.is_empty() {
        let reason = if analysis.search_coverage.is_partial() {
            "no comparison data, some searches failed"
        } else {
            "no comparable repositories found"
        };
        out.field("Compared against", reason)?;
    } else {
        out.field("Compared against", &format!("top {} by stars", comparison.analyzed))?;
        out.field("Mean stars", &format!("{:.1}", comparison.mean_stars))?;
        out.field("Mean forks", &format!("{:.1}", comparison.mean_forks))?;
        if !comparison.languages.is_empty() {
            out.field("Languages", &counted(comparison.languages.iter()))?;
        }
        if !comparison.topics.is_empty() {
            out.field("Topics", &counted(comparison.topics.iter()))?;
        }
    }

    if !comparison.best_practices.is_empty() {
        out.section("Best Practices")?;
        for practice in &comparison.best_practices {
            out.bullet(&practice.to_string())?;
        }
    }

    if analysis.is_degraded() {
        out.section("Incomplete Data")?;
        for failure in analysis.signal_coverage.failures.iter().chain(&analysis.search_coverage.failures) {
            out.bullet(failure)?;
        }
    }

    out.section("Recommendations")?;
    if analysis.recommendations.is_empty() {
        out.bullet("None")?;
    }
    for recommendation in &analysis.recommendations {
        out.recommendation(recommendation)?;
    }

    if !analysis.insights.is_empty() {
        out.section("Insights")?;
        for insight in &analysis.insights {
            out.bullet(insight)?;
        }
    }

    Ok(())
}

pub fn generate_portfolio<W: Write>(portfolio: &PortfolioAggregate, use_colors: bool, writer: &mut W) -> Result<()> {
    let mut out = Console::new(writer, use_colors);

    out.title(&format!("Portfolio of {}", portfolio.account))?;
    out.field(
        "Repositories",
        &format!("{} of {} analyzed", portfolio.analyzed_repositories, portfolio.total_repositories),
    )?;
    out.field("Active projects", &portfolio.active_projects.to_string())?;
    out.field("High-quality projects", &portfolio.high_quality_projects.to_string())?;
    if portfolio.degraded_repositories > 0 {
        out.field("Incomplete data", &format!("{} analyses", portfolio.degraded_repositories))?;
    }

    if !portfolio.failures.is_empty() {
        out.section("Not Analyzed")?;
        for failure in &portfolio.failures {
            out.bullet(&format!("{}: {}", failure.name, failure.reason))?;
        }
    }

    out.section("Average Scores")?;
    let averages = &portfolio.average_scores;
    out.optional_score("Technical", averages.technical)?;
    out.optional_score("Quality", averages.quality)?;
    out.optional_score("Activity", averages.activity)?;
    out.optional_score("Overall", averages.overall)?;

    if !portfolio.languages.is_empty() {
        out.section("Languages")?;
        for share in &portfolio.languages {
            out.line(&format!("  {:>2}. {:<20} {:>6.2}%", share.rank, share.language, share.percentage))?;
        }
    }

    if !portfolio.topics.is_empty() {
        out.section("Topics")?;
        let topics = portfolio.topics.iter().map(|t| format!("{} ({})", t.topic, t.count)).collect::<Vec<_>>();
        out.wrapped(&topics.join(", "), 2)?;
    }

    if !portfolio.categories.is_empty() {
        out.section("Categories")?;
        for (category, count) in &portfolio.categories {
            out.field(category, &count.to_string())?;
        }
    }

    if !portfolio.repositories.is_empty() {
        out.section("Repositories")?;
        for repo in &portfolio.repositories {
            out.field(
                &repo.name,
                &format!(
                    "{:.1} overall, {} ({} recommendations){}",
                    repo.scores.overall(),
                    repo.category,
                    repo.recommendations,
                    if repo.degraded { ", incomplete data" } else { "" }
                ),
            )?;
        }
    }

    if let Some(summary) = &portfolio.enhanced_summary {
        out.section("Enhanced Summary")?;
        out.score("Technical", summary.averages.technical)?;
        out.score("Quality", summary.averages.quality)?;
        out.score("Activity", summary.averages.activity)?;
        out.score("Market position", summary.averages.market_position)?;
        out.score("Improvement potential", summary.averages.improvement_potential)?;
        out.score("Overall", summary.averages.overall)?;
        out.field(
            "Improvements",
            &format!(
                "{} high priority, {} medium priority",
                summary.high_priority, summary.medium_priority
            ),
        )?;
        out.field(
            "Top repository",
            &format!("{} ({:.1} overall)", summary.top_repository.name, summary.top_repository.overall),
        )?;
        for strength in &summary.strengths {
            out.bullet(strength)?;
        }
    }

    out.section("Market Position")?;
    let market = &portfolio.market_position;
    out.field("Position", &format!("{} ({}/10)", market.position, market.score))?;
    for insight in &market.insights {
        out.bullet(insight)?;
    }
    if !market.opportunities.is_empty() {
        out.subsection("Opportunities")?;
        for opportunity in &market.opportunities {
            out.bullet(opportunity)?;
        }
    }

    out.section("Recommendations")?;
    for recommendation in &portfolio.recommendations {
        out.bullet(recommendation)?;
    }

    out.section("Career Guidance")?;
    let guidance = &portfolio.career_guidance;
    for (heading, items) in [
        ("Short term", &guidance.short_term),
        ("Medium term", &guidance.medium_term),
        ("Long term", &guidance.long_term),
        ("Skill development", &guidance.skill_development),
        ("Networking", &guidance.networking),
    ] {
        if !items.is_empty() {
            out.subsection(heading)?;
            for item in items {
                out.bullet(item)?;
            }
        }
    }

    Ok(())
}

fn fetched(coverage: &Coverage) -> String {
    format!("{} of {}", coverage.succeeded, coverage.attempted)
}

/// Formats `name (count)` pairs, most frequent first.
fn counted<'a>(entries: impl Iterator<Item = (&'a String, &'a usize)>) -> String {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries.iter().map(|(name, count)| format!("{name} ({count})")).collect::<Vec<_>>().join(", ")
}

struct Console<'a, W> {
    writer: &'a mut W,
    use_colors: bool,
    term_width: usize,
}

impl<'a, W: Write> Console<'a, W> {
    fn new(writer: &'a mut W, use_colors: bool) -> Self {
        Self {
            writer,
            use_colors,
            term_width: get_terminal_width(),
        }
    }

    fn title(&mut self, text: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{}", text.bold().underline())?;
        } else {
            writeln!(self.writer, "{text}")?;
        }
        writeln!(self.writer, "{SEPARATOR}")?;
        Ok(())
    }

    fn section(&mut self, name: &str) -> Result<()> {
        writeln!(self.writer)?;
        if self.use_colors {
            writeln!(self.writer, "{}", name.bold())?;
        } else {
            writeln!(self.writer, "{name}")?;
        }
        Ok(())
    }

    fn subsection(&mut self, name: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "  {}", name.italic())?;
        } else {
            writeln!(self.writer, "  {name}")?;
        }
        Ok(())
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}")?;
        Ok(())
    }

    fn field(&mut self, label: &str, value: &str) -> Result<()> {
        let wrapped_lines = wrap_text(value, self.term_width, VALUE_INDENT);
        if let Some(first_line) = wrapped_lines.first() {
            writeln!(self.writer, "  {label:<LABEL_WIDTH$} : {first_line}")?;
            for line in wrapped_lines.iter().skip(1) {
                writeln!(self.writer, "{line}")?;
            }
        }
        Ok(())
    }

    fn score(&mut self, label: &str, value: f64) -> Result<()> {
        let text = format!("{value:.1}");
        let colored = if !self.use_colors {
            text
        } else if value >= 7.0 {
            text.green().to_string()
        } else if value >= 5.0 {
            text.yellow().to_string()
        } else {
            text.red().to_string()
        };
        writeln!(self.writer, "  {label:<LABEL_WIDTH$} : {colored}")?;
        Ok(())
    }

    fn optional_score(&mut self, label: &str, value: Option<f64>) -> Result<()> {
        match value {
            Some(v) => self.score(label, v),
            None => self.field(label, "n/a"),
        }
    }

    fn bullet(&mut self, text: &str) -> Result<()> {
        let wrapped_lines = wrap_text(text, self.term_width, 4);
        for (index, line) in wrapped_lines.iter().enumerate() {
            if index == 0 {
                writeln!(self.writer, "  • {line}")?;
            } else {
                writeln!(self.writer, "{line}")?;
            }
        }
        Ok(())
    }

    fn wrapped(&mut self, text: &str, indent: usize) -> Result<()> {
        for (index, line) in wrap_text(text, self.term_width, indent).iter().enumerate() {
            if index == 0 {
                writeln!(self.writer, "{:indent$}{line}", "")?;
            } else {
                writeln!(self.writer, "{line}")?;
            }
        }
        Ok(())
    }

    fn recommendation(&mut self, recommendation: &Recommendation) -> Result<()> {
        let tag = format!("[{}]", recommendation.priority.to_string().to_uppercase());
        let tag = if self.use_colors {
            match recommendation.priority {
                Priority::High => tag.red().bold().to_string(),
                Priority::Medium => tag.yellow().bold().to_string(),
                Priority::Low => tag.green().to_string(),
            }
        } else {
            tag
        };

        writeln!(self.writer, "  {tag} {} ({})", recommendation.title, recommendation.category)?;
        self.wrapped(&recommendation.description, 4)?;
        if !recommendation.impact.is_empty() {
            self.wrapped(&format!("Impact: {}", recommendation.impact), 4)?;
        }
        for item in &recommendation.action_items {
            writeln!(self.writer, "    - {item}")?;
        }
        Ok(())
    }
}

/// Get the terminal width, defaulting to 80 if not detectable
fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| usize::from(w))
}

/// Word-wrap text to fit within a given width, with indentation for continuation lines
fn wrap_text(text: &str, width: usize, indent: usize) -> Vec<String> {
    if width <= indent {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut is_first_line = true;

    for word in text.split_whitespace() {
        // the first line starts after a label of the same width as the indent
        let separator_len = usize::from(!current_line.is_empty());
        let line_width = indent + current_line.len();

        if !current_line.is_empty() && line_width + separator_len + word.len() > width {
            if is_first_line {
                lines.push(current_line);
                is_first_line = false;
            } else {
                lines.push(format!("{:indent$}{current_line}", ""));
            }
            current_line = word.to_string();
        } else {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        if is_first_line {
            lines.push(current_line);
        } else {
            lines.push(format!("{:indent$}{current_line}", ""));
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
