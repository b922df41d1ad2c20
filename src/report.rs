use crate::error::FetchError;
use crate::wikipedia::{FetchOutcome, SiteStatistics};
use std::fmt;

const RULE_WIDTH: usize = 50;

/// Percentage of pages that are articles, when there are pages at all
pub fn article_ratio(stats: &SiteStatistics) -> Option<f64> {
    if stats.total_pages == 0 {
        return None;
    }
    Some(stats.articles as f64 / stats.total_pages as f64 * 100.0)
}

/// Articles per active user, when there are both articles and active users
pub fn articles_per_user(stats: &SiteStatistics) -> Option<f64> {
    if stats.articles == 0 || stats.active_users == 0 {
        return None;
    }
    Some(stats.articles as f64 / stats.active_users as f64)
}

/// Group digits in threes with commas: `1234567` -> `1,234,567`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Line printed before the request is made
pub fn fetching_notice(language_code: &str) -> String {
    format!("🔍 Fetching Wikipedia statistics for '{language_code}'...\n")
}

/// Console rendering of a fetch outcome
pub struct Report<'a> {
    outcome: &'a FetchOutcome,
}

impl<'a> Report<'a> {
    pub fn new(outcome: &'a FetchOutcome) -> Self {
        Self { outcome }
    }

    fn write_error(f: &mut fmt::Formatter<'_>, error: &FetchError) -> fmt::Result {
        writeln!(f, "❌ Error: {error}")
    }

    fn write_statistics(f: &mut fmt::Formatter<'_>, stats: &SiteStatistics) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let lang = stats.language_code.to_uppercase();

        writeln!(f, "{rule}")?;
        writeln!(f, "📚 {lang} WIKIPEDIA STATISTICS")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;

        writeln!(f, "🗒️  Total Pages:     {:>12}", format_thousands(stats.total_pages))?;
        writeln!(f, "📄 Articles:        {:>12}", format_thousands(stats.articles))?;
        writeln!(f, "⭐ Good Articles:   {:>12}", format_thousands(stats.good_articles))?;
        writeln!(f, "👥 Active Users:    {:>12}", format_thousands(stats.active_users))?;
        writeln!(f, "✏️  Total Edits:     {:>12}", format_thousands(stats.edits))?;
        writeln!(f)?;

        if let Some(ratio) = article_ratio(stats) {
            writeln!(f, "📊 Article Ratio:   {ratio:>11.1}%")?;
        }
        if let Some(per_user) = articles_per_user(stats) {
            writeln!(f, "📈 Articles/User:   {per_user:>11.1}")?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Ok(stats) => Self::write_statistics(f, stats),
            Err(error) => Self::write_error(f, error),
        }
    }
}

/// Render a fetch outcome as console text
pub fn render(outcome: &FetchOutcome) -> String {
    Report::new(outcome).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> SiteStatistics {
        SiteStatistics {
            language_code: "en".to_string(),
            total_pages: 1000,
            articles: 400,
            good_articles: 50,
            active_users: 20,
            edits: 5000,
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(61_234_567), "61,234,567");
        assert_eq!(format_thousands(100_000), "100,000");
    }

    #[test]
    fn test_derived_metrics() {
        let stats = sample_stats();
        assert_eq!(article_ratio(&stats), Some(40.0));
        assert_eq!(articles_per_user(&stats), Some(20.0));
    }

    #[test]
    fn test_render_example_statistics() {
        let output = render(&Ok(sample_stats()));

        assert!(output.contains("📚 EN WIKIPEDIA STATISTICS"));
        assert!(output.contains("40.0%"));
        assert!(output.contains("📈 Articles/User:          20.0\n"));
        assert!(output.contains("🗒️  Total Pages:            1,000\n"));
        assert!(output.contains("✏️  Total Edits:            5,000\n"));
        assert!(output.starts_with(&"=".repeat(50)));
        assert!(output.ends_with(&format!("{}\n", "=".repeat(50))));
    }

    #[test]
    fn test_ratio_has_one_decimal_digit() {
        let stats = SiteStatistics {
            total_pages: 3,
            articles: 1,
            ..sample_stats()
        };
        let output = render(&Ok(stats));
        let ratio_line = output
            .lines()
            .find(|line| line.contains("Article Ratio"))
            .unwrap();

        assert!(ratio_line.ends_with("33.3%"));
    }

    #[test]
    fn test_zero_active_users_omits_articles_per_user() {
        let stats = SiteStatistics {
            active_users: 0,
            ..sample_stats()
        };
        let output = render(&Ok(stats));

        assert!(!output.contains("Articles/User"));
        assert!(output.contains("Article Ratio"));
    }

    #[test]
    fn test_zero_articles_omits_articles_per_user() {
        let stats = SiteStatistics {
            total_pages: 10,
            articles: 0,
            active_users: 5,
            ..sample_stats()
        };
        assert_eq!(articles_per_user(&stats), None);

        let output = render(&Ok(stats));
        assert!(!output.contains("Articles/User"));
        assert!(output.contains("📊 Article Ratio:           0.0%"));
    }

    #[test]
    fn test_zero_pages_omits_article_ratio() {
        let stats = SiteStatistics {
            total_pages: 0,
            ..sample_stats()
        };
        let output = render(&Ok(stats));

        assert!(!output.contains("Article Ratio"));
        assert!(output.contains("Articles/User"));
    }

    #[test]
    fn test_error_renders_single_line() {
        let outcome: FetchOutcome = Err(FetchError::Network("connection refused".to_string()));
        let output = render(&outcome);

        assert_eq!(output, "❌ Error: Network error: connection refused\n");
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_fetching_notice() {
        assert_eq!(
            fetching_notice("de"),
            "🔍 Fetching Wikipedia statistics for 'de'...\n"
        );
    }
}
