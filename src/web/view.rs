//! HTML rendering for the home page.

use crate::classifier::Sentiment;
use crate::history::SentimentRecord;

/// Everything the home page shows.
#[derive(Debug, Clone, Default)]
pub struct HomeView {
    /// Result of the analysis that produced this page, if any.
    pub sentiment: Option<Sentiment>,
    /// Recent records, most recent first.
    pub history: Vec<SentimentRecord>,
}

/// Render the home page: input form, optional current result, history list.
pub fn render_home(view: &HomeView) -> String {
    let current = view
        .sentiment
        .as_ref()
        .map(|s| {
            format!(
                "    <h2>Sentiment: {} ({}%)</h2>\n",
                escape_html(&s.label),
                s.percent()
            )
        })
        .unwrap_or_default();

    let items: String = view
        .history
        .iter()
        .map(|entry| {
            format!(
                "        <li><b>{}</b> \u{2192} {} ({}%)</li>\n",
                escape_html(&entry.text),
                escape_html(&entry.result.label),
                entry.result.percent()
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>AI Sentiment Analyzer</title>
</head>
<body>
    <h1>AI-Based Sentiment Analyzer</h1>
    <form method="POST" action="/analyze">
        <textarea name="text" rows="5" cols="60" placeholder="Enter review or text here..."></textarea><br><br>
        <input type="submit" value="Analyze">
    </form>
{current}    <hr>
    <h3>Previous Results</h3>
    <ul>
{items}    </ul>
</body>
</html>
"#
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
