// EventSift - GPL-3.0-or-later
// This file is part of EventSift.
//
// Copyright (C) 2025 EventSift contributors
//
// EventSift is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// EventSift is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with EventSift.  If not, see <https://www.gnu.org/licenses/>.

//! Horizontal bar charts rendered as standalone SVG documents.

/// Bars drawn per chart
pub const MAX_BARS: usize = 10;

const WIDTH: f64 = 1200.0;
const BAR_HEIGHT: f64 = 28.0;
const BAR_GAP: f64 = 10.0;
const TOP_MARGIN: f64 = 60.0;
const BOTTOM_MARGIN: f64 = 60.0;
const RIGHT_MARGIN: f64 = 80.0;
const CHAR_WIDTH: f64 = 7.0;
const MIN_LABEL_WIDTH: f64 = 120.0;
const MAX_LABEL_WIDTH: f64 = 600.0;
const BAR_COLOR: &str = "#4c72b0";

/// One bar: label and count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub count: u64,
}

/// Render `bars` (already ordered, at most [`MAX_BARS`] drawn) as an SVG bar chart
#[must_use]
pub fn render_bar_chart(title: &str, bars: &[Bar]) -> String {
    let bars = &bars[..bars.len().min(MAX_BARS)];
    let max_count = bars.iter().map(|bar| bar.count).max().unwrap_or(1).max(1);

    let longest_label = bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(0);
    let label_width = (longest_label as f64)
        .mul_add(CHAR_WIDTH, 16.0)
        .clamp(MIN_LABEL_WIDTH, MAX_LABEL_WIDTH);
    let plot_left = label_width;
    let plot_width = WIDTH - plot_left - RIGHT_MARGIN;
    let plot_height = bars.len() as f64 * (BAR_HEIGHT + BAR_GAP);
    let height = TOP_MARGIN + plot_height + BOTTOM_MARGIN;
    let axis_y = TOP_MARGIN + plot_height;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" font-family="sans-serif" font-size="12">"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect width="{WIDTH}" height="{height}" fill="white"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{}" y="30" text-anchor="middle" font-size="16">{}</text>"#,
        WIDTH / 2.0,
        escape_xml(title)
    ));
    svg.push('\n');

    for (i, bar) in bars.iter().enumerate() {
        let y = (BAR_HEIGHT + BAR_GAP).mul_add(i as f64, TOP_MARGIN);
        let length = bar.count as f64 / max_count as f64 * plot_width;
        let text_y = y + BAR_HEIGHT / 2.0 + 4.0;
        svg.push_str(&format!(
            r#"<text x="{}" y="{text_y}" text-anchor="end">{}</text>"#,
            plot_left - 8.0,
            escape_xml(&truncate_label(&bar.label, label_width))
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<rect x="{plot_left}" y="{y}" width="{length:.1}" height="{BAR_HEIGHT}" fill="{BAR_COLOR}"/>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{text_y}">{}</text>"#,
            plot_left + length + 6.0,
            bar.count
        ));
        svg.push('\n');
    }

    // Axes and titles
    svg.push_str(&format!(
        r#"<line x1="{plot_left}" y1="{TOP_MARGIN}" x2="{plot_left}" y2="{axis_y}" stroke="black"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<line x1="{plot_left}" y1="{axis_y}" x2="{}" y2="{axis_y}" stroke="black"/>"#,
        plot_left + plot_width
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle">Count</text>"#,
        plot_width.mul_add(0.5, plot_left),
        axis_y + 35.0
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="14" y="{0}" text-anchor="middle" transform="rotate(-90 14 {0})">Event / Query</text>"#,
        plot_height.mul_add(0.5, TOP_MARGIN)
    ));
    svg.push_str("\n</svg>\n");
    svg
}

/// Shorten labels that would not fit the label column
fn truncate_label(label: &str, label_width: f64) -> String {
    let max_chars = ((label_width - 16.0) / CHAR_WIDTH) as usize;
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut short: String = label.chars().take(max_chars.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(label: &str, count: u64) -> Bar {
        Bar {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_one_rect_per_bar_plus_background() {
        let svg = render_bar_chart("Top", &[bar("a", 4), bar("b", 2)]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains(">Count</text>"));
        assert!(svg.contains(">Event / Query</text>"));
    }

    #[test]
    fn test_longest_bar_spans_plot() {
        let svg = render_bar_chart("Top", &[bar("a", 4), bar("b", 2)]);
        // label column is the minimum width, so the plot is 1200 - 120 - 80
        assert!(svg.contains(r#"width="1000.0""#));
        assert!(svg.contains(r#"width="500.0""#));
    }

    #[test]
    fn test_labels_are_escaped() {
        let svg = render_bar_chart("A & B", &[bar("<script>", 1)]);
        assert!(svg.contains("A &amp; B"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn test_caps_bar_count() {
        let bars: Vec<Bar> = (0..15).map(|i| bar(&format!("k{i}"), 1)).collect();
        let svg = render_bar_chart("Top", &bars);
        assert_eq!(svg.matches("<rect").count(), MAX_BARS + 1);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 120.0), "short");
        let long = "x".repeat(200);
        let short = truncate_label(&long, 120.0);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 14);
    }
}
