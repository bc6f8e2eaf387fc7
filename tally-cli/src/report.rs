//! Plain-text rendering of an analytics report.

use tally_core::charts::{daily_spending_series, income_vs_expense, top_categories};
use tally_core::fmt::{money, percent};
use tally_core::{AnalyticsReport, InsightPriority, InsightTrend};

pub fn render(report: &AnalyticsReport) -> String {
    let m = &report.metrics;
    let split = income_vs_expense(report);

    let mut lines = vec![
        format!("# Analytics: {}", report.timeframe.display_name()),
        String::new(),
        format!("Spent:            {}", money(m.total_spent)),
        format!("Income:           {}", money(m.total_income)),
        format!("Daily average:    {}", money(m.average_daily_spending)),
        format!("Velocity:         {}", percent(m.spending_velocity, 1)),
        format!("Budget used:      {}", percent(m.budget_utilization, 0)),
        format!("Saved:            {}", money(split.savings)),
    ];

    if report.is_empty() {
        lines.push(String::new());
        lines.push("(no transactions in this timeframe)".to_string());
        return finish(lines);
    }

    section(&mut lines, "Insights");
    if report.financial_insights.is_empty() {
        lines.push("- nothing notable".to_string());
    }
    lines.extend(report.financial_insights.iter().map(|i| {
        format!(
            "- [{}{}] {}: {} ({})",
            priority_tag(i.priority),
            trend_marker(i.trend),
            i.title,
            i.description,
            i.formatted_value()
        )
    }));

    section(&mut lines, "Categories");
    lines.extend(report.category_insights.iter().map(|c| {
        format!(
            "- {:<16} {:>12} {:>7} | {} txns | trend {}",
            c.category,
            money(c.total_spent),
            percent(c.percentage, 1),
            c.transaction_count,
            percent(c.trend, 1)
        )
    }));
    let top: Vec<String> = top_categories(report).into_iter().map(|c| c.label).collect();
    lines.push(format!("Top: {}", top.join(", ")));

    section(&mut lines, "Months");
    lines.extend(report.monthly_comparisons.iter().map(|mc| {
        format!(
            "- {}: income {} | expenses {} | net {}",
            mc.month,
            money(mc.income),
            money(mc.expenses),
            money(mc.net_flow)
        )
    }));

    section(&mut lines, "Daily spending");
    lines.extend(
        daily_spending_series(report)
            .into_iter()
            .map(|point| format!("- {:<8} {}", point.label, money(point.amount))),
    );

    finish(lines)
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(format!("## {title}"));
    lines.push(String::new());
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn priority_tag(p: InsightPriority) -> &'static str {
    match p {
        InsightPriority::High => "high",
        InsightPriority::Medium => "medium",
        InsightPriority::Low => "low",
    }
}

fn trend_marker(t: InsightTrend) -> &'static str {
    match t {
        InsightTrend::Positive => " +",
        InsightTrend::Negative => " -",
        InsightTrend::Neutral => "",
    }
}
