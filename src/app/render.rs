use crate::domain::model::Tool;
use std::fmt::Write;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// 五顆星，評分大於 0 時附上一位小數
pub fn render_stars(rating: f64) -> String {
    let mut out: String = (1..=5)
        .map(|star| {
            if f64::from(star) <= rating {
                FILLED_STAR
            } else {
                EMPTY_STAR
            }
        })
        .collect();

    if rating > 0.0 {
        let _ = write!(out, " {:.1}", rating);
    }
    out
}

pub fn render_card(tool: &Tool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{} {}]", tool.name, tool.phase.icon(), tool.phase);
    let _ = writeln!(out, "  {}", tool.description);
    if let Some(context) = &tool.context_window {
        let _ = writeln!(out, "  Context: {}", context);
    }
    if let Some(free) = &tool.free_limit {
        let _ = writeln!(out, "  Free: {}", free);
    }
    let _ = writeln!(out, "  {}", render_stars(tool.rating_or_zero()));
    out
}

/// 卡片列表；`total` 是篩選前的工具數量
pub fn render_list(tools: &[&Tool], total: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI Tools for Product Managers ({} tools available)", total);
    let _ = writeln!(out);

    if tools.is_empty() {
        let _ = writeln!(out, "No tools found");
        let _ = writeln!(out, "Try adjusting your filters to see more tools.");
        return out;
    }

    for tool in tools {
        out.push_str(&render_card(tool));
        out.push('\n');
    }
    out
}

pub fn render_detail(tool: &Tool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tool.name);
    let _ = writeln!(
        out,
        "{} {}  {}",
        tool.phase.icon(),
        tool.phase,
        render_stars(tool.rating_or_zero())
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "What it does");
    let _ = writeln!(out, "  {}", tool.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "How Product Managers use it");
    let _ = writeln!(out, "  {}", tool.use_case);

    if tool.context_window.is_some() || tool.free_limit.is_some() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Key Features");
        if let Some(context) = &tool.context_window {
            let _ = writeln!(out, "  • Context Window: {}", context);
        }
        if let Some(free) = &tool.free_limit {
            let _ = writeln!(out, "  • Free Tier: {}", free);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Visit {}: {}", tool.name, tool.link);
    out
}

pub fn render_connection_error(message: &str) -> String {
    format!(
        "⚠️  Connection Error\nUnable to load AI tools. Please check your store configuration.\n{}\n",
        message
    )
}
