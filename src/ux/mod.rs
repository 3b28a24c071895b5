use colored::Colorize;
use humansize::{format_size, DECIMAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::state::AppState;

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Summary, plan steps and the size of the document that came back.
pub fn render_plan(state: &AppState) -> String {
    let mut out = String::from("\n=== PLAN ===\n");
    if let Some(summary) = &state.summary {
        out.push_str(&format!("{}\n", summary.bold()));
    }
    if state.plan_steps.is_empty() {
        out.push_str("(no steps)\n");
    }
    for (i, step) in state.plan_steps.iter().enumerate() {
        out.push_str(&format!("{}. {} {}\n", i + 1, "✓".green().bold(), step));
    }
    out.push_str(&format!(
        "\n{} {}\n",
        "Document:".bold(),
        format_size(state.code.len() as u64, DECIMAL)
    ));
    out
}

pub fn show_plan(state: &AppState) {
    print!("{}", render_plan(state));
}

pub fn show_error(title: &str, message: &str) {
    eprintln!("{} {}", format!("{title}:").red().bold(), message);
}

pub fn show_saved(path: &str, bytes: usize) {
    println!("{} {} ({})", "Saved".green().bold(), path, format_size(bytes as u64, DECIMAL));
}

pub fn show_deployed(url: &str) {
    println!("{} {}", "Live at".green().bold(), url.underline());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_lists_steps_in_order_with_size() {
        colored::control::set_override(false);
        let state = AppState {
            summary: Some("A bakery".into()),
            plan_steps: vec!["hero".into(), "menu".into()],
            code: "x".repeat(1500),
            ..AppState::default()
        };
        let text = render_plan(&state);
        assert!(text.contains("A bakery"));
        assert!(text.contains("1. ✓ hero"));
        assert!(text.contains("2. ✓ menu"));
        assert!(text.contains("1.50 kB"));
    }

    #[test]
    fn empty_plan_is_called_out() {
        colored::control::set_override(false);
        let state = AppState { summary: None, ..AppState::default() };
        assert!(render_plan(&state).contains("(no steps)"));
    }
}
