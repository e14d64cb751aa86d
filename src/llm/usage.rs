//! Token usage reporting. Purely informational: nothing here can fail a call.

use super::Usage;

const WIDTH: usize = 27;

/// Log a small boxed table of token counts.
pub(super) fn report(usage: &Usage) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("Token usage:\n{}", render(usage));
    }
}

fn render(usage: &Usage) -> String {
    let hr = "─".repeat(WIDTH);
    let row = |text: String| format!("│{text:<WIDTH$}│");
    let label = |name: &str, value: u32| row(format!("  {name:<14} {value:>6}"));

    let mut lines = vec![format!("┌{hr}┐"), row("  Tokens".to_string()), format!("├{hr}┤")];
    if let Some(n) = usage.prompt_tokens {
        lines.push(label("Prompt", n));
    }
    if let Some(n) = usage.completion_tokens {
        lines.push(label("Completion", n));
    }
    if let Some(n) = usage.total_tokens {
        lines.push(format!("├{hr}┤"));
        lines.push(label("Total", n));
    }
    lines.push(format!("└{hr}┘"));

    lines.join("\n")
}
