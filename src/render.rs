//! Terminal sink for the presentation model. Two variants: the styled
//! primary renderer and a plain one kept for pipes and minimal terminals.

use crate::present::{PresentationModel, Section};
use crossterm::style::Stylize;

/// Strip control characters from interpolated on-chain text so untrusted
/// strings cannot smuggle escape sequences into the terminal.
fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

fn body_lines(section: &Section) -> impl Iterator<Item = String> + '_ {
    section
        .body
        .iter()
        .flat_map(|entry| entry.lines().map(sanitize).collect::<Vec<_>>())
}

/// Styled renderer.
pub fn render(model: &PresentationModel, expand_collapsed: bool) {
    for section in &model.sections {
        println!();
        println!("{}", format!("== {} ==", section.title).bold());
        if section.collapsed && !expand_collapsed {
            println!("{}", "  (collapsed; pass --raw to show)".dark_grey());
        } else {
            for line in body_lines(section) {
                println!("  {line}");
            }
        }
        if let Some(callout) = &section.callout {
            println!("{}", format!("  » {}", sanitize(callout)).dark_cyan());
        }
    }
    println!();
}

/// Plain renderer: no styling, collapsed sections always expanded. The
/// simplified mode for scripts and logs.
pub fn render_plain(model: &PresentationModel) {
    for section in &model.sections {
        println!();
        println!("== {} ==", section.title);
        for line in body_lines(section) {
            println!("  {line}");
        }
        if let Some(callout) = &section.callout {
            println!("  > {}", sanitize(callout));
        }
    }
    println!();
}
