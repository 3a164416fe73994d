//! Terminal drawing for the session projections.
//!
//! The render functions turn a view model into printable lines. Only
//! [`Renderer`] touches the session, and only through its projections.

use colored::{ColoredString, Colorize};
use regimen_application::PickerSession;
use regimen_core::projection::{
    ChatLine, ChatView, ControlsView, GridView, NO_SELECTION_MESSAGE, SelectionListView, View,
};
use regimen_core::session::MessageRole;

pub fn render_grid(view: &GridView) -> Vec<String> {
    if let Some(message) = view.placeholder() {
        return vec![message.bright_black().to_string()];
    }

    let mut lines = Vec::new();
    for card in view.cards() {
        let mark = if card.selected {
            "[x]".bright_green()
        } else {
            "[ ]".normal()
        };
        lines.push(format!(
            "{} {} {} {}",
            mark,
            format!("#{:<4}", card.id).bright_black(),
            card.name.bold(),
            format!("({})", card.brand).bright_black()
        ));
        if card.expanded {
            for text in card.description.lines() {
                lines.push(format!("      {text}"));
            }
        }
    }
    if view.show_more() {
        lines.push("More products available. Type /more to see them.".bright_black().to_string());
    }
    lines
}

pub fn render_selection(view: &SelectionListView) -> Vec<String> {
    match view {
        SelectionListView::Empty => vec![NO_SELECTION_MESSAGE.bright_black().to_string()],
        SelectionListView::Chips { chips } => {
            let mut lines = vec![format!("Selected ({}):", chips.len()).bright_yellow().to_string()];
            lines.extend(
                chips
                    .iter()
                    .map(|chip| format!("  #{} {} ({})  /remove {}", chip.id, chip.name, chip.brand, chip.id)),
            );
            lines
        }
    }
}

pub fn render_controls(view: &ControlsView) -> String {
    let generate = if view.generate_enabled {
        format!("[{}] /generate", view.generate_label).bright_green()
    } else {
        format!("[{}]", view.generate_label).yellow()
    };
    let copy = if view.copy_enabled {
        "[Copy] /copy".bright_green()
    } else {
        "[Copy]".bright_black()
    };
    format!("{generate}  {copy}")
}

fn render_chat_line(line: &ChatLine) -> Vec<String> {
    if line.transient {
        return vec![line.content.italic().bright_black().to_string()];
    }
    let prefix = match line.role {
        MessageRole::User => "you".green().bold(),
        MessageRole::Assistant => "regimen".bright_blue().bold(),
        MessageRole::System => "system".bright_black(),
    };
    let mut lines = vec![format!("{prefix}:")];
    lines.extend(
        line.content
            .lines()
            .map(|text| format!("  {}", colorize(line.role, text))),
    );
    lines
}

fn colorize(role: MessageRole, text: &str) -> ColoredString {
    match role {
        MessageRole::User => text.green(),
        MessageRole::Assistant => text.bright_blue(),
        MessageRole::System => text.bright_black(),
    }
}

/// Prints only the chat turns that have not been shown yet.
///
/// Non-transient turns are append-only, so a count is enough to know where
/// the new ones start. A transient placeholder is printed once while present.
#[derive(Debug, Default)]
pub struct ChatPrinter {
    stable_shown: usize,
    transient_shown: bool,
}

impl ChatPrinter {
    pub fn render(&mut self, view: &ChatView) -> Vec<String> {
        let mut lines = Vec::new();
        let mut stable = 0;
        let mut has_transient = false;

        for line in &view.lines {
            if line.transient {
                has_transient = true;
                if !self.transient_shown {
                    lines.extend(render_chat_line(line));
                }
                continue;
            }
            stable += 1;
            if stable > self.stable_shown {
                lines.extend(render_chat_line(line));
            }
        }

        self.stable_shown = stable;
        self.transient_shown = has_transient;
        lines
    }
}

/// Draws invalidated views in a fixed order.
#[derive(Debug, Default)]
pub struct Renderer {
    chat: ChatPrinter,
}

impl Renderer {
    pub fn draw(&mut self, session: &mut PickerSession, views: &[View]) -> Vec<String> {
        let mut lines = Vec::new();
        for view in views {
            match view {
                View::Grid => lines.extend(render_grid(&session.grid_view())),
                View::SelectionList => lines.extend(render_selection(&session.selection_view())),
                View::Chat => lines.extend(self.chat.render(&session.chat_view())),
                View::Controls => lines.push(render_controls(&session.controls_view())),
            }
        }
        lines
    }
}
