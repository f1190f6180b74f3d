use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
};

use crate::models::{Client, Image, Job, Module, Repository, StatusCode};
use crate::ui::status::{bool_badge, status_badge, status_dot, tag};
use crate::ui::{Card, Theme, spinner_span};
use crate::util::format::NO_VALUE;
use crate::util::{format_date, format_elapsed, format_size};

fn text_or_dash(value: &str) -> String {
    if value.is_empty() {
        NO_VALUE.to_string()
    } else {
        value.to_string()
    }
}

fn joined(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join(", ")
    }
}

pub fn client_card(client: &Client) -> Card {
    Card::new("Client")
        .row("Name", client.name.clone())
        .row("Address", text_or_dash(&client.address))
        .row("SSH user", client.ssh_user_display().to_string())
        .row("SSH port", client.ssh_port_display().to_string())
}

/// Client card plus the SSH reachability rows
pub fn client_health_card(client: &Client, tick: usize, theme: &Theme) -> Card {
    let health = if client.health.loading {
        Line::from(vec![
            spinner_span(tick, theme),
            Span::raw(" Checking SSH connectivity"),
        ])
    } else {
        Line::from(vec![
            status_dot(client.health.ssh_alive),
            Span::raw(format!(" {}", client.health.label())),
        ])
    };

    let mut card = client_card(client).row("SSH", health);
    if client.health.ssh_alive == StatusCode::Critical && !client.health.ssh_alive_message.is_empty()
    {
        card = card.row("Error", client.health.ssh_alive_message.clone());
    }
    card
}

/// One line per installed module
pub fn client_modules_card(client: &Client) -> Card {
    let mut card = Card::new("Modules");
    if client.modules.is_empty() {
        return card.row("None", "No module installed");
    }
    for module in &client.modules {
        card = card.row(
            module.name.clone(),
            Line::from(vec![
                Span::raw(format!("{} ", text_or_dash(&module.module_type))),
                tag(module.variant_display()),
                Span::raw(format!(" {}", module.backup_type)),
            ]),
        );
    }
    card
}

pub fn module_card(module: &Module) -> Card {
    Card::new(format!("Module {}", module.name))
        .row("Module type", text_or_dash(&module.module_type))
        .row("Variant", Line::from(tag(module.variant_display())))
        .row("Available variants", joined(&module.available_variants))
        .row("Backup type", module.backup_type.to_string())
        .row("Backup paths", joined(&module.backup_paths))
        .row("Inclusions", joined(&module.include))
        .row("Exclusions", joined(&module.exclude))
        .row("Exclude CVS", Line::from(bool_badge(module.exclude_cvs)))
}

/// Free-form module parameters, when there are any
pub fn module_params_card(module: &Module) -> Option<Card> {
    if module.params.is_empty() {
        return None;
    }
    let card = module.params.iter().fold(Card::new("Parameters"), |card, (key, value)| {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        card.row(key.clone(), value)
    });
    Some(card)
}

pub fn repository_card(repository: &Repository) -> Card {
    Card::new("Repository")
        .row("Name", repository.name.clone())
        .row("Type", text_or_dash(&repository.repo_type))
        .row("Storage path", text_or_dash(&repository.path))
        .row("Use as default", Line::from(bool_badge(repository.default)))
}

pub fn job_settings_card(job: &Job) -> Card {
    Card::new("Job settings")
        .row("Type", job.job_type.as_str())
        .row("Backup type", job.backup_type.to_string())
        .row("Running", job.running_label())
        .row(
            "Status",
            Line::from(status_badge(job.status.as_str(), job.status.status_code())),
        )
        .row("Start time", format_date(job.start_time))
        .row("End time", format_date(job.end_time))
        .row("Duration", format_elapsed(job.start_time, job.end_time))
        .row("Repository", text_or_dash(job.repository_name()))
}

pub fn job_timeline_card(job: &Job) -> Card {
    let mut card = Card::new("Timeline").row(
        format_date(job.start_time),
        format!(
            "{} job started for client {} and module {}",
            job.job_type.as_str(),
            text_or_dash(job.client_name()),
            text_or_dash(job.module_name()),
        ),
    );
    if job.done {
        card = card.row(
            format_date(job.end_time),
            Line::from(vec![
                Span::raw("Job ended with status "),
                status_badge(job.status.as_str(), job.status.status_code()),
            ]),
        );
    } else {
        card = card.row(NO_VALUE, "Job still in execution");
    }
    card
}

pub fn image_card(image: &Image) -> Card {
    Card::new("Image")
        .row("Created", format_date(image.created_at))
        .row("Client", text_or_dash(image.client_name()))
        .row("Module", text_or_dash(image.module_name()))
        .row("Repository", text_or_dash(image.repository_name()))
        .row("Size on disk", format_size(image.size_on_disk))
        .row("Elements", image.number_of_elements.to_string())
        .row("Files", image.number_of_files.to_string())
        .row("Folders", image.number_of_folders.to_string())
}

/// Split cards into two columns, always filling the shorter one
fn balance(cards: &[Card]) -> ([Vec<&Card>; 2], u16) {
    let mut columns: [Vec<&Card>; 2] = [Vec::new(), Vec::new()];
    let mut heights = [0u16; 2];
    for card in cards {
        let target = usize::from(heights[1] < heights[0]);
        heights[target] += card.height();
        columns[target].push(card);
    }
    (columns, heights[0].max(heights[1]))
}

/// Height `render_cards` needs for these cards
pub fn cards_height(cards: &[Card]) -> u16 {
    balance(cards).1
}

/// Draw cards in two balanced columns at the top of `area`; returns the height used
pub fn render_cards(frame: &mut Frame, area: Rect, cards: &[Card], theme: &Theme) -> u16 {
    let (columns, height) = balance(cards);
    let used = height.min(area.height);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(Rect { height: used, ..area });
    for (cards, column) in columns.iter().zip([left, right]) {
        let constraints: Vec<Constraint> =
            cards.iter().map(|c| Constraint::Length(c.height())).collect();
        let areas = Layout::vertical(constraints).split(column);
        for (card, card_area) in cards.iter().zip(areas.iter()) {
            card.render(frame, *card_area, theme);
        }
    }
    used
}
