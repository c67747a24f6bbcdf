//! Rendering of the converter screen. Pure function of the state machine.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::{Converter, Side};
use crate::currencies::CurrencyDescriptor;

pub fn draw(frame: &mut Frame, app: &Converter) {
    let [amount, selectors, rate, result, error, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(frame.area());

    draw_amount(frame, app, amount);
    draw_selectors(frame, app, selectors);
    draw_rate(frame, app, rate);
    draw_result(frame, app, result);
    draw_error(frame, app, error);
    draw_help(frame, app, help);

    if let Some(side) = app.dropdown.open_side() {
        draw_dropdown(frame, app, side);
    }
}

fn draw_amount(frame: &mut Frame, app: &Converter, area: Rect) {
    let suffix = if app.conversion_loading() {
        " converting…"
    } else {
        ""
    };
    let text = format!("{}{}", app.amount_input, suffix);
    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Amount ({}) ", app.from.code)),
    );
    frame.render_widget(widget, area);
}

fn selector_label(currency: &CurrencyDescriptor) -> String {
    format!("{} {} {} — {}", currency.flag, currency.code, currency.symbol, currency.name)
}

fn draw_selectors(frame: &mut Frame, app: &Converter, area: Rect) {
    let [from, middle, to] = Layout::horizontal([
        Constraint::Percentage(45),
        Constraint::Percentage(10),
        Constraint::Percentage(45),
    ])
    .areas(area);

    let from_widget = Paragraph::new(selector_label(app.from))
        .block(Block::default().borders(Borders::ALL).title(" From (f) "));
    frame.render_widget(from_widget, from);

    let swap = Paragraph::new("⇄ (s)").alignment(Alignment::Center).block(
        Block::default().borders(Borders::TOP | Borders::BOTTOM),
    );
    frame.render_widget(swap, middle);

    let to_widget = Paragraph::new(selector_label(app.to))
        .block(Block::default().borders(Borders::ALL).title(" To (t) "));
    frame.render_widget(to_widget, to);
}

fn draw_rate(frame: &mut Frame, app: &Converter, area: Rect) {
    let text = if app.rate_loading() {
        "Fetching rate…".to_string()
    } else if app.rate > 0.0 {
        format!("1 {} = {:.4} {}", app.from.code, app.rate, app.to.code)
    } else {
        "Rate unavailable".to_string()
    };
    frame.render_widget(Paragraph::new(text), area);
}

fn draw_result(frame: &mut Frame, app: &Converter, area: Rect) {
    if app.converted <= 0.0 {
        return;
    }
    let text = format!(
        "{} {} = {:.2} {}",
        app.amount_input, app.from.code, app.converted, app.to.code
    );
    let widget = Paragraph::new(text).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(widget, area);
}

fn draw_error(frame: &mut Frame, app: &Converter, area: Rect) {
    if let Some(message) = &app.error {
        let widget =
            Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(widget, area);
    }
}

fn draw_help(frame: &mut Frame, app: &Converter, area: Rect) {
    let text = if app.dropdown.open_side().is_some() {
        "type to filter · ↑/↓ move · enter select · ctrl-f/ctrl-t switch side"
    } else {
        "f/t pick currency · s swap · r refresh rate · enter convert · q quit"
    };
    let widget = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(widget, area);
}

fn draw_dropdown(frame: &mut Frame, app: &Converter, side: Side) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let label = match side {
        Side::From => "from",
        Side::To => "to",
    };
    let title = if app.search.is_empty() {
        format!(" Select {label} currency ")
    } else {
        format!(" Select {label} currency — filter: {} ", app.search)
    };

    let items: Vec<ListItem> = app
        .filtered()
        .iter()
        .map(|c| ListItem::new(selector_label(c)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, horizontal, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(vertical);
    horizontal
}
