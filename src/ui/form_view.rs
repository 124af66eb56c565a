//! Form body rendering: loading indicator, fields, or confirmation

use super::components::{render_alert, render_button, AlertKind, BUTTON_HEIGHT};
use super::field_renderer::{draw_field, FieldView, FIELD_HEIGHT};
use crate::app::App;
use crate::form::SessionPhase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height of an alert box
const ALERT_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    match app.session().phase() {
        SessionPhase::Loading => draw_loading(frame, area),
        SessionPhase::Success { response } => draw_success(frame, area, response),
        SessionPhase::Ready | SessionPhase::Submitting => draw_form(frame, area, app),
    }
}

fn draw_loading(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("Loading form...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::NONE));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    frame.render_widget(paragraph, rows[1]);
}

fn draw_success(frame: &mut Frame, area: Rect, response: &serde_json::Value) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(ALERT_HEIGHT), Constraint::Min(0)])
        .margin(1)
        .split(area);

    render_alert(
        frame,
        rows[0],
        "Form submitted successfully!",
        AlertKind::Success,
    );

    let body = serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string());
    let block = Block::default()
        .title(" Server response ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    frame.render_widget(
        Paragraph::new(body)
            .style(Style::default().fg(Color::Blue))
            .wrap(Wrap { trim: false })
            .block(block),
        rows[1],
    );
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let fields = session.fields();
    let error = session.error();

    let mut constraints = Vec::with_capacity(fields.len() + 3);
    if error.is_some() {
        constraints.push(Constraint::Length(ALERT_HEIGHT));
    }
    constraints.extend(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);
    let mut rows = rows.iter().copied();

    if let Some(err) = error {
        if let Some(row) = rows.next() {
            render_alert(frame, row, &err.to_string(), AlertKind::Error);
        }
    }

    let active = app.focus.field_index(fields.len());
    let error_field = error.and_then(|e| e.field_id());
    for (index, field) in fields.iter().enumerate() {
        let Some(row) = rows.next() else { break };
        let view = FieldView {
            field,
            value: session.value(&field.id),
            choices: session.choices(&field.id),
            is_active: active == Some(index),
            has_error: error_field == Some(field.id.as_str()),
        };
        draw_field(frame, row, &view);
    }

    if let Some(row) = rows.next() {
        let label = if matches!(session.phase(), SessionPhase::Submitting) {
            "Sending..."
        } else {
            "Submit form"
        };
        render_button(
            frame,
            row,
            label,
            app.focus.is_submit(fields.len()),
            session.can_submit(),
        );
    }
}
