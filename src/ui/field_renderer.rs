//! Field rendering utilities for forms

use crate::form::{ChoiceState, FieldSchema, FieldValue, Widget};
use crate::state::selected_label;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of one rendered field
pub const FIELD_HEIGHT: u16 = 3;

/// Everything needed to draw one field
pub struct FieldView<'a> {
    pub field: &'a FieldSchema,
    pub value: Option<&'a FieldValue>,
    pub choices: Option<&'a ChoiceState>,
    pub is_active: bool,
    /// The displayed error is bound to this field
    pub has_error: bool,
}

impl FieldView<'_> {
    fn is_filled(&self) -> bool {
        self.value.is_some_and(|v| !v.is_empty())
    }

    fn border_color(&self) -> Color {
        if self.has_error {
            Color::Red
        } else if self.is_active {
            Color::Cyan
        } else if self.is_filled() {
            Color::Green
        } else {
            Color::DarkGray
        }
    }

    fn title(&self) -> String {
        if self.is_filled() {
            format!(" {} * ✓ ", self.field.label)
        } else {
            format!(" {} * ", self.field.label)
        }
    }

    /// Content line for the field's widget kind
    fn content(&self) -> Line<'static> {
        let text_style = if self.is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let muted = Style::default().fg(Color::DarkGray);

        match self.field.widget {
            Widget::Text | Widget::Integer => {
                let raw = self.value.map(FieldValue::display_value).unwrap_or_default();
                if self.is_active {
                    Line::from(vec![
                        Span::styled(raw, text_style),
                        Span::styled("▌", Style::default().fg(Color::Cyan)),
                    ])
                } else if raw.is_empty() {
                    Line::from(Span::styled(placeholder(self.field), muted))
                } else {
                    Line::from(Span::styled(raw, text_style))
                }
            }
            Widget::Choice => match self.choices {
                None | Some(ChoiceState::Loading) => {
                    Line::from(Span::styled("Loading options...", muted))
                }
                Some(ChoiceState::Ready(options)) => {
                    let (label, style) = match selected_label(options, self.value) {
                        Some(label) => (label.to_string(), text_style),
                        None => ("-- Select an option --".to_string(), muted),
                    };
                    if self.is_active {
                        Line::from(vec![
                            Span::styled("◀ ", muted),
                            Span::styled(label, text_style),
                            Span::styled(" ▶", muted),
                        ])
                    } else {
                        Line::from(Span::styled(label, style))
                    }
                }
            },
        }
    }
}

/// Hint shown in an empty, unfocused input
fn placeholder(field: &FieldSchema) -> String {
    match field.widget {
        Widget::Integer => format!("Enter {} (whole number)", field.label.to_lowercase()),
        Widget::Text | Widget::Choice => format!("Enter {}", field.label.to_lowercase()),
    }
}

/// Draw a form field
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let block = Block::default()
        .title(view.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(view.border_color()));

    frame.render_widget(Paragraph::new(view.content()).block(block), area);
}
