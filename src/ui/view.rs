//! Panel rendering
//!
//! Layout, top to bottom:
//! - Mode bar (one tab per mode)
//! - Code editor (left) + Result (right)
//! - Console (busy indicator, messages)
//! - Command bar
//!
//! The result pane is a projection of the workbench's Document; colors come
//! from the active theme's palette.

use ratatui::style::Stylize;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};

use crate::theme::Theme;
use crate::ui::state::{App, AppState, Focus};
use compilab_core::{Block as DocBlock, Document, Mode, Tone};

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
            },
            Theme::Light => Palette {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                success: Color::Rgb(0, 120, 0),
                warning: Color::Rgb(160, 110, 0),
                error: Color::Rgb(180, 0, 0),
            },
        }
    }

    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Plain => self.text,
            Tone::Accent => self.accent,
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Error => self.error,
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }
}

/// Render the main UI
pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> std::io::Result<()> {
    terminal.draw(|f| draw(f, app))?;
    Ok(())
}

/// Draw one frame
pub fn draw(f: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.workbench.theme());
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_mode_bar(f, app, &palette, chunks[0]);
    render_editor(f, app, &palette, main_chunks[0]);
    render_output(f, app, &palette, main_chunks[1]);
    render_console(f, app, &palette, chunks[2]);
    render_command_bar(f, app, &palette, chunks[3]);

    if let Some(toast) = app.toast() {
        render_toast(f, &palette, &toast.text);
    }
}

fn render_mode_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let current = app.workbench.mode();
    let selected = Mode::ALL.iter().position(|m| *m == current).unwrap_or(0);

    let tabs = Tabs::new(Mode::ALL.iter().map(|m| m.label()))
        .select(selected)
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .block(
            Block::default()
                .title(" Modo (F2) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        );

    f.render_widget(tabs, area);
}

fn focus_border(palette: &Palette, focused: bool) -> Style {
    if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    }
}

fn render_editor(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Editor;
    let input = app.workbench.input();

    let mut lines: Vec<Line> = input
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(palette.text))))
        .collect();

    if input.is_empty() && !focused {
        lines = vec![Line::from(Span::styled(
            "Escribe código aquí o usa /example, /open",
            Style::default().fg(palette.muted),
        ))];
    } else if focused {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("▏", Style::default().fg(palette.accent)));
        }
    }

    // Keep the end of the buffer in view
    let visible = (area.height as usize).saturating_sub(2);
    let skip = lines.len().saturating_sub(visible);
    let visible_lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    let paragraph = Paragraph::new(visible_lines).block(
        Block::default()
            .title(" Código ")
            .borders(Borders::ALL)
            .border_style(focus_border(palette, focused)),
    );

    f.render_widget(paragraph, area);
}

fn render_output(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let document = app.workbench.output();
    let lines = if document.is_empty() {
        let hint = if app.state() == AppState::Analyzing {
            "Analizando..."
        } else {
            "Pulsa F5 o /run para analizar"
        };
        vec![Line::from(Span::styled(hint, Style::default().fg(palette.muted)))]
    } else {
        document_lines(document, palette)
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Resultado ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0));

    f.render_widget(paragraph, area);
}

/// Styled lines for a document
pub fn document_lines(document: &Document, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in &document.blocks {
        match block {
            DocBlock::Heading { text, tone } => {
                lines.push(Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(palette.tone(*tone)).bold(),
                )));
            }
            DocBlock::Category(category) => {
                let value_style = if category.is_empty_notice() {
                    Style::default().fg(palette.warning)
                } else {
                    Style::default().fg(palette.text)
                };
                lines.push(Line::from(vec![
                    Span::styled(category.label(), Style::default().fg(palette.accent).bold()),
                    Span::raw(" "),
                    Span::styled(category.values_text(), value_style),
                ]));
            }
            DocBlock::Paragraph { label, text, tone } => {
                let style = Style::default().fg(palette.tone(*tone));
                match label {
                    Some(label) => lines.push(Line::from(vec![
                        Span::styled(label.clone(), Style::default().fg(palette.text).bold()),
                        Span::raw(" "),
                        Span::styled(text.clone(), style),
                    ])),
                    None => lines.extend(
                        text.lines()
                            .map(|l| Line::from(Span::styled(l.to_string(), style))),
                    ),
                }
            }
            DocBlock::KeyValue { title, entries } => {
                lines.push(Line::from(Span::styled(
                    title.clone(),
                    Style::default().fg(palette.accent).bold(),
                )));
                let mut spans = Vec::new();
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(", ", Style::default().fg(palette.muted)));
                    }
                    spans.push(Span::styled(
                        format!("{}: ", key),
                        Style::default().fg(palette.text).bold(),
                    ));
                    spans.push(Span::styled(value.clone(), Style::default().fg(palette.text)));
                }
                lines.push(Line::from(spans));
            }
            DocBlock::List { title, items, tone } => {
                let color = palette.tone(*tone);
                lines.push(Line::from(Span::styled(
                    title.clone(),
                    Style::default().fg(color).bold(),
                )));
                for item in items {
                    lines.push(Line::from(Span::styled(
                        format!("  • {}", item),
                        Style::default().fg(color),
                    )));
                }
            }
            DocBlock::Preformatted { title, text, tone } => {
                lines.push(Line::from(Span::styled(
                    title.clone(),
                    Style::default().fg(palette.accent).bold(),
                )));
                for l in text.lines() {
                    lines.push(Line::from(Span::styled(
                        l.to_string(),
                        Style::default().fg(palette.tone(*tone)),
                    )));
                }
            }
            DocBlock::Divider => {
                lines.push(Line::from(Span::styled(
                    "─".repeat(20),
                    Style::default().fg(palette.muted),
                )));
            }
        }
    }
    lines
}

fn render_console(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let title = match app.state() {
        AppState::Analyzing => " Consola · ⏳ analizando... ".to_string(),
        _ => format!(" Consola · {} ", app.backend_url()),
    };

    let visible = (area.height as usize).saturating_sub(2);
    let start = app.console_messages.len().saturating_sub(visible);
    let lines: Vec<Line> = app.console_messages[start..]
        .iter()
        .map(|msg| {
            Line::from(vec![
                Span::styled(
                    msg.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(msg.content.clone(), Style::default().fg(palette.text)),
            ])
        })
        .collect();

    let border_style = if app.state() == AppState::Analyzing {
        Style::default().fg(palette.warning)
    } else {
        Style::default().fg(palette.muted)
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(paragraph, area);
}

fn render_command_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::CommandBar;
    let content = if app.command_buffer.is_empty() && !focused {
        Line::from(Span::styled(
            "Tab para comandos · /help",
            Style::default().fg(palette.muted),
        ))
    } else {
        let mut spans = vec![Span::styled(
            app.command_buffer.clone(),
            Style::default().fg(palette.text),
        )];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Comando ")
                .borders(Borders::ALL)
                .border_style(focus_border(palette, focused)),
        )
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

fn render_toast(f: &mut Frame, palette: &Palette, text: &str) {
    let width = (text.chars().count() as u16 + 4).min(f.area().width);
    let area = Rect {
        x: f.area().width.saturating_sub(width + 1),
        y: 1,
        width,
        height: 3.min(f.area().height),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(palette.success).bold(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.success))
            .style(palette.base()),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use compilab_core::CategoryLine;

    #[test]
    fn test_document_lines_follow_plain_text() {
        let mut doc = Document::new();
        doc.push(DocBlock::Category(CategoryLine {
            category: "KEYWORD".to_string(),
            count: 0,
            values: Vec::new(),
        }));
        doc.push(DocBlock::labelled("Total de tokens:", "0"));
        doc.push(DocBlock::Divider);

        let palette = Palette::for_theme(Theme::Dark);
        let lines = document_lines(&doc, &palette);
        assert_eq!(lines.len(), doc.to_lines().len());
    }

    #[test]
    fn test_empty_notice_uses_warning_color() {
        let mut doc = Document::new();
        doc.push(DocBlock::Category(CategoryLine {
            category: "NUMBER".to_string(),
            count: 0,
            values: Vec::new(),
        }));
        let palette = Palette::for_theme(Theme::Light);
        let lines = document_lines(&doc, &palette);
        assert_eq!(lines[0].spans[2].style.fg, Some(palette.warning));
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(
            Palette::for_theme(Theme::Dark),
            Palette::for_theme(Theme::Light)
        );
    }
}
