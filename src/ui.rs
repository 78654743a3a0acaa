use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
    layout::{Constraint, Direction, Layout, Size},
    text::{Line, Span},
};
use chrono::Local;
use tui_scrollview::{ScrollView, ScrollbarVisibility};

use crate::app::{App, IntroPhase};
use crate::art;
use crate::calendar;
use crate::countdown::{ARRIVED_MESSAGE, CountdownDisplay};
use crate::popup;

const COUNTDOWN_LABELS: [&str; 4] = ["hari", "jam", "minit", "saat"];

/// Top-level render dispatch. The intro covers the page until its fade
/// ends; popups draw over everything.
pub fn render(f: &mut Frame, app: &mut App) {
    let backdrop = Block::default().style(Style::default().bg(app.theme.root_bg));
    f.render_widget(backdrop, f.area());

    match app.intro {
        IntroPhase::Waiting | IntroPhase::Blooming => render_intro(f, app, false),
        IntroPhase::Fading { .. } => {
            render_page(f, app);
            render_intro(f, app, true);
        }
        IntroPhase::Done => {
            render_page(f, app);
            render_popup(f, app);
        }
    }
}

/// The intro screen: rose art plus a wake-up hint. While the page fades
/// in underneath, only a dimmed center patch of it remains.
fn render_intro(f: &mut Frame, app: &App, dimmed: bool) {
    let art = match app.intro {
        IntroPhase::Waiting => art::STATIC_ROSE,
        _ => app.rose.current(),
    };

    let area = if dimmed {
        centered_rect(50, 60, f.area())
    } else {
        f.area()
    };
    if dimmed {
        f.render_widget(Clear, area);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let style = if dimmed {
        app.theme.rose.add_modifier(Modifier::DIM).bg(app.theme.dim_bg)
    } else {
        app.theme.rose
    };
    let rose = Paragraph::new(art).alignment(Alignment::Center).style(style);
    f.render_widget(rose, chunks[0]);

    if app.intro == IntroPhase::Waiting {
        let hint = Paragraph::new("Tekan mana-mana kekunci / press any key")
            .alignment(Alignment::Center)
            .style(app.theme.intro_hint);
        f.render_widget(hint, chunks[1]);
    }
}

/// The invitation card inside a scroll view, with a key-hint footer.
fn render_page(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(f.area());

    let card = Block::default()
        .title(" Jemputan ")
        .borders(Borders::ALL)
        .style(Style::default().fg(app.theme.card_border));
    let inner = card.inner(chunks[0]);
    f.render_widget(card, chunks[0]);

    let lines = card_lines(app);
    let content_height = lines.len() as u16;
    let content_width = inner.width.saturating_sub(1);

    app.page.note_dimensions(content_height, inner.height);

    let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
    scroll_view.render_widget(
        Paragraph::new(lines),
        Rect::new(0, 0, content_width, content_height),
    );
    f.render_stateful_widget(scroll_view, inner, &mut app.page.state);

    let footer = Paragraph::new(
        "r RSVP | v Venue | a Program | g Copy link | c Copy .ics | s Save .ics | j/k Scroll | Esc Close | q Quit",
    )
    .block(Block::default().borders(Borders::ALL))
    .style(app.theme.footer);
    f.render_widget(footer, chunks[1]);
}

/// The card body as styled lines. Owned strings throughout, so the
/// scroll view can size itself from the line count.
fn card_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let details = &app.details;
    let start = details.start.with_timezone(&Local);
    let end = details.end.with_timezone(&Local);

    let mut lines = vec![
        Line::styled(art::BANNER, theme.banner).centered(),
        Line::default(),
        Line::styled("JEMPUTAN KHAS", Style::default().fg(theme.text_secondary)).centered(),
        Line::styled(details.title.clone(), theme.event_title).centered(),
        Line::default(),
        Line::styled(details.description.clone(), theme.event_detail).centered(),
        Line::default(),
        Line::styled(
            format!("Tarikh : {}", start.format("%A, %d %B %Y")),
            Style::default().fg(theme.text),
        ),
        Line::styled(
            format!("Masa   : {} - {}", start.format("%I:%M %p"), end.format("%I:%M %p")),
            Style::default().fg(theme.text),
        ),
        Line::styled(format!("Tempat : {}", details.location), Style::default().fg(theme.text)),
        Line::default(),
        Line::styled(art::DIVIDER, theme.banner).centered(),
        Line::default(),
        Line::styled("Menghitung hari / counting down", Style::default().fg(theme.text_secondary))
            .centered(),
    ];

    lines.push(countdown_line(app).centered());
    lines.push(Line::default());
    lines.push(
        Line::styled("Jumlah kehadiran / guests attending", Style::default().fg(theme.text_secondary))
            .centered(),
    );
    lines.push(guest_line(app).centered());
    lines.push(Line::default());
    lines.push(Line::styled(art::DIVIDER, theme.banner).centered());
    lines.push(Line::default());
    lines.push(Line::from("Tambah ke kalendar / add to calendar:"));
    lines.push(link_line(app, "g", "Google Calendar", app.links.google().is_some()));
    lines.push(link_line(app, "s", calendar::ICS_FILENAME, app.links.ics().is_some()));
    lines.push(Line::default());
    lines.push(
        Line::styled("Kehadiran tuan/puan amat dialu-alukan.", theme.event_detail).centered(),
    );
    lines.push(Line::default());
    lines.push(Line::styled(art::BANNER, theme.banner).centered());

    lines
}

fn countdown_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    match &app.countdown_display {
        Some(CountdownDisplay::Arrived) => Line::styled(ARRIVED_MESSAGE, theme.arrived),
        Some(display) => {
            let Some(segments) = display.segments() else {
                return Line::default();
            };
            let mut spans = Vec::new();
            for (i, (value, label)) in segments.iter().zip(COUNTDOWN_LABELS).enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(value.clone(), theme.countdown_digit));
                spans.push(Span::styled(format!(" {label}"), theme.countdown_label));
            }
            Line::from(spans)
        }
        None => Line::default(),
    }
}

fn guest_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let board = app.guest_board.lock().unwrap();
    if board.loading {
        Line::styled("...", theme.link_loading)
    } else {
        Line::styled(board.text.clone(), theme.guest_count)
    }
}

fn link_line(app: &App, key: &str, label: &str, ready: bool) -> Line<'static> {
    let theme = &app.theme;
    if ready {
        Line::from(vec![
            Span::styled(format!("  {key} "), theme.countdown_digit),
            Span::styled(label.to_string(), theme.link_ready),
        ])
    } else {
        Line::styled(format!("  {key} {label} ..."), theme.link_loading)
    }
}

/// At most one popup is active; draw it over the center of the card.
fn render_popup(f: &mut Frame, app: &App) {
    let Some(active) = app.popups.visible() else {
        return;
    };

    let popup_area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, popup_area);

    let mut lines = Vec::new();
    if active.id == popup::RSVP_POPUP {
        for row in app.popups.gala.current().lines() {
            lines.push(Line::styled(row.to_string(), app.theme.rose).centered());
        }
        lines.push(Line::default());
    }
    for row in active.body.lines() {
        lines.push(Line::styled(row.to_string(), app.theme.popup_text));
    }

    let block = Block::default()
        .title(Span::styled(format!(" {} ", active.title), app.theme.popup_title))
        .borders(Borders::ALL)
        .style(app.theme.popup_border.fg(app.theme.card_border));
    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup_area);
}

/// Centers a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r)[1];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical)[1]
}
