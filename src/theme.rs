use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub root_bg: Color,
    pub card_border: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub dim_bg: Color,

    // Specific components
    pub banner: Style,
    pub rose: Style,
    pub intro_hint: Style,
    pub event_title: Style,
    pub event_detail: Style,
    pub countdown_digit: Style,
    pub countdown_label: Style,
    pub arrived: Style,
    pub guest_count: Style,
    pub link_ready: Style,
    pub link_loading: Style,
    pub footer: Style,
    pub popup_title: Style,
    pub popup_border: Style,
    pub popup_text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            root_bg: Color::Black,
            card_border: Color::Rgb(212, 175, 55),
            text: Color::White,
            text_secondary: Color::Gray,
            dim_bg: Color::Rgb(30, 30, 30),

            banner: Style::default().fg(Color::Rgb(212, 175, 55)).add_modifier(Modifier::BOLD),
            rose: Style::default().fg(Color::Rgb(220, 120, 140)),
            intro_hint: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            event_title: Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
            event_detail: Style::default().fg(Color::White),
            countdown_digit: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            countdown_label: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            arrived: Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
            guest_count: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            link_ready: Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            link_loading: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            popup_title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            popup_border: Style::default().bg(Color::Black),
            popup_text: Style::default().fg(Color::White),
        }
    }
}
