use ratatui::style::{Color, Modifier, Style};

use crate::notify::Variant;

pub struct Theme {
    pub bg: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_accent: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub eth_value: Color,
    pub address_color: Color,
    pub active_route: Color,
    pub active_route_bg: Color,
    pub seat_available: Color,
    pub seat_selected: Color,
    pub seat_booked: Color,
}

pub const THEME: Theme = Theme {
    bg: Color::Rgb(16, 16, 28),
    surface: Color::Rgb(24, 24, 40),
    text: Color::Rgb(220, 220, 230),
    text_muted: Color::Rgb(120, 120, 140),
    text_accent: Color::Cyan,
    success: Color::Green,
    error: Color::Red,
    warning: Color::Yellow,
    selected_bg: Color::Rgb(40, 60, 100),
    selected_fg: Color::White,
    border: Color::Rgb(60, 60, 80),
    border_focused: Color::Cyan,
    eth_value: Color::Rgb(98, 126, 234),
    address_color: Color::Rgb(255, 179, 71),
    active_route: Color::Rgb(239, 68, 68),
    active_route_bg: Color::Rgb(60, 24, 30),
    seat_available: Color::Rgb(230, 230, 235),
    seat_selected: Color::Rgb(79, 70, 229),
    seat_booked: Color::Rgb(110, 110, 120),
};

impl Theme {
    pub const fn header_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.surface)
    }

    pub const fn selected_style(&self) -> Style {
        Style::new().fg(self.selected_fg).bg(self.selected_bg).add_modifier(Modifier::BOLD)
    }

    pub const fn border_style(&self) -> Style {
        Style::new().fg(self.border)
    }

    pub const fn border_focused_style(&self) -> Style {
        Style::new().fg(self.border_focused)
    }

    pub const fn muted_style(&self) -> Style {
        Style::new().fg(self.text_muted)
    }

    pub const fn accent_style(&self) -> Style {
        Style::new().fg(self.text_accent)
    }

    pub const fn success_style(&self) -> Style {
        Style::new().fg(self.success)
    }

    pub const fn error_style(&self) -> Style {
        Style::new().fg(self.error)
    }

    pub const fn eth_style(&self) -> Style {
        Style::new().fg(self.eth_value)
    }

    pub const fn address_style(&self) -> Style {
        Style::new().fg(self.address_color)
    }

    pub const fn active_route_style(&self) -> Style {
        Style::new()
            .fg(self.active_route)
            .bg(self.active_route_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Seat button style: booked beats selected beats available.
    pub fn seat_style(&self, booked: bool, selected: bool) -> Style {
        if booked {
            Style::new()
                .fg(self.seat_booked)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if selected {
            Style::new()
                .fg(self.selected_fg)
                .bg(self.seat_selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(self.bg).bg(self.seat_available)
        }
    }

    pub fn notification_style(&self, variant: Variant) -> Style {
        let color = match variant {
            Variant::Info => self.text_accent,
            Variant::Success => self.success,
            Variant::Destructive => self.error,
        };
        Style::new().fg(color)
    }
}
