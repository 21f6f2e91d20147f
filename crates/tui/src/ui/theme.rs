use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub error: Color,
    pub positive: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(222, 222, 216),
            dim: Color::Rgb(128, 134, 140),
            accent: Color::Rgb(110, 170, 160),
            error: Color::Rgb(205, 85, 85),
            positive: Color::Rgb(110, 180, 120),
            border: Color::Rgb(70, 80, 90),
        }
    }
}
