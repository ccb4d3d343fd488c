use ratatui::style::Color;

/// Theme selected when settings name none or an unknown one.
pub const DEFAULT_THEME_ID: &str = "classic";

/// A color theme applied to all visual elements.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub apple: Color,
    pub board_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub accent: Color,
}

/// Classic green snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    id: "classic",
    name: "Classic",
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    apple: Color::Red,
    board_bg: Color::Black,
    border_fg: Color::White,
    hud_value: Color::White,
    hud_muted: Color::DarkGray,
    accent: Color::Green,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    id: "ocean",
    name: "Ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::Blue,
    apple: Color::Yellow,
    board_bg: Color::Black,
    border_fg: Color::Cyan,
    hud_value: Color::Cyan,
    hud_muted: Color::DarkGray,
    accent: Color::LightCyan,
};

/// Neon magenta/yellow theme.
pub const THEME_NEON: Theme = Theme {
    id: "neon",
    name: "Neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    snake_tail: Color::DarkGray,
    apple: Color::Yellow,
    board_bg: Color::Black,
    border_fg: Color::Magenta,
    hud_value: Color::Magenta,
    hud_muted: Color::DarkGray,
    accent: Color::LightMagenta,
};

/// All available themes in cycle order.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN, THEME_NEON];

/// Built-in themes plus the current selection.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: &'static [Theme],
    selected_idx: usize,
}

impl ThemeCatalog {
    /// Selects `id`, falling back to the default theme for unknown ids.
    #[must_use]
    pub fn with_selected(id: &str) -> Self {
        let mut catalog = Self {
            themes: THEMES,
            selected_idx: 0,
        };
        if !catalog.select_id(id) {
            let _ = catalog.select_id(DEFAULT_THEME_ID);
        }
        catalog
    }

    #[must_use]
    pub fn current_theme(&self) -> &Theme {
        &self.themes[self.selected_idx]
    }

    #[must_use]
    pub fn current_id(&self) -> &'static str {
        self.themes[self.selected_idx].id
    }

    pub fn select_id(&mut self, id: &str) -> bool {
        match self.themes.iter().position(|theme| theme.id == id) {
            Some(idx) => {
                self.selected_idx = idx;
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        self.selected_idx = (self.selected_idx + 1) % self.themes.len();
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::with_selected(DEFAULT_THEME_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::{ThemeCatalog, DEFAULT_THEME_ID, THEMES};

    #[test]
    fn unknown_id_falls_back_to_default() {
        let catalog = ThemeCatalog::with_selected("does-not-exist");

        assert_eq!(catalog.current_id(), DEFAULT_THEME_ID);
    }

    #[test]
    fn select_next_cycles_through_all_themes() {
        let mut catalog = ThemeCatalog::default();
        let start = catalog.current_id();

        for _ in 0..THEMES.len() {
            catalog.select_next();
        }

        assert_eq!(catalog.current_id(), start);
    }

    #[test]
    fn theme_ids_are_unique() {
        for (i, a) in THEMES.iter().enumerate() {
            for b in &THEMES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
