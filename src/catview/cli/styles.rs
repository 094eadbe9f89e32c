//! Styles for the catview CLI.
//!
//! Templates only ever refer to *semantic* names (`names::*`): what a piece
//! of text is, not how it looks. A [`Theme`] maps those names to concrete
//! `console::Style`s, and there is one theme per terminal background. Swapping
//! themes never touches templates or render code.
//!
//! Kind and score badges get one name per known value plus a neutral
//! fallback (`kind-other`, `score-other`), so data the renderer has never
//! heard of still renders, just without an accent color.
//!
//! A style name missing from the theme is shown with a `(!?)` prefix, which
//! makes template typos obvious in tests.

use super::setup::ThemeMode;
use console::Style;
use std::collections::HashMap;

/// Prefix shown when a template asks for a style the theme doesn't define.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const TITLE: &str = "title";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const INDEX: &str = "index";
    pub const SECTION: &str = "section";
    pub const LABEL: &str = "label";
    pub const LINK: &str = "link";
    pub const CHECKED: &str = "checked";
    pub const TIME: &str = "time";
    // Badges
    pub const KIND_COMPONENT: &str = "kind-component";
    pub const KIND_RESOURCE: &str = "kind-resource";
    pub const KIND_STORE: &str = "kind-store";
    pub const KIND_SERVICE: &str = "kind-service";
    pub const KIND_OTHER: &str = "kind-other";
    pub const CLASS_BADGE: &str = "class-badge";
    pub const SCORE_A: &str = "score-a";
    pub const SCORE_B: &str = "score-b";
    pub const SCORE_C: &str = "score-c";
    pub const SCORE_D: &str = "score-d";
    pub const SCORE_E: &str = "score-e";
    pub const SCORE_F: &str = "score-f";
    pub const SCORE_OTHER: &str = "score-other";
    pub const SEVERITY_HIGH: &str = "severity-high";
    pub const SEVERITY_MEDIUM: &str = "severity-medium";
    pub const SEVERITY_LOW: &str = "severity-low";
}

/// A named collection of styles.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, replacing any previous one with that name.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Applies a named style to text, with ANSI codes.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            // force_styling: color has already been decided by the caller
            Some(style) => style.clone().force_styling(true).apply_to(text).to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }

    /// Same lookup as [`apply`](Self::apply) but without ANSI codes.
    pub fn apply_plain(&self, name: &str, text: &str) -> String {
        if self.has(name) {
            text.to_string()
        } else {
            format!("{} {}", MISSING_STYLE_INDICATOR, text)
        }
    }
}

/// Picks the theme for `mode`, asking the terminal when `mode` is `Auto`.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Light => build_light_theme(),
        ThemeMode::Dark => build_dark_theme(),
        ThemeMode::Auto => match dark_light::detect() {
            dark_light::Mode::Light => build_light_theme(),
            dark_light::Mode::Dark => build_dark_theme(),
        },
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let scale = |c: u8| -> u8 { ((c as u16 * 5 + 127) / 255) as u8 };
        16 + 36 * scale(r) + 6 * scale(g) + scale(b)
    }
}

fn rgb(color: (u8, u8, u8)) -> Style {
    Style::new().color256(rgb_to_ansi256(color))
}

/// Palette values that differ between light and dark terminals.
struct Palette {
    regular: Style,
    muted: (u8, u8, u8),
    faint: (u8, u8, u8),
    accent: (u8, u8, u8),
    link: (u8, u8, u8),
    blue: (u8, u8, u8),
    green: (u8, u8, u8),
    purple: (u8, u8, u8),
    orange: (u8, u8, u8),
    red: (u8, u8, u8),
    yellow: (u8, u8, u8),
}

fn build_theme(p: Palette) -> Theme {
    let muted = rgb(p.muted);
    let badge = |color: (u8, u8, u8)| rgb(color).bold();

    Theme::new()
        .add(names::REGULAR, p.regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, rgb(p.faint))
        .add(names::TITLE, p.regular.clone().bold())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::INDEX, rgb(p.accent))
        .add(names::SECTION, rgb(p.accent).bold())
        .add(names::LABEL, muted.clone())
        .add(names::LINK, rgb(p.link).underlined())
        .add(names::CHECKED, rgb(p.green).bold())
        .add(names::TIME, muted.clone().italic())
        .add(names::KIND_COMPONENT, badge(p.blue))
        .add(names::KIND_RESOURCE, badge(p.purple))
        .add(names::KIND_STORE, badge(p.green))
        .add(names::KIND_SERVICE, badge(p.yellow))
        .add(names::KIND_OTHER, muted.clone())
        .add(names::CLASS_BADGE, rgb(p.faint))
        .add(names::SCORE_A, badge(p.green))
        .add(names::SCORE_B, rgb(p.green))
        .add(names::SCORE_C, badge(p.yellow))
        .add(names::SCORE_D, badge(p.orange))
        .add(names::SCORE_E, badge(p.red))
        .add(names::SCORE_F, Style::new().red().bold().reverse())
        .add(names::SCORE_OTHER, muted)
        .add(names::SEVERITY_HIGH, rgb(p.red))
        .add(names::SEVERITY_MEDIUM, rgb(p.orange))
        .add(names::SEVERITY_LOW, rgb(p.yellow))
}

fn build_light_theme() -> Theme {
    build_theme(Palette {
        regular: Style::new().black(),
        muted: (115, 115, 115),
        faint: (150, 150, 150),
        accent: (196, 140, 0),
        link: (0, 95, 175),
        blue: (37, 99, 235),
        green: (22, 128, 61),
        purple: (126, 34, 206),
        orange: (194, 65, 12),
        red: (185, 28, 28),
        yellow: (161, 98, 7),
    })
}

fn build_dark_theme() -> Theme {
    build_theme(Palette {
        regular: Style::new().white(),
        muted: (180, 180, 180),
        faint: (120, 120, 120),
        accent: (255, 214, 10),
        link: (125, 190, 255),
        blue: (96, 165, 250),
        green: (74, 222, 128),
        purple: (192, 132, 252),
        orange: (251, 146, 60),
        red: (248, 113, 113),
        yellow: (250, 204, 21),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_themes_define_the_same_names() {
        let light = build_light_theme();
        let dark = build_dark_theme();
        let mut light_names: Vec<_> = light.styles.keys().collect();
        let mut dark_names: Vec<_> = dark.styles.keys().collect();
        light_names.sort();
        dark_names.sort();
        assert_eq!(light_names, dark_names);
        assert!(light.has(names::SCORE_OTHER));
    }

    #[test]
    fn plain_mode_keeps_text_and_flags_unknown_names() {
        let theme = build_dark_theme();
        assert_eq!(theme.apply_plain(names::TITLE, "Ledger"), "Ledger");
        assert_eq!(theme.apply_plain("titel", "Ledger"), "(!?) Ledger");
    }

    #[test]
    fn apply_emits_ansi_codes() {
        let theme = build_light_theme();
        let styled = theme.apply(names::ERROR, "boom");
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("boom"));
    }

    #[test]
    fn grays_map_to_grayscale_ramp() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
        assert!(rgb_to_ansi256((128, 128, 128)) >= 232);
        assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
    }
}
