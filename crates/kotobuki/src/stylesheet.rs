//! Page-level stylesheet derived from a template theme.

use crate::template::{PageLayout, Theme};
use serde::Serialize;

/// Keyframe animations every template can reference by name
pub const KEYFRAMES: &[(&str, &str)] = &[
    ("fadeIn", "from { opacity: 0; } to { opacity: 1; }"),
    (
        "slideUp",
        "from { opacity: 0; transform: translateY(40px); } to { opacity: 1; transform: translateY(0); }",
    ),
    (
        "slideDown",
        "from { opacity: 0; transform: translateY(-40px); } to { opacity: 1; transform: translateY(0); }",
    ),
    (
        "slideLeft",
        "from { opacity: 0; transform: translateX(40px); } to { opacity: 1; transform: translateX(0); }",
    ),
    (
        "slideRight",
        "from { opacity: 0; transform: translateX(-40px); } to { opacity: 1; transform: translateX(0); }",
    ),
    (
        "zoomIn",
        "from { opacity: 0; transform: scale(0.85); } to { opacity: 1; transform: scale(1); }",
    ),
    (
        "float",
        "0%, 100% { transform: translateY(0); } 50% { transform: translateY(-8px); }",
    ),
];

/// Viewport width below which the mobile overrides apply
pub const MOBILE_BREAKPOINT: &str = "640px";

/// Global stylesheet for one rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    css: String,
}

impl Stylesheet {
    /// Build the stylesheet for a theme. Pure: the same theme always yields
    /// the same text.
    pub fn from_theme(theme: &Theme, page: &PageLayout) -> Self {
        let colors = &theme.colors;
        let accent = colors.accent.as_deref().unwrap_or(&colors.primary);
        let padding = page.padding.as_deref().unwrap_or(&theme.spacing.element);

        let mut css = format!(
            ":root {{ --kb-background: {}; --kb-text: {}; --kb-primary: {}; --kb-secondary: {}; \
             --kb-accent: {}; --kb-font-heading: {}; --kb-font-body: {}; \
             --kb-space-section: {}; --kb-space-element: {}; }}\n",
            colors.background,
            colors.text,
            colors.primary,
            colors.secondary,
            accent,
            theme.fonts.heading,
            theme.fonts.body,
            theme.spacing.section,
            theme.spacing.element,
        );
        css.push_str(
            "body { margin: 0; background: var(--kb-background); color: var(--kb-text); \
             font-family: var(--kb-font-body); }\n",
        );
        css.push_str(&format!(
            ".invitation {{ margin: 0 auto; padding: {padding}; box-sizing: border-box; }}\n"
        ));
        css.push_str(
            ".invitation h1, .invitation h2, .invitation h3 { font-family: var(--kb-font-heading); \
             color: var(--kb-primary); }\n",
        );
        css.push_str(".section { margin-bottom: var(--kb-space-section); }\n");
        for (name, frames) in KEYFRAMES {
            css.push_str(&format!("@keyframes {name} {{ {frames} }}\n"));
        }
        css.push_str(&format!(
            "@media (max-width: {MOBILE_BREAKPOINT}) {{ .invitation {{ padding: var(--kb-space-element); }} \
             .section {{ margin-bottom: calc(var(--kb-space-section) / 2); }} }}\n"
        ));

        Self { css }
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}
