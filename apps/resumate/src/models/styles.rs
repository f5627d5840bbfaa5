//! Presentation preferences: colors, font choices, and font sizes.
//!
//! Persisted records are merged over the hard-coded defaults so fields added
//! after a user first saved their styles pick up sensible values.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const HEADING_SIZE_RANGE: RangeInclusive<f32> = 24.0..=60.0;
pub const SUBHEADING_SIZE_RANGE: RangeInclusive<f32> = 14.0..=32.0;
pub const BODY_SIZE_RANGE: RangeInclusive<f32> = 9.0..=16.0;

/// A font selector: either the template's own default or a concrete CSS-style
/// font stack chosen by the user (e.g. `'Georgia', serif`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontChoice {
    TemplateDefault,
    Named(String),
}

impl From<String> for FontChoice {
    fn from(s: String) -> Self {
        if s.is_empty() || s == "default" {
            FontChoice::TemplateDefault
        } else {
            FontChoice::Named(s)
        }
    }
}

impl From<FontChoice> for String {
    fn from(choice: FontChoice) -> Self {
        match choice {
            FontChoice::TemplateDefault => "default".to_string(),
            FontChoice::Named(s) => s,
        }
    }
}

impl Default for FontChoice {
    fn default() -> Self {
        FontChoice::TemplateDefault
    }
}

/// Broad metric class of a font stack — all the width estimator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontClass {
    Sans,
    Serif,
}

impl FontChoice {
    /// Resolves this choice to a metric class, falling back to the template's
    /// own default class when the user hasn't picked a font.
    pub fn class_or(&self, template_default: FontClass) -> FontClass {
        match self {
            FontChoice::TemplateDefault => template_default,
            FontChoice::Named(stack) => {
                // CSS stacks end in a generic family; `sans-serif` must be
                // checked before `serif`.
                if stack.contains("sans-serif") {
                    FontClass::Sans
                } else if stack.contains("serif") {
                    FontClass::Serif
                } else {
                    template_default
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePreferences {
    pub primary_color: String,
    pub text_color: String,
    pub heading_font: FontChoice,
    pub body_font: FontChoice,
    pub heading_font_size: f32,
    pub subheading_font_size: f32,
    pub body_font_size: f32,
}

impl Default for StylePreferences {
    fn default() -> Self {
        StylePreferences {
            primary_color: "#4B0082".to_string(),
            text_color: "#333333".to_string(),
            heading_font: FontChoice::TemplateDefault,
            body_font: FontChoice::TemplateDefault,
            heading_font_size: 36.0,
            subheading_font_size: 20.0,
            body_font_size: 11.0,
        }
    }
}

impl StylePreferences {
    /// Forces every size field back into its editor-exposed range. Applied on
    /// load so an out-of-range persisted value cannot distort layout.
    pub fn clamped(mut self) -> Self {
        self.heading_font_size = clamp_to(self.heading_font_size, &HEADING_SIZE_RANGE);
        self.subheading_font_size = clamp_to(self.subheading_font_size, &SUBHEADING_SIZE_RANGE);
        self.body_font_size = clamp_to(self.body_font_size, &BODY_SIZE_RANGE);
        self
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if !value.is_finite() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}
