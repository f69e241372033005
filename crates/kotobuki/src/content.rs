//! Narrative content for the hand-authored invitation pages.
//!
//! A [`ContentConfig`] is built by merging user overrides over one of the
//! style presets in the default catalog. Nothing in this module fails:
//! validation reports problems as messages for template authors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of the cover story, in characters
pub const COVER_STORY_MAX_CHARS: usize = 200;

/// Complexity above which a page should switch from auto-scroll to swipe
pub const SWIPE_COMPLEXITY_THRESHOLD: u32 = 6;

const SENTENCE_ENDINGS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

/// Narrative text bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub love_story: Option<LoveStory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wedding_expectation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_thank_you: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_sections: Option<Vec<CustomSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ContentStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoveStory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dating: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Vec<CustomSection>>,
}

/// A titled group of paragraphs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSection {
    pub title: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// Narrative style presets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStyle {
    #[default]
    Romantic,
    Modern,
    Traditional,
    Casual,
}

impl ContentStyle {
    pub const ALL: [ContentStyle; 4] = [
        ContentStyle::Romantic,
        ContentStyle::Modern,
        ContentStyle::Traditional,
        ContentStyle::Casual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStyle::Romantic => "romantic",
            ContentStyle::Modern => "modern",
            ContentStyle::Traditional => "traditional",
            ContentStyle::Casual => "casual",
        }
    }
}

impl fmt::Display for ContentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown content style: {s}"))
    }
}

/// What a presentation component needs from the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A single cover paragraph
    Cover,
    /// The full love story with the narrative around it
    Story,
    /// A reduced subset for gallery cards
    Card,
    /// Everything in the catalog entry
    Full,
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cover" => Ok(ContentKind::Cover),
            "story" | "narrative" => Ok(ContentKind::Story),
            "card" | "gallery" => Ok(ContentKind::Card),
            "full" => Ok(ContentKind::Full),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

/// Interaction mode suggested by the amount of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionMode {
    AutoScroll,
    Swipe,
}

impl InteractionMode {
    pub fn for_complexity(score: u32) -> Self {
        if score > SWIPE_COMPLEXITY_THRESHOLD {
            InteractionMode::Swipe
        } else {
            InteractionMode::AutoScroll
        }
    }

    pub fn for_content(content: &ContentConfig) -> Self {
        Self::for_complexity(content_complexity(content))
    }
}

/// Outcome of [`validate_content`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

struct Preset {
    cover: &'static str,
    meeting: &'static [&'static str],
    dating: &'static [&'static str],
    proposal: &'static [&'static str],
    expectation: &'static str,
    thank_you: &'static str,
    closing_title: &'static str,
    closing: &'static [&'static str],
}

fn preset(style: ContentStyle) -> &'static Preset {
    match style {
        ContentStyle::Romantic => &ROMANTIC,
        ContentStyle::Modern => &MODERN,
        ContentStyle::Traditional => &TRADITIONAL,
        ContentStyle::Casual => &CASUAL,
    }
}

static ROMANTIC: Preset = Preset {
    cover: "Two hearts, one promise. We would love for you to share the day we say forever.",
    meeting: &[
        "We met on an ordinary afternoon that quietly became the most important day of our lives.",
        "A shared umbrella in the rain turned into a conversation neither of us wanted to end.",
    ],
    dating: &[
        "Every season since has been filled with small adventures and long talks under the stars.",
        "We learned that love is found in the little things we do for each other every day.",
    ],
    proposal: &[
        "Under the soft glow of the evening lights, one question was asked and one answer was given.",
        "It was yes, with tears, laughter and a promise to keep choosing each other.",
    ],
    expectation: "We cannot wait to celebrate with the people who made our story so beautiful.",
    thank_you: "Thank you for your love and blessings. Your presence is the greatest gift.",
    closing_title: "Forever Begins",
    closing: &["This is not the end of our story, only the first page of a new chapter."],
};

static MODERN: Preset = Preset {
    cover: "We're getting married. Save the date and join us for the celebration.",
    meeting: &["We met through friends and instantly found we had too much in common."],
    dating: &[
        "Weekend trips, late-night food runs and one very stubborn houseplant later, we knew.",
    ],
    proposal: &["One simple question on a rooftop at sunset. The answer was an easy yes."],
    expectation: "Good food, great music and the people we love most in one room.",
    thank_you: "Thanks for being part of our story. See you on the dance floor.",
    closing_title: "What's Next",
    closing: &["A new city, a new home and a lifetime of plans we are excited to make together."],
};

static TRADITIONAL: Preset = Preset {
    cover: "With joy in our hearts and the blessing of our families, we invite you to our wedding.",
    meeting: &[
        "Our families introduced us, and from our first meeting we felt a deep sense of respect.",
    ],
    dating: &[
        "Through the years we grew together, learning patience, kindness and devotion.",
        "Our parents' wisdom guided us as we built a foundation of trust.",
    ],
    proposal: &[
        "With the blessing of both families, we promised to walk the rest of our lives together.",
    ],
    expectation: "We humbly request the honour of your presence as we exchange our vows.",
    thank_you: "We are deeply grateful for your kindness and your blessings upon our union.",
    closing_title: "Gratitude",
    closing: &["To our parents, who taught us what it means to love and to be loved."],
};

static CASUAL: Preset = Preset {
    cover: "We said yes! Come hang out with us and celebrate.",
    meeting: &["We met at a party and spent the whole night arguing about the best pizza topping."],
    dating: &["Road trips, board games and way too many movie nights followed."],
    proposal: &["There was a hike, a view and a ring hidden in a snack bag."],
    expectation: "Come as you are and bring your best dance moves.",
    thank_you: "Thanks for making time for us. It would not be a party without you.",
    closing_title: "PS",
    closing: &["There will be cake. A lot of cake."],
};

fn lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// Default content for a presentation component, trimmed to what `kind` uses.
pub fn default_content(kind: ContentKind, style: ContentStyle) -> ContentConfig {
    let preset = preset(style);

    match kind {
        ContentKind::Cover => ContentConfig {
            cover_story: Some(preset.cover.to_string()),
            style: Some(style),
            ..Default::default()
        },
        ContentKind::Card => ContentConfig {
            cover_story: Some(preset.cover.to_string()),
            guest_thank_you: Some(preset.thank_you.to_string()),
            style: Some(style),
            ..Default::default()
        },
        ContentKind::Story => ContentConfig {
            cover_story: Some(preset.cover.to_string()),
            love_story: Some(LoveStory {
                meeting: Some(lines(preset.meeting)),
                dating: Some(lines(preset.dating)),
                proposal: Some(lines(preset.proposal)),
                custom: None,
            }),
            wedding_expectation: Some(preset.expectation.to_string()),
            guest_thank_you: Some(preset.thank_you.to_string()),
            custom_sections: None,
            style: Some(style),
        },
        ContentKind::Full => ContentConfig {
            custom_sections: Some(vec![CustomSection {
                title: preset.closing_title.to_string(),
                paragraphs: lines(preset.closing),
            }]),
            ..default_content(ContentKind::Story, style)
        },
    }
}

/// Merge `overrides` over `defaults`.
///
/// Top-level fields are replaced wholesale, except `loveStory` whose
/// sub-stories are overridden one by one.
pub fn merge_content(defaults: &ContentConfig, overrides: &ContentConfig) -> ContentConfig {
    let love_story = match (&defaults.love_story, &overrides.love_story) {
        (Some(base), Some(over)) => Some(LoveStory {
            meeting: over.meeting.clone().or_else(|| base.meeting.clone()),
            dating: over.dating.clone().or_else(|| base.dating.clone()),
            proposal: over.proposal.clone().or_else(|| base.proposal.clone()),
            custom: over.custom.clone().or_else(|| base.custom.clone()),
        }),
        (base, over) => over.clone().or_else(|| base.clone()),
    };

    ContentConfig {
        cover_story: pick(&defaults.cover_story, &overrides.cover_story),
        love_story,
        wedding_expectation: pick(&defaults.wedding_expectation, &overrides.wedding_expectation),
        guest_thank_you: pick(&defaults.guest_thank_you, &overrides.guest_thank_you),
        custom_sections: pick(&defaults.custom_sections, &overrides.custom_sections),
        style: overrides.style.or(defaults.style),
    }
}

fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
    over.clone().or_else(|| base.clone())
}

/// Check the content for structural completeness
pub fn validate_content(content: &ContentConfig) -> ContentValidation {
    let mut errors = Vec::new();

    match content.cover_story.as_deref() {
        Some(cover) if !cover.trim().is_empty() => {
            let count = cover.chars().count();
            if count > COVER_STORY_MAX_CHARS {
                errors.push(format!(
                    "coverStory must be at most {COVER_STORY_MAX_CHARS} characters (got {count})"
                ));
            }
        }
        _ => errors.push("coverStory must not be empty".to_string()),
    }

    if let Some(story) = &content.love_story {
        for (name, paragraphs) in [
            ("meeting", &story.meeting),
            ("dating", &story.dating),
            ("proposal", &story.proposal),
        ] {
            if matches!(paragraphs, Some(list) if list.is_empty()) {
                errors.push(format!("loveStory.{name} must contain at least one paragraph"));
            }
        }
    }

    ContentValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Heuristic size of the content. More content never lowers the score.
pub fn content_complexity(content: &ContentConfig) -> u32 {
    let count = |paragraphs: &Option<Vec<String>>| paragraphs.as_ref().map_or(0, Vec::len);
    let sections = |sections: &Option<Vec<CustomSection>>| {
        sections
            .iter()
            .flatten()
            .map(|section| section.paragraphs.len())
            .sum::<usize>()
    };

    let mut score = 0;
    score += usize::from(content.cover_story.is_some());
    if let Some(story) = &content.love_story {
        score += count(&story.meeting) + count(&story.dating) + count(&story.proposal);
        score += sections(&story.custom);
    }
    score += usize::from(content.wedding_expectation.is_some());
    score += usize::from(content.guest_thank_you.is_some());
    score += sections(&content.custom_sections);

    u32::try_from(score).unwrap_or(u32::MAX)
}

/// Flatten the content into paragraphs in reading order
pub fn generate_paragraphs(content: &ContentConfig) -> Vec<String> {
    let mut paragraphs = Vec::new();
    paragraphs.extend(content.cover_story.clone());
    if let Some(story) = &content.love_story {
        for part in [&story.meeting, &story.dating, &story.proposal] {
            paragraphs.extend(part.iter().flatten().cloned());
        }
    }
    paragraphs.extend(content.wedding_expectation.clone());
    paragraphs.extend(content.guest_thank_you.clone());
    paragraphs
}

/// Normalize whitespace and make sure the text ends like a sentence
pub fn format_content(text: &str) -> String {
    let mut formatted = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match formatted.chars().last() {
        None => {}
        Some(last) if SENTENCE_ENDINGS.contains(&last) => {}
        Some(last) if is_cjk(last) => formatted.push('。'),
        Some(_) => formatted.push('.'),
    }
    formatted
}

fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30ff}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{f900}'..='\u{faff}'
            | '\u{ac00}'..='\u{d7af}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        lines(items)
    }

    #[test]
    fn test_default_content_cover() {
        let content = default_content(ContentKind::Cover, ContentStyle::Modern);
        assert!(content.cover_story.is_some());
        assert!(content.love_story.is_none());
        assert!(content.guest_thank_you.is_none());
        assert_eq!(content.style, Some(ContentStyle::Modern));
    }

    #[test]
    fn test_default_content_story_and_card() {
        let story = default_content(ContentKind::Story, ContentStyle::Romantic);
        let love = story.love_story.as_ref().unwrap();
        assert!(love.meeting.is_some() && love.dating.is_some() && love.proposal.is_some());
        assert!(story.wedding_expectation.is_some());

        let card = default_content(ContentKind::Card, ContentStyle::Casual);
        assert!(card.cover_story.is_some());
        assert!(card.guest_thank_you.is_some());
        assert!(card.love_story.is_none());
    }

    #[test]
    fn test_default_content_full_keeps_style() {
        for style in ContentStyle::ALL {
            let full = default_content(ContentKind::Full, style);
            assert_eq!(full.style, Some(style));
            assert!(full.custom_sections.is_some());
            assert!(validate_content(&full).valid, "{style} preset should be valid");
        }
    }

    #[test]
    fn test_default_content_is_deterministic() {
        assert_eq!(
            default_content(ContentKind::Story, ContentStyle::Traditional),
            default_content(ContentKind::Story, ContentStyle::Traditional)
        );
    }

    #[test]
    fn test_merge_is_non_destructive() {
        let defaults = ContentConfig {
            cover_story: Some("X".to_string()),
            love_story: Some(LoveStory {
                meeting: Some(strings(&["m1"])),
                dating: Some(strings(&["d1"])),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overrides = ContentConfig {
            love_story: Some(LoveStory {
                meeting: Some(strings(&["m2"])),
                ..Default::default()
            }),
            ..Default::default()
        };
        let (defaults_before, overrides_before) = (defaults.clone(), overrides.clone());

        let merged = merge_content(&defaults, &overrides);
        let love = merged.love_story.unwrap();
        assert_eq!(love.dating, Some(strings(&["d1"])));
        assert_eq!(love.meeting, Some(strings(&["m2"])));
        assert_eq!(merged.cover_story.as_deref(), Some("X"));
        assert_eq!(defaults, defaults_before);
        assert_eq!(overrides, overrides_before);
    }

    #[test]
    fn test_merge_top_level_is_shallow() {
        let defaults = ContentConfig {
            custom_sections: Some(vec![CustomSection {
                title: "A".to_string(),
                paragraphs: strings(&["a"]),
            }]),
            style: Some(ContentStyle::Romantic),
            ..Default::default()
        };
        let overrides = ContentConfig {
            custom_sections: Some(vec![]),
            style: Some(ContentStyle::Casual),
            ..Default::default()
        };
        let merged = merge_content(&defaults, &overrides);
        assert_eq!(merged.custom_sections, Some(vec![]));
        assert_eq!(merged.style, Some(ContentStyle::Casual));
    }

    #[test]
    fn test_merge_love_story_only_on_one_side() {
        let defaults = default_content(ContentKind::Story, ContentStyle::Modern);
        let merged = merge_content(&defaults, &ContentConfig::default());
        assert_eq!(merged, defaults);

        let merged = merge_content(&ContentConfig::default(), &defaults);
        assert_eq!(merged, defaults);
    }

    #[test]
    fn test_validation_boundary() {
        let content = |len: usize| ContentConfig {
            cover_story: Some("a".repeat(len)),
            ..Default::default()
        };
        assert!(validate_content(&content(200)).valid);
        let result = validate_content(&content(201));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_validation_counts_characters_not_bytes() {
        let content = ContentConfig {
            cover_story: Some("爱".repeat(200)),
            ..Default::default()
        };
        assert!(validate_content(&content).valid);
    }

    #[test]
    fn test_validation_empty_cover_and_love_story() {
        let content = ContentConfig {
            cover_story: Some("  ".to_string()),
            love_story: Some(LoveStory {
                meeting: Some(vec![]),
                dating: None,
                proposal: Some(strings(&["p"])),
                custom: None,
            }),
            ..Default::default()
        };
        let result = validate_content(&content);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "coverStory must not be empty".to_string(),
                "loveStory.meeting must contain at least one paragraph".to_string(),
            ]
        );
    }

    #[test]
    fn test_complexity() {
        let content = ContentConfig {
            cover_story: Some("c".to_string()),
            love_story: Some(LoveStory {
                meeting: Some(strings(&["m1", "m2"])),
                dating: Some(strings(&["d1"])),
                proposal: None,
                custom: Some(vec![CustomSection {
                    title: "t".to_string(),
                    paragraphs: strings(&["x", "y"]),
                }]),
            }),
            wedding_expectation: Some("e".to_string()),
            guest_thank_you: Some("g".to_string()),
            custom_sections: Some(vec![CustomSection {
                title: "s".to_string(),
                paragraphs: strings(&["s1", "s2", "s3"]),
            }]),
            style: None,
        };
        assert_eq!(content_complexity(&content), 1 + 2 + 1 + 2 + 1 + 1 + 3);
        assert_eq!(content_complexity(&ContentConfig::default()), 0);
    }

    #[test]
    fn test_complexity_is_monotone() {
        let mut content = default_content(ContentKind::Cover, ContentStyle::Romantic);
        let before = content_complexity(&content);
        content.guest_thank_you = Some("thanks".to_string());
        assert!(content_complexity(&content) >= before);
    }

    #[test]
    fn test_interaction_mode() {
        assert_eq!(InteractionMode::for_complexity(0), InteractionMode::AutoScroll);
        assert_eq!(InteractionMode::for_complexity(6), InteractionMode::AutoScroll);
        assert_eq!(InteractionMode::for_complexity(7), InteractionMode::Swipe);
        let full = default_content(ContentKind::Full, ContentStyle::Romantic);
        assert_eq!(InteractionMode::for_content(&full), InteractionMode::Swipe);
    }

    #[test]
    fn test_generate_paragraphs_order() {
        let content = ContentConfig {
            cover_story: Some("cover".to_string()),
            love_story: Some(LoveStory {
                meeting: Some(strings(&["m1", "m2"])),
                dating: Some(strings(&["d1"])),
                proposal: Some(strings(&["p1"])),
                custom: None,
            }),
            wedding_expectation: Some("expect".to_string()),
            guest_thank_you: Some("thanks".to_string()),
            custom_sections: None,
            style: None,
        };
        assert_eq!(
            generate_paragraphs(&content),
            strings(&["cover", "m1", "m2", "d1", "p1", "expect", "thanks"])
        );
    }

    #[test]
    fn test_generate_paragraphs_skips_absent() {
        let content = ContentConfig {
            love_story: Some(LoveStory {
                dating: Some(strings(&["d1"])),
                ..Default::default()
            }),
            guest_thank_you: Some("thanks".to_string()),
            ..Default::default()
        };
        assert_eq!(generate_paragraphs(&content), strings(&["d1", "thanks"]));
    }

    #[test]
    fn test_format_content() {
        assert_eq!(format_content("  hello   world  "), "hello world.");
        assert_eq!(format_content("done!"), "done!");
        assert_eq!(format_content("really?"), "really?");
        assert_eq!(format_content("我们结婚啦"), "我们结婚啦。");
        assert_eq!(format_content("欢迎光临！"), "欢迎光临！");
        assert_eq!(format_content("a\n\tb."), "a b.");
        assert_eq!(format_content("   "), "");
    }

    #[test]
    fn test_content_config_json_shape() {
        let json = serde_json::json!({
            "coverStory": "c",
            "loveStory": {"meeting": ["m"]},
            "style": "traditional"
        });
        let content: ContentConfig = serde_json::from_value(json).unwrap();
        assert_eq!(content.style, Some(ContentStyle::Traditional));
        assert_eq!(
            content.love_story.unwrap().meeting,
            Some(strings(&["m"]))
        );
    }
}
