//! Static tool registry: the build-time-known slugs, their SEO copy,
//! default parameters, and UI hints. Looked up by the page handlers and
//! by the edge worker's fallback config builder; never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::json;

use crate::models::{
    CharsetKind, GeneratorMode, GeneratorParams, KeywordRecord, PoolSpec, TemplateRecord,
    ToolConfig, ToolUi,
};

fn ui(result_type: &'static str, button_text: &'static str) -> ToolUi {
    ToolUi {
        show_inputs: true,
        result_type,
        button_text,
        icon: None,
    }
}

static TOOLS: LazyLock<Vec<ToolConfig>> = LazyLock::new(|| {
    vec![
        ToolConfig {
            slug: "random-number-generator",
            title: "Random Number Generator",
            seo_title: "Random Number Generator - Pick a Number",
            description: "Generate random numbers in any range with optional step, precision and no-repeat mode.",
            mode: GeneratorMode::Range,
            params: GeneratorParams {
                min: Some(1.0),
                max: Some(100.0),
                count: Some(1),
                ..Default::default()
            },
            ui: ui("number", "Generate"),
            keywords: &["random number", "number picker", "rng"],
            priority: 1.0,
            category: "numbers",
            faq: &[
                (
                    "Is the result truly random?",
                    "Numbers come from a cryptographically secure random source, so every value in the range is equally likely.",
                ),
                (
                    "Can I avoid repeats?",
                    "Yes, enable the unique option to draw without replacement until the range is exhausted.",
                ),
            ],
        },
        ToolConfig {
            slug: "powerball-number-generator",
            title: "Powerball Number Generator",
            seo_title: "Powerball Number Generator - Quick Pick",
            description: "Quick-pick five white balls from 1-69 and a Powerball from 1-26.",
            mode: GeneratorMode::Lottery,
            params: GeneratorParams {
                pool_a: Some(PoolSpec { min: 1, max: 69, pick: 5 }),
                pool_b: Some(PoolSpec { min: 1, max: 26, pick: 1 }),
                ..Default::default()
            },
            ui: ui("lottery", "Quick Pick"),
            keywords: &["powerball", "lottery numbers", "quick pick"],
            priority: 0.9,
            category: "lottery",
            faq: &[(
                "Do generated numbers improve my odds?",
                "No. Every combination is equally likely; a quick pick just saves you choosing.",
            )],
        },
        ToolConfig {
            slug: "mega-millions-number-generator",
            title: "Mega Millions Number Generator",
            seo_title: "Mega Millions Number Generator - Quick Pick",
            description: "Quick-pick five numbers from 1-70 and a Mega Ball from 1-25.",
            mode: GeneratorMode::Lottery,
            params: GeneratorParams {
                pool_a: Some(PoolSpec { min: 1, max: 70, pick: 5 }),
                pool_b: Some(PoolSpec { min: 1, max: 25, pick: 1 }),
                ..Default::default()
            },
            ui: ui("lottery", "Quick Pick"),
            keywords: &["mega millions", "lottery numbers"],
            priority: 0.9,
            category: "lottery",
            faq: &[],
        },
        ToolConfig {
            slug: "password-generator",
            title: "Password Generator",
            seo_title: "Strong Random Password Generator",
            description: "Create strong random passwords with symbols, digits and mixed case, generated locally.",
            mode: GeneratorMode::Password,
            params: GeneratorParams {
                length: Some(16),
                charset: Some(CharsetKind::Strong),
                ensure_each: Some(true),
                ..Default::default()
            },
            ui: ui("password", "Generate Password"),
            keywords: &["password generator", "strong password"],
            priority: 0.9,
            category: "security",
            faq: &[(
                "Are generated passwords sent anywhere?",
                "No. Passwords are produced by the generator engine and never persisted or logged.",
            )],
        },
        ToolConfig {
            slug: "pin-generator",
            title: "PIN Generator",
            seo_title: "Random PIN Code Generator",
            description: "Generate random numeric PIN codes of any length.",
            mode: GeneratorMode::Password,
            params: GeneratorParams {
                length: Some(4),
                charset: Some(CharsetKind::Numeric),
                ..Default::default()
            },
            ui: ui("password", "Generate PIN"),
            keywords: &["pin generator", "pin code"],
            priority: 0.7,
            category: "security",
            faq: &[],
        },
        ToolConfig {
            slug: "dice-roller",
            title: "Dice Roller",
            seo_title: "Online Dice Roller - Roll Virtual Dice",
            description: "Roll any number of virtual dice with 2 to 1000 sides, with advantage and custom faces.",
            mode: GeneratorMode::Dice,
            params: GeneratorParams {
                dice_count: Some(2),
                dice_sides: Some(6),
                ..Default::default()
            },
            ui: ui("dice", "Roll"),
            keywords: &["dice roller", "roll dice", "d20"],
            priority: 0.8,
            category: "games",
            faq: &[],
        },
        ToolConfig {
            slug: "coin-flipper",
            title: "Coin Flipper",
            seo_title: "Flip a Coin Online - Heads or Tails",
            description: "Flip one or many fair coins, with custom labels for each side.",
            mode: GeneratorMode::Coin,
            params: GeneratorParams {
                count: Some(1),
                ..Default::default()
            },
            ui: ui("coin", "Flip"),
            keywords: &["coin flip", "heads or tails"],
            priority: 0.8,
            category: "games",
            faq: &[],
        },
        ToolConfig {
            slug: "list-randomizer",
            title: "List Randomizer",
            seo_title: "List Randomizer - Shuffle Any List",
            description: "Shuffle a list into random order, optionally splitting it into equal groups.",
            mode: GeneratorMode::Shuffle,
            params: GeneratorParams::default(),
            ui: ui("list", "Shuffle"),
            keywords: &["list randomizer", "random order", "group maker"],
            priority: 0.8,
            category: "lists",
            faq: &[],
        },
        ToolConfig {
            slug: "random-picker",
            title: "Random Picker",
            seo_title: "Random Picker - Choose From a List",
            description: "Pick one or more entries from a list, with optional weights and no-repeat draws.",
            mode: GeneratorMode::List,
            params: GeneratorParams {
                count: Some(1),
                ..Default::default()
            },
            ui: ui("list", "Pick"),
            keywords: &["random picker", "name picker", "random choice"],
            priority: 0.8,
            category: "lists",
            faq: &[],
        },
        ToolConfig {
            slug: "raffle-ticket-drawer",
            title: "Raffle Ticket Drawer",
            seo_title: "Raffle Ticket Drawer - Draw Without Repeats",
            description: "Draw raffle tickets one by one; drawn tickets stay out until you reset the pool.",
            mode: GeneratorMode::Ticket,
            params: GeneratorParams {
                count: Some(1),
                ..Default::default()
            },
            ui: ui("list", "Draw"),
            keywords: &["raffle", "ticket draw"],
            priority: 0.6,
            category: "lists",
            faq: &[],
        },
        ToolConfig {
            slug: "prime-number-generator",
            title: "Prime Number Generator",
            seo_title: "Random Prime Number Generator",
            description: "Generate random prime numbers up to a configurable limit.",
            mode: GeneratorMode::Prime,
            params: GeneratorParams {
                prime_max: Some(1000),
                count: Some(1),
                ..Default::default()
            },
            ui: ui("number", "Generate"),
            keywords: &["prime numbers", "random prime"],
            priority: 0.6,
            category: "numbers",
            faq: &[],
        },
        ToolConfig {
            slug: "fraction-generator",
            title: "Random Fraction Generator",
            seo_title: "Random Fraction Generator",
            description: "Generate random fractions, optionally reduced to lowest terms.",
            mode: GeneratorMode::Fraction,
            params: GeneratorParams {
                fraction_max: Some(12),
                count: Some(1),
                simplify: Some(true),
                ..Default::default()
            },
            ui: ui("number", "Generate"),
            keywords: &["random fraction"],
            priority: 0.5,
            category: "numbers",
            faq: &[],
        },
        ToolConfig {
            slug: "roman-numeral-generator",
            title: "Roman Numeral Generator",
            seo_title: "Random Roman Numeral Generator",
            description: "Generate random Roman numerals between I and MMMCMXCIX.",
            mode: GeneratorMode::Roman,
            params: GeneratorParams {
                roman_max: Some(3999),
                count: Some(1),
                ..Default::default()
            },
            ui: ui("number", "Generate"),
            keywords: &["roman numerals"],
            priority: 0.5,
            category: "numbers",
            faq: &[],
        },
    ]
});

static BY_SLUG: LazyLock<HashMap<&'static str, &'static ToolConfig>> =
    LazyLock::new(|| TOOLS.iter().map(|tool| (tool.slug, tool)).collect());

pub fn all() -> &'static [ToolConfig] {
    &TOOLS
}

pub fn lookup(slug: &str) -> Option<&'static ToolConfig> {
    BY_SLUG.get(slug).copied()
}

/// Core slugs are the registry members plus the site root; they are
/// always indexable and bypass edge templating entirely.
pub fn is_core_slug(slug: &str) -> bool {
    slug.is_empty() || BY_SLUG.contains_key(slug)
}

/// Fallback config for a bare `min-max` slug with no backing record.
/// Never indexable: only the store can grant indexing.
pub fn default_range_record(slug: &str, min: i64, max: i64) -> KeywordRecord {
    KeywordRecord {
        id: String::new(),
        slug: slug.to_string(),
        kind: "range".to_string(),
        params: json!({ "min": min, "max": max }),
        allow_indexing: false,
    }
}

/// Built-in SEO templates used when the store has none for a type.
pub fn builtin_template(kind: &str) -> TemplateRecord {
    match kind {
        "range" => TemplateRecord {
            kind: "range".to_string(),
            title_template: "Random Number {{min}}-{{max}} - Number Generator".to_string(),
            meta_desc: "Generate a random number between {{min}} and {{max}}. Free, fast and fair."
                .to_string(),
            content_top: "<h1>Random Number Between {{min}} and {{max}}</h1>".to_string(),
            content_bottom:
                "<p>Every number from {{min}} to {{max}} has an equal chance of being picked.</p>"
                    .to_string(),
        },
        _ => TemplateRecord {
            kind: kind.to_string(),
            title_template: "{{slug}} - Number Generator".to_string(),
            meta_desc: "Free online random generator tools.".to_string(),
            content_top: String::new(),
            content_bottom: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_slug() {
        let tool = lookup("powerball-number-generator").unwrap();
        assert_eq!(tool.mode, GeneratorMode::Lottery);
        assert_eq!(tool.params.pool_a.unwrap().max, 69);
    }

    #[test]
    fn test_slugs_unique() {
        assert_eq!(BY_SLUG.len(), TOOLS.len());
    }

    #[test]
    fn test_core_slug_membership() {
        assert!(is_core_slug(""));
        assert!(is_core_slug("dice-roller"));
        assert!(!is_core_slug("5-10"));
        assert!(!is_core_slug("no-such-tool"));
    }

    #[test]
    fn test_every_mode_has_a_tool() {
        use crate::models::GeneratorMode::*;
        for mode in [
            Range, Lottery, List, Shuffle, Ticket, Password, Dice, Coin, Prime, Fraction, Roman,
        ] {
            assert!(
                TOOLS.iter().any(|t| t.mode == mode),
                "no registry entry for {mode:?}"
            );
        }
    }

    #[test]
    fn test_default_range_record_not_indexable() {
        let record = default_range_record("5-10", 5, 10);
        assert!(!record.allow_indexing);
        assert_eq!(record.kind, "range");
        assert_eq!(record.params["min"], 5);
    }

    #[test]
    fn test_builtin_template_tokens() {
        let template = builtin_template("range");
        assert!(template.title_template.contains("{{min}}"));
        let generic = builtin_template("anything-else");
        assert!(generic.title_template.contains("{{slug}}"));
    }
}
