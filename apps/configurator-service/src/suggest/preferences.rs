//! Keyword analysis of free-text preferences and per-model guidance.

use crate::models::{Model, PreferenceAnalysis};

const BUDGET: &[&str] = &[
    "budget", "affordable", "cheap", "economic", "value", "cost", "price", "money", "save",
];
const PERFORMANCE: &[&str] = &[
    "fast",
    "speed",
    "power",
    "sport",
    "performance",
    "acceleration",
    "handling",
    "track",
    "racing",
];
const LUXURY: &[&str] = &[
    "luxury",
    "comfort",
    "premium",
    "elegant",
    "sophisticated",
    "high-end",
    "executive",
    "plush",
];
const TECH: &[&str] = &[
    "technology",
    "tech",
    "gadgets",
    "connectivity",
    "infotainment",
    "digital",
    "smart",
    "connected",
];
const FAMILY: &[&str] = &[
    "family", "kids", "children", "safety", "practical", "spacious", "cargo", "room", "seats",
];
const ECO: &[&str] = &[
    "eco",
    "environment",
    "green",
    "electric",
    "hybrid",
    "fuel",
    "efficiency",
    "mpg",
    "sustainable",
];

/// Detect preference themes by case-insensitive substring match.
#[must_use]
pub fn analyze_preferences(text: &str) -> PreferenceAnalysis {
    let text = text.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    PreferenceAnalysis {
        budget_conscious: mentions(BUDGET),
        performance_oriented: mentions(PERFORMANCE),
        luxury_oriented: mentions(LUXURY),
        tech_savvy: mentions(TECH),
        family_oriented: mentions(FAMILY),
        eco_conscious: mentions(ECO),
    }
}

/// Guidance lines for a model: body category, price band, then a model note.
#[must_use]
pub fn model_recommendations(model: &Model) -> Vec<String> {
    let category = model.category.to_lowercase();
    let mut lines: Vec<&str> = Vec::new();

    if category.contains("suv") {
        lines.extend([
            "Consider xDrive for enhanced traction and capability",
            "Convenience Package adds practical SUV features",
            "Larger wheels (19-20\") complement the SUV stance",
        ]);
    } else if category.contains("sedan") {
        lines.extend([
            "M Sport Package enhances the sedan's sporty character",
            "Premium Package adds executive comfort features",
            "Technology Package essential for business use",
        ]);
    } else if category.contains("electric") {
        lines.extend([
            "Fast charging capability is standard",
            "No exhaust options available (electric vehicle)",
            "Regenerative braking enhances efficiency",
        ]);
    } else if category.contains("m performance") || model.code.starts_with('M') {
        lines.extend([
            "Competition Package recommended for track use",
            "Carbon fiber options reduce weight",
            "Performance tires are essential",
            "Sport exhaust enhances the M experience",
        ]);
    }

    let price = model.base_price.amount();
    if price > rust_decimal::Decimal::from(80_000) {
        lines.extend([
            "Executive Package justifies the premium positioning",
            "Individual options available for personalization",
            "Premium audio systems complement luxury positioning",
        ]);
    } else if price < rust_decimal::Decimal::from(40_000) {
        lines.extend([
            "Focus on essential packages for best value",
            "Technology Package provides modern features",
            "Avoid over-optioning to maintain value proposition",
        ]);
    }

    if let Some(note) = model_note(&model.code) {
        lines.push(note);
    }

    lines.into_iter().map(str::to_string).collect()
}

fn model_note(code: &str) -> Option<&'static str> {
    let note = match code {
        "X1" => "Entry-level SAV benefits from Premium Package for completeness",
        "X3" => "Sweet spot for M Sport Package - enhances handling without compromising comfort",
        "X5" => "Executive Package transforms this into a luxury flagship",
        "3 Series" => "M Sport Package is almost essential for the sporty character",
        "5 Series" => "Executive Package elevates this to true luxury sedan status",
        "7 Series" => "Individual options expected at this price point",
        "M3" => "Competition Package and track-focused options recommended",
        "M5" => "Full M package suite enhances the ultimate performance sedan",
        "i4" => "Technology Package essential for electric vehicle experience",
        "iX" => "Premium Package recommended for flagship electric positioning",
        _ => return None,
    };
    Some(note)
}
