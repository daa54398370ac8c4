//! Prompt construction for the text generator.
//!
//! There is one suggestion prompt. It lists every option by code so the reply
//! can be fed straight back into the validator and calculator.

use std::fmt::Write as _;

use crate::models::{
    CatalogItem, Configuration, ConstraintSet, Model, OptionSet, PreferenceAnalysis,
};

/// Everything the suggestion prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    /// Catalog entry of the model being configured.
    pub model: &'a Model,
    /// Customer's free-text preferences.
    pub preferences: &'a str,
    /// Themes detected in the preferences.
    pub analysis: &'a PreferenceAnalysis,
    /// Options offered on the model.
    pub options: &'a OptionSet,
    /// Model guidance lines.
    pub recommendations: &'a [String],
    /// Configuration the customer already has.
    pub current: &'a Configuration,
}

/// Human-readable summary of the compatibility tables.
#[must_use]
pub fn format_constraints(constraints: &ConstraintSet) -> String {
    let mut sections = Vec::new();

    if !constraints.engine_drivetrain.is_empty() {
        let mut s = String::from("Engine/Drivetrain Compatibility:");
        for (engine, drivetrains) in &constraints.engine_drivetrain {
            let _ = write!(s, "\n  - {engine}: {}", drivetrains.join(", "));
        }
        sections.push(s);
    }

    if !constraints.package_dependencies.is_empty() {
        let mut s = String::from("Package Dependencies:");
        for (package, deps) in &constraints.package_dependencies {
            let _ = write!(s, "\n  - {package} requires: {}", deps.join(", "));
        }
        sections.push(s);
    }

    if !constraints.incompatible_options.is_empty() {
        let mut s = String::from("Incompatible Options:");
        for group in &constraints.incompatible_options {
            let _ = write!(
                s,
                "\n  - Cannot combine: {} ({})",
                group.options.join(", "),
                group.reason
            );
        }
        sections.push(s);
    }

    if sections.is_empty() {
        "No specific constraints to consider.".to_string()
    } else {
        sections.join("\n\n")
    }
}

fn option_lines<T: CatalogItem>(items: &[T], empty: &str) -> String {
    if items.is_empty() {
        return format!("- {empty}");
    }
    items
        .iter()
        .map(|i| format!("- \"{}\": {} (+{})", i.code(), i.name(), i.price()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the suggestion prompt.
#[must_use]
pub fn build_prompt(ctx: &PromptContext<'_>) -> String {
    let model = ctx.model;
    let perf = &model.performance;
    let fuel = &model.fuel_economy;
    let a = ctx.analysis;
    let current =
        serde_json::to_string(ctx.current).unwrap_or_else(|_| "{}".to_string());
    let recommendations = if ctx.recommendations.is_empty() {
        "Standard configuration recommendations apply.".to_string()
    } else {
        ctx.recommendations
            .iter()
            .map(|r| format!("- {r}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are a BMW expert consultant helping a customer configure their {name}.

CUSTOMER PREFERENCES: "{preferences}"

MODEL INFORMATION:
- Model: {code}
- Base Price: {base_price}
- Category: {category}
- Body Style: {body_style}
- Performance: 0-60 {accel}, top speed {top_speed}, {power}, {torque}
- Fuel Economy: {city} city / {highway} highway / {combined} combined

PREFERENCE ANALYSIS:
- Budget Focus: {budget}
- Performance Focus: {performance}
- Luxury Focus: {luxury}
- Technology Focus: {tech}
- Family Focus: {family}
- Eco Focus: {eco}

AVAILABLE OPTIONS WITH PRICING:

ENGINES:
{engines}

DRIVETRAINS:
{drivetrains}

EXTERIOR COLORS:
{colors}

WHEELS:
{wheels}

INTERIOR OPTIONS:
{interiors}

PACKAGES:
{packages}

INDIVIDUAL OPTIONS:
{individual}

CONSTRAINTS AND DEPENDENCIES:
{constraints}

MODEL-SPECIFIC RECOMMENDATIONS:
{recommendations}

CURRENT CONFIGURATION: {current}

Based on the customer preferences, model characteristics, available options, and constraints, please provide a detailed configuration recommendation.

Respond with ONLY a JSON object in this exact format:
{{
    "recommended_config": {{
        "engine": "engine_code",
        "drivetrain": "drivetrain_code",
        "exterior_color": "color_code",
        "interior": "interior_code",
        "wheels": "wheel_code",
        "packages": ["package_code1", "package_code2"],
        "individual_options": ["option_code1", "option_code2"]
    }},
    "reasoning": {{
        "engine": "Why this engine matches customer needs and preferences",
        "drivetrain": "Why this drivetrain is recommended based on preferences",
        "color": "Color recommendation reasoning based on preferences",
        "interior": "Interior choice reasoning",
        "packages": "Package recommendations and value explanation",
        "overall": "Overall configuration summary and benefits"
    }},
    "alternatives": {{
        "budget_option": "Lower cost alternative configuration",
        "performance_option": "Performance-focused alternative",
        "luxury_option": "Luxury-focused alternative"
    }},
    "warnings": [
        "Important considerations or trade-offs to be aware of"
    ]
}}

CRITICAL REQUIREMENTS:
1. Use ONLY the exact codes (in quotes) listed above - do not modify or abbreviate them
2. Respect every constraint and dependency listed above
3. Response must be valid JSON only
4. If an option is not available, use null instead of making up codes"#,
        name = model.name,
        preferences = ctx.preferences,
        code = model.code,
        base_price = model.base_price,
        category = model.category,
        body_style = model.body_style,
        accel = perf.acceleration,
        top_speed = perf.top_speed,
        power = perf.power,
        torque = perf.torque,
        city = fuel.city,
        highway = fuel.highway,
        combined = fuel.combined,
        budget = a.budget_conscious,
        performance = a.performance_oriented,
        luxury = a.luxury_oriented,
        tech = a.tech_savvy,
        family = a.family_oriented,
        eco = a.eco_conscious,
        engines = option_lines(&ctx.options.engines, "No engine options available"),
        drivetrains = option_lines(&ctx.options.drivetrains, "No drivetrain options available"),
        colors = option_lines(&ctx.options.exterior_colors, "No color options available"),
        wheels = option_lines(&ctx.options.wheels, "No wheel options available"),
        interiors = option_lines(&ctx.options.interiors, "No interior options available"),
        packages = option_lines(&ctx.options.packages, "No packages available"),
        individual = option_lines(
            &ctx.options.individual_options,
            "No individual options available"
        ),
        constraints = format_constraints(&ctx.options.constraints),
    )
}

/// Build the narrative prompt for comparing two configurations of a model.
#[must_use]
pub fn build_compare_prompt(model: &str, first: &Configuration, second: &Configuration) -> String {
    let render =
        |c: &Configuration| serde_json::to_string_pretty(c).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Compare these two BMW {model} configurations and provide insights:

Configuration 1: {first}
Configuration 2: {second}

Provide a detailed comparison including:
1. Performance differences
2. Value for money
3. Luxury and comfort features
4. Technology differences
5. Overall recommendation

Format your response in a clear, structured way.",
        first = render(first),
        second = render(second),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::suggest::{analyze_preferences, model_recommendations};

    #[test]
    fn constraints_are_sectioned() {
        let catalog = Catalog::embedded().unwrap();
        let text = format_constraints(&catalog.get_constraints("X3"));

        assert!(text.starts_with("Engine/Drivetrain Compatibility:"));
        assert!(text.contains("\n\nPackage Dependencies:"));
        assert!(text.contains("\n\nIncompatible Options:"));
        assert!(text.contains("  - N63_4_4T_V8: xDrive"));
        assert!(text.contains("Cannot combine: "));
    }

    #[test]
    fn empty_constraints_have_placeholder() {
        assert_eq!(
            format_constraints(&ConstraintSet::default()),
            "No specific constraints to consider."
        );
    }

    #[test]
    fn prompt_lists_codes_and_preferences() {
        let catalog = Catalog::embedded().unwrap();
        let model = catalog.get_model("X3").unwrap();
        let options = catalog.get_options_for_model("X3");
        let analysis = analyze_preferences("family trips, good mpg");
        let recommendations = model_recommendations(model);
        let current = Configuration::new().with("engine", "B58_3_0T");

        let prompt = build_prompt(&PromptContext {
            model,
            preferences: "family trips, good mpg",
            analysis: &analysis,
            options: &options,
            recommendations: &recommendations,
            current: &current,
        });

        assert!(prompt.contains("CUSTOMER PREFERENCES: \"family trips, good mpg\""));
        assert!(prompt.contains("- Family Focus: true"));
        assert!(prompt.contains("- Luxury Focus: false"));
        assert!(prompt.contains("\"xDrive\""));
        assert!(prompt.contains("Sweet spot for M Sport Package"));
        assert!(prompt.contains(r#"CURRENT CONFIGURATION: {"engine":"B58_3_0T"}"#));
        assert!(prompt.contains("\"recommended_config\": {"));
    }

    #[test]
    fn compare_prompt_embeds_both_configurations() {
        let a = Configuration::new().with("Premium_Package", true);
        let b = Configuration::new().with("M_Sport_Package", true);
        let prompt = build_compare_prompt("X5", &a, &b);
        assert!(prompt.starts_with("Compare these two BMW X5 configurations"));
        assert!(prompt.contains("\"Premium_Package\": true"));
        assert!(prompt.contains("\"M_Sport_Package\": true"));
    }
}
