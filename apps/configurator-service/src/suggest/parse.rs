//! Extraction of the structured reply from generator output.

use crate::models::SuggestionReply;

/// Why a generator reply could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ReplyParseError {
    /// No `{ ... }` object in the text.
    #[error("no JSON object found in reply")]
    NoJsonObject,

    /// The object did not match the expected shape.
    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse a generator reply into a [`SuggestionReply`].
///
/// Markdown code fences are removed and the text between the first `{` and
/// the last `}` is deserialized.
///
/// # Errors
///
/// Returns [`ReplyParseError`] when no object is present or it is malformed.
pub fn parse_reply(text: &str) -> Result<SuggestionReply, ReplyParseError> {
    let cleaned = text.trim().replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) else {
        return Err(ReplyParseError::NoJsonObject);
    };
    if end < start {
        return Err(ReplyParseError::NoJsonObject);
    }

    Ok(serde_json::from_str(&cleaned[start..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"{
        "recommended_config": {
            "engine": "B58_3_0T",
            "drivetrain": "xDrive",
            "exterior_color": "Mineral_White",
            "interior": "Vernasca_Cognac",
            "packages": ["Premium_Package"],
            "individual_options": []
        },
        "reasoning": {"overall": "Balanced"},
        "alternatives": {"budget_option": "B48 engine"},
        "warnings": ["Larger wheels ride firmer"]
    }"#;

    #[test]
    fn plain_json() {
        let reply = parse_reply(REPLY).unwrap();
        assert_eq!(reply.recommended_config.engine.as_deref(), Some("B58_3_0T"));
        assert_eq!(reply.reasoning["overall"], "Balanced");
        assert_eq!(reply.warnings.len(), 1);
    }

    #[test]
    fn fenced_json_with_chatter() {
        let text = format!("Here is my recommendation:\n```json\n{REPLY}\n```\nEnjoy!");
        let reply = parse_reply(&text).unwrap();
        assert_eq!(reply.recommended_config.packages, vec!["Premium_Package"]);
    }

    #[test]
    fn prose_without_object() {
        assert!(matches!(
            parse_reply("I recommend the B58 engine."),
            Err(ReplyParseError::NoJsonObject)
        ));
    }

    #[test]
    fn braces_in_wrong_order() {
        assert!(matches!(parse_reply("} nope {"), Err(ReplyParseError::NoJsonObject)));
    }

    #[test]
    fn object_of_wrong_shape() {
        assert!(matches!(
            parse_reply(r#"{"recommendation": "text only"}"#),
            Err(ReplyParseError::Malformed(_))
        ));
    }
}
