//! Fixed catalog of upstream models the backend accepts.

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Catalog groups, in display order.
pub const MODEL_CATALOG: &[(&str, &[&str])] = &[
    (
        "recommended",
        &[
            "openai/gpt-oss-20b",
            "llama-3.3-70b-versatile",
            "llama-3.1-8b-instant",
        ],
    ),
    ("reasoning", &["deepseek-r1-distill-llama-70b"]),
    (
        "vision",
        &[
            "llama-3.2-11b-vision-preview",
            "llama-3.2-90b-vision-preview",
        ],
    ),
];

/// Every catalog model, in catalog order, without duplicates.
pub fn all_models() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for (_, models) in MODEL_CATALOG {
        for model in *models {
            if !out.contains(model) {
                out.push(model);
            }
        }
    }
    out
}

/// Whether `model` is part of the catalog.
pub fn validate_model(model: &str) -> bool {
    all_models().contains(&model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_models_ordered() {
        let models = all_models();
        assert_eq!(models.len(), 6);
        assert_eq!(models[0], "openai/gpt-oss-20b");
        assert_eq!(models[5], "llama-3.2-90b-vision-preview");
    }

    #[test]
    fn test_validate_model() {
        assert!(validate_model(DEFAULT_MODEL));
        assert!(validate_model("deepseek-r1-distill-llama-70b"));
        assert!(!validate_model("gpt-4o"));
        assert!(!validate_model(""));
    }
}
