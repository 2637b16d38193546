//! Shared provider catalogue.
//!
//! Single source of truth for the supported model platforms, their API base
//! URLs, and the models a user may pick for each.  Used by the config form,
//! the headless `set` / `models` commands, and client construction.

/// A platform definition with its base URL and selectable models.
#[derive(Debug)]
pub struct ProviderDef {
    /// Name as stored in the config file (e.g. `"DeepSeek"`).
    pub name: &'static str,
    pub base_url: &'static str,
    /// Selectable models, in display order.  The first entry is the default
    /// whenever the platform changes.
    pub models: &'static [&'static str],
}

pub const PROVIDERS: &[ProviderDef] = &[
    ProviderDef {
        name: "DeepSeek",
        base_url: "https://api.deepseek.com",
        models: &["deepseek-model-1", "deepseek-model-2"],
    },
    ProviderDef {
        name: "ZhiPuAI",
        base_url: "https://open.bigmodel.cn/api/paas/v4",
        models: &["zhipuai-model-1", "zhipuai-model-2"],
    },
    ProviderDef {
        name: "OpenAI",
        base_url: "https://api.openai.com/v1",
        models: &["gpt-3.5-turbo", "gpt-4"],
    },
];

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Look up a provider by its exact name.
pub fn provider_by_name(name: &str) -> Option<&'static ProviderDef> {
    PROVIDERS.iter().find(|p| p.name == name)
}

/// Return all platform names in catalogue order.
pub fn platform_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.name).collect()
}

/// Return the models for the given platform, or an empty slice when the
/// platform is unknown (including the empty string).
pub fn models_for(platform: &str) -> &'static [&'static str] {
    provider_by_name(platform).map(|p| p.models).unwrap_or(&[])
}

/// Return the base URL for the given platform.
pub fn base_url_for(platform: &str) -> Option<&'static str> {
    provider_by_name(platform).map(|p| p.base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_has_models() {
        for name in platform_names() {
            assert!(!models_for(name).is_empty(), "{name} has no models");
        }
    }

    #[test]
    fn test_models_keep_catalogue_order() {
        assert_eq!(models_for("DeepSeek"), &["deepseek-model-1", "deepseek-model-2"]);
        assert_eq!(models_for("ZhiPuAI"), &["zhipuai-model-1", "zhipuai-model-2"]);
        assert_eq!(models_for("OpenAI"), &["gpt-3.5-turbo", "gpt-4"]);
    }

    #[test]
    fn test_unknown_platform_is_empty() {
        assert!(models_for("").is_empty());
        assert!(models_for("Anthropic").is_empty());
        // Lookup is exact, not case-insensitive.
        assert!(models_for("openai").is_empty());
        assert!(models_for(" OpenAI").is_empty());
    }

    #[test]
    fn test_base_url_lookup() {
        assert_eq!(base_url_for("DeepSeek"), Some("https://api.deepseek.com"));
        assert_eq!(base_url_for("nope"), None);
    }

    #[test]
    fn test_platform_names_order() {
        assert_eq!(platform_names(), vec!["DeepSeek", "ZhiPuAI", "OpenAI"]);
    }
}
