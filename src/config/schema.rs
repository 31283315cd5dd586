//! Configuration schema types
//!
//! These types are deserialized from the YAML site configuration. Every
//! section is optional; missing sections fall back to the defaults of the
//! hosted portfolio page.

use serde::{Deserialize, Serialize};

// ============================================================================
// Defaults
// ============================================================================

/// Hosted profile document (`{"name": ...}`).
pub const DEFAULT_GENERAL_INFO_URL: &str =
    "https://raw.githubusercontent.com/YimJeongMin/first-deploy/main/resume_general_info_service.json";

/// Hosted project name → repository URL document.
pub const DEFAULT_PORTFOLIO_URL: &str =
    "https://raw.githubusercontent.com/YimJeongMin/first-deploy/main/resume_portfolio_service.json";

/// Tagline shown under the profile name.
pub const DEFAULT_TAGLINE: &str = "잘하고싶습니다. 그것이 전부입니다.";

/// Anchor text of every project card.
pub const DEFAULT_LINK_LABEL: &str = "GitHub에서 프로젝트 보기 →";

/// Document `<title>`.
pub const DEFAULT_TITLE: &str = "Portfolio";

/// Listen address for `showcase serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration for a `showcase` site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Static page content
    pub site: SiteContent,

    /// Remote documents the page is built from
    pub endpoints: Endpoints,

    /// HTTP host settings
    pub server: ServerSettings,
}

/// Static text that is part of the page rather than the fetched data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteContent {
    /// Document title
    pub title: String,

    /// Fixed tagline under the heading
    pub tagline: String,

    /// Anchor text on each project card
    pub link_label: String,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            link_label: DEFAULT_LINK_LABEL.to_string(),
        }
    }
}

/// Addresses of the two remote JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoints {
    /// URL of the General Info document
    pub general_info: String,

    /// URL of the Portfolio Mapping document
    pub portfolio: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            general_info: DEFAULT_GENERAL_INFO_URL.to_string(),
            portfolio: DEFAULT_PORTFOLIO_URL.to_string(),
        }
    }
}

/// HTTP host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    /// Address to bind, `[host:]port`
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: SiteConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.endpoints.general_info, DEFAULT_GENERAL_INFO_URL);
        assert_eq!(config.site.tagline, DEFAULT_TAGLINE);
        assert_eq!(config.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
endpoints:
  portfolio: "http://localhost:9000/portfolio.json"
site:
  tagline: "Ship it."
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.endpoints.portfolio, "http://localhost:9000/portfolio.json");
        assert_eq!(config.endpoints.general_info, DEFAULT_GENERAL_INFO_URL);
        assert_eq!(config.site.tagline, "Ship it.");
        assert_eq!(config.site.link_label, DEFAULT_LINK_LABEL);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let yaml = "endpoints:\n  profile: \"http://x\"\n";
        assert!(serde_yaml::from_str::<SiteConfig>(yaml).is_err());
    }
}
