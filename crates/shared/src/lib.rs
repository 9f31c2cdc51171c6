pub mod chart;
pub mod error;
pub mod events;
pub mod preferences;

pub mod settings {
    use serde::{Deserialize, Serialize};

    fn default_true() -> bool {
        true
    }

    fn default_notification_ttl_ms() -> u64 {
        3000
    }

    fn default_history_limit() -> usize {
        20
    }

    fn default_max_prompt_words() -> usize {
        150
    }

    fn default_share_url() -> String {
        "https://plott.onrender.com".into()
    }

    /// One remote service a generation or enhancement request can be sent to.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EndpointConfig {
        pub name: String,     // e.g., "primary"
        pub base_url: String, // e.g., "https://plott.onrender.com"
        pub generate_path: String,
        pub enhance_path: String,
        /// Reachability check issued once at startup (primary only)
        #[serde(default)]
        pub probe_path: Option<String>,
        /// Keep a cookie jar for this service (cross-site credentials)
        #[serde(default = "default_true")]
        pub send_credentials: bool,
    }

    impl EndpointConfig {
        pub fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }

        pub fn generate_url(&self) -> String {
            self.url(&self.generate_path)
        }

        pub fn enhance_url(&self) -> String {
            self.url(&self.enhance_path)
        }

        pub fn probe_url(&self) -> Option<String> {
            self.probe_path.as_deref().map(|p| self.url(p))
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ClientSettings {
        pub primary: EndpointConfig,
        pub secondary: EndpointConfig,
        #[serde(default = "default_notification_ttl_ms")]
        pub notification_ttl_ms: u64,
        #[serde(default = "default_history_limit")]
        pub history_limit: usize,
        #[serde(default = "default_max_prompt_words")]
        pub max_prompt_words: usize,
        /// Page URL embedded in social share links
        #[serde(default = "default_share_url")]
        pub share_url: String,
    }

    impl ClientSettings {
        /// Endpoints in the order requests are attempted.
        pub fn endpoints(&self) -> Vec<EndpointConfig> {
            vec![self.primary.clone(), self.secondary.clone()]
        }

        /// Apply `PLOTT_PRIMARY_URL` / `PLOTT_SECONDARY_URL` overrides.
        pub fn with_env_overrides(mut self) -> Self {
            if let Ok(url) = std::env::var("PLOTT_PRIMARY_URL") {
                if !url.trim().is_empty() {
                    self.primary.base_url = url.trim().to_string();
                }
            }
            if let Ok(url) = std::env::var("PLOTT_SECONDARY_URL") {
                if !url.trim().is_empty() {
                    self.secondary.base_url = url.trim().to_string();
                }
            }
            self
        }
    }

    impl Default for ClientSettings {
        fn default() -> Self {
            Self {
                primary: EndpointConfig {
                    name: "primary".into(),
                    base_url: "https://plott.onrender.com".into(),
                    generate_path: "/api/generate-diagram".into(),
                    enhance_path: "/api/enhance-prompt".into(),
                    probe_path: Some("/cors-test".into()),
                    send_credentials: true,
                },
                secondary: EndpointConfig {
                    name: "secondary".into(),
                    base_url: "http://127.0.0.1:3000".into(),
                    generate_path: "/api/generate".into(),
                    enhance_path: "/api/enhance-prompt".into(),
                    probe_path: None,
                    send_credentials: false,
                },
                notification_ttl_ms: default_notification_ttl_ms(),
                history_limit: default_history_limit(),
                max_prompt_words: default_max_prompt_words(),
                share_url: default_share_url(),
            }
        }
    }

}

pub mod api {
    use serde::{Deserialize, Serialize};

    /// Body of both the generation and the enhancement POST.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PromptRequest {
        pub prompt: String,
    }
}
