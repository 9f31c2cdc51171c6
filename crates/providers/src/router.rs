use crate::endpoint::{EndpointClient, PromptService};
use shared::chart::GenerationResult;
use shared::error::{ClientError, RequestKind};
use shared::settings::ClientSettings;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, warn};

/// Sends each request to an ordered list of services and returns the first
/// success. The fallback policy is the order of `services`.
#[derive(Clone)]
pub struct EndpointRouter {
    services: Vec<Arc<dyn PromptService>>,
}

impl EndpointRouter {
    pub fn new(services: Vec<Arc<dyn PromptService>>) -> Self {
        Self { services }
    }

    /// Primary first, then secondary.
    pub fn from_settings(settings: &ClientSettings) -> Self {
        let services = settings
            .endpoints()
            .into_iter()
            .map(|cfg| Arc::new(EndpointClient::new(cfg)) as Arc<dyn PromptService>)
            .collect();
        Self::new(services)
    }

    /// Names of the services in the order they are tried.
    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name()).collect()
    }

    pub async fn submit(&self, prompt: &str) -> Result<GenerationResult, ClientError> {
        let prompt = validated(prompt)?;
        self.first_success(RequestKind::Generate, |service| {
            let prompt = prompt.clone();
            async move { service.generate(&prompt).await }
        })
        .await
    }

    pub async fn enhance(&self, prompt: &str) -> Result<String, ClientError> {
        let prompt = validated(prompt)?;
        self.first_success(RequestKind::Enhance, |service| {
            let prompt = prompt.clone();
            async move { service.enhance(&prompt).await }
        })
        .await
    }

    /// Fold over the services: stop at the first success, or at the first
    /// error that does not warrant a fallback. Otherwise collect every
    /// failure into one [`ClientError::Exhausted`].
    async fn first_success<T, F, Fut>(&self, kind: RequestKind, call: F) -> Result<T, ClientError>
    where
        F: Fn(Arc<dyn PromptService>) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempts = Vec::new();

        for service in &self.services {
            match call(service.clone()).await {
                Ok(value) => return Ok(value),
                Err(e) if e.triggers_fallback() => {
                    warn!(service = service.name(), kind = kind.as_str(), "request failed: {}", e);
                    attempts.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        let err = ClientError::exhausted(kind, attempts);
        error!(kind = kind.as_str(), "all endpoints failed: {}", err);
        Err(err)
    }
}

/// Reject blank prompts before any network activity.
fn validated(prompt: &str) -> Result<String, ClientError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ClientError::empty_prompt());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::chart::ChartResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeService {
        name: &'static str,
        fail_with: Option<ClientError>,
        calls: AtomicUsize,
    }

    impl FakeService {
        fn ok(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                fail_with: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str, err: ClientError) -> Arc<Self> {
            Arc::new(Self {
                name,
                fail_with: Some(err),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl PromptService for FakeService {
        fn name(&self) -> &str {
            self.name
        }

        async fn generate(&self, prompt: &str) -> Result<GenerationResult, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(GenerationResult::new(
                    vec![ChartResult::new(self.name, prompt, "abc")],
                    None,
                )),
            }
        }

        async fn enhance(&self, prompt: &str) -> Result<String, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(format!("{} (enhanced by {})", prompt, self.name)),
            }
        }
    }

    fn down(name: &str, server_message: Option<&str>) -> ClientError {
        ClientError::Network {
            endpoint: name.into(),
            message: "connection refused".into(),
            server_message: server_message.map(str::to_string),
        }
    }

    fn router(services: Vec<Arc<FakeService>>) -> EndpointRouter {
        EndpointRouter::new(
            services
                .into_iter()
                .map(|s| s as Arc<dyn PromptService>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let primary = FakeService::ok("primary");
        let secondary = FakeService::ok("secondary");
        let r = router(vec![primary.clone(), secondary.clone()]);

        let result = r.submit("  sales by quarter ").await.unwrap();
        assert_eq!(result.charts[0].chart_type, "primary");
        assert_eq!(result.charts[0].reason, "sales by quarter");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_exactly_once() {
        let primary = FakeService::failing("primary", down("primary", None));
        let secondary = FakeService::ok("secondary");
        let r = router(vec![primary.clone(), secondary.clone()]);

        let text = r.enhance("draw it").await.unwrap();
        assert_eq!(text, "draw it (enhanced by secondary)");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_chain_reports_secondary_message() {
        let r = router(vec![
            FakeService::failing("primary", down("primary", Some("primary message"))),
            FakeService::failing("secondary", down("secondary", Some("Rate limited"))),
        ]);

        let err = r.submit("x").await.unwrap_err();
        match &err {
            ClientError::Exhausted { attempts, .. } => assert_eq!(attempts.len(), 2),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.user_message(), "Rate limited");
    }

    #[tokio::test]
    async fn test_blank_prompt_never_reaches_services() {
        let primary = FakeService::ok("primary");
        let r = router(vec![primary.clone()]);

        let err = r.submit("   ").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));
        assert!(r.enhance("").await.is_err());
        assert_eq!(primary.calls(), 0);
    }

    #[test]
    fn test_from_settings_order() {
        let r = EndpointRouter::from_settings(&ClientSettings::default());
        assert_eq!(r.service_names(), vec!["primary", "secondary"]);
    }
}
