use crate::bridge::{
    AgentHandle, BridgeMessage, BridgeResponse, MessageHandler, PendingReply, ready, spawn_agent,
};
use crate::cache::AnalysisCache;
use crate::client::AnalysisClient;
use crate::errors::VerifierError;
use crate::results::{AnalysisResult, PageContent};
use std::sync::{Arc, RwLock};

/// The page agent of the currently active page, if any
///
/// Set by the host; the core only reads it.
#[derive(Clone, Default, Debug)]
pub struct ActivePage {
    slot: Arc<RwLock<Option<AgentHandle>>>,
}

impl ActivePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, agent: AgentHandle) {
        *self.slot.write().unwrap_or_else(|p| p.into_inner()) = Some(agent);
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(|p| p.into_inner()) = None;
    }

    pub fn current(&self) -> Option<AgentHandle> {
        self.slot
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

struct CoordinatorState {
    active_page: ActivePage,
    client: AnalysisClient,
    cache: Option<AnalysisCache>,
}

/// Mediates between UI agents, page agents and the verification service
pub struct Coordinator {
    state: Arc<CoordinatorState>,
}

impl Coordinator {
    pub fn new(active_page: ActivePage, client: AnalysisClient, cache: Option<AnalysisCache>) -> Self {
        Self {
            state: Arc::new(CoordinatorState {
                active_page,
                client,
                cache,
            }),
        }
    }

    /// Start serving on its own task
    pub fn spawn(self) -> AgentHandle {
        spawn_agent("coordinator", self)
    }
}

impl MessageHandler for Coordinator {
    fn handle(&self, message: BridgeMessage) -> PendingReply {
        match message {
            BridgeMessage::ExtractContent => {
                let Some(page_agent) = self.state.active_page.current() else {
                    ::log::warn!("Extraction requested with no active page");
                    return ready(BridgeResponse::failure(VerifierError::NoActivePage));
                };
                Box::pin(async move {
                    page_agent
                        .send(BridgeMessage::ExtractContent)
                        .await
                        .unwrap_or_else(BridgeResponse::failure)
                })
            }
            BridgeMessage::AnalyzeContent(supplied) => {
                let state = Arc::clone(&self.state);
                Box::pin(async move {
                    match state.analyze(supplied).await {
                        Ok(result) => BridgeResponse::Analyzed(result),
                        Err(e) => {
                            ::log::error!("Analysis failed: {}", e);
                            BridgeResponse::failure(e)
                        }
                    }
                })
            }
        }
    }
}

impl CoordinatorState {
    async fn analyze(&self, supplied: Option<PageContent>) -> Result<AnalysisResult, VerifierError> {
        let page = match supplied {
            Some(page) => page,
            None => self.extract_active().await?,
        };

        let result = self.client.analyze(&page).await?;

        if let Some(cache) = &self.cache {
            cache.store(&page.url, &result);
        }
        Ok(result)
    }

    async fn extract_active(&self) -> Result<PageContent, VerifierError> {
        let page_agent = self
            .active_page
            .current()
            .ok_or(VerifierError::NoActivePage)?;

        match page_agent.send(BridgeMessage::ExtractContent).await? {
            BridgeResponse::Extracted(page) => Ok(page),
            // Already worded by the page agent
            BridgeResponse::Failure(error) => Err(VerifierError::Remote(error)),
            BridgeResponse::Analyzed(_) => Err(VerifierError::Protocol(
                "page agent answered extractContent with an analysis".to_string(),
            )),
        }
    }
}
