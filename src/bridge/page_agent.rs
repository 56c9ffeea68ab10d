use crate::bridge::{
    AgentHandle, BridgeMessage, BridgeResponse, MessageHandler, PendingReply, ready, spawn_agent,
};
use crate::classifier::Classifier;
use crate::extractors::{ExtractOptions, extract_page};
use crate::page::PageSource;
use std::sync::Arc;

/// Runs next to a page and answers extraction requests for it
pub struct PageAgent {
    source: Arc<dyn PageSource>,
    classifier: Arc<Classifier>,
    options: ExtractOptions,
}

impl PageAgent {
    pub fn new(
        source: Arc<dyn PageSource>,
        classifier: Arc<Classifier>,
        options: ExtractOptions,
    ) -> Self {
        Self {
            source,
            classifier,
            options,
        }
    }

    /// Start serving on its own task
    pub fn spawn(self) -> AgentHandle {
        spawn_agent("page-agent", self)
    }
}

impl MessageHandler for PageAgent {
    fn handle(&self, message: BridgeMessage) -> PendingReply {
        match message {
            BridgeMessage::ExtractContent => {
                let source = Arc::clone(&self.source);
                let classifier = Arc::clone(&self.classifier);
                let options = self.options;
                Box::pin(async move {
                    match source.snapshot().await {
                        Ok(snapshot) => {
                            BridgeResponse::Extracted(extract_page(&snapshot, &classifier, &options))
                        }
                        Err(e) => {
                            ::log::warn!("Page agent could not read the page: {}", e);
                            BridgeResponse::failure(e)
                        }
                    }
                })
            }
            BridgeMessage::AnalyzeContent(_) => ready(BridgeResponse::failure(
                "page agent does not handle analyzeContent",
            )),
        }
    }
}
