//! Message passing between the page agent, the coordinator and UI agents.
//!
//! Each agent runs on its own task and owns nothing the others can touch. Requests
//! travel through the agent's inbox together with a one-shot reply channel. A handler
//! answers by returning a [`PendingReply`]; the agent loop drives that future on a
//! separate task and sends whatever it resolves to, so a reply may arrive long after
//! `handle` returned and there is no way to accept a request without committing to
//! an answer.

pub mod coordinator;
pub mod page_agent;
pub mod ui_agent;

pub use coordinator::{ActivePage, Coordinator};
pub use page_agent::PageAgent;
pub use ui_agent::UiAgent;

use crate::errors::VerifierError;
use crate::results::{AnalysisResult, PageContent};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Inbox depth of every agent
const AGENT_INBOX_CAPACITY: usize = 64;

/// Requests understood by the core
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum BridgeMessage {
    /// Extract the active page
    ExtractContent,
    /// Analyze the given content, or the active page when none is supplied
    AnalyzeContent(Option<PageContent>),
}

#[derive(Deserialize)]
struct RawMessage {
    action: String,
    #[serde(default, alias = "data")]
    payload: Option<serde_json::Value>,
}

impl BridgeMessage {
    pub fn action(&self) -> &'static str {
        match self {
            BridgeMessage::ExtractContent => "extractContent",
            BridgeMessage::AnalyzeContent(_) => "analyzeContent",
        }
    }

    /// Parse a message from its JSON form, rejecting actions the core does not know
    pub fn from_json(json: &str) -> Result<Self, VerifierError> {
        let raw: RawMessage = serde_json::from_str(json)
            .map_err(|e| VerifierError::Protocol(format!("invalid message: {}", e)))?;

        match raw.action.as_str() {
            "extractContent" => Ok(BridgeMessage::ExtractContent),
            "analyzeContent" => {
                let page = match raw.payload {
                    None | Some(serde_json::Value::Null) => None,
                    Some(value) => Some(serde_json::from_value(value).map_err(|e| {
                        VerifierError::Protocol(format!("invalid analyzeContent payload: {}", e))
                    })?),
                };
                Ok(BridgeMessage::AnalyzeContent(page))
            }
            other => Err(VerifierError::UnknownAction(other.to_string())),
        }
    }
}

/// The single reply to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeResponse {
    Extracted(PageContent),
    Analyzed(AnalysisResult),
    Failure(String),
}

impl BridgeResponse {
    pub fn failure(error: impl std::fmt::Display) -> Self {
        BridgeResponse::Failure(error.to_string())
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, BridgeResponse::Failure(_))
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireData<'a> {
    Page(&'a PageContent),
    Analysis(&'a AnalysisResult),
}

#[derive(Serialize)]
struct WireResponse<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<WireData<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for BridgeResponse {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            BridgeResponse::Extracted(page) => WireResponse {
                success: true,
                data: Some(WireData::Page(page)),
                error: None,
            },
            BridgeResponse::Analyzed(result) => WireResponse {
                success: true,
                data: Some(WireData::Analysis(result)),
                error: None,
            },
            BridgeResponse::Failure(error) => WireResponse {
                success: false,
                data: None,
                error: Some(error),
            },
        };
        wire.serialize(serializer)
    }
}

/// A reply that is still being produced
pub type PendingReply = Pin<Box<dyn Future<Output = BridgeResponse> + Send + 'static>>;

/// Wrap an already known response
pub fn ready(response: BridgeResponse) -> PendingReply {
    Box::pin(std::future::ready(response))
}

/// Receives the messages of one agent
pub trait MessageHandler: Send + Sync + 'static {
    /// Accept a message and return the future that answers it
    fn handle(&self, message: BridgeMessage) -> PendingReply;
}

struct Envelope {
    message: BridgeMessage,
    reply: oneshot::Sender<BridgeResponse>,
}

/// Address of a running agent
#[derive(Clone)]
pub struct AgentHandle {
    name: Arc<str>,
    tx: mpsc::Sender<Envelope>,
}

impl AgentHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send a message and wait for its reply
    pub async fn send(&self, message: BridgeMessage) -> Result<BridgeResponse, VerifierError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let action = message.action();
        ::log::trace!("Sending {} to {}", action, self.name);

        self.tx
            .send(Envelope {
                message,
                reply: reply_tx,
            })
            .await
            .map_err(|_| VerifierError::Protocol(format!("{} is not listening", self.name)))?;

        reply_rx.await.map_err(|_| {
            ::log::error!("{} dropped the reply to {}", self.name, action);
            VerifierError::channel_closed()
        })
    }

    /// Whether the agent task is still running
    pub fn is_alive(&self) -> bool {
        !self.tx.is_closed()
    }
}

impl std::fmt::Debug for AgentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentHandle")
            .field("name", &self.name)
            .finish()
    }
}

/// Start an agent task that serves `handler` until every handle is dropped
pub fn spawn_agent<H: MessageHandler>(name: &str, handler: H) -> AgentHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(AGENT_INBOX_CAPACITY);
    let name: Arc<str> = Arc::from(name);
    let agent_name = name.clone();

    tokio::spawn(async move {
        ::log::debug!("Agent {} started", agent_name);
        while let Some(Envelope { message, reply }) = rx.recv().await {
            let action = message.action();
            ::log::debug!("Agent {} handling {}", agent_name, action);
            let pending = handler.handle(message);

            let agent_name = agent_name.clone();
            tokio::spawn(async move {
                let response = pending.await;
                if reply.send(response).is_err() {
                    ::log::warn!(
                        "Agent {} finished {} but the requester went away",
                        agent_name,
                        action
                    );
                }
            });
        }
        ::log::debug!("Agent {} stopped", agent_name);
    });

    AgentHandle { name, tx }
}
