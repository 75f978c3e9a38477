use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Commands the page context may send to the background router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetDetailsAndShowPopup,
    AddWord,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetDetailsAndShowPopup => "getDetailsAndShowPopup",
            Action::AddWord => "addWord",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "getDetailsAndShowPopup" => Some(Action::GetDetailsAndShowPopup),
            "addWord" => Some(Action::AddWord),
            _ => None,
        }
    }
}

/// Page → background message.
///
/// `action` stays a plain string so unknown names survive transport and
/// can be answered explicitly by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub action: String,
    pub text: String,
}

impl Request {
    pub fn new(action: Action, text: impl Into<String>) -> Self {
        Self {
            action: action.as_str().to_string(),
            text: text.into(),
        }
    }
}

/// Background → page reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// A request in flight together with its reply handle.
///
/// The reply sender is consumed on use, so each request is answered at
/// most once. Dropping it unanswered closes the page side's wait.
#[derive(Debug)]
pub struct Envelope {
    pub id: Uuid,
    pub request: Request,
    pub reply: oneshot::Sender<Response>,
}

impl Envelope {
    pub fn new(request: Request) -> (Self, oneshot::Receiver<Response>) {
        let (reply, rx) = oneshot::channel();
        (
            Self {
                id: Uuid::new_v4(),
                request,
                reply,
            },
            rx,
        )
    }
}
