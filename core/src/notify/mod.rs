//! Best-effort email notification of new contact messages.
//!
//! A [`Notifier`] reports the outcome as a [`Delivery`] value instead of an
//! error. The submission workflow logs it and carries on either way.

use crate::types::{ContactMessage, NotifierConfig};
use error::NotifyError;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum NotifyError {
        #[error("notifier is not configured")]
        NotConfigured,

        #[error("transport error: {0}")]
        Transport(String),

        #[error("rejected with status {status}: {body}")]
        Rejected { status: u16, body: String },
    }
}

/// Outcome of one notification attempt.
#[derive(Debug)]
#[must_use]
pub enum Delivery {
    Delivered,
    /// Notifications are turned off.
    Skipped,
    Failed(NotifyError),
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

/// Variables handed to the email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub to_name: String,
    pub from_name: String,
    pub from_email: String,
    pub phone_number: String,
    pub message: String,
    pub reply_to: String,
}

impl TemplateParams {
    pub fn for_message(message: &ContactMessage, to_name: &str) -> Self {
        Self {
            to_name: to_name.to_string(),
            from_name: message.name().to_string(),
            from_email: message.email().to_string(),
            phone_number: message.phone().to_string(),
            message: message.message().to_string(),
            reply_to: message.email().to_string(),
        }
    }
}

pub trait Notifier {
    fn send(&self, params: &TemplateParams) -> Delivery;
}

/// Notifier used when email delivery is turned off.
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn send(&self, _params: &TemplateParams) -> Delivery {
        Delivery::Skipped
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Sends templated email through the EmailJS REST API.
pub struct EmailJsNotifier {
    agent: ureq::Agent,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifyError> {
        if !config.is_complete() {
            return Err(NotifyError::NotConfigured);
        }

        let timeout = Duration::from_millis(config.timeout_ms.max(1));
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();

        Ok(Self {
            agent,
            endpoint: config.endpoint.clone(),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    fn post(&self, params: &TemplateParams) -> Result<(), NotifyError> {
        let request = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: params,
        };

        match self.agent.post(&self.endpoint).send_json(&request) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, response)) => Err(NotifyError::Rejected {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(NotifyError::Transport(transport.to_string()))
            }
        }
    }
}

impl Notifier for EmailJsNotifier {
    fn send(&self, params: &TemplateParams) -> Delivery {
        debug!(?params, "sending email notification");
        match self.post(params) {
            Ok(()) => Delivery::Delivered,
            Err(e) => {
                warn!(error = %e, "email notification failed");
                Delivery::Failed(e)
            }
        }
    }
}

/// Builds the notifier described by the config; falls back to [`DisabledNotifier`].
pub fn from_config(config: &NotifierConfig) -> Box<dyn Notifier> {
    if !config.enabled {
        return Box::new(DisabledNotifier);
    }

    match EmailJsNotifier::new(config) {
        Ok(notifier) => Box::new(notifier),
        Err(e) => {
            warn!(error = %e, "email notifications disabled");
            Box::new(DisabledNotifier)
        }
    }
}
