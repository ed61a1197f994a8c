use std::fmt;

use serde::{Serialize, Serializer};

use crate::client::{Email, EmailClient, SendError};

/// Outcome of a single recipient's delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed(String),
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl From<Result<(), SendError>> for Delivery {
    fn from(result: Result<(), SendError>) -> Self {
        match result {
            Ok(()) => Self::Sent,
            Err(error) => Self::Failed(error.to_string()),
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => f.write_str("sent"),
            Self::Failed(reason) => write!(f, "error: {}", reason),
        }
    }
}

impl Serialize for Delivery {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Combined outcome across both notification attempts for one submission
#[derive(Debug, Serialize)]
pub struct DispatchOutcome {
    pub owner: Delivery,
    pub customer: Delivery,
}

impl DispatchOutcome {
    // The business must not lose the lead: owner delivery alone decides success
    pub fn is_success(&self) -> bool {
        self.owner.is_sent()
    }

    pub fn message(&self) -> &'static str {
        if self.customer.is_sent() {
            "Both emails sent"
        } else {
            "Owner email sent, but customer email failed"
        }
    }
}

/// Attempt both deliveries; neither failure aborts the other, and both
/// outcomes are captured before the aggregate is produced.
#[tracing::instrument(
    name = "Dispatch booking notifications",
    skip(client, owner_email, customer_email)
)]
pub async fn send_both(
    client: &EmailClient,
    owner_address: &str,
    customer_address: &str,
    owner_email: &Email,
    customer_email: &Email,
) -> DispatchOutcome {
    let (owner, customer) = tokio::join!(
        client.send(owner_address, owner_email),
        client.send(customer_address, customer_email),
    );

    if let Err(error) = &owner {
        tracing::warn!(error.cause_chain = ?error, "Failed to deliver the owner notification");
    }
    if let Err(error) = &customer {
        tracing::warn!(error.cause_chain = ?error, "Failed to deliver the customer notification");
    }

    DispatchOutcome {
        owner: owner.into(),
        customer: customer.into(),
    }
}
