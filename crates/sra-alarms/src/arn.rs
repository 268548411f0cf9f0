//! SNS topic ARNs for alarm actions.
//!
//! The deploying account is normally unknown at packaging time, so the ARN
//! keeps it as a [`AccountRef::Deferred`] reference that the template engine
//! resolves on deploy.

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// Pseudo parameter resolving to the deploying account.
pub const ACCOUNT_ID_PSEUDO_PARAMETER: &str = "AWS::AccountId";

/// The account part of an ARN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AccountRef {
    /// Resolved by CloudFormation at deploy time.
    #[default]
    Deferred,
    /// A known account ID.
    Literal(String),
}

/// ARN of the SNS topic notified by an alarm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicArn {
    /// Region of the topic.
    pub region: String,
    /// Owning account.
    pub account: AccountRef,
    /// Topic name.
    pub topic: String,
}

impl TopicArn {
    /// Creates a topic ARN in the deploying account.
    pub fn new(region: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            account: AccountRef::Deferred,
            topic: topic.into(),
        }
    }

    /// Sets the owning account.
    #[must_use]
    pub fn with_account(mut self, account: AccountRef) -> Self {
        self.account = account;
        self
    }

    /// Renders the ARN as a template value.
    ///
    /// A deferred account renders as `Fn::Join` around a `Ref` to the
    /// account pseudo parameter; a literal account renders a plain string.
    #[must_use]
    pub fn to_template_value(&self) -> Value {
        match &self.account {
            AccountRef::Deferred => json!({
                "Fn::Join": [
                    "",
                    [
                        format!("arn:aws:sns:{}:", self.region),
                        { "Ref": ACCOUNT_ID_PSEUDO_PARAMETER },
                        format!(":{}", self.topic),
                    ]
                ]
            }),
            AccountRef::Literal(account) => {
                Value::String(format!("arn:aws:sns:{}:{account}:{}", self.region, self.topic))
            }
        }
    }
}

impl Serialize for TopicArn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_template_value().serialize(serializer)
    }
}
