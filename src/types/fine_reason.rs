//! Fine reasons and reason templates
//!
//! A fine either carries its own description, amount and importance
//! ([`FineReason::Custom`]) or points at a [`ReasonTemplate`] by id
//! ([`FineReason::Template`]). Template references are resolved against a
//! template snapshot supplied by the caller at query time.
//!
//! Resolution never fails. A reference whose template is missing, or a
//! missing snapshot altogether, resolves to an empty description, a zero
//! amount and low importance, since the template list may simply not be
//! loaded yet.

use crate::types::amount::Amount;
use crate::types::error::FineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reason template identifier
pub type TemplateId = String;

/// Severity tier of a fine
///
/// Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    #[default]
    Low,
    Medium,
    High,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Low => "low",
            Importance::Medium => "medium",
            Importance::High => "high",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = FineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Importance::Low),
            "medium" => Ok(Importance::Medium),
            "high" => Ok(Importance::High),
            _ => Err(FineError::invalid_importance(s)),
        }
    }
}

/// Reusable reason definition maintained by the club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonTemplate {
    pub id: TemplateId,

    /// The legacy backend stores this under `reason`
    #[serde(alias = "reason")]
    pub description: String,

    pub amount: Amount,

    pub importance: Importance,
}

/// Why a fine exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FineReasonPayload", into = "FineReasonPayload")]
pub enum FineReason {
    /// Reason data stored inline with the fine
    Custom {
        description: String,
        amount: Amount,
        importance: Importance,
    },

    /// Reference to a reason template, resolved at query time
    Template { template_id: TemplateId },
}

impl FineReason {
    pub fn custom(description: impl Into<String>, amount: Amount, importance: Importance) -> Self {
        FineReason::Custom {
            description: description.into(),
            amount,
            importance,
        }
    }

    pub fn template(template_id: impl Into<TemplateId>) -> Self {
        FineReason::Template {
            template_id: template_id.into(),
        }
    }

    /// Assemble a reason from the optional fields of a payload
    ///
    /// A template id wins over inline fields. Without one, all three inline
    /// fields must be present.
    ///
    /// # Errors
    ///
    /// Returns [`FineError::MalformedFineReason`] when neither shape is
    /// complete.
    pub fn from_parts(
        template_id: Option<TemplateId>,
        description: Option<String>,
        amount: Option<Amount>,
        importance: Option<Importance>,
    ) -> Result<Self, FineError> {
        match (template_id, description, amount, importance) {
            (Some(template_id), _, _, _) => Ok(FineReason::Template { template_id }),
            (None, Some(description), Some(amount), Some(importance)) => Ok(FineReason::Custom {
                description,
                amount,
                importance,
            }),
            _ => Err(FineError::MalformedFineReason),
        }
    }

    pub fn template_id(&self) -> Option<&str> {
        match self {
            FineReason::Template { template_id } => Some(template_id),
            FineReason::Custom { .. } => None,
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, FineReason::Template { .. })
    }

    /// First template in the snapshot with a matching id
    fn lookup<'a>(&self, templates: Option<&'a [ReasonTemplate]>) -> Option<&'a ReasonTemplate> {
        let template_id = self.template_id()?;
        templates?
            .iter()
            .find(|template| template.id == template_id)
    }

    /// Description of the reason, `""` for an unresolvable template
    pub fn resolve_description<'a>(&'a self, templates: Option<&'a [ReasonTemplate]>) -> &'a str {
        match self {
            FineReason::Custom { description, .. } => description,
            FineReason::Template { .. } => self
                .lookup(templates)
                .map(|template| template.description.as_str())
                .unwrap_or(""),
        }
    }

    /// Amount of a single occurrence, zero for an unresolvable template
    pub fn resolve_amount(&self, templates: Option<&[ReasonTemplate]>) -> Amount {
        match self {
            FineReason::Custom { amount, .. } => *amount,
            FineReason::Template { .. } => self
                .lookup(templates)
                .map(|template| template.amount)
                .unwrap_or(Amount::ZERO),
        }
    }

    /// Importance of the reason, low for an unresolvable template
    pub fn resolve_importance(&self, templates: Option<&[ReasonTemplate]>) -> Importance {
        match self {
            FineReason::Custom { importance, .. } => *importance,
            FineReason::Template { .. } => self
                .lookup(templates)
                .map(|template| template.importance)
                .unwrap_or_default(),
        }
    }

    /// Snapshot the resolved values into a custom reason
    ///
    /// Used before a template is edited or deleted so existing fines keep
    /// what they were issued with.
    pub fn complete(&self, templates: Option<&[ReasonTemplate]>) -> FineReason {
        FineReason::Custom {
            description: self.resolve_description(templates).to_string(),
            amount: self.resolve_amount(templates),
            importance: self.resolve_importance(templates),
        }
    }
}

/// Wire shape of a fine reason: `{templateId}` or
/// `{description, amount, importance}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FineReasonPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<TemplateId>,

    #[serde(default, alias = "reason", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
}

impl TryFrom<FineReasonPayload> for FineReason {
    type Error = FineError;

    fn try_from(payload: FineReasonPayload) -> Result<Self, Self::Error> {
        FineReason::from_parts(
            payload.template_id,
            payload.description,
            payload.amount,
            payload.importance,
        )
    }
}

impl From<FineReason> for FineReasonPayload {
    fn from(reason: FineReason) -> Self {
        match reason {
            FineReason::Custom {
                description,
                amount,
                importance,
            } => FineReasonPayload {
                description: Some(description),
                amount: Some(amount),
                importance: Some(importance),
                ..Default::default()
            },
            FineReason::Template { template_id } => FineReasonPayload {
                template_id: Some(template_id),
                ..Default::default()
            },
        }
    }
}
