use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use travelfund_core::{Entity, TopUpId};

/// Contributor recorded when a top-up names nobody.
pub const UNKNOWN_CONTRIBUTOR: &str = "Unknown";

fn unknown_contributor() -> String {
    UNKNOWN_CONTRIBUTOR.to_string()
}

/// A contribution to the shared fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUp {
    pub id: TopUpId,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    #[serde(default = "unknown_contributor")]
    pub added_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Entity for TopUp {
    type Id = TopUpId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
