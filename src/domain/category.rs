use serde::{Deserialize, Serialize};

use crate::domain::types::Identifier;

/// Canonical category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Identifier,
    pub name: String,
}

/// Data required to insert a new [`Category`]. The identifier is minted by
/// the repository at insert time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: String,
}
