//! Classification record (`/type/{name}`).

use serde::{Deserialize, Serialize};

use super::resource::NamedRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub id: u32,
    pub name: String,
    /// Pokemon carrying this classification
    #[serde(default)]
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMember {
    pub slot: u8,
    pub pokemon: NamedRef,
}
