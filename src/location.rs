use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;
use tabled::Tabled;

pub type LocationId = Arc<str>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
