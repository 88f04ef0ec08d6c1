use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated caller, resolved once per request by the account directory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Actor {
    Customer(Uuid),
    Driver(Uuid),
    /// Back-office staff. Only operators may use the administrative status override.
    Operator(Uuid),
}

impl Actor {
    pub fn id(&self) -> Uuid {
        match self {
            Actor::Customer(id) | Actor::Driver(id) | Actor::Operator(id) => *id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Actor::Customer(_) => "customer",
            Actor::Driver(_) => "driver",
            Actor::Operator(_) => "operator",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}
