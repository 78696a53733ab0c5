use serde::{Deserialize, Serialize};

/// Script identifiers invoked on entity lifecycle events. Absent hooks are
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScriptHooks {
    pub on_use: Option<String>,
    pub on_equip: Option<String>,
    pub on_death: Option<String>,
}
