use serde::{Deserialize, Serialize};

/// Site identity used in diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteOptions {
    /// Homepage owner, named in the load message.
    pub owner: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            owner: "Kianoosh Vadaei".into(),
        }
    }
}
