//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default schemas root, relative to the working directory.
fn default_schemas_root() -> String {
    "schemas".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory holding `<entity>/<model>/schema.json` trees.
    #[serde(default = "default_schemas_root")]
    pub schemas_root: String,

    /// Write `schema.md` next to the schema after every successful scan.
    #[serde(default)]
    pub write_markdown_on_scan: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            schemas_root: default_schemas_root(),
            write_markdown_on_scan: false,
        }
    }
}
