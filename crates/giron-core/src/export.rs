//! Transcript export.
//!
//! Serializes a finished discussion (source document + transcript) into
//! plain text. This is a local side-channel driven by the controller's
//! caller, typically right before a reset.

use std::path::Path;

use crate::discussion::Discussion;
use crate::error::Result;

/// Renders the discussion as a plain-text document.
pub fn render_transcript(discussion: &Discussion) -> String {
    let mut out = String::new();
    out.push_str("# 戦略文書\n\n");
    out.push_str(discussion.strategy_document.content.trim_end());
    out.push_str("\n\n# 議論\n");

    for message in &discussion.messages {
        out.push_str(&format!(
            "\n[{}] {}\n{}\n",
            message.timestamp, message.persona_name, message.content
        ));
    }

    out
}

/// Writes the rendered transcript to `path`.
pub fn export_to_file(discussion: &Discussion, path: &Path) -> Result<()> {
    std::fs::write(path, render_transcript(discussion))?;
    Ok(())
}
