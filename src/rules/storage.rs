use crate::error::RulesError;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_RULES_PATH: &str = "cursorrules_lib/rules/rules.md";
pub const RAG_LIVEKIT_RULES_PATH: &str = "rag_livekit_rules.md";
pub const RAG_LIVEKIT_STATIC_PATH: &str = "rag_livekit_cursorrules.md";
pub const RAW_RULES_PATH: &str = ".cursorrules";

/// Renders `rules` as Markdown: a `# title` header, an optional preamble,
/// then the text verbatim inside a fenced code block.
pub fn render_rules_md(rules: &str, title: &str, preamble: Option<&str>) -> String {
    let mut out = format!("# {title}\n\n");
    if let Some(preamble) = preamble {
        out.push_str(preamble);
        out.push_str("\n\n");
    }
    out.push_str(&format!("```\n{rules}\n```\n"));
    out
}

/// Writes the Markdown rendering of `rules` to `path`, creating parent directories.
pub fn save_rules_md(
    rules: &str,
    path: impl AsRef<Path>,
    title: &str,
    preamble: Option<&str>,
) -> Result<(), RulesError> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, render_rules_md(rules, title, preamble))?;
    info!(path = %path.display(), "saved rules markdown");
    Ok(())
}

/// Writes `rules` verbatim, e.g. to `.cursorrules`.
pub fn save_raw(rules: &str, path: impl AsRef<Path>) -> Result<(), RulesError> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, rules)?;
    info!(path = %path.display(), "saved raw rules");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), RulesError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_wraps_rules_in_fence() {
        let md = render_rules_md("You are an expert in Rust.", "Cursor Rules", None);
        assert_eq!(md, "# Cursor Rules\n\n```\nYou are an expert in Rust.\n```\n");
    }

    #[test]
    fn markdown_preamble_sits_between_header_and_fence() {
        let md = render_rules_md("r", "T", Some("Built for LiveKit."));
        assert_eq!(md, "# T\n\nBuilt for LiveKit.\n\n```\nr\n```\n");
    }

    #[test]
    fn save_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cursorrules_lib/rules/rules.md");
        save_rules_md("body", &path, "Cursor Rules", None).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Cursor Rules\n\n```\nbody"));
    }

    #[test]
    fn raw_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cursorrules");
        save_raw("line one\nline two", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two");
    }
}
