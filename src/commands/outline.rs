use anyhow::{Context, Result};
use booktoc::model::{EditedOutlineNode, OutlineNode, TocPayload};
use booktoc::util::{emit_json, read_json, write_json_atomic};
use booktoc::{build_outline, flatten_edited_outline};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::cli::{OutlineArgs, SaveOutlineArgs};
use crate::commands::load_entries;

#[derive(Debug, Serialize)]
struct OutlineView {
    outline: Vec<OutlineNode>,
    total: usize,
}

/// Edited outlines arrive either wrapped as `{ "outline": [...] }` or as a
/// bare array of nodes.
fn edited_nodes(mut document: Value) -> Result<Vec<EditedOutlineNode>> {
    let nodes = match document.get_mut("outline") {
        Some(outline) => outline.take(),
        None => document,
    };
    serde_json::from_value(nodes).context("edited outline must be an array of nodes")
}

pub fn run(args: OutlineArgs) -> Result<()> {
    let entries = load_entries(&args.source)?;
    let view = OutlineView {
        outline: build_outline(&entries),
        total: entries.len(),
    };

    info!(
        roots = view.outline.len(),
        entries = view.total,
        "built outline tree"
    );

    emit_json(args.output.as_deref(), &view)
}

pub fn save(args: SaveOutlineArgs) -> Result<()> {
    let document: Value = read_json(&args.outline)?;
    let nodes = edited_nodes(document)
        .with_context(|| format!("failed to read outline {}", args.outline.display()))?;
    let flat = flatten_edited_outline(&nodes, args.total_pages)
        .with_context(|| format!("rejected outline {}", args.outline.display()))?;

    write_json_atomic(&args.output, &TocPayload::from_entries(&flat))?;
    info!(
        path = %args.output.display(),
        entries = flat.len(),
        "saved flattened outline"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edited_outline_accepts_wrapped_and_bare_forms() {
        let wrapped = edited_nodes(serde_json::json!({
            "outline": [{"title": "One", "page": 1, "level": 1, "children": []}]
        }))
        .unwrap();
        assert_eq!(wrapped.len(), 1);

        let bare = edited_nodes(serde_json::json!([
            {"title": "One", "page": 1, "level": 1},
            {"title": "Two", "page": 4, "level": 1}
        ]))
        .unwrap();
        assert_eq!(bare[1].title, "Two");
    }

    #[test]
    fn edited_outline_must_be_an_array() {
        assert!(edited_nodes(serde_json::json!({"outline": "none"})).is_err());
        assert!(edited_nodes(serde_json::json!(42)).is_err());
    }

    #[test]
    fn save_rejects_out_of_range_page_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let outline = dir.path().join("edited.json");
        let output = dir.path().join("toc.json");
        std::fs::write(
            &outline,
            r#"[{"title": "Late", "page": 12, "level": 1, "children": []}]"#,
        )
        .unwrap();

        let err = save(SaveOutlineArgs {
            outline,
            total_pages: 10,
            output: output.clone(),
        })
        .unwrap_err();

        assert!(format!("{err:#}").contains("Late"));
        assert!(!output.exists());
    }

    #[test]
    fn save_names_chapter_with_negative_page() {
        let dir = tempfile::tempdir().unwrap();
        let outline = dir.path().join("edited.json");
        let output = dir.path().join("toc.json");
        std::fs::write(
            &outline,
            r#"[{"title":"Good","page":1,"level":1},{"title":"Broken chapter","page":-3,"level":1}]"#,
        )
        .unwrap();

        let err = save(SaveOutlineArgs {
            outline,
            total_pages: 10,
            output: output.clone(),
        })
        .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("Broken chapter"), "{message}");
        assert!(message.contains("-3"), "{message}");
        assert!(!output.exists());
    }
}
