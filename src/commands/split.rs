use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use booktoc::model::SplitPlan;
use booktoc::util::{emit_json, read_json};
use booktoc::{PageSpan, compute_chapter_ranges, output_dir_name};
use tracing::{info, warn};

use crate::cli::{ExtractSpanArgs, SplitArgs};
use crate::commands::chapters::{ChapterSelection, select_chapters};
use crate::commands::{heading_predicate, load_entries};

pub fn run(args: SplitArgs) -> Result<()> {
    let total_pages = args.source.total_pages;
    let output_dir = resolve_output_dir(args.book.as_deref(), &args.source.toc_json)?;

    // An explicit selection is taken as-is, so an empty one is rejected by
    // `compute_chapter_ranges`. Only detection may come up empty.
    let selection = match &args.chapters {
        Some(path) => read_json::<ChapterSelection>(path)?,
        None => {
            let entries = load_entries(&args.source)?;
            let predicate = heading_predicate(&args.heading_patterns)?;
            let detected = select_chapters(&entries, &predicate)?;
            if detected.chapters.is_empty() {
                warn!("no chapters detected; emitting empty split plan");
                let plan = SplitPlan::new(output_dir.display().to_string(), &[], total_pages);
                return emit_json(args.output.as_deref(), &plan);
            }
            detected
        }
    };

    let chapters = compute_chapter_ranges(&selection.chapters, total_pages)
        .context("failed to compute chapter page ranges")?;
    let plan = SplitPlan::new(output_dir.display().to_string(), &chapters, total_pages);

    let count = plan.chapters.len();
    for (index, chapter) in plan.chapters.iter().enumerate() {
        info!(
            chapter = index + 1,
            of = count,
            start_page = chapter.start_page,
            end_page = chapter.end_page,
            file = %chapter.file_name,
            "planned chapter"
        );
    }
    info!(output_dir = %plan.output_dir, chapters = count, "split plan ready");

    emit_json(args.output.as_deref(), &plan)
}

pub fn check_span(args: ExtractSpanArgs) -> Result<()> {
    let span = PageSpan::new(args.start, args.end, args.total_pages)
        .context("refusing to extract table-of-contents pages")?;

    info!(
        start = span.start(),
        end = span.end(),
        pages = span.page_count(),
        "page span is valid"
    );
    Ok(())
}

/// Chapter files go in a folder named after the book, next to the book. The
/// TOC file stands in when no book path is given.
fn resolve_output_dir(book: Option<&Path>, toc_json: &Path) -> Result<PathBuf> {
    let anchor = book.unwrap_or(toc_json);
    let stem = anchor
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("invalid UTF-8 file name: {}", anchor.display()))?;

    let name = output_dir_name(stem);
    let parent = anchor.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_sits_beside_the_book() {
        let dir = resolve_output_dir(
            Some(Path::new("library/algebra_bookmarked.pdf")),
            Path::new("toc.json"),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("library/algebra"));
    }

    #[test]
    fn output_dir_falls_back_to_toc_file() {
        let dir = resolve_output_dir(None, Path::new("work/topology_toc.json")).unwrap();
        assert_eq!(dir, PathBuf::from("work/topology"));
    }

    #[test]
    fn check_span_rejects_reversed_span() {
        let err = check_span(ExtractSpanArgs {
            start: 9,
            end: 7,
            total_pages: 300,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("9-7"));
    }

    #[test]
    fn split_plans_detected_chapters() {
        let dir = tempfile::tempdir().unwrap();
        let toc_json = dir.path().join("book_toc.json");
        let output = dir.path().join("plan.json");
        std::fs::write(
            &toc_json,
            r#"{"toc": [
                {"level": 1, "title": "Preface", "page": 3},
                {"level": 1, "title": "1 Introduction", "page": 5},
                {"level": 2, "title": "1.1 Background", "page": 6},
                {"level": 1, "title": "2 Methods", "page": 20}
            ]}"#,
        )
        .unwrap();

        run(SplitArgs {
            source: crate::cli::TocSourceArgs {
                toc_json,
                total_pages: 50,
                page_offset: 0,
            },
            chapters: None,
            heading_patterns: Vec::new(),
            book: None,
            output: Some(output.clone()),
        })
        .unwrap();

        let plan: SplitPlan = read_json(&output).unwrap();
        assert!(plan.output_dir.ends_with("book"));
        let ranges: Vec<(u32, u32)> = plan
            .chapters
            .iter()
            .map(|chapter| (chapter.start_page, chapter.end_page))
            .collect();
        assert_eq!(ranges, vec![(5, 19), (20, 50)]);
        assert_eq!(plan.chapters[0].file_name, "1 Introduction.pdf");
    }

    #[test]
    fn split_rejects_empty_explicit_selection() {
        let dir = tempfile::tempdir().unwrap();
        let chapters = dir.path().join("chapters.json");
        let output = dir.path().join("plan.json");
        std::fs::write(&chapters, r#"{"chapters": []}"#).unwrap();

        let err = run(SplitArgs {
            source: crate::cli::TocSourceArgs {
                toc_json: dir.path().join("book_toc.json"),
                total_pages: 50,
                page_offset: 0,
            },
            chapters: Some(chapters),
            heading_patterns: Vec::new(),
            book: None,
            output: Some(output.clone()),
        })
        .unwrap_err();

        let invalid = err
            .downcast_ref::<booktoc::OutlineError>()
            .expect("range error should be preserved");
        assert!(matches!(invalid, booktoc::OutlineError::InvalidRange { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn split_with_no_toc_entries_emits_empty_plan() {
        let dir = tempfile::tempdir().unwrap();
        let toc_json = dir.path().join("book_toc.json");
        let output = dir.path().join("plan.json");
        std::fs::write(&toc_json, r#"{"toc": []}"#).unwrap();

        run(SplitArgs {
            source: crate::cli::TocSourceArgs {
                toc_json,
                total_pages: 50,
                page_offset: 0,
            },
            chapters: None,
            heading_patterns: Vec::new(),
            book: None,
            output: Some(output.clone()),
        })
        .unwrap();

        let plan: SplitPlan = read_json(&output).unwrap();
        assert!(plan.chapters.is_empty());
    }
}
