// src/utils/text_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::extractors::SectionSpec;
use crate::utils::error::AppError;

/// Returns `text` with begin/end markers around every located section body,
/// followed by a list of sections whose header was not found.
pub fn annotate_sections(text: &str, sections: &[SectionSpec]) -> String {
    // (position, is_end, name)
    let mut marks = Vec::new();
    let mut missing = Vec::new();

    for spec in sections {
        match spec.locate_span(text) {
            Some(range) => {
                marks.push((range.start, false, spec.name));
                marks.push((range.end, true, spec.name));
            }
            None => missing.push(spec.name),
        }
    }
    // Ends before begins at the same offset so adjacent sections nest cleanly
    marks.sort_by_key(|&(pos, is_end, _)| (pos, !is_end));

    let mut annotated = String::with_capacity(text.len() + marks.len() * 32);
    let mut last_pos = 0;
    for (pos, is_end, name) in marks {
        annotated.push_str(&text[last_pos..pos]);
        if !annotated.is_empty() && !annotated.ends_with('\n') {
            annotated.push('\n');
        }
        if is_end {
            annotated.push_str(&format!("<<< [{}] end\n", name));
        } else {
            annotated.push_str(&format!(">>> [{}] begin\n", name));
        }
        last_pos = pos;
    }
    annotated.push_str(&text[last_pos..]);

    if !missing.is_empty() {
        if !annotated.ends_with('\n') {
            annotated.push('\n');
        }
        for name in missing {
            annotated.push_str(&format!("!!! [{}] missing\n", name));
        }
    }

    annotated
}

/// Writes the annotated report to `filename`.
pub fn save_debug_report(text: &str, filename: &Path, sections: &[SectionSpec]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;
    file.write_all(annotate_sections(text, sections).as_bytes())?;

    tracing::info!("Saved annotated report to {}", filename.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::section::{BLOCKED, ORGANIZATIONS, PEOPLE};

    #[test]
    fn marks_found_and_missing_sections() {
        let text = "--- Personas ---\nAna: 3 seguidores\n\n--- Empresas ---\nAcme: 10 seguidores\n=====\n";
        let annotated = annotate_sections(text, &[PEOPLE, ORGANIZATIONS, BLOCKED]);

        assert!(annotated.contains(">>> [people] begin\nAna: 3 seguidores\n<<< [people] end\n"));
        assert!(annotated.contains(">>> [organizations] begin\nAcme: 10 seguidores\n<<< [organizations] end\n"));
        assert!(annotated.ends_with("!!! [blocked] missing\n"));
    }

    #[test]
    fn text_without_sections_is_unchanged_apart_from_missing_list() {
        let annotated = annotate_sections("nada\n", &[PEOPLE]);
        assert_eq!(annotated, "nada\n!!! [people] missing\n");
    }
}
