// src/extractors/section.rs

use std::ops::Range;

// --- Data Structures ---

/// How the line carrying a section header is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLine {
    /// The header is the whole line, e.g. `--- Personas ---`.
    Exact,
    /// The header is followed by free text on the same line
    /// (`REACCIONES POR PUBLICACION (GPU)`); the rest of the line is skipped.
    Prefix,
}

/// Where a named section starts and stops in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub name: &'static str,
    pub header: &'static str,
    pub header_line: HeaderLine,
    /// First occurrence after the body start ends the section.
    pub terminator: &'static str,
}

// --- Report Layout ---
// These literals are the contract with the report program. If its headings
// change, the affected sections silently come back empty.

/// Sub-blocks start with `---`, top-level blocks with a `====` rule.
const SUB_BLOCK: &str = "\n---";
const TOP_LEVEL: &str = "\n=";

pub const PEOPLE: SectionSpec = SectionSpec {
    name: "people",
    header: "--- Personas ---",
    header_line: HeaderLine::Exact,
    terminator: SUB_BLOCK,
};

pub const ORGANIZATIONS: SectionSpec = SectionSpec {
    name: "organizations",
    header: "--- Empresas ---",
    header_line: HeaderLine::Exact,
    terminator: TOP_LEVEL,
};

pub const REACTIONS: SectionSpec = SectionSpec {
    name: "reactions",
    header: "REACCIONES POR PUBLICACION",
    header_line: HeaderLine::Prefix,
    terminator: TOP_LEVEL,
};

pub const MOST_LIKED: SectionSpec = SectionSpec {
    name: "most_liked",
    header: "--- Top 5 con MAS likes ---",
    header_line: HeaderLine::Exact,
    terminator: SUB_BLOCK,
};

pub const LEAST_LIKED: SectionSpec = SectionSpec {
    name: "least_liked",
    header: "--- Top 5 con MENOS likes ---",
    header_line: HeaderLine::Exact,
    terminator: TOP_LEVEL,
};

pub const HASHTAGS: SectionSpec = SectionSpec {
    name: "hashtags",
    header: "ANALISIS DE HASHTAGS",
    header_line: HeaderLine::Prefix,
    terminator: TOP_LEVEL,
};

pub const BLOCKED: SectionSpec = SectionSpec {
    name: "blocked",
    header: "SEGUIDORES BLOQUEADOS",
    header_line: HeaderLine::Prefix,
    terminator: TOP_LEVEL,
};

pub const RECOMMENDATIONS: SectionSpec = SectionSpec {
    name: "recommendations",
    header: "EMPRESAS QUE RECOMIENDAN",
    header_line: HeaderLine::Prefix,
    terminator: TOP_LEVEL,
};

/// Every section in report order.
pub const ALL_SECTIONS: [SectionSpec; 8] = [
    PEOPLE,
    ORGANIZATIONS,
    REACTIONS,
    MOST_LIKED,
    LEAST_LIKED,
    HASHTAGS,
    BLOCKED,
    RECOMMENDATIONS,
];

// --- Locator ---

impl SectionSpec {
    /// Returns the body of this section, or `None` if the header is absent.
    pub fn locate<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.locate_span(text).map(|range| &text[range])
    }

    /// Byte range of the section body within `text`.
    ///
    /// Only the first header occurrence counts, and only the first terminator
    /// after the body start, so header literals repeated inside the body do
    /// not move either boundary. An exact header followed by anything other
    /// than blanks and a line break yields an empty body.
    pub fn locate_span(&self, text: &str) -> Option<Range<usize>> {
        let header_at = text.find(self.header)?;
        let after_header = header_at + self.header.len();

        let line_end = match self.header_line {
            HeaderLine::Exact => {
                // Trailing blanks (and a CR) may follow the header
                let rest = &text[after_header..];
                let pad = rest.len() - rest.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\r')).len();
                rest[pad..].starts_with('\n').then_some(after_header + pad)
            }
            HeaderLine::Prefix => text[after_header..].find('\n').map(|i| after_header + i),
        };

        let Some(line_end) = line_end else {
            tracing::debug!("Section '{}' header found without a body", self.name);
            return Some(text.len()..text.len());
        };

        let body_start = line_end + 1;
        let body_end = text[body_start..]
            .find(self.terminator)
            .map(|i| body_start + i)
            .unwrap_or(text.len());

        tracing::trace!("Section '{}' spans bytes {}..{}", self.name, body_start, body_end);
        Some(body_start..body_end)
    }
}
