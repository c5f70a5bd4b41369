//! Document-level orchestration.
//!
//! One pass per concern, all pure functions of the source text: find the
//! `viewBox`, interpret every `<path>`, synthesize the basic shapes, then
//! settle bounds. A malformed path skips with a warning; only an entirely
//! empty result is an error.

use crate::bounds;
use crate::errors::SvgError;
use crate::log::debug;
use crate::pathdata;
use crate::scan;
use crate::shapes;
use crate::types::ParseResult;

/// How much of a rejected `d` attribute a warning quotes.
const WARNING_PREVIEW_CHARS: usize = 48;

/// Compile decoded SVG text into paths, bounds, and warnings.
pub fn compile(text: &str) -> Result<ParseResult, SvgError> {
    let view_box = scan::elements(text, "svg")
        .first()
        .and_then(|el| el.attr("viewBox"))
        .and_then(bounds::parse_view_box);

    let mut paths = Vec::new();
    let mut warnings = Vec::new();
    for el in scan::elements(text, "path") {
        let Some(d) = el.attr("d") else {
            continue;
        };
        match pathdata::parse_path_data(d) {
            Some(path) => paths.push(path),
            None => warnings.push(format!(
                "skipped path with unparseable data: \"{}\"",
                preview(d)
            )),
        }
    }
    paths.extend(shapes::extract_all(text));
    debug!(
        "compiled {} paths with {} warnings",
        paths.len(),
        warnings.len()
    );

    if paths.is_empty() {
        return Err(SvgError::NoPathsFound);
    }
    let bounds = bounds::document_bounds(view_box, &paths);
    Ok(ParseResult {
        paths,
        bounds,
        warnings,
    })
}

/// A short, char-boundary-safe prefix for warning messages.
fn preview(data: &str) -> String {
    if data.chars().count() <= WARNING_PREVIEW_CHARS {
        data.to_string()
    } else {
        let mut p: String = data.chars().take(WARNING_PREVIEW_CHARS).collect();
        p.push('…');
        p
    }
}
