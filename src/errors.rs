//! Error types with rich diagnostics using miette.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Fatal failures of a whole-document parse.
///
/// Per-element problems (a single malformed `d` attribute, a short
/// `points` list) are not errors: they are skipped and reported through
/// [`ParseResult::warnings`](crate::ParseResult).
#[derive(Error, Diagnostic, Debug)]
pub enum SvgError {
    #[error("input is not valid UTF-8 text")]
    #[diagnostic(
        code(inkpath::invalid_data),
        help("SVG sources must decode as UTF-8 before parsing")
    )]
    InvalidData(#[from] std::str::Utf8Error),

    #[error("no paths or shapes found in document")]
    #[diagnostic(
        code(inkpath::no_paths_found),
        help("the document contains no <path> or basic shape elements")
    )]
    NoPathsFound,

    #[error("could not read {}", path.display())]
    #[diagnostic(code(inkpath::file_not_found))]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
