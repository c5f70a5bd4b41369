//! Compile SVG vector artwork into stroke paths.
//!
//! This crate turns a bounded subset of SVG — `<path>` data plus the six
//! basic shape elements — into sequences of move/line/Bézier segments with
//! a bounding rectangle, ready for a drawing canvas to place and scale.
//! Elliptical arcs are converted to cubic Béziers; styling, transforms,
//! and the rest of full SVG are out of scope.
//!
//! Parsing is best-effort: a document with one bad path still yields every
//! other path, with a note in [`ParseResult::warnings`]. Only undecodable
//! input and documents with no usable geometry at all are errors.
//!
//! ```
//! let result = inkpath::parse_str(
//!     r#"<svg viewBox="0 0 24 24"><path d="M4 4 L20 4 20 20 Z"/></svg>"#,
//! )?;
//! assert_eq!(result.paths.len(), 1);
//! assert_eq!(result.bounds.width, 24.0);
//! # Ok::<(), inkpath::SvgError>(())
//! ```

mod arc;
mod bounds;
mod compile;
mod errors;
pub mod log;
mod pathdata;
mod scan;
mod shapes;
mod tokenize;
mod types;

pub use bounds::parse_view_box;
pub use errors::SvgError;
pub use glam::DVec2;
pub use pathdata::{interpret, parse_path_data};
pub use tokenize::{Token, numbers, tokenize};
pub use types::{ParseResult, Path, PathBuilder, PathSegment, PathSink, Rect};

/// Parse an SVG document from decoded text.
pub fn parse_str(source: &str) -> Result<ParseResult, SvgError> {
    compile::compile(source)
}

/// Parse an SVG document from raw bytes, decoding as UTF-8 first.
pub fn parse_bytes(bytes: &[u8]) -> Result<ParseResult, SvgError> {
    let text = std::str::from_utf8(bytes)?;
    compile::compile(text)
}

/// Read and parse an SVG file.
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<ParseResult, SvgError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| SvgError::FileNotFound {
        path: path.to_owned(),
        source,
    })?;
    parse_bytes(&bytes)
}
