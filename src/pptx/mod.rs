/*!
 * Minimal `.pptx` package handling.
 *
 * Just enough OPC to translate slide text in place: the package module
 * opens the ZIP container and resolves slide ordering, the slide module
 * rewrites paragraph text while echoing all other markup verbatim.
 */

pub mod package;
pub mod slide;

pub use package::PptxPackage;
pub use slide::{rewrite_slide_text, SlideCounts};
