//! Built-in dialects
//!
//!     Bracket-tag dialects (shortcode, wpbakery, divi, avada) are static grammars over the
//!     shared bracket parser and emitter. JSON-tree dialects (elementor, oxygen) have their
//!     own parser and converter modules over the shared value codec.

pub mod avada;
pub mod divi;
pub mod elementor;
pub mod oxygen;
pub mod shortcode;
pub mod wpbakery;

pub use avada::AvadaDialect;
pub use divi::DiviDialect;
pub use elementor::ElementorDialect;
pub use oxygen::OxygenDialect;
pub use shortcode::ShortcodeDialect;
pub use wpbakery::WpBakeryDialect;
