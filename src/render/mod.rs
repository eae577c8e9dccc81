pub mod outline;
pub mod structure;

pub use outline::{
    listing, MarkerStyle, OutlineRenderer, CHECKLIST_MARKER, DEFAULT_INDENT_WIDTH, OUTLINE_MARKER,
};
pub use structure::package_structure;
