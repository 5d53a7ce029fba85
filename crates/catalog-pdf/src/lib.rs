mod build;
mod compose;
mod constants;
mod logo;
mod metrics;
mod settings;
mod types;

pub use build::{assemble_catalog, build_catalog, compose_catalog};
pub use compose::{
    PlacedLogo, TextLine, artwork_frame, compose_page, content_top_mm, layout_text, logo_frame,
    place_logo,
};
pub use constants::*;
pub use logo::{Logo, resolve_logo};
pub use metrics::{char_width_ratio, text_width_mm, wrap_text};
pub use settings::*;
pub use types::*;
