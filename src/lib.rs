pub mod converters;
pub mod errors;
pub mod models;
pub mod wasm;

pub use converters::svg::{generate_text_svg, split_text_for_svg, Line};
pub use errors::{AvatarError, Result};
pub use models::colors::{Color, Hsl, Rgb};
pub use models::options::{FontSizing, SvgTextOptions};
