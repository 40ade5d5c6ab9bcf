pub mod blocks;
pub mod dedup;
pub mod distiller;
pub mod encode;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod images;
pub mod inline;
pub mod locate;
pub mod metadata;
pub mod parse;
pub mod render;
pub mod sanitize;
pub mod visibility;
pub mod walker;

pub use blocks::{ContentBlock, EmbedPayload, ExtractedContent};
pub use dedup::dedupe;
pub use distiller::{Distiller, distill, render};
pub use encode::encode;
pub use error::{DistillError, Result};
pub use extract::{ExtractConfig, ExtractConfigBuilder, extract, extract_document, extract_with_config};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin};
pub use images::resolve_image_src;
pub use inline::serialize_inline;
pub use locate::{LocateStrategy, LocatedRoot, locate_main_content};
pub use metadata::Metadata;
pub use parse::Document;
pub use render::render_html;
pub use visibility::should_skip;
pub use walker::walk;
