pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{is_same_origin, link_href, resolve_href};
