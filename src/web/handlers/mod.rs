//! HTML page handlers.

mod home;
mod shorten;

pub use home::{HomeTemplate, home_handler};
pub use shorten::{ResultTemplate, ShortenForm, shorten_form_handler};
