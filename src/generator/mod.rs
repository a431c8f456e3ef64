//! Output generators beyond the HTML pages.

pub mod feed;
