pub mod internal;
pub mod target;
pub mod url;
