pub mod clipboard;
pub mod registry;
pub mod uploader;
