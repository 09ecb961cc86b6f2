//! Remote folder tree traversal

pub mod ports;
pub mod walker;

pub use ports::FolderBrowser;
pub use walker::TreeWalker;
