//! Reporting core: launch arena, test items and attachment encoding

pub mod attachment;
pub mod item;
pub mod launch;

#[cfg(test)]
mod tests;

pub use attachment::Attachment;
pub use item::TestItem;
pub use launch::Launch;
