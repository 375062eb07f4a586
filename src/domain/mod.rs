pub mod class_counts;
pub mod classifier;
pub mod completion;
pub mod patent;
pub mod report;
pub mod store;

pub use class_counts::{ClassCounts, MajorEntry, merge, subtract};
pub use classifier::parse;
pub use completion::{CompletionMark, CompletionMarks};
pub use patent::{NewPatent, PatentRecord};
pub use store::KeyValueStore;
