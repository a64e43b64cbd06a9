pub mod codec;
pub mod record_list;
pub mod store;

pub use record_list::{MergeSummary, RecordList};
pub use store::{LoadStatus, Loaded, RecordStore};
