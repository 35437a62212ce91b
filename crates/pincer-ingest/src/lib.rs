pub mod timeline;

pub use timeline::{build_timeline, group_by_account, parse_event};
