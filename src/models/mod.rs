pub mod page;

pub use page::{Page, PageParams, MAX_PAGE_SIZE};
