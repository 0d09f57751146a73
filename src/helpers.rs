pub mod digest;
pub mod format;
pub mod page;
pub mod panels;
pub mod table;
