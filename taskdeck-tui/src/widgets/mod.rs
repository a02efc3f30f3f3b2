//! Small widgets shared by the pages and modals.

pub mod form;
pub mod select;

pub use select::Select;
