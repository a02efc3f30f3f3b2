//! Modal dialogs layered over the pages.

pub mod category_form;
pub mod confirm;
pub mod task_filter;
pub mod task_form;

pub use category_form::CategoryForm;
pub use confirm::ConfirmModal;
pub use task_filter::TaskFilterModal;
pub use task_form::TaskForm;
