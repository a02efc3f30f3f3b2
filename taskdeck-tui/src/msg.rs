//! Messages delivered to the event loop by background fetches.

use gridview::table::PageRequest;
use taskdeck_api::Error;
use taskdeck_api::envelope::Paged;
use taskdeck_api::model::{Category, Task};

#[derive(Debug)]
pub enum AppMsg {
    // Auth
    LoggedIn(Result<String, Error>),
    SignUpCodeSent(Result<(), Error>),
    AccountCreated(Result<(), Error>),
    ResetCodeSent(Result<(), Error>),
    PasswordReset(Result<(), Error>),

    // Tasks: the table's pagination callback routes through here so
    // the page can attach its current filter before fetching.
    TaskPageRequest(PageRequest),
    TasksLoaded(Result<Paged<Task>, Error>),
    TaskSaved(Result<(), Error>),
    TaskDeleted(Result<(), Error>),

    // Categories
    CategoriesLoaded(Result<Vec<Category>, Error>),
    CategorySaved(Result<(), Error>),
    CategoryDeleted(Result<(), Error>),
}
