//! List synchronization: a cached, filtered view of one remote collection
//! plus the form that feeds it.

mod form;
mod handle;
mod list;

pub use form::FormController;
pub use handle::LoadHandle;
pub use list::ResourceList;
