//! View adapters: dashboard preview, paginated customer list, unified view

mod error;
mod page;
mod preview;
mod service;
mod unified;

#[cfg(test)]
mod testing;

pub use error::{ViewError, USER_FACING_ERROR};
pub use page::CustomerPage;
pub use preview::{time_ago, PreviewCard, PreviewView};
pub use service::{CustomerViews, CustomerViewsBuilder};
pub use unified::{UnifiedStats, UnifiedView};
