//! Semaphore classification

use crate::model::{HttpStatus, Semaphore};

/// Maps a URL's status and indexability to its semaphore
///
/// # Decision Table
///
/// Rules are evaluated top to bottom, first match wins:
///
/// | Status | Indexable | Semaphore |
/// |--------|-----------|-----------|
/// | not 200 (including fetch error) | any | Red |
/// | 200 | false | Red |
/// | 200 | true | Green |
/// | anything else | | Yellow |
///
/// The last row cannot be reached with the inputs above. It keeps the
/// three-state taxonomy open for statuses that may later get their own
/// treatment, such as redirects.
pub fn classify(status: HttpStatus, indexable: bool) -> Semaphore {
    if !status.is_ok() || !indexable {
        Semaphore::Red
    } else if status.is_ok() && indexable {
        Semaphore::Green
    } else {
        Semaphore::Yellow
    }
}
