//! Walking a paginated collection item by item.

use crate::hal::{item_hrefs, link_href, NEXT};
use serde_json::Value;
use std::ops::ControlFlow;
use tracing::debug;

enum Walk {
    /// More items may follow; the href of the next page, or `None` for the first
    HasMore(Option<String>),
    Done,
}

/// Visit every item href of a paginated collection.
///
/// `fetch` is called with `None` for the first page (unless `start` already
/// holds it) and with the `next` href for every following page. `apply` is
/// called once per item href, in page order and then item order. When it
/// returns [`ControlFlow::Break`] the walk ends at once: the rest of the
/// page is skipped and no further page is fetched.
///
/// Errors from either callback abort the walk and are returned as is;
/// items already visited stay visited.
pub fn for_each<F, A, E>(mut fetch: F, mut apply: A, start: Option<Value>) -> Result<(), E>
where
    F: FnMut(Option<&str>) -> Result<Value, E>,
    A: FnMut(&str) -> Result<ControlFlow<()>, E>,
{
    let mut held = start;
    let mut state = Walk::HasMore(None);
    let mut pages = 0usize;

    while let Walk::HasMore(next) = state {
        let collection = match held.take() {
            Some(collection) => collection,
            None => fetch(next.as_deref())?,
        };
        pages += 1;

        state = match visit_page(&collection, &mut apply)? {
            ControlFlow::Break(()) => {
                debug!(pages, "Walk stopped by caller");
                Walk::Done
            }
            ControlFlow::Continue(()) => match link_href(&collection, NEXT) {
                Some(next) => Walk::HasMore(Some(next.to_string())),
                None => Walk::Done,
            },
        };
    }

    debug!(pages, "Walk finished");
    Ok(())
}

fn visit_page<A, E>(collection: &Value, apply: &mut A) -> Result<ControlFlow<()>, E>
where
    A: FnMut(&str) -> Result<ControlFlow<()>, E>,
{
    for href in item_hrefs(collection) {
        if apply(href)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}
