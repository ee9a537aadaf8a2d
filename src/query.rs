//! Collection queries: which collections come back, in what order.
//!
//! The portfolio front end always lists collections the same way: most
//! recently edited first, effectively unbounded, and drafts visible only to
//! an authenticated viewer. [`CollectionQuery::for_viewer`] encodes those
//! defaults; callers that need something else override individual knobs with
//! struct-update syntax:
//!
//! ```
//! use vernissage::query::{CollectionQuery, OrderBy, Viewer};
//!
//! let query = CollectionQuery {
//!     orderby: OrderBy::Title,
//!     limit: 10,
//!     ..CollectionQuery::for_viewer(Viewer::Anonymous)
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::store::{Collection, Status};

/// Default cap on returned collections. Portfolio sites hold a few dozen
/// collections at most, so this is "all of them" in practice.
pub const DEFAULT_LIMIT: usize = 99;

/// Who is looking at the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewer {
    /// A visitor without a session: sees published content only.
    #[default]
    Anonymous,
    /// A logged-in site editor: sees drafts and private collections too.
    Authenticated,
}

impl Viewer {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated)
    }
}

/// Sort key for collection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Last edit time. The default: the front page surfaces whatever the
    /// photographer touched most recently.
    #[default]
    Modified,
    Created,
    Title,
    Id,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

/// Which publication states a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Published collections only.
    #[default]
    Published,
    /// Every stored collection regardless of state.
    Any,
}

impl StatusFilter {
    pub fn admits(&self, status: Status) -> bool {
        match self {
            StatusFilter::Published => status == Status::Published,
            StatusFilter::Any => true,
        }
    }
}

/// A fully resolved collection query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionQuery {
    pub orderby: OrderBy,
    pub order: Order,
    pub limit: usize,
    pub status: StatusFilter,
}

impl Default for CollectionQuery {
    fn default() -> Self {
        CollectionQuery {
            orderby: OrderBy::default(),
            order: Order::default(),
            limit: DEFAULT_LIMIT,
            status: StatusFilter::default(),
        }
    }
}

impl CollectionQuery {
    /// The standard query for a given viewer: authenticated viewers see
    /// every state, everyone else sees published collections only.
    pub fn for_viewer(viewer: Viewer) -> Self {
        let status = if viewer.is_authenticated() {
            StatusFilter::Any
        } else {
            StatusFilter::Published
        };
        CollectionQuery {
            status,
            ..CollectionQuery::default()
        }
    }

    /// Filters, orders, and caps a set of collections.
    ///
    /// Store implementations delegate here so that every backend answers
    /// queries with identical semantics. The sort is stable in both
    /// directions: the direction flips the comparator, not the vec, so
    /// equal keys keep their stored order.
    pub fn apply(&self, mut collections: Vec<Collection>) -> Vec<Collection> {
        collections.retain(|c| self.status.admits(c.status));
        collections.sort_by(|a, b| {
            let by_key = match self.orderby {
                OrderBy::Modified => a.modified.cmp(&b.modified),
                OrderBy::Created => a.created.cmp(&b.created),
                OrderBy::Title => a.title.cmp(&b.title),
                OrderBy::Id => a.id.cmp(&b.id),
            };
            match self.order {
                Order::Asc => by_key,
                Order::Desc => by_key.reverse(),
            }
        });
        collections.truncate(self.limit);
        collections
    }
}

/// Collections visible to `viewer`, in the standard order.
pub fn collections_for(store: &dyn crate::store::ContentStore, viewer: Viewer) -> Vec<Collection> {
    store.collections(&CollectionQuery::for_viewer(viewer))
}
