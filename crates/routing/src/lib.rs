//! Ordered route table with first-match-wins lookup and atomic hot reload.
//!
//! WHY: a dispatcher needs to map method + path onto handlers or upstream
//! forwards, swap the whole route set at runtime without pausing lookups,
//! and keep an external dispatch facility in sync with what is live.
//!
//! WHAT: compiled path templates with `{name}` captures ([`PathPattern`]),
//! an ordered [`RouteTable`] scanned first-match-wins, and a [`Router`]
//! that publishes new tables atomically and mirrors the set difference into
//! a [`DispatchRegistry`].

mod entry;
mod error;
mod method;
mod pattern;
mod router;
mod table;

pub use entry::{RouteDirective, RouteEntry, RouteTarget};
pub use error::{
    DirectiveAction, DirectiveFailure, DispatchError, ReloadError, RouteError,
};
pub use method::Method;
pub use pattern::{Params, PathPattern};
pub use router::{DispatchRegistry, NullDispatch, Router};
pub use table::{RouteMatch, RouteTable};
