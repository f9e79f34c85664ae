//! The router: an atomically swappable route table plus the external
//! dispatch facility it keeps in sync during reloads.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use crate::entry::{RouteDirective, RouteEntry};
use crate::error::{DirectiveAction, DirectiveFailure, DispatchError, ReloadError};
use crate::method::Method;
use crate::table::{RouteMatch, RouteTable};

/// External facility that mirrors the live route set, e.g. an OS protocol
/// handler registry or an upstream gateway.
pub trait DispatchRegistry: Send + Sync {
    /// Called for each route added by a reload.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the facility rejects the route.
    fn register(&self, entry: &RouteEntry) -> Result<(), DispatchError>;

    /// Called for each route removed by a reload.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the facility rejects the removal.
    fn unregister(&self, entry: &RouteEntry) -> Result<(), DispatchError>;
}

/// Dispatch registry that accepts everything and does nothing. Used when no
/// external facility needs mirroring.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDispatch;

impl DispatchRegistry for NullDispatch {
    fn register(&self, _entry: &RouteEntry) -> Result<(), DispatchError> {
        Ok(())
    }

    fn unregister(&self, _entry: &RouteEntry) -> Result<(), DispatchError> {
        Ok(())
    }
}

/// Route lookup front-end with atomic hot reload.
///
/// Lookups read a snapshot of the current table and never block. Reloads are
/// serialized by an internal lock and publish the new table in one atomic
/// swap: a concurrent lookup sees either the old table or the new one, never
/// a mix.
pub struct Router {
    table: ArcSwap<RouteTable>,
    dispatch: Arc<dyn DispatchRegistry>,
    reload_lock: Mutex<()>,
}

impl Router {
    /// Creates a router with an empty table and no external dispatch.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatch(Arc::new(NullDispatch))
    }

    /// Creates a router mirroring route changes into `dispatch`.
    #[must_use]
    pub fn with_dispatch(dispatch: Arc<dyn DispatchRegistry>) -> Self {
        Self {
            table: ArcSwap::from_pointee(RouteTable::default()),
            dispatch,
            reload_lock: Mutex::new(()),
        }
    }

    /// The current table snapshot.
    #[must_use]
    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Looks the request up in the current table snapshot.
    #[must_use]
    pub fn matches(&self, method: Method, path: &str) -> Option<RouteMatch> {
        self.table.load().find(method, path)
    }

    /// Compiles `directives` and swaps them in as the new table.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::InvalidDirective`] without touching the live
    /// table when any directive fails to compile, or
    /// [`ReloadError::Dispatch`] when the new table was published but some
    /// dispatch (un)registrations failed.
    pub fn reload(&self, directives: &[RouteDirective]) -> Result<(), ReloadError> {
        let mut entries = Vec::with_capacity(directives.len());
        for directive in directives {
            entries.push(RouteEntry::from_directive(directive)?);
        }
        self.reload_entries(entries)
    }

    /// Swaps `entries` in as the new table, mirroring the set difference
    /// against the old table into the dispatch registry.
    ///
    /// Additions are registered before the swap so a request matched against
    /// the new table finds its dispatch in place; removals are unregistered
    /// after, once no new lookup can reach them. Every directive is
    /// attempted; failures are collected rather than aborting the reload.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::Dispatch`] listing each failed directive. The
    /// new table is live even when this errors.
    pub fn reload_entries(&self, entries: Vec<RouteEntry>) -> Result<(), ReloadError> {
        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let old = self.table.load_full();
        let mut failures = Vec::new();
        let mut added = 0usize;

        // set difference over full entries: an edited route counts as one
        // removal plus one addition
        for entry in entries.iter().filter(|e| !old.entries().contains(e)) {
            added += 1;
            debug!(route = %entry.label(), "registering route");
            if let Err(failure) = self.dispatch.register(entry) {
                warn!(route = %entry.label(), error = %failure, "route registration failed");
                failures.push(DirectiveFailure {
                    action: DirectiveAction::Register,
                    directive: entry.label(),
                    source: failure,
                });
            }
        }

        let removed: Vec<RouteEntry> = old
            .entries()
            .iter()
            .filter(|e| !entries.contains(e))
            .cloned()
            .collect();

        let total = entries.len();
        self.table.store(Arc::new(RouteTable::new(entries)));
        info!(
            routes = total,
            added,
            removed = removed.len(),
            "route table published"
        );

        for entry in &removed {
            debug!(route = %entry.label(), "unregistering route");
            if let Err(failure) = self.dispatch.unregister(entry) {
                warn!(route = %entry.label(), error = %failure, "route unregistration failed");
                failures.push(DirectiveFailure {
                    action: DirectiveAction::Unregister,
                    directive: entry.label(),
                    source: failure,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ReloadError::Dispatch(failures))
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.load().len())
            .finish_non_exhaustive()
    }
}
