//! [`ApplicationStore`]: the single owner of the application collection and
//! the current view criteria.
//!
//! Every mutation updates memory first, then writes the whole collection
//! through the [`Persistence`] adapter, then notifies subscribers. A failed
//! write switches the store to in-memory-only mode for the rest of the
//! session; the mutation itself still stands.

use chrono::Utc;
use tracing::{debug, warn};

use crate::{
  Error,
  application::{ApplicationId, ApplicationPatch, ApplicationStatus, JobApplication, NewApplication},
  persist::Persistence,
  query::{SortDirection, SortOption, ViewCriteria},
  stats::ApplicationStats,
  storage::KeyValueStorage,
};

// ─── Change notification ─────────────────────────────────────────────────────

/// Emitted to subscribers after the in-memory state has changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
  Added(ApplicationId),
  Updated(ApplicationId),
  Deleted(ApplicationId),
  /// A filter or sort setting was set.
  CriteriaChanged,
}

/// Handle returned by [`ApplicationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StoreEvent)>;

// ─── Store ───────────────────────────────────────────────────────────────────

pub struct ApplicationStore<S> {
  applications:      Vec<JobApplication>,
  criteria:          ViewCriteria,
  persistence:       Persistence<S>,
  durable:           bool,
  observers:         Vec<(SubscriptionId, Observer)>,
  next_subscription: u64,
}

impl<S: KeyValueStorage> ApplicationStore<S> {
  /// Open a store, loading whatever collection `persistence` holds.
  ///
  /// A missing, corrupt, or incompatible stored value opens an empty store.
  /// If the storage itself cannot be read the store also opens empty, but in
  /// memory-only mode, so the unread collection is never overwritten.
  pub fn open(persistence: Persistence<S>) -> Self {
    let (applications, durable) = match persistence.try_load() {
      Ok(apps) => (apps, true),
      Err(e @ Error::Storage(_)) => {
        warn!(error = %e, "storage unreadable; changes will be kept in memory only");
        (Vec::new(), false)
      }
      Err(e) => {
        warn!(error = %e, "stored applications rejected; starting empty");
        (Vec::new(), true)
      }
    };
    debug!(count = applications.len(), durable, "application store opened");
    Self {
      applications,
      criteria: ViewCriteria::default(),
      persistence,
      durable,
      observers: Vec::new(),
      next_subscription: 0,
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// All records in insertion order.
  pub fn applications(&self) -> &[JobApplication] { &self.applications }

  pub fn get(&self, id: ApplicationId) -> Option<&JobApplication> {
    self.applications.iter().find(|a| a.id == id)
  }

  pub fn len(&self) -> usize { self.applications.len() }

  pub fn is_empty(&self) -> bool { self.applications.is_empty() }

  pub fn criteria(&self) -> &ViewCriteria { &self.criteria }

  /// The filtered, sorted view under the current criteria. Recomputed on
  /// every call.
  pub fn visible_applications(&self) -> Vec<&JobApplication> {
    self.criteria.apply(&self.applications)
  }

  /// Counts over the whole collection, ignoring the current filter.
  pub fn stats(&self) -> ApplicationStats {
    ApplicationStats::from_applications(&self.applications)
  }

  /// `false` once a write has failed; later mutations stay in memory.
  pub fn is_durable(&self) -> bool { self.durable }

  pub fn persistence(&self) -> &Persistence<S> { &self.persistence }

  pub fn into_persistence(self) -> Persistence<S> { self.persistence }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Append a new record with a fresh id and the current time as
  /// `created_at`.
  pub fn add(&mut self, input: NewApplication) -> JobApplication {
    let mut id = ApplicationId::generate();
    while self.get(id).is_some() {
      id = ApplicationId::generate();
    }

    let app = input.into_application(id, Utc::now());
    self.applications.push(app.clone());
    debug!(%id, role = %app.role, company = %app.company, "application added");

    self.commit();
    self.notify(StoreEvent::Added(id));
    app
  }

  /// Overwrite the fields set in `patch` on the record with `id`.
  ///
  /// Returns `false` without writing anything when no record has `id`.
  pub fn update(&mut self, id: ApplicationId, patch: ApplicationPatch) -> bool {
    let Some(app) = self.applications.iter_mut().find(|a| a.id == id) else {
      debug!(%id, "update skipped; no such application");
      return false;
    };
    patch.apply_to(app);
    debug!(%id, "application updated");

    self.commit();
    self.notify(StoreEvent::Updated(id));
    true
  }

  /// Remove the record with `id`. Returns `false` when there is none.
  pub fn delete(&mut self, id: ApplicationId) -> bool {
    let Some(pos) = self.applications.iter().position(|a| a.id == id) else {
      debug!(%id, "delete skipped; no such application");
      return false;
    };
    self.applications.remove(pos);
    debug!(%id, "application deleted");

    self.commit();
    self.notify(StoreEvent::Deleted(id));
    true
  }

  // ── View criteria ─────────────────────────────────────────────────────────

  pub fn set_search_query(&mut self, query: impl Into<String>) {
    self.criteria.search_query = query.into();
    self.notify(StoreEvent::CriteriaChanged);
  }

  pub fn set_status_filter(&mut self, status: Option<ApplicationStatus>) {
    self.criteria.status_filter = status;
    self.notify(StoreEvent::CriteriaChanged);
  }

  pub fn set_sort_option(&mut self, option: SortOption) {
    self.criteria.sort_option = option;
    self.notify(StoreEvent::CriteriaChanged);
  }

  pub fn set_sort_direction(&mut self, direction: SortDirection) {
    self.criteria.sort_direction = direction;
    self.notify(StoreEvent::CriteriaChanged);
  }

  pub fn toggle_sort_direction(&mut self) {
    let next = self.criteria.sort_direction.reversed();
    self.set_sort_direction(next);
  }

  // ── Subscribers ───────────────────────────────────────────────────────────

  /// Register `observer` to be called after every change.
  pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
    let id = SubscriptionId(self.next_subscription);
    self.next_subscription += 1;
    self.observers.push((id, Box::new(observer)));
    id
  }

  /// Returns `false` if `id` was not subscribed.
  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    let before = self.observers.len();
    self.observers.retain(|(sid, _)| *sid != id);
    self.observers.len() != before
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  fn commit(&mut self) {
    if !self.durable {
      return;
    }
    if let Err(e) = self.persistence.save(&self.applications) {
      warn!(error = %e, "saving applications failed; continuing in memory only");
      self.durable = false;
    }
  }

  fn notify(&mut self, event: StoreEvent) {
    for (_, observer) in &mut self.observers {
      observer(&event);
    }
  }
}
