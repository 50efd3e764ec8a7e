use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::WizardError;
use crate::wizard::steps::WizardKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
	Text(String),
	Flag(bool),
}

/// What one user has entered so far in one wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSession {
	step: usize,
	/// Key of the row being edited.
	target: Option<String>,
	fields: Vec<(&'static str, FieldValue)>,
}

impl PendingSession {
	pub fn new(target: Option<String>) -> Self {
		Self {
			target,
			..Self::default()
		}
	}

	pub fn step(&self) -> usize {
		self.step
	}

	pub fn target(&self) -> Option<&str> {
		self.target.as_deref()
	}

	pub fn get(&self, field: &str) -> Option<&FieldValue> {
		self.fields.iter().find(|(name, _)| *name == field).map(|(_, value)| value)
	}

	pub fn set(&mut self, field: &'static str, value: FieldValue) {
		match self.fields.iter_mut().find(|(name, _)| *name == field) {
			Some(slot) => slot.1 = value,
			None => self.fields.push((field, value)),
		}
	}

	pub fn advance(&mut self) {
		self.step += 1;
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
	pub user: u64,
	pub kind: WizardKind,
}

struct Entry {
	session: PendingSession,
	touched: Instant,
}

/// Pending wizard sessions, one per user and wizard kind.
///
/// Starting a wizard replaces any unfinished session of the same kind for
/// that user. Sessions idle for longer than the TTL count as gone; a TTL of
/// `None` keeps them until they are finalized or cancelled.
pub struct SessionStore {
	entries: Mutex<HashMap<SessionKey, Entry>>,
	ttl: Option<Duration>,
}

impl SessionStore {
	pub fn new(ttl: Option<Duration>) -> Self {
		Self {
			entries: Mutex::new(HashMap::new()),
			ttl,
		}
	}

	fn expired(&self, entry: &Entry, now: Instant) -> bool {
		self.ttl.is_some_and(|ttl| now.duration_since(entry.touched) > ttl)
	}

	/// Returns true when an unfinished session was overwritten.
	pub async fn start(&self, key: SessionKey, session: PendingSession) -> bool {
		let now = Instant::now();
		let mut entries = self.entries.lock().await;
		let replaced = entries
			.insert(key, Entry { session, touched: now })
			.is_some_and(|old| !self.expired(&old, now));
		if replaced {
			info!("user {} restarted {:?}, previous input discarded", key.user, key.kind);
		}
		replaced
	}

	pub async fn get(&self, key: SessionKey) -> Option<PendingSession> {
		let entries = self.entries.lock().await;
		entries
			.get(&key)
			.filter(|entry| !self.expired(entry, Instant::now()))
			.map(|entry| entry.session.clone())
	}

	/// Runs `f` on the session if it is live and on `step`.
	pub async fn update<R>(
		&self,
		key: SessionKey,
		step: usize,
		f: impl FnOnce(&mut PendingSession) -> R,
	) -> Result<R, WizardError> {
		let now = Instant::now();
		let mut entries = self.entries.lock().await;
		let entry = match entries.get_mut(&key) {
			Some(entry) if !self.expired(entry, now) && entry.session.step == step => entry,
			_ => return Err(WizardError::Stale),
		};
		entry.touched = now;
		Ok(f(&mut entry.session))
	}

	/// Removes and returns the session. An absent or expired one comes back empty.
	pub async fn take(&self, key: SessionKey) -> PendingSession {
		let now = Instant::now();
		let mut entries = self.entries.lock().await;
		match entries.remove(&key) {
			Some(entry) if !self.expired(&entry, now) => entry.session,
			_ => PendingSession::default(),
		}
	}

	pub async fn cancel(&self, key: SessionKey) -> bool {
		self.entries.lock().await.remove(&key).is_some()
	}

	pub async fn evict_expired(&self) -> usize {
		let now = Instant::now();
		let mut entries = self.entries.lock().await;
		let before = entries.len();
		entries.retain(|_, entry| !self.expired(entry, now));
		before - entries.len()
	}

	pub async fn len(&self) -> usize {
		self.entries.lock().await.len()
	}
}

/// Periodically drops expired sessions until `token` is cancelled.
pub fn spawn_sweeper(store: Arc<SessionStore>, every: Duration, token: CancellationToken) -> JoinHandle<()> {
	tokio::spawn(async move {
		let mut interval = tokio::time::interval(every);
		loop {
			tokio::select! {
				_ = token.cancelled() => {
					break;
				}
				_ = interval.tick() => {
					let evicted = store.evict_expired().await;
					if evicted > 0 {
						info!("evicted {} abandoned wizard session(s), {} still pending", evicted, store.len().await);
					}
				}
			}
		}
		debug!("session sweeper stopped");
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;

	const KEY: SessionKey = SessionKey {
		user: 42,
		kind: WizardKind::AddMember,
	};

	fn text(value: &str) -> FieldValue {
		FieldValue::Text(value.to_string())
	}

	#[tokio::test]
	async fn restart_overwrites_instead_of_merging() {
		let store = SessionStore::new(None);
		assert!(!store.start(KEY, PendingSession::new(None)).await);
		store.update(KEY, 0, |s| s.set("status", text("Inactive"))).await.unwrap();

		assert!(store.start(KEY, PendingSession::new(None)).await);
		assert_eq!(store.get(KEY).await, Some(PendingSession::default()));
	}

	#[tokio::test]
	async fn kinds_and_users_are_isolated() {
		let store = SessionStore::new(None);
		let other_kind = SessionKey {
			kind: WizardKind::AddWatch,
			..KEY
		};
		let other_user = SessionKey { user: 7, ..KEY };
		store.start(KEY, PendingSession::new(None)).await;
		store.start(other_kind, PendingSession::new(None)).await;
		store.start(other_user, PendingSession::new(None)).await;

		store.update(KEY, 0, |s| s.set("status", text("Left"))).await.unwrap();

		assert_eq!(store.len().await, 3);
		assert_eq!(store.get(other_kind).await.unwrap().get("status"), None);
		assert_eq!(store.get(other_user).await.unwrap().get("status"), None);
	}

	#[tokio::test]
	async fn update_rejects_wrong_step_and_missing_session() {
		let store = SessionStore::new(None);
		assert_matches!(store.update(KEY, 0, |_| ()).await, Err(WizardError::Stale));

		store.start(KEY, PendingSession::new(None)).await;
		store.update(KEY, 0, |s| s.advance()).await.unwrap();
		assert_matches!(store.update(KEY, 0, |_| ()).await, Err(WizardError::Stale));
		assert!(store.update(KEY, 1, |_| ()).await.is_ok());
	}

	#[tokio::test]
	async fn take_is_destructive() {
		let store = SessionStore::new(None);
		store.start(KEY, PendingSession::new(Some("Alice".into()))).await;

		assert_eq!(store.take(KEY).await.target(), Some("Alice"));
		assert_eq!(store.take(KEY).await, PendingSession::default());
		assert_eq!(store.len().await, 0);
	}

	#[test]
	fn set_replaces_existing_field() {
		let mut session = PendingSession::default();
		session.set("house", text("Oakwood"));
		session.set("house", text("Pinecrest"));
		assert_eq!(session.get("house"), Some(&text("Pinecrest")));
		assert_eq!(session.fields.len(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn idle_sessions_expire_after_ttl() {
		let store = SessionStore::new(Some(Duration::from_secs(900)));
		store.start(KEY, PendingSession::new(None)).await;

		tokio::time::advance(Duration::from_secs(600)).await;
		store.update(KEY, 0, |s| s.advance()).await.unwrap();

		tokio::time::advance(Duration::from_secs(600)).await;
		assert!(store.get(KEY).await.is_some());

		tokio::time::advance(Duration::from_secs(301)).await;
		assert!(store.get(KEY).await.is_none());
		assert_matches!(store.update(KEY, 1, |_| ()).await, Err(WizardError::Stale));
		assert_eq!(store.evict_expired().await, 1);
		assert_eq!(store.len().await, 0);
	}

	#[tokio::test(start_paused = true)]
	async fn sweeper_reclaims_abandoned_sessions() {
		let store = Arc::new(SessionStore::new(Some(Duration::from_secs(60))));
		store.start(KEY, PendingSession::new(None)).await;
		let token = CancellationToken::new();
		let handle = spawn_sweeper(Arc::clone(&store), Duration::from_secs(30), token.clone());

		tokio::time::sleep(Duration::from_secs(95)).await;
		assert_eq!(store.len().await, 0);

		token.cancel();
		handle.await.unwrap();
	}
}
