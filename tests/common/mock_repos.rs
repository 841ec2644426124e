// =====================================================
// 테스트용 인메모리 협력 객체
// =====================================================
// - MockIdentity: 사용자 조회 + 비밀번호 비교
// - InMemoryRefreshTokenStore: user_id 유니크 제약을 가진 저장소
//   (쓰기는 즉시 반영, 커밋하지 않고 drop되면 undo 로그로 롤백)
// - DelayedRefreshTokenStore: find_by_user 뒤에 지연을 넣는 래퍼
// - MockPool: 두 협력 객체가 공유하는 연결 풀 흉내 (작업 단위는 커밋/drop까지 연결 하나를 점유)
// =====================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::{Barrier, OwnedSemaphorePermit, Semaphore};

use auth_server::domains::auth::models::{RefreshTokenRecord, User};
use auth_server::shared::database::{IdentityVerifier, RefreshTokenStore, RefreshTokenUnitOfWork};
use auth_server::shared::errors::PersistenceError;

/// 연결 획득 대기 한도 (sqlx acquire_timeout 대응)
pub const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// 공유 연결 풀 흉내
pub type MockPool = Arc<Semaphore>;

pub fn mock_pool(max_connections: usize) -> MockPool {
    Arc::new(Semaphore::new(max_connections))
}

/// 풀에서 연결 하나를 얻음 (풀이 없으면 제한 없음)
async fn checkout(pool: &Option<MockPool>) -> Result<Option<OwnedSemaphorePermit>, PersistenceError> {
    let Some(pool) = pool else {
        return Ok(None);
    };
    match tokio::time::timeout(POOL_ACQUIRE_TIMEOUT, pool.clone().acquire_owned()).await {
        Ok(Ok(permit)) => Ok(Some(permit)),
        _ => Err(PersistenceError::Database(
            "pool timed out while waiting for an open connection".to_string(),
        )),
    }
}

/// 인메모리 identity 협력 객체
#[derive(Default)]
pub struct MockIdentity {
    users: Mutex<HashMap<u64, User>>,
    passwords: Mutex<HashMap<u64, String>>,
    next_id: AtomicU64,
    dummy_verifications: AtomicUsize,
    pool: Option<MockPool>,
}

impl MockIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// 조회마다 공유 풀에서 연결을 빌림
    pub fn with_pool(pool: MockPool) -> Self {
        Self {
            pool: Some(pool),
            ..Self::default()
        }
    }

    /// 없는 이메일에 대해 더미 검증이 수행된 횟수
    pub fn dummy_verifications(&self) -> usize {
        self.dummy_verifications.load(Ordering::SeqCst)
    }

    /// 테스트 사용자 추가
    pub fn add_user(&self, email: &str, password: &str, username: Option<&str>) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            email: email.to_string(),
            password_hash: format!("mock${}", id),
            username: username.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.users.lock().insert(id, user.clone());
        self.passwords.lock().insert(id, password.to_string());
        user
    }

    /// 사용자 삭제 (Refresh Token은 남겨둠)
    pub fn remove_user(&self, id: u64) {
        self.users.lock().remove(&id);
        self.passwords.lock().remove(&id);
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentity {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PersistenceError> {
        let _conn = checkout(&self.pool).await?;
        Ok(self
            .users
            .lock()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, PersistenceError> {
        let _conn = checkout(&self.pool).await?;
        Ok(self.users.lock().get(&id).cloned())
    }

    async fn verify_password(&self, user: &User, password: &str) -> bool {
        self.passwords
            .lock()
            .get(&user.id)
            .is_some_and(|stored| stored == password)
    }

    async fn verify_dummy_password(&self, _password: &str) {
        self.dummy_verifications.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct StoreState {
    // user_id -> record (키 자체가 유니크 제약)
    rows: HashMap<u64, RefreshTokenRecord>,
    next_id: i64,
}

/// 인메모리 Refresh Token 저장소
#[derive(Default, Clone)]
pub struct InMemoryRefreshTokenStore {
    state: Arc<Mutex<StoreState>>,
    conflicts: Arc<AtomicUsize>,
    fail_next_commit: Arc<AtomicBool>,
    pool: Option<MockPool>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 작업 단위마다 공유 풀에서 연결을 점유
    pub fn with_pool(pool: MockPool) -> Self {
        Self {
            pool: Some(pool),
            ..Self::default()
        }
    }

    /// 저장된 레코드 수
    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    pub fn record_for_user(&self, user_id: u64) -> Option<RefreshTokenRecord> {
        self.state.lock().rows.get(&user_id).cloned()
    }

    /// 레코드 직접 삽입 (만료 테스트용)
    pub fn insert_record(&self, user_id: u64, code: &str, expires_at: DateTime<Utc>) {
        let mut state = self.state.lock();
        state.next_id += 1;
        let record = RefreshTokenRecord {
            id: state.next_id,
            user_id,
            code: code.to_string(),
            expires_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        state.rows.insert(user_id, record);
    }

    /// 유니크 제약 위반 횟수
    pub fn conflicts(&self) -> usize {
        self.conflicts.load(Ordering::SeqCst)
    }

    /// 쓰기가 있는 다음 커밋을 실패시킴
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn begin(&self) -> Result<Box<dyn RefreshTokenUnitOfWork>, PersistenceError> {
        let conn = checkout(&self.pool).await?;
        Ok(Box::new(InMemoryUnitOfWork {
            store: self.clone(),
            undo: Vec::new(),
            committed: false,
            _conn: conn,
        }))
    }
}

enum Undo {
    Remove(u64),
    Restore(RefreshTokenRecord),
}

pub struct InMemoryUnitOfWork {
    store: InMemoryRefreshTokenStore,
    undo: Vec<Undo>,
    committed: bool,
    _conn: Option<OwnedSemaphorePermit>,
}

#[async_trait]
impl RefreshTokenUnitOfWork for InMemoryUnitOfWork {
    async fn find_by_user(
        &mut self,
        user_id: u64,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError> {
        Ok(self.store.state.lock().rows.get(&user_id).cloned())
    }

    async fn find_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError> {
        Ok(self
            .store
            .state
            .lock()
            .rows
            .values()
            .find(|record| record.code == code)
            .cloned())
    }

    async fn insert(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        let mut state = self.store.state.lock();
        if state.rows.contains_key(&user_id) {
            self.store.conflicts.fetch_add(1, Ordering::SeqCst);
            return Err(PersistenceError::Conflict);
        }

        state.next_id += 1;
        let now = Utc::now();
        let record = RefreshTokenRecord {
            id: state.next_id,
            user_id,
            code: code.to_string(),
            expires_at,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(user_id, record);
        self.undo.push(Undo::Remove(user_id));
        Ok(())
    }

    async fn update_for_user(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        let mut state = self.store.state.lock();
        let Some(record) = state.rows.get_mut(&user_id) else {
            return Ok(false);
        };

        self.undo.push(Undo::Restore(record.clone()));
        record.code = code.to_string();
        record.expires_at = expires_at;
        record.updated_at = Utc::now();
        Ok(true)
    }

    async fn rotate(
        &mut self,
        old_code: &str,
        new_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        let mut state = self.store.state.lock();
        let Some(record) = state.rows.values_mut().find(|record| record.code == old_code) else {
            return Ok(false);
        };

        self.undo.push(Undo::Restore(record.clone()));
        record.code = new_code.to_string();
        record.expires_at = expires_at;
        record.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_by_code(&mut self, code: &str) -> Result<bool, PersistenceError> {
        let mut state = self.store.state.lock();
        let user_id = match state.rows.values().find(|record| record.code == code) {
            Some(record) => record.user_id,
            None => return Ok(false),
        };

        if let Some(removed) = state.rows.remove(&user_id) {
            self.undo.push(Undo::Restore(removed));
        }
        Ok(true)
    }

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError> {
        let mut this = self;
        if !this.undo.is_empty() && this.store.fail_next_commit.swap(false, Ordering::SeqCst) {
            // drop 시 undo 로그로 롤백됨
            return Err(PersistenceError::Database("injected commit failure".to_string()));
        }
        this.committed = true;
        Ok(())
    }
}

impl Drop for InMemoryUnitOfWork {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        let mut state = self.store.state.lock();
        for undo in self.undo.drain(..).rev() {
            match undo {
                Undo::Remove(user_id) => {
                    state.rows.remove(&user_id);
                }
                Undo::Restore(record) => {
                    state.rows.insert(record.user_id, record);
                }
            }
        }
    }
}

/// find_by_user와 다음 쓰기 사이에 지연을 넣는 저장소 래퍼
///
/// 처음 `gate_parties`번의 find_by_user는 서로를 기다린 뒤 진행하므로,
/// 두 요청이 모두 "레코드 없음"을 본 상태에서 insert 경쟁이 일어남.
#[derive(Clone)]
pub struct DelayedRefreshTokenStore {
    inner: InMemoryRefreshTokenStore,
    delay: Duration,
    gate: Arc<Barrier>,
    gate_parties: usize,
    find_calls: Arc<AtomicUsize>,
}

impl DelayedRefreshTokenStore {
    pub fn new(inner: InMemoryRefreshTokenStore, delay: Duration, gate_parties: usize) -> Self {
        Self {
            inner,
            delay,
            gate: Arc::new(Barrier::new(gate_parties)),
            gate_parties,
            find_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl RefreshTokenStore for DelayedRefreshTokenStore {
    async fn begin(&self) -> Result<Box<dyn RefreshTokenUnitOfWork>, PersistenceError> {
        Ok(Box::new(DelayedUnitOfWork {
            inner: self.inner.begin().await?,
            store: self.clone(),
        }))
    }
}

pub struct DelayedUnitOfWork {
    inner: Box<dyn RefreshTokenUnitOfWork>,
    store: DelayedRefreshTokenStore,
}

#[async_trait]
impl RefreshTokenUnitOfWork for DelayedUnitOfWork {
    async fn find_by_user(
        &mut self,
        user_id: u64,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError> {
        let found = self.inner.find_by_user(user_id).await?;

        if self.store.find_calls.fetch_add(1, Ordering::SeqCst) < self.store.gate_parties {
            self.store.gate.wait().await;
        }
        tokio::time::sleep(self.store.delay).await;

        Ok(found)
    }

    async fn find_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError> {
        self.inner.find_by_code(code).await
    }

    async fn insert(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        self.inner.insert(user_id, code, expires_at).await
    }

    async fn update_for_user(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        self.inner.update_for_user(user_id, code, expires_at).await
    }

    async fn rotate(
        &mut self,
        old_code: &str,
        new_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        self.inner.rotate(old_code, new_code, expires_at).await
    }

    async fn delete_by_code(&mut self, code: &str) -> Result<bool, PersistenceError> {
        self.inner.delete_by_code(code).await
    }

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError> {
        let this = *self;
        this.inner.commit().await
    }
}
