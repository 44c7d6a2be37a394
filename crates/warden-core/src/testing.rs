//! Test fakes and builders shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{WardenError, WardenResult};
use crate::model::{AllianceId, Channel, Corporation, CorporationId, Party, War, WarId};
use crate::notification::NotificationPayload;
use crate::ports::{Notifier, WarApi};

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
}

pub fn corp(id: i32) -> Party {
    Party::Corporation(CorporationId(id))
}

pub fn alliance(id: i32) -> Party {
    Party::Alliance(AllianceId(id))
}

pub fn corporation(id: i32, alliance_id: Option<i32>, war_eligible: bool) -> Corporation {
    Corporation {
        corporation_id: CorporationId(id),
        alliance_id: alliance_id.map(AllianceId),
        name: format!("Corporation {}", id),
        war_eligible,
    }
}

pub fn war(id: i32, aggressor: Party, defender: Party) -> War {
    War {
        id: WarId(id),
        aggressor,
        defender,
        allies: Vec::new(),
        declared: ts("2026-10-01T12:00:00Z"),
        started: None,
        retracted: None,
        finished: None,
        mutual: false,
        open_for_allies: false,
    }
}

/// Scriptable upstream API.
#[derive(Default)]
pub struct FakeApi {
    candidates: Mutex<Option<Vec<WarId>>>,
    wars: Mutex<HashMap<WarId, War>>,
    failing_wars: Mutex<HashSet<WarId>>,
    war_fetches: Mutex<Vec<WarId>>,
    alliance_names: HashMap<i32, String>,
    corporation_names: HashMap<i32, String>,
    corporations: HashMap<i32, Corporation>,
    failing_names: Mutex<HashSet<i32>>,
    name_lookups: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self { candidates: Mutex::new(Some(Vec::new())), ..Default::default() }
    }

    pub fn with_alliance_name(mut self, id: i32, name: &str) -> Self {
        self.alliance_names.insert(id, name.to_string());
        self
    }

    pub fn with_corporation_name(mut self, id: i32, name: &str) -> Self {
        self.corporation_names.insert(id, name.to_string());
        self
    }

    pub fn with_corporation(mut self, corporation: Corporation) -> Self {
        self.corporations.insert(corporation.corporation_id.0, corporation);
        self
    }

    pub fn failing_name(self, id: i32) -> Self {
        self.failing_names.lock().unwrap().insert(id);
        self
    }

    pub fn heal_name(&self, id: i32) {
        self.failing_names.lock().unwrap().remove(&id);
    }

    /// Publish wars: they become candidates and fetchable.
    pub fn publish(&self, wars: &[War]) {
        *self.candidates.lock().unwrap() = Some(wars.iter().map(|w| w.id).collect());
        let mut stored = self.wars.lock().unwrap();
        for w in wars {
            stored.insert(w.id, w.clone());
        }
    }

    pub fn set_candidates(&self, ids: &[i32]) {
        *self.candidates.lock().unwrap() = Some(ids.iter().copied().map(WarId).collect());
    }

    pub fn fail_candidates(&self) {
        *self.candidates.lock().unwrap() = None;
    }

    pub fn update_war(&self, war: War) {
        self.wars.lock().unwrap().insert(war.id, war);
    }

    pub fn fail_war(&self, id: i32) {
        self.failing_wars.lock().unwrap().insert(WarId(id));
    }

    pub fn heal_war(&self, id: i32) {
        self.failing_wars.lock().unwrap().remove(&WarId(id));
    }

    pub fn war_fetches(&self) -> Vec<WarId> {
        self.war_fetches.lock().unwrap().clone()
    }

    pub fn name_lookups(&self) -> usize {
        self.name_lookups.load(Ordering::SeqCst)
    }

    fn lookup(&self, id: i32, names: &HashMap<i32, String>, fallback: String) -> WardenResult<String> {
        self.name_lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing_names.lock().unwrap().contains(&id) {
            return Err(WardenError::upstream(format!("lookup of {} failed", id)));
        }
        Ok(names.get(&id).cloned().unwrap_or(fallback))
    }
}

#[async_trait]
impl WarApi for FakeApi {
    async fn war_ids(&self) -> WardenResult<Vec<WarId>> {
        self.candidates
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| WardenError::upstream("war list unavailable"))
    }

    async fn war(&self, war_id: WarId) -> WardenResult<War> {
        self.war_fetches.lock().unwrap().push(war_id);
        if self.failing_wars.lock().unwrap().contains(&war_id) {
            return Err(WardenError::upstream(format!("war {} unavailable", war_id)));
        }
        self.wars
            .lock()
            .unwrap()
            .get(&war_id)
            .cloned()
            .ok_or_else(|| WardenError::NotFound(format!("war {}", war_id)))
    }

    async fn alliance_name(&self, alliance_id: AllianceId) -> WardenResult<String> {
        self.lookup(alliance_id.0, &self.alliance_names, format!("Alliance {}", alliance_id))
    }

    async fn corporation_name(&self, corporation_id: CorporationId) -> WardenResult<String> {
        self.lookup(corporation_id.0, &self.corporation_names, format!("Corporation {}", corporation_id))
    }

    async fn corporation(&self, corporation_id: CorporationId) -> WardenResult<Corporation> {
        self.corporations
            .get(&corporation_id.0)
            .cloned()
            .ok_or_else(|| WardenError::NotFound(format!("corporation {}", corporation_id)))
    }
}

/// Notifier that remembers what it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Vec<String>, NotificationPayload)>>,
}

impl RecordingNotifier {
    pub fn payloads(&self) -> Vec<NotificationPayload> {
        self.sent.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn channel_names(&self) -> Vec<Vec<String>> {
        self.sent.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn dispatch(&self, channels: &[Channel], payload: &NotificationPayload) {
        let names = channels.iter().map(|c| c.name.clone()).collect();
        self.sent.lock().unwrap().push((names, payload.clone()));
    }
}

/// Notifier whose deliveries wait until the test releases them.
pub struct HeldNotifier {
    permits: tokio::sync::Semaphore,
    delivered: RecordingNotifier,
}

impl HeldNotifier {
    pub fn new() -> Self {
        Self { permits: tokio::sync::Semaphore::new(0), delivered: RecordingNotifier::default() }
    }

    pub fn release(&self, deliveries: usize) {
        self.permits.add_permits(deliveries);
    }

    pub fn count(&self) -> usize {
        self.delivered.count()
    }
}

#[async_trait]
impl Notifier for HeldNotifier {
    async fn dispatch(&self, channels: &[Channel], payload: &NotificationPayload) {
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
        self.delivered.dispatch(channels, payload).await;
    }
}
