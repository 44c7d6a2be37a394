//! Per-corporation war ledger queries — Redis implementation.
//!
//! Each corporation keeps its own copy of the last war snapshot it was
//! told about. Entries are only removed by [`delete_all_corp_wars`].

use crate::client::{RedisPool, RedisResult};
use crate::queries::wars::WarRow;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub corporation_id: i32,
    pub war: WarRow,
    pub observed_at: String,
}

fn index_key(corporation_id: i32) -> String {
    format!("warden:corp:{}:wars", corporation_id)
}

fn entry_key(corporation_id: i32, war_id: i32) -> String {
    format!("warden:corp:{}:war:{}", corporation_id, war_id)
}

/// Insert or replace a ledger entry. `score` orders the index
/// (declared time, epoch seconds).
pub async fn save_corp_war(pool: &RedisPool, row: &LedgerRow, score: i64) -> RedisResult<()> {
    let mut conn = pool.clone();
    let key = entry_key(row.corporation_id, row.war.id);
    conn.hset::<_, _, _, ()>(&key, "data", serde_json::to_string(row)?).await?;
    conn.hset::<_, _, _, ()>(&key, "observed_at", &row.observed_at).await?;
    conn.zadd::<_, _, _, ()>(index_key(row.corporation_id), row.war.id, score).await?;
    Ok(())
}

pub async fn get_corp_war(
    pool: &RedisPool,
    corporation_id: i32,
    war_id: i32,
) -> RedisResult<Option<LedgerRow>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(entry_key(corporation_id, war_id), "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

pub async fn list_corp_wars(pool: &RedisPool, corporation_id: i32) -> RedisResult<Vec<LedgerRow>> {
    let mut conn = pool.clone();
    let ids: Vec<i32> = conn.zrange(index_key(corporation_id), 0, -1).await?;
    let mut rows = Vec::with_capacity(ids.len());
    for id in ids {
        let mut c = pool.clone();
        let json: Option<String> = c.hget(entry_key(corporation_id, id), "data").await?;
        if let Some(j) = json {
            match serde_json::from_str::<LedgerRow>(&j) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    tracing::warn!(corporation_id, war_id = id, error = %e, "Skipping unreadable ledger entry");
                }
            }
        }
    }
    Ok(rows)
}

pub async fn delete_all_corp_wars(pool: &RedisPool, corporation_id: i32) -> RedisResult<usize> {
    let mut conn = pool.clone();
    let ids: Vec<i32> = conn.zrange(index_key(corporation_id), 0, -1).await?;
    for id in &ids {
        conn.del::<_, ()>(entry_key(corporation_id, *id)).await?;
    }
    conn.del::<_, ()>(index_key(corporation_id)).await?;
    Ok(ids.len())
}
