//! Global war record queries — Redis implementation.
//!
//! A war lands here the first time its details are fetched, independent
//! of which corporation (if any) is involved.

use std::collections::HashSet;

use crate::client::{RedisPool, RedisResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

const ALL_WARS_KEY: &str = "warden:wars:all";

/// One side of a war as stored. Exactly one id is expected to be set;
/// the core rejects rows where neither is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRow {
    pub alliance_id: Option<i32>,
    pub corporation_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarRow {
    pub id: i32,
    pub aggressor: PartyRow,
    pub defender: PartyRow,
    #[serde(default)]
    pub allies: Vec<PartyRow>,
    pub declared: String,
    pub started: Option<String>,
    pub retracted: Option<String>,
    pub finished: Option<String>,
    #[serde(default)]
    pub mutual: bool,
    pub open_for_allies: bool,
}

fn war_key(war_id: i32) -> String {
    format!("warden:war:{}", war_id)
}

/// Insert or replace a war document and index it.
pub async fn save_war(pool: &RedisPool, row: &WarRow) -> RedisResult<()> {
    let mut conn = pool.clone();
    let json = serde_json::to_string(row)?;
    conn.hset::<_, _, _, ()>(war_key(row.id), "data", &json).await?;
    conn.sadd::<_, _, ()>(ALL_WARS_KEY, row.id).await?;
    Ok(())
}

pub async fn war_exists(pool: &RedisPool, war_id: i32) -> RedisResult<bool> {
    let mut conn = pool.clone();
    let present: bool = conn.sismember(ALL_WARS_KEY, war_id).await?;
    Ok(present)
}

/// All known war ids, ascending.
pub async fn list_war_ids(pool: &RedisPool) -> RedisResult<Vec<i32>> {
    let mut conn = pool.clone();
    let mut ids: Vec<i32> = conn.smembers(ALL_WARS_KEY).await?;
    ids.sort_unstable();
    Ok(ids)
}

pub async fn remove_war(pool: &RedisPool, war_id: i32) -> RedisResult<()> {
    let mut conn = pool.clone();
    conn.del::<_, ()>(war_key(war_id)).await?;
    conn.srem::<_, _, ()>(ALL_WARS_KEY, war_id).await?;
    Ok(())
}

/// Remove every war whose id is not in `keep`. Returns how many went.
pub async fn remove_old_wars(pool: &RedisPool, keep: &HashSet<i32>) -> RedisResult<usize> {
    let ids = list_war_ids(pool).await?;
    let mut removed = 0;
    for id in ids.into_iter().filter(|id| !keep.contains(id)) {
        remove_war(pool, id).await?;
        removed += 1;
    }
    Ok(removed)
}

pub async fn delete_all_wars(pool: &RedisPool) -> RedisResult<usize> {
    let ids = list_war_ids(pool).await?;
    let count = ids.len();
    let mut conn = pool.clone();
    for id in &ids {
        conn.del::<_, ()>(war_key(*id)).await?;
    }
    conn.del::<_, ()>(ALL_WARS_KEY).await?;
    Ok(count)
}
