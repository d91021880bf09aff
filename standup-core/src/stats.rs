//! Per-member statistics over recorded spins

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One member's appearance in one recorded spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub session_id: Uuid,
    pub member_id: i64,
    pub member_name: String,
    pub emoji: String,
    /// 1-indexed slot position. Paired members share a position.
    pub position: u32,
    pub twist_type: String,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregated speaking-order statistics for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStats {
    pub member_id: i64,
    pub member_name: String,
    pub emoji: String,
    pub first_count: u32,
    pub last_count: u32,
    pub total_standups: u32,
    pub avg_position: f64,
}

#[derive(Default)]
struct Tally {
    first: u32,
    last: u32,
    sessions: Vec<Uuid>,
    position_sum: u64,
    appearances: u32,
}

/// Aggregate records into per-member stats, busiest members first.
///
/// A record at position 1 counts as first. Otherwise a record at the
/// session's highest position counts as last, so a one-slot session
/// only ever counts as first.
pub fn aggregate(records: &[SpinRecord]) -> Vec<MemberStats> {
    let mut session_sizes: HashMap<Uuid, u32> = HashMap::new();
    for r in records {
        let size = session_sizes.entry(r.session_id).or_default();
        *size = (*size).max(r.position);
    }

    let mut tallies: HashMap<i64, (Tally, &SpinRecord)> = HashMap::new();
    for r in records {
        let (tally, _) = tallies
            .entry(r.member_id)
            .or_insert_with(|| (Tally::default(), r));

        if r.position == 1 {
            tally.first += 1;
        } else if session_sizes.get(&r.session_id) == Some(&r.position) {
            tally.last += 1;
        }
        if !tally.sessions.contains(&r.session_id) {
            tally.sessions.push(r.session_id);
        }
        tally.position_sum += u64::from(r.position);
        tally.appearances += 1;
    }

    let mut stats: Vec<MemberStats> = tallies
        .into_iter()
        .map(|(member_id, (tally, sample))| MemberStats {
            member_id,
            member_name: sample.member_name.clone(),
            emoji: sample.emoji.clone(),
            first_count: tally.first,
            last_count: tally.last,
            total_standups: tally.sessions.len() as u32,
            avg_position: round2(tally.position_sum as f64 / f64::from(tally.appearances)),
        })
        .collect();

    stats.sort_by(|a, b| {
        b.total_standups
            .cmp(&a.total_standups)
            .then_with(|| a.member_name.cmp(&b.member_name))
    });
    stats
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
