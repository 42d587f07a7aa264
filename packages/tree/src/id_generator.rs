use chrono::Utc;
use uuid::Uuid;

use crate::node::NodeId;

/// Generate a fresh node id: base36 millisecond timestamp plus a random suffix
pub fn generate_id() -> NodeId {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let random = Uuid::new_v4().simple().to_string();
    format!("node-{}-{}", to_base36(millis), &random[..9])
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut buff = Vec::new();
    while value > 0 {
        buff.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buff.reverse();
    String::from_utf8_lossy(&buff).into_owned()
}

/// Source of ids for operations that mint many at once (subtree cloning)
pub trait IdSource {
    fn next_id(&mut self) -> NodeId;
}

/// Time + random ids from [`generate_id`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> NodeId {
        generate_id()
    }
}

/// Sequential ids sharing a seed, e.g. `copy-1`, `copy-2`.
/// Deterministic, so useful for fixtures and replay.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    seed: String,
    count: u32,
}

impl SequentialIds {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}
