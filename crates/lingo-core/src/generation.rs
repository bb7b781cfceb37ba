use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one request within a [`RequestGeneration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter. Starting a request makes every earlier ticket
/// stale, so late results can be dropped instead of shown.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    generation: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_request(&self) -> RequestTicket {
        RequestTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}
