use std::sync::atomic::{AtomicU64, Ordering};

use crate::state::pixels::PixelId;

/// Source of pixel identifiers
pub trait IdGenerator {
    /// Returns an id never returned before by this generator
    fn next_id(&mut self) -> PixelId;
}

// Shared across generators so two sessions in one process never collide
static NEXT_PIXEL_ID: AtomicU64 = AtomicU64::new(1);

/// Monotonic counter ids of the form `px-<n>`
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialIdGenerator;

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> PixelId {
        let n = NEXT_PIXEL_ID.fetch_add(1, Ordering::SeqCst);
        PixelId::new(format!("px-{}", n))
    }
}

/// Random UUID v4 ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> PixelId {
        PixelId::new(uuid::Uuid::new_v4().to_string())
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> PixelId,
{
    fn next_id(&mut self) -> PixelId {
        self()
    }
}
