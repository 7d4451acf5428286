//! Skips redundant redraws while the picture cannot change on its own.
//!
//! A running game redraws every frame. Paused, game-over and title screens
//! only redraw when their snapshot changes, plus a slow keepalive.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::GameSnapshot;

/// Keepalive redraw interval for static screens.
pub const DEFAULT_STATIC_INTERVAL_MS: u64 = 500;

/// Cheap identity of everything drawn from a snapshot.
pub fn fingerprint(snapshot: &GameSnapshot) -> u64 {
    let mut h = DefaultHasher::new();
    snapshot.hash(&mut h);
    h.finish()
}

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last: Option<(u64, u64)>,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last: None,
        }
    }

    /// Forget the last frame so the next call renders (e.g. after resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn should_render_snapshot(&mut self, now_ms: u64, snapshot: &GameSnapshot) -> bool {
        self.should_render(now_ms, fingerprint(snapshot), snapshot.is_static())
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `is_static=false`: always render (no throttling).
    /// - When `is_static=true`: render immediately on fingerprint change, otherwise at most
    ///   once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let render = match self.last {
            None => true,
            Some(_) if !is_static => true,
            Some((_, last_fp)) if last_fp != fingerprint => true,
            Some((last_ms, _)) => now_ms.saturating_sub(last_ms) >= self.min_static_interval_ms,
        };
        if render {
            self.last = Some((now_ms, fingerprint));
        }
        render
    }
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_INTERVAL_MS)
    }
}
