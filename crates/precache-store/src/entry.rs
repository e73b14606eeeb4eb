//! Stored entry representation.

use chrono::{DateTime, Utc};
use precache_core::http::{Request, Response};
use serde::{Deserialize, Serialize};

/// A request/response pair as persisted inside a cache.
///
/// Immutable once stored; replaced only when a whole new cache generation
/// is committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    pub request: Request,
    pub response: Response,
    pub stored_at: DateTime<Utc>,
}

impl StoredEntry {
    pub fn new(request: Request, response: Response) -> Self {
        Self {
            request,
            response,
            stored_at: Utc::now(),
        }
    }
}
