//! Operator authorization
//!
//! The salon has a single operator ("master") identified by Telegram user ID.

use tracing::debug;

#[derive(Debug, Clone)]
pub struct AuthService {
    master_user_id: Option<i64>,
}

impl AuthService {
    pub fn new(master_user_id: Option<i64>) -> Self {
        Self { master_user_id }
    }

    /// Check if user may use operator actions; nobody may when unset
    pub fn is_master(&self, user_id: i64) -> bool {
        let allowed = self.master_user_id == Some(user_id);
        if !allowed {
            debug!(user_id = user_id, "Operator access denied");
        }
        allowed
    }
}
