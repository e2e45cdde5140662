//! Refresh requests relayed from the companion device.
//!
//! The companion sends a dictionary carrying `UPDATE_RECIPES_KEY: true`; the
//! phone refreshes and replies with an empty dictionary once done. Messages
//! without the key are not answered.

use serde_json::{Map, Value};
use tracing::debug;

use crate::cache::RecipeStore;

pub const UPDATE_RECIPES_KEY: &str = "com.xiaoboswift.update-recipes";

/// Whether a message asks for a catalog refresh.
pub fn is_update_request(message: &Map<String, Value>) -> bool {
    matches!(message.get(UPDATE_RECIPES_KEY), Some(Value::Bool(true)))
}

/// Handle a companion message, returning the reply to send back.
///
/// The reply is sent whether or not the refresh succeeded; the companion
/// re-reads the shared cache afterwards either way.
pub async fn handle_request(store: &RecipeStore, message: &Map<String, Value>) -> Option<Map<String, Value>> {
    if !is_update_request(message) {
        debug!("Ignoring companion message without update request");
        return None;
    }

    let outcome = store.refresh().await;
    debug!(ok = outcome.is_ok(), count = outcome.catalog.len(), "Companion refresh finished");
    Some(Map::new())
}
