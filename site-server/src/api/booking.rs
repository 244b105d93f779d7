//! Booking settings (online booking toggle + WhatsApp contact)

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use shared::models::{BOOKING_SLUG, BookingSettings};

use super::body::JsonBody;
use crate::BoxError;
use crate::error::ServiceResult;
use crate::sanitize::{clean_str, is_truthy};
use crate::state::AppState;

/// Settings as read back: enabled unless stored exactly `false`
fn settings_from(data: &Value) -> BookingSettings {
    BookingSettings {
        enabled: data.get("enabled") != Some(&Value::Bool(false)),
        whatsapp: data
            .get("whatsapp")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

/// GET /api/settings/booking
pub async fn get_settings(State(state): State<AppState>) -> ServiceResult<Json<Value>> {
    let page = state.db()?.get_page(BOOKING_SLUG).await?;
    let settings = page
        .map(|p| settings_from(&p.data))
        .unwrap_or_default();
    Ok(Json(json!({ "data": settings })))
}

/// PUT /api/admin/settings/booking: full replace
pub async fn put_settings(
    State(state): State<AppState>,
    body: JsonBody,
) -> ServiceResult<Json<Value>> {
    let settings = BookingSettings {
        enabled: is_truthy(body.get("enabled")),
        whatsapp: clean_str(body.get("whatsapp")),
    };
    let data = serde_json::to_value(&settings).map_err(BoxError::from)?;
    state.db()?.put_page(BOOKING_SLUG, &data).await?;

    tracing::info!(enabled = settings.enabled, "Booking settings saved");
    Ok(Json(json!({ "ok": true, "data": settings })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_document() {
        let s = settings_from(&json!({}));
        assert!(s.enabled);
        assert_eq!(s.whatsapp, "");

        let s = settings_from(&json!({"enabled": false, "whatsapp": "+39 333"}));
        assert!(!s.enabled);
        assert_eq!(s.whatsapp, "+39 333");

        // Only a literal `false` disables booking
        assert!(settings_from(&json!({"enabled": 0})).enabled);
        assert!(settings_from(&json!({"enabled": "false"})).enabled);
    }
}
