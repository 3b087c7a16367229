use axum::{extract::Query, Json};
use contracts::shared::notifications::{Notification, NotificationQuery};

use crate::shared::notifications::hub;

/// GET /api/notifications?after=<id>
pub async fn list(Query(q): Query<NotificationQuery>) -> Json<Vec<Notification>> {
    Json(hub().since(q.after))
}
