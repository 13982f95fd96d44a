use serde_json::Value;
use uuid::Uuid;

/// Emit a structured audit event on the `audit` tracing target.
pub fn log_audit(user_id: Option<i64>, action: &str, resource: Option<&str>, metadata: Option<Value>) {
    let event_id = Uuid::new_v4();
    let metadata = metadata.unwrap_or(Value::Null);
    tracing::info!(
        target: "audit",
        %event_id,
        user_id = ?user_id,
        action,
        resource = resource.unwrap_or("-"),
        %metadata,
        "audit event"
    );
}
