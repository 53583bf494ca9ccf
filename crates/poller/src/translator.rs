//! Homework record → notification text.

use serde_json::Value;

use homework_common::error::ShapeError;
use homework_common::types::{HomeworkRecord, HomeworkStatus};

const CONTEXT: &str = "homework record";

/// Validate a raw homework record into a [`HomeworkRecord`].
pub fn parse_record(record: &Value) -> Result<HomeworkRecord, ShapeError> {
    let object = record
        .as_object()
        .ok_or(ShapeError::NotAMapping { context: CONTEXT })?;

    let status = object
        .get("status")
        .ok_or(ShapeError::MissingField {
            context: CONTEXT,
            field: "status",
        })?
        .as_str()
        .ok_or(ShapeError::WrongFieldType {
            context: CONTEXT,
            field: "status",
            expected: "a string",
        })?;

    let status = HomeworkStatus::from_wire(status)
        .ok_or_else(|| ShapeError::UnknownStatus(status.to_string()))?;

    let homework_name = object
        .get("homework_name")
        .ok_or(ShapeError::MissingField {
            context: CONTEXT,
            field: "homework_name",
        })?
        .as_str()
        .ok_or(ShapeError::WrongFieldType {
            context: CONTEXT,
            field: "homework_name",
            expected: "a string",
        })?;

    if homework_name.is_empty() {
        return Err(ShapeError::EmptyField {
            context: CONTEXT,
            field: "homework_name",
        });
    }

    Ok(HomeworkRecord {
        homework_name: homework_name.to_string(),
        status,
    })
}

/// Build the status-change notification for one homework record.
pub fn parse_status(record: &Value) -> Result<String, ShapeError> {
    let record = parse_record(record)?;
    tracing::debug!(
        homework = %record.homework_name,
        status = %record.status,
        "Homework status parsed"
    );
    Ok(record.status_message())
}
