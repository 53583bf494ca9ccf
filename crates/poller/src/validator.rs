//! Shape checks for the homework API response.

use serde_json::Value;

use homework_common::error::ShapeError;

const CONTEXT: &str = "API response";

/// Return the `homeworks` array of a poll response.
///
/// The array is returned as-is and may be empty.
pub fn check_response(response: &Value) -> Result<&[Value], ShapeError> {
    let object = response
        .as_object()
        .ok_or(ShapeError::NotAMapping { context: CONTEXT })?;

    let homeworks = object.get("homeworks").ok_or(ShapeError::MissingField {
        context: CONTEXT,
        field: "homeworks",
    })?;

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ShapeError::WrongFieldType {
            context: CONTEXT,
            field: "homeworks",
            expected: "an array",
        })
}

/// Server-side timestamp to use as the next poll cursor.
pub fn current_date(response: &Value) -> Result<i64, ShapeError> {
    let object = response
        .as_object()
        .ok_or(ShapeError::NotAMapping { context: CONTEXT })?;

    object
        .get("current_date")
        .ok_or(ShapeError::MissingField {
            context: CONTEXT,
            field: "current_date",
        })?
        .as_i64()
        .ok_or(ShapeError::WrongFieldType {
            context: CONTEXT,
            field: "current_date",
            expected: "an integer",
        })
}
