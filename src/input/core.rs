use serde::Serialize;
use serde_json::Value;

use crate::error::{InputField, InvalidInputError};

/// Validated request input for a single estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInput {
    /// Built-up area of one floor.
    pub area: f64,
    /// Floor specification as supplied, e.g. `G+2`.
    pub floors: String,
    /// Number of levels the floor spec resolves to.
    pub total_floors: u32,
    /// Daily wage per worker.
    pub wage: f64,
    /// Material cost per unit of built-up area.
    pub cost: f64,
}

impl ProjectInput {
    pub fn new(area: f64, floors: &str, wage: f64, cost: f64) -> Result<Self, InvalidInputError> {
        let area = positive(InputField::Area, area)?;
        let total_floors = parse_floor_spec(floors)?;
        let wage = non_negative(InputField::Wage, wage)?;
        let cost = non_negative(InputField::Cost, cost)?;
        if !(area * f64::from(total_floors)).is_finite() {
            return Err(InvalidInputError::new(
                InputField::Area,
                format!("{area:e} across {total_floors} floors is out of range"),
            ));
        }

        Ok(Self {
            area,
            floors: floors.trim().to_string(),
            total_floors,
            wage,
            cost,
        })
    }

    /// Build from textual values, e.g. form fields or CLI arguments.
    pub fn parse(area: &str, floors: &str, wage: &str, cost: &str) -> Result<Self, InvalidInputError> {
        Self::new(
            parse_number(InputField::Area, area)?,
            floors,
            parse_number(InputField::Wage, wage)?,
            parse_number(InputField::Cost, cost)?,
        )
    }

    /// Build from a request payload with `area`, `floors`, `wage` and `cost`
    /// keys. Numbers may arrive as JSON numbers or numeric strings.
    pub fn from_json(payload: &Value) -> Result<Self, InvalidInputError> {
        let area = json_number(payload, InputField::Area)?;
        let floors = json_floors(payload)?;
        let wage = json_number(payload, InputField::Wage)?;
        let cost = json_number(payload, InputField::Cost)?;
        Self::new(area, &floors, wage, cost)
    }

    /// Area across every floor; drives every downstream quantity.
    pub fn total_area(&self) -> f64 {
        self.area * f64::from(self.total_floors)
    }
}

/// Resolve a floor specification into a level count.
///
/// `G+N` means the ground floor plus `N` upper floors. A bare integer is the
/// level count itself and a bare `G` is the ground floor alone.
pub fn parse_floor_spec(spec: &str) -> Result<u32, InvalidInputError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(floors_error("floor specification is empty"));
    }

    if let Some((ground, upper)) = spec.split_once('+') {
        if !ground.trim().eq_ignore_ascii_case("g") {
            return Err(floors_error(format!(
                "expected `G+<floors>`, found `{spec}`"
            )));
        }
        let upper: u32 = upper.trim().parse().map_err(|_| {
            floors_error(format!(
                "upper floor count in `{spec}` is not a non-negative whole number"
            ))
        })?;
        return upper
            .checked_add(1)
            .ok_or_else(|| floors_error("floor count overflows"));
    }

    if spec.eq_ignore_ascii_case("g") {
        return Ok(1);
    }

    match spec.parse::<i64>() {
        Ok(floors) if floors >= 1 => {
            u32::try_from(floors).map_err(|_| floors_error("floor count overflows"))
        }
        Ok(floors) => Err(floors_error(format!(
            "total floors must be at least 1, found {floors}"
        ))),
        Err(_) => Err(floors_error(format!(
            "expected a whole number or `G+<floors>`, found `{spec}`"
        ))),
    }
}

fn floors_error(reason: impl Into<String>) -> InvalidInputError {
    InvalidInputError::new(InputField::Floors, reason)
}

fn parse_number(field: InputField, raw: &str) -> Result<f64, InvalidInputError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| InvalidInputError::new(field, format!("`{trimmed}` is not a number")))
}

fn finite(field: InputField, value: f64) -> Result<f64, InvalidInputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInputError::new(field, format!("{value} is not a finite number")))
    }
}

fn positive(field: InputField, value: f64) -> Result<f64, InvalidInputError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidInputError::new(field, format!("must be greater than zero, found {value}")))
    }
}

fn non_negative(field: InputField, value: f64) -> Result<f64, InvalidInputError> {
    let value = finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidInputError::new(field, format!("must not be negative, found {value}")))
    }
}

fn json_number(payload: &Value, field: InputField) -> Result<f64, InvalidInputError> {
    match payload.get(field.as_str()) {
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| InvalidInputError::new(field, "number is out of range")),
        Some(Value::String(text)) => parse_number(field, text),
        Some(Value::Null) | None => Err(InvalidInputError::new(field, "value is missing")),
        Some(other) => Err(InvalidInputError::new(
            field,
            format!("expected a number, found {other}"),
        )),
    }
}

fn json_floors(payload: &Value) -> Result<String, InvalidInputError> {
    match payload.get(InputField::Floors.as_str()) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(number)) if number.is_u64() || number.is_i64() => Ok(number.to_string()),
        Some(Value::Null) | None => Err(floors_error("value is missing")),
        Some(other) => Err(floors_error(format!(
            "expected `G+<floors>` or a whole number, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ground_plus_upper_floors() {
        assert_eq!(parse_floor_spec("G+2").unwrap(), 3);
        assert_eq!(parse_floor_spec(" g + 0 ").unwrap(), 1);
        assert_eq!(parse_floor_spec("G+10").unwrap(), 11);
    }

    #[test]
    fn bare_integer_is_total_floors() {
        assert_eq!(parse_floor_spec("3").unwrap(), 3);
        assert_eq!(parse_floor_spec("1").unwrap(), 1);
    }

    #[test]
    fn bare_ground_is_one_floor() {
        assert_eq!(parse_floor_spec("G").unwrap(), 1);
    }

    #[test]
    fn malformed_floor_specs_name_the_floors_field() {
        for spec in ["", "G+", "G+x", "G+-1", "X+2", "0", "-3", "two", "2.5"] {
            let err = parse_floor_spec(spec).unwrap_err();
            assert_eq!(err.field, InputField::Floors, "spec {spec:?}");
        }
    }

    #[test]
    fn non_numeric_area_is_rejected() {
        let err = ProjectInput::parse("abc", "G+1", "500", "2000").unwrap_err();
        assert_eq!(err.field, InputField::Area);
        assert!(err.to_string().contains("area"));
    }

    #[test]
    fn degenerate_values_are_rejected() {
        assert_eq!(
            ProjectInput::new(0.0, "G+1", 500.0, 2000.0).unwrap_err().field,
            InputField::Area
        );
        assert_eq!(
            ProjectInput::new(-5.0, "G+1", 500.0, 2000.0).unwrap_err().field,
            InputField::Area
        );
        assert_eq!(
            ProjectInput::new(100.0, "G+1", -1.0, 2000.0).unwrap_err().field,
            InputField::Wage
        );
        assert_eq!(
            ProjectInput::new(100.0, "G+1", 500.0, f64::NAN).unwrap_err().field,
            InputField::Cost
        );
    }

    #[test]
    fn overflowing_total_area_is_rejected() {
        let err = ProjectInput::new(1e308, "G+1", 500.0, 2000.0).unwrap_err();
        assert_eq!(err.field, InputField::Area);

        let input = ProjectInput::new(f64::MAX, "G", 500.0, 2000.0).unwrap();
        assert!(input.total_area().is_finite());
    }

    #[test]
    fn zero_wage_and_cost_are_allowed() {
        let input = ProjectInput::new(100.0, "2", 0.0, 0.0).unwrap();
        assert_eq!(input.total_area(), 200.0);
    }

    #[test]
    fn json_payload_accepts_numbers_and_strings() {
        let input = ProjectInput::from_json(&json!({
            "area": "1000",
            "floors": "G+1",
            "wage": 500,
            "cost": 2000.0
        }))
        .unwrap();
        assert_eq!(input.total_floors, 2);
        assert_eq!(input.total_area(), 2000.0);

        let numeric_floors =
            ProjectInput::from_json(&json!({"area": 10, "floors": 3, "wage": 1, "cost": 1}))
                .unwrap();
        assert_eq!(numeric_floors.total_floors, 3);
    }

    #[test]
    fn json_payload_missing_field_is_not_defaulted() {
        let err = ProjectInput::from_json(&json!({"area": 10, "floors": "G", "cost": 1}))
            .unwrap_err();
        assert_eq!(err.field, InputField::Wage);
        assert!(err.reason.contains("missing"));
    }
}
