// ⚠️ Admission Errors - what the operator can get wrong at the console
//
// Billing itself never fails: every PatientType has a base charge.
// The only failures are bad selections and unparseable numbers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// A number was entered but it is not one of the offered choices
    #[error("Invalid {what} selection: {choice}")]
    InvalidSelection { what: &'static str, choice: i64 },

    /// Non-numeric text where a number was expected
    #[error("Malformed {field}: '{input}' is not a number")]
    MalformedInput { field: &'static str, input: String },
}

pub type AdmissionResult<T> = Result<T, AdmissionError>;

/// Parse an operator-entered integer, trimming surrounding whitespace
pub fn parse_number(field: &'static str, input: &str) -> AdmissionResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| AdmissionError::MalformedInput {
            field,
            input: input.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_trims_whitespace() {
        assert_eq!(parse_number("patient id", "  42\n"), Ok(42));
        assert_eq!(parse_number("patient id", "-7"), Ok(-7));
    }

    #[test]
    fn test_parse_number_rejects_text() {
        let err = parse_number("menu choice", "abc").unwrap_err();
        assert_eq!(
            err,
            AdmissionError::MalformedInput {
                field: "menu choice",
                input: "abc".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Malformed menu choice: 'abc' is not a number");
    }

    #[test]
    fn test_invalid_selection_message() {
        let err = AdmissionError::InvalidSelection {
            what: "patient type",
            choice: 9,
        };
        assert_eq!(err.to_string(), "Invalid patient type selection: 9");
    }
}
