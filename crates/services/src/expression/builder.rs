use exam_core::model::{ExpressionInputs, InputShape, Operator};

use crate::error::BuilderError;

/// Compose the canonical expression for an operator from its input slots.
///
/// Pure function over the current inputs; the caller decides when to run
/// it (debounced while the user types). An unset operator is handled by
/// the caller, not here.
///
/// # Errors
///
/// `BuilderError::Incomplete` when a required slot is empty,
/// `BuilderError::InvalidNumber` when a slot does not parse as a finite
/// number, and `BuilderError::ZeroDenominator` for a zero denominator or
/// modulus. All are recoverable; the recompute is simply suppressed.
pub fn compose(operator: &Operator, inputs: &ExpressionInputs) -> Result<String, BuilderError> {
    match operator.input_shape() {
        InputShape::Constant => Ok(operator.symbol().to_string()),
        InputShape::Single => {
            let value = required_number(&inputs.value)?;
            if operator.is_euler() {
                // Exponential notation, not the generic template.
                Ok(format!("e^{value}"))
            } else {
                Ok(operator.template().replace("{value}", value))
            }
        }
        InputShape::Fraction => {
            let numerator = required_number(&inputs.numerator)?;
            let denominator = required_nonzero(&inputs.denominator)?;
            Ok(format!("{numerator}/{denominator}"))
        }
        InputShape::Exponent => {
            let base = required_number(&inputs.base)?;
            let exponent = required_number(&inputs.exponent)?;
            Ok(format!("({base})^{{{exponent}}}"))
        }
        InputShape::Modulo => {
            let value = required_number(&inputs.value)?;
            let modulus = required_nonzero(&inputs.modulus)?;
            Ok(format!("({value}) % {modulus}"))
        }
    }
}

fn required_number(slot: &str) -> Result<&str, BuilderError> {
    let trimmed = slot.trim();
    if trimmed.is_empty() {
        return Err(BuilderError::Incomplete);
    }
    // Only forms the evaluator's number grammar accepts: an optional
    // leading minus, then digits and a decimal point. `f64::parse` alone
    // would also let `1e3` or `+16` through, which the evaluator rejects.
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(BuilderError::InvalidNumber);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(trimmed),
        _ => Err(BuilderError::InvalidNumber),
    }
}

fn required_nonzero(slot: &str) -> Result<&str, BuilderError> {
    let trimmed = required_number(slot)?;
    // Safe: required_number already proved it parses.
    if trimmed.parse::<f64>().unwrap_or(0.0) == 0.0 {
        return Err(BuilderError::ZeroDenominator);
    }
    Ok(trimmed)
}
