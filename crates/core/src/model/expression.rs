use crate::model::Operator;

/// Raw text the user has typed into each operator input slot.
///
/// Which slots matter depends on the selected operator's input shape; the
/// rest stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionInputs {
    pub value: String,
    pub numerator: String,
    pub denominator: String,
    pub base: String,
    pub exponent: String,
    pub modulus: String,
}

impl ExpressionInputs {
    /// Returns true when no slot holds any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
            && self.numerator.is_empty()
            && self.denominator.is_empty()
            && self.base.is_empty()
            && self.exponent.is_empty()
            && self.modulus.is_empty()
    }
}

/// Per-question expression widget state.
///
/// Created lazily when a question is first touched, kept across navigation
/// so answers survive switching questions, and reset on explicit clear.
///
/// Invariant: `canonical_expression` is non-empty only after the builder
/// successfully composed it from the current inputs (all slots required by
/// the selected operator present, denominator/modulus non-zero).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionState {
    pub selected_operator: Option<&'static Operator>,
    pub inputs: ExpressionInputs,
    pub canonical_expression: String,
    /// Bypass path: a plain number entered without any operator.
    pub direct_value: String,
    pub has_direct_answer: bool,
}

impl ExpressionState {
    /// Merge a partial update into this state, field by field.
    pub fn apply(&mut self, update: ExpressionUpdate) {
        if let Some(op) = update.selected_operator {
            self.selected_operator = op;
        }
        if let Some(value) = update.value {
            self.inputs.value = value;
        }
        if let Some(numerator) = update.numerator {
            self.inputs.numerator = numerator;
        }
        if let Some(denominator) = update.denominator {
            self.inputs.denominator = denominator;
        }
        if let Some(base) = update.base {
            self.inputs.base = base;
        }
        if let Some(exponent) = update.exponent {
            self.inputs.exponent = exponent;
        }
        if let Some(modulus) = update.modulus {
            self.inputs.modulus = modulus;
        }
        if let Some(expression) = update.canonical_expression {
            self.canonical_expression = expression;
        }
        if let Some(direct) = update.direct_value {
            self.direct_value = direct;
        }
        if let Some(flag) = update.has_direct_answer {
            self.has_direct_answer = flag;
        }
    }
}

/// Partial update for an [`ExpressionState`]; unset fields are untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionUpdate {
    pub selected_operator: Option<Option<&'static Operator>>,
    pub value: Option<String>,
    pub numerator: Option<String>,
    pub denominator: Option<String>,
    pub base: Option<String>,
    pub exponent: Option<String>,
    pub modulus: Option<String>,
    pub canonical_expression: Option<String>,
    pub direct_value: Option<String>,
    pub has_direct_answer: Option<bool>,
}

impl ExpressionUpdate {
    /// Update that selects an operator and resets every input slot,
    /// matching what a fresh operator pick should do.
    #[must_use]
    pub fn select_operator(operator: &'static Operator) -> Self {
        Self {
            selected_operator: Some(Some(operator)),
            value: Some(String::new()),
            numerator: Some(String::new()),
            denominator: Some(String::new()),
            base: Some(String::new()),
            exponent: Some(String::new()),
            modulus: Some(String::new()),
            canonical_expression: Some(String::new()),
            direct_value: Some(String::new()),
            has_direct_answer: Some(false),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn value(text: impl Into<String>) -> Self {
        Self {
            value: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fraction(numerator: impl Into<String>, denominator: impl Into<String>) -> Self {
        Self {
            numerator: Some(numerator.into()),
            denominator: Some(denominator.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn exponent(base: impl Into<String>, exponent: impl Into<String>) -> Self {
        Self {
            base: Some(base.into()),
            exponent: Some(exponent.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn modulo(value: impl Into<String>, modulus: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            modulus: Some(modulus.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn direct_value(text: impl Into<String>) -> Self {
        Self {
            direct_value: Some(text.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        let state = ExpressionState::default();
        assert!(state.selected_operator.is_none());
        assert!(state.inputs.is_empty());
        assert!(state.canonical_expression.is_empty());
        assert!(state.direct_value.is_empty());
        assert!(!state.has_direct_answer);
    }

    #[test]
    fn apply_merges_only_set_fields() {
        let mut state = ExpressionState::default();
        state.inputs.numerator = "3".into();

        state.apply(ExpressionUpdate {
            denominator: Some("4".into()),
            ..ExpressionUpdate::default()
        });

        assert_eq!(state.inputs.numerator, "3");
        assert_eq!(state.inputs.denominator, "4");
    }

    #[test]
    fn select_operator_resets_slots() {
        let sqrt = Operator::by_symbol("√").unwrap();
        let frac = Operator::by_symbol("/").unwrap();

        let mut state = ExpressionState::default();
        state.apply(ExpressionUpdate::select_operator(frac));
        state.apply(ExpressionUpdate::fraction("3", "4"));

        state.apply(ExpressionUpdate::select_operator(sqrt));
        assert_eq!(state.selected_operator, Some(sqrt));
        assert!(state.inputs.is_empty());
        assert!(!state.has_direct_answer);
    }

    #[test]
    fn apply_can_clear_operator() {
        let sqrt = Operator::by_symbol("√").unwrap();
        let mut state = ExpressionState::default();
        state.apply(ExpressionUpdate::select_operator(sqrt));

        state.apply(ExpressionUpdate {
            selected_operator: Some(None),
            ..ExpressionUpdate::default()
        });
        assert!(state.selected_operator.is_none());
    }
}
