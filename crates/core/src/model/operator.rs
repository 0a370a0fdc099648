use serde::{Deserialize, Serialize};
use std::fmt;

/// Arity and structure of the inputs an operator needs.
///
/// Every shape maps to exactly one composition rule in the expression
/// builder and one visual input layout in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    /// One numeric operand (roots, logarithms, absolute value, e^x).
    Single,
    /// Numerator and denominator.
    Fraction,
    /// Base and exponent.
    Exponent,
    /// No operands at all (π).
    Constant,
    /// Value and modulus.
    Modulo,
}

/// A mathematical operator the answer widget can apply.
///
/// The catalog is static and immutable; the picker lists it in the order
/// returned by [`Operator::catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    symbol: &'static str,
    name: &'static str,
    display: &'static str,
    template: &'static str,
    input_shape: InputShape,
    placeholder: &'static str,
}

const CATALOG: &[Operator] = &[
    Operator {
        symbol: "√",
        name: "square root",
        display: "√",
        template: "√({value})",
        input_shape: InputShape::Single,
        placeholder: "√( )",
    },
    Operator {
        symbol: "∛",
        name: "cube root",
        display: "∛",
        template: "∛({value})",
        input_shape: InputShape::Single,
        placeholder: "∛( )",
    },
    Operator {
        symbol: "e",
        name: "euler",
        display: "e^",
        template: "e^{value}",
        input_shape: InputShape::Single,
        placeholder: "e^",
    },
    Operator {
        symbol: "log",
        name: "logarithm",
        display: "log",
        template: "log({value})",
        input_shape: InputShape::Single,
        placeholder: "log( )",
    },
    Operator {
        symbol: "ln",
        name: "natural log",
        display: "ln",
        template: "ln({value})",
        input_shape: InputShape::Single,
        placeholder: "ln( )",
    },
    Operator {
        symbol: "| |",
        name: "absolute",
        display: "|x|",
        template: "|{value}|",
        input_shape: InputShape::Single,
        placeholder: "| |",
    },
    Operator {
        symbol: "/",
        name: "fraction",
        display: "a/b",
        template: "{numerator}/{denominator}",
        input_shape: InputShape::Fraction,
        placeholder: "a/b",
    },
    Operator {
        symbol: "^",
        name: "exponent",
        display: "x^y",
        template: "({base})^{exponent}",
        input_shape: InputShape::Exponent,
        placeholder: "x^y",
    },
    Operator {
        symbol: "π",
        name: "pi",
        display: "π",
        template: "π",
        input_shape: InputShape::Constant,
        placeholder: "π",
    },
    Operator {
        symbol: "mod",
        name: "modulo",
        display: "a mod b",
        template: "({value}) % {modulus}",
        input_shape: InputShape::Modulo,
        placeholder: "a mod b",
    },
];

impl Operator {
    /// The full operator catalog, in picker order. Stable across calls.
    #[must_use]
    pub fn catalog() -> &'static [Operator] {
        CATALOG
    }

    /// Look up an operator by its symbol.
    #[must_use]
    pub fn by_symbol(symbol: &str) -> Option<&'static Operator> {
        CATALOG.iter().find(|op| op.symbol == symbol)
    }

    /// Look up an operator by its human-readable name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Operator> {
        CATALOG.iter().find(|op| op.name == name)
    }

    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn display(&self) -> &'static str {
        self.display
    }

    #[must_use]
    pub fn template(&self) -> &'static str {
        self.template
    }

    #[must_use]
    pub fn input_shape(&self) -> InputShape {
        self.input_shape
    }

    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// The Euler operator composes as `e^x` rather than through its template.
    #[must_use]
    pub fn is_euler(&self) -> bool {
        self.symbol == "e"
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}
