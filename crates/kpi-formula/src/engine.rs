//! Formula evaluation: whole-word substitution, character validation, and
//! arithmetic evaluation.

use kpi_core::Bindings;

use crate::parser;
use crate::types::FormulaError;

/// Replaces every whole-word occurrence of each bound variable with the
/// decimal form of its value.
///
/// Bindings are applied in their iteration order. A match must not be
/// preceded or followed by an ASCII alphanumeric character or `_`, so
/// `Revenue` never matches inside `Revenue_Per_Share`. Names that do not
/// start with a letter or `_` are never substituted.
pub fn substitute(formula: &str, bindings: &Bindings) -> String {
    let mut expression = formula.to_owned();
    for (name, value) in bindings.iter() {
        if !is_substitutable(name) {
            continue;
        }
        expression = replace_word(&expression, name, &value.to_string());
    }
    expression
}

/// Checks that a substituted expression holds nothing but digits,
/// whitespace, decimal points, and `+ - * / ( )`.
///
/// An identifier left in the text means the formula references a variable
/// that the bindings do not supply; the error names it.
pub fn validate_charset(expression: &str) -> Result<(), FormulaError> {
    for (i, c) in expression.char_indices() {
        if is_allowed(c) {
            continue;
        }
        if is_ident_start(c) {
            let ident: String = expression[i..]
                .chars()
                .take_while(|&ch| ch.is_ascii_alphanumeric() || ch == '_')
                .collect();
            return Err(FormulaError::invalid(format!(
                "unknown variable '{}'",
                ident
            )));
        }
        return Err(FormulaError::invalid(format!(
            "disallowed character '{}'",
            c
        )));
    }
    Ok(())
}

/// Validates and evaluates an already substituted arithmetic expression.
pub fn evaluate_expression(expression: &str) -> Result<f64, FormulaError> {
    validate_charset(expression)?;
    parser::parse(expression)?.eval()
}

/// Evaluates a formula against a set of bindings.
///
/// Deterministic and side-effect free: the same `(formula, bindings)` pair
/// always yields the same value or the same error. A NaN or infinite value
/// is an error as soon as the formula mentions its variable.
pub fn evaluate_formula(formula: &str, bindings: &Bindings) -> Result<f64, FormulaError> {
    let non_finite = bindings.iter().find(|&(name, value)| {
        !value.is_finite() && is_substitutable(name) && mentions(formula, name)
    });
    if let Some((name, _)) = non_finite {
        return Err(FormulaError::invalid(format!(
            "variable '{}' is not a finite number",
            name
        )));
    }
    let expression = substitute(formula, bindings);
    evaluate_expression(&expression)
}

/// Identifiers referenced by a formula, deduplicated, in order of first
/// appearance.
///
/// A word is a maximal run of ASCII alphanumerics and `_`; it is an
/// identifier when it starts with a letter or `_`.
pub fn referenced_identifiers(formula: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let bytes = formula.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !is_word_byte(bytes[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && is_word_byte(bytes[i]) {
            i += 1;
        }
        let word = &formula[start..i];
        let first = bytes[start];
        if (first.is_ascii_alphabetic() || first == b'_') && !found.iter().any(|w| w == word) {
            found.push(word.to_owned());
        }
    }
    found
}

/// Returns `true` if `name` appears in `text` as a whole word.
pub fn mentions(text: &str, name: &str) -> bool {
    !name.is_empty() && word_matches(text, name).next().is_some()
}

/// Result of linting a formula without real bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaCheck {
    /// Identifiers in order of first appearance.
    pub identifiers: Vec<String>,
    /// Identifiers not among the known names.
    pub unknown: Vec<String>,
    /// Structural error, if the formula is not well-formed arithmetic.
    pub error: Option<FormulaError>,
}

impl FormulaCheck {
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.unknown.is_empty()
    }
}

/// Lints a formula: lists its identifiers, flags those not in `known`, and
/// checks the arithmetic shape by binding every identifier to `1`.
///
/// Division by zero is not reported here since it depends on real values.
pub fn check_formula(formula: &str, known: &[&str]) -> FormulaCheck {
    let identifiers = referenced_identifiers(formula);
    let unknown = identifiers
        .iter()
        .filter(|id| !known.contains(&id.as_str()))
        .cloned()
        .collect();

    let ones: Bindings = identifiers.iter().map(|id| (id.as_str(), 1.0)).collect();
    let expression = substitute(formula, &ones);
    let error = validate_charset(&expression)
        .and_then(|()| parser::parse(&expression).map(|_| ()))
        .err();

    FormulaCheck {
        identifiers,
        unknown,
        error,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | '+' | '-' | '*' | '/' | '(' | ')')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_substitutable(name: &str) -> bool {
    name.chars().next().is_some_and(is_ident_start)
}

/// Byte ranges of whole-word occurrences of `word` in `text`.
fn word_matches<'a>(text: &'a str, word: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
    let bytes = text.as_bytes();
    let mut from = 0;
    std::iter::from_fn(move || {
        while from <= text.len() {
            let rel = text[from..].find(word)?;
            let start = from + rel;
            let end = start + word.len();
            let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
            let after_ok = end == bytes.len() || !is_word_byte(bytes[end]);
            if before_ok && after_ok {
                from = end;
                return Some((start, end));
            }
            from = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
        None
    })
}

fn replace_word(text: &str, word: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end) in word_matches(text, word) {
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bindings(pairs: &[(&str, f64)]) -> Bindings {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn is_invalid(r: Result<f64, FormulaError>) -> bool {
        matches!(r, Err(FormulaError::InvalidExpression(_)))
    }

    // -- substitute --------------------------------------------------------

    #[test]
    fn substitute_every_occurrence() {
        let b = bindings(&[("A", 2.0)]);
        assert_eq!(substitute("A * A + A", &b), "2 * 2 + 2");
    }

    #[test]
    fn substitute_decimal_and_negative_values() {
        let b = bindings(&[("A", 0.25), ("B", -3.0)]);
        assert_eq!(substitute("A - B", &b), "0.25 - -3");
    }

    #[test]
    fn substitute_whole_words_only() {
        let b = bindings(&[("Revenue", 100.0), ("Revenue_Per_Share", 8.0)]);
        assert_eq!(
            substitute("Revenue_Per_Share / 2 + Revenue", &b),
            "8 / 2 + 100"
        );
    }

    #[test]
    fn substitute_skips_non_identifier_names() {
        let b = bindings(&[("5", 9.0)]);
        assert_eq!(substitute("1.5 + 5", &b), "1.5 + 5");
    }

    #[test]
    fn substitute_leaves_unbound_names() {
        let b = bindings(&[("A", 1.0)]);
        assert_eq!(substitute("A + Missing", &b), "1 + Missing");
    }

    #[test]
    fn substitute_does_not_mutate_inputs() {
        let b = Bindings::sample();
        let formula = String::from("Revenue / Employee_Count");
        let _ = substitute(&formula, &b);
        assert_eq!(formula, "Revenue / Employee_Count");
        assert_eq!(b, Bindings::sample());
    }

    // -- validate_charset --------------------------------------------------

    #[test]
    fn charset_accepts_arithmetic() {
        assert_eq!(validate_charset(" 1.5 * (2 - 3) / 4 + 5\t"), Ok(()));
    }

    #[test]
    fn charset_names_unknown_variable() {
        assert_eq!(
            validate_charset("1 + Net_Income"),
            Err(FormulaError::InvalidExpression(
                "unknown variable 'Net_Income'".into()
            ))
        );
    }

    #[test]
    fn charset_treats_non_ascii_letters_as_disallowed() {
        assert_eq!(
            validate_charset("1 + é"),
            Err(FormulaError::InvalidExpression(
                "disallowed character 'é'".into()
            ))
        );
        assert_eq!(
            validate_charset("Revenueé"),
            Err(FormulaError::InvalidExpression(
                "unknown variable 'Revenue'".into()
            ))
        );
    }

    #[test]
    fn non_ascii_letter_is_not_part_of_identifier() {
        let b = bindings(&[("Revenue", 100.0), ("éRevenue", 7.0)]);
        assert_eq!(substitute("1 + éRevenue", &b), "1 + é100");
        assert_eq!(
            evaluate_formula("éRevenue", &b),
            Err(FormulaError::InvalidExpression(
                "disallowed character 'é'".into()
            ))
        );
    }

    #[test]
    fn charset_rejects_punctuation() {
        for bad in ["1; 2", "1 % 2", "1, 2", "'1'", "1 == 1", "[1]", "1 ^ 2"] {
            assert!(validate_charset(bad).is_err(), "should reject {bad:?}");
        }
    }

    // -- evaluate_formula --------------------------------------------------

    #[test]
    fn evaluate_matches_manual_substitution() {
        let b = Bindings::sample();
        let v = evaluate_formula("(Net_Income + EBITDA) / Total_Assets * 100", &b).unwrap();
        let expected = (23_580.0 + 68_450.0) / 186_750.0 * 100.0;
        assert!((v - expected).abs() < 1e-9);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let b = Bindings::sample();
        let a = evaluate_formula("Revenue / Employee_Count", &b);
        let c = evaluate_formula("Revenue / Employee_Count", &b);
        assert_eq!(a, c);
    }

    #[test]
    fn injection_attempts_rejected() {
        let b = Bindings::sample();
        assert!(is_invalid(evaluate_formula("Revenue; DROP_EVERYTHING()", &b)));
        assert!(is_invalid(evaluate_formula("Revenue + __import__('os')", &b)));
        assert!(is_invalid(evaluate_formula("Revenue + process.exit()", &b)));
    }

    #[test]
    fn substring_hazard_resolved() {
        let b = bindings(&[("Revenue", 1000.0), ("Revenue_Per_Share", 12.0)]);
        assert_eq!(evaluate_formula("Revenue_Per_Share / 2", &b), Ok(6.0));
    }

    #[test]
    fn division_by_zero_variable() {
        let b = bindings(&[("Revenue", 1000.0), ("Zero_Debt", 0.0)]);
        assert_eq!(
            evaluate_formula("Revenue / Zero_Debt", &b),
            Err(FormulaError::DivisionByZero)
        );
    }

    #[test]
    fn non_finite_binding_rejected() {
        let b = bindings(&[("A", f64::NAN), ("B", f64::INFINITY)]);
        assert!(is_invalid(evaluate_formula("A + 1", &b)));
        assert!(is_invalid(evaluate_formula("B + 1", &b)));
    }

    #[test]
    fn non_finite_binding_names_variable_despite_shadowing_names() {
        let b = bindings(&[
            ("Net_Income", f64::NAN),
            ("NaN", 1.0),
            ("inf", 2.0),
            ("Total_Debt", f64::INFINITY),
        ]);
        assert_eq!(
            evaluate_formula("Net_Income + 1", &b),
            Err(FormulaError::InvalidExpression(
                "variable 'Net_Income' is not a finite number".into()
            ))
        );
        assert_eq!(
            evaluate_formula("Total_Debt * 3", &b),
            Err(FormulaError::InvalidExpression(
                "variable 'Total_Debt' is not a finite number".into()
            ))
        );
        assert_eq!(evaluate_formula("NaN + inf", &b), Ok(3.0));
    }

    #[test]
    fn unmentioned_non_finite_binding_is_ignored() {
        let b = bindings(&[("Broken", f64::NAN), ("Revenue", 10.0)]);
        assert_eq!(evaluate_formula("Revenue * 2", &b), Ok(20.0));
        assert!(is_invalid(evaluate_formula("Broken_Total + 0", &b)));
    }

    #[test]
    fn long_flat_formula_evaluates() {
        let formula = vec!["Revenue"; 50_000].join(" + ");
        let b = bindings(&[("Revenue", 1.0)]);
        assert_eq!(evaluate_formula(&formula, &b), Ok(50_000.0));
    }

    #[test]
    fn negative_binding_evaluates() {
        let b = bindings(&[("Net_Income", -500.0), ("Revenue", 1000.0)]);
        assert_eq!(evaluate_formula("Net_Income / Revenue", &b), Ok(-0.5));
        assert_eq!(evaluate_formula("Revenue - Net_Income", &b), Ok(1500.0));
    }

    #[test]
    fn literal_only_formula() {
        assert_eq!(evaluate_formula("(1 + 2) * 3", &Bindings::new()), Ok(9.0));
    }

    // -- referenced_identifiers / mentions ---------------------------------

    #[test]
    fn identifiers_in_first_appearance_order() {
        assert_eq!(
            referenced_identifiers("(EBITDA - Net_Income) / EBITDA * 2 + _x1"),
            vec!["EBITDA", "Net_Income", "_x1"]
        );
    }

    #[test]
    fn identifiers_skip_digit_led_words() {
        assert_eq!(referenced_identifiers("2Revenue + 3"), Vec::<String>::new());
    }

    #[test]
    fn mentions_is_whole_word() {
        assert!(mentions("Revenue_Per_Share / 2", "Revenue_Per_Share"));
        assert!(!mentions("Revenue_Per_Share / 2", "Revenue"));
        assert!(mentions("Net_Revenue + Revenue", "Revenue"));
        assert!(!mentions("A", ""));
    }

    // -- check_formula -----------------------------------------------------

    #[test]
    fn check_reports_unknown_identifiers() {
        let check = check_formula("Revenue / Headcount", kpi_core::FINANCIAL_VARIABLES);
        assert_eq!(check.identifiers, vec!["Revenue", "Headcount"]);
        assert_eq!(check.unknown, vec!["Headcount"]);
        assert_eq!(check.error, None);
        assert!(!check.is_ok());
    }

    #[test]
    fn check_reports_structural_error() {
        let check = check_formula("Revenue / ", kpi_core::FINANCIAL_VARIABLES);
        assert!(check.unknown.is_empty());
        assert!(matches!(check.error, Some(FormulaError::InvalidExpression(_))));
    }

    #[test]
    fn check_ignores_division_by_literal_zero() {
        let check = check_formula("Revenue / 0", kpi_core::FINANCIAL_VARIABLES);
        assert!(check.is_ok());
    }

    #[test]
    fn check_flags_injection() {
        let check = check_formula("Revenue; rm", kpi_core::FINANCIAL_VARIABLES);
        assert!(check.error.is_some());
    }
}
