//! Integration tests for parsing and evaluating expressions end to end

use cardbind::{EvaluationContext, Evaluator, Value, parse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn eval(source: &str, data: serde_json::Value) -> Value {
    let expression = parse(source).expect("expression parses");
    Evaluator::new()
        .evaluate(&expression, &EvaluationContext::new(Value::from(data)))
        .expect("expression evaluates")
}

#[rstest]
#[case("10 + 5 * 2", 20.0)]
#[case("(10 + 5) * 2", 30.0)]
#[case("20 - 2 * 3", 14.0)]
#[case("100 / 4 / 5", 5.0)]
#[case("7 % 4", 3.0)]
#[case("-(2 + 3)", -5.0)]
#[case("2 * (3 + 4) - 1", 13.0)]
fn test_arithmetic(#[case] source: &str, #[case] expected: f64) {
    assert_eq!(eval(source, json!({})), Value::Number(expected));
}

#[rstest]
#[case("1 < 2 && 2 < 3", true)]
#[case("1 > 2 || 3 > 2", true)]
#[case("!(1 == 1)", false)]
#[case("'a' == 'a' && 'b' != 'c'", true)]
#[case("2 <= 2", true)]
#[case("2 >= 3", false)]
fn test_logic_and_comparison(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(eval(source, json!({})), Value::Boolean(expected));
}

#[test]
fn test_keyword_literals() {
    assert_eq!(eval("true", json!({})), Value::Boolean(true));
    assert_eq!(eval("false", json!({})), Value::Boolean(false));
    assert_eq!(eval("null", json!({})), Value::Null);
    assert_eq!(eval("null == null", json!({})), Value::Boolean(true));
}

#[test]
fn test_string_functions_compose() {
    assert_eq!(
        eval("toUpper(toLower('MiXeD CaSe'))", json!({})),
        Value::string("MIXED CASE")
    );
    assert_eq!(
        eval("substring(trim('  hello world  '), 0, 5)", json!({})),
        Value::string("hello")
    );
    assert_eq!(
        eval(
            "format('{0} has {1} items', user.name, count(user.items))",
            json!({"user": {"name": "Ada", "items": [1, 2, 3]}}),
        ),
        Value::string("Ada has 3 items")
    );
}

#[test]
fn test_math_functions() {
    assert_eq!(eval("min(3, 1, 2)", json!({})), Value::Number(1.0));
    assert_eq!(eval("max(add(1, 2), mul(2, 2))", json!({})), Value::Number(4.0));
    assert_eq!(eval("round(2.5) + floor(1.9) + ceil(0.1)", json!({})), Value::Number(5.0));
    assert_eq!(eval("abs(sub(3, 10))", json!({})), Value::Number(7.0));
}

#[test]
fn test_collection_functions() {
    let data = json!({"items": ["a", "b", "c"]});
    assert_eq!(eval("count(items)", data.clone()), Value::Number(3.0));
    assert_eq!(eval("first(items)", data.clone()), Value::string("a"));
    assert_eq!(eval("last(items)", data), Value::string("c"));
}

#[test]
fn test_logic_functions() {
    let data = json!({"age": 25});
    assert_eq!(
        eval("if(greaterThan(age, 18), 'adult', 'minor')", data.clone()),
        Value::string("adult")
    );
    assert_eq!(eval("exists(age)", data.clone()), Value::Boolean(true));
    assert_eq!(eval("exists(shoe_size)", data.clone()), Value::Boolean(false));
    assert_eq!(eval("empty(age)", data), Value::Boolean(false));
    assert_eq!(
        eval("isMatch('user-123', '^user-[0-9]+$')", json!({})),
        Value::Boolean(true)
    );
}

#[test]
fn test_ternary_against_data() {
    assert_eq!(
        eval("age >= 18 ? 'adult' : 'minor'", json!({"age": 25})),
        Value::string("adult")
    );
    assert_eq!(
        eval("age >= 18 ? 'adult' : 'minor'", json!({"age": 12})),
        Value::string("minor")
    );
}

#[test]
fn test_missing_properties_are_null_not_errors() {
    assert_eq!(eval("missing", json!({})), Value::Null);
    assert_eq!(eval("deeply.missing.path", json!({})), Value::Null);
    assert_eq!(eval("toUpper(missing)", json!({})), Value::string(""));
    assert_eq!(eval("missing == null", json!({})), Value::Boolean(true));
    assert_eq!(eval("exists(missing)", json!({})), Value::Boolean(false));
}

#[test]
fn test_number_literal_round_trip() {
    // 42 is a double at the AST level and prints without a fraction
    assert_eq!(eval("42", json!({})), Value::Number(42.0));
    assert_eq!(eval("42", json!({})).to_output_string(), "42");
    assert_eq!(eval("2.5", json!({})).to_output_string(), "2.5");
}

#[test]
fn test_parse_once_evaluate_many_independent_results() {
    let expression = parse("toUpper(name) + ' (' + $root.team + ')'").unwrap();
    let evaluator = Evaluator::new();

    let contexts = [
        json!({"name": "ada", "team": "analytics"}),
        json!({"name": "bob", "team": "billing"}),
        json!({"team": "empty"}),
    ];
    let results: Vec<Value> = contexts
        .iter()
        .map(|data| {
            evaluator
                .evaluate(&expression, &EvaluationContext::new(Value::from(data.clone())))
                .unwrap()
        })
        .collect();

    assert_eq!(results[0], Value::string("ADA (analytics)"));
    assert_eq!(results[1], Value::string("BOB (billing)"));
    assert_eq!(results[2], Value::string(" (empty)"));

    // Re-evaluating the first context still gives the first result:
    // no state leaks between evaluations
    let again = Evaluator::new()
        .evaluate(
            &expression,
            &EvaluationContext::new(Value::from(contexts[0].clone())),
        )
        .unwrap();
    assert_eq!(again, results[0]);
}

#[test]
fn test_parsing_is_pure() {
    let a = parse("a + b * c").unwrap();
    let b = parse("a + b * c").unwrap();
    assert_eq!(a, b);

    let data = json!({"a": 1, "b": 2, "c": 3});
    let context = EvaluationContext::new(Value::from(data));
    let evaluator = Evaluator::new();
    assert_eq!(
        evaluator.evaluate(&a, &context).unwrap(),
        evaluator.evaluate(&b, &context).unwrap()
    );
}
