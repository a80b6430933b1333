use abacus::{CalcError, Calculator, FixedClock, Number, operation, operations};
use serde_json::{Value, json};

fn sum(params: &[Number]) -> Number {
    operations::add(params)
}

#[test]
fn test_add_repeat_reset_scenario() {
    let mut calc = Calculator::new(operation("add", sum));

    let result = calc.perform("add", &[json!(1), json!(2), json!(3)]).unwrap();
    assert_eq!(result, Number::Int(6));
    assert_eq!(calc.history().len(), 1);

    assert_eq!(calc.repeat_last().unwrap(), Some(Number::Int(6)));
    assert_eq!(calc.history().len(), 1);

    calc.reset_history();
    assert!(calc.history().is_empty());
}

#[test]
fn test_history_matches_every_call() {
    let mut calc = Calculator::with_builtins().with_clock(FixedClock("t".to_string()));
    let calls: Vec<(&str, Vec<Value>)> = vec![
        ("add", vec![json!(1), json!(4.5), json!(-2)]),
        ("subtract", vec![json!(10), json!(4)]),
        ("multiply", vec![json!(3), json!(3), json!(2)]),
        ("divide", vec![json!(1), json!(4)]),
    ];

    for (name, params) in &calls {
        let before = calc.history().len();
        let result = calc.perform(name, params).unwrap();

        assert_eq!(calc.history().len(), before + 1);
        let entry = calc.history().last().unwrap();
        assert_eq!(entry.operation, *name);
        assert_eq!(entry.result, result);
        assert_eq!(entry.params.len(), params.len());
    }

    let results: Vec<Number> = calc.history().iter().map(|e| e.result).collect();
    assert_eq!(
        results,
        vec![
            Number::Float(3.5),
            Number::Int(6),
            Number::Int(18),
            Number::Float(0.25)
        ]
    );
}

#[test]
fn test_failures_leave_state_untouched() {
    let mut calc = Calculator::with_builtins();
    calc.perform("add", &[json!(2), json!(2)]).unwrap();

    let err = calc.perform("add", &[json!(1), json!([2])]).unwrap_err();
    assert!(matches!(err, CalcError::InvalidParams { index: 1, found: "array" }));

    let err = calc.perform("modulo", &[json!(7), json!(2)]).unwrap_err();
    assert_eq!(err.to_string(), "Operation not found: modulo");

    let mut pair = operation("a", sum);
    pair.extend(operation("b", sum));
    assert!(calc.add_operation(pair).is_err());

    assert_eq!(calc.history().len(), 1);
    assert_eq!(calc.list_operations().len(), 4);
    assert_eq!(calc.repeat_last().unwrap(), Some(Number::Int(4)));
}

#[test]
fn test_custom_operation_round() {
    let mut calc = Calculator::default();
    calc.add_operation(operation("max", |params: &[Number]| {
        params
            .iter()
            .copied()
            .reduce(|a, b| if b.as_f64() > a.as_f64() { b } else { a })
            .unwrap_or(Number::Int(0))
    }))
    .unwrap();

    assert_eq!(
        calc.perform("max", &[json!(3), json!(9.5), json!(-1)]).unwrap(),
        Number::Float(9.5)
    );
    assert_eq!(calc.list_operations(), vec!["max".to_string()]);
}

#[test]
fn test_history_serializes_to_json() {
    let mut calc = Calculator::new(operation("add", sum))
        .with_clock(FixedClock("2016-05-20 12:00:00".to_string()));
    calc.perform("add", &[json!(1), json!(2)]).unwrap();

    let json = serde_json::to_value(calc.history()).unwrap();
    assert_eq!(
        json,
        json!([{
            "timestamp": "2016-05-20 12:00:00",
            "operation": "add",
            "params": [1, 2],
            "result": 3
        }])
    );
}
