//! Proptest generators for sets, relations and functions.
#![allow(dead_code)]

use math_core::element::Value;
use math_core::function::MathFunction;
use math_core::relation::MathRelation;
use math_core::set::MathSet;
use math_core::storage::types::Encoding;
use proptest::collection::{hash_set, vec};
use proptest::prelude::*;

/// Small integer sets drawn from a shared universe, so overlaps are common.
pub fn arb_set() -> impl Strategy<Value = MathSet<i32>> {
    hash_set(0i32..12, 0..=8).prop_map(|members| MathSet::new(members).expect("integers are valid"))
}

/// Dynamic values without NaN.
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,4}".prop_map(Value::Text),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
    ];
    leaf.prop_recursive(2, 8, 3, |inner| vec(inner, 0..3).prop_map(Value::Tuple))
}

pub fn arb_encoding() -> impl Strategy<Value = Encoding> {
    prop_oneof![
        Just(Encoding::Auto),
        Just(Encoding::Hashed),
        Just(Encoding::Dense),
        Just(Encoding::Sparse),
    ]
}

/// The set `{0, 1, ..., n - 1}`.
pub fn carrier(n: i32) -> MathSet<i32> {
    MathSet::new(0..n).expect("integers are valid")
}

/// A relation from `{0..rows}` to `{0..cols}` with arbitrary pairs and encoding.
pub fn arb_relation(rows: i32, cols: i32) -> impl Strategy<Value = MathRelation<i32, i32>> {
    let max_pairs = (rows * cols) as usize;
    (vec((0..rows, 0..cols), 0..=max_pairs), arb_encoding()).prop_map(move |(pairs, encoding)| {
        MathRelation::with_encoding(carrier(rows), carrier(cols), pairs, encoding)
            .expect("pairs lie within the carriers")
    })
}

/// A partial function from `{0..rows}` to `{0..cols}`.
pub fn arb_function(rows: i32, cols: i32) -> impl Strategy<Value = MathFunction<i32, i32>> {
    (vec(proptest::option::of(0..cols), rows as usize), arb_encoding()).prop_map(
        move |(values, encoding)| {
            let pairs = values
                .into_iter()
                .enumerate()
                .filter_map(|(a, b)| b.map(|b| (a as i32, b)));
            MathFunction::with_encoding(carrier(rows), carrier(cols), pairs, encoding)
                .expect("one value per element")
        },
    )
}
