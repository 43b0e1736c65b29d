//! Property-based tests for response-shape normalization.
//!
//! Uses proptest to verify:
//! 1. Arbitrary JSON never causes normalization to panic.
//! 2. Arbitrary bytes never cause body parsing to panic.
//! 3. Enveloped and bare task arrays normalize to the same sequence.
//! 4. A record normalizes the same whether enveloped, bare, or first in an array.
//! 5. Nulled fields decode to their defaults without dropping the record.

use proptest::prelude::*;
use serde_json::{Value, json};
use tasklist_proto::{Payload, Task, TaskId};

/// Strategy for arbitrary JSON values of bounded depth.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        ".{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::hash_map("(_id|todo|completed|data|[a-z]{1,6})", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strategy for well-formed tasks.
fn arb_task() -> impl Strategy<Value = Task> {
    ("[a-f0-9]{1,24}", ".{0,64}", any::<bool>()).prop_map(|(id, text, completed)| Task {
        id: TaskId::new(id),
        text,
        completed,
    })
}

proptest! {
    #[test]
    fn normalization_never_panics(value in arb_json()) {
        let _ = Payload::from_value(value.clone()).into_tasks();
        let _ = Payload::from_value(value).into_task();
    }

    #[test]
    fn body_parsing_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Payload::from_slice(&bytes).into_tasks();
    }

    #[test]
    fn enveloped_and_bare_lists_agree(tasks in prop::collection::vec(arb_task(), 0..16)) {
        let bare = serde_json::to_value(&tasks).unwrap();
        let enveloped = json!({ "data": bare.clone() });

        let from_bare = Payload::from_value(bare).into_tasks();
        let from_enveloped = Payload::from_value(enveloped).into_tasks();

        prop_assert_eq!(&from_bare, &tasks);
        prop_assert_eq!(&from_enveloped, &tasks);
    }

    #[test]
    fn record_shapes_agree(task in arb_task()) {
        let bare = serde_json::to_value(&task).unwrap();

        prop_assert_eq!(Payload::from_value(bare.clone()).into_task(), task.clone());
        prop_assert_eq!(Payload::from_value(json!({ "data": bare.clone() })).into_task(), task.clone());
        prop_assert_eq!(Payload::from_value(json!([bare])).into_task(), task);
    }

    #[test]
    fn null_fields_never_drop_records(
        tasks in prop::collection::vec(arb_task(), 1..16),
        nulls in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 16),
    ) {
        let expected: Vec<Task> = tasks
            .iter()
            .zip(&nulls)
            .map(|(task, &(id, text, completed))| Task {
                id: if id { TaskId::default() } else { task.id.clone() },
                text: if text { String::new() } else { task.text.clone() },
                completed: !completed && task.completed,
            })
            .collect();

        let wire: Vec<Value> = tasks
            .iter()
            .zip(&nulls)
            .map(|(task, &(id, text, completed))| {
                let mut value = serde_json::to_value(task).unwrap();
                for (key, nulled) in [("_id", id), ("todo", text), ("completed", completed)] {
                    if nulled {
                        value[key] = Value::Null;
                    }
                }
                value
            })
            .collect();

        let decoded = Payload::from_value(json!({ "data": wire })).into_tasks();
        prop_assert_eq!(decoded, expected);
    }
}
