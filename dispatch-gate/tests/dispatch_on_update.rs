//! Gate behavior across host re-renders, driven by GateHarness

use dispatch_gate::prelude::*;
use dispatch_gate::testing::GateHarness;
use dispatch_gate::{assert_emitted, assert_not_emitted};
use serde_json::{json, Value};

#[derive(Action, Clone, Debug, PartialEq)]
enum TodoAction {
    Mock(Vec<Value>),
    ClearState,
    ClearTodos,
    SetCar(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
struct TodoState {
    todos: Option<Vec<String>>,
    car: Option<String>,
    name: String,
}

fn initial_state() -> TodoState {
    TodoState {
        todos: None,
        car: None,
        name: "Gatsby".into(),
    }
}

fn reducer(state: &mut TodoState, action: TodoAction) -> bool {
    let before = state.clone();
    match action {
        TodoAction::Mock(_) => state.todos = Some(Vec::new()),
        TodoAction::ClearState => *state = initial_state(),
        TodoAction::ClearTodos => state.todos = None,
        TodoAction::SetCar(car) => state.car = Some(car),
    }
    *state != before
}

fn should_dispatch(state: &TodoState, props: &Props) -> bool {
    state.todos.is_none() && props.get("show_todos") == Some(&json!(true))
}

fn todos_gate() -> DispatchGate<TodoState, TodoAction> {
    with_dispatch_on_update(
        GateConfig::new(TodoAction::Mock)
            .select("todos", |state: &TodoState, _| json!(state.todos))
            .condition(should_dispatch),
    )
}

#[test]
fn test_dispatches_only_when_updated_and_condition_met() {
    let store = Store::new(initial_state(), reducer);
    let mut harness = GateHarness::with_props(
        todos_gate(),
        store,
        Props::new().with("show_todos", false),
    );

    harness.mount();
    assert_eq!(harness.dispatch_count(), 0);

    harness.set_prop("show_todos", "No, do not show them!");
    assert_eq!(harness.dispatch_count(), 0);

    harness.set_prop("show_todos", true);
    assert_eq!(harness.dispatch_count(), 1);
    assert_eq!(harness.last_dispatched(), Some(&TodoAction::Mock(vec![])));
    assert_eq!(harness.state().todos, Some(vec![]));

    harness.set_prop("show_todos", false);
    harness.set_prop("show_todos", true);
    assert_eq!(harness.dispatch_count(), 1);

    harness.dispatch(TodoAction::ClearState);
    assert_eq!(harness.dispatch_count(), 2);
}

#[test]
fn test_passes_action_arguments_in_order() {
    let gate = with_dispatch_on_update(
        GateConfig::new(TodoAction::Mock)
            .select("todos", |state: &TodoState, _| json!(state.todos))
            .select("car", |state: &TodoState, _| json!(state.car))
            .select("name", |state: &TodoState, props| {
                json!(format!(
                    "{} {}",
                    props.get_str("prefix").unwrap_or_default(),
                    state.name
                ))
            })
            .derived_arg(|props| props.lookup("car"))
            .args(["name", "page"])
            .condition(should_dispatch),
    );
    let props = Props::new()
        .with("prefix", "The Great")
        .with("show_todos", false)
        .with("page", Value::Null);
    let mut harness = GateHarness::with_props(gate, Store::new(initial_state(), reducer), props);

    harness.mount();
    assert_eq!(harness.dispatch_count(), 0);

    // condition holds but `page` is still null
    harness.set_prop("show_todos", true);
    assert_eq!(harness.dispatch_count(), 0);

    harness.set_prop("page", 1);
    assert_eq!(harness.dispatch_count(), 1);
    assert_eq!(
        harness.last_dispatched(),
        Some(&TodoAction::Mock(vec![
            Value::Null,
            json!("The Great Gatsby"),
            json!(1)
        ]))
    );

    // todos are loaded, so the condition is false again
    harness.dispatch(TodoAction::SetCar("Volkswagen Beetle".into()));
    assert_eq!(harness.dispatch_count(), 1);

    harness.dispatch(TodoAction::ClearTodos);
    assert_eq!(harness.dispatch_count(), 2);
    assert_eq!(
        harness.last_dispatched(),
        Some(&TodoAction::Mock(vec![
            json!("Volkswagen Beetle"),
            json!("The Great Gatsby"),
            json!(1)
        ]))
    );
}

#[test]
fn test_false_condition_never_dispatches() {
    let gate = with_dispatch_on_update(
        GateConfig::new(TodoAction::Mock).condition(|_: &TodoState, _| false),
    );
    let mut harness = GateHarness::new(gate, Store::new(initial_state(), reducer));

    harness.mount();
    harness.set_prop("show_todos", true);
    harness.dispatch(TodoAction::ClearState);
    harness.dispatch(TodoAction::SetCar("Model T".into()));

    assert!(harness.dispatched().is_empty());
    assert_not_emitted!(harness.dispatched(), TodoAction::Mock(_));
}

#[test]
fn test_required_props_block_even_when_condition_holds() {
    let gate = with_dispatch_on_update(
        GateConfig::new(TodoAction::Mock)
            .select("car", |state: &TodoState, _| json!(state.car))
            .arg("car"),
    );
    let mut harness = GateHarness::new(gate, Store::new(initial_state(), reducer));

    harness.mount();
    harness.set_prop("unrelated", 1);
    assert_eq!(harness.dispatch_count(), 0);

    // Condition is always true: the first `Mock` loads todos and re-renders,
    // the second leaves state unchanged and the host stops re-rendering.
    harness.dispatch(TodoAction::SetCar("Beetle".into()));
    assert_eq!(harness.dispatch_count(), 2);
    assert_emitted!(harness.dispatched(), TodoAction::Mock(args) if args == &vec![json!("Beetle")]);
}

#[test]
fn test_readiness_off_dispatches_with_nulls() {
    let gate = with_dispatch_on_update(
        GateConfig::new(TodoAction::Mock)
            .arg("page")
            .require_all_props(false)
            .condition(should_dispatch),
    );
    let mut harness = GateHarness::with_props(
        gate,
        Store::new(initial_state(), reducer),
        Props::new().with("show_todos", true),
    );

    harness.mount();
    assert_eq!(harness.dispatched(), &[TodoAction::Mock(vec![Value::Null])]);
}

#[test]
fn test_identical_cycles_dispatch_once_each() {
    // No state change on dispatch, so every cycle stands alone.
    fn ignore(_: &mut TodoState, _: TodoAction) -> bool {
        false
    }

    let gate = with_dispatch_on_update(GateConfig::new(TodoAction::Mock).condition(should_dispatch));
    let props = Props::new().with("show_todos", true);
    let mut harness = GateHarness::with_props(gate, Store::new(initial_state(), ignore), props);

    assert_eq!(harness.dispatch_count(), 0);
    harness.render();
    harness.render();
    assert_eq!(harness.dispatch_count(), 2);
    assert_eq!(harness.cycles(), 2);
}

#[test]
fn test_passthrough_connector() {
    let gate = with_dispatch_on_update(
        GateConfig::new(TodoAction::Mock)
            .passthrough(json!({ "page": 7 }))
            .arg("page"),
    );
    let mut harness = GateHarness::with_props(
        gate,
        Store::new(initial_state(), |_: &mut TodoState, _: TodoAction| false),
        Props::new().with("page", 1),
    );

    harness.mount();
    assert_eq!(harness.dispatched(), &[TodoAction::Mock(vec![json!(7)])]);
}
