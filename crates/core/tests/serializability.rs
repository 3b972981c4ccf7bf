mod common;

use sercheck_core::precedence::PrecedenceGraph;
use sercheck_core::serializability::error::Error;
use sercheck_core::{all_serial_orders, check, is_conflict_serializable};

// -- Not serializable ----------------------------------------------------

#[test]
fn cycle_between_two_writers() {
    let s = schedule! {
        [w(T1, A), _],
        [_, r(T3, A)],
        [w(T3, B), w(T1, A)],
    };

    assert!(!is_conflict_serializable(&s));
    assert!(all_serial_orders(&s).is_empty());

    let Err(Error::Cycle { cycle, graph }) = check(&s) else {
        panic!("expected a cycle");
    };
    assert_eq!(cycle, vec!["T1", "T3"]);
    assert!(graph.precedes(&"T1", &"T3"));
    assert!(graph.precedes(&"T3", &"T1"));
}

#[test]
fn lost_update_is_not_serializable() {
    let s = schedule! {
        [r(T1, X), r(T2, X)],
        [w(T1, X), _],
        [_, w(T2, X)],
    };

    assert!(!is_conflict_serializable(&s));
    assert!(check(&s).is_err());
}

#[test]
fn three_transaction_cycle() {
    let s = schedule! {
        [w(T1, A)],
        [r(T2, A)],
        [w(T2, B)],
        [r(T3, B)],
        [w(T3, C)],
        [r(T1, C)],
    };

    let Err(Error::Cycle { cycle, .. }) = check(&s) else {
        panic!("expected a cycle");
    };
    assert_eq!(cycle, vec!["T1", "T2", "T3"]);
}

// -- Serializable --------------------------------------------------------

#[test]
fn single_edge_four_transactions() {
    let s = schedule! {
        [w(T1, A), r(T2, D)],
        [r(T3, A), r(T4, F)],
    };

    let graph = PrecedenceGraph::new(&s);
    assert_eq!(graph.graph().to_edge_list(), vec![("T1", "T3")]);

    let orders = all_serial_orders(&s);
    assert_eq!(orders.len(), 12);
    for order in &orders {
        let t1 = order.iter().position(|t| *t == "T1").unwrap();
        let t3 = order.iter().position(|t| *t == "T3").unwrap();
        assert!(t1 < t3, "{order:?} runs T3 before T1");
    }
}

#[test]
fn reads_only_allow_every_order() {
    let s = schedule! {
        [r(T1, A), r(T2, A)],
    };

    assert_eq!(all_serial_orders(&s), vec![vec!["T1", "T2"], vec!["T2", "T1"]]);
}

#[test]
fn edge_with_isolated_transaction() {
    let s = schedule! {
        [w(T1, A), _, _],
        [_, r(T2, A), r(T3, B)],
    };

    assert_eq!(
        all_serial_orders(&s),
        vec![
            vec!["T1", "T2", "T3"],
            vec!["T1", "T3", "T2"],
            vec!["T3", "T1", "T2"],
        ]
    );
}

#[test]
fn chain_has_one_order() {
    let s = schedule! {
        [w(T1, A)],
        [r(T2, A)],
        [w(T2, B)],
        [r(T3, B)],
    };

    assert_eq!(all_serial_orders(&s), vec![vec!["T1", "T2", "T3"]]);
}

#[test]
fn same_step_conflict_follows_columns() {
    let s = schedule! {
        [w(T2, A), r(T1, A)],
    };

    assert_eq!(all_serial_orders(&s), vec![vec!["T2", "T1"]]);
}

#[test]
fn check_returns_witness() {
    let s = schedule! {
        [w(T1, A), r(T2, D)],
        [r(T3, A), r(T4, F)],
    };

    let witness = check(&s).expect("schedule is serializable");
    assert_eq!(witness.graph, PrecedenceGraph::new(&s));
    assert_eq!(witness.serial_orders, all_serial_orders(&s));
}

// -- Degenerate schedules ------------------------------------------------

#[test]
fn empty_schedule_has_empty_order() {
    let s = schedule! {};

    assert!(is_conflict_serializable(&s));
    assert_eq!(all_serial_orders(&s), vec![Vec::<&str>::new()]);
}

#[test]
fn gaps_only_schedule_has_empty_order() {
    let s = schedule! {
        [_, _],
        [],
    };

    assert_eq!(all_serial_orders(&s), vec![Vec::<&str>::new()]);
}

#[test]
fn single_transaction_has_one_order() {
    let s = schedule! {
        [w(T1, A)],
        [r(T1, A)],
        [w(T1, A)],
    };

    assert_eq!(all_serial_orders(&s), vec![vec!["T1"]]);
}

#[test]
fn repeated_checks_agree() {
    let s = schedule! {
        [w(T1, A), r(T2, B), w(T3, C)],
        [r(T3, A), w(T1, B), _],
    };

    let first = all_serial_orders(&s);
    assert_eq!(all_serial_orders(&s), first);
    assert_eq!(check(&s).map(|w| w.serial_orders), Ok(first));
}
