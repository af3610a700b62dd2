//! End-to-end statement construction through the public API.

use dbqb::prelude::*;
use dbqb::{BuilderState, FieldValues, applicability};

#[test]
fn select_with_columns() {
    let mut qb = StatementBuilder::new();
    qb.set_table("Users")
        .and_then(|qb| qb.set_action(Action::Select))
        .and_then(|qb| qb.set_columns(["id", "name"]))
        .unwrap();
    assert_eq!(qb.build().unwrap(), "select `id`, `name` from `Users`");
}

#[test]
fn select_star_where() {
    let mut qb = StatementBuilder::new();
    qb.set_table("Users").unwrap();
    qb.set_action("select".parse().unwrap()).unwrap();
    qb.add_condition(Condition::parse("and", "age", ">=", false, "18").unwrap()).unwrap();
    assert_eq!(qb.build().unwrap(), "select * from `Users` where `age`>='18'");
}

#[test]
fn insert_keeps_field_order() {
    let mut qb = StatementBuilder::new();
    qb.set_table("Users").unwrap();
    qb.set_action(Action::Insert).unwrap();
    qb.set_field_value("name", "Amy").unwrap();
    qb.set_field_value("age", "30").unwrap();
    assert_eq!(
        qb.build().unwrap(),
        "insert into `Users` (`name`, `age`) values ('Amy', '30')"
    );
}

#[test]
fn empty_group_is_invalid_argument() {
    let err = CompositeCondition::new(Vec::<Condition>::new()).unwrap_err();
    assert!(matches!(err, QbError::InvalidArgument(_)));
    assert!(err.is_misuse());
    assert_eq!(err.code(), 10);
}

#[test]
fn missing_table_then_retry() {
    let mut qb = StatementBuilder::new();
    qb.set_action(Action::Select).unwrap();
    let err = qb.build().unwrap_err();
    assert_eq!(err, QbError::MissingTable);
    assert_eq!(err.code(), 6);
    assert_eq!(qb.state(), BuilderState::Configuring);

    qb.set_table("Users").unwrap();
    assert_eq!(qb.build().unwrap(), "select * from `Users`");
    assert_eq!(qb.state(), BuilderState::Built);
}

#[test]
fn leading_conjunction_follows_first_member() {
    let deep = CompositeCondition::new([CompositeCondition::new([
        Condition::or("a", Operator::Equal, "1"),
        Condition::and("b", Operator::Equal, "2"),
    ])
    .unwrap()])
    .unwrap();
    assert_eq!(deep.leading_conjunction(), Conjunction::Or);
    assert_eq!(deep.serialize(true), "or ((`a`='1' and `b`='2'))");
}

#[test]
fn insert_never_takes_optional_clauses() {
    let rules = applicability(Action::Insert).unwrap();
    assert!(!rules.where_clause && !rules.order_by && !rules.limit);

    let mut qb = StatementBuilder::new();
    qb.set_table("t").unwrap().set_action(Action::Insert).unwrap();
    qb.set_field_values(FieldValues::from_iter([("a", "1")]).iter()).unwrap();
    qb.add_composite_condition([Condition::and("a", Operator::Equal, "1")]).unwrap();
    qb.set_order("a", Order::Descending).unwrap();
    qb.set_limit(1).unwrap();
    assert_eq!(qb.build().unwrap(), "insert into `t` (`a`) values ('1')");
}

#[test]
fn delete_with_everything() {
    let mut qb = StatementBuilder::new();
    qb.set_table("sessions").unwrap();
    qb.set_action(Action::Delete).unwrap();
    qb.add_condition(Condition::and("expires_at", Operator::Less, "2024-06-01")).unwrap();
    qb.add_condition(Condition::or("user", Operator::Regex, "^bot_").negated()).unwrap();
    qb.set_order("expires_at", "desc".parse().unwrap()).unwrap();
    qb.set_limit(500).unwrap();
    assert_eq!(
        qb.build().unwrap(),
        "delete from `sessions` where `expires_at`<'2024-06-01' or not `user` regexp '^bot_' order by `expires_at` desc limit 500"
    );
}

#[test]
fn unknown_text_is_rejected_at_parse_time() {
    assert_eq!(
        "upsert".parse::<Action>(),
        Err(QbError::UnknownAction("upsert".to_string()))
    );
    assert!(matches!(
        Condition::parse("xor", "a", "=", false, "1"),
        Err(QbError::UnknownConjunction(_))
    ));
    assert!(matches!(
        Condition::parse("and", "a", "<>", false, "1"),
        Err(QbError::UnknownOperator(_))
    ));
    assert!(matches!("sideways".parse::<Order>(), Err(QbError::UnknownOrder(_))));
}

#[test]
fn builders_are_independent() {
    let mut a = StatementBuilder::new();
    let mut b = StatementBuilder::new();
    a.set_table("a").unwrap().set_action(Action::Delete).unwrap();
    b.set_table("b").unwrap().set_action(Action::Delete).unwrap();
    assert_eq!(a.build().unwrap(), "delete from `a`");
    assert_eq!(b.build().unwrap(), "delete from `b`");
}
