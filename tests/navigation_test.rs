use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use questionnaire_flow::engine::{Dispatch, RespondingEvent, TaggedEvent};
use questionnaire_flow::gate::GateAction;
use questionnaire_flow::routing::{address_to_link, enumerate_all_addresses};
use questionnaire_flow::shell::SlideDirection;
use questionnaire_flow::{
    Address, Catalog, QuestionnaireSession, RouteError, RouteTable, SessionStore,
};

const CATALOG: &str = include_str!("../data/questionnaire.toml");

fn routes() -> Arc<RouteTable> {
    RouteTable::build(Catalog::from_toml_str(CATALOG).unwrap()).unwrap()
}

fn session(routes: Arc<RouteTable>) -> QuestionnaireSession {
    QuestionnaireSession::new(routes, SessionStore::interactive(), "ตอนที่ {index}")
}

#[test]
fn every_address_round_trips_through_its_link() {
    let routes = routes();
    for address in routes.addresses() {
        let link = address_to_link(address);
        assert_eq!(&routes.link_to_address(&link).unwrap(), address);
    }
}

#[test]
fn enumeration_is_unique_and_total() {
    let catalog = Catalog::from_toml_str(CATALOG).unwrap();
    let addresses = enumerate_all_addresses(&catalog);
    let unique: HashSet<&Address> = addresses.iter().collect();
    assert_eq!(unique.len(), addresses.len());
    assert_eq!(addresses.len(), catalog.question_count());
}

#[test]
fn prev_and_next_links_match_neighbours() {
    let routes = routes();
    let links = routes.static_paths();
    for (i, link) in links.iter().enumerate() {
        let view = routes.resolve(link).unwrap();
        assert_eq!(view.link_index, i);
        assert_eq!(view.prev_question_link.as_ref(), i.checked_sub(1).and_then(|p| links.get(p)));
        assert_eq!(view.next_question_link.as_ref(), links.get(i + 1));
    }
    assert!(routes.resolve(&links[0]).unwrap().prev_question_link.is_none());
    assert!(routes.resolve(links.last().unwrap()).unwrap().next_question_link.is_none());
}

#[test]
fn unknown_routes_fail_closed() {
    let routes = routes();
    for link in [
        "/questionnaires/about-you/2",
        "/questionnaires/nowhere/0",
        "/questionnaires/about-you/00",
        "/questionnaires/About-You/0",
    ] {
        let err = routes.resolve(link).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err, RouteError::invalid(link));
    }
}

#[test]
fn direction_sign_follows_link_index() {
    let routes = routes();
    let links: Vec<String> = routes.static_paths().to_vec();
    let mut s = session(routes);

    s.open(&links[3]).unwrap();
    assert_eq!(s.frame().unwrap().direction, SlideDirection::None);
    s.open(&links[4]).unwrap();
    assert_eq!(s.frame().unwrap().direction, SlideDirection::Forward);
    s.open(&links[1]).unwrap();
    assert_eq!(s.frame().unwrap().direction, SlideDirection::Backward);
}

#[test]
fn full_walk_through_finishes_with_every_answer() {
    let mut s = session(routes());
    s.open_first().unwrap();

    s.input("Nok").unwrap();
    assert!(matches!(s.advance().unwrap(), GateAction::Advance(_)));

    assert_eq!(s.advance().unwrap(), GateAction::Denied);
    s.input("2").unwrap();
    s.advance().unwrap();

    s.input("1,2").unwrap();
    s.advance().unwrap();

    s.input("1 3").unwrap();
    s.input("2 1").unwrap();
    assert!(!s.is_responding_ok());
    s.input("3 2").unwrap();
    assert!(s.is_responding_ok());
    s.advance().unwrap();

    // optional long answer
    assert!(s.is_responding_ok());
    assert_eq!(s.advance().unwrap(), GateAction::Finish);

    let submission = s.submission().unwrap();
    assert_eq!(submission.answers.len(), 6);
    assert_eq!(submission.answers["about-you-0"], serde_json::json!("Nok"));
    assert_eq!(submission.answers["commute-0"], serde_json::json!([0, 1]));
}

#[test]
fn late_events_from_unmounted_question_are_dropped() {
    let mut s = session(routes());
    s.open_first().unwrap();
    s.input("Nok").unwrap();
    s.advance().unwrap();

    let before = s.store().get_registered_groups();
    for event in [
        RespondingEvent::Validate(true),
        RespondingEvent::Edited,
        RespondingEvent::RegisteringGroups(BTreeSet::from(["about-you-0".to_string()])),
    ] {
        assert_eq!(s.dispatch(&TaggedEvent::new("about-you-0", event)), Dispatch::Stale);
    }
    assert!(!s.is_responding_ok());
    assert!(!s.is_edited_once_this_visit());
    assert_eq!(s.store().get_registered_groups(), before);
}

#[test]
fn registered_groups_follow_the_mounted_question() {
    let routes = routes();
    let mut s = session(routes.clone());
    s.open("/questionnaires/commute/1").unwrap();
    assert_eq!(
        s.store().get_registered_groups(),
        BTreeSet::from([
            "commute-1#0".to_string(),
            "commute-1#1".to_string(),
            "commute-1#2".to_string(),
        ])
    );
    s.open("/questionnaires/feedback/0").unwrap();
    assert_eq!(
        s.store().get_registered_groups(),
        BTreeSet::from(["feedback-0".to_string()])
    );
}

#[test]
fn fresh_store_reports_absent_answer() {
    let store = SessionStore::interactive();
    assert!(store.read_answer("groupX").is_none());
}
