//! Integration tests for wayfinder-router
//!
//! Cover dispatch order, parameter capture, wildcards, regex routes, the
//! no-match state machine and history integration.

use pretty_assertions::assert_eq;
use regex::Regex;
use rstest::rstest;
use std::cell::RefCell;
use std::rc::Rc;
use wayfinder_router::*;

/// Records `(route label, params)` for every handler call
#[derive(Clone, Default)]
struct Calls(Rc<RefCell<Vec<(String, RouteParams)>>>);

impl Calls {
    fn handler(&self, label: &str) -> impl Fn(&RouteParams) + 'static {
        let calls = self.0.clone();
        let label = label.to_string();
        move |params: &RouteParams| calls.borrow_mut().push((label.clone(), params.clone()))
    }

    fn labels(&self) -> Vec<String> {
        self.0.borrow().iter().map(|(label, _)| label.clone()).collect()
    }

    fn last_params(&self) -> RouteParams {
        self.0.borrow().last().map(|(_, p)| p.clone()).unwrap_or_default()
    }
}

fn router_with_default(default_route: &str) -> Router {
    Router::new(RouterOptions::default().with_default_route(default_route))
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_param_capture() {
    let calls = Calls::default();
    let mut router = Router::default();
    router.route("/users/:id", calls.handler("user")).unwrap();

    router.navigate("/users/42").unwrap();

    assert_eq!(calls.labels(), vec!["user"]);
    assert_eq!(calls.last_params().get("id"), Some("42"));
    assert_eq!(calls.last_params().len(), 1);
}

#[test]
fn test_wildcard_matches_trailing_segments() {
    let calls = Calls::default();
    let mut router = Router::default();
    router.route("/files/*", calls.handler("files")).unwrap();

    let nav = router.navigate("/files/a/b/c").unwrap();

    assert_eq!(nav.matched, Some(0));
    assert_eq!(calls.labels(), vec!["files"]);
}

#[rstest]
#[case("/home")]
#[case("/HOME")]
#[case("/hOmE")]
fn test_literal_segments_ignore_case(#[case] path: &str) {
    let calls = Calls::default();
    let mut router = router_with_default("/nowhere");
    router.route("/Home", calls.handler("home")).unwrap();

    assert!(router.navigate(path).unwrap().is_matched());
    assert_eq!(calls.labels(), vec!["home"]);
}

#[test]
fn test_case_sensitive_option() {
    let calls = Calls::default();
    let mut router = Router::new(
        RouterOptions::default()
            .with_case_sensitivity(false)
            .with_no_match(NoMatchPolicy::Ignore),
    );
    router.route("/Home", calls.handler("home")).unwrap();

    assert!(!router.navigate("/home").unwrap().is_matched());
    assert!(router.navigate("/Home").unwrap().is_matched());
}

#[test]
fn test_first_registered_route_wins() {
    let calls = Calls::default();
    let mut router = Router::default();
    router
        .route("/users/:id", calls.handler("by-id"))
        .unwrap()
        .route("/users/new", calls.handler("new"))
        .unwrap()
        .route("/users/:id", calls.handler("duplicate"))
        .unwrap();

    let nav = router.navigate("/users/new").unwrap();

    assert_eq!(nav.matched, Some(0));
    assert_eq!(calls.labels(), vec!["by-id"]);
}

#[test]
fn test_at_most_one_handler_per_navigation() {
    let calls = Calls::default();
    let mut router = Router::default();
    router.route("/a/*", calls.handler("wild")).unwrap();
    router.route("/a/:b", calls.handler("param")).unwrap();
    router.route_regex(Regex::new("^a").unwrap(), calls.handler("regex"));

    router.navigate("/a/x").unwrap();

    assert_eq!(calls.labels(), vec!["wild"]);
}

#[test]
fn test_params_do_not_leak_between_candidates() {
    let calls = Calls::default();
    let mut router = Router::default();
    router.route("/:section/edit", calls.handler("edit")).unwrap();
    router.route("/posts/:slug", calls.handler("post")).unwrap();

    router.navigate("/posts/hello").unwrap();

    let params = calls.last_params();
    assert_eq!(params.get("slug"), Some("hello"));
    assert_eq!(params.get("section"), None);
}

#[test]
fn test_regex_route_binds_hash() {
    let calls = Calls::default();
    let mut router = Router::default();
    router.route("/static", calls.handler("static")).unwrap();
    router.route_regex(Regex::new(r"^blog/\d{4}/").unwrap(), calls.handler("blog"));

    router.navigate("/blog/2024/hello").unwrap();

    assert_eq!(calls.labels(), vec!["blog"]);
    let last_params = calls.last_params();
    let hash: Vec<&str> = last_params
        .hash()
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(hash, vec!["blog", "2024", "hello"]);
}

#[test]
fn test_trailing_slash_needs_normalization() {
    let calls = Calls::default();
    let mut strict = Router::new(RouterOptions::default().with_no_match(NoMatchPolicy::Ignore));
    strict.route("/about", calls.handler("about")).unwrap();
    assert!(!strict.navigate("/about/").unwrap().is_matched());

    let mut lenient = Router::new(RouterOptions::default().with_normalized_paths(true));
    lenient.route("/about", calls.handler("about")).unwrap();
    let nav = lenient.navigate("/about//").unwrap();
    assert_eq!(nav.resolved, "/about");
    assert!(nav.is_matched());
}

#[test]
fn test_invalid_pattern_fails_fast() {
    let mut router = Router::default();
    let err = router.route("/users/:", |_| {}).unwrap_err();

    assert!(matches!(err, RouterError::InvalidPattern { .. }));
    assert!(router.is_empty());
}

// ============================================================================
// Default route and no-match handling
// ============================================================================

#[rstest]
#[case("")]
#[case("/")]
fn test_empty_and_root_use_default_route(#[case] path: &str) {
    let calls = Calls::default();
    let mut router = router_with_default("/home");
    router.route("/home", calls.handler("home")).unwrap();

    let nav = router.navigate(path).unwrap();

    assert_eq!(nav.resolved, "/home");
    assert!(!nav.redirected);
    assert_eq!(calls.labels(), vec!["home"]);
}

#[test]
fn test_no_match_redirects_once_to_default() {
    let calls = Calls::default();
    let observed = Rc::new(RefCell::new(Vec::<String>::new()));
    let history = MemoryHistory::new("/start");

    let mut router = Router::with_history(
        RouterOptions::default().with_default_route("/home"),
        history.clone(),
    );
    router.route("/home", calls.handler("home")).unwrap();
    let log = observed.clone();
    router.on_navigate(move |path| log.borrow_mut().push(path.to_string()));

    let nav = router.navigate("/missing").unwrap();

    assert_eq!(
        nav,
        Navigation {
            requested: "/missing".to_string(),
            resolved: "/home".to_string(),
            matched: Some(0),
            redirected: true,
        }
    );
    assert_eq!(*observed.borrow(), vec!["/missing", "/home"]);
    assert_eq!(calls.labels(), vec!["home"]);
    assert_eq!(history.entries().len(), 1);
    assert_eq!(history.current_path(), "/home");
}

#[test]
fn test_unmatched_default_route_terminates() {
    let observed = Rc::new(RefCell::new(0usize));
    let mut router = router_with_default("/home");
    let count = observed.clone();
    router.on_navigate(move |_| *count.borrow_mut() += 1);

    let nav = router.navigate("/home").unwrap();

    assert!(!nav.is_matched());
    assert!(!nav.redirected);
    assert_eq!(*observed.borrow(), 1);
}

#[test]
fn test_redirect_depth_is_bounded() {
    let observed = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut router = router_with_default("/home");
    let log = observed.clone();
    router.on_navigate(move |path| log.borrow_mut().push(path.to_string()));

    let nav = router.navigate("/missing").unwrap();

    assert!(nav.redirected);
    assert!(!nav.is_matched());
    assert_eq!(observed.borrow().len(), 1 + MAX_REDIRECT_DEPTH);
}

#[test]
fn test_not_found_handler_after_failed_redirect() {
    let missing = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut router = router_with_default("/home");
    let log = missing.clone();
    router.not_found(move |path| log.borrow_mut().push(path.to_string()));

    router.navigate("/nope").unwrap();

    assert_eq!(*missing.borrow(), vec!["/home"]);
}

#[test]
fn test_ignore_policy_stops_without_redirect() {
    let history = MemoryHistory::new("/start");
    let mut router = Router::with_history(
        RouterOptions::default()
            .with_default_route("/home")
            .with_no_match(NoMatchPolicy::Ignore),
        history.clone(),
    );
    router.route("/home", |_| {}).unwrap();

    let nav = router.navigate("/missing").unwrap();

    assert!(!nav.is_matched());
    assert_eq!(nav.resolved, "/missing");
    assert!(history.entries().is_empty());
}

#[test]
fn test_error_policy_returns_no_match() {
    let mut router = Router::new(RouterOptions::default().with_no_match(NoMatchPolicy::Error));
    router.route("/home", |_| {}).unwrap();

    let err = router.navigate("/missing").unwrap_err();

    assert_eq!(
        err,
        RouterError::NoMatch {
            path: "/missing".to_string()
        }
    );
}

#[test]
fn test_flush_removes_routes_but_keeps_default() {
    let calls = Calls::default();
    let mut router = router_with_default("/login");
    router.route("/dashboard", calls.handler("dashboard")).unwrap();
    assert!(router.navigate("/dashboard").unwrap().is_matched());

    router.flush();
    router.route("/login", calls.handler("login")).unwrap();
    let nav = router.navigate("/dashboard").unwrap();

    assert_eq!(router.default_route(), "/login");
    assert!(nav.redirected);
    assert_eq!(calls.labels(), vec!["dashboard", "login"]);
}

#[test]
fn test_flush_then_navigate_invokes_no_handler() {
    let calls = Calls::default();
    let mut router = Router::default();
    router.route("/dashboard", calls.handler("dashboard")).unwrap();

    router.flush();
    let nav = router.navigate("/dashboard").unwrap();

    assert!(!nav.is_matched());
    assert!(calls.labels().is_empty());
}

// ============================================================================
// History integration
// ============================================================================

#[test]
fn test_empty_location_pushes_default_route() {
    let history = MemoryHistory::new("");
    let _router = Router::with_history(
        RouterOptions::default().with_default_route("/welcome"),
        history.clone(),
    );

    assert_eq!(history.current_path(), "/welcome");
}

#[test]
fn test_in_app_link_pushes_and_dispatches() {
    let calls = Calls::default();
    let history = MemoryHistory::with_origin(Origin::new("https", "app.test"), "/");
    let mut router = Router::with_history(RouterOptions::default(), history.clone());
    router.route("/users/:id", calls.handler("user")).unwrap();

    let outcome = router
        .handle_event(NavigationEvent::LinkClicked {
            href: "https://app.test/users/7?tab=posts".to_string(),
            title: Some("User 7".to_string()),
        })
        .unwrap();

    assert!(matches!(outcome, EventOutcome::Navigated(ref nav) if nav.is_matched()));
    assert_eq!(calls.last_params().get("id"), Some("7"));
    assert_eq!(
        history.entries(),
        vec![HistoryEntry {
            title: "User 7".to_string(),
            url: "https://app.test/users/7?tab=posts".to_string(),
        }]
    );
}

#[test]
fn test_external_link_passes_through() {
    let calls = Calls::default();
    let history = MemoryHistory::with_origin(Origin::new("https", "app.test"), "/");
    let mut router = Router::with_history(RouterOptions::default(), history.clone());
    router.route("*", calls.handler("any")).unwrap();

    let outcome = router
        .handle_event(NavigationEvent::link("https://other.test/users/7"))
        .unwrap();

    assert_eq!(outcome, EventOutcome::PassThrough);
    assert!(calls.labels().is_empty());
    assert!(history.entries().is_empty());
}

#[test]
fn test_url_in_query_does_not_redirect_dispatch() {
    let calls = Calls::default();
    let history = MemoryHistory::with_origin(Origin::new("https", "app.test"), "/");
    let mut router = Router::with_history(RouterOptions::default(), history.clone());
    router.route("/go", calls.handler("go")).unwrap();
    router.route("/admin", calls.handler("admin")).unwrap();
    router.route("/share", calls.handler("share")).unwrap();

    let outcome = router
        .handle_event(NavigationEvent::link("/go?next=https://app.test/admin"))
        .unwrap();
    assert!(matches!(outcome, EventOutcome::Navigated(ref nav) if nav.matched == Some(0)));
    assert_eq!(history.current_path(), "/go");

    let outcome = router
        .handle_event(NavigationEvent::link("/share?u=https://other.org/"))
        .unwrap();
    assert!(matches!(outcome, EventOutcome::Navigated(ref nav) if nav.matched == Some(2)));

    assert_eq!(calls.labels(), vec!["go", "share"]);
}

#[test]
fn test_other_scheme_on_same_host_passes_through() {
    let calls = Calls::default();
    let history = MemoryHistory::with_origin(Origin::new("https", "app.test"), "/");
    let mut router = Router::with_history(RouterOptions::default(), history.clone());
    router.route("*", calls.handler("any")).unwrap();

    let outcome = router
        .handle_event(NavigationEvent::link("http://app.test/x"))
        .unwrap();

    assert_eq!(outcome, EventOutcome::PassThrough);
    assert!(calls.labels().is_empty());
    assert!(history.entries().is_empty());
}

#[test]
fn test_pop_state_dispatches_current_location() {
    let calls = Calls::default();
    let history = MemoryHistory::new("/");
    let mut router = Router::with_history(RouterOptions::default(), history.clone());
    router.route("/a", calls.handler("a")).unwrap();
    router.route("/b", calls.handler("b")).unwrap();

    router.handle_event(NavigationEvent::link("/a")).unwrap();
    router.handle_event(NavigationEvent::link("/b")).unwrap();
    history.back();
    router.handle_event(NavigationEvent::PopState).unwrap();

    assert_eq!(calls.labels(), vec!["a", "b", "a"]);
}

#[test]
fn test_start_dispatches_initial_location() {
    let calls = Calls::default();
    let mut router = Router::with_history(RouterOptions::default(), MemoryHistory::new("/about"));
    router.route("/about", calls.handler("about")).unwrap();

    router.start().unwrap();

    assert_eq!(calls.labels(), vec!["about"]);
}

#[test]
fn test_events_require_history() {
    let mut router = Router::default();
    let err = router.handle_event(NavigationEvent::PopState).unwrap_err();
    assert!(matches!(err, RouterError::InvalidState(_)));
}
