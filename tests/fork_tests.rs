
use std::collections::HashSet;

use fork_remotes::commands::forks::{add_forks_as_remotes, register_forks, FetchPlan};
use fork_remotes::interactive::{AssumeYes, Confirm};
use fork_remotes::{ForkLimit, RepositoryReference, SetupError};
use test_utils::{FakeForks, FakeRemotes};

fn hello_world() -> RepositoryReference {
    RepositoryReference::parse("https://github.com/octocat/Hello-World").unwrap()
}

fn existing(store: &FakeRemotes) -> HashSet<String> {
    store.remotes.keys().cloned().collect()
}

struct Decline;

impl Confirm for Decline {
    fn confirm(&mut self, _prompt: &str) -> std::io::Result<bool> {
        Ok(false)
    }
}

struct MustNotAsk;

impl Confirm for MustNotAsk {
    fn confirm(&mut self, prompt: &str) -> std::io::Result<bool> {
        panic!("unexpected prompt: {prompt}");
    }
}

#[test]
fn test_stops_exactly_at_limit() {
    let source = FakeForks::new(&["a", "b", "c", "d", "e", "f", "g", "h"], 30);
    let mut store = FakeRemotes::with(&[
        ("origin", "https://github.com/endolith/Hello-World.git"),
        ("upstream", "https://github.com/octocat/Hello-World.git"),
    ]);

    let existing_remotes = existing(&store);
    let report = register_forks(
        &source,
        &mut store,
        &hello_world(),
        "endolith",
        existing_remotes,
        FetchPlan::Bounded(5),
    )
    .unwrap();

    assert_eq!(report.processed, 5);
    assert_eq!(report.added, 5);
    assert_eq!(report.skipped, 0);
    assert!(report.limit_reached);
    assert_eq!(store.remotes.len(), 7);
    for owner in ["a", "b", "c", "d", "e"] {
        assert_eq!(
            store.remotes[owner],
            format!("https://github.com/{owner}/Hello-World.git")
        );
    }
    assert!(!store.remotes.contains_key("f"));
}

#[test]
fn test_skipped_forks_count_towards_limit() {
    let source = FakeForks::new(&["a", "endolith", "b", "c", "d"], 30);
    let mut store = FakeRemotes::with(&[("origin", "x"), ("upstream", "y"), ("b", "manual")]);

    let existing_remotes = existing(&store);
    let report = register_forks(
        &source,
        &mut store,
        &hello_world(),
        "endolith",
        existing_remotes,
        FetchPlan::Bounded(4),
    )
    .unwrap();

    assert_eq!(report.processed, 4);
    assert_eq!(report.added, 2);
    assert_eq!(report.skipped, 2);
    // Pre-existing remote is left alone
    assert_eq!(store.remotes["b"], "manual");
    assert!(store.remotes.contains_key("c"));
    assert!(!store.remotes.contains_key("d"));
    assert!(!store.remotes.contains_key("endolith"));
}

#[test]
fn test_stops_mid_page() {
    let source = FakeForks::new(&["a", "b", "c", "d", "e", "f"], 4);
    let mut store = FakeRemotes::default();

    let report = register_forks(
        &source,
        &mut store,
        &hello_world(),
        "me",
        HashSet::new(),
        FetchPlan::Bounded(2),
    )
    .unwrap();

    assert_eq!(report.added, 2);
    assert_eq!(source.pages_requested.get(), 1);
}

#[test]
fn test_pages_until_empty_page() {
    let source = FakeForks::new(&["a", "b", "c", "d", "e"], 2);
    let mut store = FakeRemotes::default();

    let report = register_forks(
        &source,
        &mut store,
        &hello_world(),
        "me",
        HashSet::new(),
        FetchPlan::Unbounded,
    )
    .unwrap();

    assert_eq!(report.added, 5);
    assert!(!report.limit_reached);
    // Three pages with data, then one empty page
    assert_eq!(source.pages_requested.get(), 4);
}

#[test]
fn test_limit_above_fork_count_ends_at_empty_page() {
    let source = FakeForks::new(&["a", "b"], 30);
    let mut store = FakeRemotes::default();

    let report = register_forks(
        &source,
        &mut store,
        &hello_world(),
        "me",
        HashSet::new(),
        FetchPlan::Bounded(30),
    )
    .unwrap();

    assert_eq!(report.processed, 2);
    assert!(!report.limit_reached);
}

#[test]
fn test_duplicate_owner_within_run_added_once() {
    let source = FakeForks::new(&["a", "a", "b"], 30);
    let mut store = FakeRemotes::default();

    let report = register_forks(
        &source,
        &mut store,
        &hello_world(),
        "me",
        HashSet::new(),
        FetchPlan::Unbounded,
    )
    .unwrap();

    assert_eq!(report.added, 2);
    assert_eq!(report.skipped, 1);
}

#[test]
fn test_remote_add_failure_is_fatal_and_keeps_earlier_remotes() {
    let source = FakeForks::new(&["a", "bad name", "c"], 30);
    let mut store = FakeRemotes::default();
    store.rejected.push("bad name".to_string());

    let err = register_forks(
        &source,
        &mut store,
        &hello_world(),
        "me",
        HashSet::new(),
        FetchPlan::Unbounded,
    )
    .unwrap_err();

    assert!(matches!(err, SetupError::ExternalTool { .. }));
    assert!(store.remotes.contains_key("a"));
    assert!(!store.remotes.contains_key("c"));
}

#[test]
fn test_declined_unlimited_run_adds_nothing() {
    let source = FakeForks::new(&["a", "b"], 30).with_total(5000);
    let mut store = FakeRemotes::with(&[("origin", "x"), ("upstream", "y")]);

    let outcome = add_forks_as_remotes(
        &source,
        &mut store,
        &hello_world(),
        "me",
        ForkLimit::All,
        100,
        &mut Decline,
    )
    .unwrap();

    assert!(outcome.is_none());
    assert_eq!(source.pages_requested.get(), 0);
    assert_eq!(store.remotes.len(), 2);
}

#[test]
fn test_confirmed_unlimited_run_adds_everything() {
    let source = FakeForks::new(&["a", "b", "c"], 1).with_total(500);
    let mut store = FakeRemotes::default();

    let report = add_forks_as_remotes(
        &source,
        &mut store,
        &hello_world(),
        "me",
        ForkLimit::All,
        100,
        &mut AssumeYes,
    )
    .unwrap()
    .unwrap();

    assert_eq!(report.added, 3);
}

#[test]
fn test_bounded_run_never_prompts() {
    let source = FakeForks::new(&["a", "b", "c"], 30).with_total(100_000);
    let mut store = FakeRemotes::default();

    let report = add_forks_as_remotes(
        &source,
        &mut store,
        &hello_world(),
        "me",
        ForkLimit::Limited(2),
        100,
        &mut MustNotAsk,
    )
    .unwrap()
    .unwrap();

    assert_eq!(report.added, 2);
}

#[test]
fn test_rerun_is_a_superset() {
    let source = FakeForks::new(&["a", "b", "c", "d"], 30);
    let mut store = FakeRemotes::with(&[("origin", "x"), ("upstream", "y")]);

    add_forks_as_remotes(
        &source,
        &mut store,
        &hello_world(),
        "me",
        ForkLimit::Limited(2),
        100,
        &mut MustNotAsk,
    )
    .unwrap();
    let first: HashSet<String> = existing(&store);

    let second_report = add_forks_as_remotes(
        &source,
        &mut store,
        &hello_world(),
        "me",
        ForkLimit::Limited(4),
        100,
        &mut MustNotAsk,
    )
    .unwrap()
    .unwrap();
    let second: HashSet<String> = existing(&store);

    assert!(first.is_subset(&second));
    assert_eq!(second_report.skipped, 2);
    assert_eq!(second_report.added, 2);
}
