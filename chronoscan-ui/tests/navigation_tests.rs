//! Navigation flow tests

use chronoscan_ui::models::{NavigationFlow, Stage, StageStatus};

#[test]
fn home_is_visited_once_past_it() {
    for target in [Stage::Analyze, Stage::ImageViewer, Stage::ResultCard] {
        let mut flow = NavigationFlow::new();
        flow.navigate(target);
        assert!(flow.visited(Stage::Home));
    }
}

#[test]
fn analyze_is_not_visited_while_active() {
    let mut flow = NavigationFlow::new();
    flow.navigate(Stage::Analyze);
    assert!(!flow.visited(Stage::Analyze));
    assert!(flow.is_active(Stage::Analyze));
}

#[test]
fn detail_leaves_are_mutually_exclusive_but_rank_equal() {
    let mut flow = NavigationFlow::new();
    flow.navigate(Stage::ResultCard);

    assert!(flow.is_active(Stage::ResultCard));
    assert!(!flow.is_active(Stage::ImageViewer));
    // Same order index: the sibling is not "visited"
    assert!(!flow.visited(Stage::ImageViewer));
    // Everything below index 2 is
    assert!(flow.visited(Stage::Home));
    assert!(flow.visited(Stage::Analyze));
}

#[test]
fn statuses_cover_active_visited_upcoming() {
    let mut flow = NavigationFlow::new();
    flow.navigate(Stage::Analyze);

    assert_eq!(flow.status(Stage::Home), StageStatus::Visited);
    assert_eq!(flow.status(Stage::Analyze), StageStatus::Active);
    assert_eq!(flow.status(Stage::ImageViewer), StageStatus::Upcoming);
    assert_eq!(flow.status(Stage::ResultCard), StageStatus::Upcoming);
}

#[test]
fn navigation_is_a_free_jump_not_a_gate() {
    let mut flow = NavigationFlow::new();
    // Straight to a detail leaf without passing through analyze
    flow.navigate(Stage::ImageViewer);
    assert!(flow.is_active(Stage::ImageViewer));
    // And straight back home
    flow.navigate(Stage::Home);
    assert!(flow.is_active(Stage::Home));
    assert!(!flow.visited(Stage::Analyze));
}
