use std::rc::Rc;

use chrono::{NaiveDate, TimeDelta};
use waypoints::{
    dom::memory::MemoryNode, view::memory::MemoryPlatform, Mode, Point, PointId, PointKind,
    PresenterConfig, SortOrder, TripModel, TripPresenter,
};

fn point(id: u32, day: u32, price: u32) -> Point {
    let date_from = NaiveDate::from_ymd_opt(2024, 6, day)
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .unwrap();

    Point {
        id: PointId::new(id),
        kind: PointKind::Train,
        destination: format!("Station {id}"),
        date_from,
        date_to: date_from + TimeDelta::hours(2),
        base_price: price,
        offers: vec![1, 2],
        is_favorite: false,
    }
}

fn mount(points: Vec<Point>) -> (Rc<MemoryPlatform>, MemoryNode, TripPresenter<MemoryPlatform>) {
    let platform = Rc::new(MemoryPlatform::new());
    let container = MemoryNode::new("trip");
    let trip = TripPresenter::new(
        Rc::clone(&platform),
        container.clone(),
        TripModel::new(points),
        PresenterConfig::default(),
    );
    trip.init().unwrap();

    (platform, container, trip)
}

fn order(trip: &TripPresenter<MemoryPlatform>) -> Vec<u32> {
    trip.points().iter().map(|point| point.id.get()).collect()
}

const ID1: PointId = PointId::new(1);
const ID2: PointId = PointId::new(2);

#[test]
fn sorting_by_date_then_price() {
    let (platform, container, trip) = mount(vec![point(1, 2, 50), point(2, 1, 80)]);

    assert!(platform.select_sort(SortOrder::Day));
    assert_eq!(order(&trip), vec![2, 1]);
    assert_eq!(container.children()[1].child_labels(), vec!["point:2", "point:1"]);

    assert!(platform.select_sort(SortOrder::Price));
    assert_eq!(order(&trip), vec![1, 2]);
    assert_eq!(container.children()[1].child_labels(), vec!["point:1", "point:2"]);

    let first = trip.presenter(ID1).unwrap();
    let second = trip.presenter(ID2).unwrap();
    let built = platform.point_view_count();

    assert!(platform.select_sort(SortOrder::Price));

    assert_eq!(order(&trip), vec![1, 2]);
    assert_eq!(platform.point_view_count(), built);
    assert!(first.same_as(&trip.presenter(ID1).unwrap()));
    assert!(second.same_as(&trip.presenter(ID2).unwrap()));
}

#[test]
fn opening_a_second_editor_collapses_the_first() {
    let (platform, container, trip) = mount(vec![point(1, 2, 50), point(2, 1, 80)]);

    assert!(platform.click_edit(ID1));
    assert_eq!(trip.presenter(ID1).unwrap().mode(), Mode::Editing);

    platform.edit_draft(ID1, |point| point.base_price = 1);
    assert!(platform.click_edit(ID2));

    assert_eq!(trip.presenter(ID1).unwrap().mode(), Mode::Display);
    assert_eq!(trip.presenter(ID2).unwrap().mode(), Mode::Editing);
    assert_eq!(platform.edit_view_for(ID1).unwrap().draft(), point(1, 2, 50));
    assert_eq!(container.children()[1].child_labels(), vec!["edit:2", "point:1"]);
    assert_eq!(platform.key_listener_count(), 1);
}

#[test]
fn escape_closes_without_committing() {
    let (platform, _, trip) = mount(vec![point(1, 2, 50), point(2, 1, 80)]);
    let before = trip.points();
    let views_before = platform.point_view_count();

    platform.click_edit(ID1);
    platform.edit_draft(ID1, |point| point.destination = "Elsewhere".into());
    assert!(platform.press_key("Escape"));

    assert_eq!(trip.presenter(ID1).unwrap().mode(), Mode::Display);
    assert_eq!(trip.points(), before);
    assert_eq!(platform.edit_view_for(ID1).unwrap().draft(), point(1, 2, 50));
    assert_eq!(platform.point_view_for(ID1).unwrap().point(), &point(1, 2, 50));
    // No commit means no re-initialisation
    assert_eq!(platform.point_view_count(), views_before);
    assert_eq!(platform.key_listener_count(), 0);
}

#[test]
fn edits_survive_sorting() {
    let (platform, container, trip) = mount(vec![point(1, 2, 50), point(2, 1, 80)]);

    platform.click_edit(ID2);
    platform.edit_draft(ID2, |point| point.base_price = 10);
    assert!(platform.submit(ID2));

    platform.select_sort(SortOrder::Price);

    assert_eq!(order(&trip), vec![2, 1]);
    assert_eq!(
        container.children()[1].child_labels(),
        vec!["point:2", "point:1"]
    );
    assert_eq!(platform.point_view_for(ID2).unwrap().point().base_price, 10);
}

#[test]
fn registry_matches_points_after_every_render() {
    let points = vec![point(3, 3, 30), point(1, 1, 10), point(2, 2, 20)];
    let (platform, _, trip) = mount(points);

    let expected = vec![PointId::new(1), PointId::new(2), PointId::new(3)];
    assert_eq!(trip.presenter_ids(), expected);

    for sort in [SortOrder::Price, SortOrder::Time, SortOrder::Day] {
        platform.select_sort(sort);
        assert_eq!(trip.presenter_ids(), expected);
    }
}

#[test]
fn empty_trip_has_no_controls() {
    let (platform, container, trip) = mount(Vec::new());

    assert_eq!(container.child_labels(), vec!["empty"]);
    assert!(!platform.select_sort(SortOrder::Price));
    assert_eq!(trip.current_sort(), SortOrder::Day);
}
