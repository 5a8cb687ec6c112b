use crate::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use virtual_list::{Align, HostError, Range, Spacer, VirtualListOptions};

#[derive(Clone, Debug, PartialEq)]
struct Message {
    id: u64,
    lines: u32,
}

type Feed = Rc<RefCell<Vec<Message>>>;

fn feed(ids: impl IntoIterator<Item = u64>, lines: impl Fn(u64) -> u32) -> Feed {
    Rc::new(RefCell::new(
        ids.into_iter()
            .map(|id| Message {
                id,
                lines: lines(id),
            })
            .collect(),
    ))
}

fn driver(feed: &Feed, viewport_height: f64) -> Driver<Message> {
    let (count, render, keys) = (Rc::clone(feed), Rc::clone(feed), Rc::clone(feed));
    let options = VirtualListOptions::<RetainedContainer<Message>>::new(
        move || count.borrow().len(),
        move |i| {
            render
                .borrow()
                .get(i)
                .cloned()
                .map(Row::new)
                .ok_or_else(|| HostError::new("no such message"))
        },
    )
    .with_get_item_key(move |i| {
        keys.borrow()
            .get(i)
            .map(|m| m.id.to_string())
            .unwrap_or_default()
    })
    .with_estimated_item_height(20.0)
    .with_overscan(2)
    .with_container(RetainedContainer::new(|m: &Message| {
        f64::from(m.lines) * 20.0
    }));
    Driver::new(options, viewport_height).unwrap()
}

fn row_keys(d: &Driver<Message>) -> Vec<String> {
    d.container().rows().map(|r| r.key().to_string()).collect()
}

#[test]
fn initial_window_is_mounted_between_spacers() {
    let feed = feed(0..100, |_| 1);
    let mut d = driver(&feed, 100.0);
    assert!(d.viewport().is_listening());
    d.tick();

    assert_eq!(d.list().range(), Range::new(0, 8));
    assert_eq!(
        row_keys(&d),
        (0..8).map(|i: u64| i.to_string()).collect::<Vec<_>>()
    );
    assert_eq!(d.container().spacer_height(Spacer::Top).get(), 0.0);
    assert_eq!(d.container().spacer_height(Spacer::Bottom).get(), 1840.0);
    assert_eq!(d.container().content_height(), 2000.0);
    assert!(!d.list().has_armed_frames());
}

#[test]
fn scrolling_moves_the_window() {
    let feed = feed(0..100, |_| 1);
    let mut d = driver(&feed, 100.0);
    d.tick();

    assert_eq!(d.on_scroll(1000.0), 1000.0);
    assert_eq!(d.list().range(), Range::new(0, 8));
    d.tick();
    assert_eq!(d.list().range(), Range::new(48, 58));
    assert_eq!(row_keys(&d).first().map(String::as_str), Some("48"));
    assert_eq!(d.container().spacer_height(Spacer::Top).get(), 960.0);

    assert_eq!(d.on_scroll(1e9), 1900.0);
    assert_eq!(d.on_scroll(-50.0), 0.0);
    assert_eq!(d.on_scroll(f64::NAN), 0.0);
}

#[test]
fn measured_rows_match_spacers() {
    let feed = feed(0..200, |id| 1 + (id % 3) as u32);
    let mut d = driver(&feed, 200.0);
    d.tick();

    let range = d.list().range();
    for i in range.start..range.end {
        assert!(d.list().is_measured(i));
    }
    assert_eq!(d.container().content_height(), d.list().get_total_height());

    d.on_scroll(1500.0);
    d.tick();
    assert_eq!(d.container().content_height(), d.list().get_total_height());
}

#[test]
fn viewport_resize_grows_the_window() {
    let feed = feed(0..100, |_| 1);
    let mut d = driver(&feed, 100.0);
    d.tick();

    d.on_viewport_height(300.0);
    d.tick();
    assert_eq!(d.list().range(), Range::new(0, 18));
    assert_eq!(d.container().len(), 18);
}

#[test]
fn anchor_preserves_scroll_across_prepend() {
    let feed = feed(1000..1100, |_| 1);
    let mut d = driver(&feed, 100.0);
    d.tick();
    d.on_scroll(1010.0);
    d.tick();

    let anchor = d.capture_anchor().unwrap();
    assert_eq!(anchor.key, "1050");
    assert_eq!(anchor.offset_in_viewport, 10.0);

    // Prepend 10 older messages: old items shift by +10 indexes.
    feed.borrow_mut().splice(
        0..0,
        (2000..2010).map(|id| Message { id, lines: 1 }),
    );
    let map: HashMap<String, usize> = feed
        .borrow()
        .iter()
        .enumerate()
        .map(|(i, m)| (m.id.to_string(), i))
        .collect();

    assert_eq!(d.apply_anchor(&anchor, |k| map.get(k).copied()), Some(1210.0));
    assert_eq!(d.scroll_offset(), 1210.0);
    d.tick();
    assert!(d.list().range().contains(60));
    assert!(row_keys(&d).contains(&"1050".to_string()));

    let gone = ScrollAnchor {
        key: "missing".to_string(),
        offset_in_viewport: 0.0,
    };
    assert_eq!(d.apply_anchor(&gone, |k| map.get(k).copied()), None);
}

#[test]
fn mutated_row_is_remeasured() {
    let feed = feed(0..50, |_| 1);
    let mut d = driver(&feed, 100.0);
    d.tick();
    let before = d.list().get_total_height();

    let row = d
        .container()
        .rows()
        .find(|r| &*r.key() == "3")
        .cloned()
        .unwrap();
    row.update(|m| m.lines = 4);
    d.notify_item_mutated(3);
    d.tick();

    assert_eq!(d.list().get_height_for_index(3), 80.0);
    assert_eq!(d.list().get_total_height(), before + 60.0);
    assert_eq!(d.container().content_height(), d.list().get_total_height());
}

#[test]
fn scroll_to_index_moves_the_viewport() {
    let feed = feed(0..100, |_| 1);
    let mut d = driver(&feed, 100.0);
    d.tick();

    assert_eq!(d.scroll_to_index(30, Align::Start), Some(600.0));
    assert_eq!(d.scroll_offset(), 600.0);
    d.tick();
    assert!(d.list().range().contains(30));
    assert_eq!(d.scroll_to_index(99, Align::End), Some(1900.0));
}

#[test]
fn destroy_detaches_everything() {
    let feed = feed(0..100, |_| 1);
    let mut d = driver(&feed, 100.0);
    d.tick();
    d.on_scroll(500.0);

    d.destroy();
    assert!(d.container().is_empty());
    assert!(!d.viewport().is_listening());
    assert_eq!(d.tick(), 0);
}

#[test]
fn rows_compare_by_identity() {
    let a = Row::new(Message { id: 1, lines: 1 });
    let b = Row::new(Message { id: 1, lines: 1 });
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    assert_eq!(&*a.key(), "");
}

#[test]
fn tick_leaves_nothing_armed() {
    let feed = feed(0..300, |id| 1 + (id % 4) as u32);
    let mut d = driver(&feed, 200.0);
    d.tick();

    // Scroll, resize and a jump queued together before a single tick.
    d.on_scroll(2000.0);
    d.on_viewport_height(400.0);
    d.scroll_to_index(150, Align::Center);
    assert!(d.tick() > 0);

    assert!(!d.list().has_armed_frames());
    assert_eq!(d.list().frames().pending_len(), 0);
    assert!(d.list().range().contains(150));
    assert_eq!(d.tick(), 0);
}
