use scrollfx_core::outputs::CoreEvent;
use scrollfx_core::ticker::{TickerState, TICKER_ROW};
use scrollfx_core::timeline::PlaybackState;
use scrollfx_core::{Host, MemoryDom, Outputs, PageSpec, Rect, TickerSet, TimelineSet};
use scrollfx_test_fixtures::pages;

fn dom() -> MemoryDom {
    let page: PageSpec = pages::load("regions").expect("regions page");
    MemoryDom::new(&page)
}

#[test]
fn loop_duration_is_clone_width_over_speed() {
    let mut dom = dom();
    let mut timelines = TimelineSet::new();
    let mut tickers = TickerSet::new();
    let mut out = Outputs::default();
    let wrapper = dom.query(None, ".ticker");

    let handle = tickers.create(&mut dom, &mut timelines, &mut out, 50.0, wrapper);
    let id = handle.id().unwrap();
    assert_eq!(tickers.loop_duration(id), Some(10.0));
    assert_eq!(tickers.state(id), Some(TickerState::Paused));
    assert_eq!(dom.query_all(wrapper, TICKER_ROW).len(), 2);

    let first = tickers.timeline(id).unwrap();
    assert_eq!(timelines.state(first), Some(PlaybackState::Paused));

    // content reflowed wider
    let clone = tickers.clone_node(id).unwrap();
    dom.set_rect(clone, Rect::new(500.0, 900.0, 1000.0, 40.0));
    tickers.rebuild(&dom, &mut timelines, &mut out);
    assert_eq!(tickers.loop_duration(id), Some(20.0));
    assert_eq!(timelines.state(first), None, "old loop discarded");
    assert_eq!(timelines.len(), 1);
    assert_ne!(tickers.timeline(id), Some(first));
    assert_eq!(dom.query_all(wrapper, TICKER_ROW).len(), 2, "rebuild never clones again");
}

#[test]
fn missing_wrapper_or_row_gives_inert_handle() {
    let mut dom = dom();
    let mut timelines = TimelineSet::new();
    let mut tickers = TickerSet::new();
    let mut out = Outputs::default();

    let none = tickers.create(&mut dom, &mut timelines, &mut out, 60.0, None);
    assert!(none.is_inert());
    let empty = dom.query(None, ".ticker-empty");
    let rowless = tickers.create(&mut dom, &mut timelines, &mut out, 60.0, empty);
    assert!(rowless.is_inert());
    assert!(tickers.is_empty());
    assert!(out.is_empty());
}

#[test]
fn zero_width_defers_loop_until_rebuild() {
    let mut dom = dom();
    let mut timelines = TimelineSet::new();
    let mut tickers = TickerSet::new();
    let mut out = Outputs::default();
    let wrapper = dom.query(None, ".ticker");
    let row = dom.query(wrapper, TICKER_ROW).unwrap();
    dom.set_rect(row, Rect::default());

    let id = tickers
        .create(&mut dom, &mut timelines, &mut out, 50.0, wrapper)
        .id()
        .unwrap();
    assert_eq!(tickers.loop_duration(id), None);
    assert!(tickers.play(id, &mut timelines, &mut out));

    let clone = tickers.clone_node(id).unwrap();
    dom.set_rect(clone, Rect::new(0.0, 900.0, 400.0, 40.0));
    tickers.rebuild(&dom, &mut timelines, &mut out);
    assert_eq!(tickers.loop_duration(id), Some(8.0));
    let tl = tickers.timeline(id).unwrap();
    assert_eq!(timelines.state(tl), Some(PlaybackState::Playing));
}

#[test]
fn play_and_pause_report_only_changes() {
    let mut dom = dom();
    let mut timelines = TimelineSet::new();
    let mut tickers = TickerSet::new();
    let mut out = Outputs::default();
    let wrapper = dom.query(None, ".ticker");
    let id = tickers
        .create(&mut dom, &mut timelines, &mut out, 50.0, wrapper)
        .id()
        .unwrap();
    out.clear();

    assert!(tickers.play(id, &mut timelines, &mut out));
    assert!(!tickers.play(id, &mut timelines, &mut out));
    assert!(tickers.pause(id, &mut timelines, &mut out));
    assert!(!tickers.pause(id, &mut timelines, &mut out));
    let changes: Vec<bool> = out
        .events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::TickerChanged { playing, .. } => Some(*playing),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![true, false]);
}
