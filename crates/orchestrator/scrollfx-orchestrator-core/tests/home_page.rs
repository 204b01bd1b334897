use scrollfx_core::{
    Config, CoreEvent, Host, MemoryDom, NodeId, PageSpec, ScrollCommand, StyleWrite, TickerState,
};
use scrollfx_orchestrator::{Frame, Orchestrator, READY};
use scrollfx_test_fixtures::pages;

fn boot() -> (MemoryDom, Orchestrator, Frame) {
    let page: PageSpec = pages::load("home").expect("home page fixture");
    let mut dom = MemoryDom::new(&page);
    let (orch, frame) =
        Orchestrator::initialize(&mut dom, Config::default(), 0.0).expect("initialize home");
    dom.apply(&frame.outputs);
    (dom, orch, frame)
}

fn adds(frame: &Frame, node: NodeId, class: &str) -> bool {
    frame.outputs.writes.iter().any(|w| {
        matches!(w, StyleWrite::AddClass { node: n, class: c } if *n == node && c == class)
    })
}

fn touches(frame: &Frame, node: NodeId) -> bool {
    frame.outputs.writes.iter().any(|w| match w {
        StyleWrite::AddClass { node: n, .. }
        | StyleWrite::RemoveClass { node: n, .. }
        | StyleWrite::SetProperty { node: n, .. } => *n == node,
    })
}

#[test]
fn startup_configures_scroller_and_holds_it_for_the_preloader() {
    let (_dom, _orch, frame) = boot();
    match frame.outputs.scroll.first() {
        Some(ScrollCommand::Configure(settings)) => {
            assert!(settings.smooth);
            assert_eq!(settings.lerp, 0.05);
            assert_eq!(settings.multiplier, 0.9);
        }
        other => panic!("expected Configure first, got {other:?}"),
    }
    assert!(frame.outputs.scroll.contains(&ScrollCommand::Stop));
    assert!(!frame.outputs.scroll.contains(&ScrollCommand::Start));
    assert!(frame.outputs.scroll.contains(&ScrollCommand::Update));
}

#[test]
fn regions_missing_children_are_skipped_without_stopping_the_page() {
    let (_dom, orch, frame) = boot();
    let skipped: Vec<&str> = frame
        .outputs
        .events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::RegionSkipped { region, .. } => Some(region.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(skipped, vec!["content-sect-four", "services"]);

    for name in [
        "preloader",
        "hero-title",
        "block-with-balls",
        "animated-title",
        "our-services",
        "projects-cards",
        "block-with-balls-and-info",
        "title-and-text",
        "content-sect-one",
        "content-sect-two",
        "content-sect-three",
        "content-sect-four",
        "team-member",
        "services",
        "team-members",
        "navigation",
        "text-modal-list",
        "contact",
    ] {
        assert!(orch.region(name).is_some(), "{name} should be wired");
    }
    assert_eq!(orch.tickers().len(), 3);
}

#[test]
fn preloader_completion_marks_ready_and_resumes_scrolling() {
    let (dom, mut orch, _) = boot();
    let preloader = dom.query(None, ".preloader").unwrap();
    let tl = orch.region("preloader").unwrap().timelines[0];

    let frame = orch.on_timeline_complete(&dom, tl);
    assert!(adds(&frame, preloader, READY));
    assert_eq!(frame.outputs.scroll, vec![ScrollCommand::Start]);
    assert!(frame.outputs.events.iter().any(|e| matches!(
        e,
        CoreEvent::RegionReady { node, .. } if *node == preloader
    )));
}

#[test]
fn header_compacts_past_the_container_offset_and_toggles_once() {
    let (dom, mut orch, frame) = boot();
    let header = dom.query(None, "#header").unwrap();
    assert!(!touches(&frame, header));

    let frame = orch.on_scroll(&dom, 150.0);
    assert!(adds(&frame, header, "--compact"));
    let frame = orch.on_scroll(&dom, 160.0);
    assert!(!touches(&frame, header));
    let frame = orch.on_scroll(&dom, 40.0);
    assert!(frame.outputs.writes.contains(&StyleWrite::RemoveClass {
        node: header,
        class: "--compact".to_string(),
    }));
}

#[test]
fn ball_ticker_runs_only_while_its_block_is_visible() {
    let (dom, mut orch, frame) = boot();
    let ticker = orch.region("block-with-balls").unwrap().tickers[0];
    // The block spans scroll offsets -100..1000, so it is visible at load.
    assert_eq!(orch.tickers().state(ticker), Some(TickerState::Playing));
    assert!(frame.outputs.events.contains(&CoreEvent::TickerChanged {
        ticker,
        playing: true
    }));

    let frame = orch.on_scroll(&dom, 1200.0);
    assert_eq!(orch.tickers().state(ticker), Some(TickerState::Paused));
    assert!(frame.outputs.events.contains(&CoreEvent::TickerChanged {
        ticker,
        playing: false
    }));
}

#[test]
fn pinned_balls_drive_slides_and_the_title_ticker() {
    let (mut dom, mut orch, frame) = boot();
    let trigger = orch.balls_trigger().unwrap();
    // content top 3300 pinned 61px below the viewport top, for 2880 - 1280 px
    assert_eq!(orch.triggers().range(trigger), Some((3239.0, 4839.0)));
    assert!(frame.outputs.events.iter().any(|e| matches!(
        e,
        CoreEvent::PinRange { trigger: t, start, end, .. }
            if *t == trigger && *start == 3239.0 && *end == 4839.0
    )));

    let frame = orch.on_scroll(&dom, 4039.0);
    dom.apply(&frame.outputs);
    assert_eq!(orch.triggers().active_slide(trigger), Some(1));
    let slides = dom.query(None, ".block-with-balls-and-info__slides").unwrap();
    let active: Vec<usize> = dom
        .children(slides)
        .iter()
        .enumerate()
        .filter(|(_, n)| dom.has_class(**n, "--active"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(active, vec![1]);

    let ticker = orch.region("title-and-text").unwrap().tickers[0];
    assert_eq!(orch.tickers().state(ticker), Some(TickerState::Playing));
}

#[test]
fn content_two_labels_appear_on_entry_halfway_and_exit() {
    let (dom, mut orch, _) = boot();
    let labels: Vec<NodeId> = (0..3)
        .map(|i| dom.query(None, &format!(".js-img-label-{i}")).unwrap())
        .collect();
    // pinned from 5200 for 1.5 viewports (1200px)
    let enter = orch.on_scroll(&dom, 5300.0);
    assert!(adds(&enter, labels[0], READY));
    assert!(!adds(&enter, labels[1], READY));

    let half = orch.on_scroll(&dom, 5800.0);
    assert!(adds(&half, labels[1], READY));
    let again = orch.on_scroll(&dom, 5900.0);
    assert!(!adds(&again, labels[1], READY));

    let leave = orch.on_scroll(&dom, 6500.0);
    assert!(adds(&leave, labels[2], READY));
}

#[test]
fn spotlight_eases_towards_the_pointer_each_frame() {
    let (mut dom, mut orch, _) = boot();
    let mask = dom.query(None, ".content-sect-one__img-mask").unwrap();
    assert_eq!(orch.spotlight_position(), Some((200.0, 100.0)));

    // image client rect starts at (100, 4700)
    orch.on_spotlight_move(&dom, 400.0, 4750.0);
    let frame = orch.on_frame(&mut dom, 16.0);
    dom.apply(&frame.outputs);
    assert_eq!(orch.spotlight_position(), Some((210.0, 95.0)));
    assert_eq!(dom.property(mask, "--mouse-x"), Some("210px"));
    assert_eq!(dom.property(mask, "--mouse-y"), Some("95px"));

    orch.on_spotlight_leave();
    orch.on_frame(&mut dom, 32.0);
    let (x, y) = orch.spotlight_position().unwrap();
    assert!(x < 210.0 && y > 95.0);
}

#[test]
fn pointer_follower_tweens_dot_and_ring() {
    let (_dom, mut orch, _) = boot();
    let frame = orch.on_pointer_move(10.0, 20.0);
    assert_eq!(frame.outputs.commands.len(), 2);
}
