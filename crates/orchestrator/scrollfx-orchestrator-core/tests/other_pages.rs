use scrollfx_core::{
    Config, CoreEvent, Host, MemoryDom, PageSpec, ScrollCommand, StyleWrite, TimelineCommand,
};
use scrollfx_orchestrator::{Orchestrator, READY};
use scrollfx_test_fixtures::pages;

fn boot(name: &str) -> (MemoryDom, Orchestrator, scrollfx_orchestrator::Frame) {
    let page: PageSpec = pages::load(name).expect("page fixture");
    let mut dom = MemoryDom::new(&page);
    let (orch, frame) = Orchestrator::initialize(&mut dom, Config::default(), 0.0).expect("initialize");
    dom.apply(&frame.outputs);
    (dom, orch, frame)
}

#[test]
fn single_posts_scroll_natively_with_a_lower_header_threshold() {
    let (dom, mut orch, frame) = boot("single");
    assert!(!orch.is_smooth());
    match frame.outputs.scroll.first() {
        Some(ScrollCommand::Configure(settings)) => assert!(!settings.smooth),
        other => panic!("expected Configure first, got {other:?}"),
    }
    let header = dom.query(None, "#header").unwrap();
    let compact = StyleWrite::AddClass {
        node: header,
        class: "--compact".to_string(),
    };
    assert!(orch.on_scroll(&dom, 31.0).outputs.writes.contains(&compact));
    assert!(orch
        .on_scroll(&dom, 30.0)
        .outputs
        .writes
        .contains(&StyleWrite::RemoveClass {
            node: header,
            class: "--compact".to_string(),
        }));
}

#[test]
fn subtitle_title_reveals_at_eighty_percent() {
    let (dom, mut orch, _) = boot("single");
    // top 1200 meets 80% of an 800px viewport at 560
    let early = orch.on_scroll(&dom, 550.0);
    assert!(!early
        .outputs
        .commands
        .iter()
        .any(|c| matches!(c, TimelineCommand::Play { .. })));
    let reached = orch.on_scroll(&dom, 560.0);
    assert!(reached
        .outputs
        .commands
        .iter()
        .any(|c| matches!(c, TimelineCommand::Play { .. })));
}

#[test]
fn blog_pages_mark_ready_and_run_the_intro_sequence() {
    let (dom, orch, frame) = boot("blog");
    for selector in [".page-services", ".app-blog"] {
        let node = dom.query(None, selector).unwrap();
        assert!(dom.has_class(node, READY), "{selector} should be ready");
    }

    let record = orch.region("client-work").unwrap();
    let intro = record
        .timelines
        .iter()
        .filter_map(|id| orch.timelines().get(*id))
        .find(|tl| tl.tweens.len() == 3)
        .expect("client work intro");
    assert_eq!(intro.delay, 1.5);
    assert!(!intro.paused);
    assert_eq!(intro.tweens[0].at, 0.0);
    // links overlap the text rows by 0.9s, cards follow 0.1s after
    assert!((intro.tweens[1].at - 0.1).abs() < 1e-9);
    assert!((intro.tweens[2].at - 1.1).abs() < 1e-9);

    for name in ["audio-modal", "contact-secondary"] {
        assert_eq!(orch.region(name).unwrap().triggers.len(), 1, "{name}");
    }
    assert!(!frame
        .outputs
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::RegionSkipped { .. })));
}

#[test]
fn blog_pages_have_no_pointer_or_contact_anchor() {
    let (dom, mut orch, _) = boot("blog");
    assert!(orch.on_pointer_move(10.0, 10.0).outputs.commands.is_empty());
    assert!(orch.on_anchor_click(&dom, "#contact").is_none());
}

#[test]
fn horizontal_fades_play_as_each_element_enters() {
    let (dom, mut orch, _) = boot("blog");
    let audio = orch.region("audio-modal").unwrap();
    let trigger = audio.triggers[0];
    // top 1600 meets the viewport bottom (700) at 900
    assert_eq!(orch.triggers().range(trigger).map(|r| r.0), Some(900.0));
    assert!(!orch.triggers().is_fired(trigger));
    orch.on_scroll(&dom, 950.0);
    assert!(orch.triggers().is_fired(trigger));
}

#[test]
fn bare_pages_wire_nothing_and_only_refresh() {
    let (_dom, orch, frame) = boot("bare");
    assert_eq!(orch.regions().count(), 0);
    assert!(orch.triggers().is_empty());
    assert!(orch.tickers().is_empty());
    assert!(orch.timelines().is_empty());
    assert_eq!(frame.outputs.events, vec![CoreEvent::RefreshRequested]);
    assert!(frame.outputs.writes.is_empty());
    assert_eq!(frame.outputs.scroll.len(), 2);
    assert_eq!(frame.outputs.scroll[1], ScrollCommand::Update);
}
