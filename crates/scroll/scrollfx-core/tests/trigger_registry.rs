use scrollfx_core::boundary::{Anchor, Boundary, Distance, Edge};
use scrollfx_core::geometry::horizontal_overflow;
use scrollfx_core::outputs::{CoreEvent, TimelineCommand};
use scrollfx_core::ticker::TickerState;
use scrollfx_core::{
    Action, Crossing, Drive, Host, MemoryDom, Mode, MotionProfile, NodeId, Outputs, PageSpec,
    Position, Rect, SlideBinding, TickerSet, TimelineBuilder, TimelineId, TimelineSet,
    TriggerActions, TriggerRegistry, TriggerSpec, Viewport,
};
use scrollfx_test_fixtures::pages;

struct Rig {
    dom: MemoryDom,
    timelines: TimelineSet,
    tickers: TickerSet,
    registry: TriggerRegistry,
    out: Outputs,
}

impl Rig {
    fn new() -> Self {
        let page: PageSpec = pages::load("regions").expect("regions page");
        Self {
            dom: MemoryDom::new(&page),
            timelines: TimelineSet::new(),
            tickers: TickerSet::new(),
            registry: TriggerRegistry::new(1.0),
            out: Outputs::default(),
        }
    }

    fn node(&self, selector: &str) -> NodeId {
        self.dom.query(None, selector).expect(selector)
    }

    fn viewport(&self) -> Viewport {
        self.dom.viewport()
    }

    fn scrubbed_timeline(&mut self, node: NodeId) -> TimelineId {
        let timeline = TimelineBuilder::new()
            .scrubbed(None)
            .add(vec![node], &MotionProfile::drift(-10.0), Position::At(0.0))
            .build();
        self.timelines.create(timeline, &mut self.out)
    }

    fn eval(&mut self, scroll: f64) {
        let viewport = self.viewport();
        let mut drive = Drive {
            timelines: &mut self.timelines,
            tickers: &mut self.tickers,
            out: &mut self.out,
        };
        self.registry.evaluate(scroll, viewport, &mut drive);
    }

    fn crossings(&self) -> Vec<Crossing> {
        self.out
            .events
            .iter()
            .filter_map(|e| match e {
                CoreEvent::Crossing { crossing, .. } => Some(*crossing),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn scrub_position_equals_clamped_progress_and_reverses_exactly() {
    let mut rig = Rig::new();
    let node = rig.node(".scrub-region");
    let tl = rig.scrubbed_timeline(node);
    let spec = TriggerSpec::parse(node, "top bottom", "bottom top", Mode::Scrub)
        .unwrap()
        .timeline(tl);
    let id = rig.registry.register(&rig.dom, spec);
    assert_eq!(rig.registry.range(id), Some((1200.0, 2400.0)));

    let scrolls: Vec<f64> = (0..=120).map(|i| i as f64 * 25.0).collect();
    let mut forward = Vec::new();
    for &s in &scrolls {
        rig.eval(s);
        let applied = rig.timelines.position(tl).unwrap();
        let expected = ((s - 1200.0) / 1200.0).clamp(0.0, 1.0);
        assert_eq!(applied, expected, "scroll {s}");
        forward.push(applied.to_bits());
    }
    for (i, &s) in scrolls.iter().enumerate().rev() {
        rig.eval(s);
        assert_eq!(rig.timelines.position(tl).unwrap().to_bits(), forward[i]);
    }
}

#[test]
fn one_shot_plays_exactly_once() {
    let mut rig = Rig::new();
    let node = rig.node(".one-shot");
    let tl = rig
        .timelines
        .create(scrollfx_core::build(vec![node], &MotionProfile::fade_in()), &mut rig.out);
    let spec = TriggerSpec::new(
        node,
        Boundary::top_at(0.8),
        Boundary::parse("bottom top").unwrap(),
        Mode::OneShot,
    )
    .timeline(tl);
    let id = rig.registry.register(&rig.dom, spec);
    assert_eq!(rig.registry.range(id), Some((560.0, 1500.0)));

    for s in [0.0, 600.0, 2000.0, 0.0, 600.0, 2000.0, 700.0, 0.0] {
        rig.eval(s);
    }
    assert!(rig.registry.is_fired(id));
    assert_eq!(rig.timelines.play_count(tl), 1);
    let plays = rig
        .out
        .commands
        .iter()
        .filter(|c| matches!(c, TimelineCommand::Play { id } if *id == tl))
        .count();
    assert_eq!(plays, 1);
}

#[test]
fn one_shot_fires_on_backward_entry() {
    let mut rig = Rig::new();
    let node = rig.node(".one-shot");
    let tl = rig
        .timelines
        .create(scrollfx_core::build(vec![node], &MotionProfile::fade_in()), &mut rig.out);
    let spec = TriggerSpec::parse(node, "top 80%", "bottom top", Mode::OneShot)
        .unwrap()
        .timeline(tl);
    let id = rig.registry.register(&rig.dom, spec);
    // page opened below the region
    rig.eval(4000.0);
    assert!(rig.registry.is_fired(id), "jump across the range counts as activation");
    assert_eq!(rig.timelines.play_count(tl), 1);
}

#[test]
fn jump_across_range_emits_both_edges() {
    let mut rig = Rig::new();
    let node = rig.node(".scrub-region");
    let spec = TriggerSpec::parse(node, "top bottom", "bottom top", Mode::Scrub).unwrap();
    rig.registry.register(&rig.dom, spec);

    rig.eval(5000.0);
    assert_eq!(rig.crossings(), vec![Crossing::Enter, Crossing::Leave]);
    rig.out.clear();
    rig.eval(0.0);
    assert_eq!(rig.crossings(), vec![Crossing::EnterBack, Crossing::LeaveBack]);
    rig.out.clear();
    rig.eval(10.0);
    assert!(rig.crossings().is_empty());
}

#[test]
fn crossings_fire_once_per_direction() {
    let mut rig = Rig::new();
    let node = rig.node(".scrub-region");
    let spec = TriggerSpec::parse(node, "top bottom", "bottom top", Mode::Scrub).unwrap();
    rig.registry.register(&rig.dom, spec);
    for s in [1300.0, 1400.0, 1500.0, 2500.0, 2600.0, 2300.0, 2200.0, 1000.0] {
        rig.eval(s);
    }
    assert_eq!(
        rig.crossings(),
        vec![
            Crossing::Enter,
            Crossing::Leave,
            Crossing::EnterBack,
            Crossing::LeaveBack
        ]
    );
}

#[test]
fn pinned_slide_index_is_monotone_with_one_active_slide() {
    let mut rig = Rig::new();
    let pinned = rig.node(".pinned");
    let slides_parent = rig.node(".slides");
    let slides = rig.dom.children(slides_parent);
    assert_eq!(slides.len(), 4);
    let overflow = horizontal_overflow(rig.dom.scroll_width(pinned), rig.viewport().width);
    assert_eq!(overflow, 1600.0);

    let tl = rig.scrubbed_timeline(pinned);
    let spec = TriggerSpec::new(
        pinned,
        Boundary::new(Edge::Top, Anchor::Pixels(61.0)),
        Boundary::after(Distance::Pixels(overflow)),
        Mode::Pinned,
    )
    .timeline(tl)
    .slides(SlideBinding {
        slides: slides.clone(),
        ball_count: 4,
    });
    let id = rig.registry.register(&rig.dom, spec);
    assert_eq!(rig.registry.range(id), Some((2939.0, 4539.0)));

    let mut last = 0;
    let mut s = 2939.0;
    while s <= 4539.0 {
        rig.eval(s);
        rig.dom.apply(&rig.out);
        rig.out.clear();
        let active: Vec<usize> = slides
            .iter()
            .enumerate()
            .filter(|(_, n)| rig.dom.has_class(**n, "--active"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active.len(), 1, "scroll {s}");
        assert!(active[0] >= last, "scroll {s}");
        assert_eq!(Some(active[0]), rig.registry.active_slide(id));
        last = active[0];
        s += 40.0;
    }
    assert_eq!(last, 3);
}

#[test]
fn repeated_slide_index_rewrites_marker() {
    let mut rig = Rig::new();
    let pinned = rig.node(".pinned");
    let slides = rig.dom.children(rig.node(".slides"));
    let spec = TriggerSpec::new(
        pinned,
        Boundary::new(Edge::Top, Anchor::Pixels(61.0)),
        Boundary::after(Distance::Pixels(1600.0)),
        Mode::Pinned,
    )
    .slides(SlideBinding {
        slides: slides.clone(),
        ball_count: 4,
    });
    rig.registry.register(&rig.dom, spec);
    rig.eval(3000.0);
    rig.out.clear();
    rig.eval(3001.0);
    // every slide cleared, then the same one marked again
    assert_eq!(rig.out.writes.len(), slides.len() + 1);
    let slide_events = rig
        .out
        .events
        .iter()
        .filter(|e| matches!(e, CoreEvent::SlideActivated { .. }))
        .count();
    assert_eq!(slide_events, 0);
}

#[test]
fn refresh_re_resolves_after_layout_change() {
    let mut rig = Rig::new();
    let node = rig.node(".scrub-region");
    let pinned = rig.node(".pinned");
    let a = rig.registry.register(
        &rig.dom,
        TriggerSpec::parse(node, "top bottom", "bottom top", Mode::Scrub).unwrap(),
    );
    let b = rig.registry.register(
        &rig.dom,
        TriggerSpec::parse(pinned, "top top", "+=150%", Mode::Pinned).unwrap(),
    );
    assert_eq!(rig.registry.range(b), Some((3000.0, 4200.0)));

    rig.dom.set_rect(node, Rect::new(0.0, 3000.0, 1000.0, 400.0));
    rig.registry.refresh(&rig.dom, &mut rig.out);
    assert_eq!(rig.registry.range(a), Some((2200.0, 3400.0)));
    let pins: Vec<_> = rig
        .out
        .events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::PinRange { trigger, start, end, .. } => Some((*trigger, *start, *end)),
            _ => None,
        })
        .collect();
    assert_eq!(pins, vec![(b, 3000.0, 4200.0)]);
}

#[test]
fn unlaid_region_defers_until_geometry_exists() {
    let mut rig = Rig::new();
    let node = rig.node(".unlaid");
    let id = rig.registry.register(
        &rig.dom,
        TriggerSpec::parse(node, "top bottom", "bottom top", Mode::Scrub).unwrap(),
    );
    assert_eq!(rig.registry.range(id), None);
    rig.eval(1000.0);
    assert!(rig.out.events.is_empty());

    rig.dom.set_rect(node, Rect::new(0.0, 1000.0, 1000.0, 200.0));
    rig.registry.refresh(&rig.dom, &mut rig.out);
    assert_eq!(rig.registry.range(id), Some((200.0, 1200.0)));
    rig.eval(1000.0);
    assert_eq!(rig.crossings(), vec![Crossing::Enter]);
}

#[test]
fn progress_mark_fires_once() {
    let mut rig = Rig::new();
    let node = rig.node(".scrub-region");
    let label = rig.node(".slide");
    let spec = TriggerSpec::parse(node, "top bottom", "bottom top", Mode::Scrub)
        .unwrap()
        .mark(
            0.5,
            vec![Action::Ready {
                region: None,
                node: label,
                class: "--ready".into(),
            }],
        );
    rig.registry.register(&rig.dom, spec);
    for s in [1500.0, 1800.0, 1900.0, 1300.0, 2000.0] {
        rig.eval(s);
    }
    let ready = rig
        .out
        .events
        .iter()
        .filter(|e| matches!(e, CoreEvent::RegionReady { node, .. } if *node == label))
        .count();
    assert_eq!(ready, 1);
}

#[test]
fn ticker_follows_region_visibility() {
    let mut rig = Rig::new();
    let wrapper = rig.node(".ticker");
    let handle = rig
        .tickers
        .create(&mut rig.dom, &mut rig.timelines, &mut rig.out, 50.0, Some(wrapper));
    let ticker = handle.id().expect("live ticker");
    let node = rig.node(".scrub-region");
    let spec = TriggerSpec::parse(node, "top bottom", "bottom top", Mode::Scrub)
        .unwrap()
        .actions(TriggerActions::follow_ticker(ticker));
    rig.registry.register(&rig.dom, spec);

    rig.eval(1500.0);
    assert_eq!(rig.tickers.state(ticker), Some(TickerState::Playing));
    rig.eval(3000.0);
    assert_eq!(rig.tickers.state(ticker), Some(TickerState::Paused));
    rig.eval(2000.0);
    assert_eq!(rig.tickers.state(ticker), Some(TickerState::Playing));
    rig.eval(0.0);
    assert_eq!(rig.tickers.state(ticker), Some(TickerState::Paused));
}
