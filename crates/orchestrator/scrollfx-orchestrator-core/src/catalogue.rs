//! Page regions: which selectors get which motion, and when.
//!
//! Each `wire_*` method is independent. A region whose root is absent is not
//! an error; a region missing a child it needs is reported with
//! `CoreEvent::RegionSkipped` and the rest of the page is still wired.

use scrollfx_core::geometry::{horizontal_overflow, measure_scroll_width, measure_width};
use scrollfx_core::profile::{centering_offsets, spread_offsets};
use scrollfx_core::responsive::{append_fillers, unit_width};
use scrollfx_core::timeline::{Property, Timeline};
use scrollfx_core::{
    filler_count, parallax_shift, Action, Anchor, Boundary, Distance, Edge, Host, Mode,
    MotionProfile, NodeId, Outputs, Position, RegionAttrs, RegionId, ScrollFxError, SlideBinding,
    TickerHandle, TickerId, TimelineBuilder, TimelineId, TriggerActions, TriggerId, TriggerSpec,
};

use crate::tasks::{FollowUp, Task};
use crate::{Orchestrator, RegionRecord, READY};

pub const POINTER_DOT: &str = ".sjg_pointer";
pub const POINTER_RING: &str = ".sjg_button";

pub const HERO: &str = ".hero-title";
const HERO_TEXT: &str = ".hero-title__text";
const HERO_ROW: &str = ".hero-title__row";
const HERO_SPREAD_VARIANTS: [&str; 3] = ["large", "medium", "small"];

const SPLIT_LETTERS: &str = ".js-split-letters > div > div";
const ANIMATED_TEXT: &str = ".js-animated-text div > div";

pub const BALLS_CONTENT: &str = ".block-with-balls-and-info__content";
pub const BALLS_GROUP: &str = ".block-with-balls-and-info__balls";
const BALLS_SLIDES: &str = ".block-with-balls-and-info__slides";
const EMPTY_BALL: &str = ".js-empty-ball";
const FILLED_BALL: &str = ".js-not-empty-ball";

const FADE_LEFT: &str = ".js-fade-left";
const FADE_RIGHT: &str = ".js-fade-right";

const TINT: &str = "#575756";

/// Hero title state kept for resize rebuilds.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Hero {
    pub region: RegionId,
    pub texts: Vec<NodeId>,
    pub spread: bool,
    pub timeline: Option<TimelineId>,
    pub text_revealed: bool,
}

/// Pinned trigger and pan timeline of the ball slider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct BallPin {
    pub trigger: TriggerId,
    pub timeline: TimelineId,
}

/// Balls-and-info slider state kept for resize rebuilds.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BallsInfo {
    pub region: RegionId,
    pub content: NodeId,
    pub groups: Vec<NodeId>,
    pub containers: Vec<NodeId>,
    pub empty_ball: NodeId,
    pub filled_ball: NodeId,
    /// Fillers already appended to each container.
    pub fillers: usize,
    /// Title ticker played while pinned.
    pub ticker: Option<TickerId>,
    pub slides: Option<NodeId>,
    /// `None` until the content has a measurable scroll width.
    pub pin: Option<BallPin>,
}

/// Our-services pan waiting for the cards to get a scroll width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ServicesPan {
    pub region: RegionId,
    pub node: NodeId,
    pub cards: NodeId,
}

/// `"bottom top"`: the region's bottom edge leaves through the viewport top.
pub fn bottom_top() -> Boundary {
    Boundary::new(Edge::Bottom, Anchor::ViewportFraction(0.0))
}

fn region_name(selector: &str) -> &str {
    selector.trim_start_matches(['.', '#'])
}

impl Orchestrator {
    pub(crate) fn wire_page<H: Host + ?Sized>(&mut self, host: &mut H, out: &mut Outputs, now: f64) {
        self.wire_hero(&*host, out);
        self.wire_blocks_with_balls(host, out);

        self.title_reveal(&*host, out, ".animated-title", 0.98, 0.035);
        if host.query(None, ".animated-title").is_some() {
            self.timers.schedule(
                now + self.config.animated_title_text_delay_ms,
                Task::TextReveal {
                    selector: ".animated-title",
                    start: 0.9,
                },
            );
        }

        self.wire_our_services(&*host, out);
        self.title_reveal(&*host, out, ".title-subtitle__title", 0.8, 0.035);
        self.title_reveal(&*host, out, ".projects-cards__title", 0.98, 0.05);
        self.wire_projects_cards(&*host, out);

        self.title_reveal(&*host, out, ".block-with-balls-and-info", 0.98, 0.05);
        self.wire_balls_and_info(host, out);

        self.title_reveal(&*host, out, ".content-sect-one", 0.98, 0.035);
        self.text_reveal(&*host, out, ".content-sect-one", 0.9);
        self.wire_spotlight(&*host, out);
        self.wire_content_two(&*host, out);
        self.title_reveal(&*host, out, ".content-sect-three", 0.98, 0.035);
        self.text_reveal(&*host, out, ".content-sect-three", 0.9);
        self.title_reveal(&*host, out, ".content-sect-four", 0.98, 0.05);
        self.text_reveal(&*host, out, ".content-sect-four", 0.9);
        self.wire_content_four(host, out);
        self.title_reveal(&*host, out, ".team-member", 0.98, 0.05);

        self.wire_client_work(&*host, out);
        if let Some(node) = host.query(None, ".page-services") {
            let region = self.region_for("page-services", node);
            self.ready(out, Some(region), node);
        }
        self.wire_services(&*host, out);
        self.wire_team_members(&*host, out);

        if let Some(node) = host.query(None, ".navigation") {
            let region = self.region_for("navigation", node);
            let delay = RegionAttrs::read(&*host, node).delay;
            self.timers
                .schedule(now + delay * 1000.0, Task::Ready { region, node });
        }
        for selector in [".two-columns", ".two-columns-repeater"] {
            for node in host.query_all(None, selector) {
                let delay = RegionAttrs::read(&*host, node).delay;
                self.timers.schedule(
                    now + delay * 1000.0,
                    Task::Horizontal {
                        node,
                        name: region_name(selector).to_string(),
                    },
                );
            }
        }
        self.wire_text_modal_list(&*host, out);
        for selector in [".audio-modal", ".contact", ".contact-secondary"] {
            if let Some(node) = host.query(None, selector) {
                self.timers.schedule(
                    now,
                    Task::Horizontal {
                        node,
                        name: region_name(selector).to_string(),
                    },
                );
            }
        }
        self.wire_app_blog(&*host, out);
    }

    /// Region already wired for `node`, or a fresh one.
    pub(crate) fn region_for(&mut self, name: &str, node: NodeId) -> RegionId {
        if let Some((id, _)) = self.regions.iter().find(|(_, r)| r.node == node) {
            return *id;
        }
        let id = self.ids.alloc_region();
        self.regions.insert(id, RegionRecord::new(name, node));
        id
    }

    fn add_timeline(&mut self, out: &mut Outputs, region: RegionId, timeline: Timeline) -> TimelineId {
        let id = self.timelines.create(timeline, out);
        if let Some(record) = self.regions.get_mut(&region) {
            record.timelines.push(id);
        }
        id
    }

    /// Kill `id`, clearing its inline styles, and drop it from the region's record.
    pub(crate) fn retire_timeline(&mut self, out: &mut Outputs, region: RegionId, id: TimelineId) {
        self.timelines.kill(id, true, out);
        if let Some(record) = self.regions.get_mut(&region) {
            record.timelines.retain(|t| *t != id);
        }
    }

    fn add_trigger<H: Host + ?Sized>(&mut self, host: &H, region: RegionId, spec: TriggerSpec) -> TriggerId {
        let id = self.triggers.register(host, spec.region(region));
        if let Some(record) = self.regions.get_mut(&region) {
            record.triggers.push(id);
        }
        id
    }

    fn add_ticker<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        out: &mut Outputs,
        region: RegionId,
        speed: f64,
        wrapper: Option<NodeId>,
    ) -> Option<TickerId> {
        let handle: TickerHandle = self
            .tickers
            .create(host, &mut self.timelines, out, speed, wrapper);
        let id = handle.id()?;
        if let Some(record) = self.regions.get_mut(&region) {
            record.tickers.push(id);
        }
        Some(id)
    }

    /// Split-letter title reveal for the first `selector` match, played once
    /// its top reaches `start` of the viewport.
    pub(crate) fn title_reveal<H: Host + ?Sized>(
        &mut self,
        host: &H,
        out: &mut Outputs,
        selector: &str,
        start: f64,
        stagger: f64,
    ) {
        self.reveal(host, out, selector, SPLIT_LETTERS, start, MotionProfile::title_reveal(stagger));
    }

    pub(crate) fn text_reveal<H: Host + ?Sized>(
        &mut self,
        host: &H,
        out: &mut Outputs,
        selector: &str,
        start: f64,
    ) {
        self.reveal(host, out, selector, ANIMATED_TEXT, start, MotionProfile::text_reveal());
    }

    fn reveal<H: Host + ?Sized>(
        &mut self,
        host: &H,
        out: &mut Outputs,
        selector: &str,
        parts: &str,
        start: f64,
        profile: MotionProfile,
    ) {
        let Some(node) = host.query(None, selector) else {
            log::debug!("{selector}: not on this page");
            return;
        };
        let name = region_name(selector);
        let nodes = host.query_all(Some(node), parts);
        if nodes.is_empty() {
            self.skip(out, name, ScrollFxError::missing(parts));
            return;
        }
        let region = self.region_for(name, node);
        let delay = RegionAttrs::read(host, node).delay;
        let timeline = TimelineBuilder::new()
            .delay(delay)
            .add(nodes, &profile, Position::At(0.0))
            .build();
        let tl = self.add_timeline(out, region, timeline);
        self.add_trigger(
            host,
            region,
            TriggerSpec::new(node, Boundary::top_at(start), bottom_top(), Mode::OneShot).timeline(tl),
        );
    }

    fn wire_hero<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(node) = host.query(None, HERO) else {
            return;
        };
        let texts = host.query_all(Some(node), HERO_TEXT);
        if texts.is_empty() {
            self.skip(out, "hero-title", ScrollFxError::missing(HERO_TEXT));
            return;
        }
        let region = self.region_for("hero-title", node);
        self.hero = Some(Hero {
            region,
            texts,
            spread: HERO_SPREAD_VARIANTS.iter().any(|v| host.has_class(node, v)),
            timeline: None,
            text_revealed: false,
        });
        let delay = RegionAttrs::read(host, node).delay;
        self.build_hero(host, out, delay);
    }

    /// Build (or rebuild) the hero intro. A previous instance is killed and
    /// its inline styles cleared first.
    pub(crate) fn build_hero<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs, delay: f64) {
        let Some(hero) = self.hero.as_ref() else {
            return;
        };
        let (region, texts, spread, previous) =
            (hero.region, hero.texts.clone(), hero.spread, hero.timeline);
        if let Some(old) = previous {
            self.retire_timeline(out, region, old);
            self.follow_ups.remove(&old);
        }

        let intro = match centering_offsets(host, &texts, HERO_ROW) {
            Ok(offsets) => offsets,
            Err(err) => {
                log::debug!("hero-title: {err}; retrying on next resize");
                if let Some(hero) = self.hero.as_mut() {
                    hero.timeline = None;
                }
                return;
            }
        };
        let mut builder = TimelineBuilder::new().delay(delay).autoplay().add(
            texts.clone(),
            &MotionProfile::hero_intro(intro),
            Position::At(0.0),
        );
        if spread {
            match spread_offsets(host, &texts, HERO_ROW) {
                Ok(offsets) => {
                    builder = builder.add(
                        texts,
                        &MotionProfile::hero_spread(offsets),
                        Position::At(1.0),
                    );
                }
                Err(err) => log::debug!("hero-title: {err}; rows stay centered"),
            }
        }
        let tl = self.add_timeline(out, region, builder.build());
        self.follow_ups.insert(tl, FollowUp::HeroText);
        if let Some(hero) = self.hero.as_mut() {
            hero.timeline = Some(tl);
        }
    }

    /// Scrubbed horizontal drift on `target` while `node` crosses the
    /// viewport, with `ticker` running only while it is visible.
    #[allow(clippy::too_many_arguments)]
    fn drift_with_ticker<H: Host + ?Sized>(
        &mut self,
        host: &H,
        out: &mut Outputs,
        region: RegionId,
        node: NodeId,
        target: NodeId,
        x_percent: f64,
        ticker: Option<TickerId>,
    ) {
        let timeline = TimelineBuilder::new()
            .scrubbed(Some(0.8))
            .add(vec![target], &MotionProfile::drift(x_percent), Position::At(0.0))
            .build();
        let tl = self.add_timeline(out, region, timeline);
        let actions = ticker.map(TriggerActions::follow_ticker).unwrap_or_default();
        self.add_trigger(
            host,
            region,
            TriggerSpec::new(node, Boundary::top_at(1.0), bottom_top(), Mode::Scrub)
                .timeline(tl)
                .actions(actions),
        );
    }

    fn wire_blocks_with_balls<H: Host + ?Sized>(&mut self, host: &mut H, out: &mut Outputs) {
        for node in host.query_all(None, ".block-with-balls") {
            let Some(content) = host.query(Some(node), ".block-with-balls__content") else {
                self.skip(out, "block-with-balls", ScrollFxError::missing(".block-with-balls__content"));
                continue;
            };
            let region = self.region_for("block-with-balls", node);
            let speed = self.config.tickers.balls;
            let ticker = self.add_ticker(host, out, region, speed, Some(content));

            let delay = RegionAttrs::read(&*host, node).delay;
            let fade = TimelineBuilder::new()
                .delay(delay)
                .autoplay()
                .add(vec![node], &MotionProfile::fade_in(), Position::At(0.0))
                .build();
            self.add_timeline(out, region, fade);
            self.drift_with_ticker(&*host, out, region, node, content, -10.0, ticker);
        }
    }

    fn wire_our_services<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(node) = host.query(None, ".our-services") else {
            return;
        };
        let Some(cards) = host.query(Some(node), ".our-services__cards") else {
            self.skip(out, "our-services", ScrollFxError::missing(".our-services__cards"));
            return;
        };
        let region = self.region_for("our-services", node);
        let pan = ServicesPan { region, node, cards };
        if !self.pan_our_services(host, out, pan) {
            self.services_pan = Some(pan);
        }
    }

    /// Scrubbed pan of the service cards by their horizontal overflow.
    /// `false` while the cards have no scroll width yet.
    pub(crate) fn pan_our_services<H: Host + ?Sized>(
        &mut self,
        host: &H,
        out: &mut Outputs,
        pan: ServicesPan,
    ) -> bool {
        let scroll_width = match measure_scroll_width(host, pan.cards, "service cards") {
            Ok(w) => w,
            Err(err) => {
                log::debug!("our-services: {err}; pan deferred to next resize");
                return false;
            }
        };
        let shift = horizontal_overflow(scroll_width, host.viewport().width);
        let timeline = TimelineBuilder::new()
            .scrubbed(None)
            .add(vec![pan.cards], &MotionProfile::pan_x(-shift), Position::At(0.0))
            .build();
        let tl = self.add_timeline(out, pan.region, timeline);
        self.add_trigger(
            host,
            pan.region,
            TriggerSpec::new(pan.node, Boundary::top_at(1.0), bottom_top(), Mode::Scrub).timeline(tl),
        );
        true
    }

    /// Columns move vertically in opposite directions, or horizontally below
    /// the narrow breakpoint. The breakpoint is read once, here.
    fn wire_projects_cards<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(content) = host.query(None, ".projects-cards__content") else {
            return;
        };
        let region = self.region_for("projects-cards", content);
        let narrow = host.viewport().width < self.config.breakpoints.narrow_below_px;
        let property = if narrow { Property::X } else { Property::Y };
        for (index, column) in host
            .query_all(None, ".projects-cards__column")
            .into_iter()
            .enumerate()
        {
            let attrs = RegionAttrs::read(host, column);
            let shift = parallax_shift(index, attrs.speed, narrow);
            let timeline = TimelineBuilder::new()
                .scrubbed(Some(attrs.scrub))
                .add(vec![column], &MotionProfile::parallax(property, shift), Position::At(0.0))
                .build();
            let tl = self.add_timeline(out, region, timeline);
            self.add_trigger(
                host,
                region,
                TriggerSpec::new(content, Boundary::top_at(1.0), bottom_top(), Mode::Scrub).timeline(tl),
            );
        }
    }

    fn wire_balls_and_info<H: Host + ?Sized>(&mut self, host: &mut H, out: &mut Outputs) {
        let Some(content) = host.query(None, BALLS_CONTENT) else {
            return;
        };
        let (Some(empty_ball), Some(filled_ball)) = (
            host.query(Some(content), EMPTY_BALL),
            host.query(Some(content), FILLED_BALL),
        ) else {
            self.skip(out, "block-with-balls-and-info", ScrollFxError::missing(FILLED_BALL));
            return;
        };
        let region = self.region_for("block-with-balls-and-info", content);

        let containers = host.query_all(None, BALLS_GROUP);
        let fillers = match self.filler_target(&*host, empty_ball, filled_ball) {
            Ok(count) => {
                append_fillers(host, &containers, count);
                count
            }
            Err(err) => {
                log::debug!("block-with-balls-and-info: {err}; fillers deferred to next resize");
                0
            }
        };

        let ticker = match host.query(None, ".title-and-text") {
            Some(node) => {
                let ticker_region = self.region_for("title-and-text", node);
                let wrapper = host.query(Some(node), ".title-and-text__ticker");
                let speed = self.config.tickers.title_and_text;
                self.add_ticker(host, out, ticker_region, speed, wrapper)
            }
            None => None,
        };

        let slides = host.query(Some(content), BALLS_SLIDES);
        if slides.is_none() {
            log::debug!("block-with-balls-and-info: no {BALLS_SLIDES}; pinning without slides");
        }
        self.balls = Some(BallsInfo {
            region,
            content,
            groups: host.query_all(Some(content), BALLS_GROUP),
            containers,
            empty_ball,
            filled_ball,
            fillers,
            ticker,
            slides,
            pin: None,
        });
        self.pin_balls(&*host, out);
    }

    /// Pin the ball content for its horizontal overflow, or re-pan an
    /// existing pin with a fresh timeline. Left as is while the content has
    /// no scroll width.
    pub(crate) fn pin_balls<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(balls) = self.balls.as_ref() else {
            return;
        };
        let scroll_width = match measure_scroll_width(host, balls.content, "ball content") {
            Ok(w) => w,
            Err(err) => {
                log::debug!("block-with-balls-and-info: {err}; pin deferred to next resize");
                return;
            }
        };
        let (region, content, ticker, slides, pin) =
            (balls.region, balls.content, balls.ticker, balls.slides, balls.pin);
        let groups = balls.groups.clone();
        let ball_count = groups.len();
        let overflow = horizontal_overflow(scroll_width, host.viewport().width);
        let end = Boundary::after(Distance::Pixels(overflow));

        if let Some(pin) = pin {
            self.retire_timeline(out, region, pin.timeline);
        }
        let tl = self.add_timeline(out, region, pan_timeline(groups, overflow));
        let trigger = match pin {
            Some(pin) => {
                self.triggers.set_timeline(pin.trigger, Some(tl));
                self.triggers.set_end(host, pin.trigger, end);
                pin.trigger
            }
            None => {
                let mut spec = TriggerSpec::new(
                    content,
                    Boundary::new(Edge::Top, Anchor::Pixels(self.config.header.height_px)),
                    end,
                    Mode::Pinned,
                )
                .timeline(tl)
                .actions(ticker.map(TriggerActions::follow_ticker).unwrap_or_default());
                if let Some(slides) = slides {
                    spec = spec.slides(SlideBinding {
                        slides: host.children(slides),
                        ball_count,
                    });
                }
                self.add_trigger(host, region, spec)
            }
        };
        if let Some(balls) = self.balls.as_mut() {
            balls.pin = Some(BallPin { trigger, timeline: tl });
        }
    }

    /// Filler balls each container needs at the current viewport width.
    pub(crate) fn filler_target<H: Host + ?Sized>(
        &self,
        host: &H,
        empty_ball: NodeId,
        filled_ball: NodeId,
    ) -> scrollfx_core::Result<usize> {
        let spacing = self.config.balls.spacing_px;
        let empty = unit_width(measure_width(host, empty_ball, "empty ball")?, spacing);
        let filled = unit_width(measure_width(host, filled_ball, "filled ball")?, spacing);
        filler_count(host.viewport().width, empty, filled, self.config.balls.min_fillers)
    }

    fn wire_spotlight<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(section) = host.query(None, ".content-sect-one") else {
            return;
        };
        let Some(area) = host.query(Some(section), ".content-sect-one__img") else {
            self.skip(out, "content-sect-one", ScrollFxError::missing(".content-sect-one__img"));
            return;
        };
        let Some(mask) = host.query(Some(area), ".content-sect-one__img-mask") else {
            self.skip(out, "content-sect-one", ScrollFxError::missing(".content-sect-one__img-mask"));
            return;
        };
        self.spotlight = Some(scrollfx_core::Spotlight::new(
            host,
            area,
            mask,
            self.config.cursor.easing_factor,
        ));
    }

    /// Pinned for one and a half viewports while the title letters darken;
    /// image labels appear on entry, halfway and on exit.
    fn wire_content_two<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(node) = host.query(None, ".content-sect-two") else {
            return;
        };
        let Some(title) = host.query(Some(node), ".content-sect-two__title") else {
            self.skip(out, "content-sect-two", ScrollFxError::missing(".content-sect-two__title"));
            return;
        };
        let region = self.region_for("content-sect-two", node);
        let letters = host.query_all(Some(title), "div > div");
        let timeline = TimelineBuilder::new()
            .scrubbed(Some(0.1))
            .add(letters, &MotionProfile::tint(TINT, 0.1), Position::At(0.1))
            .build();
        let tl = self.add_timeline(out, region, timeline);

        let label = |i: usize| -> Vec<Action> {
            host.query(Some(node), &format!(".js-img-label-{i}"))
                .map(|label| Action::Ready {
                    region: Some(region),
                    node: label,
                    class: READY.to_string(),
                })
                .into_iter()
                .collect()
        };
        let actions = TriggerActions {
            on_enter: label(0),
            on_leave: label(2),
            ..TriggerActions::default()
        };
        self.add_trigger(
            host,
            region,
            TriggerSpec::new(
                node,
                Boundary::top_at(0.0),
                Boundary::after(Distance::ViewportFraction(1.5)),
                Mode::Pinned,
            )
            .timeline(tl)
            .actions(actions)
            .mark(0.5, label(1)),
        );
    }

    fn wire_content_four<H: Host + ?Sized>(&mut self, host: &mut H, out: &mut Outputs) {
        for node in host.query_all(None, ".content-sect-four") {
            let region = self.region_for("content-sect-four", node);
            for titles in host.query_all(Some(node), ".content-sect-four__titles") {
                let speed = self.config.tickers.content_titles;
                let ticker = self.add_ticker(host, out, region, speed, Some(titles));
                self.drift_with_ticker(&*host, out, region, node, titles, -20.0, ticker);
            }
        }
    }

    /// Intro sequence on the client work page: text rows, then category
    /// links overlapping them, then the post cards.
    fn wire_client_work<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(node) = host.query(None, ".client-work") else {
            return;
        };
        self.title_reveal(host, out, ".client-work", 0.98, 0.035);
        let region = self.region_for("client-work", node);

        let mut builder = TimelineBuilder::new().delay(1.5).autoplay();
        let rows = host.query_all(None, ".client-work__text-inner");
        if !rows.is_empty() {
            builder = builder.add(rows, &MotionProfile::rows_up(1.0, 0.0), Position::At(0.0));
        }
        let links = host.query_all(Some(node), ".client-work__link a");
        if !links.is_empty() {
            builder = builder.add(links, &MotionProfile::rows_up(0.4, 0.1), Position::AfterEnd(-0.9));
        }
        let cards = host.query_all(None, ".js-post-cards-wrap");
        if !cards.is_empty() {
            builder = builder.add(cards, &MotionProfile::rise_in(1.0), Position::AfterEnd(0.1));
        }
        let timeline = builder.build();
        if timeline.tweens.is_empty() {
            self.skip(out, "client-work", ScrollFxError::missing(".client-work__text-inner"));
            return;
        }
        self.add_timeline(out, region, timeline);
    }

    /// Each service row rises in once its top reaches 80% of the viewport.
    /// Only the first row honours the block delay.
    fn wire_services<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(block) = host.query(None, ".services") else {
            return;
        };
        let delay = RegionAttrs::read(host, block).delay;
        for (index, row) in host
            .query_all(Some(block), ".services__list-item")
            .into_iter()
            .enumerate()
        {
            let Some(title) = host.query(Some(row), ".services__list-item-title") else {
                self.skip(out, "services", ScrollFxError::missing(".services__list-item-title"));
                continue;
            };
            let region = self.region_for("services", row);
            let mut builder = TimelineBuilder::new()
                .delay(if index == 0 { delay } else { 0.0 })
                .add(vec![title], &MotionProfile::rise_in(1.5), Position::At(0.0));
            match host.query(Some(row), ".services__list-item-text") {
                Some(text) => {
                    builder = builder.add(vec![text], &MotionProfile::rise_in(1.0), Position::At(0.3));
                }
                None => self.skip(out, "services", ScrollFxError::missing(".services__list-item-text")),
            }
            let tl = self.add_timeline(out, region, builder.build());
            self.add_trigger(
                host,
                region,
                TriggerSpec::new(row, Boundary::top_at(0.8), bottom_top(), Mode::OneShot).timeline(tl),
            );
        }
    }

    fn wire_team_members<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        for block in host.query_all(None, ".team-members") {
            for side in [".js-photo-left", ".js-photo-right"] {
                for card in host.query_all(Some(block), side) {
                    let region = self.region_for("team-members", card);
                    let mut builder = TimelineBuilder::new();
                    if let Some(img) = host.query(Some(card), ".team-members__item-image") {
                        builder = builder.add(vec![img], &MotionProfile::slide_in(1.5), Position::At(0.0));
                    }
                    let rows = host.query_all(Some(card), ".js-team-members-text");
                    if !rows.is_empty() {
                        builder = builder.add(rows, &MotionProfile::rows_up(1.0, 0.2), Position::At(0.6));
                    }
                    let tl = self.add_timeline(out, region, builder.build());
                    let actions = TriggerActions {
                        on_enter: vec![Action::Ready {
                            region: Some(region),
                            node: card,
                            class: READY.to_string(),
                        }],
                        ..TriggerActions::default()
                    };
                    self.add_trigger(
                        host,
                        region,
                        TriggerSpec::new(card, Boundary::top_at(0.8), bottom_top(), Mode::OneShot)
                            .timeline(tl)
                            .actions(actions),
                    );
                }
            }
        }
    }

    fn wire_text_modal_list<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(node) = host.query(None, ".text-modal-list") else {
            return;
        };
        let items = host.query_all(None, ".text-modal-list__list-item");
        if items.is_empty() {
            self.skip(out, "text-modal-list", ScrollFxError::missing(".text-modal-list__list-item"));
            return;
        }
        let region = self.region_for("text-modal-list", node);
        let timeline = TimelineBuilder::new()
            .add(items, &MotionProfile::rise_in(1.5).stagger(0.2), Position::At(0.0))
            .build();
        let tl = self.add_timeline(out, region, timeline);
        self.add_trigger(
            host,
            region,
            TriggerSpec::new(node, Boundary::top_at(0.8), bottom_top(), Mode::OneShot).timeline(tl),
        );
    }

    fn wire_app_blog<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(node) = host.query(None, ".app-blog") else {
            return;
        };
        let region = self.region_for("app-blog", node);
        self.ready(out, Some(region), node);
        let links = host.query_all(Some(node), ".app-blog__categories-item a");
        if links.is_empty() {
            return;
        }
        let timeline = TimelineBuilder::new()
            .delay(1.5)
            .autoplay()
            .add(links, &MotionProfile::rows_up(0.4, 0.1), Position::At(0.0))
            .build();
        self.add_timeline(out, region, timeline);
    }

    /// Slide `.js-fade-left`/`.js-fade-right` children of `node` into place as
    /// each enters the viewport, 0.2 s apart within a side.
    pub(crate) fn wire_horizontal<H: Host + ?Sized>(
        &mut self,
        host: &H,
        out: &mut Outputs,
        node: NodeId,
        name: &str,
    ) {
        let region = self.region_for(name, node);
        for side in [FADE_LEFT, FADE_RIGHT] {
            for (index, elem) in host.query_all(Some(node), side).into_iter().enumerate() {
                let profile = MotionProfile::slide_in(0.5).delay(index as f64 * 0.2);
                let timeline = TimelineBuilder::new()
                    .add(vec![elem], &profile, Position::At(0.0))
                    .build();
                let tl = self.add_timeline(out, region, timeline);
                self.add_trigger(
                    host,
                    region,
                    TriggerSpec::new(elem, Boundary::top_at(1.0), bottom_top(), Mode::OneShot).timeline(tl),
                );
            }
        }
    }
}

/// Scrubbed pan of the ball rows by the content's horizontal overflow.
pub(crate) fn pan_timeline(groups: Vec<NodeId>, overflow: f64) -> Timeline {
    TimelineBuilder::new()
        .scrubbed(Some(1.0))
        .add(groups, &MotionProfile::pan_x(-overflow), Position::At(0.0))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_names_drop_the_selector_prefix() {
        assert_eq!(region_name(".content-sect-one"), "content-sect-one");
        assert_eq!(region_name("#contact"), "contact");
    }

    #[test]
    fn pan_timeline_is_scrubbed_with_smoothing() {
        let tl = pan_timeline(vec![NodeId(1), NodeId(2)], 1600.0);
        assert!(tl.is_scrubbed());
        assert_eq!(tl.tweens[0].targets, vec![NodeId(1), NodeId(2)]);
    }
}
