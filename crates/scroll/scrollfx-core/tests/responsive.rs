use scrollfx_core::responsive::{append_fillers, filler_count, unit_width, FILLER_CLASS};
use scrollfx_core::{Debounce, Host, MemoryDom, PageSpec};
use scrollfx_test_fixtures::pages;

#[test]
fn fillers_are_appended_identically_to_every_container() {
    let page: PageSpec = pages::load("home").expect("home page");
    let mut dom = MemoryDom::new(&page);
    let containers = dom.query_all(None, ".block-with-balls-and-info__balls");
    assert_eq!(containers.len(), 3);

    let empty = dom.query(None, ".js-empty-ball").unwrap();
    let filled = dom.query(None, ".js-not-empty-ball").unwrap();
    let count = filler_count(
        dom.viewport().width,
        unit_width(dom.rect(empty).width, 6.0),
        unit_width(dom.rect(filled).width, 6.0),
        3,
    )
    .unwrap();
    // 1280 - 220 = 1060 -> ceil(21.2) = 22 -> odd
    assert_eq!(count, 23);

    let before: Vec<usize> = containers
        .iter()
        .map(|&c| dom.children(c).len())
        .collect();
    assert_eq!(append_fillers(&mut dom, &containers, count), 3 * count);
    for (i, &c) in containers.iter().enumerate() {
        assert_eq!(dom.children(c).len(), before[i] + count);
        let last = *dom.children(c).last().unwrap();
        assert!(dom.has_class(last, FILLER_CLASS));
    }
}

#[test]
fn resize_burst_recomputes_once() {
    let mut debounce = Debounce::new(200.0);
    let mut fired = 0;
    let mut now = 0.0;
    for _ in 0..10 {
        debounce.trigger(now);
        now += 5.0;
        if debounce.poll(now) {
            fired += 1;
        }
    }
    while now < 1000.0 {
        now += 16.0;
        if debounce.poll(now) {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
}
