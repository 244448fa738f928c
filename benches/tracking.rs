//! Benchmarks for scroll offset resolution and layout.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pankview::conversation::payload::{sample_content, seed_turn};
use pankview::conversation::{Turn, TurnId, TurnStore};
use pankview::layout::{ScrollTracker, resolve_section};
use pankview::ui::layout::layout_turns;
use pankview::ui::tabs::TabState;

fn store_with(turns: usize) -> TurnStore {
    let mut store = TurnStore::new(seed_turn(sample_content()));
    for n in 2..=turns {
        store.append(Turn::new(
            TurnId::new(format!("turn-{n}")),
            format!("Follow-up {n}"),
            sample_content(),
        ));
    }
    store
}

fn bench_resolve(c: &mut Criterion) {
    let store = store_with(50);
    let layout = layout_turns(&store, &TabState::default(), 80);
    let mut registry = pankview::layout::SectionRegistry::new();
    for (turn, section, extent) in layout.extents() {
        registry.register(turn, *section, *extent);
    }
    let last_line = layout.line_count().saturating_sub(1);

    c.bench_function("resolve_section_last_turn", |b| {
        b.iter(|| resolve_section(&store, &registry, black_box(last_line)))
    });

    let tracker = ScrollTracker::default();
    c.bench_function("tracker_scroll_sweep", |b| {
        b.iter(|| {
            for offset in (0..last_line).step_by(97) {
                black_box(tracker.resolve(offset, &store, &registry));
            }
        })
    });
}

fn bench_layout(c: &mut Criterion) {
    let store = store_with(20);
    let tabs = TabState::default();
    c.bench_function("layout_turns_20", |b| {
        b.iter(|| layout_turns(&store, &tabs, black_box(80)))
    });
}

criterion_group!(benches, bench_resolve, bench_layout);
criterion_main!(benches);
