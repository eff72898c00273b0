use std::cell::RefCell;
use std::ptr::NonNull;

use criterion::{criterion_group, criterion_main, Criterion};
use embergc::{Collector, GcNode};

struct Fixture {
    objects: Vec<Box<GcNode>>,
    edges: RefCell<std::collections::HashMap<usize, Vec<usize>>>,
    roots: RefCell<Vec<usize>>,
}

impl Fixture {
    fn node_ptr(&self, idx: usize) -> NonNull<GcNode> {
        NonNull::from(self.objects[idx].as_ref())
    }

    fn index_of(&self, node: NonNull<GcNode>) -> usize {
        self.objects
            .iter()
            .position(|b| NonNull::from(b.as_ref()) == node)
            .unwrap()
    }
}

fn scan(gc: &Collector<Fixture>, node: Option<NonNull<GcNode>>, alive: &mut dyn FnMut(NonNull<GcNode>)) {
    let fixture = gc.userdata();
    match node {
        None => {
            for &root in fixture.roots.borrow().iter() {
                alive(fixture.node_ptr(root));
            }
        }
        Some(node) => {
            let idx = fixture.index_of(node);
            if let Some(targets) = fixture.edges.borrow().get(&idx) {
                for &t in targets {
                    alive(fixture.node_ptr(t));
                }
            }
        }
    }
}

fn dead(_gc: &Collector<Fixture>, _node: NonNull<GcNode>) {}

/// A chain of `n` nodes, each linking to the next, rooted only at the
/// head. Every node is reachable: mark does maximal work, sweep reports
/// nothing.
fn chain_fixture(n: usize) -> Fixture {
    let objects: Vec<_> = (0..n).map(|_| Box::new(GcNode::new())).collect();
    let edges = RefCell::new(std::collections::HashMap::new());
    for i in 0..n.saturating_sub(1) {
        edges.borrow_mut().insert(i, vec![i + 1]);
    }
    Fixture {
        objects,
        edges,
        roots: RefCell::new(vec![0]),
    }
}

fn bench_collect_reachable_chain(c: &mut Criterion) {
    c.bench_function("collect_reachable_chain_10k", |b| {
        b.iter_batched(
            || {
                let fixture = chain_fixture(10_000);
                let gc = Collector::new(fixture, scan, dead);
                for idx in 0..gc.userdata().objects.len() {
                    unsafe { gc.register(gc.userdata().node_ptr(idx)) };
                }
                gc
            },
            |gc| gc.collect(),
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_collect_all_garbage(c: &mut Criterion) {
    c.bench_function("collect_all_garbage_10k", |b| {
        b.iter_batched(
            || {
                let fixture = chain_fixture(10_000);
                fixture.roots.borrow_mut().clear(); // nothing is rooted
                let gc = Collector::new(fixture, scan, dead);
                for idx in 0..gc.userdata().objects.len() {
                    unsafe { gc.register(gc.userdata().node_ptr(idx)) };
                }
                gc
            },
            |gc| gc.collect(),
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_repeated_collect_idempotent(c: &mut Criterion) {
    c.bench_function("repeated_collect_1k_idempotent", |b| {
        let fixture = chain_fixture(1_000);
        let gc = Collector::new(fixture, scan, dead);
        for idx in 0..gc.userdata().objects.len() {
            unsafe { gc.register(gc.userdata().node_ptr(idx)) };
        }
        gc.collect(); // first cycle does the real work
        b.iter(|| gc.collect()); // subsequent cycles: no-ops
    });
}

criterion_group!(
    gc,
    bench_collect_reachable_chain,
    bench_collect_all_garbage,
    bench_repeated_collect_idempotent
);
criterion_main!(gc);
