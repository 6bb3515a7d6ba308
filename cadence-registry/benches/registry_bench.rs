//! Benchmark: registry lookup cost
//!
//! Top-level hits are a map lookup. Nested hits and highest-revision
//! lookups walk every registered tree, so their cost grows with the
//! number of registered workflows and their size.

use cadence_model::{ComponentKind, ComponentNode, ComponentTree, LiveComponent};
use cadence_registry::{NoCache, Registry, RegistryConfig};
use cadence_types::Identifier;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::sync::Arc;

const CHILDREN_PER_WORKFLOW: u64 = 16;

fn workflow(object: u64) -> LiveComponent {
    let root = ComponentNode::new(
        "workflow",
        "ptolemy.actor.TypedCompositeActor",
        ComponentKind::Composite,
    )
    .with_identity(Identifier::local("wf", object, 1));
    let mut tree = ComponentTree::new(root);
    let parent = tree.root();
    for child in 0..CHILDREN_PER_WORKFLOW {
        let node = ComponentNode::new(
            format!("actor{child}"),
            "ptolemy.actor.lib.Const",
            ComponentKind::Atomic,
        )
        .with_identity(Identifier::local(
            "actor",
            object * CHILDREN_PER_WORKFLOW + child,
            1,
        ));
        tree.add_child(parent, node);
    }
    LiveComponent::new(tree)
}

fn populated(workflows: u64) -> Registry {
    let registry = Registry::create(RegistryConfig::default(), Arc::new(NoCache));
    for object in 0..workflows {
        registry.register(workflow(object));
    }
    registry
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_resolve");

    for workflows in [10u64, 100, 1000] {
        let registry = populated(workflows);
        group.throughput(Throughput::Elements(1));

        // === Top-level hit ===

        let top = Identifier::local("wf", workflows / 2, 1);
        group.bench_with_input(BenchmarkId::new("exact/top_level", workflows), &top, |b, id| {
            b.iter(|| black_box(registry.resolve_exact(black_box(id))));
        });

        // === Nested hit in the last workflow ===

        let nested = Identifier::local("actor", (workflows - 1) * CHILDREN_PER_WORKFLOW + 3, 1);
        group.bench_with_input(BenchmarkId::new("exact/nested", workflows), &nested, |b, id| {
            b.iter(|| black_box(registry.resolve_exact(black_box(id))));
        });

        // === Highest revision scans everything ===

        let family = Identifier::local("actor", 7, 0);
        group.bench_with_input(
            BenchmarkId::new("highest_revision", workflows),
            &family,
            |b, id| {
                b.iter(|| black_box(registry.resolve_highest_revision(black_box(id))));
            },
        );
    }

    group.finish();
}

fn bench_register(c: &mut Criterion) {
    let component = workflow(0);
    c.bench_function("registry_register/replace", |b| {
        let registry = populated(100);
        b.iter(|| black_box(registry.register(component.clone())));
    });
}

criterion_group!(benches, bench_resolve, bench_register);
criterion_main!(benches);
