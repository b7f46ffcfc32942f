use criterion::{black_box, criterion_group, criterion_main, Criterion};
use heritage::config::AnalyzerConfig;
use heritage::core::{
    DeclarationIndex, MarkerAnalyzer, MemberDeclaration, Modifier, RelationshipClassifier,
    TypeDeclaration,
};

/// Ten interfaces, each implemented by twenty classes, each subclassed five times.
fn synthetic_hierarchy() -> DeclarationIndex {
    let index = DeclarationIndex::new();
    for i in 0..10 {
        let mut api = TypeDeclaration::interface(format!("bench.Api{i}"));
        for m in 0..8 {
            api = api.with_member(MemberDeclaration::method(format!("op{m}")));
        }
        index.insert(api);

        for c in 0..20 {
            let mut class = TypeDeclaration::class(format!("bench.Impl{i}_{c}"))
                .implementing(format!("Api{i}"));
            for m in 0..8 {
                class = class.with_member(MemberDeclaration::method(format!("op{m}")));
            }
            index.insert(class);

            for s in 0..5 {
                let sub = TypeDeclaration::class(format!("bench.Sub{i}_{c}_{s}"))
                    .extending(format!("Impl{i}_{c}"))
                    .with_member(
                        MemberDeclaration::method("op0").with_modifier(Modifier::Override),
                    );
                index.insert(sub);
            }
        }
    }
    index
}

fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    let index = synthetic_hierarchy();
    let classifier = RelationshipClassifier::new(&index, &index);
    let api = index.get("bench.Api0").unwrap();
    let implementation = index.get("bench.Impl0_0").unwrap();

    group.bench_function("interface_with_subtypes", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&api))))
    });

    group.bench_function("class_with_super_and_subtypes", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&implementation))))
    });

    let analyzer = MarkerAnalyzer::new(AnalyzerConfig::default().without_cache());
    group.bench_function("whole_index_parallel", |b| {
        b.iter(|| black_box(analyzer.analyze_index(black_box(&index)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, benchmark_classification);
criterion_main!(benches);
