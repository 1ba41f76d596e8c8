//! Translation throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndlab_core::Catalog;
use ndlab_lang::{Tokenizer, Translator};

const FIELDS: &str = "GAMMA.NUC_ID GAMMA.ENERGY GAMMA.REL_PHOTON_INTENS GAMMA.START_LEVEL.ENERGY GAMMA.END_LEVEL.ENERGY";
const FILTER: &str = "GAMMA.NUC.Z = 54 and GAMMA.ENERGY > 100 ORDER BY GAMMA.ENERGY";
const GLUED: &str = "(GAMMA.NUC.Z=54)and GAMMA.ENERGY>100 ORDER BY GAMMA.ENERGY";

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate/assemble");
    let translator = Translator::new(Catalog::global());

    group.bench_function("relations", |b| {
        b.iter(|| black_box(translator.assemble(FIELDS, FILTER).unwrap().to_sql()));
    });

    group.bench_function("wildcard", |b| {
        b.iter(|| black_box(translator.assemble("LEVEL.*", "LEVEL.NUC_ID = '135XE'").unwrap()));
    });

    let cleaning = translator.clone().with_force_clean(true);
    group.bench_function("force_clean", |b| {
        b.iter(|| black_box(cleaning.assemble(FIELDS, GLUED).unwrap()));
    });

    group.finish();
}

fn bench_clean(c: &mut Criterion) {
    let tokenizer = Tokenizer::new(Catalog::global());

    c.bench_function("translate/clean", |b| {
        b.iter(|| black_box(tokenizer.clean(black_box(GLUED))));
    });
}

criterion_group!(benches, bench_assemble, bench_clean);
criterion_main!(benches);
