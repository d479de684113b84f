use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tweetweld::pipeline;
use tweetweld::prelude::*;

fn fixture(size: usize) -> Vec<Tweet> {
    (0..size)
        .map(|i| {
            let text = if i % 2 == 0 {
                "the #golang gopher says hi"
            } else {
                "centering something, again"
            };
            Tweet::new(format!("user{}", i), text)
        })
        .collect()
}

fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("variants");
    let config = PipelineConfig::instant();

    for size in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        let tweets = fixture(*size);

        for variant in Variant::ALL {
            group.bench_with_input(BenchmarkId::new(variant.name(), size), &tweets, |b, tweets| {
                b.iter(|| {
                    tokio::runtime::Runtime::new().unwrap().block_on(async {
                        pipeline::run(
                            variant,
                            config.stream(tweets.clone()),
                            ClassifyProcessor::new(config.classifier()),
                            CollectSink::new(),
                            &config,
                        )
                        .await
                        .unwrap();
                    })
                });
            });
        }
    }

    group.finish();
}

fn bench_buffer_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_size");
    let tweets = fixture(1000);

    for buffer_size in [1, 16, 256].iter() {
        let config = PipelineConfig::instant().buffer_size(*buffer_size);
        group.bench_with_input(
            BenchmarkId::new("concurrent", buffer_size),
            &tweets,
            |b, tweets| {
                b.iter(|| {
                    tokio::runtime::Runtime::new().unwrap().block_on(async {
                        ConcurrentPipeline::new(
                            config.stream(tweets.clone()),
                            ClassifyProcessor::new(config.classifier()),
                            CollectSink::new(),
                        )
                        .buffer_size(config.buffer_size)
                        .run()
                        .await
                        .unwrap();
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_variants, bench_buffer_size);
criterion_main!(benches);
