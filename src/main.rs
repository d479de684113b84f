use tweetweld::pipeline;
use tweetweld::prelude::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let config = PipelineConfig::default();

    for variant in Variant::ALL {
        let stream = config.stream(sample_tweets());
        let processor = ClassifyProcessor::new(config.classifier());
        let sink = PrintSink::new();

        match pipeline::run(variant, stream, processor, sink, &config).await {
            Ok(report) => println!("\n{}", report),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
