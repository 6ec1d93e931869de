pub fn init_logger() {
    use tracing::metadata::LevelFilter;
    use tracing_subscriber::{
        EnvFilter, Layer, filter::Directive, fmt, prelude::__tracing_subscriber_SubscriberExt,
        util::SubscriberInitExt,
    };

    // debug builds show everything not filtered below, release builds stop at info
    #[cfg(debug_assertions)]
    let default_directive = Directive::from(LevelFilter::DEBUG);
    #[cfg(not(debug_assertions))]
    let default_directive = Directive::from(LevelFilter::INFO);

    // per-segment listings are debug level and very chatty at 30 fps
    let filter_directives = std::env::var("RUST_LOG").unwrap_or_else(|_| "thermomask=info".to_string());

    let filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .parse_lossy(filter_directives);

    // tests may race to install; only the first wins
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_filter(filter))
        .try_init();
}
