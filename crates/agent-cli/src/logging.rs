use std::io::Write;

/// Timestamped `env_logger` output on stderr. Quiet unless `debug` is set or
/// `RUST_LOG` says otherwise.
pub fn init_logging(debug: bool) {
    let filter = if debug { "debug" } else { "off" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();
}
