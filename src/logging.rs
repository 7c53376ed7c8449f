//! Logger setup shared by the binary

use std::io::Write;

/// Environment variable holding an env_logger filter, e.g. `DQREPORT_LOG=debug`
pub const LOG_ENV: &str = "DQREPORT_LOG";

/// Install a stderr logger with timestamped lines.
///
/// Defaults to `warn` so progress banners on stdout stay uncluttered.
/// Call once per process.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "warn"))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}
