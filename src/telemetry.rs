use tracing_subscriber::{
    EnvFilter,
    fmt::{
        MakeWriter, Subscriber,
        format::{DefaultFields, Format},
    },
    util::SubscriberInitExt,
};

/// Plain-text subscriber without colour codes. `RUST_LOG` overrides
/// `default_filter`.
pub fn get_subscriber<W>(
    default_filter: &str,
    make_writer: W,
) -> Subscriber<DefaultFields, Format, EnvFilter, W>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(make_writer)
        .with_ansi(false)
        .with_target(false)
        .finish()
}

/// Installs the subscriber on stderr as the global default; `log` records
/// are forwarded into it.
pub fn init_logging(default_filter: &str) {
    if let Err(e) = get_subscriber(default_filter, std::io::stderr).try_init() {
        eprintln!("Failed to set logger: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_lines_are_plain_text() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = get_subscriber("info", move || writer.clone());

        {
            let _guard = subscriber.set_default();
            tracing::error!("ERROR   http://example.com responded with Status Code: 500");
        }

        let output = String::from_utf8(buf.0.lock().expect("lock").clone()).expect("utf8");
        assert!(output.contains("ERROR   http://example.com responded with Status Code: 500"));
        assert!(!output.contains('\u{1b}'), "unexpected escape codes in {output:?}");
    }
}
