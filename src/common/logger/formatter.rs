use core::fmt as core_fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields},
    },
    registry::LookupSpan,
};

/// `[timestamp] LEVEL thread target:line > message`
///
/// `thread` is the thread name when one was set (audio callbacks usually run
/// on a named thread), otherwise its `ThreadId(n)`.
pub struct CustomFormatter {
    use_ansi: bool,
}

impl CustomFormatter {
    pub fn new(use_ansi: bool) -> Self {
        Self { use_ansi }
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.use_ansi { code } else { "" }
    }
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> core_fmt::Result {
        let reset = self.paint("\x1b[0m");
        let dim = self.paint("\x1b[2m");

        let format = time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
        );
        let now =
            time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
        match now.format(&format) {
            Ok(timestamp) => write!(writer, "{dim}[{timestamp}]{reset} ")?,
            Err(_) => write!(writer, "{dim}[??]{reset} ")?,
        }

        let metadata = event.metadata();
        let level = *metadata.level();
        write!(
            writer,
            "{}{}{: <5}{} ",
            self.paint(level_color(level)),
            self.paint("\x1b[1m"),
            level.as_str(),
            reset
        )?;

        let thread = std::thread::current();
        match thread.name() {
            Some(name) => write!(writer, "{name} ")?,
            None => write!(writer, "{:?} ", thread.id())?,
        }

        write!(writer, "{dim}{}", metadata.target())?;
        if let Some(line) = metadata.line() {
            write!(writer, ":{line}")?;
        }
        write!(writer, "{reset} > ")?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer, "{reset}")
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::prelude::*;

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn plain_line_names_thread_target_and_message() {
        let capture = Capture::default();
        let sink = capture.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(CustomFormatter::new(false))
                .with_ansi(false)
                .with_writer(move || sink.clone()),
        );

        std::thread::Builder::new()
            .name("audio-out".into())
            .spawn(move || {
                tracing::subscriber::with_default(subscriber, || tracing::warn!("underrun"));
            })
            .unwrap()
            .join()
            .unwrap();

        let line = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(line.contains("WARN  audio-out "), "{line}");
        assert!(line.contains("audio_resampler::common::logger::formatter"), "{line}");
        assert!(line.trim_end().ends_with("> underrun"), "{line}");
        assert!(!line.contains('\x1b'), "{line}");
    }
}
