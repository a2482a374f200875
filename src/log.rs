/// Leveled status output used by the archiver.
///
/// Logging never alters control flow, so implementations swallow their own
/// write failures.
pub trait Reporter {
    fn info(&mut self, msg: &str);
    fn warn(&mut self, msg: &str);
    fn error(&mut self, msg: &str);
}

/// Terminal reporter backed by cliclack
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Reporter for Console {
    fn info(&mut self, msg: &str) {
        let _ = cliclack::log::info(msg);
    }

    fn warn(&mut self, msg: &str) {
        let _ = cliclack::log::warning(msg);
    }

    fn error(&mut self, msg: &str) {
        let _ = cliclack::log::error(msg);
    }
}

/// Reporter that keeps every message in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

#[cfg(test)]
impl Reporter for Recorder {
    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn warn(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_levels_apart() {
        let mut log = Recorder::default();
        let reporter: &mut dyn Reporter = &mut log;

        reporter.info("configs");
        reporter.warn("already exists");
        reporter.error("Issue with compress");

        assert_eq!(log.infos, vec!["configs"]);
        assert_eq!(log.warnings, vec!["already exists"]);
        assert_eq!(log.errors, vec!["Issue with compress"]);
    }
}
