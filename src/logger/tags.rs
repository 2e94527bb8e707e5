/// Log tags identifying the subsystem a message originates from
///
/// Each tag maps to a --debug-<module> command-line flag.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Webserver,
    Sync,
    Snapshots,
    Report,
    Telegram,
    Api,
}

impl LogTag {
    /// Plain uppercase name for file output and alignment
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Webserver => "WEBSERVER",
            LogTag::Sync => "SYNC",
            LogTag::Snapshots => "SNAPSHOTS",
            LogTag::Report => "REPORT",
            LogTag::Telegram => "TELEGRAM",
            LogTag::Api => "API",
        }
    }

    /// Key used for --debug-<key> flag matching
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Webserver => "webserver",
            LogTag::Sync => "sync",
            LogTag::Snapshots => "snapshots",
            LogTag::Report => "report",
            LogTag::Telegram => "telegram",
            LogTag::Api => "api",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
